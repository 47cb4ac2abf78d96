use cardcodec::{
    Card, Format, Randomize, RenderOptions, RenderStyle, Similarity, Tally, cards_from_corpus,
    decode_text, encode_cards, parse_json_corpus, write_cards,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const ALL_SETS: &str = r#"{
    "LEA": {
        "name": "Limited Edition Alpha",
        "code": "LEA",
        "cards": [
            {"name": "Grizzly Bears", "manaCost": "{1}{G}", "types": ["Creature"],
             "subtypes": ["Bear"], "power": "2", "toughness": "2", "rarity": "Common"},
            {"name": "Shock", "manaCost": "{R}", "types": ["Instant"],
             "text": "Shock deals 2 damage to any target.", "rarity": "Common"}
        ]
    },
    "PRM": {
        "name": "Promos",
        "code": "PRM",
        "cards": [
            {"name": "Shock", "manaCost": "{R}", "types": ["Instant"],
             "text": "Shock deals 2 damage to any target.", "rarity": "Special"}
        ]
    }
}"#;

struct FixedIndex;

impl Similarity for FixedIndex {
    fn nearest_card(&self, _card: &Card) -> Vec<(f64, String)> {
        vec![(0.5, "Lava Spike".to_string())]
    }

    fn nearest_name(&self, name: &str) -> Vec<(f64, String)> {
        vec![(1.0, name.to_string())]
    }
}

#[test]
fn corpus_yields_one_card_per_name() {
    let corpus = parse_json_corpus(ALL_SETS).expect("corpus");
    let cards = cards_from_corpus(&corpus).expect("cards");

    let names: Vec<&str> = cards.iter().map(Card::name).collect();
    assert_eq!(names, vec!["grizzly bears", "shock"]);
    assert_eq!(cards[1].rarity(), "C");
    assert_eq!(Tally::of(&cards), Tally { valid: 2, invalid: 0, unparsed: 0 });
}

#[test]
fn encoded_corpus_decodes_to_the_same_cards() {
    let corpus = parse_json_corpus(ALL_SETS).expect("corpus");
    let cards = cards_from_corpus(&corpus).expect("cards");
    let format = Format::default();
    let mut rng = StdRng::seed_from_u64(3);

    let encoded = encode_cards(&cards, &format, Randomize::default(), &mut rng).expect("encode");
    assert!(encoded.ends_with("\n\n"));
    let decoded = decode_text(&encoded, &format).expect("decode");
    assert_eq!(decoded, cards);
}

#[test]
fn tally_separates_invalid_from_unparsed() {
    let text = "|1bears|5creature|8&^^/&^^|\n\n|1bears|5creature|\n\n|1nothing|\n\n";
    let cards = decode_text(text, &Format::default()).expect("decode");
    assert_eq!(
        Tally::of(&cards),
        Tally {
            valid: 1,
            invalid: 1,
            unparsed: 1,
        }
    );
    assert!(!Tally::looks_legacy(&cards));
}

#[test]
fn neighbours_are_listed_under_each_card() {
    let cards = decode_text("|1shock|5instant|3{RR}|", &Format::default()).expect("decode");
    let mut out = Vec::new();
    write_cards(
        &mut out,
        &cards,
        &RenderOptions::new(RenderStyle::Plain, false),
        Some(&FixedIndex),
    )
    .expect("write");

    let out = String::from_utf8(out).expect("utf-8");
    assert_eq!(
        out,
        "shock\n{R}\ninstant\n\
         ~~ closest cards ~~\nLava Spike: 0.5\n\
         ~~ closest names ~~\nshock: 1\n\n"
    );
}

#[test]
fn forum_neighbours_use_card_tags() {
    let cards = decode_text("|1shock|5instant|", &Format::default()).expect("decode");
    let mut out = Vec::new();
    write_cards(
        &mut out,
        &cards,
        &RenderOptions::new(RenderStyle::Gatherer, true),
        Some(&FixedIndex),
    )
    .expect("write");

    let out = String::from_utf8(out).expect("utf-8");
    assert!(out.contains("[card]Lava Spike[/card]: 0.5\n"));
    assert!(out.ends_with("[card]shock[/card]: 1\n\n"));
}

#[test]
fn set_editor_output_skips_neighbours() {
    let cards = decode_text("|1shock|5instant|", &Format::default()).expect("decode");
    let mut out = Vec::new();
    write_cards(
        &mut out,
        &cards,
        &RenderOptions::new(RenderStyle::Mse, false),
        Some(&FixedIndex),
    )
    .expect("write");

    let out = String::from_utf8(out).expect("utf-8");
    assert!(!out.contains("closest"));
    assert!(out.ends_with("copyright 2: \n"));
}
