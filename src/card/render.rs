//! Human-readable renderings of a card.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Card;
use super::field::position_label;
use crate::markers::{BULLET, DASH, rarity_name};
use crate::normalize;
use crate::transforms::{self, PassContext};
use crate::unary::from_unary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Name, cost, type line and text, one per line.
    #[default]
    Plain,
    /// Visual spoiler block.
    Gatherer,
    /// Magic Set Editor `card:` block.
    Mse,
}

/// Placeholder values the set editor expects on every card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MseMetadata {
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

fn stamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2015, 7, 20)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .unwrap_or_default()
}

impl Default for MseMetadata {
    fn default() -> Self {
        Self {
            created: stamp(22, 53, 7),
            modified: stamp(22, 53, 8),
        }
    }
}

impl MseMetadata {
    fn block(&self) -> String {
        const STAMP: &str = "%Y-%m-%d %H:%M:%S";
        format!(
            "\thas styling: false\n\tnotes:\n\ttime created:{}\n\ttime modified:{}\n\
             \textra data:\n\timage:\n\tcard code text:\n\tcopyright:\n\timage 2:\n\tcopyright 2: ",
            self.created.format(STAMP),
            self.modified.format(STAMP),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub style: RenderStyle,
    /// Forum markup: `[mana]` tags, bold names, bracketed choices.
    pub forum: bool,
    pub mse: MseMetadata,
}

impl RenderOptions {
    pub fn new(style: RenderStyle, forum: bool) -> Self {
        Self {
            style,
            forum,
            ..Self::default()
        }
    }
}

const FACE_RULE: &str = "~~~~~~~~\n";

impl Card {
    /// Render for people. Other sides follow a rule line, except in
    /// set-editor output which has no notion of them.
    pub fn format(&self, options: &RenderOptions) -> String {
        let mut out = match options.style {
            RenderStyle::Gatherer => self.format_gatherer(options.forum),
            RenderStyle::Plain => self.format_plain(options.forum),
            RenderStyle::Mse => return self.format_mse(&options.mse),
        };
        if let Some(bside) = self.bside() {
            out.push_str(FACE_RULE);
            out.push_str(&bside.format(options));
        }
        out
    }

    fn rarity_label(&self) -> &str {
        rarity_name(&self.rarity).unwrap_or(self.rarity.as_str())
    }

    fn flags(&self) -> String {
        let mut out = String::new();
        if !self.parsed {
            out.push_str(" _UNPARSED_");
        }
        if !self.valid {
            out.push_str(" _INVALID_");
        }
        out
    }

    /// Name with stored dash markers turned back into hyphens.
    fn display_name(&self) -> String {
        self.name.replace(DASH, "-")
    }

    /// Rules text back in natural language with costs spliced in. The
    /// equip line is lowered after splicing so costs keep their places.
    fn readable_text(&self, ctx: &PassContext<'_>, keep_dashes: bool) -> String {
        let text = transforms::unpass_with(self.text.text(), ctx, |t| {
            t.name != "equip" && (!keep_dashes || t.name != "dashes")
        });
        transforms::lower_equip(&self.text.with_text(text).format(ctx.forum))
    }

    fn other_lines(&self) -> String {
        self.other
            .iter()
            .map(|(position, value)| format!("<{}> {value}\n", position_label(*position)))
            .collect()
    }

    fn format_gatherer(&self, forum: bool) -> String {
        let normalizer = normalize::current();
        let mut out = String::new();

        let cardname = if self.name.is_empty() {
            "_NONAME_".to_string()
        } else {
            normalizer.title_case(&self.display_name())
        };
        if forum {
            out.push_str(&format!("[b]{cardname}[/b]"));
        } else {
            out.push_str(&cardname);
        }
        out.push(' ');
        out.push_str(&self.cost.format(forum));
        if !self.rarity.is_empty() {
            out.push_str(&format!(" ({})", self.rarity_label()));
        }
        out.push_str(&self.flags());
        out.push('\n');

        let mut type_line: Vec<String> = self.supertypes.iter().map(|s| capitalize(s)).collect();
        if self.types.is_empty() {
            type_line.push("_NOTYPE_".to_string());
        } else {
            type_line.extend(self.types.iter().map(|s| capitalize(s)));
        }
        out.push_str(&type_line.join(" "));
        if !self.subtypes.is_empty() {
            out.push_str(" \u{2014} ");
            out.push_str(&normalizer.title_case(&self.subtypes.join(" ")));
        }
        if !self.pt.is_empty() {
            out.push_str(&format!(" ({})", from_unary(&self.pt)));
        }
        if !self.loyalty.is_empty() {
            out.push_str(&format!(" (({}))", from_unary(&self.loyalty)));
        }
        out.push('\n');

        if !self.text.is_empty() {
            let ctx = PassContext {
                forum,
                ..PassContext::new(&cardname)
            };
            let text = normalizer.sentence_case(&self.readable_text(&ctx, false));
            out.push_str(&text);
            out.push('\n');
        }

        if !self.other.is_empty() {
            if forum {
                let lines = self.other_lines();
                out.push_str(&format!("[i]{}[/i]\n", lines.trim_end_matches('\n')));
            } else {
                out.push_str("--\n");
                out.push_str(&self.other_lines());
            }
        }
        out
    }

    fn format_plain(&self, forum: bool) -> String {
        let cardname = self.display_name();
        let mut out = String::new();
        out.push_str(&cardname);
        if !self.rarity.is_empty() {
            out.push_str(&format!(" ({})", self.rarity_label().to_lowercase()));
        }
        out.push_str(&self.flags());
        out.push('\n');

        out.push_str(&self.cost.format(forum));
        out.push('\n');

        let types: Vec<&str> = self
            .supertypes
            .iter()
            .chain(&self.types)
            .map(String::as_str)
            .collect();
        out.push_str(&types.join(" "));
        if !self.subtypes.is_empty() {
            out.push_str(" - ");
            out.push_str(&self.subtypes.join(" "));
        }
        out.push('\n');

        if !self.text.is_empty() {
            let ctx = PassContext::new(&cardname).forum(forum);
            out.push_str(&self.readable_text(&ctx, false));
            out.push('\n');
        }
        if !self.pt.is_empty() {
            out.push_str(&format!("({})\n", from_unary(&self.pt)));
        }
        if !self.loyalty.is_empty() {
            out.push_str(&format!("(({}))\n", from_unary(&self.loyalty)));
        }
        if !self.other.is_empty() {
            out.push_str("--\n");
            out.push_str(&self.other_lines());
        }
        out
    }

    fn format_mse(&self, meta: &MseMetadata) -> String {
        let normalizer = normalize::current();
        let cardname = normalizer.title_case(&self.display_name());
        let mut out = String::from("card:\n");
        out.push_str(&format!("\tname: {cardname}\n"));
        if !self.rarity.is_empty() {
            out.push_str(&format!("\trarity: {}\n", self.rarity_label().to_lowercase()));
        }
        if !self.is_type("land") {
            let cost = self.cost.format(false).replace(['{', '}'], "");
            out.push_str(&format!("\tcasting cost: {cost}\n"));
        }
        let types: Vec<&str> = self
            .supertypes
            .iter()
            .chain(&self.types)
            .map(String::as_str)
            .collect();
        out.push_str(&format!(
            "\tsuper type: {}\n",
            normalizer.title_case(&types.join(" "))
        ));
        if !self.subtypes.is_empty() {
            out.push_str(&format!(
                "\tsub type: {}\n",
                normalizer.title_case(&self.subtypes.join(" "))
            ));
        }

        if !self.text.is_empty() {
            let ctx = PassContext::new(&cardname);
            let text = self
                .readable_text(&ctx, true)
                .replace(DASH, "\u{2014}")
                .replace('{', "<sym-auto>")
                .replace('}', "</sym-auto>");
            let line_count = text.matches('\n').count() + 1;
            let mut text = capitalize_starts(&text);

            if self.is_type("planeswalker") {
                out.push_str("\tstylesheet: m15-planeswalker\n");
                let (costs, rest) = extract_loyalty_costs(&text);
                for (i, cost) in costs.iter().enumerate() {
                    out.push_str(&format!("\tloyalty cost {}: {cost}\n", i + 1));
                }
                text = capitalize_starts(&rest);
                if !self.loyalty.is_empty() {
                    out.push_str(&format!("\tloyalty: {}\n", from_unary(&self.loyalty)));
                }
            }

            if line_count > 1 {
                out.push_str(&format!("\trule text:\n\t\t{}\n", text.replace('\n', "\n\t\t")));
            } else {
                out.push_str(&format!("\trule text: {text}\n"));
            }
        }

        if !self.pt.is_empty() {
            let pt = from_unary(&self.pt);
            if let Some((power, toughness)) = pt.split_once('/') {
                out.push_str(&format!("\tpower: {power}\n\ttoughness: {toughness}\n"));
            }
        }
        out.push_str(&meta.block());
        out
    }
}

/// First letter upper, the rest lower.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case the text start, every line start, and the letter two
/// places after a full stop or bullet.
fn capitalize_starts(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut starts = vec![false; chars.len() + 2];
    starts[0] = true;
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '\n' => starts[i + 1] = true,
            '.' | BULLET | '\u{2022}' => starts[i + 2] = true,
            _ => {}
        }
    }
    chars
        .iter()
        .enumerate()
        .flat_map(|(i, ch)| {
            let upper: Vec<char> = if starts[i] {
                ch.to_uppercase().collect()
            } else {
                vec![*ch]
            };
            upper
        })
        .collect()
}

/// Pull every `+N: ` / `-NN: ` loyalty cost out of planeswalker text.
fn extract_loyalty_costs(text: &str) -> (Vec<String>, String) {
    let chars: Vec<char> = text.chars().collect();
    let mut costs = Vec::new();
    let mut rest = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '+' | '-') {
            let digits = chars[i + 1..]
                .iter()
                .take(2)
                .take_while(|c| c.is_ascii_digit())
                .count();
            let tail = i + 1 + digits;
            if digits > 0 && chars.get(tail) == Some(&':') && chars.get(tail + 1) == Some(&' ') {
                costs.push(chars[i..tail].iter().collect());
                i = tail + 2;
                continue;
            }
        }
        rest.push(chars[i]);
        i += 1;
    }
    (costs, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_after_stops_and_lines() {
        assert_eq!(
            capitalize_starts("draw a card. then discard.\n\u{2022} gain life."),
            "Draw a card. Then discard.\n\u{2022} Gain life."
        );
    }

    #[test]
    fn extracts_loyalty_costs() {
        let (costs, rest) =
            extract_loyalty_costs("+1: draw a card.\n-3: gain 3 life.\n-10: you win.");
        assert_eq!(costs, ["+1", "-3", "-10"]);
        assert_eq!(rest, "draw a card.\ngain 3 life.\nyou win.");
    }

    #[test]
    fn metadata_block_uses_fixed_stamps() {
        let block = MseMetadata::default().block();
        assert!(block.contains("time created:2015-07-20 22:53:07"));
        assert!(block.contains("time modified:2015-07-20 22:53:08"));
        assert!(block.ends_with("copyright 2: "));
    }

    #[test]
    fn capitalize_lowers_the_rest() {
        assert_eq!(capitalize("LEGENDARY"), "Legendary");
        assert_eq!(capitalize(""), "");
    }
}
