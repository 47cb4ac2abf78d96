//! Reversible rewrites between readable rules text and its canonical form.
//!
//! [`PIPELINE`] lists the rewrites in forward order as `(forward, reverse)`
//! pairs. [`pass`] runs the forward halves front to back and [`unpass`]
//! runs the reverse halves back to front. Forward rewrites expect
//! lower-cased text; every rewrite leaves input it does not recognize
//! untouched.

use crate::markers::{
    BULLET, CHOICE_CLOSE, CHOICE_OPEN, COUNTER, COUNTER_RENAME, DASH, MANA_FORUM_CLOSE,
    MANA_FORUM_OPEN, MANA_OPEN, NEWLINE, RESERVED_MANA, TAP, THIS, UNARY_COUNTER, UNARY_MARKER,
    UNTAP, X,
};
use crate::unary::{from_unary, to_unary, unary};

/// Inputs some rewrites need besides the text itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassContext<'a> {
    /// Card name substituted for the self-reference marker.
    pub name: &'a str,
    /// Emit forum markup for symbols.
    pub forum: bool,
    /// Keep `[ ]` around rebuilt choice lists.
    pub delimit_choices: bool,
}

impl<'a> PassContext<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn forum(mut self, forum: bool) -> Self {
        self.forum = forum;
        self.delimit_choices = forum;
        self
    }
}

pub type Rewrite = fn(&str, &PassContext<'_>) -> String;

/// One named forward/reverse pair.
pub struct Transform {
    pub name: &'static str,
    pub forward: Rewrite,
    pub reverse: Rewrite,
}

pub static PIPELINE: [Transform; 11] = [
    Transform {
        name: "reminder",
        forward: |s, _| strip_reminder(s),
        reverse: |s, _| s.to_string(),
    },
    Transform {
        name: "cardname",
        forward: |s, ctx| replace_cardname(s, ctx.name),
        reverse: |s, ctx| restore_cardname(s, ctx.name),
    },
    Transform {
        name: "unary",
        forward: |s, _| to_unary(s),
        reverse: |s, _| from_unary(s),
    },
    Transform {
        name: "dashes",
        forward: |s, _| mark_dashes(s),
        reverse: |s, _| unmark_dashes(s),
    },
    Transform {
        name: "x",
        forward: |s, _| mark_x(s),
        reverse: |s, _| s.to_string(),
    },
    Transform {
        name: "counters",
        forward: |s, _| mark_counters(s),
        reverse: |s, _| unmark_counters(s),
    },
    Transform {
        name: "uncast",
        forward: |s, _| mark_uncast(s),
        reverse: |s, _| unmark_uncast(s),
    },
    Transform {
        name: "choice",
        forward: |s, _| mark_choices(s),
        reverse: |s, ctx| unmark_choices(s, ctx.delimit_choices),
    },
    Transform {
        name: "equip",
        forward: |s, _| hoist_equip(s),
        reverse: |s, _| lower_equip(s),
    },
    Transform {
        name: "newlines",
        forward: |s, _| s.replace('\n', &NEWLINE.to_string()),
        reverse: |s, _| s.replace(NEWLINE, "\n"),
    },
    Transform {
        name: "symbols",
        forward: |s, _| mark_symbols(s),
        reverse: |s, ctx| unmark_symbols(s, ctx.forum),
    },
];

/// Run every forward rewrite in order.
pub fn pass(text: &str, ctx: &PassContext<'_>) -> String {
    PIPELINE
        .iter()
        .fold(text.to_string(), |acc, t| (t.forward)(&acc, ctx))
}

/// Run every reverse rewrite in reverse order.
pub fn unpass(text: &str, ctx: &PassContext<'_>) -> String {
    unpass_with(text, ctx, |_| true)
}

/// Run the reverse rewrites accepted by `keep`, in reverse order.
pub fn unpass_with(
    text: &str,
    ctx: &PassContext<'_>,
    keep: impl Fn(&Transform) -> bool,
) -> String {
    PIPELINE
        .iter()
        .rev()
        .filter(|t| keep(t))
        .fold(text.to_string(), |acc, t| (t.reverse)(&acc, ctx))
}

// ---------------------------------------------------------------------------
// reminder text

pub fn strip_reminder(s: &str) -> String {
    s.split('\n')
        .map(strip_reminder_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_reminder_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    let mut stripped = false;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
        stripped = true;
    }
    out.push_str(rest);
    if stripped {
        collapse_spaces(out.trim_end())
    } else {
        out
    }
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch == ' ' && prev_space {
            continue;
        }
        prev_space = ch == ' ';
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// card name

/// Legends referred to by a nickname that is not comma separated.
const NICKNAMES: &[&str] = &[
    "crovax", "rashka", "phage", "shimatsu", "antharax", "tetsuo", "yomiji", "kumano", "kiki",
    "ertai", "teysa", "yawgmoth",
];

pub fn replace_cardname(s: &str, name: &str) -> String {
    let this = THIS.to_string();
    match name {
        "" | "fear" => return s.to_string(),
        // the keyword action shares the name
        "sacrifice" => return s.replacen(name, &this, 1),
        _ => {}
    }
    let mut out = replace_word(s, name, &this);
    if let Some((short, _)) = name.split_once(',') {
        if !short.trim().is_empty() {
            out = replace_word(&out, short.trim(), &this);
        }
    }
    for &nick in NICKNAMES {
        if name != nick && name.starts_with(nick) {
            out = replace_word(&out, nick, &this);
        }
    }
    out
}

pub fn restore_cardname(s: &str, name: &str) -> String {
    s.replace(THIS, name)
}

/// Replace `word` where it is not glued to other letters or digits.
fn replace_word(s: &str, word: &str, with: &str) -> String {
    if word.is_empty() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(at) = rest.find(word) {
        let before = rest[..at].chars().next_back();
        let after = rest[at + word.len()..].chars().next();
        let bounded = !before.is_some_and(char::is_alphanumeric)
            && !after.is_some_and(char::is_alphanumeric);
        out.push_str(&rest[..at]);
        out.push_str(if bounded { with } else { word });
        rest = &rest[at + word.len()..];
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// dashes

/// Normalize dashes to the dash marker, keeping minus signs on numbers.
/// Must run after the unary rewrite.
pub fn mark_dashes(s: &str) -> String {
    let mut chars: Vec<char> = Vec::with_capacity(s.len());
    let mut iter = s.chars().peekable();
    while let Some(ch) = iter.next() {
        match ch {
            '\u{2014}' | '\u{2013}' => chars.push(DASH),
            '-' if iter.peek() != Some(&UNARY_MARKER) => chars.push(DASH),
            _ => chars.push(ch),
        }
    }
    // level up ranges: "level &^-&^^^" keeps a dash, not a minus
    let pattern: Vec<char> = "level &".chars().collect();
    let mut i = 0;
    while i + pattern.len() <= chars.len() {
        if chars[i..i + pattern.len()] != pattern[..] {
            i += 1;
            continue;
        }
        let mut j = i + pattern.len();
        while j < chars.len() && chars[j] == UNARY_COUNTER {
            j += 1;
        }
        if j + 1 < chars.len() && chars[j] == '-' && chars[j + 1] == UNARY_MARKER {
            chars[j] = DASH;
        }
        i = j;
    }
    chars.into_iter().collect()
}

pub fn unmark_dashes(s: &str) -> String {
    s.replace(DASH, "-")
}

// ---------------------------------------------------------------------------
// variable x

/// Mark a standalone `x` as the variable `X`. `~x` becomes `-X`.
pub fn mark_x(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &ch) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let alone = ch == 'x'
            && !prev.is_some_and(char::is_alphanumeric)
            && !next.is_some_and(char::is_alphanumeric);
        if !alone {
            out.push(ch);
            continue;
        }
        if prev == Some(DASH) {
            out.pop();
            out.push('-');
        }
        out.push(X);
    }
    out
}

// ---------------------------------------------------------------------------
// counter kinds

const COUNTER_KINDS: &[&str] = &[
    "+&^/+&^", "-&^/-&^", "+&^/+&", "+&/+&^", "-&/-&^", "-&^/-&", "+&^^/+&^^", "-&^^/-&^^",
    "-&^^/-&^", "+&^/+&^^", "-&/-&^^", "+&^^/+&", "age", "aim", "arrow", "arrowhead", "awakening",
    "blaze", "blood", "bounty", "bribery", "brick", "carrion", "charge", "corpse", "credit",
    "crystal", "cube", "currency", "death", "delay", "depletion", "despair", "devotion", "divinity",
    "doom", "dream", "echo", "egg", "elixir", "energy", "eon", "experience", "eyeball", "fade",
    "fate", "feather", "filibuster", "flood", "fungus", "fuse", "gem", "glyph", "gold", "growth",
    "hatchling", "healing", "hoofprint", "hourglass", "hunger", "ice", "infection", "intervention",
    "javelin", "ki", "level", "lore", "loyalty", "luck", "magnet", "manifestation", "mannequin",
    "mask", "matrix", "mine", "mining", "mire", "music", "muster", "net", "omen", "ore", "page",
    "pain", "paralyzation", "petal", "petrification", "phylactery", "pin", "plague", "poison",
    "polyp", "pressure", "pupa", "quest", "time",
];

const COUNTERTYPE: &str = "countertype";

fn counter_phrase(kind: &str) -> String {
    format!("{kind} counter")
}

fn kind_boundary(before: Option<char>) -> bool {
    match before {
        None => true,
        Some(c) => !c.is_alphanumeric() && !matches!(c, '&' | '^' | '+' | '-' | '/' | '~'),
    }
}

fn find_bounded(s: &str, phrase: &str) -> Vec<usize> {
    s.match_indices(phrase)
        .filter(|(at, _)| kind_boundary(s[..*at].chars().next_back()))
        .map(|(at, _)| at)
        .collect()
}

/// When one counter kind is named, replace it with the counter marker and
/// record the kind on a leading `countertype` line.
pub fn mark_counters(s: &str) -> String {
    let used: Vec<&str> = COUNTER_KINDS
        .iter()
        .copied()
        .filter(|kind| !find_bounded(s, &counter_phrase(kind)).is_empty())
        .collect();
    let [kind] = used[..] else {
        return s.to_string();
    };
    let phrase = counter_phrase(kind);
    let marked = format!("{COUNTER} counter");
    let mut out = String::with_capacity(s.len() + 32);
    let mut last = 0;
    for at in find_bounded(s, &phrase) {
        out.push_str(&s[last..at]);
        out.push_str(&marked);
        last = at + phrase.len();
    }
    out.push_str(&s[last..]);
    format!("{COUNTERTYPE} {COUNTER} {kind}\n{out}")
}

pub fn unmark_counters(s: &str) -> String {
    let header = format!("{COUNTERTYPE} {COUNTER} ");
    let lines: Vec<&str> = s.split('\n').collect();
    let Some(pos) = lines.iter().position(|l| l.starts_with(&header)) else {
        return s.to_string();
    };
    let kind = lines[pos][header.len()..].trim().to_string();
    let rest: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pos)
        .map(|(_, l)| *l)
        .collect();
    rest.join("\n").replace(COUNTER, &kind)
}

// ---------------------------------------------------------------------------
// counter as a verb

const UNCAST_OBJECTS: &[&str] = &[
    "target",
    "it",
    "that spell",
    "that ability",
    "all",
    "up to",
    "each spell",
    "each ability",
    "those spells",
    "the next",
    "the first",
];

pub fn mark_uncast(s: &str) -> String {
    let mut out = replace_word(s, "countered", &format!("{COUNTER_RENAME}ed"));
    for object in UNCAST_OBJECTS {
        out = replace_word(
            &out,
            &format!("counter {object}"),
            &format!("{COUNTER_RENAME} {object}"),
        );
    }
    out
}

pub fn unmark_uncast(s: &str) -> String {
    s.replace(&format!("{COUNTER_RENAME}ed"), "countered")
        .replace(COUNTER_RENAME, "counter")
}

// ---------------------------------------------------------------------------
// choice lists

const COUNT_WORDS: [&str; 6] = ["zero", "one", "two", "three", "four", "five"];
const QUALIFIERS: [&str; 2] = [" or both", " or more"];
const SOURCE_BULLET: char = '\u{2022}';

struct ChoiceHeader<'a> {
    start: usize,
    count: usize,
    qualifier: &'a str,
}

/// Find `choose[s] <n>[ or both| or more] ~` ending the line.
fn choice_header(line: &str) -> Option<ChoiceHeader<'static>> {
    for (start, _) in line.match_indices("choose") {
        if line[..start].chars().next_back().is_some_and(char::is_alphanumeric) {
            continue;
        }
        let mut rest = &line[start + "choose".len()..];
        rest = rest.strip_prefix('s').unwrap_or(rest);
        let Some(rest) = rest.strip_prefix(' ') else {
            continue;
        };
        let Some((count, word)) = COUNT_WORDS
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, w)| rest.starts_with(*w))
        else {
            continue;
        };
        let mut rest = &rest[word.len()..];
        let mut qualifier = "";
        for q in QUALIFIERS {
            if let Some(r) = rest.strip_prefix(q) {
                qualifier = q;
                rest = r;
            }
        }
        let Some(rest) = rest.trim_end().strip_suffix(DASH) else {
            continue;
        };
        if rest.trim().is_empty() {
            return Some(ChoiceHeader {
                start,
                count,
                qualifier,
            });
        }
    }
    None
}

/// Fold a choice header and its bullet lines into `[&^ = a = b]`.
pub fn mark_choices(s: &str) -> String {
    let lines: Vec<&str> = s.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let options: Vec<&str> = lines[i + 1..]
            .iter()
            .map_while(|l| l.trim_start().strip_prefix(SOURCE_BULLET))
            .map(str::trim)
            .collect();
        match choice_header(line) {
            Some(header) if !options.is_empty() => {
                let mut marked = String::from(&line[..header.start]);
                marked.push(CHOICE_OPEN);
                marked.push_str(&unary(header.count));
                marked.push_str(header.qualifier);
                for option in &options {
                    marked.push(' ');
                    marked.push(BULLET);
                    marked.push(' ');
                    marked.push_str(option);
                }
                marked.push(CHOICE_CLOSE);
                out.push(marked);
                i += 1 + options.len();
            }
            _ => {
                out.push(line.to_string());
                i += 1;
            }
        }
    }
    out.join("\n")
}

/// Rebuild `choose <n> ~` and bullet lines from every `[&^ = a = b]`.
pub fn unmark_choices(s: &str, delimit: bool) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut rest = s;
    while let Some(open) = rest.find(CHOICE_OPEN) {
        let after = &rest[open + 1..];
        let Some(close) = after.find(CHOICE_CLOSE) else {
            break;
        };
        out.push_str(&rest[..open]);
        match rebuild_choice(&after[..close]) {
            Some(rebuilt) if delimit => {
                out.push(CHOICE_OPEN);
                out.push_str(&rebuilt);
                out.push(CHOICE_CLOSE);
            }
            Some(rebuilt) => out.push_str(&rebuilt),
            None => out.push_str(&rest[open..open + 1 + close + 1]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    let opponent = if delimit {
        ("an opponent [choose ", "an opponent [chooses ")
    } else {
        ("an opponent choose ", "an opponent chooses ")
    };
    out.replace(opponent.0, opponent.1)
}

fn rebuild_choice(inner: &str) -> Option<String> {
    let mut fragments = inner.split(BULLET);
    let head = fragments.next()?.strip_prefix(UNARY_MARKER)?;
    let count = head.chars().take_while(|&c| c == UNARY_COUNTER).count();
    let word = COUNT_WORDS.get(count).filter(|_| count > 0)?;
    let qualifier = head[count..].trim();
    let mut rebuilt = format!("choose {word}");
    if !qualifier.is_empty() {
        rebuilt.push(' ');
        rebuilt.push_str(qualifier);
    }
    rebuilt.push(' ');
    rebuilt.push(DASH);
    for option in fragments.map(str::trim).filter(|o| !o.is_empty()) {
        rebuilt.push('\n');
        rebuilt.push(SOURCE_BULLET);
        rebuilt.push(' ');
        rebuilt.push_str(option);
    }
    Some(rebuilt)
}

// ---------------------------------------------------------------------------
// equip costs

/// Equip cost lines in canonical form (`{2}`, `$`, `~`) and in rendered
/// form (plain or forum mana, restored dashes).
fn is_equip_line(line: &str) -> bool {
    let line = line.trim();
    let Some(rest) = line.strip_prefix("equip") else {
        return false;
    };
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    rest.starts_with(MANA_OPEN)
        || rest.starts_with(RESERVED_MANA)
        || rest.starts_with(MANA_FORUM_OPEN)
        || rest.starts_with([DASH, '-'])
}

/// Move the single equip line to the front.
pub fn hoist_equip(s: &str) -> String {
    let mut lines: Vec<&str> = s.split('\n').collect();
    let equips: Vec<usize> = (0..lines.len()).filter(|&i| is_equip_line(lines[i])).collect();
    match equips[..] {
        [at] if at > 0 => {
            let equip = lines.remove(at);
            lines.insert(0, equip.trim_end());
            lines.join("\n")
        }
        _ => s.to_string(),
    }
}

/// Move a leading equip line back to the end.
pub fn lower_equip(s: &str) -> String {
    let mut lines: Vec<&str> = s.split('\n').collect();
    if lines.len() < 2 || !is_equip_line(lines[0]) {
        return s.to_string();
    }
    let equip = lines.remove(0);
    lines.push(equip);
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// symbols

pub fn mark_symbols(s: &str) -> String {
    s.replace("{t}", &TAP.to_string())
        .replace("{T}", &TAP.to_string())
        .replace("{q}", &UNTAP.to_string())
        .replace("{Q}", &UNTAP.to_string())
}

pub fn unmark_symbols(s: &str, forum: bool) -> String {
    let wrap = |sym: char| {
        if forum {
            format!("{MANA_FORUM_OPEN}{sym}{MANA_FORUM_CLOSE}")
        } else {
            format!("{{{sym}}}")
        }
    };
    s.replace(TAP, &wrap(TAP)).replace(UNTAP, &wrap(UNTAP))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_only(name: &str, text: &str) -> String {
        pass(text, &PassContext::new(name))
    }

    #[test]
    fn pipeline_names_are_unique() {
        let mut names: Vec<&str> = PIPELINE.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PIPELINE.len());
    }

    #[test]
    fn strips_reminder_text() {
        assert_eq!(
            strip_reminder("flying (this creature can't be blocked except by fliers.)\ntrample"),
            "flying\ntrample"
        );
        assert_eq!(strip_reminder("unclosed (paren"), "unclosed (paren");
    }

    #[test]
    fn replaces_names_on_word_boundaries() {
        assert_eq!(replace_cardname("when fire enters", "fire"), "when @ enters");
        assert_eq!(replace_cardname("firebolt deals", "fire"), "firebolt deals");
        assert_eq!(
            replace_cardname("whenever jace attacks", "jace, the mind sculptor"),
            "whenever @ attacks"
        );
        assert_eq!(
            replace_cardname("crovax gets +1/+1", "crovax the cursed"),
            "@ gets +1/+1"
        );
        assert_eq!(replace_cardname("fear", "fear"), "fear");
        assert_eq!(
            replace_cardname("sacrifice a creature. sacrifice it", "sacrifice"),
            "@ a creature. sacrifice it"
        );
    }

    #[test]
    fn dashes_keep_minus_signs() {
        let s = mark_dashes(&to_unary("target creature gets -2/-2. non-creature"));
        assert_eq!(s, "target creature gets -&^^/-&^^. non~creature");
        assert_eq!(mark_dashes("level &^-&^^^"), "level &^~&^^^");
        assert_eq!(mark_dashes("choose one \u{2014}"), "choose one ~");
    }

    #[test]
    fn marks_variable_x() {
        assert_eq!(mark_x("deals x damage"), "deals X damage");
        assert_eq!(mark_x("gets ~x/~x"), "gets -X/-X");
        assert_eq!(mark_x("exile x target"), "exile X target");
        assert_eq!(mark_x("six boxes"), "six boxes");
    }

    #[test]
    fn counters_mark_a_single_kind() {
        let text = "put a +&^/+&^ counter on target creature.";
        let marked = mark_counters(text);
        assert_eq!(
            marked,
            "countertype % +&^/+&^\nput a % counter on target creature."
        );
        assert_eq!(unmark_counters(&marked), text);
    }

    #[test]
    fn counters_leave_mixed_kinds() {
        let text = "remove a time counter. put a fade counter.";
        assert_eq!(mark_counters(text), text);
        assert_eq!(mark_counters("a device counter"), "a device counter");
    }

    #[test]
    fn uncast_round_trips() {
        let text = "counter target spell. it can't be countered.";
        let marked = mark_uncast(text);
        assert_eq!(marked, "uncast target spell. it can't be uncasted.");
        assert_eq!(unmark_uncast(&marked), text);
        assert_eq!(mark_uncast("encounter target"), "encounter target");
    }

    #[test]
    fn choices_fold_into_brackets() {
        let text = "choose one ~\n\u{2022} draw a card.\n\u{2022} gain &^^ life.\nflash";
        let marked = mark_choices(text);
        assert_eq!(marked, "[&^ = draw a card. = gain &^^ life.]\nflash");
        assert_eq!(unmark_choices(&marked, false), text);
        assert_eq!(
            unmark_choices(&marked, true),
            "[choose one ~\n\u{2022} draw a card.\n\u{2022} gain &^^ life.]\nflash"
        );
    }

    #[test]
    fn choices_keep_qualifiers_and_opponents() {
        let text = "an opponent chooses one or both ~\n\u{2022} a\n\u{2022} b";
        let marked = mark_choices(text);
        assert_eq!(marked, "an opponent [&^ or both = a = b]");
        assert_eq!(unmark_choices(&marked, false), text);
    }

    #[test]
    fn choice_header_without_bullets_is_untouched() {
        let text = "choose one ~ nothing follows";
        assert_eq!(mark_choices(text), text);
        assert_eq!(unmark_choices("[not a choice]", false), "[not a choice]");
    }

    #[test]
    fn equip_moves_to_front_and_back() {
        let text = "equipped creature gets +&^/+&^.\nequip {2}";
        let hoisted = hoist_equip(text);
        assert_eq!(hoisted, "equip {2}\nequipped creature gets +&^/+&^.");
        assert_eq!(lower_equip(&hoisted), text);
    }

    #[test]
    fn equip_is_lowered_with_a_placeholder_cost() {
        assert_eq!(
            lower_equip("equip $\nequipped creature gets +&^^/+&."),
            "equipped creature gets +&^^/+&.\nequip $"
        );
        assert_eq!(
            lower_equip("equip [mana]1[/mana]\nequipped creature gets +2/+0."),
            "equipped creature gets +2/+0.\nequip [mana]1[/mana]"
        );
        assert_eq!(lower_equip("equipped creature\nequip $"), "equipped creature\nequip $");
    }

    #[test]
    fn symbols_swap_with_markers() {
        assert_eq!(mark_symbols("{t}: add {g}."), "T: add {g}.");
        assert_eq!(unmark_symbols("T: add $.", false), "{T}: add $.");
        assert_eq!(unmark_symbols("Q", true), "[mana]Q[/mana]");
    }

    #[test]
    fn full_pass_produces_canonical_text() {
        let text = "when grizzly bears enters the battlefield, it deals 2 damage.\nequip {1}";
        assert_eq!(
            forward_only("grizzly bears", text),
            "equip {1}\\when @ enters the battlefield, it deals &^^ damage."
        );
    }

    #[test]
    fn unpass_inverts_pass() {
        let name = "goblin arsonist";
        let ctx = PassContext::new(name);
        let samples = [
            "when goblin arsonist dies, you may have it deal 1 damage to any target.",
            "counter target spell unless its controller pays 3.",
            "put a +1/+1 counter on each creature you control.\nnon-human creatures get -1/-0.",
            "{t}: add one mana of any color.",
        ];
        for text in samples {
            let round = unpass(&pass(text, &ctx), &ctx);
            assert_eq!(round.to_lowercase(), text, "round trip of {text:?}");
        }
    }

    #[test]
    fn transforms_are_total_on_junk() {
        let junk = "(( ]] [&^ = ] countertype % \\ ~~ -- {t {q}} & ^^ x";
        let ctx = PassContext::new("junk");
        let _ = unpass(&pass(junk, &ctx), &ctx);
    }
}
