//! Vietnamese character primitives.
//!
//! Tones and marks are read from, and written into, single precomposed code
//! points through canonical Unicode (de)composition. For example "ệ"
//! decomposes into `e` + U+0323 (dot below) + U+0302 (circumflex), which this
//! module reports as root `e`, `Mark::Circumflex`, `Tone::Underdot`.
//!
//! `đ`/`Đ` have no canonical decomposition and are special-cased as `d` with
//! `Mark::Stroke`.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::decompose_canonical;
use unicode_normalization::UnicodeNormalization;

/// Toneless vowels, lowercase, with every mark they can carry.
pub const VOWELS: &str = "aăâeêioôơuưy";

/// One of the six Vietnamese tones ("no tone" included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    None,
    Acute,
    Grave,
    HookAbove,
    Tilde,
    Underdot,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::None,
        Tone::Acute,
        Tone::Grave,
        Tone::HookAbove,
        Tone::Tilde,
        Tone::Underdot,
    ];

    /// Combining code point used to render this tone.
    pub fn combining(self) -> Option<char> {
        match self {
            Tone::None => None,
            Tone::Acute => Some('\u{0301}'),
            Tone::Grave => Some('\u{0300}'),
            Tone::HookAbove => Some('\u{0309}'),
            Tone::Tilde => Some('\u{0303}'),
            Tone::Underdot => Some('\u{0323}'),
        }
    }

    fn from_combining(c: char) -> Option<Tone> {
        match c {
            '\u{0301}' => Some(Tone::Acute),
            '\u{0300}' => Some(Tone::Grave),
            '\u{0309}' => Some(Tone::HookAbove),
            '\u{0303}' => Some(Tone::Tilde),
            '\u{0323}' => Some(Tone::Underdot),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Tone::None
    }
}

/// A non-tone diacritic. At most one per letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    None,
    /// â ê ô
    Circumflex,
    /// ơ ư
    Horn,
    /// ă
    Breve,
    /// đ
    Stroke,
}

impl Mark {
    pub fn combining(self) -> Option<char> {
        match self {
            Mark::None | Mark::Stroke => None,
            Mark::Circumflex => Some('\u{0302}'),
            Mark::Horn => Some('\u{031B}'),
            Mark::Breve => Some('\u{0306}'),
        }
    }

    fn from_combining(c: char) -> Option<Mark> {
        match c {
            '\u{0302}' => Some(Mark::Circumflex),
            '\u{031B}' => Some(Mark::Horn),
            '\u{0306}' => Some(Mark::Breve),
            _ => None,
        }
    }

    /// Whether this mark can sit on `root` in Vietnamese orthography.
    pub fn fits(self, root: char) -> bool {
        let root = root.to_ascii_lowercase();
        match self {
            Mark::None => true,
            Mark::Circumflex => matches!(root, 'a' | 'e' | 'o'),
            Mark::Horn => matches!(root, 'o' | 'u'),
            Mark::Breve => root == 'a',
            Mark::Stroke => root == 'd',
        }
    }

    pub fn is_none(self) -> bool {
        self == Mark::None
    }
}

/// Whether `c` (lowercase, toneless) is a Vietnamese vowel.
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

fn is_base_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Whitespace and punctuation separate words.
pub fn is_word_break(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(
            c,
            '…' | '“' | '”' | '‘' | '’' | '«' | '»' | '–' | '—' | '¿' | '¡'
        )
}

/// Split a letter into (root, mark, tone).
///
/// Total: a code point that carries anything other than a Vietnamese mark and
/// tone, or a mark/tone its base cannot take, comes back unchanged as its own
/// root.
pub fn split_char(c: char) -> (char, Mark, Tone) {
    match c {
        'đ' => return ('d', Mark::Stroke, Tone::None),
        'Đ' => return ('D', Mark::Stroke, Tone::None),
        _ => {}
    }

    let mut root = None;
    let mut mark = Mark::None;
    let mut tone = Tone::None;
    let mut foreign = false;
    decompose_canonical(c, |part| {
        if root.is_none() {
            root = Some(part);
        } else if let Some(t) = Tone::from_combining(part) {
            tone = t;
        } else if let Some(m) = Mark::from_combining(part) {
            mark = m;
        } else {
            foreign = true;
        }
    });

    let root = root.unwrap_or(c);
    if foreign || !mark.fits(root) || (!tone.is_none() && !is_base_vowel(root)) {
        return (c, Mark::None, Tone::None);
    }
    (root, mark, tone)
}

/// Build a single code point from its parts. Falls back to the (stroked)
/// root when the combination has no precomposed form.
pub fn compose_char(root: char, mark: Mark, tone: Tone) -> char {
    let base = match (mark, root) {
        (Mark::Stroke, 'd') => 'đ',
        (Mark::Stroke, 'D') => 'Đ',
        _ => root,
    };
    let mut composed = std::iter::once(base)
        .chain(mark.combining())
        .chain(tone.combining())
        .nfc();
    match (composed.next(), composed.next()) {
        (Some(c), None) => c,
        _ => base,
    }
}

/// Apply `mark` to a letter that is known to carry no tone.
pub fn add_mark_to_toneless(c: char, mark: Mark) -> char {
    let (root, _, _) = split_char(c);
    compose_char(root, mark, Tone::None)
}

/// Lower-case `c` and report whether it was uppercase.
///
/// Letters whose case mapping is not a single code point both ways are kept
/// verbatim and reported as lowercase, so re-applying the case never alters
/// them.
pub fn fold_case(c: char) -> (char, bool) {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l != c && to_upper(l) == c => (l, true),
        _ => (c, false),
    }
}

/// Single-code-point uppercase of `c`, or `c` itself.
pub fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
