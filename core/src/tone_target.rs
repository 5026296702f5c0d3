//! Tone placement.
//!
//! A Vietnamese syllable carries a single tone, displayed on one vowel of its
//! nucleus. Which vowel depends on the cluster, on whether a final consonant
//! follows, and for `oa`, `oe` and `uy` at the end of a word on the chosen
//! orthography: `hòa`/`thúy` in the old style, `hoà`/`thuý` in the modern one.
//!
//! The same selector serves live typing and text reconstruction, which keeps
//! a rebuilt composition indistinguishable from a typed one.

use serde::{Deserialize, Serialize};

use crate::charset::is_vowel;

/// Tone placement convention for `oa`, `oe` and `uy` ending a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneStyle {
    /// Tone on the first vowel: hòa, hòe, thúy.
    Old,
    /// Tone on the second vowel: hoà, hoè, thuý.
    #[default]
    Modern,
}

/// An appended letter as seen by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    /// Position of the appending transformation in its composition.
    pub index: usize,
    /// Lowercase letter with its mark applied and no tone.
    pub ch: char,
}

fn is_marked_vowel(c: char) -> bool {
    matches!(c, 'ă' | 'â' | 'ê' | 'ô' | 'ơ' | 'ư')
}

/// Pick the letter of a word that should carry its tone.
///
/// `letters` are the word's appended letters in typing order. Returns the
/// composition index of the chosen letter, or `None` when the word has no
/// vowel.
pub fn find_tone_target(letters: &[Letter], style: ToneStyle) -> Option<usize> {
    let end = letters.iter().rposition(|l| is_vowel(l.ch))?;
    let mut start = end;
    while start > 0 && is_vowel(letters[start - 1].ch) {
        start -= 1;
    }

    // Word-initial "qu" and "gi" are consonants when more vowels follow.
    if start == 1 && end > start {
        if let ('q', 'u') | ('g', 'i') = (letters[0].ch, letters[1].ch) {
            start += 1;
        }
    }

    let cluster: Vec<char> = letters[start..=end].iter().map(|l| l.ch).collect();
    let has_final = end + 1 < letters.len();
    let offset = nucleus(&cluster, has_final, style);
    Some(letters[start + offset].index)
}

fn nucleus(cluster: &[char], has_final: bool, style: ToneStyle) -> usize {
    if let Some(pos) = cluster.iter().rposition(|&c| is_marked_vowel(c)) {
        return pos;
    }
    match cluster {
        [_] => 0,
        [first, second] if !has_final => match (first, second) {
            ('o', 'a') | ('o', 'e') | ('u', 'y') => match style {
                ToneStyle::Old => 0,
                ToneStyle::Modern => 1,
            },
            _ => 0,
        },
        _ => 1,
    }
}
