//! The composition log and its rendering.
//!
//! A composition is the ordered list of transformations that built the
//! visible text. Appending transformations introduce letters; mark and tone
//! transformations point back at the letter they modify by index. Rendering
//! replays the log: each letter shows the latest mark and the latest tone
//! aimed at it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::charset::{compose_char, is_word_break, to_upper, Mark, Tone};
use crate::tone_target::Letter;
use crate::transformation::Transformation;

/// Rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Composed Vietnamese letters.
    #[default]
    Vietnamese,
    /// The raw keys that produced the composition.
    English,
}

/// Ordered, append-only transformation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    transformations: Vec<Transformation>,
}

impl Composition {
    /// Create a new empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn clear(&mut self) {
        self.transformations.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Transformation> {
        self.transformations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transformation> {
        self.transformations.iter()
    }

    pub fn as_slice(&self) -> &[Transformation] {
        &self.transformations
    }

    /// Append a transformation and return its index.
    pub fn push(&mut self, t: Transformation) -> usize {
        debug_assert!(
            t.target.map_or(true, |target| target < self.len()),
            "targets must point backward"
        );
        self.transformations.push(t);
        self.transformations.len() - 1
    }

    /// Latest mark aimed at the letter at `index`.
    pub fn mark_of(&self, index: usize) -> Mark {
        self.transformations[index..]
            .iter()
            .filter(|t| t.target == Some(index))
            .filter_map(Transformation::mark)
            .last()
            .unwrap_or_default()
    }

    /// Latest tone aimed at the letter at `index`.
    pub fn tone_of(&self, index: usize) -> Tone {
        self.transformations[index..]
            .iter()
            .filter(|t| t.target == Some(index))
            .filter_map(Transformation::tone)
            .last()
            .unwrap_or_default()
    }

    /// Index where the last word begins: just after the last appended break
    /// symbol, or 0.
    pub fn word_start(&self) -> usize {
        self.transformations
            .iter()
            .rposition(|t| t.is_appending() && t.rule.result.is_some_and(is_word_break))
            .map_or(0, |i| i + 1)
    }

    /// Appended letters in `range`, lowercase with their current mark.
    pub fn letters(&self, range: Range<usize>) -> Vec<Letter> {
        let start = range.start;
        self.transformations[range]
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_appending())
            .filter_map(|(offset, t)| {
                let index = start + offset;
                let root = t.rule.result?;
                Some(Letter {
                    index,
                    ch: compose_char(root, self.mark_of(index), Tone::None),
                })
            })
            .collect()
    }

    /// Current tone of the word starting at `start`: the latest tone
    /// transformation in it, with the letter it targets.
    pub fn word_tone(&self, start: usize) -> Option<(usize, Tone)> {
        self.transformations[start..]
            .iter()
            .rev()
            .find_map(|t| Some((t.target?, t.tone()?)))
    }

    /// Drop the last appended letter and everything aimed at it.
    /// Returns the removed root, if any.
    pub fn remove_last_letter(&mut self) -> Option<char> {
        let index = self.transformations.iter().rposition(Transformation::is_appending)?;
        let root = self.transformations[index].rule.result;
        let mut position = 0;
        self.transformations.retain(|t| {
            let keep = position < index || (position > index && t.target != Some(index));
            position += 1;
            keep
        });
        root
    }

    /// Render the whole composition.
    pub fn render(&self, mode: Mode) -> String {
        self.render_range(0..self.len(), mode)
    }

    /// Render the transformations in `range`. Marks and tones are looked up
    /// across the whole composition.
    pub fn render_range(&self, range: Range<usize>, mode: Mode) -> String {
        let start = range.start;
        let mut out = String::new();
        for (offset, t) in self.transformations[range].iter().enumerate() {
            let ch = match mode {
                Mode::English => t.rule.key,
                Mode::Vietnamese if t.is_appending() => {
                    let index = start + offset;
                    t.rule
                        .result
                        .map(|root| compose_char(root, self.mark_of(index), self.tone_of(index)))
                }
                Mode::Vietnamese => None,
            };
            if let Some(ch) = ch {
                out.push(if t.is_upper_case { to_upper(ch) } else { ch });
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = &'a Transformation;
    type IntoIter = std::slice::Iter<'a, Transformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformation::{Effect, Rule};

    fn mark(mark: Mark, key: Option<char>) -> Rule {
        Rule {
            key,
            effect_on: None,
            effect: Effect::Mark(mark),
            result: None,
        }
    }

    fn tone(tone: Tone, key: Option<char>) -> Rule {
        Rule {
            key,
            effect_on: None,
            effect: Effect::Tone(tone),
            result: None,
        }
    }

    /// "Việt" typed in Telex as V-i-e-e-t-j.
    fn viet() -> Composition {
        let mut comp = Composition::new();
        comp.push(Transformation::appending(Rule::append('v'), true));
        comp.push(Transformation::appending(Rule::append('i'), false));
        let e = comp.push(Transformation::appending(Rule::append('e'), false));
        comp.push(Transformation::targeting(mark(Mark::Circumflex, Some('e')), e, false));
        comp.push(Transformation::appending(Rule::append('t'), false));
        comp.push(Transformation::targeting(tone(Tone::Underdot, Some('j')), e, false));
        comp
    }

    #[test]
    fn test_new() {
        let comp = Composition::new();
        assert!(comp.is_empty());
        assert_eq!(comp.render(Mode::Vietnamese), "");
    }

    #[test]
    fn test_render_modes() {
        let comp = viet();
        assert_eq!(comp.render(Mode::Vietnamese), "Việt");
        assert_eq!(comp.render(Mode::English), "Vieetj");
    }

    #[test]
    fn test_latest_mark_and_tone_win() {
        let mut comp = viet();
        comp.push(Transformation::targeting(mark(Mark::None, None), 2, false));
        comp.push(Transformation::targeting(tone(Tone::Acute, None), 2, false));
        assert_eq!(comp.mark_of(2), Mark::None);
        assert_eq!(comp.tone_of(2), Tone::Acute);
        assert_eq!(comp.render(Mode::Vietnamese), "Viét");
    }

    #[test]
    fn test_word_start_and_letters() {
        let mut comp = viet();
        comp.push(Transformation::appending(Rule::append(' '), false));
        assert_eq!(comp.word_start(), comp.len());

        let start = comp.word_start();
        comp.push(Transformation::appending(Rule::append('o'), false));
        let letters = comp.letters(start..comp.len());
        assert_eq!(letters, vec![Letter { index: start, ch: 'o' }]);

        let letters = viet().letters(0..6);
        let chars: String = letters.iter().map(|l| l.ch).collect();
        assert_eq!(chars, "viêt");
        assert_eq!(letters[2].index, 2);
    }

    #[test]
    fn test_word_tone() {
        let mut comp = viet();
        assert_eq!(comp.word_tone(0), Some((2, Tone::Underdot)));

        comp.push(Transformation::targeting(tone(Tone::None, Some('z')), 2, false));
        assert_eq!(comp.word_tone(0), Some((2, Tone::None)));
        assert_eq!(comp.render(Mode::Vietnamese), "Viêt");

        comp.push(Transformation::appending(Rule::append(','), false));
        assert_eq!(comp.word_tone(comp.word_start()), None);
    }

    #[test]
    fn test_remove_last_letter() {
        let mut comp = viet();
        assert_eq!(comp.remove_last_letter(), Some('t'));
        // the tone targeting 'ê' survives
        assert_eq!(comp.render(Mode::Vietnamese), "Việ");

        assert_eq!(comp.remove_last_letter(), Some('e'));
        assert_eq!(comp.render(Mode::Vietnamese), "Vi");
        assert_eq!(comp.len(), 2);

        comp.clear();
        assert_eq!(comp.remove_last_letter(), None);
    }

    #[test]
    fn test_serialize_json() {
        let comp = viet();
        let json = serde_json::to_string(&comp).expect("serialize");
        let back: Composition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, comp);
        assert!(json.starts_with('['));
    }
}
