//! Rebuilding a composition from already-composed text.
//!
//! Text is split into words and break symbols; each letter of a word becomes
//! an appending transformation on its bare root, followed by a mark
//! transformation when it carries a mark. A word's tone is then attached once,
//! to the letter the tone-target selector would have picked while typing, so
//! the result is interchangeable with a composition built key by key.

use tracing::debug;

use unicode_normalization::UnicodeNormalization;

use crate::charset::{add_mark_to_toneless, fold_case, is_word_break, split_char, Mark, Tone};
use crate::composition::Composition;
use crate::tone_target::{find_tone_target, ToneStyle};
use crate::transformation::{Effect, Rule, Transformation};

/// Split `text` into maximal runs without break symbols and single break
/// symbols. Concatenating the pieces yields `text`.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    for (pos, ch) in text.char_indices() {
        if is_word_break(ch) {
            if word_start < pos {
                words.push(&text[word_start..pos]);
            }
            let end = pos + ch.len_utf8();
            words.push(&text[pos..end]);
            word_start = end;
        }
    }
    if word_start < text.len() {
        words.push(&text[word_start..]);
    }
    words
}

/// Decomposed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposedChar {
    /// Lowercase root without mark or tone.
    pub root: char,
    pub mark: Mark,
    pub tone: Tone,
    pub is_upper_case: bool,
}

/// Separate a letter into root, mark and tone, recording its case.
pub fn decompose_char(ch: char) -> DecomposedChar {
    let (lower, is_upper_case) = fold_case(ch);
    let (root, mark, tone) = split_char(lower);
    DecomposedChar {
        root,
        mark,
        tone,
        is_upper_case,
    }
}

/// Append the transformations for one word (or one break symbol) to
/// `composition`.
///
/// Words are brought to NFC first, so a base letter followed by combining
/// marks is read as the single letter it stands for.
pub fn compose_word(word: &str, style: ToneStyle, composition: &mut Composition) {
    let mut chars = word.chars();
    if let (Some(symbol), None) = (chars.next(), chars.next()) {
        if is_word_break(symbol) {
            composition.push(Transformation::appending(
                Rule::append(symbol),
                symbol.is_uppercase(),
            ));
            return;
        }
    }

    let word: String = word.nfc().collect();
    let start = composition.len();
    let mut word_tone = Tone::None;
    for ch in word.chars() {
        let letter = decompose_char(ch);
        let index = composition.push(Transformation::appending(
            Rule::append(letter.root),
            letter.is_upper_case,
        ));
        if !letter.mark.is_none() {
            composition.push(Transformation::targeting(
                Rule {
                    key: None,
                    effect_on: Some(letter.root),
                    effect: Effect::Mark(letter.mark),
                    result: Some(add_mark_to_toneless(letter.root, letter.mark)),
                },
                index,
                false,
            ));
        }
        if !letter.tone.is_none() {
            word_tone = letter.tone;
        }
    }

    if word_tone.is_none() {
        return;
    }
    let letters = composition.letters(start..composition.len());
    match find_tone_target(&letters, style) {
        Some(target) => {
            composition.push(Transformation::targeting(
                Rule {
                    key: None,
                    effect_on: None,
                    effect: Effect::Tone(word_tone),
                    result: None,
                },
                target,
                false,
            ));
        }
        None => debug!(word = %word, tone = ?word_tone, "no tone target, tone dropped"),
    }
}

/// Rebuild the composition of `text`.
pub fn rebuild_composition(text: &str, style: ToneStyle) -> Composition {
    let mut composition = Composition::new();
    let words = split_words(text);
    for word in &words {
        compose_word(word, style, &mut composition);
    }
    debug!(
        words = words.len(),
        transformations = composition.len(),
        "rebuilt composition from text"
    );
    composition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Mode;
    use crate::transformation::EffectType;

    fn render(text: &str, style: ToneStyle) -> String {
        rebuild_composition(text, style).render(Mode::Vietnamese)
    }

    #[test]
    fn split_keeps_every_symbol() {
        assert_eq!(split_words("chào. Xin"), vec!["chào", ".", " ", "Xin"]);
        assert_eq!(split_words("a,,b"), vec!["a", ",", ",", "b"]);
        assert_eq!(split_words("  "), vec![" ", " "]);
        assert_eq!(split_words("việt"), vec!["việt"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn decompose_records_case() {
        let d = decompose_char('Ộ');
        assert_eq!(
            d,
            DecomposedChar {
                root: 'o',
                mark: Mark::Circumflex,
                tone: Tone::Underdot,
                is_upper_case: true,
            }
        );
        assert_eq!(decompose_char('x').root, 'x');
        assert_eq!(decompose_char('Đ').mark, Mark::Stroke);
    }

    #[test]
    fn word_layout() {
        let comp = rebuild_composition("việt", ToneStyle::Modern);
        let kinds: Vec<EffectType> = comp.iter().map(|t| t.rule.effect_type()).collect();
        assert_eq!(
            kinds,
            vec![
                EffectType::Appending,
                EffectType::Appending,
                EffectType::Appending,
                EffectType::MarkTransformation,
                EffectType::Appending,
                EffectType::ToneTransformation,
            ]
        );

        let mark = comp.get(3).unwrap();
        assert_eq!(mark.target, Some(2));
        assert_eq!(mark.rule.effect_on, Some('e'));
        assert_eq!(mark.rule.result, Some('ê'));

        let tone = comp.get(5).unwrap();
        assert_eq!(tone.target, Some(2));
        assert_eq!(tone.rule.effect, Effect::Tone(Tone::Underdot));
        assert_eq!(tone.rule.key, None);
        assert_eq!(tone.rule.result, None);
    }

    #[test]
    fn targets_point_backward() {
        let comp = rebuild_composition("Người Việt, được không?", ToneStyle::Old);
        for (i, t) in comp.iter().enumerate() {
            if let Some(target) = t.target {
                assert!(target < i);
                assert!(comp.get(target).unwrap().is_appending());
            }
        }
    }

    #[test]
    fn break_symbol_is_one_append() {
        let comp = rebuild_composition(".", ToneStyle::Modern);
        assert_eq!(comp.len(), 1);
        let t = comp.get(0).unwrap();
        assert_eq!(t.rule, Rule::append('.'));
        assert!(!t.is_upper_case);
    }

    #[test]
    fn one_tone_per_word() {
        let comp = rebuild_composition("tiếng việt", ToneStyle::Modern);
        let tones = comp.iter().filter(|t| t.tone().is_some()).count();
        assert_eq!(tones, 2);

        let comp = rebuild_composition("google", ToneStyle::Modern);
        assert!(comp.iter().all(|t| t.tone().is_none()));
    }

    #[test]
    fn tone_of_last_toned_letter_wins() {
        // a malformed word with two tones keeps only the later one
        let comp = rebuild_composition("áò", ToneStyle::Modern);
        let tones: Vec<Tone> = comp.iter().filter_map(Transformation::tone).collect();
        assert_eq!(tones, vec![Tone::Grave]);
    }

    #[test]
    fn renders_back() {
        let words = [
            "chào", "việt", "google", "đường", "người", "as", "được", "những", "ước", "ươi", "goo",
        ];
        for word in words {
            assert_eq!(render(word, ToneStyle::Modern), word);
            assert_eq!(render(word, ToneStyle::Old), word);
        }
    }

    #[test]
    fn decomposed_input_is_read_as_precomposed() {
        let decomposed = "vie\u{302}\u{323}t";
        let comp = rebuild_composition(decomposed, ToneStyle::Modern);
        assert_eq!(comp, rebuild_composition("việt", ToneStyle::Modern));
        assert_eq!(comp.render(Mode::Vietnamese), "việt");

        let appends = comp.iter().filter(|t| t.is_appending()).count();
        assert_eq!(appends, 4);
        let tones: Vec<Tone> = comp.iter().filter_map(Transformation::tone).collect();
        assert_eq!(tones, vec![Tone::Underdot]);
    }

    #[test]
    fn style_specific_words() {
        assert_eq!(render("hoà", ToneStyle::Modern), "hoà");
        assert_eq!(render("hòa", ToneStyle::Old), "hòa");
        // placement is normalized to the requested style
        assert_eq!(render("hòa", ToneStyle::Modern), "hoà");
        assert_eq!(render("thuý", ToneStyle::Old), "thúy");
    }
}
