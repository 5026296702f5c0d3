//! Key-processing engine.
//!
//! The engine owns one composition and grows it one key at a time following
//! the rules of its input method. Tone keys aim at the letter chosen by the
//! tone-target selector; mark keys aim at the nearest letter they apply to;
//! everything else is appended. Whenever a word changes, its tone is moved to
//! wherever the selector now puts it, so "hoa" + tone + "n" ends on "hoán".

use tracing::{debug, trace};

use crate::charset::{add_mark_to_toneless, fold_case, is_word_break, split_char, Mark, Tone};
use crate::composition::{Composition, Mode};
use crate::input_method::InputMethod;
use crate::rebuild::rebuild_composition;
use crate::tone_target::{find_tone_target, Letter};
use crate::transformation::{Effect, Rule, Transformation};
use crate::Config;

/// Vietnamese typing engine.
#[derive(Debug, Clone)]
pub struct Engine {
    input_method: InputMethod,
    config: Config,
    composition: Composition,
}

impl Engine {
    /// Construct an engine for `input_method` with `config`.
    pub fn new(input_method: InputMethod, config: Config) -> Self {
        Self {
            input_method,
            config,
            composition: Composition::new(),
        }
    }

    pub fn input_method(&self) -> &InputMethod {
        &self.input_method
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Drop all typing state. Configuration is kept.
    pub fn reset(&mut self) {
        self.composition.clear();
    }

    /// Replace the composition with one rebuilt from `text`, as if `text` had
    /// been typed from an empty engine.
    pub fn rebuild_from_text(&mut self, text: &str) {
        self.reset();
        self.composition = rebuild_composition(text, self.config.tone_style);
    }

    /// Whole composition rendered in `mode`.
    pub fn processed_string(&self, mode: Mode) -> String {
        self.composition.render(mode)
    }

    /// Word being typed, rendered in `mode`.
    pub fn last_word(&self, mode: Mode) -> String {
        self.composition
            .render_range(self.composition.word_start()..self.composition.len(), mode)
    }

    pub fn process_str(&mut self, text: &str, mode: Mode) {
        for key in text.chars() {
            self.process_key(key, mode);
        }
    }

    pub fn process_key(&mut self, key: char, mode: Mode) {
        let (key, is_upper_case) = fold_case(key);
        trace!(?key, ?mode, "process key");

        if mode == Mode::English {
            self.composition
                .push(Transformation::appending(Rule::append(key), is_upper_case));
            return;
        }
        if is_word_break(key) && !self.input_method.has_key(key) {
            self.composition
                .push(Transformation::appending(Rule::append(key), is_upper_case));
            return;
        }

        let handled = self.apply_tone(key, is_upper_case)
            || self.apply_mark(key, is_upper_case)
            || self.apply_append(key, is_upper_case);
        if !handled {
            self.composition
                .push(Transformation::appending(Rule::append(key), is_upper_case));
        }
        self.refresh_tone_target();
    }

    /// Backspace: remove the last visible letter with its marks and tones.
    pub fn remove_last_char(&mut self) {
        if let Some(root) = self.composition.remove_last_letter() {
            trace!(?root, "removed last letter");
            self.refresh_tone_target();
        }
    }

    fn current_word(&self) -> (usize, Vec<Letter>) {
        let start = self.composition.word_start();
        (start, self.composition.letters(start..self.composition.len()))
    }

    fn apply_tone(&mut self, key: char, is_upper_case: bool) -> bool {
        let Some(tone) = self.input_method.rules_for(key).find_map(|r| match r.effect {
            Effect::Tone(tone) => Some(tone),
            _ => None,
        }) else {
            return false;
        };

        let (start, letters) = self.current_word();
        let Some(target) = find_tone_target(&letters, self.config.tone_style) else {
            return false;
        };
        let current = self.composition.word_tone(start).map_or(Tone::None, |(_, t)| t);
        if tone.is_none() && current.is_none() {
            return false;
        }

        if tone == current && self.config.double_key_undo {
            self.composition
                .push(Transformation::targeting(tone_rule(None, Tone::None), target, false));
            self.composition
                .push(Transformation::appending(Rule::append(key), is_upper_case));
            return true;
        }
        self.composition.push(Transformation::targeting(
            tone_rule(Some(key), tone),
            target,
            is_upper_case,
        ));
        true
    }

    fn apply_mark(&mut self, key: char, is_upper_case: bool) -> bool {
        let rules: Vec<(char, Mark)> = self
            .input_method
            .rules_for(key)
            .filter_map(|r| match r.effect {
                Effect::Mark(mark) => Some((r.effect_on?, mark)),
                _ => None,
            })
            .collect();
        if rules.is_empty() {
            return false;
        }

        // nearest letter that one of the rules applies to
        let (_, letters) = self.current_word();
        let Some((pos, root, mark)) = letters.iter().enumerate().rev().find_map(|(pos, l)| {
            let root = split_char(l.ch).0;
            rules
                .iter()
                .find(|(effect_on, _)| *effect_on == root)
                .map(|&(_, mark)| (pos, root, mark))
        }) else {
            return false;
        };

        let mut targets = vec![(letters[pos].index, root)];
        // "uo" takes the horn on both letters
        if mark == Mark::Horn && root == 'o' && pos > 0 {
            let prev = letters[pos - 1];
            let glide = pos == 2 && letters[0].ch == 'q';
            if split_char(prev.ch).0 == 'u' && !glide {
                targets.insert(0, (prev.index, 'u'));
            }
        }

        let (last, _) = targets[targets.len() - 1];
        if self.composition.mark_of(last) == mark && self.config.double_key_undo {
            for &(index, root) in &targets {
                self.composition.push(Transformation::targeting(
                    mark_rule(None, root, Mark::None),
                    index,
                    false,
                ));
            }
            self.composition
                .push(Transformation::appending(Rule::append(key), is_upper_case));
            return true;
        }

        for (i, &(index, root)) in targets.iter().enumerate() {
            let key = (i == 0).then_some(key);
            self.composition.push(Transformation::targeting(
                mark_rule(key, root, mark),
                index,
                is_upper_case,
            ));
        }
        true
    }

    fn apply_append(&mut self, key: char, is_upper_case: bool) -> bool {
        let Some(result) = self
            .input_method
            .rules_for(key)
            .find(|r| r.effect == Effect::Append)
            .map(|r| r.result.unwrap_or(key))
        else {
            return false;
        };

        let (root, mark, _) = split_char(result);
        let index = self.composition.push(Transformation::appending(
            Rule {
                key: Some(key),
                effect_on: Some(root),
                effect: Effect::Append,
                result: Some(root),
            },
            is_upper_case,
        ));
        if !mark.is_none() {
            self.composition
                .push(Transformation::targeting(mark_rule(None, root, mark), index, false));
        }
        true
    }

    /// Move the current word's tone to wherever the selector now puts it.
    fn refresh_tone_target(&mut self) {
        let (start, letters) = self.current_word();
        let Some((current, tone)) = self.composition.word_tone(start) else {
            return;
        };
        if tone.is_none() {
            return;
        }
        match find_tone_target(&letters, self.config.tone_style) {
            Some(target) if target != current => {
                debug!(from = current, to = target, ?tone, "moving tone");
                self.composition
                    .push(Transformation::targeting(tone_rule(None, Tone::None), current, false));
                self.composition
                    .push(Transformation::targeting(tone_rule(None, tone), target, false));
            }
            _ => {}
        }
    }
}

fn tone_rule(key: Option<char>, tone: Tone) -> Rule {
    Rule {
        key,
        effect_on: None,
        effect: Effect::Tone(tone),
        result: None,
    }
}

fn mark_rule(key: Option<char>, root: char, mark: Mark) -> Rule {
    Rule {
        key,
        effect_on: Some(root),
        effect: Effect::Mark(mark),
        result: Some(add_mark_to_toneless(root, mark)),
    }
}
