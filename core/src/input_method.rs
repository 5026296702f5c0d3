//! Data-driven input method definitions.
//!
//! An input method is an ordered list of rules keyed by the character that
//! triggers them. Language crates build the standard layouts with the
//! `with_*` helpers; users can also describe their own in TOML.

use serde::{Deserialize, Serialize};

use crate::charset::{add_mark_to_toneless, compose_char, Mark, Tone};
use crate::transformation::{Effect, Rule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMethod {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl InputMethod {
    /// Create an input method without rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// `key` sets `tone` on the word (`Tone::None` removes it).
    pub fn with_tone(mut self, key: char, tone: Tone) -> Self {
        self.rules.push(Rule {
            key: Some(key),
            effect_on: None,
            effect: Effect::Tone(tone),
            result: None,
        });
        self
    }

    /// `key` puts `mark` on the nearest `effect_on` letter of the word.
    pub fn with_mark(mut self, key: char, effect_on: char, mark: Mark) -> Self {
        self.rules.push(Rule {
            key: Some(key),
            effect_on: Some(effect_on),
            effect: Effect::Mark(mark),
            result: Some(add_mark_to_toneless(effect_on, mark)),
        });
        self
    }

    /// `key` appends `root` carrying `mark` when none of its mark rules apply.
    pub fn with_append(mut self, key: char, root: char, mark: Mark) -> Self {
        self.rules.push(Rule {
            key: Some(key),
            effect_on: Some(root),
            effect: Effect::Append,
            result: Some(compose_char(root, mark, Tone::None)),
        });
        self
    }

    /// Rules triggered by `key`, in definition order.
    pub fn rules_for(&self, key: char) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |r| r.key == Some(key))
    }

    pub fn has_key(&self, key: char) -> bool {
        self.rules_for(key).next().is_some()
    }

    /// Distinct trigger keys, sorted.
    pub fn keys(&self) -> Vec<char> {
        let mut keys: Vec<char> = self.rules.iter().filter_map(|r| r.key).collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InputMethod {
        InputMethod::new("Sample")
            .with_tone('s', Tone::Acute)
            .with_mark('w', 'o', Mark::Horn)
            .with_mark('w', 'a', Mark::Breve)
            .with_append('w', 'u', Mark::Horn)
    }

    #[test]
    fn rules_keep_definition_order() {
        let im = sample();
        let effects: Vec<Effect> = im.rules_for('w').map(|r| r.effect).collect();
        assert_eq!(
            effects,
            vec![Effect::Mark(Mark::Horn), Effect::Mark(Mark::Breve), Effect::Append]
        );
        assert_eq!(im.rules_for('w').nth(1).unwrap().result, Some('ă'));
        assert_eq!(im.rules_for('w').last().unwrap().result, Some('ư'));
    }

    #[test]
    fn keys_are_distinct() {
        let im = sample();
        assert_eq!(im.keys(), vec!['s', 'w']);
        assert!(im.has_key('s'));
        assert!(!im.has_key('x'));
    }

    #[test]
    fn deserialize_from_toml() {
        let src = r#"
            name = "Mini"

            [[rules]]
            key = "q"
            effect = { tone = "tilde" }

            [[rules]]
            key = "h"
            effect_on = "o"
            effect = { mark = "circumflex" }
            result = "ô"
        "#;
        let im: InputMethod = toml::from_str(src).expect("parse");
        assert_eq!(im.name, "Mini");
        assert_eq!(
            im,
            InputMethod::new("Mini")
                .with_tone('q', Tone::Tilde)
                .with_mark('h', 'o', Mark::Circumflex)
        );
    }
}
