//! Rules and the transformations they produce.

use serde::{Deserialize, Serialize};

use crate::charset::{Mark, Tone};

/// Kind of effect a transformation has on the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Introduces a new visible base letter.
    Appending,
    /// Overlays a mark onto a previously appended letter.
    MarkTransformation,
    /// Overlays a tone onto a previously appended letter.
    ToneTransformation,
}

/// Effect together with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Append,
    Mark(Mark),
    Tone(Tone),
}

/// An immutable rule: which key triggers it, what it applies to and what it
/// yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Triggering key, `None` for rules synthesized from text.
    pub key: Option<char>,
    /// Code point the effect applies to.
    pub effect_on: Option<char>,
    pub effect: Effect,
    /// Resulting code point: the root for `Append`, the toneless marked
    /// letter for `Mark`, unset for `Tone`.
    pub result: Option<char>,
}

impl Rule {
    /// Appending rule whose key, target and result are all `c`.
    pub fn append(c: char) -> Self {
        Self {
            key: Some(c),
            effect_on: Some(c),
            effect: Effect::Append,
            result: Some(c),
        }
    }

    pub fn effect_type(&self) -> EffectType {
        match self.effect {
            Effect::Append => EffectType::Appending,
            Effect::Mark(_) => EffectType::MarkTransformation,
            Effect::Tone(_) => EffectType::ToneTransformation,
        }
    }
}

/// One entry of a composition log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub rule: Rule,
    /// Index of the appended letter this mark/tone modifies. Always points
    /// backward within the owning composition.
    pub target: Option<usize>,
    pub is_upper_case: bool,
}

impl Transformation {
    pub fn appending(rule: Rule, is_upper_case: bool) -> Self {
        Self {
            rule,
            target: None,
            is_upper_case,
        }
    }

    pub fn targeting(rule: Rule, target: usize, is_upper_case: bool) -> Self {
        Self {
            rule,
            target: Some(target),
            is_upper_case,
        }
    }

    pub fn is_appending(&self) -> bool {
        matches!(self.rule.effect, Effect::Append)
    }

    pub fn mark(&self) -> Option<Mark> {
        match self.rule.effect {
            Effect::Mark(mark) => Some(mark),
            _ => None,
        }
    }

    pub fn tone(&self) -> Option<Tone> {
        match self.rule.effect {
            Effect::Tone(tone) => Some(tone),
            _ => None,
        }
    }
}
