//! Built-in Vietnamese input methods.
//!
//! - Telex: letters double as modifiers (aa → â, dd → đ, s → acute, ...)
//! - Simple Telex: Telex without the shortcuts that type ư/ơ on their own
//! - VNI: digits 0-9 carry tones and marks

use libviet_core::{InputMethod, Mark, Tone};
use once_cell::sync::Lazy;

static SIMPLE_TELEX: Lazy<InputMethod> = Lazy::new(|| telex_rules("Simple Telex"));

static TELEX: Lazy<InputMethod> = Lazy::new(|| {
    telex_rules("Telex")
        .with_append('w', 'u', Mark::Horn)
        .with_append('[', 'o', Mark::Horn)
        .with_append(']', 'u', Mark::Horn)
});

static VNI: Lazy<InputMethod> = Lazy::new(|| {
    InputMethod::new("VNI")
        .with_tone('1', Tone::Acute)
        .with_tone('2', Tone::Grave)
        .with_tone('3', Tone::HookAbove)
        .with_tone('4', Tone::Tilde)
        .with_tone('5', Tone::Underdot)
        .with_tone('0', Tone::None)
        .with_mark('6', 'a', Mark::Circumflex)
        .with_mark('6', 'e', Mark::Circumflex)
        .with_mark('6', 'o', Mark::Circumflex)
        .with_mark('7', 'u', Mark::Horn)
        .with_mark('7', 'o', Mark::Horn)
        .with_mark('8', 'a', Mark::Breve)
        .with_mark('9', 'd', Mark::Stroke)
});

fn telex_rules(name: &str) -> InputMethod {
    InputMethod::new(name)
        .with_tone('s', Tone::Acute)
        .with_tone('f', Tone::Grave)
        .with_tone('r', Tone::HookAbove)
        .with_tone('x', Tone::Tilde)
        .with_tone('j', Tone::Underdot)
        .with_tone('z', Tone::None)
        .with_mark('a', 'a', Mark::Circumflex)
        .with_mark('e', 'e', Mark::Circumflex)
        .with_mark('o', 'o', Mark::Circumflex)
        .with_mark('w', 'u', Mark::Horn)
        .with_mark('w', 'o', Mark::Horn)
        .with_mark('w', 'a', Mark::Breve)
        .with_mark('d', 'd', Mark::Stroke)
}

static BUILTIN: Lazy<[&'static InputMethod; 3]> = Lazy::new(|| [&*TELEX, &*SIMPLE_TELEX, &*VNI]);

/// Telex input method.
pub fn telex() -> InputMethod {
    TELEX.clone()
}

/// Telex without the standalone ư/ơ keys (`w`, `[`, `]`).
pub fn simple_telex() -> InputMethod {
    SIMPLE_TELEX.clone()
}

/// VNI input method.
pub fn vni() -> InputMethod {
    VNI.clone()
}

/// Names of the built-in input methods.
pub fn input_method_names() -> Vec<&'static str> {
    BUILTIN.iter().map(|im| im.name.as_str()).collect()
}

/// Look up a built-in input method by name, ignoring case.
pub fn input_method_by_name(name: &str) -> Option<InputMethod> {
    BUILTIN
        .iter()
        .find(|im| im.name.eq_ignore_ascii_case(name))
        .map(|im| (*im).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_listed() {
        assert_eq!(input_method_names(), vec!["Telex", "Simple Telex", "VNI"]);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(input_method_by_name("telex"), Some(telex()));
        assert_eq!(input_method_by_name("vni"), Some(vni()));
        assert_eq!(input_method_by_name("simple telex"), Some(simple_telex()));
        assert_eq!(input_method_by_name("Dvorak"), None);
    }

    #[test]
    fn simple_telex_has_no_standalone_horn() {
        assert!(telex().has_key('['));
        assert!(!simple_telex().has_key('['));
        assert_eq!(telex().rules.len(), simple_telex().rules.len() + 3);
    }

    #[test]
    fn vni_keys_are_digits() {
        assert!(vni().keys().iter().all(|k| k.is_ascii_digit()));
        assert_eq!(vni().keys().len(), 10);
    }
}
