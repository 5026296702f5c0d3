//! # libviet
//!
//! Vietnamese input methods built on libviet-core.
//!
//! This crate provides the built-in Telex, Simple Telex and VNI layouts, the
//! front-end `VietConfig`, and convenience constructors that wire them into a
//! core `Engine`.

use tracing::{debug, warn};

pub mod config;
pub mod methods;

// Re-export core components
pub use libviet_core::*;

pub use config::VietConfig;
pub use methods::{input_method_by_name, input_method_names, simple_telex, telex, vni};

/// Create an engine from a front-end configuration.
///
/// Returns `None` when the configured input method is unknown.
pub fn create_engine(config: &VietConfig) -> Option<Engine> {
    let Some(input_method) = config.resolve_input_method() else {
        warn!(name = %config.input_method, "unknown input method");
        return None;
    };
    debug!(
        name = %input_method.name,
        rules = input_method.rules.len(),
        tone_style = ?config.base().tone_style,
        "creating engine"
    );
    Some(Engine::new(input_method, config.base().clone()))
}

/// Create a Telex engine with default settings.
pub fn create_telex_engine() -> Engine {
    Engine::new(telex(), Config::default())
}

/// Create a VNI engine with default settings.
pub fn create_vni_engine() -> Engine {
    Engine::new(vni(), Config::default())
}
