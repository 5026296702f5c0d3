use libviet_core::InputMethod;
use serde::{Deserialize, Serialize};

use crate::methods::input_method_by_name;

/// Front-end configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libviet_core::Config` (flattened via serde)
/// - The name of the active input method
/// - User-defined input methods, looked up before the built-in ones
///
/// # Example
///
/// ```rust
/// use libviet::VietConfig;
///
/// let config = VietConfig::default();
/// let im = config.resolve_input_method().expect("Telex is built in");
/// assert_eq!(im.name, "Telex");
/// let base_config = config.into_base();
/// // Use base_config with Engine::new()
/// # let _ = base_config;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VietConfig {
    /// Base configuration fields (tone style, double-key undo)
    #[serde(flatten)]
    pub base: libviet_core::Config,

    /// Active input method, matched case-insensitively
    pub input_method: String,

    /// Extra input methods defined by the user
    pub custom_input_methods: Vec<InputMethod>,
}

impl Default for VietConfig {
    fn default() -> Self {
        Self {
            base: libviet_core::Config::default(),
            input_method: "Telex".to_string(),
            custom_input_methods: Vec::new(),
        }
    }
}

impl VietConfig {
    /// Load a front-end configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Convert this front-end config into the base config for use with `Engine::new()`
    pub fn into_base(self) -> libviet_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libviet_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libviet_core::Config {
        &mut self.base
    }

    /// The configured input method: a custom one of that name, else a
    /// built-in one.
    pub fn resolve_input_method(&self) -> Option<InputMethod> {
        self.custom_input_methods
            .iter()
            .find(|im| im.name.eq_ignore_ascii_case(&self.input_method))
            .cloned()
            .or_else(|| input_method_by_name(&self.input_method))
    }
}
