//! Container config schema
//!
//! One `ContainerConfig` record per model name. Binding is strict about the
//! required `description` field; everything else is defaulted here and
//! resolved against the model name by the loader.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{ModelboxError, Result};

/// Default image directory, `Images/<name>.sif`
pub const IMAGE_DIR: &str = "Images";
/// Default definition directory, `Definitions/<name>.def`
pub const DEFINITION_DIR: &str = "Definitions";
/// Suffix required of image archive files
pub const IMAGE_SUFFIX: &str = ".sif";

/// Configuration record for one named model container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Free-text description, required
    pub description: String,

    /// Path to the built image archive; empty means `Images/<name>.sif`
    #[serde(default)]
    pub image_file: String,

    /// Build source, a `.def` path or registry URI; empty means
    /// `Definitions/<name>.def`
    #[serde(default)]
    pub container_definition: String,

    /// Optional key path for encrypted images
    #[serde(default)]
    pub encryption_key: String,

    /// Optional host directory bound into the container
    #[serde(default)]
    pub shared_directories: String,

    /// Free-text grouping label, used only to filter `list` output
    #[serde(default = "default_group")]
    pub group: String,

    /// Whether the image is encrypted
    #[serde(default)]
    pub encrypted: bool,

    /// Registry name, informational
    #[serde(default = "default_registry")]
    pub registry: String,

    /// Informational, not used in command generation
    #[serde(default)]
    pub read_only: bool,

    /// Informational, not used in command generation
    #[serde(default = "default_true", rename = "use_GPU")]
    pub use_gpu: bool,

    /// Informational, historically passed to build
    #[serde(default)]
    pub sandbox: bool,
}

fn default_group() -> String {
    "None".to_string()
}

fn default_registry() -> String {
    "docker".to_string()
}

fn default_true() -> bool {
    true
}

impl ContainerConfig {
    /// Bind one raw YAML record to the schema.
    ///
    /// A missing `description` (or any other binding failure, like a boolean
    /// field given a string) surfaces as `InvalidFormat` naming the model.
    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        serde_yaml::from_value(value).map_err(|err| {
            ModelboxError::InvalidFormat(format!("in config of model '{name}': {err}"))
        })
    }

    /// Default image path for a model with no explicit `image_file`.
    pub fn default_image_file(name: &str) -> String {
        format!("{IMAGE_DIR}/{name}{IMAGE_SUFFIX}")
    }

    /// Default definition path for a model with no explicit
    /// `container_definition`.
    pub fn default_definition(name: &str) -> String {
        format!("{DEFINITION_DIR}/{name}{}", crate::uri::DEFINITION_SUFFIX)
    }
}
