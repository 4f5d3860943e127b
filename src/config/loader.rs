//! Config loading and validation
//!
//! Builds the name → [`ContainerConfig`] map from a single YAML file or from
//! every `*.yaml` file in a directory (non-recursive). All files loaded
//! together share one namespace, so a model name repeated across files is as
//! fatal as one repeated within a file. The first invalid entry aborts the
//! whole load; there is no partial success.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use crate::config::name::is_valid_name;
use crate::config::schema::{ContainerConfig, IMAGE_SUFFIX};
use crate::config::yaml;
use crate::error::{ModelboxError, Result};
use crate::uri::classify_and_normalize;

/// Map of model name to its validated, default-resolved config.
pub type ContainerMap = BTreeMap<String, ContainerConfig>;

/// Load container configs from a YAML file or a directory of YAML files.
pub fn load(config_path: &Path) -> Result<ContainerMap> {
    let config_files = collect_config_files(config_path)?;
    check_container_configs(&config_files)
}

/// Resolve the input path to the list of config files to read.
///
/// A directory yields its `*.yaml` children sorted by name; a file must end
/// in `.yml` or `.yaml`.
fn collect_config_files(config_path: &Path) -> Result<Vec<PathBuf>> {
    if config_path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(config_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        files.sort();
        return Ok(files);
    }

    if !config_path.exists() {
        return Err(ModelboxError::NotFound(format!(
            "could not find config file {}",
            config_path.display()
        )));
    }

    let is_yaml = config_path
        .extension()
        .is_some_and(|ext| ext == "yml" || ext == "yaml");
    if !is_yaml {
        return Err(ModelboxError::InvalidFormat(format!(
            "config file {} is not a yaml file, the filename must end in .yml or .yaml",
            config_path.display()
        )));
    }

    Ok(vec![config_path.to_path_buf()])
}

/// Load and validate every entry of the given config files into one map.
fn check_container_configs(config_files: &[PathBuf]) -> Result<ContainerMap> {
    let mut containers = ContainerMap::new();

    for config_file in config_files {
        info!("reading config from {}", config_file.display());
        let text = fs::read_to_string(config_file)?;
        let mapping = yaml::parse_mapping(&text)?;

        for (key, value) in mapping {
            let name = match key {
                Value::String(name) => name,
                other => {
                    return Err(ModelboxError::InvalidFormat(format!(
                        "model name {other:?} in {} is not a string",
                        config_file.display()
                    )))
                }
            };

            if !is_valid_name(&name) {
                return Err(ModelboxError::InvalidName(format!(
                    "model name '{name}' in {}; names may contain only letters, \
                     numbers, underscores and hyphens",
                    config_file.display()
                )));
            }

            if containers.contains_key(&name) {
                return Err(ModelboxError::DuplicateModelName(name));
            }

            let config = resolve_entry(&name, value, config_file)?;
            debug!("model '{}' OK", name);
            containers.insert(name, config);
        }
        info!("{} OK", config_file.display());
    }

    Ok(containers)
}

/// Bind one raw record and resolve its defaults, validating each field.
fn resolve_entry(name: &str, value: Value, config_file: &Path) -> Result<ContainerConfig> {
    let mut config = ContainerConfig::from_value(name, value)?;

    if config.image_file.is_empty() {
        config.image_file = ContainerConfig::default_image_file(name);
    } else if !config.image_file.ends_with(IMAGE_SUFFIX) {
        return Err(ModelboxError::InvalidImageSuffix(format!(
            "'{}' for model '{name}' in {}",
            config.image_file,
            config_file.display()
        )));
    }

    if config.container_definition.is_empty() {
        config.container_definition = ContainerConfig::default_definition(name);
    } else {
        config.container_definition = classify_and_normalize(&config.container_definition)?;
    }

    if !config.shared_directories.is_empty() {
        let shared = Path::new(&config.shared_directories);
        if !shared.exists() {
            return Err(ModelboxError::NotFound(format!(
                "the shared directory {} defined in {} does not exist",
                config.shared_directories,
                config_file.display()
            )));
        }
        if shared.is_file() {
            return Err(ModelboxError::NotADirectory(format!(
                "the shared directory {} defined in {} should be a directory, not a file",
                config.shared_directories,
                config_file.display()
            )));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, file_name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(file_name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let err = load(Path::new("I_dont_exist.yaml")).unwrap_err();
        assert!(matches!(err, ModelboxError::NotFound(_)));
    }

    #[test]
    fn test_non_yaml_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "configs.txt", "Model1:\n  description: a model\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidFormat(_)));
    }

    #[test]
    fn test_single_file_load() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: first model\nModel2:\n  description: second model\n",
        );
        let containers = load(&path).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers["Model1"].description, "first model");
    }

    #[test]
    fn test_missing_description_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "configs.yaml", "Model1:\n  group: Test\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidFormat(_)));
    }

    #[test]
    fn test_defaults_resolved_per_name() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Alpha:\n  description: a\nBeta:\n  description: b\n",
        );
        let containers = load(&path).unwrap();
        for (name, config) in &containers {
            assert_eq!(config.image_file, format!("Images/{name}.sif"));
            assert_eq!(config.container_definition, format!("Definitions/{name}.def"));
        }
    }

    #[test]
    fn test_bad_image_suffix_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: a model\n  image_file: Images/model.tar\n",
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidImageSuffix(_)));
    }

    #[test]
    fn test_definition_normalized() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: a model\n  container_definition: alpine:latest\n",
        );
        let containers = load(&path).unwrap();
        assert_eq!(
            containers["Model1"].container_definition,
            "docker://alpine:latest"
        );
    }

    #[test]
    fn test_bad_definition_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: a model\n  container_definition: wtf is this?\n",
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidReference(_)));
    }

    #[test]
    fn test_invalid_model_name_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "configs.yaml", "bad name:\n  description: a model\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidName(_)));
    }

    #[test]
    fn test_duplicate_within_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: first\nModel1:\n  description: second\n",
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::DuplicateKey { .. }));
    }

    #[test]
    fn test_duplicate_across_files() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "a.yaml", "Model1:\n  description: first\n");
        write_config(&dir, "b.yaml", "Model1:\n  description: second\n");
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, ModelboxError::DuplicateModelName(_)));
    }

    #[test]
    fn test_directory_load_is_union() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "a.yaml", "Alpha:\n  description: a\n");
        write_config(&dir, "b.yaml", "Beta:\n  description: b\nGamma:\n  description: c\n");
        // non-yaml siblings are ignored
        write_config(&dir, "notes.txt", "not a config");
        let containers = load(dir.path()).unwrap();
        let names: Vec<&str> = containers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_shared_directory_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "configs.yaml",
            "Model1:\n  description: a model\n  shared_directories: /no/such/dir\n",
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::NotFound(_)));
    }

    #[test]
    fn test_shared_directory_must_not_be_file() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("data.txt");
        fs::write(&shared, "not a directory").unwrap();
        let text = format!(
            "Model1:\n  description: a model\n  shared_directories: {}\n",
            shared.display()
        );
        let path = write_config(&dir, "configs.yaml", &text);
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ModelboxError::NotADirectory(_)));
    }

    #[test]
    fn test_shared_directory_ok() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("data");
        fs::create_dir(&shared).unwrap();
        let text = format!(
            "Model1:\n  description: a model\n  shared_directories: {}\n",
            shared.display()
        );
        let path = write_config(&dir, "configs.yaml", &text);
        assert!(load(&path).is_ok());
    }
}
