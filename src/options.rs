use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::char_set::CharClassTable;

/// How a [`PasswordGenerator`](crate::PasswordGenerator) treats its pattern.
///
/// Deserializable, so it can live in a config file:
///
/// ```yaml
/// remove_lookalikes: true
/// permute: false
/// char_classes: ascii
/// ```
///
/// Missing fields take their default values.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Drop visually ambiguous characters (`O0l1I|`) from every character set.
    pub remove_lookalikes: bool,
    /// Shuffle the drawn characters, so the pattern only decides which characters appear, not
    /// where.
    pub permute: bool,
    pub char_classes: CharClassTable,
}

impl Default for GeneratorOptions {
    fn default() -> GeneratorOptions {
        GeneratorOptions {
            remove_lookalikes: false,
            permute: true,
            char_classes: CharClassTable::Default,
        }
    }
}

impl GeneratorOptions {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<GeneratorOptions> {
        serde_yaml::from_str(yaml).context("failed to parse password generator options")
    }

    /// Load options from the YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<GeneratorOptions> {
        let file = File::open(path).with_context(|| {
            format!(
                "failed to open password generator options at {}",
                path.display()
            )
        })?;
        serde_yaml::from_reader(file).with_context(|| {
            format!(
                "failed to parse password generator options at {}",
                path.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let options = GeneratorOptions::default();
        assert!(!options.remove_lookalikes);
        assert!(options.permute);
        assert_eq!(options.char_classes, CharClassTable::Default);
        assert_eq!(GeneratorOptions::from_yaml_str("{}").unwrap(), options);
    }

    #[test]
    fn partial_yaml() {
        let options =
            GeneratorOptions::from_yaml_str("permute: false\nchar_classes: ascii\n").unwrap();
        assert_eq!(
            options,
            GeneratorOptions {
                remove_lookalikes: false,
                permute: false,
                char_classes: CharClassTable::Ascii,
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GeneratorOptions::from_yaml_str("permutate: false\n").unwrap_err();
        assert!(format!("{err:#}").contains("permutate"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"remove_lookalikes: true\n").unwrap();
        file.flush().unwrap();

        let options = GeneratorOptions::load(file.path()).unwrap();
        assert!(options.remove_lookalikes);
        assert!(options.permute);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = GeneratorOptions::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
