//! TOML project manifest: the metadata source for generation.
//!
//! The manifest stands in for the editor collaborators that would normally
//! supply tags, layers, and build scenes, and also carries the generator
//! settings (namespace, output folder, ignored resource subfolders).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Default enclosing namespace for generated classes.
pub const DEFAULT_NAMESPACE: &str = "k";
/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "scripts/auto-generated";
/// Default resource-root substrings to ignore.
const DEFAULT_IGNORED: [&str; 2] = ["ProCore", "2DToolkit"];

/// A named layer slot with its numeric index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layer {
    pub name: String,
    pub index: i32,
}

/// A sorting layer with its host-assigned numeric ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortingLayer {
    pub name: String,
    pub id: i32,
}

/// Parsed and validated project manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Enclosing namespace for every generated class
    pub namespace: String,
    /// Output directory, relative to the project root
    pub output_dir: String,
    /// Resource roots whose path contains any of these substrings are skipped
    pub ignore_resources_in: Vec<String>,
    /// Tag labels, in declaration order
    pub tags: Vec<String>,
    /// Layer slots, in declaration order
    pub layers: Vec<Layer>,
    /// Build-scene file paths, in build order
    pub scenes: Vec<String>,
    /// Sorting layers; `None` when the host capability is unavailable
    sorting_layers: Option<Vec<SortingLayer>>,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawManifest {
    namespace: Option<String>,
    output_dir: Option<String>,
    ignore_resources_in: Option<Vec<String>>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    layers: Vec<Layer>,
    #[serde(default)]
    scenes: Vec<String>,
    sorting_layers: Option<Vec<SortingLayer>>,
}

impl Manifest {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ManifestError::Io(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_str(&content)
    }

    /// Parse from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;

        let manifest = Self {
            namespace: raw.namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            output_dir: raw
                .output_dir
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ignore_resources_in: raw
                .ignore_resources_in
                .unwrap_or_else(|| DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect()),
            tags: raw.tags,
            layers: raw.layers,
            scenes: raw.scenes,
            sorting_layers: raw.sorting_layers,
        };

        manifest.validate()?;
        Ok(manifest)
    }

    /// Numeric index for a layer name, if declared.
    pub fn layer_index(&self, name: &str) -> Option<i32> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.index)
    }

    /// Sorting layers, when the manifest declares them.
    ///
    /// Absence of the section means the capability is unavailable and the
    /// sorting-layer emitter is skipped.
    pub fn sorting_layers(&self) -> Option<&[SortingLayer]> {
        self.sorting_layers.as_deref()
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.namespace.is_empty() {
            return Err(ManifestError::Validation(
                "namespace cannot be empty".into(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for layer in &self.layers {
            if !(0..=31).contains(&layer.index) {
                return Err(ManifestError::Validation(format!(
                    "Layer '{}' has index {} outside 0..=31",
                    layer.name, layer.index
                )));
            }
            if !seen.insert(layer.name.as_str()) {
                return Err(ManifestError::Validation(format!(
                    "Duplicate layer name '{}'",
                    layer.name
                )));
            }
        }

        if let Some(sorting) = &self.sorting_layers {
            let mut seen: HashSet<&str> = HashSet::new();
            for layer in sorting {
                if !seen.insert(layer.name.as_str()) {
                    return Err(ManifestError::Validation(format!(
                        "Duplicate sorting layer name '{}'",
                        layer.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Errors during manifest parsing.
#[derive(Debug)]
pub enum ManifestError {
    /// IO error
    Io(String),
    /// TOML parse error
    Parse(String),
    /// Validation error
    Validation(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
namespace = "game"
output_dir = "generated"
ignore_resources_in = ["Vendor"]
tags = ["Player", "Enemy"]
scenes = ["Assets/Scenes/Intro.unity", "Assets/Scenes/Game.unity"]

[[layers]]
name = "Default"
index = 0

[[layers]]
name = "Water"
index = 4
"#;
        let manifest = Manifest::from_str(toml).unwrap();

        assert_eq!(manifest.namespace, "game");
        assert_eq!(manifest.output_dir, "generated");
        assert_eq!(manifest.ignore_resources_in, vec!["Vendor".to_string()]);
        assert_eq!(manifest.tags, vec!["Player", "Enemy"]);
        assert_eq!(manifest.scenes.len(), 2);
        assert_eq!(manifest.layers.len(), 2);
    }

    #[test]
    fn defaults_are_applied() {
        let manifest = Manifest::from_str("tags = [\"Player\"]").unwrap();

        assert_eq!(manifest.namespace, DEFAULT_NAMESPACE);
        assert_eq!(manifest.output_dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(
            manifest.ignore_resources_in,
            vec!["ProCore".to_string(), "2DToolkit".to_string()]
        );
        assert!(manifest.layers.is_empty());
        assert!(manifest.scenes.is_empty());
    }

    #[test]
    fn layer_index_lookup() {
        let toml = r#"
[[layers]]
name = "Default"
index = 0

[[layers]]
name = "Player"
index = 8
"#;
        let manifest = Manifest::from_str(toml).unwrap();

        assert_eq!(manifest.layer_index("Player"), Some(8));
        assert_eq!(manifest.layer_index("Default"), Some(0));
        assert_eq!(manifest.layer_index("Missing"), None);
    }

    #[test]
    fn layer_declaration_order_is_kept() {
        let toml = r#"
[[layers]]
name = "UI"
index = 5

[[layers]]
name = "Default"
index = 0
"#;
        let manifest = Manifest::from_str(toml).unwrap();
        let names: Vec<_> = manifest.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["UI", "Default"]);
    }

    #[test]
    fn rejects_layer_index_out_of_range() {
        let toml = r#"
[[layers]]
name = "Bad"
index = 32
"#;
        let err = Manifest::from_str(toml).unwrap_err();
        assert!(err.to_string().contains("outside 0..=31"));
    }

    #[test]
    fn rejects_duplicate_layer_names() {
        let toml = r#"
[[layers]]
name = "Default"
index = 0

[[layers]]
name = "Default"
index = 1
"#;
        assert!(Manifest::from_str(toml).is_err());
    }

    #[test]
    fn rejects_empty_namespace() {
        assert!(Manifest::from_str("namespace = \"\"").is_err());
    }

    #[test]
    fn sorting_layers_absent_means_no_capability() {
        let manifest = Manifest::from_str("tags = []").unwrap();
        assert!(manifest.sorting_layers().is_none());
    }

    #[test]
    fn sorting_layers_present_enables_capability() {
        let toml = r#"
[[sorting_layers]]
name = "Background"
id = 1
"#;
        let manifest = Manifest::from_str(toml).unwrap();
        let sorting = manifest.sorting_layers().unwrap();
        assert_eq!(sorting.len(), 1);
        assert_eq!(sorting[0].name, "Background");
        assert_eq!(sorting[0].id, 1);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Manifest::from_str("tags = not-a-list"),
            Err(ManifestError::Parse(_))
        ));
    }
}
