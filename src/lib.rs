//! # constkit
//!
//! Generates C# constant classes from Unity project metadata, so game code
//! can write `Tags.PLAYER` instead of the string literal `"Player"`.
//!
//! Four metadata categories are supported, each written to its own file in
//! the project's output folder:
//!
//! - **Tags**: string constants, one per tag label
//! - **Layers**: int constants per layer slot, plus bitmask helpers
//! - **Scenes**: string constants per build scene, plus a scene count and
//!   a wraparound `nextSceneIndex()` helper
//! - **Resources**: string constants mapping each file under a `Resources`
//!   folder to its extension-stripped load path
//!
//! A fifth category, **SortingLayers**, is emitted only when the project
//! manifest declares sorting layers (the host lookup for their numeric IDs
//! is not available everywhere).
//!
//! # Usage
//!
//! ```no_run
//! use constkit::{Generator, RebuildFlags};
//!
//! let generator = Generator::from_project_root("path/to/project")
//!     .expect("Failed to load manifest");
//! generator.rebuild(RebuildFlags::default())
//!     .expect("Failed to rebuild constant classes");
//! ```
//!
//! Metadata comes from a `constkit.toml` manifest at the project root;
//! resource files are discovered by walking the project tree. Regeneration
//! is a full overwrite and is idempotent: unchanged inputs produce
//! byte-identical files. The generated files must never be hand-edited.
//!
//! Hosts that receive asset-change notifications can feed them through
//! [`watch::handle_asset_changes`] to regenerate automatically, with a
//! 5-second debounce per settings category.

pub mod codegen;
pub mod manifest;
pub mod resources;
pub mod sanitize;
pub mod watch;

pub use codegen::{ClassFile, Member};
pub use manifest::{Layer, Manifest, ManifestError, SortingLayer};
pub use resources::ResourceEntry;
pub use sanitize::{InvalidLabel, sanitize};
pub use watch::{ChangeNotification, Clock, DebounceState, SystemClock, handle_asset_changes};

use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name expected at the project root.
pub const MANIFEST_FILE_NAME: &str = "constkit.toml";

pub const TAGS_FILE_NAME: &str = "Tags.cs";
pub const LAYERS_FILE_NAME: &str = "Layers.cs";
pub const SORTING_LAYERS_FILE_NAME: &str = "SortingLayers.cs";
pub const SCENES_FILE_NAME: &str = "Scenes.cs";
pub const RESOURCES_FILE_NAME: &str = "Resources.cs";

/// Which categories a rebuild regenerates. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildFlags {
    pub resources: bool,
    pub scenes: bool,
    pub tags_and_layers: bool,
    pub sorting_layers: bool,
}

impl Default for RebuildFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl RebuildFlags {
    pub fn all() -> Self {
        Self {
            resources: true,
            scenes: true,
            tags_and_layers: true,
            sorting_layers: true,
        }
    }

    pub fn none() -> Self {
        Self {
            resources: false,
            scenes: false,
            tags_and_layers: false,
            sorting_layers: false,
        }
    }

    pub fn only_resources() -> Self {
        Self {
            resources: true,
            ..Self::none()
        }
    }

    pub fn only_scenes() -> Self {
        Self {
            scenes: true,
            ..Self::none()
        }
    }

    pub fn only_tags_and_layers() -> Self {
        Self {
            tags_and_layers: true,
            ..Self::none()
        }
    }
}

/// Sink for post-write notifications, mirroring the host's asset index.
///
/// After each generated file is written it is reported here so the host can
/// force a refresh. The CLI uses [`NoAssetIndex`].
pub trait AssetIndex {
    fn import(&self, path: &Path);
}

/// No-op index for hosts without an asset database.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssetIndex;

impl AssetIndex for NoAssetIndex {
    fn import(&self, _path: &Path) {}
}

/// Rebuilds constant classes for one project.
pub struct Generator {
    project_root: PathBuf,
    manifest: Manifest,
    index: Box<dyn AssetIndex>,
}

impl Generator {
    /// Generator over an already-parsed manifest, with no asset index.
    pub fn new(project_root: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            project_root: project_root.into(),
            manifest,
            index: Box::new(NoAssetIndex),
        }
    }

    /// Generator for the manifest at `<project_root>/constkit.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or fails validation.
    pub fn from_project_root(project_root: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let project_root = project_root.into();
        let manifest = Manifest::from_file(project_root.join(MANIFEST_FILE_NAME))?;
        Ok(Self::new(project_root, manifest))
    }

    /// Attach an asset index to notify after each write.
    pub fn with_asset_index(mut self, index: impl AssetIndex + 'static) -> Self {
        self.index = Box::new(index);
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Output directory for generated files, under the project root.
    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(&self.manifest.output_dir)
    }

    /// Regenerate the selected categories, fully overwriting prior files.
    ///
    /// Categories are independent: a failure in one aborts only that
    /// category's write and surfaces as the returned error. Running twice
    /// over unchanged inputs produces byte-identical files.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid metadata label or a filesystem
    /// failure while creating the output directory or writing a file.
    pub fn rebuild(&self, flags: RebuildFlags) -> Result<(), GenerateError> {
        let out_dir = self.output_dir();
        fs::create_dir_all(&out_dir)?;
        let namespace = &self.manifest.namespace;

        if flags.tags_and_layers {
            let tags = codegen::constant_class(namespace, "Tags", &self.manifest.tags)?;
            self.write_class(&out_dir, TAGS_FILE_NAME, &tags)?;

            let slots: Vec<(String, i32)> = self
                .manifest
                .layers
                .iter()
                .map(|layer| (layer.name.clone(), layer.index))
                .collect();
            let layers = codegen::layer_class(namespace, "Layers", &slots)?;
            self.write_class(&out_dir, LAYERS_FILE_NAME, &layers)?;
        }

        if flags.sorting_layers {
            if let Some(sorting) = self.manifest.sorting_layers() {
                let ids: Vec<(String, i32)> = sorting
                    .iter()
                    .map(|layer| (layer.name.clone(), layer.id))
                    .collect();
                let class = codegen::sorting_layer_class(namespace, "SortingLayers", &ids)?;
                self.write_class(&out_dir, SORTING_LAYERS_FILE_NAME, &class)?;
            } else {
                tracing::debug!("no sorting layers declared, emitter skipped");
            }
        }

        if flags.scenes {
            let names = scene_names(&self.manifest.scenes);
            let scenes = codegen::scene_class(namespace, "Scenes", &names)?;
            self.write_class(&out_dir, SCENES_FILE_NAME, &scenes)?;
        }

        if flags.resources {
            let entries =
                resources::collect(&self.project_root, &self.manifest.ignore_resources_in)?;
            let class = codegen::value_class(
                namespace,
                "Resources",
                entries.into_iter().map(|entry| (entry.name, entry.path)),
            );
            self.write_class(&out_dir, RESOURCES_FILE_NAME, &class)?;
        }

        if flags.resources && flags.scenes && flags.tags_and_layers {
            tracing::info!(
                output = %out_dir.display(),
                "constant classes rebuilt"
            );
        }

        Ok(())
    }

    fn write_class(
        &self,
        out_dir: &Path,
        file_name: &str,
        class: &ClassFile,
    ) -> Result<(), GenerateError> {
        let path = out_dir.join(file_name);
        fs::write(&path, class.render())?;
        self.index.import(&path);
        Ok(())
    }
}

/// Scene names from build paths: directory and extension stripped.
fn scene_names(scene_paths: &[String]) -> Vec<String> {
    scene_paths
        .iter()
        .map(|path| {
            Path::new(path)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Errors that can occur during a rebuild.
#[derive(Debug)]
pub enum GenerateError {
    /// A metadata label could not form a constant identifier
    Label(InvalidLabel),
    /// Failed to read or validate the project manifest
    Manifest(ManifestError),
    /// IO error
    Io(std::io::Error),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Label(e) => write!(f, "Label error: {}", e),
            Self::Manifest(e) => write!(f, "Manifest error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<InvalidLabel> for GenerateError {
    fn from(e: InvalidLabel) -> Self {
        Self::Label(e)
    }
}

impl From<ManifestError> for GenerateError {
    fn from(e: ManifestError) -> Self {
        Self::Manifest(e)
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
