//! constkit CLI: rebuild constant classes for a project from the command
//! line.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use constkit::{Generator, Manifest, RebuildFlags};

/// Generate constant classes (tags, layers, scenes, resource paths) for a
/// Unity project.
///
/// Reads `constkit.toml` at the project root, walks the tree for
/// `Resources` folders, and writes one C# file per category into the
/// configured output directory.
#[derive(Debug, Parser)]
#[command(name = "constkit", version, about)]
struct Cli {
    /// Project root containing constkit.toml and Resources folders
    project_root: PathBuf,

    /// Rebuild Resources.cs (pass --resources=false to skip)
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    resources: bool,

    /// Rebuild Scenes.cs
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    scenes: bool,

    /// Rebuild Tags.cs and Layers.cs
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    tags_and_layers: bool,

    /// Rebuild SortingLayers.cs when the manifest declares sorting layers
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    sorting_layers: bool,

    /// Manifest path (defaults to <PROJECT_ROOT>/constkit.toml)
    #[arg(long)]
    manifest: Option<PathBuf>,
}

impl Cli {
    fn flags(&self) -> RebuildFlags {
        RebuildFlags {
            resources: self.resources,
            scenes: self.scenes,
            tags_and_layers: self.tags_and_layers,
            sorting_layers: self.sorting_layers,
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "constkit=info,constkit_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let manifest_path = cli
        .manifest
        .clone()
        .unwrap_or_else(|| cli.project_root.join(constkit::MANIFEST_FILE_NAME));
    let manifest = Manifest::from_file(&manifest_path)
        .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;
    tracing::debug!(manifest = %manifest_path.display(), "manifest loaded");

    let generator = Generator::new(&cli.project_root, manifest);
    generator
        .rebuild(cli.flags())
        .context("failed to rebuild constant classes")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_default_on() {
        let cli = Cli::parse_from(["constkit", "my-project"]);
        assert_eq!(cli.flags(), RebuildFlags::all());
    }

    #[test]
    fn flags_can_be_disabled() {
        let cli = Cli::parse_from([
            "constkit",
            "my-project",
            "--resources=false",
            "--sorting-layers=false",
        ]);
        let flags = cli.flags();
        assert!(!flags.resources);
        assert!(!flags.sorting_layers);
        assert!(flags.scenes);
        assert!(flags.tags_and_layers);
    }

    #[test]
    fn manifest_override_is_optional() {
        let cli = Cli::parse_from(["constkit", "my-project", "--manifest", "alt.toml"]);
        assert_eq!(cli.manifest, Some(PathBuf::from("alt.toml")));
    }
}
