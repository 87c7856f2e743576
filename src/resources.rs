//! Resource discovery: walks `Resources` folders and builds unique entries.
//!
//! Every file under a `Resources` folder is addressable at runtime by its
//! path relative to that folder, extension stripped. The collector merges
//! all roots into one list with globally unique constant names; the first
//! occurrence of a name wins and later duplicates are skipped with a
//! warning.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::sanitize::sanitize;

/// Directory name recognized as a resource root.
const RESOURCES_SEGMENT: &str = "Resources";

/// File suffixes that are editor or OS artifacts, never constants.
const EXCLUDED_SUFFIXES: [&str; 3] = [".meta", ".db", ".DS_Store"];

/// One addressable resource: constant identifier plus its load path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Sanitized identifier derived from the file stem
    pub name: String,
    /// Path relative to the `Resources` folder, extension stripped
    pub path: String,
}

/// Walk `project_root` and collect one entry per uniquely named resource
/// file.
///
/// Roots whose path contains any of `ignored` are skipped with a warning,
/// as are files whose path has no `Resources` segment and files whose name
/// was already claimed by an earlier root. Directory entries are visited in
/// name order so repeated runs over the same tree produce the same list.
///
/// # Errors
///
/// Propagates filesystem errors from the walk; an unreadable tree is fatal,
/// while an empty one simply yields no entries.
pub fn collect(project_root: &Path, ignored: &[String]) -> io::Result<Vec<ResourceEntry>> {
    let mut roots = Vec::new();
    find_resource_roots(project_root, &mut roots)?;

    let mut files = Vec::new();
    for root in &roots {
        let root_str = root.to_string_lossy();
        if let Some(hit) = ignored.iter().find(|s| root_str.contains(s.as_str())) {
            tracing::warn!(
                root = %root.display(),
                matched = %hit,
                "skipping ignored resource root"
            );
            continue;
        }
        list_files(root, &mut files)?;
    }

    let mut taken: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();
    for file in files {
        let Some(relative) = path_from_resources(&file) else {
            tracing::warn!(
                path = %file.display(),
                "resource file has no Resources segment in its path, skipping"
            );
            continue;
        };

        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Ok(name) = sanitize(&stem) else {
            tracing::warn!(
                path = %file.display(),
                "resource file name cannot form a constant identifier, skipping"
            );
            continue;
        };

        if !taken.insert(name.clone()) {
            tracing::warn!(
                name = %name,
                path = %relative,
                "multiple resources share this name, skipping"
            );
            continue;
        }

        entries.push(ResourceEntry {
            name,
            path: relative,
        });
    }

    Ok(entries)
}

/// Recursively find every directory literally named `Resources`.
fn find_resource_roots(dir: &Path, roots: &mut Vec<PathBuf>) -> io::Result<()> {
    for path in sorted_entries(dir)? {
        if !path.is_dir() {
            continue;
        }
        if path.file_name().is_some_and(|n| n == RESOURCES_SEGMENT) {
            roots.push(path.clone());
        }
        find_resource_roots(&path, roots)?;
    }
    Ok(())
}

/// Recursively list qualifying files under a resource root.
fn list_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            list_files(&path, files)?;
        } else if !is_excluded(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Directory entries in name order, for deterministic traversal.
fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_excluded(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    EXCLUDED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Path relative to the first `Resources` segment, extension stripped.
///
/// Returns `None` when the path has no such segment.
fn path_from_resources(path: &Path) -> Option<String> {
    let mut components = path.components();
    loop {
        match components.next()? {
            Component::Normal(name) if name == RESOURCES_SEGMENT => break,
            _ => {}
        }
    }

    let relative = components.as_path();
    if relative.as_os_str().is_empty() {
        return None;
    }

    let stripped = relative.with_extension("");
    let parts: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn collects_files_relative_to_resources_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Resources/Hero.png"));
        touch(&root.join("Assets/Resources/ui/Cursor.png"));

        let entries = collect(root, &[]).unwrap();

        assert_eq!(
            entries,
            vec![
                ResourceEntry {
                    name: "HERO".into(),
                    path: "Hero".into()
                },
                ResourceEntry {
                    name: "CURSOR".into(),
                    path: "ui/Cursor".into()
                },
            ]
        );
    }

    #[test]
    fn excludes_editor_artifacts() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Resources/Hero.png"));
        touch(&root.join("Assets/Resources/Hero.png.meta"));
        touch(&root.join("Assets/Resources/thumbs.db"));
        touch(&root.join("Assets/Resources/.DS_Store"));

        let entries = collect(root, &[]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "HERO");
    }

    #[test]
    fn first_root_wins_on_duplicate_names() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        // "a" sorts before "b", so a's Hero is discovered first
        touch(&root.join("a/Resources/Hero.png"));
        touch(&root.join("b/Resources/Hero.json"));

        let entries = collect(root, &[]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], ResourceEntry {
            name: "HERO".into(),
            path: "Hero".into()
        });
    }

    #[test]
    fn duplicate_names_within_one_root_are_skipped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Resources/Hero.png"));
        touch(&root.join("Assets/Resources/backup/Hero.png"));

        let entries = collect(root, &[]).unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn ignored_roots_contribute_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Resources/Hero.png"));
        touch(&root.join("Vendor/ProCore/Resources/Gizmo.png"));

        let entries = collect(root, &["ProCore".to_string()]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "HERO");
    }

    #[test]
    fn empty_tree_yields_no_entries() {
        let dir = TempDir::new().unwrap();
        assert!(collect(dir.path(), &[]).unwrap().is_empty());
    }

    #[test]
    fn nested_resources_anchor_to_first_segment() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Resources/inner/Resources/Gem.png"));

        let entries = collect(root, &[]).unwrap();

        // discovered under the outer root first; path is relative to it
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], ResourceEntry {
            name: "GEM".into(),
            path: "inner/Resources/Gem".into()
        });
    }

    #[test]
    fn path_without_resources_segment_is_rejected() {
        assert_eq!(path_from_resources(Path::new("Assets/Textures/Hero.png")), None);
        assert_eq!(
            path_from_resources(Path::new("Assets/Resources/Hero.png")),
            Some("Hero".to_string())
        );
    }
}
