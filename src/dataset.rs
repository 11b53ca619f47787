//! Dataset traversal and canonical image identifiers.
//!
//! Images live exactly two directory levels below the dataset root
//! (`<root>/<level1>/<level2>/<name>.<ext>`); the identifier joins the two
//! level names and the extension-stripped filename with `/`. Scoring tools
//! match predictions to ground truth by this key, so a malformed path must
//! fail rather than fabricate an identifier.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Recognized image file extensions (matched case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// Recursively collect every recognized image file under `root`, sorted for
/// a deterministic processing set.
pub fn collect_images(root: &Path) -> Result<Vec<PathBuf>, String> {
    let mut images = Vec::new();
    walk(root, &mut images)?;
    images.sort();
    Ok(images)
}

fn walk(dir: &Path, images: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry in {}: {e}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, images)?;
        } else if has_image_extension(&path) {
            images.push(path);
        }
    }
    Ok(())
}

/// True when the path carries one of the recognized image extensions.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|&known| known == lower)
        })
        .unwrap_or(false)
}

/// Derive the canonical identifier of an image below the dataset root:
/// the first two directory levels plus the extension-stripped filename,
/// joined with `/`.
///
/// Fails when the image is not under `root` or when fewer than two
/// directory levels precede the filename. Deeper nesting keeps only the
/// first two levels.
pub fn image_id_from_path(path: &Path, root: &Path) -> Result<String, String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| format!("{} is not under the dataset root", path.display()))?;

    let dirs: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    // The last component is the filename; two directory levels must precede it.
    if dirs.len() < 3 {
        return Err(format!(
            "{} is nested {} level(s) below the root, expected at least 2",
            path.display(),
            dirs.len().saturating_sub(1)
        ));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("{} has no usable file name", path.display()))?;

    Ok(format!("{}/{}/{}", dirs[0], dirs[1], stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_joins_two_levels_and_stem() {
        let id = image_id_from_path(
            Path::new("root/altitude01/longitude05/orientation01_light01.png"),
            Path::new("root"),
        )
        .expect("well-formed path");
        assert_eq!(id, "altitude01/longitude05/orientation01_light01");
        assert_eq!(id.split('/').count(), 3);
    }

    #[test]
    fn shallow_paths_are_rejected() {
        let err = image_id_from_path(Path::new("root/one/image.png"), Path::new("root"))
            .expect_err("one level must fail");
        assert!(err.contains("expected at least 2"), "{err}");
        assert!(
            image_id_from_path(Path::new("root/image.png"), Path::new("root")).is_err()
        );
    }

    #[test]
    fn deeper_nesting_keeps_first_two_levels() {
        let id = image_id_from_path(
            Path::new("root/a/b/c/d/img.tif"),
            Path::new("root"),
        )
        .expect("deep path");
        assert_eq!(id, "a/b/img");
    }

    #[test]
    fn case_is_preserved_in_identifiers() {
        let id = image_id_from_path(
            Path::new("root/Altitude01/LongitudE05/Shot.PNG"),
            Path::new("root"),
        )
        .unwrap();
        assert_eq!(id, "Altitude01/LongitudE05/Shot");
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(has_image_extension(Path::new("a/b.PNG")));
        assert!(has_image_extension(Path::new("a/b.TiFf")));
        assert!(has_image_extension(Path::new("a/b.jpeg")));
        assert!(!has_image_extension(Path::new("a/b.bmp")));
        assert!(!has_image_extension(Path::new("a/noext")));
    }
}
