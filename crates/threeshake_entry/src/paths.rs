use std::path::{Component, Path, PathBuf};

/// Module specifier for `target` as imported from a module living in
/// `base`: forward slashes, `./`-prefixed unless it climbs out of `base`.
pub(crate) fn relative_specifier(target: &Path, base: &Path) -> Option<String> {
    let rel = make_relative(target, base)?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if joined.starts_with("..") { Some(joined) } else { Some(format!("./{}", joined)) }
}

/// Create a relative path from `base` to `target`
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let mut target_components = target.components();
    let mut base_components = base.components();

    let mut common_prefix_len = 0;
    let mut target_parts = Vec::new();
    let mut base_parts = Vec::new();

    // Find common prefix
    loop {
        match (target_components.next(), base_components.next()) {
            (Some(t), Some(b)) if t == b => {
                common_prefix_len += 1;
            }
            (Some(t), Some(b)) => {
                target_parts.push(t);
                base_parts.push(b);
                break;
            }
            (Some(t), None) => {
                target_parts.push(t);
                break;
            }
            (None, Some(b)) => {
                base_parts.push(b);
                break;
            }
            (None, None) => {
                return Some(PathBuf::from("."));
            }
        }
    }

    target_parts.extend(target_components);
    base_parts.extend(base_components);

    if common_prefix_len == 0 && target.components().next() != base.components().next() {
        return None;
    }

    let mut result = PathBuf::new();
    for _ in &base_parts {
        result.push("..");
    }
    for component in target_parts {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_specifier() {
        let specifier = relative_specifier(
            Path::new("/lib/src/geometries/SphereGeometry.js"),
            Path::new("/lib/src"),
        );
        assert_eq!(specifier.as_deref(), Some("./geometries/SphereGeometry.js"));
    }

    #[test]
    fn test_same_dir_specifier() {
        let specifier = relative_specifier(Path::new("/lib/src/constants.js"), Path::new("/lib/src"));
        assert_eq!(specifier.as_deref(), Some("./constants.js"));
    }

    #[test]
    fn test_parent_specifier() {
        let specifier = relative_specifier(Path::new("/lib/vendor/shim.js"), Path::new("/lib/src"));
        assert_eq!(specifier.as_deref(), Some("../vendor/shim.js"));
    }

    #[test]
    fn test_relative_inputs() {
        let specifier = relative_specifier(
            Path::new("node_modules/three/src/math/Math.js"),
            Path::new("node_modules/three/src"),
        );
        assert_eq!(specifier.as_deref(), Some("./math/Math.js"));
    }

    #[test]
    fn test_make_relative_multiple_levels_up() {
        let result = make_relative(Path::new("/project/file.ts"), Path::new("/project/apps/web/src"));
        assert_eq!(result, Some(PathBuf::from("../../../file.ts")));
    }

    #[test]
    fn test_make_relative_unrelated_roots() {
        assert_eq!(make_relative(Path::new("a/b.js"), Path::new("c/d")), None);
    }
}
