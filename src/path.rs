//! Virtual paths inside a data file.
//!
//! Paths are `/`-separated, relative to the file root, with no leading or
//! trailing slash. The root itself is the empty string.

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolve `.`, `..` and repeated separators.
///
/// A `..` at the root stays at the root. The result is a fixed point:
/// normalizing it again returns it unchanged.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Resolve `path` against the current directory.
///
/// A leading `/` makes `path` relative to the root instead.
pub fn join(current: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize(path)
    } else {
        normalize(&format!("{current}/{path}"))
    }
}

/// Shortest path leading from `current` to `target`, both normalized.
///
/// Pointing at the current directory itself yields `../<name>` (or `.` at
/// the root), never an empty string.
pub fn relativize(current: &str, target: &str) -> String {
    let from = segments(current);
    let to = segments(target);
    if from == to {
        return match to.last() {
            Some(last) => format!("../{last}"),
            None => ".".to_string(),
        };
    }
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let mut parts = vec![".."; from.len() - common];
    parts.extend_from_slice(&to[common..]);
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_parent_segments() {
        assert_eq!(normalize("a/b/../c"), "a/c");
        assert_eq!(normalize("a/b/../c"), normalize("a/c"));
        assert_eq!(normalize("a/b/c/../../d"), "a/d");
        assert_eq!(normalize("a/../../b"), "b");
    }

    #[test]
    fn test_normalize_strips_separators_and_dots() {
        assert_eq!(normalize("//a///b/"), "a/b");
        assert_eq!(normalize("./a/./b"), "a/b");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize(".."), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for p in ["", "a", "a/b/../c", "./x//y/", "../..", "a/./b/../../c/d/", "*/h?"] {
            let once = normalize(p);
            assert_eq!(normalize(&once), once, "{p}");
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a/b", ".."), "a");
        assert_eq!(join("a/b", "../c"), "a/c");
        assert_eq!(join("a/b", "/c"), "c");
        assert_eq!(join("a", "*"), "a/*");
    }

    #[test]
    fn test_relativize() {
        assert_eq!(relativize("", "a/b"), "a/b");
        assert_eq!(relativize("a", "a/b"), "b");
        assert_eq!(relativize("a/b", "a/c"), "../c");
        assert_eq!(relativize("a/b", "a"), "..");
        assert_eq!(relativize("x/y", "a"), "../../a");
    }

    #[test]
    fn test_relativize_to_self_is_never_empty() {
        assert_eq!(relativize("a/b", "a/b"), "../b");
        assert_eq!(relativize("a", "a"), "../a");
        assert_eq!(relativize("", ""), ".");
    }
}
