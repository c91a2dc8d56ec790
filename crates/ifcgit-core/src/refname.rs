/// Validity predicate for a bare branch or tag name, applied before any
/// backend call; a rejected name never reaches the backend.
///
/// A name is invalid if it is empty; starts with a dot, space, or hyphen;
/// starts with a slash; contains two consecutive dots; contains a path
/// segment starting with a dot; contains `@{`; contains any of
/// `~ : ^ \ space ? * [`; ends with a dot or slash; or ends with `.lock`.
pub fn is_valid_ref_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.starts_with(['.', ' ', '-', '/']) {
        return false;
    }
    if name.contains("..") || name.contains("/.") || name.contains("@{") {
        return false;
    }
    if name.contains(['~', ':', '^', '\\', ' ', '?', '*', '[']) {
        return false;
    }
    if name.ends_with(['.', '/']) {
        return false;
    }
    if name.ends_with(".lock") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "", ".foo", " foo", "-foo", "/foo", "foo.lock", "a..b", "a/.b", "a@{b", "a~b", "a:b",
            "a^b", "a\\b", "a b", "a?b", "a*b", "a[b", "foo.", "foo/",
        ] {
            assert!(!is_valid_ref_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn accepts_ordinary_names() {
        for name in ["feature/login", "v1.2.3", "main", "fix-123", "a.b.c"] {
            assert!(is_valid_ref_name(name), "{name:?} should be valid");
        }
    }
}
