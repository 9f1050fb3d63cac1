//! Matching URLs against flattened menu keys.
//!
//! [`FlatMenuKeys`] is the cached form: the flat key list of one menu tree
//! with every key compiled once. The free functions [`match_keys`] and
//! [`match_all`] compile on the fly and are handy for one-off checks.

use tracing::{debug, warn};

use super::entry::MenuEntry;
use super::flatten::flatten;
use super::pattern::PathPattern;

/// Split a URL into its ancestor-and-self prefixes.
///
/// `/a/b/c` → `["/a", "/a/b", "/a/b/c"]`; `/` gives an empty list.
pub fn url_to_list(url: &str) -> Vec<String> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    (1..=segments.len())
        .map(|depth| format!("/{}", segments[..depth].join("/")))
        .collect()
}

/// Keys whose pattern matches `path`, in flat-list order.
///
/// Empty keys never match.
pub fn match_keys(flat_keys: &[String], path: &str) -> Vec<String> {
    flat_keys
        .iter()
        .filter(|key| !key.is_empty())
        .filter(|key| compile(key).is_some_and(|pattern| pattern.is_match(path)))
        .cloned()
        .collect()
}

/// [`match_keys`] applied to each segment, concatenated in segment order.
///
/// Duplicates are preserved.
pub fn match_all(flat_keys: &[String], segments: &[String]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|segment| match_keys(flat_keys, segment))
        .collect()
}

fn compile(key: &str) -> Option<PathPattern> {
    match PathPattern::new(key) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!(key = %key, error = %e, "menu key is not a valid route pattern");
            None
        }
    }
}

/// Flattened keys of one menu tree with their compiled patterns.
#[derive(Debug, Clone, Default)]
pub struct FlatMenuKeys {
    keys: Vec<String>,
    /// Compiled pattern per key; `None` for empty or invalid keys.
    patterns: Vec<Option<PathPattern>>,
}

impl FlatMenuKeys {
    /// Flatten and compile a menu tree.
    pub fn from_tree(tree: &[MenuEntry]) -> Self {
        Self::from_keys(flatten(tree))
    }

    /// Compile an already flattened key list.
    pub fn from_keys(keys: Vec<String>) -> Self {
        let patterns = keys
            .iter()
            .map(|key| if key.is_empty() { None } else { compile(key) })
            .collect();

        debug!(keys = keys.len(), "built flat menu keys");
        Self { keys, patterns }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys matching `path`, in flat-list order.
    pub fn matches(&self, path: &str) -> Vec<&str> {
        self.keys
            .iter()
            .zip(&self.patterns)
            .filter(|(_, pattern)| pattern.as_ref().is_some_and(|p| p.is_match(path)))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Matches for every segment, concatenated in segment order.
    pub fn matches_all(&self, segments: &[String]) -> Vec<&str> {
        segments
            .iter()
            .flat_map(|segment| self.matches(segment))
            .collect()
    }

    /// The last key in flat order that matches `path`.
    ///
    /// Parents are flattened after their children, so when a parent and a
    /// child both match, the parent's key wins.
    pub fn best_match(&self, path: &str) -> Option<&str> {
        self.keys
            .iter()
            .zip(&self.patterns)
            .rev()
            .find(|(_, pattern)| pattern.as_ref().is_some_and(|p| p.is_match(path)))
            .map(|(key, _)| key.as_str())
    }

    /// Best match for each URL prefix, shallowest first.
    ///
    /// Prefixes without any match contribute nothing.
    pub fn keys_for_url(&self, pathname: &str) -> Vec<String> {
        url_to_list(pathname)
            .iter()
            .filter_map(|segment| self.best_match(segment))
            .map(str::to_string)
            .collect()
    }
}

/// Selected keys for `pathname`.
///
/// When nothing matches and open keys are known, the deepest open key is
/// selected instead.
pub fn derive_selected_keys(
    flat_keys: &FlatMenuKeys,
    pathname: &str,
    open_keys: Option<&[String]>,
) -> Vec<String> {
    let selected = flat_keys.keys_for_url(pathname);
    if !selected.is_empty() {
        return selected;
    }
    open_keys
        .and_then(<[String]>::last)
        .map(|key| vec![key.clone()])
        .unwrap_or_default()
}

/// Open keys for `pathname`: the best match for every URL prefix.
pub fn derive_open_keys(flat_keys: &FlatMenuKeys, pathname: &str) -> Vec<String> {
    flat_keys.keys_for_url(pathname)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn invalid_key_never_matches() {
        let flat = FlatMenuKeys::from_keys(keys(&["/a/:id(\\d+", "/a"]));
        assert_eq!(flat.len(), 2);
        assert!(flat.matches("/a/5").is_empty());
        assert_eq!(flat.matches("/a"), ["/a"]);
        assert!(match_keys(&keys(&["/a/:id(\\d+"]), "/a/5").is_empty());
    }

    #[test]
    fn url_to_list_prefixes() {
        assert_eq!(url_to_list("/a/b/c"), keys(&["/a", "/a/b", "/a/b/c"]));
        assert_eq!(url_to_list("/a//b/"), keys(&["/a", "/a/b"]));
        assert!(url_to_list("/").is_empty());
        assert!(url_to_list("").is_empty());
    }

    #[test]
    fn match_keys_skips_empty() {
        let flat = keys(&["", "/a", "/a/:id"]);
        assert_eq!(match_keys(&flat, "/a/5"), keys(&["/a/:id"]));
        assert!(match_keys(&flat, "").is_empty());
    }

    #[test]
    fn match_keys_param_and_literal_both_match() {
        let flat = keys(&["/a", "/a/:id", "/a/new"]);
        assert_eq!(match_keys(&flat, "/a/new"), keys(&["/a/:id", "/a/new"]));
    }

    #[test]
    fn match_all_preserves_duplicates() {
        let flat = keys(&["/a", "/:section"]);
        let segments = url_to_list("/a/b");
        assert_eq!(match_all(&flat, &segments), keys(&["/a", "/:section"]));

        let segments = keys(&["/a", "/a"]);
        assert_eq!(match_all(&flat, &segments), keys(&["/a", "/:section", "/a", "/:section"]));
    }

    #[test]
    fn cached_matches_agree_with_free_functions() {
        let flat = keys(&["/a/:id", "", "/a", "/b/(", "/b"]);
        let cached = FlatMenuKeys::from_keys(flat.clone());
        for path in ["/a", "/a/1", "/b", "/c", ""] {
            let expected = match_keys(&flat, path);
            let actual: Vec<String> = cached.matches(path).into_iter().map(String::from).collect();
            assert_eq!(actual, expected, "path {path}");
        }
    }

    #[test]
    fn last_match_is_selected() {
        let flat = FlatMenuKeys::from_keys(keys(&["/a", "/a/:id"]));
        assert_eq!(flat.matches("/a/5"), vec!["/a/:id"]);
        assert_eq!(derive_selected_keys(&flat, "/a/5", None), keys(&["/a", "/a/:id"]));

        let both = match_all(&keys(&["/a", "/a/:id"]), &url_to_list("/a/5"));
        assert_eq!(both, keys(&["/a", "/a/:id"]));

        let flat = FlatMenuKeys::from_keys(keys(&["/x/new", "/x/:id"]));
        assert_eq!(flat.matches("/x/new"), vec!["/x/new", "/x/:id"]);
        assert_eq!(flat.best_match("/x/new"), Some("/x/:id"));
    }

    #[test]
    fn selection_falls_back_to_deepest_open_key() {
        let flat = FlatMenuKeys::from_keys(keys(&["/a"]));
        let open = keys(&["/a", "/a/b"]);
        assert_eq!(derive_selected_keys(&flat, "/zzz", Some(&open)), keys(&["/a/b"]));
        assert!(derive_selected_keys(&flat, "/zzz", None).is_empty());
        assert!(derive_selected_keys(&flat, "/zzz", Some(&[])).is_empty());
    }

    #[test]
    fn open_keys_follow_url_prefixes() {
        let flat = FlatMenuKeys::from_keys(keys(&["/sales/report", "/sales", "/home"]));
        assert_eq!(
            derive_open_keys(&flat, "/sales/report/2024"),
            keys(&["/sales", "/sales/report"])
        );
    }

    #[test]
    fn from_tree_flattens() {
        let tree = vec![MenuEntry::new("/a", "A").with_children(vec![MenuEntry::new("/a/b", "B")])];
        let flat = FlatMenuKeys::from_tree(&tree);
        assert_eq!(flat.keys(), keys(&["/a/b", "/a"]).as_slice());
        assert_eq!(flat.len(), 2);
        assert!(!flat.is_empty());
    }
}
