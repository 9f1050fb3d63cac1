//! Loading menu files and normalizing their paths.
//!
//! Configuration files write child paths relative to their parent
//! (`sales` → `report`). [`format_menu`] resolves them into absolute keys
//! (`/sales/report`) and lets children inherit their parent's authority.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::entry::{Authority, MenuEntry};
use crate::error::{MenuError, MenuResult};

/// Supported menu file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Yaml,
    Json,
    Toml,
}

impl MenuFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(MenuFormat::Yaml),
            "json" => Some(MenuFormat::Json),
            "toml" => Some(MenuFormat::Toml),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            MenuFormat::Yaml => "YAML",
            MenuFormat::Json => "JSON",
            MenuFormat::Toml => "TOML",
        }
    }
}

/// A menu document is either a bare list or a table with a `menu` key.
///
/// TOML has no top-level arrays, so TOML files always use `[[menu]]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    List(Vec<MenuEntry>),
    Wrapped { menu: Vec<MenuEntry> },
}

impl MenuDocument {
    fn into_entries(self) -> Vec<MenuEntry> {
        match self {
            MenuDocument::List(entries) | MenuDocument::Wrapped { menu: entries } => entries,
        }
    }
}

/// Parse a menu document from a string.
pub fn parse_menu(source: &str, format: MenuFormat) -> MenuResult<Vec<MenuEntry>> {
    let parse_err = |details: String| MenuError::Parse {
        format: format.name(),
        details,
    };

    let document: MenuDocument = match format {
        MenuFormat::Yaml => serde_yml::from_str(source).map_err(|e| parse_err(e.to_string()))?,
        MenuFormat::Json => serde_json::from_str(source).map_err(|e| parse_err(e.to_string()))?,
        MenuFormat::Toml => toml::from_str(source).map_err(|e| parse_err(e.to_string()))?,
    };

    Ok(document.into_entries())
}

/// Read and parse a menu file, picking the format from its extension.
pub fn load_menu(path: &Path) -> MenuResult<Vec<MenuEntry>> {
    let display = path.display().to_string();
    let format = MenuFormat::from_path(path).ok_or_else(|| MenuError::UnsupportedFormat {
        path: display.clone(),
    })?;

    let source = std::fs::read_to_string(path).map_err(|source| MenuError::Read {
        path: display.clone(),
        source,
    })?;

    let entries = parse_menu(&source, format)?;
    debug!(path = %path.display(), entries = entries.len(), "loaded menu file");
    Ok(entries)
}

/// Resolve relative paths and inherited authority across the whole tree.
pub fn format_menu(entries: &[MenuEntry]) -> Vec<MenuEntry> {
    format_level(entries, "/", None)
}

fn format_level(
    entries: &[MenuEntry],
    parent_path: &str,
    parent_authority: Option<&Authority>,
) -> Vec<MenuEntry> {
    entries
        .iter()
        .map(|entry| {
            let path = join_path(parent_path, &entry.path);
            let authority = entry
                .authority
                .clone()
                .or_else(|| parent_authority.cloned());
            let children = entry
                .children
                .as_ref()
                .map(|children| format_level(children, &path, authority.as_ref()));

            MenuEntry {
                path,
                name: entry.name.clone(),
                icon: entry.icon.clone(),
                children,
                authority,
                hide_in_menu: entry.hide_in_menu,
                hide_children_in_menu: entry.hide_children_in_menu,
                target: entry.target.clone(),
            }
        })
        .collect()
}

/// Join a child path onto its parent's resolved path.
///
/// Empty paths stay empty so they are still excluded from matching.
fn join_path(parent: &str, path: &str) -> String {
    if path.is_empty() || is_http_link(path) {
        return path.to_string();
    }
    if path.starts_with('/') {
        return collapse_slashes(path);
    }
    if is_http_link(parent) {
        return format!("{}/{path}", parent.trim_end_matches('/'));
    }
    collapse_slashes(&format!("{parent}/{path}"))
}

/// Collapse runs of `/` into a single slash.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

#[allow(clippy::expect_used)]
static HTTP_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^https?://").expect("http link expression is valid"));

/// Whether a path is an absolute `http` or `https` URL.
///
/// The scheme must be lower case and followed by `//`.
pub fn is_http_link(path: &str) -> bool {
    HTTP_LINK.is_match(path)
}
