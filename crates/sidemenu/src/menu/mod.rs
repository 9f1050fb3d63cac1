//! Menu trees, flattening and route matching.
//!
//! A menu tree is loaded from configuration, normalized by [`format_menu`],
//! flattened into a key list (children before parents) and matched against
//! the current URL to find the open and selected entries.

mod entry;
mod flatten;
mod format;
mod matcher;
mod pattern;

pub use entry::{Authority, Icon, MenuEntry};
pub use flatten::flatten;
pub use format::{MenuFormat, collapse_slashes, format_menu, is_http_link, load_menu, parse_menu};
pub use matcher::{
    FlatMenuKeys, derive_open_keys, derive_selected_keys, match_all, match_keys, url_to_list,
};
pub use pattern::PathPattern;
