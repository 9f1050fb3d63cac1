//! Sidebar HTML rendering.
//!
//! Provides Tera-based rendering of a [`crate::MenuView`] with built-in
//! templates that can be overridden from a directory.

mod engine;
mod render;

pub use engine::{MACROS_TEMPLATE, SIDER_TEMPLATE, SidebarTheme};
pub use render::{MenuItemContext, html_escape};
