//! Sidebar navigation menu for admin dashboards.
//!
//! Turns a declarative menu tree into navigation nodes, works out which
//! entries are open and selected for the current URL, and asks an
//! [`Authorized`] collaborator which entries the user may see.
//!
//! ```no_run
//! use std::sync::Arc;
//! use sidemenu::{MenuEntry, Settings, SiderMenu, format_menu};
//!
//! let tree: Arc<[MenuEntry]> = format_menu(&[MenuEntry::new("sales", "Sales")
//!     .with_children(vec![MenuEntry::new("report", "Report")])])
//! .into();
//! let menu = SiderMenu::new(Settings::default(), tree, "/sales/report");
//! assert_eq!(menu.view().selected_key(), Some("/sales/report"));
//! ```

pub mod authorized;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod menu;
pub mod nav;
pub mod theme;

pub use authorized::{AllowAll, Authorized, RoleAuthorizer};
pub use config::{MenuMode, NavTheme, Settings};
pub use controller::{MenuCallbacks, MenuView, SiderMenu};
pub use error::{MenuError, MenuResult, PatternError};
pub use menu::{Authority, FlatMenuKeys, Icon, MenuEntry, flatten, format_menu, load_menu};
pub use nav::{Link, MenuRenderer, NavNode};
pub use theme::SidebarTheme;
