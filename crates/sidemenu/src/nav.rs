//! Navigation nodes built from a menu tree.
//!
//! [`MenuRenderer`] walks a formatted menu tree and produces the nested
//! [`NavNode`] structure a host UI (or [`crate::theme::SidebarTheme`]) turns
//! into markup. Entries without a name or flagged `hide_in_menu` are skipped
//! and every node passes through the [`Authorized`] collaborator.

use serde::Serialize;

use crate::authorized::Authorized;
use crate::menu::{Authority, Icon, MenuEntry, collapse_slashes, is_http_link};

/// A rendered navigation node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavNode {
    /// Collapsible branch.
    SubMenu {
        key: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<Icon>,
        open: bool,
        selected: bool,
        children: Vec<NavNode>,
    },
    /// Leaf link.
    Item {
        key: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<Icon>,
        selected: bool,
        link: Link,
    },
}

impl NavNode {
    pub fn key(&self) -> &str {
        match self {
            NavNode::SubMenu { key, .. } | NavNode::Item { key, .. } => key,
        }
    }

    /// Title of a branch or name of a leaf.
    pub fn label(&self) -> &str {
        match self {
            NavNode::SubMenu { title, .. } => title,
            NavNode::Item { name, .. } => name,
        }
    }

    pub fn icon(&self) -> Option<&Icon> {
        match self {
            NavNode::SubMenu { icon, .. } | NavNode::Item { icon, .. } => icon.as_ref(),
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            NavNode::SubMenu { selected, .. } | NavNode::Item { selected, .. } => *selected,
        }
    }

    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::SubMenu { children, .. } => children,
            NavNode::Item { .. } => &[],
        }
    }

    /// Depth-first search for a node by key.
    pub fn find(&self, key: &str) -> Option<&NavNode> {
        if self.key() == key {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(key))
    }
}

/// Where a leaf points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Link {
    /// Plain anchor to an `http(s)` URL.
    External {
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// Router link inside the application.
    Internal {
        to: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        /// Navigating to the current page replaces the history entry.
        replace: bool,
        /// On mobile, following the link collapses the sidebar.
        collapse_on_click: bool,
    },
}

impl Link {
    pub fn href(&self) -> &str {
        match self {
            Link::External { href, .. } => href,
            Link::Internal { to, .. } => to,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Link::External { target, .. } | Link::Internal { target, .. } => target.as_deref(),
        }
    }
}

/// Normalize an entry path into a link destination.
///
/// `http` paths pass through; everything else gets a leading slash and
/// repeated slashes collapsed.
pub fn conversion_path(path: &str) -> String {
    if is_http_link(path) {
        return path.to_string();
    }
    collapse_slashes(&format!("/{path}"))
}

/// Run a node through the authorization collaborator, if there is one.
pub fn filter(
    authorized: Option<&dyn Authorized>,
    authority: Option<&Authority>,
    node: NavNode,
) -> Option<NavNode> {
    match authorized {
        Some(authorized) => authorized.check(authority, node),
        None => Some(node),
    }
}

/// Builds [`NavNode`] trees for one render pass.
#[derive(Clone, Copy)]
pub struct MenuRenderer<'a> {
    pathname: &'a str,
    selected_keys: &'a [String],
    open_keys: &'a [String],
    is_mobile: bool,
    authorized: Option<&'a dyn Authorized>,
}

impl<'a> MenuRenderer<'a> {
    /// Create a renderer for the given current pathname.
    pub fn new(pathname: &'a str) -> Self {
        Self {
            pathname,
            selected_keys: &[],
            open_keys: &[],
            is_mobile: false,
            authorized: None,
        }
    }

    pub fn selected_keys(mut self, keys: &'a [String]) -> Self {
        self.selected_keys = keys;
        self
    }

    pub fn open_keys(mut self, keys: &'a [String]) -> Self {
        self.open_keys = keys;
        self
    }

    pub fn mobile(mut self, is_mobile: bool) -> Self {
        self.is_mobile = is_mobile;
        self
    }

    pub fn authorized(mut self, authorized: Option<&'a dyn Authorized>) -> Self {
        self.authorized = authorized;
        self
    }

    /// Build the visible, authorized nodes for a list of sibling entries.
    pub fn nav_items(&self, entries: &[MenuEntry]) -> Vec<NavNode> {
        entries
            .iter()
            .filter(|entry| entry.is_visible())
            .filter_map(|entry| {
                let node = self.sub_menu_or_item(entry);
                filter(self.authorized, entry.authority.as_ref(), node)
            })
            .collect()
    }

    fn sub_menu_or_item(&self, entry: &MenuEntry) -> NavNode {
        let name = entry.display_name().unwrap_or_default().to_string();
        let key = entry.path.clone();
        let selected = self.selected_keys.contains(&key);

        if entry.is_branch() {
            return NavNode::SubMenu {
                open: self.open_keys.contains(&key),
                selected,
                key,
                title: name,
                icon: entry.icon.clone(),
                children: self.nav_items(entry.children()),
            };
        }

        NavNode::Item {
            link: self.item_link(entry),
            key,
            name,
            icon: entry.icon.clone(),
            selected,
        }
    }

    fn item_link(&self, entry: &MenuEntry) -> Link {
        let path = conversion_path(&entry.path);
        let target = entry.target.clone();

        if is_http_link(&path) {
            return Link::External { href: path, target };
        }

        Link::Internal {
            replace: path == self.pathname,
            to: path,
            target,
            collapse_on_click: self.is_mobile,
        }
    }
}
