//! Menu entry configuration types.
//!
//! A menu is a tree of [`MenuEntry`] values, usually loaded from a YAML,
//! JSON or TOML file. The tree is owned by the caller and never mutated here.

use serde::{Deserialize, Serialize};

use crate::theme::html_escape;

/// One node of the navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Route path or pattern (e.g., "sales", "/sales/:id", "https://example.com").
    #[serde(default)]
    pub path: String,
    /// Display name. Entries without one are not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuEntry>>,
    /// Roles allowed to see this entry (absent = public).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
    #[serde(default, alias = "hideInMenu")]
    pub hide_in_menu: bool,
    #[serde(default, alias = "hideChildrenInMenu")]
    pub hide_children_in_menu: bool,
    /// Link target for anchors (e.g., "_blank").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl MenuEntry {
    /// Create a named entry.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_authority(mut self, authority: Authority) -> Self {
        self.authority = Some(authority);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Mark the entry as hidden from the rendered menu.
    pub fn hidden(mut self) -> Self {
        self.hide_in_menu = true;
        self
    }

    /// Render this entry as a leaf even when it has children.
    pub fn hide_children(mut self) -> Self {
        self.hide_children_in_menu = true;
        self
    }

    /// Child entries, or an empty slice.
    pub fn children(&self) -> &[MenuEntry] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Display name when it is present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether the entry takes part in rendering at all.
    pub fn is_visible(&self) -> bool {
        !self.path.is_empty() && self.display_name().is_some() && !self.hide_in_menu
    }

    /// Whether the entry renders as a collapsible branch.
    ///
    /// A branch needs children, must not hide them, and at least one child
    /// has to carry a name.
    pub fn is_branch(&self) -> bool {
        !self.hide_children_in_menu
            && self
                .children
                .as_ref()
                .is_some_and(|children| children.iter().any(|c| c.display_name().is_some()))
    }

    /// Number of entries in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(MenuEntry::count).sum::<usize>()
    }
}

/// Menu icon, accepted from configuration as a font icon name, an image URL
/// or a block of pre-rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIcon", into = "RawIcon")]
pub enum Icon {
    /// Icon font glyph name (e.g., "setting").
    Named(String),
    /// Remote image.
    ImageUrl(String),
    /// Markup supplied verbatim by the configuration author.
    Prerendered(String),
}

impl Icon {
    /// Classify a bare string the way configuration files write icons.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("http") {
            Icon::ImageUrl(text)
        } else {
            Icon::Named(text)
        }
    }

    /// Render the icon as HTML.
    pub fn to_html(&self) -> String {
        match self {
            Icon::Named(name) => {
                let name = html_escape(name);
                format!("<i class=\"anticon anticon-{name}\"></i>")
            }
            Icon::ImageUrl(src) => {
                format!("<img src=\"{}\" alt=\"icon\" class=\"icon\" />", html_escape(src))
            }
            Icon::Prerendered(html) => html.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawIcon {
    Text(String),
    Markup { html: String },
}

impl From<RawIcon> for Icon {
    fn from(raw: RawIcon) -> Self {
        match raw {
            RawIcon::Text(text) => Icon::from_text(text),
            RawIcon::Markup { html } => Icon::Prerendered(html),
        }
    }
}

impl From<Icon> for RawIcon {
    fn from(icon: Icon) -> Self {
        match icon {
            Icon::Named(text) | Icon::ImageUrl(text) => RawIcon::Text(text),
            Icon::Prerendered(html) => RawIcon::Markup { html },
        }
    }
}

/// Permission token attached to an entry: one role or a list of roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authority {
    One(String),
    Any(Vec<String>),
}

impl Authority {
    /// Roles named by this token.
    pub fn roles(&self) -> &[String] {
        match self {
            Authority::One(role) => std::slice::from_ref(role),
            Authority::Any(roles) => roles,
        }
    }
}

impl From<&str> for Authority {
    fn from(role: &str) -> Self {
        Authority::One(role.to_string())
    }
}
