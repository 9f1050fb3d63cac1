//! Template context for rendered menu items.
//!
//! Every string is HTML-escaped here, so templates print values verbatim.

use serde::Serialize;

use crate::nav::{Link, NavNode};

/// Escape text for use in HTML bodies and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// One menu item as the templates see it.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemContext {
    /// "submenu" or "item".
    pub kind: &'static str,
    pub key: String,
    pub label: String,
    pub icon_html: Option<String>,
    pub selected: bool,
    pub open: bool,
    pub href: Option<String>,
    pub target: Option<String>,
    pub external: bool,
    pub replace: bool,
    pub collapse_on_click: bool,
    pub children: Vec<MenuItemContext>,
}

impl MenuItemContext {
    /// Convert a list of sibling nodes.
    pub fn from_nodes(nodes: &[NavNode]) -> Vec<Self> {
        nodes.iter().map(Self::from_node).collect()
    }

    pub fn from_node(node: &NavNode) -> Self {
        let icon_html = node.icon().map(|icon| icon.to_html());

        match node {
            NavNode::SubMenu {
                key,
                title,
                open,
                selected,
                children,
                ..
            } => Self {
                kind: "submenu",
                key: html_escape(key),
                label: html_escape(title),
                icon_html,
                selected: *selected,
                open: *open,
                href: None,
                target: None,
                external: false,
                replace: false,
                collapse_on_click: false,
                children: Self::from_nodes(children),
            },
            NavNode::Item {
                key,
                name,
                selected,
                link,
                ..
            } => {
                let (external, replace, collapse_on_click) = match link {
                    Link::External { .. } => (true, false, false),
                    Link::Internal {
                        replace,
                        collapse_on_click,
                        ..
                    } => (false, *replace, *collapse_on_click),
                };

                Self {
                    kind: "item",
                    key: html_escape(key),
                    label: html_escape(name),
                    icon_html,
                    selected: *selected,
                    open: false,
                    href: Some(html_escape(link.href())),
                    target: link.target().map(html_escape),
                    external,
                    replace,
                    collapse_on_click,
                    children: Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Icon;

    #[test]
    fn test_html_escape_special_chars() {
        assert_eq!(
            html_escape("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
        );
        assert_eq!(html_escape("a & \"b\""), "a &amp; &quot;b&quot;");
        assert_eq!(html_escape("/sales/report"), "/sales/report");
    }

    #[test]
    fn item_context_escapes_and_flags() {
        let node = NavNode::Item {
            key: "/a".into(),
            name: "<A>".into(),
            icon: Some(Icon::Named("home".into())),
            selected: true,
            link: Link::Internal {
                to: "/a".into(),
                target: Some("_self".into()),
                replace: true,
                collapse_on_click: false,
            },
        };

        let ctx = MenuItemContext::from_node(&node);
        assert_eq!(ctx.kind, "item");
        assert_eq!(ctx.label, "&lt;A&gt;");
        assert_eq!(ctx.href.as_deref(), Some("/a"));
        assert_eq!(ctx.target.as_deref(), Some("_self"));
        assert_eq!(
            ctx.icon_html.as_deref(),
            Some("<i class=\"anticon anticon-home\"></i>")
        );
        assert!(ctx.replace);
        assert!(!ctx.external);
    }

    #[test]
    fn submenu_context_recurses() {
        let node = NavNode::SubMenu {
            key: "/a".into(),
            title: "A".into(),
            icon: None,
            open: true,
            selected: false,
            children: vec![NavNode::Item {
                key: "https://x.io".into(),
                name: "X".into(),
                icon: None,
                selected: false,
                link: Link::External {
                    href: "https://x.io".into(),
                    target: None,
                },
            }],
        };

        let ctx = MenuItemContext::from_node(&node);
        assert_eq!(ctx.kind, "submenu");
        assert!(ctx.open);
        assert!(ctx.href.is_none());
        assert_eq!(ctx.children.len(), 1);
        assert!(ctx.children[0].external);
    }
}
