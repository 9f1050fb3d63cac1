//! Sidebar theme built on Tera templates.

use std::path::Path;

use tera::{Context as TeraContext, Tera};
use tracing::debug;

use super::render::{MenuItemContext, html_escape};
use crate::controller::MenuView;
use crate::error::{MenuError, MenuResult};

/// Name of the page-level sidebar template.
pub const SIDER_TEMPLATE: &str = "sider.html";
/// Name of the template holding the recursive `items` macro.
pub const MACROS_TEMPLATE: &str = "macros.html";

const SIDER_SOURCE: &str = include_str!("../../templates/sider.html");
const MACROS_SOURCE: &str = include_str!("../../templates/macros.html");

/// Renders a [`MenuView`] to HTML.
pub struct SidebarTheme {
    tera: Tera,
}

impl SidebarTheme {
    /// Create a theme using the built-in templates.
    pub fn new() -> MenuResult<Self> {
        Ok(Self::from_tera(Self::builtin()?))
    }

    /// Create a theme whose templates in `template_dir` override the
    /// built-in ones of the same name.
    pub fn with_template_dir(template_dir: &Path) -> MenuResult<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .ok_or_else(|| MenuError::Template(tera::Error::msg("invalid template directory path")))?;

        let mut tera = Tera::parse(pattern_str)?;
        tera.extend(&Self::builtin()?)?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), dir = %template_dir.display(), "loaded templates");

        Ok(Self::from_tera(tera))
    }

    fn builtin() -> MenuResult<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(MACROS_TEMPLATE, MACROS_SOURCE), (SIDER_TEMPLATE, SIDER_SOURCE)])?;
        Ok(tera)
    }

    fn from_tera(mut tera: Tera) -> Self {
        // Context values are escaped in MenuItemContext and render().
        tera.autoescape_on(Vec::new());
        Self { tera }
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Render the sidebar.
    pub fn render(&self, view: &MenuView) -> MenuResult<String> {
        let mut context = TeraContext::new();
        context.insert("nav_theme", &view.nav_theme.to_string());
        context.insert("mode", &view.mode.to_string());
        context.insert("collapsed", &view.collapsed);
        context.insert("fixed", &view.fixed);
        context.insert("title", &view.title.as_deref().map(html_escape));
        context.insert("logo", &view.logo.as_deref().map(html_escape));
        context.insert("selected_keys", &view.selected_keys);
        context.insert("items", &MenuItemContext::from_nodes(&view.items));

        Ok(self.tera.render(SIDER_TEMPLATE, &context)?)
    }
}
