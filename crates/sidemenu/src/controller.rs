//! Sidebar menu controller.
//!
//! [`SiderMenu`] owns the state a host UI keeps between renders: the current
//! menu tree and its flattened keys, the pathname, the open branches and the
//! collapsed flag. Hosts drive it explicitly with [`SiderMenu::update_tree`],
//! [`SiderMenu::update_location`] and the event methods, then call
//! [`SiderMenu::view`] to get a snapshot to render.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::authorized::Authorized;
use crate::config::{MenuMode, NavTheme, Settings};
use crate::debounce::ResizeDebouncer;
use crate::menu::{FlatMenuKeys, MenuEntry, derive_open_keys, derive_selected_keys};
use crate::nav::{MenuRenderer, NavNode};

/// Callbacks into the host.
#[derive(Default)]
pub struct MenuCallbacks {
    /// Called with the branch key whenever a submenu title is clicked.
    pub on_submenu_click: Option<Box<dyn FnMut(&str)>>,
    /// Called with the new collapsed state.
    pub on_collapse: Option<Box<dyn FnMut(bool)>>,
}

impl MenuCallbacks {
    pub fn on_submenu_click(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_submenu_click = Some(Box::new(callback));
        self
    }

    pub fn on_collapse(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_collapse = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for MenuCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuCallbacks")
            .field("on_submenu_click", &self.on_submenu_click.is_some())
            .field("on_collapse", &self.on_collapse.is_some())
            .finish()
    }
}

/// Snapshot of everything needed to draw the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub nav_theme: NavTheme,
    pub mode: MenuMode,
    pub collapsed: bool,
    pub fixed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub selected_keys: Vec<String>,
    /// Controlled open keys; `None` while collapsed.
    pub open_keys: Option<Vec<String>>,
    pub items: Vec<NavNode>,
}

impl MenuView {
    /// The deepest selected key.
    pub fn selected_key(&self) -> Option<&str> {
        self.selected_keys.last().map(String::as_str)
    }

    /// Depth-first search for a node by key.
    pub fn find(&self, key: &str) -> Option<&NavNode> {
        self.items.iter().find_map(|item| item.find(key))
    }
}

/// Stateful sidebar menu.
pub struct SiderMenu {
    settings: Settings,
    tree: Arc<[MenuEntry]>,
    flat_keys: FlatMenuKeys,
    pathname: String,
    open_keys: Vec<String>,
    collapsed: bool,
    is_mobile: bool,
    resize: ResizeDebouncer,
    callbacks: MenuCallbacks,
    authorized: Option<Box<dyn Authorized>>,
}

impl SiderMenu {
    /// Create a controller for a formatted menu tree at `pathname`.
    pub fn new(settings: Settings, tree: Arc<[MenuEntry]>, pathname: impl Into<String>) -> Self {
        let pathname = pathname.into();
        let flat_keys = FlatMenuKeys::from_tree(&tree);
        let open_keys = derive_open_keys(&flat_keys, &pathname);
        let resize = ResizeDebouncer::new(settings.resize_debounce);

        Self {
            settings,
            tree,
            flat_keys,
            pathname,
            open_keys,
            collapsed: false,
            is_mobile: false,
            resize,
            callbacks: MenuCallbacks::default(),
            authorized: None,
        }
    }

    pub fn with_callbacks(mut self, callbacks: MenuCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_authorized(mut self, authorized: impl Authorized + 'static) -> Self {
        self.authorized = Some(Box::new(authorized));
        self
    }

    pub fn with_mobile(mut self, is_mobile: bool) -> Self {
        self.is_mobile = is_mobile;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn tree(&self) -> &Arc<[MenuEntry]> {
        &self.tree
    }

    pub fn flat_keys(&self) -> &FlatMenuKeys {
        &self.flat_keys
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn open_keys(&self) -> &[String] {
        &self.open_keys
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in a new menu tree.
    ///
    /// Flat keys are rebuilt only when the tree is a different allocation;
    /// passing the same `Arc` again is a no-op.
    pub fn update_tree(&mut self, tree: Arc<[MenuEntry]>) {
        if Arc::ptr_eq(&self.tree, &tree) {
            return;
        }

        self.flat_keys = FlatMenuKeys::from_tree(&tree);
        self.tree = tree;
        self.open_keys = derive_open_keys(&self.flat_keys, &self.pathname);
        debug!(
            keys = self.flat_keys.len(),
            open = ?self.open_keys,
            "menu tree replaced"
        );
    }

    /// Move to a new pathname.
    ///
    /// Open keys are re-derived from the URL, discarding any branches the
    /// user toggled by hand.
    pub fn update_location(&mut self, pathname: impl Into<String>) {
        let pathname = pathname.into();
        if pathname == self.pathname {
            return;
        }

        self.open_keys = derive_open_keys(&self.flat_keys, &pathname);
        self.pathname = pathname;
        debug!(pathname = %self.pathname, open = ?self.open_keys, "location changed");
    }

    /// Whether `key` belongs to a top-level entry.
    pub fn is_main_menu(&self, key: &str) -> bool {
        !key.is_empty() && self.tree.iter().any(|entry| entry.path == key)
    }

    /// Apply the open-key list produced by a user expanding or collapsing a
    /// branch.
    ///
    /// At most one top-level branch stays open: if the candidate list holds
    /// more than one, only its last (most recently opened) key is kept.
    /// Nested branches are left alone.
    pub fn handle_open_change(&mut self, mut open_keys: Vec<String>) {
        let main_count = open_keys
            .iter()
            .filter(|key| self.is_main_menu(key))
            .count();

        if main_count > 1 {
            open_keys = open_keys.pop().into_iter().collect();
        }

        debug!(open = ?open_keys, "open keys changed");
        self.open_keys = open_keys;
    }

    /// Notify the host that a submenu title was clicked.
    pub fn submenu_clicked(&mut self, key: &str) {
        if let Some(callback) = self.callbacks.on_submenu_click.as_mut() {
            callback(key);
        }
    }

    /// Flip the collapsed state and schedule a resize notification.
    pub fn toggle_collapsed(&mut self, now: Instant) {
        self.set_collapsed(!self.collapsed);
        self.resize.trigger(now);
    }

    /// Set the collapsed state, notifying the host.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        if let Some(callback) = self.callbacks.on_collapse.as_mut() {
            callback(collapsed);
        }
    }

    /// Handle a click on an internal link; on mobile this collapses the
    /// sidebar.
    pub fn link_clicked(&mut self) {
        if self.is_mobile {
            self.set_collapsed(true);
        }
    }

    /// Returns true when a pending resize notification is due.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        self.resize.poll(now)
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Derive the render snapshot.
    pub fn view(&self) -> MenuView {
        let open_keys = (!self.collapsed).then(|| self.open_keys.clone());
        let selected_keys =
            derive_selected_keys(&self.flat_keys, &self.pathname, open_keys.as_deref());

        let items = MenuRenderer::new(&self.pathname)
            .selected_keys(&selected_keys)
            .open_keys(open_keys.as_deref().unwrap_or_default())
            .mobile(self.is_mobile)
            .authorized(self.authorized.as_deref())
            .nav_items(&self.tree);

        MenuView {
            nav_theme: self.settings.nav_theme,
            mode: self.settings.mode,
            collapsed: self.collapsed,
            fixed: self.settings.fix_sidebar,
            title: self.settings.title.clone(),
            logo: self.settings.logo.clone(),
            selected_keys,
            open_keys,
            items,
        }
    }
}

impl Drop for SiderMenu {
    fn drop(&mut self) {
        self.resize.cancel();
    }
}

impl fmt::Debug for SiderMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiderMenu")
            .field("pathname", &self.pathname)
            .field("flat_keys", &self.flat_keys.len())
            .field("open_keys", &self.open_keys)
            .field("collapsed", &self.collapsed)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::menu::format_menu;

    fn tree() -> Arc<[MenuEntry]> {
        format_menu(&[
            MenuEntry::new("sales", "Sales").with_children(vec![
                MenuEntry::new("report", "Report").with_children(vec![
                    MenuEntry::new(":id", "Detail").hidden(),
                    MenuEntry::new("daily", "Daily"),
                ]),
            ]),
            MenuEntry::new("stock", "Stock").with_children(vec![MenuEntry::new("in", "In")]),
        ])
        .into()
    }

    fn menu(pathname: &str) -> SiderMenu {
        SiderMenu::new(Settings::default(), tree(), pathname)
    }

    #[test]
    fn open_keys_from_initial_location() {
        let menu = menu("/sales/report/daily");
        assert_eq!(
            menu.open_keys(),
            ["/sales", "/sales/report", "/sales/report/daily"]
        );
    }

    #[test]
    fn location_change_resets_manual_toggles() {
        let mut menu = menu("/sales/report");
        menu.handle_open_change(vec!["/sales".into(), "/sales/report".into(), "/stock".into()]);
        assert_eq!(menu.open_keys(), ["/stock"]);

        menu.update_location("/sales/report");
        assert_eq!(menu.open_keys(), ["/stock"]);

        menu.update_location("/stock/in");
        assert_eq!(menu.open_keys(), ["/stock", "/stock/in"]);
    }

    #[test]
    fn nested_branches_stay_open() {
        let mut menu = menu("/");
        menu.handle_open_change(vec!["/sales".into(), "/sales/report".into()]);
        assert_eq!(menu.open_keys(), ["/sales", "/sales/report"]);
    }

    #[test]
    fn update_tree_same_arc_is_noop() {
        let tree = tree();
        let mut menu = SiderMenu::new(Settings::default(), tree.clone(), "/sales");
        menu.handle_open_change(vec!["/stock".into()]);
        menu.update_tree(tree);
        assert_eq!(menu.open_keys(), ["/stock"]);
    }

    #[test]
    fn update_tree_rebuilds_keys() {
        let mut menu = menu("/orders/7");
        assert!(menu.open_keys().is_empty());

        let next: Arc<[MenuEntry]> = format_menu(&[MenuEntry::new("orders", "Orders")
            .with_children(vec![MenuEntry::new(":id", "Order").hidden()])])
        .into();
        menu.update_tree(next);
        assert_eq!(menu.flat_keys().keys(), ["/orders/:id", "/orders"]);
        assert_eq!(menu.open_keys(), ["/orders", "/orders/:id"]);
    }

    #[test]
    fn view_selects_deepest_match() {
        let view = menu("/sales/report/42").view();
        assert_eq!(view.selected_key(), Some("/sales/report/:id"));
        assert!(view.open_keys.as_deref().unwrap().contains(&"/sales".to_string()));
    }

    #[test]
    fn view_falls_back_to_open_key() {
        let mut menu = menu("/unknown");
        menu.handle_open_change(vec!["/stock".into()]);
        let view = menu.view();
        assert_eq!(view.selected_keys, vec!["/stock".to_string()]);
    }

    #[test]
    fn collapsed_view_has_no_open_keys() {
        let view = menu("/sales/report").with_collapsed(true).view();
        assert!(view.open_keys.is_none());
        assert!(view.collapsed);
        assert_eq!(view.selected_key(), Some("/sales/report"));

        let view = menu("/unknown").with_collapsed(true).view();
        assert!(view.selected_keys.is_empty());
    }

    #[test]
    fn main_menu_detection() {
        let menu = menu("/");
        assert!(menu.is_main_menu("/sales"));
        assert!(!menu.is_main_menu("/sales/report"));
        assert!(!menu.is_main_menu(""));
    }

    #[test]
    fn submenu_click_invokes_callback() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let mut menu = menu("/").with_callbacks(
            MenuCallbacks::default().on_submenu_click(move |key| sink.borrow_mut().push(key.to_string())),
        );

        menu.submenu_clicked("/sales");
        menu.submenu_clicked("/stock");
        assert_eq!(*clicks.borrow(), vec!["/sales", "/stock"]);
    }

    #[test]
    fn toggle_collapses_and_debounces_resize() {
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = states.clone();
        let mut settings = Settings::default();
        settings.resize_debounce = Duration::from_millis(100);
        let mut menu = SiderMenu::new(settings, tree(), "/").with_callbacks(
            MenuCallbacks::default().on_collapse(move |collapsed| sink.borrow_mut().push(collapsed)),
        );

        let start = Instant::now();
        menu.toggle_collapsed(start);
        menu.toggle_collapsed(start + Duration::from_millis(50));
        assert_eq!(*states.borrow(), vec![true, false]);
        assert!(!menu.poll_resize(start + Duration::from_millis(120)));
        assert!(menu.poll_resize(start + Duration::from_millis(150)));
        assert!(!menu.resize_pending());
    }

    #[test]
    fn mobile_link_click_collapses() {
        let mut menu = menu("/").with_mobile(true);
        menu.link_clicked();
        assert!(menu.is_collapsed());

        let mut desktop = SiderMenu::new(Settings::default(), tree(), "/");
        desktop.link_clicked();
        assert!(!desktop.is_collapsed());
    }
}
