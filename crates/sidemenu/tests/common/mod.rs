#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Shared fixtures for integration tests.
//!
//! The fixtures go through the same loading and formatting path as the
//! binary, so tests exercise real configuration handling.

#![allow(dead_code)]

use std::sync::Arc;

use sidemenu::menu::{MenuFormat, parse_menu};
use sidemenu::{MenuEntry, Settings, SiderMenu, format_menu};

/// An admin dashboard menu in the shape configuration files use.
pub const ADMIN_MENU_YAML: &str = r#"
- path: dashboard
  name: Dashboard
  icon: dashboard
  children:
    - path: analysis
      name: Analysis
    - path: workplace
      name: Workplace
- path: sales
  name: Sales
  icon: https://cdn.example.com/sales.png
  children:
    - path: report
      name: Report
      children:
        - path: ":id"
          name: Report Detail
          hideInMenu: true
    - path: orders
      name: Orders
      hideChildrenInMenu: true
      children:
        - path: ":orderId"
          name: Order
- path: system
  name: System
  authority: admin
  children:
    - path: users
      name: Users
    - path: audit
      name: Audit
      authority: [auditor, admin]
- path: login
  hideInMenu: true
- path: https://help.example.com
  name: Help
  target: _blank
"#;

/// The admin menu, parsed but not formatted.
pub fn raw_admin_menu() -> Vec<MenuEntry> {
    parse_menu(ADMIN_MENU_YAML, MenuFormat::Yaml).expect("fixture menu parses")
}

/// The admin menu, formatted and ready for a controller.
pub fn admin_menu() -> Arc<[MenuEntry]> {
    format_menu(&raw_admin_menu()).into()
}

/// A controller over the admin menu at `pathname`.
pub fn admin_sider(pathname: &str) -> SiderMenu {
    SiderMenu::new(Settings::default(), admin_menu(), pathname)
}
