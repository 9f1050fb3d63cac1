//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::debounce::DEFAULT_RESIZE_DEBOUNCE;

/// Sidebar colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTheme {
    #[default]
    Dark,
    Light,
}

impl FromStr for NavTheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(NavTheme::Dark),
            "light" => Ok(NavTheme::Light),
            other => bail!("unknown nav theme '{other}', expected 'dark' or 'light'"),
        }
    }
}

impl fmt::Display for NavTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavTheme::Dark => "dark",
            NavTheme::Light => "light",
        })
    }
}

/// Menu layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuMode {
    #[default]
    Inline,
    Horizontal,
}

impl FromStr for MenuMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inline" => Ok(MenuMode::Inline),
            "horizontal" => Ok(MenuMode::Horizontal),
            other => bail!("unknown menu mode '{other}', expected 'inline' or 'horizontal'"),
        }
    }
}

impl fmt::Display for MenuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuMode::Inline => "inline",
            MenuMode::Horizontal => "horizontal",
        })
    }
}

/// Sidebar configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Menu definition file (default: ./menu.yml).
    pub menu_file: PathBuf,

    /// Colour scheme (default: dark).
    pub nav_theme: NavTheme,

    /// Layout mode (default: inline).
    pub mode: MenuMode,

    /// Whether the sidebar is pinned while the page scrolls (default: false).
    pub fix_sidebar: bool,

    /// Title shown next to the logo.
    pub title: Option<String>,

    /// Logo image URL.
    pub logo: Option<String>,

    /// Quiet period before a resize notification fires (default: 600ms).
    pub resize_debounce: Duration,

    /// Directory of template overrides.
    pub templates_dir: Option<PathBuf>,

    /// Role that sees every entry (default: admin).
    pub admin_role: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu_file: PathBuf::from("./menu.yml"),
            nav_theme: NavTheme::default(),
            mode: MenuMode::default(),
            fix_sidebar: false,
            title: None,
            logo: None,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            templates_dir: None,
            admin_role: "admin".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let menu_file = lookup("SIDEMENU_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.menu_file);

        let nav_theme = lookup("SIDEMENU_NAV_THEME")
            .map(|v| v.parse::<NavTheme>())
            .transpose()
            .context("SIDEMENU_NAV_THEME is invalid")?
            .unwrap_or(defaults.nav_theme);

        let mode = lookup("SIDEMENU_MODE")
            .map(|v| v.parse::<MenuMode>())
            .transpose()
            .context("SIDEMENU_MODE is invalid")?
            .unwrap_or(defaults.mode);

        let fix_sidebar = lookup("SIDEMENU_FIX_SIDEBAR")
            .map(|v| parse_bool(&v))
            .transpose()
            .context("SIDEMENU_FIX_SIDEBAR must be a boolean")?
            .unwrap_or(defaults.fix_sidebar);

        let title = lookup("SIDEMENU_TITLE").filter(|s| !s.trim().is_empty());
        let logo = lookup("SIDEMENU_LOGO").filter(|s| !s.trim().is_empty());

        let resize_debounce = lookup("SIDEMENU_RESIZE_DEBOUNCE_MS")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("SIDEMENU_RESIZE_DEBOUNCE_MS must be a valid u64")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.resize_debounce);

        let templates_dir = lookup("SIDEMENU_TEMPLATES_DIR").map(PathBuf::from);

        let admin_role = lookup("SIDEMENU_ADMIN_ROLE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.admin_role);

        Ok(Self {
            menu_file,
            nav_theme,
            mode,
            fix_sidebar,
            title,
            logo,
            resize_debounce,
            templates_dir,
            admin_role,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.menu_file, PathBuf::from("./menu.yml"));
        assert_eq!(settings.nav_theme, NavTheme::Dark);
        assert_eq!(settings.mode, MenuMode::Inline);
        assert!(!settings.fix_sidebar);
        assert_eq!(settings.resize_debounce, Duration::from_millis(600));
        assert_eq!(settings.admin_role, "admin");
        assert!(settings.title.is_none());
    }

    #[test]
    fn reads_overrides() {
        let settings = settings(&[
            ("SIDEMENU_FILE", "/etc/menu.toml"),
            ("SIDEMENU_NAV_THEME", "Light"),
            ("SIDEMENU_MODE", "horizontal"),
            ("SIDEMENU_FIX_SIDEBAR", "yes"),
            ("SIDEMENU_TITLE", "CHS-DRG"),
            ("SIDEMENU_RESIZE_DEBOUNCE_MS", "250"),
            ("SIDEMENU_ADMIN_ROLE", "root"),
        ])
        .unwrap();
        assert_eq!(settings.menu_file, PathBuf::from("/etc/menu.toml"));
        assert_eq!(settings.nav_theme, NavTheme::Light);
        assert_eq!(settings.mode, MenuMode::Horizontal);
        assert!(settings.fix_sidebar);
        assert_eq!(settings.title.as_deref(), Some("CHS-DRG"));
        assert_eq!(settings.resize_debounce, Duration::from_millis(250));
        assert_eq!(settings.admin_role, "root");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("SIDEMENU_NAV_THEME", "neon")]).is_err());
        assert!(settings(&[("SIDEMENU_FIX_SIDEBAR", "maybe")]).is_err());
        assert!(settings(&[("SIDEMENU_RESIZE_DEBOUNCE_MS", "-1")]).is_err());
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(NavTheme::Light.to_string().parse::<NavTheme>().unwrap(), NavTheme::Light);
        assert_eq!(MenuMode::Horizontal.to_string(), "horizontal");
    }
}
