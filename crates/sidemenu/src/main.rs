//! sidemenu command line
//!
//! Loads a menu file and prints the sidebar for a given pathname as HTML,
//! as a JSON view, or as the raw key matching used to derive it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sidemenu::menu::{match_all, url_to_list};
use sidemenu::{
    MenuEntry, MenuMode, NavTheme, RoleAuthorizer, Settings, SidebarTheme, SiderMenu, format_menu,
    load_menu,
};

#[derive(Debug, Parser)]
#[command(name = "sidemenu", version, about = "Render a sidebar menu for a URL")]
struct Cli {
    /// Menu file (.yml, .yaml, .json or .toml). Defaults to SIDEMENU_FILE.
    #[arg(long, global = true)]
    menu: Option<PathBuf>,

    /// Current pathname.
    #[arg(long, global = true, default_value = "/")]
    path: String,

    /// Role held by the current user; repeat for several.
    #[arg(long = "role", global = true)]
    roles: Vec<String>,

    /// Render the sidebar collapsed.
    #[arg(long, global = true)]
    collapsed: bool,

    /// Mobile layout: internal links collapse the sidebar.
    #[arg(long, global = true)]
    mobile: bool,

    /// Branch keys opened by hand, in the order they were opened.
    #[arg(long = "open", global = true)]
    open: Vec<String>,

    /// Colour scheme override (dark or light).
    #[arg(long, global = true)]
    theme: Option<NavTheme>,

    /// Layout override (inline or horizontal).
    #[arg(long, global = true)]
    mode: Option<MenuMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sidebar as HTML.
    Render {
        /// Directory of template overrides. Defaults to SIDEMENU_TEMPLATES_DIR.
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    /// Print the derived view as JSON.
    View,
    /// Print the flattened keys and how they match the pathname.
    Keys,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut settings = Settings::from_env().context("failed to load configuration")?;
    if let Some(menu) = &cli.menu {
        settings.menu_file = menu.clone();
    }
    if let Some(theme) = cli.theme {
        settings.nav_theme = theme;
    }
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }

    let raw = load_menu(&settings.menu_file)
        .with_context(|| format!("failed to load menu from {}", settings.menu_file.display()))?;
    let tree: Arc<[MenuEntry]> = format_menu(&raw).into();
    info!(
        file = %settings.menu_file.display(),
        entries = tree.len(),
        "menu loaded"
    );

    match cli.command {
        Command::Keys => print_keys(&tree, &cli.path),
        Command::View => {
            let menu = build_menu(settings, tree, &cli);
            let json = serde_json::to_string_pretty(&menu.view()).context("failed to encode view")?;
            println!("{json}");
            Ok(())
        }
        Command::Render { ref templates } => {
            let templates = templates.clone().or_else(|| settings.templates_dir.clone());
            let theme = match &templates {
                Some(dir) => SidebarTheme::with_template_dir(dir)
                    .with_context(|| format!("failed to load templates from {}", dir.display()))?,
                None => SidebarTheme::new().context("failed to load built-in templates")?,
            };
            let menu = build_menu(settings, tree, &cli);
            let html = theme.render(&menu.view()).context("failed to render sidebar")?;
            println!("{html}");
            Ok(())
        }
    }
}

fn build_menu(settings: Settings, tree: Arc<[MenuEntry]>, cli: &Cli) -> SiderMenu {
    let authorizer = RoleAuthorizer::new(cli.roles.iter().cloned())
        .with_admin_role(settings.admin_role.clone());

    let mut menu = SiderMenu::new(settings, tree, cli.path.clone())
        .with_authorized(authorizer)
        .with_mobile(cli.mobile)
        .with_collapsed(cli.collapsed);

    if !cli.open.is_empty() {
        menu.handle_open_change(cli.open.clone());
    }
    menu
}

fn print_keys(tree: &[MenuEntry], pathname: &str) -> Result<()> {
    let flat = sidemenu::FlatMenuKeys::from_tree(tree);
    let segments = url_to_list(pathname);
    let matches = match_all(flat.keys(), &segments);

    let report = serde_json::json!({
        "flat_keys": flat.keys(),
        "segments": segments,
        "matches": matches,
        "keys_for_url": flat.keys_for_url(pathname),
    });
    let json = serde_json::to_string_pretty(&report).context("failed to encode keys")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
