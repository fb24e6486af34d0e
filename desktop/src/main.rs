#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(any(feature = "desktop", test))]
use std::path::Path;
#[cfg(feature = "desktop")]
use std::path::PathBuf;

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
#[cfg(feature = "desktop")]
use dioxus::logger::tracing::{info, Level};
#[cfg(any(feature = "desktop", test))]
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use ui::core::config::ExplorerConfig;
use ui::views::Explorer;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

#[cfg(feature = "desktop")]
const CONFIG_ENV: &str = "SHOPLENS_CONFIG";
#[cfg(feature = "desktop")]
const DATA_ENV: &str = "SHOPLENS_DATA";

#[cfg(feature = "desktop")]
fn main() {
    let _ = dioxus::logger::init(Level::INFO);

    let resource_dir = resolve_resource_dir();
    let config = resolve_config(
        std::env::var(CONFIG_ENV).ok(),
        std::env::var(DATA_ENV).ok().or_else(|| std::env::args().nth(1)),
        &resource_dir,
    );
    info!(data = %config.data_source, "starting explorer");

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Shoplens – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .with_context(config)
        .launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<ExplorerConfig>();

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        Explorer { config }
    }
}

/// Config file first, then the data override. A relative data path that does not exist from the
/// working directory is looked up under the resource directory.
#[cfg(any(feature = "desktop", test))]
fn resolve_config(
    config_path: Option<String>,
    data_override: Option<String>,
    resource_dir: &Path,
) -> ExplorerConfig {
    let mut config = match config_path {
        Some(path) => ExplorerConfig::from_path(&path).unwrap_or_else(|err| {
            warn!(%path, "ignoring unreadable config: {err}");
            ExplorerConfig::default()
        }),
        None => ExplorerConfig::default(),
    };

    if let Some(data) = data_override {
        config.data_source = data;
    }

    let data_path = Path::new(&config.data_source);
    if data_path.is_relative() && !data_path.exists() {
        config.data_source = resource_dir
            .join(data_path)
            .to_string_lossy()
            .into_owned();
    }
    config
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // During `cargo run` / `dx serve` load directly from the shared ui crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_override_replaces_default_source() {
        let config = resolve_config(None, Some("/tmp/custom.csv".into()), Path::new("assets"));
        assert_eq!(config.data_source, "/tmp/custom.csv");
    }

    #[test]
    fn missing_relative_source_resolves_under_resources() {
        let config = resolve_config(None, None, Path::new("/opt/shoplens/assets"));
        assert_eq!(
            config.data_source,
            "/opt/shoplens/assets/data/shopping_behavior_updated.csv"
        );
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let config = resolve_config(
            Some("/definitely/not/here.json".into()),
            None,
            Path::new("/opt/shoplens/assets"),
        );
        assert_eq!(config.chart, ExplorerConfig::default().chart);
    }
}
