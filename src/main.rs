mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

const fn page_size(rows: usize) -> NonZeroUsize {
    match NonZeroUsize::new(rows) {
        Some(size) => size,
        None => panic!("page size must be positive"),
    }
}

pub const EVENTS_PAGE_SIZE: NonZeroUsize = page_size(9);
pub const ATTENDEES_PAGE_SIZE: NonZeroUsize = page_size(9);
pub const ORDERS_PAGE_SIZE: NonZeroUsize = page_size(6);
/// Dropdown value meaning "no association filter".
pub const ALL_OPTION_VALUE: &str = "__all__";

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "organizer_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title("Organizer Dashboard"),
                )
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "eventhub", "organizer-dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Where CSV exports are suggested by default. Created lazily on first
/// export.
pub fn default_export_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("exports"))
}
