pub mod attendees;
pub mod create_event;
pub mod events;
pub mod orders;
pub mod overview;
pub mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use dioxus::core::Task;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::entities::row::{ListRow, RowUpdate};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::{BUTTON_STYLE, MODAL_BACKDROP_STYLE, MODAL_STYLE};
use crate::ui::state::list_view::{BannerKind, ListViewController};
use crate::usecase::pipeline::adapter::Adapted;
use crate::usecase::ports::backend::BackendError;
use crate::usecase::services::Services;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Cancels the previous fetch task of the view, if any, and starts a new
/// one under a fresh ticket.
pub fn start_fetch<R, F>(
    mut controller: Signal<ListViewController<R>>,
    mut fetch_task: Signal<Option<Task>>,
    load: F,
) where
    R: ListRow + Send + 'static,
    F: FnOnce() -> Result<Adapted<R>, BackendError> + Send + 'static,
{
    if let Some(task) = fetch_task.write().take() {
        task.cancel();
    }
    let ticket = controller.write().begin_fetch();
    let task = spawn(async move {
        let result = run_blocking(load).await;
        controller.write().finish_fetch(ticket, result);
    });
    fetch_task.set(Some(task));
}

/// Clears the banner once its time is up. A newer banner replaces the
/// pending timer.
pub fn schedule_banner_expiry<R: ListRow + 'static>(
    mut controller: Signal<ListViewController<R>>,
    mut banner_task: Signal<Option<Task>>,
) {
    if let Some(task) = banner_task.write().take() {
        task.cancel();
    }
    let ttl = controller.peek().banner_ttl();
    let task = spawn(async move {
        tokio::time::sleep(ttl).await;
        controller.write().expire_banner(Instant::now());
    });
    banner_task.set(Some(task));
}

pub fn run_row_action<R, F>(
    mut controller: Signal<ListViewController<R>>,
    banner_task: Signal<Option<Task>>,
    id: String,
    success_message: String,
    action: F,
) where
    R: ListRow + Send + 'static,
    F: FnOnce() -> Result<RowUpdate<R>, BackendError> + Send + 'static,
{
    spawn(async move {
        let result = run_blocking(action).await;
        controller
            .write()
            .apply_action(&id, result, &success_message, Instant::now());
        schedule_banner_expiry(controller, banner_task);
    });
}

/// Stops the view's outstanding fetch and banner timer when it unmounts.
pub fn use_task_cleanup(fetch_task: Signal<Option<Task>>, banner_task: Signal<Option<Task>>) {
    use_drop(move || {
        if let Some(task) = *fetch_task.peek() {
            task.cancel();
        }
        if let Some(task) = *banner_task.peek() {
            task.cancel();
        }
    });
}

pub fn confirm_dialog(title: &str, description: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

/// Asks where to save and writes every filtered row. `Ok(None)` means the
/// dialog was dismissed.
pub fn export_with_dialog<R: ListRow>(
    services: &Services,
    view: &str,
    rows: &[R],
) -> Result<Option<(PathBuf, usize)>> {
    let suggested = services.export.default_path(view, today());
    let file_name = suggested
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("export.csv")
        .to_string();
    let Some(path) = FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_directory(services.export.export_dir())
        .set_file_name(file_name)
        .save_file()
    else {
        return Ok(None);
    };
    let written = services.export.export_csv(&path, rows)?;
    Ok(Some((path, written)))
}

/// Runs the export dialog and reports the outcome on the view's banner.
pub fn export_into_banner<R: ListRow + 'static>(
    services: &Services,
    view: &str,
    mut controller: Signal<ListViewController<R>>,
    banner_task: Signal<Option<Task>>,
) {
    let rows = controller.read().arranged().to_vec();
    let outcome = export_with_dialog(services, view, &rows);
    let mut state = controller.write();
    state.close_export();
    match outcome {
        Ok(Some((path, written))) => state.show_banner(
            BannerKind::Success,
            &format!("Exported {written} rows to {}", path.display()),
            Instant::now(),
        ),
        Ok(None) => return,
        Err(err) => {
            tracing::warn!(error = %err, view, "export failed");
            state.show_banner(
                BannerKind::Error,
                &format!("Export failed: {err:#}"),
                Instant::now(),
            );
        }
    }
    drop(state);
    schedule_banner_expiry(controller, banner_task);
}

#[component]
pub fn ExportModal(row_count: usize, on_export: EventHandler<()>, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_STYLE,
                div { style: "margin-bottom: 8px; font-weight: 600;", "Export" }
                div { style: "margin-bottom: 12px;",
                    "{row_count} rows match the current filters and will be written to a CSV file."
                }
                div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                    button { style: BUTTON_STYLE, onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        style: BUTTON_STYLE,
                        disabled: row_count == 0,
                        onclick: move |_| on_export.call(()),
                        "Export CSV"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    confirm_label: &'static str,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_STYLE,
                div { style: "margin-bottom: 8px; font-weight: 600;", "{title}" }
                div { style: "margin-bottom: 12px;", "{message}" }
                div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                    button { style: BUTTON_STYLE, onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        style: "border: 1px solid #e03131; background: #fff5f5; color: #e03131; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
