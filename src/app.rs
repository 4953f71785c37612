use std::sync::Arc;

use anyhow::{Context, Result};
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::default_export_dir;
use crate::domain::entities::session::SessionContext;
use crate::infra::rest::client::RestBackend;
use crate::ui::components::BUTTON_STYLE;
use crate::ui::state::app_state::{AppState, NavTab};
use crate::ui::views::attendees::AttendeesView;
use crate::ui::views::create_event::CreateEventView;
use crate::ui::views::events::EventsView;
use crate::ui::views::orders::OrdersView;
use crate::ui::views::overview::OverviewView;
use crate::ui::views::settings::SettingsView;
use crate::usecase::services::Services;

fn bootstrap() -> Result<(Services, Option<SessionContext>)> {
    let config = AppConfig::from_env().context("invalid dashboard configuration")?;
    let backend = RestBackend::new(&config).context("failed to build http client")?;
    let export_dir = default_export_dir()?;
    tracing::info!(
        api_url = %config.api_url,
        export_dir = %export_dir.display(),
        "dashboard configured"
    );
    let services = Services::new(Arc::new(backend), export_dir, config.banner_ttl);
    let session = config.organizer_id.and_then(SessionContext::new);
    Ok((services, session))
}

pub fn root_container_style() -> String {
    "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif; background: #f8f9fa;"
        .to_string()
}

#[component]
pub fn App() -> Element {
    let ready = use_hook(|| bootstrap().map_err(|err| format!("{err:#}")));
    let (services, initial_session) = match ready {
        Ok(ready) => ready,
        Err(message) => {
            tracing::error!(error = %message, "dashboard failed to start");
            return rsx! {
                div {
                    p { "Unable to start the dashboard: {message}" }
                }
            };
        }
    };

    use_context_provider(|| services);
    let app_state = AppState::new(initial_session);
    use_context_provider(|| app_state);

    let AppState {
        mut active_tab,
        mut overlay,
        mut session,
        mut editing_event,
        ..
    } = app_state;

    let current_tab = active_tab();
    let signed_in = session();

    rsx! {
        div {
            style: "{root_container_style()}",
            onclick: move |_| overlay.write().close(),

            div { style: "display: flex; align-items: center; gap: 6px; padding: 8px 16px; border-bottom: 1px solid #ddd; background: #fff;",
                span { style: "font-weight: 700; margin-right: 16px;", "Organizer Dashboard" }
                {NavTab::ALL.into_iter().map(|tab| {
                    let background = if tab == current_tab { "#eef4ff" } else { "#fff" };
                    rsx!(
                        button {
                            style: "border: 1px solid #bbb; background: {background}; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                            disabled: signed_in.is_none(),
                            onclick: move |_| {
                                overlay.write().close();
                                editing_event.set(None);
                                active_tab.set(tab);
                            },
                            "{tab.label()}"
                        }
                    )
                })}
                div { style: "flex: 1;" }
                if let Some(current) = signed_in.clone() {
                    span { style: "color: #666;", "Organizer {current.organizer_id}" }
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            tracing::info!("signed out");
                            editing_event.set(None);
                            session.set(None);
                        },
                        "Switch organizer"
                    }
                }
            }

            div { style: "flex: 1; min-height: 0; overflow: auto; padding: 16px;",
                if signed_in.is_none() {
                    SignIn {}
                } else {
                    {match current_tab {
                        NavTab::Overview => rsx! { OverviewView {} },
                        NavTab::Events => rsx! { EventsView {} },
                        NavTab::Attendees => rsx! { AttendeesView {} },
                        NavTab::Orders => rsx! { OrdersView {} },
                        NavTab::CreateEvent => rsx! { CreateEventView {} },
                        NavTab::Settings => rsx! { SettingsView {} },
                    }}
                }
            }
        }
    }
}

#[component]
fn SignIn() -> Element {
    let AppState {
        mut session,
        mut active_tab,
        ..
    } = use_context::<AppState>();
    let mut organizer_input = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    rsx! {
        div { style: "max-width: 360px; margin: 48px auto; display: flex; flex-direction: column; gap: 8px; background: #fff; padding: 16px; border: 1px solid #ddd; border-radius: 8px;",
            h3 { "Sign in" }
            span { style: "color: #666;", "Enter your organizer id to load your events." }
            input {
                style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px;",
                placeholder: "Organizer id",
                value: "{organizer_input}",
                oninput: move |event| organizer_input.set(event.value()),
            }
            button {
                style: BUTTON_STYLE,
                onclick: move |_| match SessionContext::new(organizer_input()) {
                    Some(context) => {
                        tracing::info!(organizer_id = %context.organizer_id, "signed in");
                        error.set(None);
                        active_tab.set(NavTab::Overview);
                        session.set(Some(context));
                    }
                    None => error.set(Some("Organizer id is required".to_string())),
                },
                "Continue"
            }
            if let Some(message) = error() {
                span { style: "color: #e03131;", "{message}" }
            }
        }
    }
}
