use dioxus::prelude::*;

use crate::domain::entities::settings::Permission;
use crate::ui::components::{table_header_cell_style, BUTTON_STYLE, CELL_STYLE, TABLE_STYLE};
use crate::ui::state::app_state::AppState;
use crate::ui::views::confirm_dialog;

/// Role and permission grid for the organizer's team. Kept in memory for
/// the session.
#[component]
pub fn SettingsView() -> Element {
    let AppState {
        mut roles,
        session,
        ..
    } = use_context::<AppState>();
    let mut new_role = use_signal(String::new);
    let mut role_error = use_signal(|| None::<String>);

    let book = roles();
    let organizer = session()
        .map(|session| session.organizer_id)
        .unwrap_or_default();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px; max-width: 900px;",
            h2 { "Account settings" }
            div { style: "color: #666;", "Signed in as organizer {organizer}" }

            table { style: TABLE_STYLE,
                thead {
                    tr {
                        th { style: "{table_header_cell_style()}", "Role" }
                        {Permission::ALL.iter().map(|permission| rsx!(
                            th { style: "{table_header_cell_style()}", "{permission.label()}" }
                        ))}
                        th { style: "{table_header_cell_style()}", "" }
                    }
                }
                tbody {
                    {book.roles().iter().map(|role| {
                        let role_name = role.name.clone();
                        let role_for_remove = role.name.clone();
                        rsx!(
                            tr {
                                td { style: CELL_STYLE, "{role.name}" }
                                {Permission::ALL.into_iter().map(|permission| {
                                    let checked = role.permissions.contains(&permission);
                                    let role_name = role_name.clone();
                                    rsx!(
                                        td { style: "{CELL_STYLE} text-align: center;",
                                            input {
                                                r#type: "checkbox",
                                                checked: checked,
                                                onclick: move |_| {
                                                    roles.write().toggle_permission(&role_name, permission);
                                                },
                                            }
                                        }
                                    )
                                })}
                                td { style: CELL_STYLE,
                                    button {
                                        style: BUTTON_STYLE,
                                        onclick: move |_| {
                                            let prompt = format!("Remove the {role_for_remove} role?");
                                            if confirm_dialog("Remove role", &prompt) {
                                                roles.write().remove_role(&role_for_remove);
                                            }
                                        },
                                        "Remove"
                                    }
                                }
                            }
                        )
                    })}
                }
            }

            div { style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px;",
                    placeholder: "New role name",
                    value: "{new_role}",
                    oninput: move |event| new_role.set(event.value()),
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let name = new_role();
                        match roles.write().add_role(&name) {
                            Ok(()) => {
                                new_role.set(String::new());
                                role_error.set(None);
                            }
                            Err(err) => role_error.set(Some(err.to_string())),
                        }
                    },
                    "Add role"
                }
                if let Some(message) = role_error() {
                    span { style: "color: #e03131;", "{message}" }
                }
            }
        }
    }
}
