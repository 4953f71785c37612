use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::row::EventRow;
use crate::domain::entities::session::SessionContext;
use crate::domain::entities::settings::RoleBook;
use crate::ui::state::overlay::OverlayState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTab {
    Overview,
    Events,
    Attendees,
    Orders,
    CreateEvent,
    Settings,
}

impl NavTab {
    pub const ALL: [NavTab; 6] = [
        NavTab::Overview,
        NavTab::Events,
        NavTab::Attendees,
        NavTab::Orders,
        NavTab::CreateEvent,
        NavTab::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavTab::Overview => "Dashboard",
            NavTab::Events => "Events",
            NavTab::Attendees => "Attendees",
            NavTab::Orders => "Orders",
            NavTab::CreateEvent => "Create Event",
            NavTab::Settings => "Settings",
        }
    }
}

/// Shell-level state shared with every view through the context. Each
/// table view keeps its own controller so filters end with the view.
#[derive(Clone, Copy)]
pub struct AppState {
    pub active_tab: Signal<NavTab>,
    pub overlay: Signal<OverlayState>,
    /// Screen position where the open overlay is drawn.
    pub anchor: Signal<Option<(f64, f64)>>,
    pub session: Signal<Option<SessionContext>>,
    pub roles: Signal<RoleBook>,
    pub editing_event: Signal<Option<EventRow>>,
}

impl AppState {
    pub fn new(initial_session: Option<SessionContext>) -> Self {
        Self {
            active_tab: use_signal(|| NavTab::Overview),
            overlay: use_signal(OverlayState::default),
            anchor: use_signal(|| None::<(f64, f64)>),
            session: use_signal(move || initial_session),
            roles: use_signal(RoleBook::default),
            editing_event: use_signal(|| None::<EventRow>),
        }
    }
}
