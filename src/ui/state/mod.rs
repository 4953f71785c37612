pub mod app_state;
pub mod list_view;
pub mod overlay;
