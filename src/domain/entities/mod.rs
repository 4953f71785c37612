pub mod form;
pub mod query;
pub mod record;
pub mod row;
pub mod session;
pub mod settings;
