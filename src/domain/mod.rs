pub mod calendar;
pub mod entities;
pub mod summary;
