pub mod api;
pub mod mock;
pub mod source;
pub mod ui;
