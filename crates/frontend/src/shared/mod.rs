pub mod config;
pub mod infinite_list;
