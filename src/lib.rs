pub mod app;
pub mod catalog;
pub mod config;
pub mod persistence;
pub mod selection;
pub mod shared;
pub mod tui;
pub mod wizard;
