//! A themeable tree view for ratatui.

pub mod common;
pub mod config;
pub mod list;
pub mod props;
pub mod store;
pub mod theme;
pub mod widget;
