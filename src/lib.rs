//! Nursery-school availability map.
//!
//! - [`data`]: CSV parsing, the record model and filter predicates
//! - [`state`]: filter criteria, favorites and selection driving the views
//! - [`favorites`] / [`storage`]: bookmarks persisted to a local key-value store
//! - [`ui`] / [`app`]: the egui front end

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod favorites;
pub mod state;
pub mod storage;
pub mod ui;
