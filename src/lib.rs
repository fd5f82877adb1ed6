//! SpaceX launch records dashboard.
//!
//! The launch table is loaded once into an immutable [`data::model::LaunchDataset`];
//! both front ends (the HTTP dashboard and the desktop window) derive their
//! charts from it through the pure functions in [`data::filter`].

pub mod color;
pub mod config;
pub mod data;

#[cfg(feature = "http-server")]
pub mod http;
