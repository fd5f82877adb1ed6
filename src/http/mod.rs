//! HTTP dashboard for the launch records.
//!
//! An axum server that renders the dashboard page (site dropdown, payload
//! range, pie and scatter charts as inline SVG) and exposes the two chart
//! tables as JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing (site, low, high)                        │
//! │  - HTML page / JSON serialization                         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Filter/Aggregate Engine (data::filter)                   │
//! │  - compute_pie_data / compute_scatter_data                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Dataset Store (Arc<LaunchDataset>, read-only)            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
