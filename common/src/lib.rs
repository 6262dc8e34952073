//! Shared building blocks for the hackathon admin dashboard.
//!
//! Everything in here compiles for both the actix backend and the yew front end:
//! the dynamic row model, the CSV codec, grid edit tracking, the CSV importer and
//! exporter, the [`store::RowStore`] capability both sides implement, and the
//! dashboard aggregations (statistics and map locations).

pub mod csv;
pub mod export;
pub mod grid;
pub mod import;
pub mod map;
pub mod model;
pub mod requests;
pub mod stats;
pub mod store;
