//! Trigger enrichment, freshness, reset and rendering.
//!
//! Every function takes the Storage API as an explicit `&impl StorageApi`;
//! nothing here keeps state between invocations.

pub mod enrich;
pub mod freshness;
pub mod report;
pub mod reset;
pub mod selection;
pub mod views;

pub use enrich::{enrich_all, resolved, EnrichedTrigger};
pub use report::{report_rows, REPORT_COLUMNS, REPORT_PRIMARY_KEY};
pub use reset::{reset_all, ResetError};
pub use selection::Selection;
pub use views::{flow_detail_markdown, flow_select_elements};
