//! Warehouse structure screen: warehouse → zone → location tree and the views derived from it.
//!
//! The view functions are pure computations over a warehouse snapshot. Derived values are
//! recomputed on each call and never cached; only `form::save` writes to the store.

pub mod detail;
pub mod expansion;
pub mod export;
pub mod filter;
pub mod form;
pub mod summary;
pub mod tree_builder;
pub mod view_fields;
pub mod view_state;

#[cfg(test)]
pub(crate) mod fixtures;

pub use detail::{project_detail, DetailProjection, LocationRow, ZoneRow};
pub use expansion::{visible_rows, ExpansionState, VisibleNode};
pub use export::{active_tab_csv, detail_csv, summary_csv};
pub use filter::{filter_detail, filter_summary};
pub use form::{draft_for_create, draft_for_edit, FormDraft};
pub use summary::build_summary;
pub use tree_builder::build_tree;
pub use view_fields::{view_fields, ViewField, ViewValue};
pub use view_state::{recompute, StructureView, StructureViewState};
