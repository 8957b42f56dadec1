use contracts::domain::a002_warehouse::Warehouse;
use contracts::projections::p900_warehouse_structure::{
    ActiveTab, DetailLevel, NodeId, NodeKind, StructureColumns, StructureFilter, SummaryRow,
    TreeNode,
};

use super::detail::{project_detail, DetailProjection};
use super::expansion::ExpansionState;
use super::filter::{filter_detail, filter_summary};
use super::summary::build_summary;
use super::tree_builder::build_tree;

/// Everything the warehouse structure screen keeps between recomputations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureViewState {
    pub active_tab: ActiveTab,
    pub selected: Option<NodeId>,
    pub expansion: ExpansionState,
    pub filter: StructureFilter,
    pub columns: StructureColumns,
}

impl StructureViewState {
    /// Initial state: summary tab, nothing selected, warehouses expanded
    pub fn new(tree: &[TreeNode]) -> Self {
        Self {
            expansion: ExpansionState::with_top_level(tree),
            ..Default::default()
        }
    }

    /// Select a node. Expansion is left as is.
    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Kind of the selected node, warehouse when nothing is selected
    pub fn selected_level(&self) -> NodeKind {
        self.selected.map_or(NodeKind::Warehouse, |id| id.kind)
    }
}

/// Derived data for one render pass
#[derive(Debug, Clone)]
pub struct StructureView<'a> {
    pub tree: Vec<TreeNode>,
    pub summary: Vec<SummaryRow>,
    pub detail: DetailProjection<'a>,
    pub filtered_summary: Vec<SummaryRow>,
    pub filtered_detail: DetailProjection<'a>,
}

impl StructureView<'_> {
    /// Level of the rows in the detail table
    pub fn detail_level(&self) -> DetailLevel {
        self.detail.level()
    }
}

/// Recompute every derived view from the snapshot: tree, summary, detail, then the filtered views
pub fn recompute<'a>(state: &StructureViewState, warehouses: &'a [Warehouse]) -> StructureView<'a> {
    let tree = build_tree(warehouses);
    let summary = build_summary(warehouses);
    let detail = project_detail(state.selected.as_ref(), warehouses);
    let filtered_summary = filter_summary(&summary, &state.filter);
    let filtered_detail = filter_detail(&detail, &state.filter);

    tracing::debug!(
        "Recomputed structure view: {} warehouses, {} of {} summary rows, {} of {} {} rows",
        tree.len(),
        filtered_summary.len(),
        summary.len(),
        filtered_detail.len(),
        detail.len(),
        detail.level()
    );

    StructureView {
        tree,
        summary,
        detail,
        filtered_summary,
        filtered_detail,
    }
}
