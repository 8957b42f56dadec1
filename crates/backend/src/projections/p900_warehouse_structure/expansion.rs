use contracts::projections::p900_warehouse_structure::{NodeId, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which tree nodes currently show their children. Independent of selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: BTreeSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every warehouse (root) node expanded, the default on first render
    pub fn with_top_level(tree: &[TreeNode]) -> Self {
        Self {
            expanded: tree.iter().map(|node| node.id).collect(),
        }
    }

    /// Flip the node and return whether it is expanded now
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// One rendered row of the tree
#[derive(Debug, Clone, Copy)]
pub struct VisibleNode<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
    pub expanded: bool,
}

impl VisibleNode<'_> {
    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }
}

/// Depth-first list of rows to render: all roots, children only under expanded nodes
pub fn visible_rows<'a>(tree: &'a [TreeNode], expansion: &ExpansionState) -> Vec<VisibleNode<'a>> {
    fn walk<'a>(
        nodes: &'a [TreeNode],
        depth: usize,
        expansion: &ExpansionState,
        out: &mut Vec<VisibleNode<'a>>,
    ) {
        for node in nodes {
            let expanded = expansion.is_expanded(&node.id);
            out.push(VisibleNode { node, depth, expanded });
            if expanded {
                walk(&node.children, depth + 1, expansion, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(tree, 0, expansion, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::fixtures::console_sample;
    use super::super::tree_builder::build_tree;

    fn ids(rows: &[VisibleNode]) -> Vec<String> {
        rows.iter().map(|r| r.node.id.to_string()).collect()
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut state = ExpansionState::new();
        let id = NodeId::zone(2);
        assert!(state.toggle(id));
        assert!(state.is_expanded(&id));
        assert!(!state.toggle(id));
        assert_eq!(state, ExpansionState::new());
    }

    #[test]
    fn test_toggle_leaves_other_nodes_alone() {
        let mut state = ExpansionState::new();
        state.expand(NodeId::warehouse(1));
        state.toggle(NodeId::zone(1));
        state.toggle(NodeId::zone(1));
        assert!(state.is_expanded(&NodeId::warehouse(1)));
        assert_eq!(state.len(), 1);

        state.collapse(NodeId::warehouse(1));
        state.collapse(NodeId::warehouse(1));
        assert!(state.is_empty());
    }

    #[test]
    fn test_collapsed_tree_shows_roots_only() {
        let tree = build_tree(&console_sample());
        let rows = visible_rows(&tree, &ExpansionState::new());
        assert_eq!(ids(&rows), ["warehouse-1", "warehouse-2"]);
        assert!(rows.iter().all(|r| r.depth == 0 && !r.expanded && r.has_children()));
    }

    #[test]
    fn test_top_level_expansion_shows_zones() {
        let tree = build_tree(&console_sample());
        let state = ExpansionState::with_top_level(&tree);
        let rows = visible_rows(&tree, &state);
        assert_eq!(
            ids(&rows),
            ["warehouse-1", "zone-1", "zone-2", "warehouse-2", "zone-3"]
        );
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn test_children_hidden_under_collapsed_parent() {
        let tree = build_tree(&console_sample());
        let mut state = ExpansionState::new();
        // Zone B expanded but its warehouse collapsed: bins stay hidden
        state.expand(NodeId::zone(2));
        assert_eq!(visible_rows(&tree, &state).len(), 2);

        state.expand(NodeId::warehouse(1));
        let rows = visible_rows(&tree, &state);
        assert_eq!(
            ids(&rows),
            ["warehouse-1", "zone-1", "zone-2", "location-4", "location-5", "warehouse-2"]
        );
        assert_eq!(rows[3].depth, 2);
        assert!(!rows[3].has_children());
    }

    #[test]
    fn test_unknown_ids_are_harmless() {
        let tree = build_tree(&console_sample());
        let mut state = ExpansionState::new();
        state.expand(NodeId::warehouse(99));
        assert_eq!(visible_rows(&tree, &state).len(), 2);
    }
}
