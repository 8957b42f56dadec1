use contracts::domain::a002_warehouse::{Location, Warehouse, Zone};
use contracts::projections::p900_warehouse_structure::{NodeData, NodeId, TreeNode};

/// Build the warehouse → zone → location tree.
///
/// One root per warehouse in input order, children in the order they appear on their
/// parent. Nesting decides ownership: back-reference codes on zones/locations are not
/// consulted.
pub fn build_tree(warehouses: &[Warehouse]) -> Vec<TreeNode> {
    warehouses.iter().map(warehouse_node).collect()
}

pub fn warehouse_node(warehouse: &Warehouse) -> TreeNode {
    TreeNode {
        id: NodeId::warehouse(warehouse.base.id.value()),
        code: warehouse.base.code.clone(),
        name: warehouse.base.name.clone(),
        status: warehouse.base.status,
        data: NodeData::Warehouse {
            branch_code: warehouse.branch_code.clone(),
            branch_name: warehouse.branch_name.clone(),
            address: warehouse.address.clone(),
            manager: warehouse.manager.clone(),
        },
        children: warehouse
            .zones
            .iter()
            .map(|zone| zone_node(warehouse, zone))
            .collect(),
    }
}

pub fn zone_node(warehouse: &Warehouse, zone: &Zone) -> TreeNode {
    TreeNode {
        id: NodeId::zone(zone.base.id.value()),
        code: zone.base.code.clone(),
        name: zone.base.name.clone(),
        status: zone.base.status,
        data: NodeData::Zone {
            warehouse_code: warehouse.base.code.clone(),
            warehouse_name: warehouse.base.name.clone(),
        },
        children: zone
            .locations
            .iter()
            .map(|location| location_node(warehouse, zone, location))
            .collect(),
    }
}

pub fn location_node(warehouse: &Warehouse, zone: &Zone, location: &Location) -> TreeNode {
    TreeNode {
        id: NodeId::location(location.base.id.value()),
        code: location.base.code.clone(),
        name: location.base.name.clone(),
        status: location.base.status,
        data: NodeData::Location {
            warehouse_code: warehouse.base.code.clone(),
            warehouse_name: warehouse.base.name.clone(),
            zone_code: zone.base.code.clone(),
            zone_name: zone.base.name.clone(),
            capacity: location.capacity.clone(),
        },
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::fixtures::{console_sample, wh01_scenario};
    use contracts::projections::p900_warehouse_structure::NodeKind;
    use std::collections::HashSet;

    fn collect_ids(nodes: &[TreeNode], out: &mut Vec<NodeId>) {
        for node in nodes {
            out.push(node.id);
            collect_ids(&node.children, out);
        }
    }

    #[test]
    fn test_structure_mirrors_snapshot() {
        let warehouses = console_sample();
        let tree = build_tree(&warehouses);

        assert_eq!(tree.len(), warehouses.len());
        for (node, wh) in tree.iter().zip(&warehouses) {
            assert_eq!(node.children.len(), wh.zones.len());
            for (zone_node, zone) in node.children.iter().zip(&wh.zones) {
                assert_eq!(zone_node.children.len(), zone.locations.len());
                assert!(zone_node.children.iter().all(|l| l.children.is_empty()));
            }
        }
    }

    #[test]
    fn test_ids_unique_and_deterministic() {
        let warehouses = console_sample();
        let mut first = Vec::new();
        collect_ids(&build_tree(&warehouses), &mut first);
        let mut second = Vec::new();
        collect_ids(&build_tree(&warehouses), &mut second);

        assert_eq!(first, second);
        let unique: HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), first.len());
        assert_eq!(first[0].to_string(), "warehouse-1");
        assert_eq!(first[1].to_string(), "zone-1");
        assert_eq!(first[2].to_string(), "location-1");
    }

    #[test]
    fn test_children_keep_input_order() {
        let tree = build_tree(&console_sample());
        let bins: Vec<&str> = tree[0].children[0]
            .children
            .iter()
            .map(|n| n.code.as_str())
            .collect();
        assert_eq!(bins, ["A-01-01", "A-01-02", "A-02-01"]);
        assert_eq!(tree[1].code, "WH-002");
    }

    #[test]
    fn test_location_carries_ancestor_context() {
        let tree = build_tree(&console_sample());
        let location = tree[1].find(&NodeId::location(6)).unwrap();
        assert_eq!(location.kind(), NodeKind::Location);
        assert_eq!(
            location.data,
            NodeData::Location {
                warehouse_code: "WH-002".into(),
                warehouse_name: "North Warehouse".into(),
                zone_code: "C".into(),
                zone_name: "Zone C - General".into(),
                capacity: "300 units".into(),
            }
        );

        let zone = tree[0].find(&NodeId::zone(2)).unwrap();
        assert!(matches!(
            &zone.data,
            NodeData::Zone { warehouse_name, .. } if warehouse_name == "Main Warehouse"
        ));
    }

    #[test]
    fn test_empty_levels_have_empty_children() {
        let mut warehouses = wh01_scenario();
        warehouses[0].zones[1].locations.clear();
        let tree = build_tree(&warehouses);
        assert!(tree[0].children[1].children.is_empty());

        warehouses[0].zones.clear();
        assert!(build_tree(&warehouses)[0].children.is_empty());
        assert!(build_tree(&[]).is_empty());
    }
}
