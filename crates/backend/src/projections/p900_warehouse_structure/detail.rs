use contracts::domain::a002_warehouse::{Location, LocationId, Warehouse, Zone, ZoneId};
use contracts::projections::p900_warehouse_structure::{DetailLevel, NodeId, NodeKind, TreeNode};

use super::tree_builder::{location_node, warehouse_node, zone_node};

/// Zone row of the detail table with its owning warehouse
#[derive(Debug, Clone, Copy)]
pub struct ZoneRow<'a> {
    pub warehouse: &'a Warehouse,
    pub zone: &'a Zone,
}

/// Location row of the detail table with its owning warehouse and zone
#[derive(Debug, Clone, Copy)]
pub struct LocationRow<'a> {
    pub warehouse: &'a Warehouse,
    pub zone: &'a Zone,
    pub location: &'a Location,
}

/// Rows of the detail table. The variant is the table level (`selectedLevel`).
#[derive(Debug, Clone)]
pub enum DetailProjection<'a> {
    Warehouses(Vec<&'a Warehouse>),
    Zones(Vec<ZoneRow<'a>>),
    Locations(Vec<LocationRow<'a>>),
}

impl<'a> DetailProjection<'a> {
    pub fn level(&self) -> DetailLevel {
        match self {
            DetailProjection::Warehouses(_) => NodeKind::Warehouse,
            DetailProjection::Zones(_) => NodeKind::Zone,
            DetailProjection::Locations(_) => NodeKind::Location,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DetailProjection::Warehouses(rows) => rows.len(),
            DetailProjection::Zones(rows) => rows.len(),
            DetailProjection::Locations(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty(level: DetailLevel) -> Self {
        match level {
            NodeKind::Warehouse => DetailProjection::Warehouses(Vec::new()),
            NodeKind::Zone => DetailProjection::Zones(Vec::new()),
            NodeKind::Location => DetailProjection::Locations(Vec::new()),
        }
    }

    /// Tree-node form of each row (used by the record view sheet)
    pub fn nodes(&self) -> Vec<TreeNode> {
        match self {
            DetailProjection::Warehouses(rows) => rows.iter().map(|w| warehouse_node(w)).collect(),
            DetailProjection::Zones(rows) => {
                rows.iter().map(|r| zone_node(r.warehouse, r.zone)).collect()
            }
            DetailProjection::Locations(rows) => rows
                .iter()
                .map(|r| location_node(r.warehouse, r.zone, r.location))
                .collect(),
        }
    }
}

/// Project the detail table for the selected node.
///
/// - nothing selected: all warehouses
/// - warehouse: its zones
/// - zone: its locations
/// - location: a single row with the location itself
///
/// A selection that no longer exists in the snapshot yields an empty table at the level
/// the selection implies.
pub fn project_detail<'a>(selected: Option<&NodeId>, warehouses: &'a [Warehouse]) -> DetailProjection<'a> {
    let Some(selected) = selected else {
        return DetailProjection::Warehouses(warehouses.iter().collect());
    };

    let projection = match selected.kind {
        NodeKind::Warehouse => warehouses
            .iter()
            .find(|w| w.base.id.value() == selected.entity_id)
            .map(|warehouse| {
                DetailProjection::Zones(
                    warehouse
                        .zones
                        .iter()
                        .map(|zone| ZoneRow { warehouse, zone })
                        .collect(),
                )
            }),
        NodeKind::Zone => find_zone(warehouses, ZoneId(selected.entity_id)).map(|(warehouse, zone)| {
            DetailProjection::Locations(
                zone.locations
                    .iter()
                    .map(|location| LocationRow {
                        warehouse,
                        zone,
                        location,
                    })
                    .collect(),
            )
        }),
        NodeKind::Location => find_location(warehouses, LocationId(selected.entity_id))
            .map(|row| DetailProjection::Locations(vec![row])),
    };

    projection.unwrap_or_else(|| {
        tracing::warn!("Selected node {} is not in the current snapshot", selected);
        DetailProjection::empty(selected.kind.child_level())
    })
}

fn find_zone(warehouses: &[Warehouse], id: ZoneId) -> Option<(&Warehouse, &Zone)> {
    warehouses
        .iter()
        .find_map(|warehouse| warehouse.find_zone(id).map(|zone| (warehouse, zone)))
}

fn find_location(warehouses: &[Warehouse], id: LocationId) -> Option<LocationRow<'_>> {
    warehouses.iter().find_map(|warehouse| {
        warehouse.zones.iter().find_map(|zone| {
            zone.find_location(id).map(|location| LocationRow {
                warehouse,
                zone,
                location,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::fixtures::{console_sample, wh01_scenario};

    fn codes(projection: &DetailProjection) -> Vec<String> {
        projection.nodes().into_iter().map(|n| n.code).collect()
    }

    #[test]
    fn test_nothing_selected_is_identity() {
        let warehouses = console_sample();
        let projection = project_detail(None, &warehouses);
        assert_eq!(projection.level(), NodeKind::Warehouse);
        match projection {
            DetailProjection::Warehouses(rows) => {
                assert_eq!(rows.len(), warehouses.len());
                assert!(rows.iter().zip(&warehouses).all(|(a, b)| std::ptr::eq(*a, b)));
            }
            other => panic!("unexpected projection {:?}", other.level()),
        }
    }

    #[test]
    fn test_warehouse_selected_projects_zones() {
        let warehouses = console_sample();
        let projection = project_detail(Some(&NodeId::warehouse(1)), &warehouses);
        assert_eq!(projection.level(), NodeKind::Zone);
        match &projection {
            DetailProjection::Zones(rows) => {
                let zones: Vec<&Zone> = rows.iter().map(|r| r.zone).collect();
                let expected: Vec<&Zone> = warehouses[0].zones.iter().collect();
                assert_eq!(zones, expected);
            }
            _ => panic!("expected zones"),
        }
    }

    #[test]
    fn test_zone_selected_projects_locations() {
        let warehouses = wh01_scenario();
        let projection = project_detail(Some(&NodeId::zone(1)), &warehouses);
        assert_eq!(projection.level(), NodeKind::Location);
        assert_eq!(codes(&projection), ["L1", "L2"]);

        match &projection {
            DetailProjection::Locations(rows) => {
                let bins: Vec<&Location> = rows.iter().map(|r| r.location).collect();
                let expected: Vec<&Location> = warehouses[0].zones[0].locations.iter().collect();
                assert_eq!(bins, expected);
                assert!(rows.iter().all(|r| r.warehouse.base.code == "WH-01"));
            }
            _ => panic!("expected locations"),
        }
    }

    #[test]
    fn test_location_selected_projects_itself() {
        let warehouses = wh01_scenario();
        let projection = project_detail(Some(&NodeId::location(3)), &warehouses);
        assert_eq!(projection.level(), NodeKind::Location);
        assert_eq!(codes(&projection), ["L3"]);
    }

    #[test]
    fn test_stale_selection_is_empty() {
        let warehouses = wh01_scenario();
        let projection = project_detail(Some(&NodeId::warehouse(42)), &warehouses);
        assert_eq!(projection.level(), NodeKind::Zone);
        assert!(projection.is_empty());

        let projection = project_detail(Some(&NodeId::zone(42)), &warehouses);
        assert_eq!(projection.level(), NodeKind::Location);
        assert!(projection.is_empty());
    }

    #[test]
    fn test_projection_accepts_tree_node_selection() {
        let warehouses = console_sample();
        let tree = super::super::build_tree(&warehouses);
        let zone_b = &tree[0].children[1];
        let projection = project_detail(Some(&zone_b.id), &warehouses);
        assert_eq!(codes(&projection), ["B-01-01", "B-01-02"]);
    }
}
