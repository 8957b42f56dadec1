use contracts::domain::a002_warehouse::Warehouse;
use contracts::projections::p900_warehouse_structure::SummaryRow;

/// One summary row per warehouse, in input order.
///
/// Counts come from the snapshot on every call. The branch name is the warehouse's own
/// denormalised copy, so a warehouse whose branch was removed keeps its last known name.
pub fn build_summary(warehouses: &[Warehouse]) -> Vec<SummaryRow> {
    warehouses
        .iter()
        .map(|warehouse| SummaryRow {
            warehouse_id: warehouse.base.id.value(),
            branch_code: warehouse.branch_code.clone(),
            branch_name: warehouse.branch_name.clone(),
            warehouse_code: warehouse.base.code.clone(),
            warehouse_name: warehouse.base.name.clone(),
            total_zones: warehouse.zones.len(),
            total_locations: warehouse.location_count(),
            status: warehouse.base.status,
        })
        .collect()
}
