use contracts::domain::common::AggregateRoot;
use contracts::projections::p900_warehouse_structure::{
    ActiveTab, ColumnVisibility, NodeKind, StructureColumns, SummaryRow,
};

use super::detail::DetailProjection;
use super::view_state::{StructureView, StructureViewState};

/// Column key and header label, in table order
pub type ColumnDef = (&'static str, &'static str);

pub const SUMMARY_COLUMNS: &[ColumnDef] = &[
    ("branch", "Branch"),
    ("warehouseCode", "Code"),
    ("warehouseName", "Name"),
    ("totalZones", "Total Zones"),
    ("totalLocations", "Total Locations"),
    ("status", "Status"),
];

pub const WAREHOUSE_COLUMNS: &[ColumnDef] = &[
    ("code", "Code"),
    ("name", "Name"),
    ("branch", "Branch"),
    ("address", "Address"),
    ("manager", "Manager"),
    ("status", "Status"),
];

pub const ZONE_COLUMNS: &[ColumnDef] = &[
    ("code", "Code"),
    ("name", "Name"),
    ("warehouse", "Warehouse"),
    ("status", "Status"),
];

pub const LOCATION_COLUMNS: &[ColumnDef] = &[
    ("binCode", "Bin Code"),
    ("binName", "Bin Name"),
    ("zone", "Zone"),
    ("capacity", "Capacity"),
    ("status", "Status"),
];

/// Column set of the detail table at `level`
pub fn detail_columns(level: NodeKind) -> &'static [ColumnDef] {
    match level {
        NodeKind::Warehouse => WAREHOUSE_COLUMNS,
        NodeKind::Zone => ZONE_COLUMNS,
        NodeKind::Location => LOCATION_COLUMNS,
    }
}

fn summary_cell(row: &SummaryRow, key: &str) -> String {
    match key {
        "branch" => row.branch_name.clone(),
        "warehouseCode" => row.warehouse_code.clone(),
        "warehouseName" => row.warehouse_name.clone(),
        "totalZones" => row.total_zones.to_string(),
        "totalLocations" => row.total_locations.to_string(),
        "status" => row.status.to_string(),
        _ => String::new(),
    }
}

/// Cells of every detail row for the given column keys
fn detail_records(projection: &DetailProjection, keys: &[&str]) -> Vec<Vec<String>> {
    match projection {
        DetailProjection::Warehouses(rows) => rows
            .iter()
            .map(|w| {
                keys.iter()
                    .map(|key| match *key {
                        "code" => w.code().to_string(),
                        "name" => w.name().to_string(),
                        "branch" => w.branch_name.clone(),
                        "address" => w.address.clone(),
                        "manager" => w.manager.clone(),
                        "status" => w.status().to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect(),
        DetailProjection::Zones(rows) => rows
            .iter()
            .map(|r| {
                keys.iter()
                    .map(|key| match *key {
                        "code" => r.zone.code().to_string(),
                        "name" => r.zone.name().to_string(),
                        "warehouse" => r.warehouse.name().to_string(),
                        "status" => r.zone.status().to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect(),
        DetailProjection::Locations(rows) => rows
            .iter()
            .map(|r| {
                keys.iter()
                    .map(|key| match *key {
                        "binCode" => r.location.code().to_string(),
                        "binName" => r.location.name().to_string(),
                        "zone" => r.zone.name().to_string(),
                        "capacity" => r.location.capacity.clone(),
                        "status" => r.location.status().to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect(),
    }
}

fn visible(columns: &'static [ColumnDef], visibility: &ColumnVisibility) -> Vec<ColumnDef> {
    columns
        .iter()
        .copied()
        .filter(|(key, _)| visibility.is_visible(key))
        .collect()
}

fn write_csv(columns: &[ColumnDef], records: Vec<Vec<String>>) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|(_, header)| header))?;
    for record in &records {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Summary table as CSV, visible columns only
pub fn summary_csv(rows: &[SummaryRow], visibility: &ColumnVisibility) -> anyhow::Result<String> {
    let columns = visible(SUMMARY_COLUMNS, visibility);
    let records = rows
        .iter()
        .map(|row| columns.iter().map(|(key, _)| summary_cell(row, key)).collect())
        .collect();
    write_csv(&columns, records)
}

/// Detail table as CSV using the column set of the projection's level
pub fn detail_csv(projection: &DetailProjection, columns: &StructureColumns) -> anyhow::Result<String> {
    let level = projection.level();
    let columns = visible(detail_columns(level), columns.for_level(level));
    let keys: Vec<&str> = columns.iter().map(|(key, _)| *key).collect();
    write_csv(&columns, detail_records(projection, &keys))
}

/// Export the filtered rows of the active tab
pub fn active_tab_csv(view: &StructureView, state: &StructureViewState) -> anyhow::Result<String> {
    let (count, csv) = match state.active_tab {
        ActiveTab::Summary => (
            view.filtered_summary.len(),
            summary_csv(&view.filtered_summary, &state.columns.summary)?,
        ),
        ActiveTab::Detail => (
            view.filtered_detail.len(),
            detail_csv(&view.filtered_detail, &state.columns)?,
        ),
    };
    tracing::info!("Exporting {} records", count);
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::detail::project_detail;
    use super::super::fixtures::console_sample;
    use super::super::summary::build_summary;
    use super::super::view_state::recompute;
    use contracts::projections::p900_warehouse_structure::{NodeId, StructureFilter};

    #[test]
    fn test_summary_csv_all_columns() {
        let rows = build_summary(&console_sample());
        let csv = summary_csv(&rows, &ColumnVisibility::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Branch,Code,Name,Total Zones,Total Locations,Status");
        assert_eq!(lines[1], "Main Branch,WH-001,Main Warehouse,2,5,Active");
        assert_eq!(lines[2], "North Branch,WH-002,North Warehouse,1,1,Active");
    }

    #[test]
    fn test_hidden_columns_are_not_exported() {
        let rows = build_summary(&console_sample());
        let mut visibility = ColumnVisibility::default();
        visibility.set_visible("branch", false);
        visibility.set_visible("totalLocations", false);
        let csv = summary_csv(&rows, &visibility).unwrap();
        assert_eq!(csv.lines().next(), Some("Code,Name,Total Zones,Status"));
        assert!(!csv.contains("Main Branch"));
    }

    #[test]
    fn test_detail_csv_uses_level_columns() {
        let warehouses = console_sample();
        let mut columns = StructureColumns::default();
        columns.location.set_visible("status", false);

        let projection = project_detail(Some(&NodeId::zone(2)), &warehouses);
        let csv = detail_csv(&projection, &columns).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Bin Code,Bin Name,Zone,Capacity");
        assert_eq!(lines[1], "B-01-01,Section B-01-01,Zone B - Furniture,50 units");
        assert_eq!(lines.len(), 3);

        // Address contains a comma and gets quoted
        let projection = project_detail(None, &warehouses);
        let csv = detail_csv(&projection, &columns).unwrap();
        assert!(csv.contains("\"123 Storage Ave, Industrial Zone\""));
    }

    #[test]
    fn test_active_tab_exports_filtered_rows() {
        let warehouses = console_sample();
        let mut state = StructureViewState::default();
        state.filter = StructureFilter::from_params("north", "all", "all");

        let csv = active_tab_csv(&recompute(&state, &warehouses), &state).unwrap();
        assert_eq!(csv.lines().count(), 2);

        state.active_tab = ActiveTab::Detail;
        state.select(NodeId::warehouse(1));
        state.filter = StructureFilter::default();
        let csv = active_tab_csv(&recompute(&state, &warehouses), &state).unwrap();
        assert_eq!(csv.lines().next(), Some("Code,Name,Warehouse,Status"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let csv = summary_csv(&[], &ColumnVisibility::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
