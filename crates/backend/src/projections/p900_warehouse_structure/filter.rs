use contracts::domain::common::AggregateRoot;
use contracts::enums::RecordStatus;
use contracts::projections::p900_warehouse_structure::{StructureFilter, SummaryRow};

use super::detail::DetailProjection;

/// Case-insensitive substring match against any of the fields. Empty fields never match.
fn matches_search(term_lower: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .filter(|field| !field.is_empty())
        .any(|field| field.to_lowercase().contains(term_lower))
}

/// Lowercased search term as typed, `None` when it is blank
fn search_term(filter: &StructureFilter) -> Option<String> {
    filter.has_search().then(|| filter.search_term.to_lowercase())
}

fn keep(term: Option<&str>, filter: &StructureFilter, fields: &[&str], status: RecordStatus) -> bool {
    term.map_or(true, |t| matches_search(t, fields)) && filter.matches_status(status)
}

/// Filter summary rows: search on warehouse code/name and branch name, exact branch code,
/// exact status. Predicates are AND-ed; surviving rows keep their order.
pub fn filter_summary(rows: &[SummaryRow], filter: &StructureFilter) -> Vec<SummaryRow> {
    let term = search_term(filter);
    rows.iter()
        .filter(|row| {
            keep(
                term.as_deref(),
                filter,
                &[&row.warehouse_code, &row.warehouse_name, &row.branch_name],
                row.status,
            )
        })
        .filter(|row| {
            filter
                .branch_code
                .as_deref()
                .map_or(true, |code| row.branch_code == code)
        })
        .cloned()
        .collect()
}

/// Filter detail rows on code/name of the row's own level and exact status.
/// The branch filter belongs to the summary view and is not applied here.
pub fn filter_detail<'a>(projection: &DetailProjection<'a>, filter: &StructureFilter) -> DetailProjection<'a> {
    fn retain<R: Copy, E: AggregateRoot>(
        rows: &[R],
        entity: impl Fn(&R) -> &E,
        term: Option<&str>,
        filter: &StructureFilter,
    ) -> Vec<R> {
        rows.iter()
            .filter(|row| {
                let e = entity(row);
                keep(term, filter, &[e.code(), e.name()], e.status())
            })
            .copied()
            .collect()
    }

    let term = search_term(filter);
    let term = term.as_deref();
    match projection {
        DetailProjection::Warehouses(rows) => {
            DetailProjection::Warehouses(retain(rows, |w| *w, term, filter))
        }
        DetailProjection::Zones(rows) => DetailProjection::Zones(retain(rows, |r| r.zone, term, filter)),
        DetailProjection::Locations(rows) => {
            DetailProjection::Locations(retain(rows, |r| r.location, term, filter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::detail::project_detail;
    use super::super::fixtures::{console_sample, wh01_scenario};
    use super::super::summary::build_summary;
    use contracts::projections::p900_warehouse_structure::NodeId;

    fn codes(projection: &DetailProjection) -> Vec<String> {
        projection.nodes().into_iter().map(|n| n.code).collect()
    }

    fn search(term: &str) -> StructureFilter {
        StructureFilter::from_params(term, "all", "all")
    }

    #[test]
    fn test_summary_search_is_case_insensitive_or() {
        let rows = build_summary(&console_sample());

        let by_code = filter_summary(&rows, &search("wh-002"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].warehouse_code, "WH-002");

        // "north" hits both the warehouse name and the branch name of WH-002 only
        assert_eq!(filter_summary(&rows, &search("NORTH")).len(), 1);
        // "main" hits WH-001 by name and by branch
        assert_eq!(filter_summary(&rows, &search("main"))[0].warehouse_code, "WH-001");
        assert!(filter_summary(&rows, &search("nowhere")).is_empty());
    }

    #[test]
    fn test_blank_search_keeps_everything() {
        let rows = build_summary(&console_sample());
        assert_eq!(filter_summary(&rows, &search("   ")), rows);
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_term() {
        let rows = build_summary(&console_sample());
        assert_eq!(filter_summary(&rows, &search(" warehouse")).len(), 2);
        assert!(filter_summary(&rows, &search("warehouse ")).is_empty());
    }

    #[test]
    fn test_branch_and_status_filters_and_together() {
        let mut warehouses = console_sample();
        warehouses[1].base.status = RecordStatus::Inactive;
        let rows = build_summary(&warehouses);

        let filter = StructureFilter::from_params("", "BR-002", "all");
        assert_eq!(filter_summary(&rows, &filter).len(), 1);

        let filter = StructureFilter::from_params("", "BR-002", "Active");
        assert!(filter_summary(&rows, &filter).is_empty());

        let filter = StructureFilter::from_params("warehouse", "all", "Inactive");
        let filtered = filter_summary(&rows, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].warehouse_code, "WH-002");
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let rows = build_summary(&console_sample());
        let filter = search("warehouse");
        let once = filter_summary(&rows, &filter);
        let twice = filter_summary(&once, &filter);
        assert_eq!(once, twice);
        let order: Vec<&str> = once.iter().map(|r| r.warehouse_code.as_str()).collect();
        assert_eq!(order, ["WH-001", "WH-002"]);

        let warehouses = console_sample();
        let projection = project_detail(Some(&NodeId::warehouse(1)), &warehouses);
        let filter = search("zone");
        let once = filter_detail(&projection, &filter);
        let twice = filter_detail(&once, &filter);
        assert_eq!(codes(&once), codes(&twice));
        assert_eq!(codes(&once), ["A", "B"]);
    }

    #[test]
    fn test_location_search_scoped_to_selected_zone() {
        let warehouses = wh01_scenario();
        let filter = search("L3");

        let in_b = filter_detail(&project_detail(Some(&NodeId::zone(2)), &warehouses), &filter);
        assert_eq!(codes(&in_b), ["L3"]);

        let in_a = filter_detail(&project_detail(Some(&NodeId::zone(1)), &warehouses), &filter);
        assert!(in_a.is_empty());
    }

    #[test]
    fn test_detail_fields_depend_on_level() {
        let warehouses = console_sample();
        // Zone rows match on zone code/name, not on the owning warehouse
        let zones = project_detail(Some(&NodeId::warehouse(1)), &warehouses);
        assert!(filter_detail(&zones, &search("WH-001")).is_empty());
        assert_eq!(codes(&filter_detail(&zones, &search("furniture"))), ["B"]);

        let bins = project_detail(Some(&NodeId::zone(2)), &warehouses);
        assert_eq!(codes(&filter_detail(&bins, &search("section b-01-02"))), ["B-01-02"]);
    }

    #[test]
    fn test_branch_filter_ignored_in_detail() {
        let warehouses = console_sample();
        let projection = project_detail(None, &warehouses);
        let filter = StructureFilter::from_params("", "BR-404", "all");
        assert_eq!(filter_detail(&projection, &filter).len(), 2);
    }

    #[test]
    fn test_detail_status_filter() {
        let mut warehouses = wh01_scenario();
        warehouses[0].zones[0].locations[1].base.status = RecordStatus::Inactive;
        let projection = project_detail(Some(&NodeId::zone(1)), &warehouses);

        let filter = StructureFilter::default().with_status(RecordStatus::Inactive);
        assert_eq!(codes(&filter_detail(&projection, &filter)), ["L2"]);
    }

    #[test]
    fn test_empty_field_never_matches() {
        let mut warehouses = wh01_scenario();
        warehouses[0].base.name.clear();
        let rows = build_summary(&warehouses);
        // Empty term on an empty field would match everything; a real term must not
        assert_eq!(filter_summary(&rows, &search("one")).len(), 0);
        assert!(!matches_search("x", &["", ""]));
    }
}
