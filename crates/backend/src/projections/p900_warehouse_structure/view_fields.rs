use contracts::enums::RecordStatus;
use contracts::projections::p900_warehouse_structure::{NodeData, TreeNode};

/// Value shown in the record view sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewValue {
    Text(String),
    /// Referenced records as (name, code) pairs, outermost first
    Card(Vec<(String, String)>),
    Badge(RecordStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewField {
    pub label: &'static str,
    pub value: ViewValue,
}

impl ViewField {
    fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: ViewValue::Text(value.to_string()),
        }
    }

    fn card(label: &'static str, refs: &[(&str, &str)]) -> Self {
        Self {
            label,
            value: ViewValue::Card(
                refs.iter()
                    .map(|(name, code)| (name.to_string(), code.to_string()))
                    .collect(),
            ),
        }
    }

    /// Plain-text rendering ("Main Branch (BR-001)")
    pub fn display_value(&self) -> String {
        match &self.value {
            ViewValue::Text(text) => text.clone(),
            ViewValue::Card(refs) => refs
                .iter()
                .map(|(name, code)| format!("{} ({})", name, code))
                .collect::<Vec<_>>()
                .join(" / "),
            ViewValue::Badge(status) => status.to_string(),
        }
    }
}

/// Labelled fields of the record view sheet for a tree node
pub fn view_fields(node: &TreeNode) -> Vec<ViewField> {
    let status = ViewField {
        label: "Status",
        value: ViewValue::Badge(node.status),
    };

    match &node.data {
        NodeData::Warehouse {
            branch_code,
            branch_name,
            address,
            manager,
        } => vec![
            ViewField::text("Warehouse Code", &node.code),
            ViewField::text("Warehouse Name", &node.name),
            ViewField::card("Branch", &[(branch_name.as_str(), branch_code.as_str())]),
            ViewField::text("Address", address),
            ViewField::text("Manager", manager),
            status,
        ],
        NodeData::Zone {
            warehouse_code,
            warehouse_name,
        } => vec![
            ViewField::text("Zone Code", &node.code),
            ViewField::text("Zone Name", &node.name),
            ViewField::card(
                "Warehouse",
                &[(warehouse_name.as_str(), warehouse_code.as_str())],
            ),
            status,
        ],
        NodeData::Location {
            warehouse_code,
            warehouse_name,
            zone_code,
            zone_name,
            capacity,
        } => vec![
            ViewField::text("Bin Code", &node.code),
            ViewField::text("Bin Name", &node.name),
            ViewField::card(
                "Location",
                &[
                    (warehouse_name.as_str(), warehouse_code.as_str()),
                    (zone_name.as_str(), zone_code.as_str()),
                ],
            ),
            ViewField::text("Capacity", capacity),
            status,
        ],
    }
}
