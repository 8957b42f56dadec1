use contracts::domain::a002_warehouse::{LocationDto, WarehouseDto, ZoneDto};
use contracts::enums::RecordStatus;
use contracts::projections::p900_warehouse_structure::{NodeData, NodeId, NodeKind, TreeNode};

use crate::domain::a002_warehouse::service;
use crate::shared::data::InMemoryStore;

/// Contents of the create/edit dialog
#[derive(Debug, Clone, PartialEq)]
pub enum FormDraft {
    Warehouse(WarehouseDto),
    Zone(ZoneDto),
    Location(LocationDto),
}

impl FormDraft {
    pub fn kind(&self) -> NodeKind {
        match self {
            FormDraft::Warehouse(_) => NodeKind::Warehouse,
            FormDraft::Zone(_) => NodeKind::Zone,
            FormDraft::Location(_) => NodeKind::Location,
        }
    }

    /// Editing an existing record rather than creating one
    pub fn is_edit(&self) -> bool {
        match self {
            FormDraft::Warehouse(dto) => dto.id.is_some(),
            FormDraft::Zone(dto) => dto.id.is_some(),
            FormDraft::Location(dto) => dto.id.is_some(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            FormDraft::Warehouse(dto) => dto.validate(),
            FormDraft::Zone(dto) => dto.validate(),
            FormDraft::Location(dto) => dto.validate(),
        }
    }
}

/// Empty draft for a new record of `kind`, Active by default.
///
/// Owner codes are pre-filled from the selected node: a warehouse fills the warehouse
/// code, a zone fills both its warehouse code and its own code. Anything else leaves
/// them blank for the user to pick.
pub fn draft_for_create(kind: NodeKind, selected: Option<&TreeNode>) -> FormDraft {
    let selected_warehouse_code = selected.and_then(|node| match &node.data {
        NodeData::Warehouse { .. } => Some(node.code.clone()),
        NodeData::Zone { warehouse_code, .. } => Some(warehouse_code.clone()),
        NodeData::Location { .. } => None,
    });
    let selected_zone_code = selected
        .filter(|node| node.kind() == NodeKind::Zone)
        .map(|node| node.code.clone());

    match kind {
        NodeKind::Warehouse => FormDraft::Warehouse(WarehouseDto {
            status: RecordStatus::Active,
            ..Default::default()
        }),
        NodeKind::Zone => FormDraft::Zone(ZoneDto {
            warehouse_code: selected
                .filter(|node| node.kind() == NodeKind::Warehouse)
                .map(|node| node.code.clone())
                .unwrap_or_default(),
            status: RecordStatus::Active,
            ..Default::default()
        }),
        NodeKind::Location => FormDraft::Location(LocationDto {
            warehouse_code: selected_warehouse_code.unwrap_or_default(),
            zone_code: selected_zone_code.unwrap_or_default(),
            status: RecordStatus::Active,
            ..Default::default()
        }),
    }
}

/// Draft pre-filled with the record behind a tree node
pub fn draft_for_edit(node: &TreeNode) -> FormDraft {
    let id = Some(node.id.entity_id);
    match &node.data {
        NodeData::Warehouse {
            branch_code,
            address,
            manager,
            ..
        } => FormDraft::Warehouse(WarehouseDto {
            id,
            code: node.code.clone(),
            name: node.name.clone(),
            branch_code: branch_code.clone(),
            address: address.clone(),
            manager: manager.clone(),
            status: node.status,
        }),
        NodeData::Zone { warehouse_code, .. } => FormDraft::Zone(ZoneDto {
            id,
            code: node.code.clone(),
            name: node.name.clone(),
            warehouse_code: warehouse_code.clone(),
            status: node.status,
        }),
        NodeData::Location {
            warehouse_code,
            zone_code,
            capacity,
            ..
        } => FormDraft::Location(LocationDto {
            id,
            code: node.code.clone(),
            name: node.name.clone(),
            warehouse_code: warehouse_code.clone(),
            zone_code: zone_code.clone(),
            capacity: capacity.clone(),
            status: node.status,
        }),
    }
}

/// Submit the dialog: create or update, returning the node id of the saved record
pub fn save(store: &mut InMemoryStore, draft: FormDraft, user: &str) -> anyhow::Result<NodeId> {
    let node = match draft {
        FormDraft::Warehouse(dto) => match dto.id {
            Some(id) => {
                service::update_warehouse(store, dto, user)?;
                NodeId::warehouse(id)
            }
            None => NodeId::warehouse(service::create_warehouse(store, dto, user)?.value()),
        },
        FormDraft::Zone(dto) => match dto.id {
            Some(id) => {
                service::update_zone(store, dto, user)?;
                NodeId::zone(id)
            }
            None => NodeId::zone(service::create_zone(store, dto, user)?.value()),
        },
        FormDraft::Location(dto) => match dto.id {
            Some(id) => {
                service::update_location(store, dto, user)?;
                NodeId::location(id)
            }
            None => NodeId::location(service::create_location(store, dto, user)?.value()),
        },
    };
    Ok(node)
}
