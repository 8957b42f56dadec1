use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::enums::RecordStatus;

/// Уровень иерархии склада. Он же `selectedLevel` детальной таблицы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Warehouse,
    Zone,
    Location,
}

/// Уровень строк детальной таблицы
pub type DetailLevel = NodeKind;

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Warehouse => "warehouse",
            NodeKind::Zone => "zone",
            NodeKind::Location => "location",
        }
    }

    /// Заголовок для UI ("Warehouse", "Zone", "Location")
    pub fn title(&self) -> &'static str {
        match self {
            NodeKind::Warehouse => "Warehouse",
            NodeKind::Zone => "Zone",
            NodeKind::Location => "Location",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "warehouse" => Some(NodeKind::Warehouse),
            "zone" => Some(NodeKind::Zone),
            "location" => Some(NodeKind::Location),
            _ => None,
        }
    }

    /// Уровень, который показывает детальная таблица при выборе узла этого типа.
    /// Ячейка листовая и остаётся на своём уровне.
    pub fn child_level(&self) -> DetailLevel {
        match self {
            NodeKind::Warehouse => NodeKind::Zone,
            NodeKind::Zone | NodeKind::Location => NodeKind::Location,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Node ID
// ============================================================================

/// Синтетический ID узла дерева: тип + ID сущности ("warehouse-1", "zone-3").
///
/// Единственный ключ для раскрытия и выбора узлов; стабилен между перестроениями
/// дерева, пока не меняются ID сущностей.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub kind: NodeKind,
    pub entity_id: i64,
}

impl NodeId {
    pub fn new(kind: NodeKind, entity_id: i64) -> Self {
        Self { kind, entity_id }
    }

    pub fn warehouse(entity_id: i64) -> Self {
        Self::new(NodeKind::Warehouse, entity_id)
    }

    pub fn zone(entity_id: i64) -> Self {
        Self::new(NodeKind::Zone, entity_id)
    }

    pub fn location(entity_id: i64) -> Self {
        Self::new(NodeKind::Location, entity_id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.entity_id)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid node id: {}", s))?;
        let kind = NodeKind::from_code(kind).ok_or_else(|| format!("Unknown node type: {}", kind))?;
        let entity_id = id
            .parse::<i64>()
            .map_err(|e| format!("Invalid node id {}: {}", s, e))?;
        Ok(Self::new(kind, entity_id))
    }
}

impl TryFrom<String> for NodeId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Данные узла, специфичные для уровня (включая денормализованный контекст родителей)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Warehouse {
        branch_code: String,
        branch_name: String,
        address: String,
        manager: String,
    },
    Zone {
        warehouse_code: String,
        warehouse_name: String,
    },
    Location {
        warehouse_code: String,
        warehouse_name: String,
        zone_code: String,
        zone_name: String,
        capacity: String,
    },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Warehouse { .. } => NodeKind::Warehouse,
            NodeData::Zone { .. } => NodeKind::Zone,
            NodeData::Location { .. } => NodeKind::Location,
        }
    }
}

/// Узел дерева склад → зона → ячейка (производное значение, не хранится)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub code: String,
    pub name: String,
    pub status: RecordStatus,
    pub data: NodeData,
    /// Для ячеек всегда пустой
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Поиск узла по ID в поддереве (включая сам узел)
    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Строка сводной таблицы: один склад со счётчиками зон и ячеек
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Обратная ссылка на склад-источник
    pub warehouse_id: i64,
    pub branch_code: String,
    pub branch_name: String,
    pub warehouse_code: String,
    pub warehouse_name: String,
    pub total_zones: usize,
    pub total_locations: usize,
    pub status: RecordStatus,
}

// ============================================================================
// Filters / view settings
// ============================================================================

/// Значение select-фильтра, означающее "без фильтрации"
pub const FILTER_ALL: &str = "all";

/// Поиск и фильтры экрана структуры склада
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFilter {
    #[serde(default)]
    pub search_term: String,
    /// Точное совпадение с кодом филиала склада. Только для сводной таблицы.
    #[serde(default)]
    pub branch_code: Option<String>,
    /// Точное совпадение с кодом статуса ("Active" / "Inactive")
    #[serde(default)]
    pub status: Option<String>,
}

impl StructureFilter {
    /// Собрать фильтр из значений контролов. "all" и пустая строка снимают фильтр.
    pub fn from_params(search_term: &str, branch_code: &str, status: &str) -> Self {
        fn selected(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty() && value != FILTER_ALL).then(|| value.to_string())
        }

        Self {
            search_term: search_term.to_string(),
            branch_code: selected(branch_code),
            status: selected(status),
        }
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status.code().to_string());
        self
    }

    /// Есть ли непустой поисковый запрос
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    pub fn matches_status(&self, status: RecordStatus) -> bool {
        self.status.as_deref().map_or(true, |s| s == status.code())
    }
}

/// Активная вкладка экрана
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Summary,
    Detail,
}

/// Видимость колонок одной таблицы. По умолчанию видны все колонки.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVisibility {
    #[serde(default)]
    hidden: BTreeSet<String>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, key: &str) -> bool {
        !self.hidden.contains(key)
    }

    pub fn set_visible(&mut self, key: &str, visible: bool) {
        if visible {
            self.hidden.remove(key);
        } else {
            self.hidden.insert(key.to_string());
        }
    }
}

/// Настройки колонок для всех таблиц экрана
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureColumns {
    pub summary: ColumnVisibility,
    pub warehouse: ColumnVisibility,
    pub zone: ColumnVisibility,
    pub location: ColumnVisibility,
}

impl StructureColumns {
    /// Колонки детальной таблицы для уровня
    pub fn for_level(&self, level: DetailLevel) -> &ColumnVisibility {
        match level {
            NodeKind::Warehouse => &self.warehouse,
            NodeKind::Zone => &self.zone,
            NodeKind::Location => &self.location,
        }
    }

    pub fn for_level_mut(&mut self, level: DetailLevel) -> &mut ColumnVisibility {
        match level {
            NodeKind::Warehouse => &mut self.warehouse,
            NodeKind::Zone => &mut self.zone,
            NodeKind::Location => &mut self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_format_and_parse() {
        let id = NodeId::zone(3);
        assert_eq!(id.to_string(), "zone-3");
        assert_eq!("zone-3".parse::<NodeId>().unwrap(), id);
        assert_eq!("location-6".parse::<NodeId>().unwrap(), NodeId::location(6));
        assert!("bin-1".parse::<NodeId>().is_err());
        assert!("warehouse".parse::<NodeId>().is_err());
        assert!("warehouse-x".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_serializes_as_string() {
        let json = serde_json::to_string(&NodeId::warehouse(1)).unwrap();
        assert_eq!(json, "\"warehouse-1\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId::warehouse(1));
    }

    #[test]
    fn test_ids_do_not_collide_across_types() {
        assert_ne!(NodeId::warehouse(1), NodeId::zone(1));
        assert_ne!(NodeId::zone(1).to_string(), NodeId::location(1).to_string());
    }

    #[test]
    fn test_filter_from_params_all_means_none() {
        let filter = StructureFilter::from_params("a", "all", "all");
        assert_eq!(filter.branch_code, None);
        assert_eq!(filter.status, None);

        let filter = StructureFilter::from_params("", "BR-001", "Inactive");
        assert_eq!(filter.branch_code.as_deref(), Some("BR-001"));
        assert_eq!(filter.status.as_deref(), Some("Inactive"));
        assert!(filter.matches_status(RecordStatus::Inactive));
        assert!(!filter.matches_status(RecordStatus::Active));
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let filter = StructureFilter::from_params("", "all", "Archived");
        assert!(!filter.matches_status(RecordStatus::Active));
        assert!(!filter.matches_status(RecordStatus::Inactive));
    }

    #[test]
    fn test_column_visibility_toggle() {
        let mut columns = StructureColumns::default();
        assert!(columns.for_level(NodeKind::Zone).is_visible("warehouse"));
        columns.for_level_mut(NodeKind::Zone).set_visible("warehouse", false);
        assert!(!columns.zone.is_visible("warehouse"));
        columns.zone.set_visible("warehouse", true);
        assert!(columns.zone.is_visible("warehouse"));
    }
}
