use contracts::domain::a001_branch::Branch;
use contracts::domain::a002_warehouse::Warehouse;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::store::{InMemoryStore, StoreError};

/// Entity snapshot as stored in a seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSnapshot {
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
}

impl SeedSnapshot {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        // Strip UTF-8 BOM if present
        let text = text.trim_start_matches('\u{FEFF}');
        Ok(serde_json::from_str(text)?)
    }

    /// Build a store from the snapshot. Rejects duplicate codes/ids and children
    /// pointing at a different parent than the one containing them.
    pub fn into_store(self) -> Result<InMemoryStore, StoreError> {
        let mut store = InMemoryStore::new();
        for branch in self.branches {
            store.insert_branch(branch)?;
        }
        for warehouse in self.warehouses {
            store.insert_warehouse(warehouse)?;
        }
        Ok(store)
    }
}

/// Load a JSON seed file into a fresh store
pub fn load_store(path: &Path) -> anyhow::Result<InMemoryStore> {
    tracing::info!("Loading seed snapshot from: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let snapshot = SeedSnapshot::from_json(&text)?;
    let store = snapshot.into_store()?;
    tracing::info!(
        "Seed loaded: {} branches, {} warehouses",
        store.branches().len(),
        store.warehouses().len()
    );
    Ok(store)
}
