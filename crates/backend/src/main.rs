pub mod domain;
pub mod projections;
pub mod shared;

use contracts::domain::common::AggregateRoot;
use contracts::projections::p900_warehouse_structure::{ActiveTab, NodeId, NodeKind};

use crate::projections::p900_warehouse_structure::{
    active_tab_csv, build_tree, recompute, visible_rows, StructureViewState,
};
use crate::shared::config;
use crate::shared::data::{seed, EntityStore, InMemoryStore};

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Seed file from config, or the built-in sample data
fn open_store(cfg: &config::Config) -> anyhow::Result<InMemoryStore> {
    if let Some(path) = cfg.seed.path.as_deref() {
        return seed::load_store(&config::resolve_path(path));
    }

    let mut store = InMemoryStore::new();
    domain::a001_branch::service::insert_test_data(&mut store)?;
    domain::a002_warehouse::service::insert_test_data(&mut store)?;
    tracing::info!("Inserted sample data");
    Ok(store)
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cfg = config::load_config()?;
    let store = open_store(&cfg)?;
    let warehouses = store.list_warehouses();

    let mut state = StructureViewState::new(&build_tree(&warehouses));
    let view = recompute(&state, &warehouses);

    for row in visible_rows(&view.tree, &state.expansion) {
        tracing::info!(
            "{}{} {} - {} [{}]",
            "  ".repeat(row.depth),
            row.node.kind().title(),
            row.node.code,
            row.node.name,
            row.node.status
        );
    }
    for row in &view.summary {
        tracing::info!(
            "{} / {}: {} zones, {} locations",
            row.branch_name,
            row.warehouse_code,
            row.total_zones,
            row.total_locations
        );
    }

    let export_dir = config::resolve_path(&cfg.export.dir);
    std::fs::create_dir_all(&export_dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");

    let summary = active_tab_csv(&view, &state)?;
    std::fs::write(export_dir.join(format!("warehouse_summary_{}.csv", stamp)), summary)?;

    // Detail export for every warehouse: its zones
    state.active_tab = ActiveTab::Detail;
    for warehouse in &warehouses {
        state.select(NodeId::warehouse(warehouse.id().value()));
        let view = recompute(&state, &warehouses);
        let csv = active_tab_csv(&view, &state)?;
        let file = format!("{}_{}s_{}.csv", warehouse.code(), NodeKind::Zone, stamp);
        std::fs::write(export_dir.join(file), csv)?;
    }

    tracing::info!("Exports written to {}", export_dir.display());
    Ok(())
}
