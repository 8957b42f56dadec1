use contracts::domain::a001_branch::{Branch, BranchDto, BranchId};
use contracts::domain::common::AggregateRoot;

use crate::shared::data::{EntityStore, InMemoryStore};

/// Создание нового филиала
pub fn create(store: &mut InMemoryStore, dto: BranchDto, user: &str) -> anyhow::Result<BranchId> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    store.ensure_unique_branch_code(dto.code.trim(), None)?;

    let id = store.allocate_branch_id();
    let mut aggregate = Branch::new_with_id(id, dto.code.trim().into(), dto.name.trim().into());
    aggregate.base.status = dto.status;
    aggregate.base.touch(user);

    store.insert_branch(aggregate)?;
    tracing::info!("{} {} created", Branch::element_name(), dto.code.trim());
    Ok(id)
}

/// Обновление филиала.
///
/// Склады хранят наименование филиала денормализованно и не переписываются здесь:
/// новое имя попадёт в склад при его следующем сохранении.
pub fn update(store: &mut InMemoryStore, dto: BranchDto, user: &str) -> anyhow::Result<()> {
    let id = dto
        .id
        .map(BranchId)
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    store.ensure_unique_branch_code(dto.code.trim(), Some(id))?;

    let aggregate = store.branch_mut(id)?;
    aggregate.update(&dto);
    aggregate.base.touch(user);
    tracing::info!("{} {} updated", Branch::element_name(), aggregate.base.code);
    Ok(())
}

/// Получение списка всех филиалов
pub fn list_all(store: &impl EntityStore) -> Vec<Branch> {
    store.list_branches()
}

/// Вставка тестовых данных
pub fn insert_test_data(store: &mut InMemoryStore) -> anyhow::Result<()> {
    let data = vec![
        BranchDto {
            id: None,
            code: "BR-001".into(),
            name: "Main Branch".into(),
            ..Default::default()
        },
        BranchDto {
            id: None,
            code: "BR-002".into(),
            name: "North Branch".into(),
            ..Default::default()
        },
    ];

    for dto in data {
        create(store, dto, "admin")?;
    }

    Ok(())
}
