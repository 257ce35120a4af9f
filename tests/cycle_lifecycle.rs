//! Integration tests for academic cycle management and resolution.
//!
//! Runs the application handlers against the in-memory store:
//! 1. Creating and activating cycles keeps exactly one active
//! 2. The system cycle follows activation
//! 3. Without an active cycle the configured fallback is used

use std::sync::Arc;

use telesecundaria::adapters::memory::InMemoryDatabase;
use telesecundaria::application::handlers::academic_cycle::{
    ActivateCycleCommand, ActivateCycleHandler, CreateCycleCommand, CreateCycleHandler,
    ListCyclesHandler,
};
use telesecundaria::application::CycleResolver;
use telesecundaria::domain::academic_cycle::{CycleError, CycleName, CycleSource};
use telesecundaria::domain::foundation::CycleId;

const FALLBACK: &str = "2024-2025";

struct Harness {
    db: Arc<InMemoryDatabase>,
    create: CreateCycleHandler,
    activate: ActivateCycleHandler,
    list: ListCyclesHandler,
    resolver: CycleResolver,
}

fn harness() -> Harness {
    let db = Arc::new(InMemoryDatabase::new());
    Harness {
        create: CreateCycleHandler::new(db.clone()),
        activate: ActivateCycleHandler::new(db.clone()),
        list: ListCyclesHandler::new(db.clone()),
        resolver: CycleResolver::new(db.clone(), CycleName::new(FALLBACK).unwrap()),
        db,
    }
}

impl Harness {
    async fn create(&self, name: &str) -> CycleId {
        self.create
            .handle(CreateCycleCommand {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id()
    }

    async fn activate(&self, cycle_id: CycleId) {
        self.activate
            .handle(ActivateCycleCommand { cycle_id })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn empty_store_resolves_to_fallback() {
    let h = harness();

    let cycle = h.resolver.system_cycle().await.unwrap();

    assert_eq!(cycle.name.as_str(), FALLBACK);
    assert_eq!(cycle.source, CycleSource::Fallback);
}

#[tokio::test]
async fn create_then_activate_moves_system_cycle() {
    let h = harness();
    let next = h.create("2025-2026").await;

    // Created cycles start inactive
    assert_eq!(h.resolver.system_cycle().await.unwrap().source, CycleSource::Fallback);

    h.activate(next).await;

    let cycle = h.resolver.system_cycle().await.unwrap();
    assert_eq!(cycle.name.as_str(), "2025-2026");
    assert_eq!(cycle.source, CycleSource::Active);
}

#[tokio::test]
async fn activation_leaves_exactly_one_active_cycle() {
    let h = harness();
    let first = h.create("2023-2024").await;
    let second = h.create("2024-2025").await;
    let third = h.create("2025-2026").await;

    for id in [first, second, third, first, third] {
        h.activate(id).await;
        assert_eq!(h.db.active_cycle_count(), 1);
    }

    let cycles = h.list.handle().await.unwrap();
    let active: Vec<_> = cycles.iter().filter(|c| c.is_active()).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), third);
}

#[tokio::test]
async fn activating_unknown_cycle_changes_nothing() {
    let h = harness();
    let current = h.create("2024-2025").await;
    h.activate(current).await;

    let result = h
        .activate
        .handle(ActivateCycleCommand {
            cycle_id: CycleId::new(),
        })
        .await;

    assert!(matches!(result, Err(CycleError::NotFound(_))));
    assert_eq!(h.db.active_cycle_count(), 1);
    assert_eq!(
        h.resolver.system_cycle().await.unwrap().name.as_str(),
        "2024-2025"
    );
}

#[tokio::test]
async fn duplicate_cycle_name_is_reported() {
    let h = harness();
    h.create("2025-2026").await;

    let result = h
        .create
        .handle(CreateCycleCommand {
            name: " 2025-2026 ".to_string(),
        })
        .await;

    assert!(matches!(result, Err(CycleError::AlreadyExists(_))));
}
