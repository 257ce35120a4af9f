//! CycleResolver - decides which academic cycle a request is scoped to.
//!
//! Two notions coexist:
//!
//! - the **system** cycle, flagged active in the store, where new uploads land
//! - the **selected** cycle, the Director's per-session browsing choice
//!
//! Nothing is cached; every call reads the store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::academic_cycle::{CycleError, CycleName, ResolvedCycle};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::CycleRepository;

pub struct CycleResolver {
    repository: Arc<dyn CycleRepository>,
    fallback: CycleName,
}

impl CycleResolver {
    pub fn new(repository: Arc<dyn CycleRepository>, fallback: CycleName) -> Self {
        Self {
            repository,
            fallback,
        }
    }

    /// The active cycle, or the configured fallback name when none is active.
    pub async fn system_cycle(&self) -> Result<ResolvedCycle, CycleError> {
        match self.repository.find_active().await? {
            Some(cycle) => Ok(ResolvedCycle::active(cycle.name().clone())),
            None => {
                warn!(
                    fallback = %self.fallback,
                    "No academic cycle is active, using configured fallback"
                );
                Ok(ResolvedCycle::fallback(self.fallback.clone()))
            }
        }
    }

    /// The session's selected cycle, defaulting to the system cycle.
    pub async fn selected_cycle(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<ResolvedCycle, CycleError> {
        match user.selected_cycle.as_deref().map(CycleName::new) {
            Some(Ok(name)) => Ok(ResolvedCycle::selected(name)),
            Some(Err(e)) => {
                debug!(error = %e, "Ignoring unusable selected cycle in session");
                self.system_cycle().await
            }
            None => self.system_cycle().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::academic_cycle::{AcademicCycle, CycleSource};
    use crate::domain::foundation::{AccountId, Role};

    fn name(value: &str) -> CycleName {
        CycleName::new(value).unwrap()
    }

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    async fn resolver_with(cycles: &[(&str, bool)]) -> CycleResolver {
        let db = Arc::new(InMemoryDatabase::new());
        for (n, active) in cycles {
            let cycle = AcademicCycle::new(name(n));
            CycleRepository::save(db.as_ref(), &cycle).await.unwrap();
            if *active {
                db.activate(&cycle.id()).await.unwrap();
            }
        }
        CycleResolver::new(db, name("2024-2025"))
    }

    #[tokio::test]
    async fn system_cycle_is_the_active_one() {
        let resolver = resolver_with(&[("2023-2024", false), ("2025-2026", true)]).await;
        let resolved = resolver.system_cycle().await.unwrap();
        assert_eq!(resolved.name.as_str(), "2025-2026");
        assert_eq!(resolved.source, CycleSource::Active);
    }

    #[tokio::test]
    async fn system_cycle_falls_back_when_none_active() {
        let resolver = resolver_with(&[("2023-2024", false)]).await;
        let resolved = resolver.system_cycle().await.unwrap();
        assert_eq!(resolved.name.as_str(), "2024-2025");
        assert!(resolved.is_fallback());
    }

    #[tokio::test]
    async fn selected_cycle_prefers_session_choice() {
        let resolver = resolver_with(&[("2025-2026", true)]).await;
        let user = director().with_selected_cycle("2023-2024");
        let resolved = resolver.selected_cycle(&user).await.unwrap();
        assert_eq!(resolved.name.as_str(), "2023-2024");
        assert_eq!(resolved.source, CycleSource::Selected);
    }

    #[tokio::test]
    async fn selected_cycle_defaults_to_system_cycle() {
        let resolver = resolver_with(&[("2025-2026", true)]).await;
        let resolved = resolver.selected_cycle(&director()).await.unwrap();
        assert_eq!(resolved.name.as_str(), "2025-2026");
        assert_eq!(resolved.source, CycleSource::Active);
    }
}
