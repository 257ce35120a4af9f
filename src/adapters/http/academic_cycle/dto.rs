//! HTTP DTOs for academic cycle endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::academic_cycle::{AcademicCycle, CycleSource, ResolvedCycle};

#[derive(Clone, Deserialize)]
pub struct CreateCycleForm {
    pub nombre: String,
}

#[derive(Clone, Deserialize)]
pub struct SelectCycleForm {
    pub ciclo: String,
}

/// The cycle a page is scoped to, with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleResponse {
    pub name: String,
    pub source: CycleSource,
}

impl From<&ResolvedCycle> for CycleResponse {
    fn from(cycle: &ResolvedCycle) -> Self {
        Self {
            name: cycle.name.to_string(),
            source: cycle.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicCycleResponse {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&AcademicCycle> for AcademicCycleResponse {
    fn from(cycle: &AcademicCycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            name: cycle.name().to_string(),
            is_active: cycle.is_active(),
            created_at: cycle.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleListResponse {
    pub current: CycleResponse,
    pub cycles: Vec<AcademicCycleResponse>,
}
