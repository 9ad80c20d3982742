//! Response shapes that expand references into the records they point at.
//!
//! The expansions are computed at read time from the `employment` table;
//! nothing here is persisted.

use entity::{actor, employment, performance};
use serde::Serialize;
use uuid::Uuid;

/// Name fields of an actor, as shown next to an employment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<actor::Model> for ActorSummary {
    fn from(actor: actor::Model) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
        }
    }
}

/// Actor fields shown in a cast list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastActor {
    pub id: Uuid,
    pub name: String,
    pub rank: Option<String>,
}

impl From<actor::Model> for CastActor {
    fn from(actor: actor::Model) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            rank: actor.rank,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
}

impl From<performance::Model> for PerformanceSummary {
    fn from(performance: performance::Model) -> Self {
        Self {
            id: performance.id,
            name: performance.name,
            year: performance.year,
        }
    }
}

/// One row of a performance's cast.
///
/// `actor` is `None` when the referenced actor no longer exists, or when the
/// expansion could not be read after a successful write.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: Uuid,
    pub performance_id: Uuid,
    pub actor_id: Uuid,
    pub actor: Option<CastActor>,
    pub role: String,
    pub annual_contract_value: f64,
}

impl CastMember {
    pub fn new(employment: employment::Model, actor: Option<actor::Model>) -> Self {
        Self {
            id: employment.id,
            performance_id: employment.performance_id,
            actor_id: employment.actor_id,
            actor: actor.map(Into::into),
            role: employment.role,
            annual_contract_value: employment.annual_contract_value,
        }
    }
}

/// A freshly created performance and its cast.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceWithCast {
    #[serde(flatten)]
    pub performance: performance::Model,
    pub cast: Vec<CastMember>,
}

/// A listed performance; each cast entry carries the full actor record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceDetails {
    #[serde(flatten)]
    pub performance: performance::Model,
    pub cast: Vec<EmploymentWithActorRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmploymentWithActorRecord {
    #[serde(flatten)]
    pub employment: employment::Model,
    pub actor: Option<actor::Model>,
}

/// A listed actor; each employment carries the full performance record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActorDetails {
    #[serde(flatten)]
    pub actor: actor::Model,
    pub employments: Vec<EmploymentWithPerformanceRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmploymentWithPerformanceRecord {
    #[serde(flatten)]
    pub employment: employment::Model,
    pub performance: Option<performance::Model>,
}

/// An employment with both references expanded to their display fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmploymentDetails {
    #[serde(flatten)]
    pub employment: employment::Model,
    pub actor: Option<ActorSummary>,
    pub performance: Option<PerformanceSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmploymentWithActor {
    #[serde(flatten)]
    pub employment: employment::Model,
    pub actor: Option<ActorSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmploymentWithPerformance {
    #[serde(flatten)]
    pub employment: employment::Model,
    pub performance: Option<PerformanceSummary>,
}

/// What register and login hand back to the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub token: String,
}
