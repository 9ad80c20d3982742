//! Request bodies accepted by the access layer.
//!
//! Every field is optional at the type level so that one form serves both
//! creation (where the access layer insists on the required fields) and
//! updates (where only present fields overwrite the stored record).

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorForm {
    pub name: Option<String>,
    /// `None` when absent, `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub rank: Option<Option<String>>,
    pub experience: Option<i32>,
}

impl ActorForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            non_blank("Actor", "name", name)?;
        }
        if self.experience.is_some_and(|years| years < 0) {
            return Err(ServiceError::invalid("Actor", "experience", "must not be negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceForm {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub budget: Option<f64>,
    /// Initial cast; only honoured on creation.
    #[serde(default)]
    pub cast: Vec<CastForm>,
}

impl PerformanceForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            non_blank("Performance", "name", name)?;
        }
        if let Some(budget) = self.budget {
            non_negative("Performance", "budget", budget)?;
        }
        Ok(())
    }
}

/// One entry of the cast list embedded in a performance creation request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastForm {
    #[serde(alias = "actorId")]
    pub actor: Option<Uuid>,
    /// Ignored: cast entries always point at the performance being created.
    #[serde(default, alias = "performanceId")]
    pub performance: Option<Uuid>,
    pub role: Option<String>,
    pub annual_contract_value: Option<f64>,
}

impl CastForm {
    /// Checks the entry and returns `(actor, role, annual_contract_value)`.
    pub fn validate(&self) -> Result<(Uuid, String, f64), ServiceError> {
        let actor = self
            .actor
            .ok_or_else(|| ServiceError::required("Employment", "actor"))?;
        let role = self
            .role
            .clone()
            .ok_or_else(|| ServiceError::required("Employment", "role"))?;
        non_blank("Employment", "role", &role)?;
        let value = self
            .annual_contract_value
            .ok_or_else(|| ServiceError::required("Employment", "annualContractValue"))?;
        non_negative("Employment", "annualContractValue", value)?;
        Ok((actor, role, value))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentForm {
    #[serde(alias = "actorId")]
    pub actor: Option<Uuid>,
    #[serde(alias = "performanceId")]
    pub performance: Option<Uuid>,
    pub role: Option<String>,
    pub annual_contract_value: Option<f64>,
}

impl EmploymentForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(role) = &self.role {
            non_blank("Employment", "role", role)?;
        }
        if let Some(value) = self.annual_contract_value {
            non_negative("Employment", "annualContractValue", value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        non_blank("User", "username", &self.username)?;
        non_blank("User", "email", &self.email)?;
        non_blank("User", "password", &self.password)?;
        if !self.email.contains('@') {
            return Err(ServiceError::invalid("User", "email", "is not a valid address"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn non_blank(entity: &str, field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::required(entity, field))
    } else {
        Ok(())
    }
}

// Tells an explicit `null` apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_negative(entity: &str, field: &str, value: f64) -> Result<(), ServiceError> {
    if !value.is_finite() || value < 0.0 {
        Err(ServiceError::invalid(entity, field, "must be a non-negative number"))
    } else {
        Ok(())
    }
}
