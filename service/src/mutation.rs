use ::entity::{actor, employment, performance, prelude::*};
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    form::{ActorForm, EmploymentForm, PerformanceForm},
    integrity::{CascadeOutcome, Integrity, PerformanceCascade},
    view::{EmploymentDetails, PerformanceWithCast},
    Query, ServiceError,
};

pub struct Mutation;

impl Mutation {
    #[instrument(skip_all)]
    pub async fn create_actor(db: &DbConn, form: ActorForm) -> Result<actor::Model, ServiceError> {
        form.validate()?;
        let name = form
            .name
            .ok_or_else(|| ServiceError::required("Actor", "name"))?;

        let actor = actor::ActiveModel {
            name: Set(name),
            rank: Set(form.rank.flatten()),
            experience: Set(form.experience.unwrap_or_default()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(actor = %actor.id, "actor created");
        Ok(actor)
    }

    /// Overwrites the fields present in `form`; absent fields keep their value.
    #[instrument(skip(db, form))]
    pub async fn update_actor_by_id(
        db: &DbConn,
        id: Uuid,
        form: ActorForm,
    ) -> Result<actor::Model, ServiceError> {
        form.validate()?;
        let mut actor: actor::ActiveModel = Actor::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("Actor"))?
            .into();

        if let Some(name) = form.name {
            actor.name = Set(name);
        }
        if let Some(rank) = form.rank {
            actor.rank = Set(rank);
        }
        if let Some(experience) = form.experience {
            actor.experience = Set(experience);
        }

        Ok(actor.update(db).await?)
    }

    pub async fn delete_actor(db: &DbConn, id: Uuid) -> Result<CascadeOutcome, ServiceError> {
        Integrity::delete_actor_cascade(db, id).await
    }

    pub async fn create_performance(
        db: &DbConn,
        form: PerformanceForm,
    ) -> Result<PerformanceWithCast, ServiceError> {
        Integrity::create_performance_with_cast(db, form).await
    }

    /// Overwrites the fields present in `form`. A `cast` in the body is ignored.
    #[instrument(skip(db, form))]
    pub async fn update_performance_by_id(
        db: &DbConn,
        id: Uuid,
        form: PerformanceForm,
    ) -> Result<performance::Model, ServiceError> {
        form.validate()?;
        let mut performance: performance::ActiveModel = Performance::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("Performance"))?
            .into();

        if let Some(name) = form.name {
            performance.name = Set(name);
        }
        if let Some(year) = form.year {
            performance.year = Set(year);
        }
        if let Some(budget) = form.budget {
            performance.budget = Set(budget);
        }

        Ok(performance.update(db).await?)
    }

    pub async fn delete_performance(
        db: &DbConn,
        id: Uuid,
        cascade: PerformanceCascade,
    ) -> Result<CascadeOutcome, ServiceError> {
        Integrity::delete_performance_cascade(db, id, cascade).await
    }

    /// Inserts a standalone employment.
    ///
    /// The actor and performance references are stored as given; whether they
    /// point at existing records is not checked.
    #[instrument(skip_all)]
    pub async fn create_employment(
        db: &DbConn,
        form: EmploymentForm,
    ) -> Result<employment::Model, ServiceError> {
        form.validate()?;
        let actor_id = form
            .actor
            .ok_or_else(|| ServiceError::required("Employment", "actor"))?;
        let performance_id = form
            .performance
            .ok_or_else(|| ServiceError::required("Employment", "performance"))?;
        let role = form
            .role
            .ok_or_else(|| ServiceError::required("Employment", "role"))?;
        let annual_contract_value = form
            .annual_contract_value
            .ok_or_else(|| ServiceError::required("Employment", "annualContractValue"))?;

        let employment = employment::ActiveModel {
            actor_id: Set(actor_id),
            performance_id: Set(performance_id),
            role: Set(role),
            annual_contract_value: Set(annual_contract_value),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(employment = %employment.id, "employment created");
        Ok(employment)
    }

    /// Overwrites the fields present in `form`, references included, and
    /// returns the record with both references expanded.
    #[instrument(skip(db, form))]
    pub async fn update_employment_by_id(
        db: &DbConn,
        id: Uuid,
        form: EmploymentForm,
    ) -> Result<EmploymentDetails, ServiceError> {
        form.validate()?;
        let mut employment: employment::ActiveModel = Employment::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("Employment"))?
            .into();

        if let Some(actor_id) = form.actor {
            employment.actor_id = Set(actor_id);
        }
        if let Some(performance_id) = form.performance {
            employment.performance_id = Set(performance_id);
        }
        if let Some(role) = form.role {
            employment.role = Set(role);
        }
        if let Some(value) = form.annual_contract_value {
            employment.annual_contract_value = Set(value);
        }

        let employment = employment.update(db).await?;
        Query::expand_employments(db, vec![employment])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound("Employment"))
    }

    pub async fn delete_employment(db: &DbConn, id: Uuid) -> Result<DeleteResult, ServiceError> {
        let res = Employment::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound("Employment"));
        }
        Ok(res)
    }
}
