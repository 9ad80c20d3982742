//! Cross-entity rules for the actor / performance / employment graph.
//!
//! Employment rows reference an actor and a performance by id only, so the
//! store will happily keep an employment whose actor is gone. The operations
//! here are the only places that delete across entity types.

use ::entity::{actor, employment, performance, prelude::*};
use sea_orm::*;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    form::PerformanceForm,
    view::{CastMember, EmploymentWithActor, EmploymentWithPerformance, PerformanceWithCast},
    ServiceError,
};

/// How a performance deletion cleans up its employments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PerformanceCascade {
    /// Delete the performance, then its employments, as two independent
    /// writes. A failure in between leaves orphaned employments behind.
    #[default]
    Sequential,
    /// Both deletions commit together or not at all.
    Atomic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub employments_removed: u64,
}

pub struct Integrity;

impl Integrity {
    /// Inserts a performance and its initial cast in one transaction.
    ///
    /// Every cast entry is bound to the new performance, whatever the caller
    /// put in its `performance` field. Cast entries are validated inside the
    /// transaction, so a bad entry rolls back the performance as well.
    #[instrument(skip_all, fields(cast = form.cast.len()))]
    pub async fn create_performance_with_cast(
        db: &DbConn,
        form: PerformanceForm,
    ) -> Result<PerformanceWithCast, ServiceError> {
        form.validate()?;
        let PerformanceForm {
            name,
            year,
            budget,
            cast,
        } = form;
        let name = name.ok_or_else(|| ServiceError::required("Performance", "name"))?;
        let year = year.ok_or_else(|| ServiceError::required("Performance", "year"))?;
        let budget = budget.ok_or_else(|| ServiceError::required("Performance", "budget"))?;

        let (performance, employments) = db
            .transaction::<_, _, ServiceError>(|txn| {
                Box::pin(async move {
                    let performance = performance::ActiveModel {
                        name: Set(name),
                        year: Set(year),
                        budget: Set(budget),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let mut employments = Vec::with_capacity(cast.len());
                    for entry in &cast {
                        let (actor_id, role, annual_contract_value) = entry.validate()?;
                        let employment = employment::ActiveModel {
                            actor_id: Set(actor_id),
                            performance_id: Set(performance.id),
                            role: Set(role),
                            annual_contract_value: Set(annual_contract_value),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        employments.push(employment);
                    }

                    Ok((performance, employments))
                })
            })
            .await?;

        info!(performance = %performance.id, cast = employments.len(), "performance created");

        // The write is committed at this point; a failed read only costs the
        // actor expansion.
        let cast = match Self::list_cast_for_performance(db, performance.id).await {
            Ok(cast) => cast,
            Err(err) => {
                warn!(performance = %performance.id, "could not expand cast: {err}");
                employments
                    .into_iter()
                    .map(|employment| CastMember::new(employment, None))
                    .collect()
            }
        };

        Ok(PerformanceWithCast { performance, cast })
    }

    /// Deletes an actor together with every employment referencing it.
    #[instrument(skip(db))]
    pub async fn delete_actor_cascade(
        db: &DbConn,
        actor_id: Uuid,
    ) -> Result<CascadeOutcome, ServiceError> {
        let outcome = db
            .transaction::<_, _, ServiceError>(|txn| {
                Box::pin(async move {
                    let deleted = Actor::delete_by_id(actor_id).exec(txn).await?;
                    if deleted.rows_affected == 0 {
                        return Err(ServiceError::NotFound("Actor"));
                    }
                    let employments_removed = delete_employments(
                        txn,
                        employment::Column::ActorId,
                        actor_id,
                    )
                    .await?;
                    Ok(CascadeOutcome {
                        employments_removed,
                    })
                })
            })
            .await?;

        info!(
            actor = %actor_id,
            employments = outcome.employments_removed,
            "actor deleted"
        );
        Ok(outcome)
    }

    /// Deletes a performance and every employment referencing it.
    ///
    /// With [`PerformanceCascade::Sequential`] the two deletions are separate
    /// writes; see its documentation for the consequence.
    #[instrument(skip(db))]
    pub async fn delete_performance_cascade(
        db: &DbConn,
        performance_id: Uuid,
        cascade: PerformanceCascade,
    ) -> Result<CascadeOutcome, ServiceError> {
        let outcome = match cascade {
            PerformanceCascade::Atomic => {
                db.transaction::<_, _, ServiceError>(|txn| {
                    Box::pin(async move {
                        let deleted = Performance::delete_by_id(performance_id).exec(txn).await?;
                        if deleted.rows_affected == 0 {
                            return Err(ServiceError::NotFound("Performance"));
                        }
                        let employments_removed = delete_employments(
                            txn,
                            employment::Column::PerformanceId,
                            performance_id,
                        )
                        .await?;
                        Ok(CascadeOutcome {
                            employments_removed,
                        })
                    })
                })
                .await?
            }
            PerformanceCascade::Sequential => {
                let deleted = Performance::delete_by_id(performance_id).exec(db).await?;
                if deleted.rows_affected == 0 {
                    return Err(ServiceError::NotFound("Performance"));
                }
                let employments_removed =
                    delete_employments(db, employment::Column::PerformanceId, performance_id)
                        .await
                        .inspect_err(|err| {
                            error!(
                                performance = %performance_id,
                                "performance deleted but its employments were left behind: {err}"
                            )
                        })?;
                CascadeOutcome {
                    employments_removed,
                }
            }
        };

        info!(
            performance = %performance_id,
            employments = outcome.employments_removed,
            "performance deleted"
        );
        Ok(outcome)
    }

    /// The cast of a performance, each entry with the actor's display fields.
    pub async fn list_cast_for_performance(
        db: &DbConn,
        performance_id: Uuid,
    ) -> Result<Vec<CastMember>, DbErr> {
        let rows = Employment::find()
            .filter(employment::Column::PerformanceId.eq(performance_id))
            .order_by_asc(employment::Column::CreatedAt)
            .order_by_asc(employment::Column::Id)
            .find_also_related(Actor)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(employment, actor)| CastMember::new(employment, actor))
            .collect())
    }

    pub async fn list_employments_for_actor(
        db: &DbConn,
        actor_id: Uuid,
    ) -> Result<Vec<EmploymentWithPerformance>, DbErr> {
        let rows = Employment::find()
            .filter(employment::Column::ActorId.eq(actor_id))
            .order_by_asc(employment::Column::CreatedAt)
            .find_also_related(Performance)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(employment, performance)| EmploymentWithPerformance {
                employment,
                performance: performance.map(Into::into),
            })
            .collect())
    }

    pub async fn list_employments_for_performance(
        db: &DbConn,
        performance_id: Uuid,
    ) -> Result<Vec<EmploymentWithActor>, DbErr> {
        let rows = Employment::find()
            .filter(employment::Column::PerformanceId.eq(performance_id))
            .order_by_asc(employment::Column::CreatedAt)
            .find_also_related(Actor)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(employment, actor)| EmploymentWithActor {
                employment,
                actor: actor.map(|actor: actor::Model| actor.into()),
            })
            .collect())
    }
}

async fn delete_employments<C>(
    conn: &C,
    reference: employment::Column,
    id: Uuid,
) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let res = Employment::delete_many()
        .filter(reference.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
