use std::collections::HashMap;

use ::entity::{actor, employment, performance, prelude::*, user};
use sea_orm::*;
use uuid::Uuid;

use crate::view::{
    ActorDetails, EmploymentDetails, EmploymentWithActorRecord, EmploymentWithPerformanceRecord,
    PerformanceDetails,
};

pub struct Query;

impl Query {
    pub async fn find_actor_by_id(db: &DbConn, id: Uuid) -> Result<Option<actor::Model>, DbErr> {
        Actor::find_by_id(id).one(db).await
    }

    /// Every actor with its employments, each employment with its performance.
    pub async fn find_actors_with_employments(db: &DbConn) -> Result<Vec<ActorDetails>, DbErr> {
        let actors = Actor::find()
            .order_by_asc(actor::Column::CreatedAt)
            .all(db)
            .await?;
        let employments = actors.load_many(Employment, db).await?;

        let performance_ids = employments
            .iter()
            .flatten()
            .map(|employment| employment.performance_id);
        let performances = performances_by_id(db, performance_ids).await?;

        Ok(actors
            .into_iter()
            .zip(employments)
            .map(|(actor, employments)| ActorDetails {
                actor,
                employments: employments
                    .into_iter()
                    .map(|employment| EmploymentWithPerformanceRecord {
                        performance: performances.get(&employment.performance_id).cloned(),
                        employment,
                    })
                    .collect(),
            })
            .collect())
    }

    pub async fn find_performance_by_id(
        db: &DbConn,
        id: Uuid,
    ) -> Result<Option<performance::Model>, DbErr> {
        Performance::find_by_id(id).one(db).await
    }

    /// Every performance with its cast, each cast entry with its actor.
    pub async fn find_performances_with_cast(
        db: &DbConn,
    ) -> Result<Vec<PerformanceDetails>, DbErr> {
        let performances = Performance::find()
            .order_by_asc(performance::Column::CreatedAt)
            .all(db)
            .await?;
        let casts = performances.load_many(Employment, db).await?;

        // one actor lookup for every cast at once
        let sizes: Vec<usize> = casts.iter().map(Vec::len).collect();
        let employments: Vec<employment::Model> = casts.into_iter().flatten().collect();
        let actors = employments.load_one(Actor, db).await?;
        let mut entries = employments
            .into_iter()
            .zip(actors)
            .map(|(employment, actor)| EmploymentWithActorRecord { employment, actor });

        Ok(performances
            .into_iter()
            .zip(sizes)
            .map(|(performance, size)| PerformanceDetails {
                performance,
                cast: entries.by_ref().take(size).collect(),
            })
            .collect())
    }

    pub async fn find_performances_by_year(
        db: &DbConn,
        year: i32,
    ) -> Result<Vec<performance::Model>, DbErr> {
        Performance::find()
            .filter(performance::Column::Year.eq(year))
            .order_by_asc(performance::Column::Name)
            .all(db)
            .await
    }

    pub async fn find_employment_by_id(
        db: &DbConn,
        id: Uuid,
    ) -> Result<Option<EmploymentDetails>, DbErr> {
        let Some(employment) = Employment::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Ok(Self::expand_employments(db, vec![employment]).await?.pop())
    }

    /// Every employment with the actor's name and the performance's name and year.
    pub async fn find_employments(db: &DbConn) -> Result<Vec<EmploymentDetails>, DbErr> {
        let employments = Employment::find()
            .order_by_asc(employment::Column::CreatedAt)
            .all(db)
            .await?;
        Self::expand_employments(db, employments).await
    }

    pub(crate) async fn expand_employments(
        db: &DbConn,
        employments: Vec<employment::Model>,
    ) -> Result<Vec<EmploymentDetails>, DbErr> {
        let actors = employments.load_one(Actor, db).await?;
        let performances = employments.load_one(Performance, db).await?;

        Ok(employments
            .into_iter()
            .zip(actors.into_iter().zip(performances))
            .map(|(employment, (actor, performance))| EmploymentDetails {
                employment,
                actor: actor.map(Into::into),
                performance: performance.map(Into::into),
            })
            .collect())
    }

    pub async fn find_user_by_id(db: &DbConn, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(db).await
    }

    pub async fn find_user_by_email(
        db: &DbConn,
        email: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await
    }

    pub async fn find_all_users(db: &DbConn) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(db)
            .await
    }
}

async fn performances_by_id<I>(
    db: &DbConn,
    ids: I,
) -> Result<HashMap<Uuid, performance::Model>, DbErr>
where
    I: IntoIterator<Item = Uuid>,
{
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(Performance::find()
        .filter(performance::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|performance| (performance.id, performance))
        .collect())
}
