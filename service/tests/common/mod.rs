#![allow(dead_code)]

use ::entity::{actor, employment, performance};
use migration::{Migrator, MigratorTrait};
use sea_orm::*;
use theater_service::{
    form::{ActorForm, EmploymentForm},
    Mutation,
};
use uuid::Uuid;

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn create_actor(db: &DbConn, name: &str) -> actor::Model {
    Mutation::create_actor(
        db,
        ActorForm {
            name: Some(name.to_owned()),
            rank: Some(Some("Principal".to_owned())),
            experience: Some(5),
        },
    )
    .await
    .unwrap()
}

pub async fn create_performance(db: &DbConn, name: &str, year: i32) -> performance::Model {
    performance::ActiveModel {
        name: Set(name.to_owned()),
        year: Set(year),
        budget: Set(5000.0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn employ(db: &DbConn, actor: Uuid, performance: Uuid, role: &str) -> employment::Model {
    Mutation::create_employment(
        db,
        EmploymentForm {
            actor: Some(actor),
            performance: Some(performance),
            role: Some(role.to_owned()),
            annual_contract_value: Some(1000.0),
        },
    )
    .await
    .unwrap()
}

pub async fn count<E>(db: &DbConn, _: E) -> u64
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    E::find().count(db).await.unwrap()
}
