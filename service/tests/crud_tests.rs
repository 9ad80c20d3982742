mod common;

use common::*;
use pretty_assertions::assert_eq;
use theater_service::{
    auth::{Auth, TokenKeys},
    form::{ActorForm, EmploymentForm, LoginForm, PerformanceForm, RegisterForm},
    Mutation, Query, ServiceError,
};
use uuid::Uuid;

#[tokio::test]
async fn actor_crud() {
    let db = &setup().await;

    let actor = Mutation::create_actor(
        db,
        ActorForm {
            name: Some("Ivan".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(actor.experience, 0);
    assert_eq!(actor.rank, None);
    assert_eq!(actor.created_at, actor.updated_at);

    let found = Query::find_actor_by_id(db, actor.id).await.unwrap().unwrap();
    assert_eq!(found, actor);

    let updated = Mutation::update_actor_by_id(
        db,
        actor.id,
        ActorForm {
            rank: Some(Some("Honoured Artist".to_owned())),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Ivan");
    assert_eq!(updated.rank.as_deref(), Some("Honoured Artist"));
    assert_eq!(updated.created_at, actor.created_at);
    assert!(updated.updated_at >= actor.updated_at);

    let cleared = Mutation::update_actor_by_id(
        db,
        actor.id,
        ActorForm {
            rank: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.rank, None);
    assert_eq!(cleared.name, "Ivan");

    let missing = Mutation::update_actor_by_id(db, Uuid::new_v4(), ActorForm::default()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound("Actor"))));

    let outcome = Mutation::delete_actor(db, actor.id).await.unwrap();
    assert_eq!(outcome.employments_removed, 0);
    assert!(Query::find_actor_by_id(db, actor.id).await.unwrap().is_none());
}

#[tokio::test]
async fn actor_requires_name() {
    let db = &setup().await;

    let err = Mutation::create_actor(db, ActorForm::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Actor validation failed: name is required");
}

#[tokio::test]
async fn actors_listed_with_employments_and_performances() {
    let db = &setup().await;
    let a1 = create_actor(db, "Ivan").await;
    let a2 = create_actor(db, "Olena").await;
    let p1 = create_performance(db, "Hamlet", 1990).await;
    employ(db, a1.id, p1.id, "Hamlet").await;

    let actors = Query::find_actors_with_employments(db).await.unwrap();

    assert_eq!(actors.len(), 2);
    let ivan = actors.iter().find(|row| row.actor.id == a1.id).unwrap();
    assert_eq!(ivan.employments.len(), 1);
    assert_eq!(ivan.employments[0].employment.role, "Hamlet");
    assert_eq!(ivan.employments[0].performance.as_ref(), Some(&p1));
    let olena = actors.iter().find(|row| row.actor.id == a2.id).unwrap();
    assert!(olena.employments.is_empty());
}

#[tokio::test]
async fn performance_update_and_year_filter() {
    let db = &setup().await;
    let hamlet = create_performance(db, "Hamlet", 1990).await;
    create_performance(db, "Macbeth", 1991).await;

    let updated = Mutation::update_performance_by_id(
        db,
        hamlet.id,
        PerformanceForm {
            budget: Some(7500.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Hamlet");
    assert_eq!(updated.budget, 7500.0);

    let in_1990 = Query::find_performances_by_year(db, 1990).await.unwrap();
    assert_eq!(in_1990, vec![updated]);
    assert!(Query::find_performances_by_year(db, 2000)
        .await
        .unwrap()
        .is_empty());

    let negative = Mutation::update_performance_by_id(
        db,
        hamlet.id,
        PerformanceForm {
            budget: Some(-1.0),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(negative, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn performances_listed_with_full_cast() {
    let db = &setup().await;
    let a1 = create_actor(db, "Ivan").await;
    let a2 = create_actor(db, "Olena").await;
    let p1 = create_performance(db, "Hamlet", 1990).await;
    let p2 = create_performance(db, "Macbeth", 1991).await;
    let p3 = create_performance(db, "Lear", 1992).await;
    employ(db, a1.id, p1.id, "Hamlet").await;
    employ(db, a2.id, p1.id, "Ophelia").await;
    employ(db, a2.id, p3.id, "Cordelia").await;

    let performances = Query::find_performances_with_cast(db).await.unwrap();
    assert_eq!(performances.len(), 3);

    let cast_of = |id: Uuid| {
        let row = performances
            .iter()
            .find(|row| row.performance.id == id)
            .unwrap();
        let mut cast: Vec<(String, String)> = row
            .cast
            .iter()
            .map(|entry| {
                assert_eq!(entry.employment.performance_id, id);
                (entry.employment.role.clone(), entry.actor.as_ref().unwrap().name.clone())
            })
            .collect();
        cast.sort();
        cast
    };

    assert_eq!(
        cast_of(p1.id),
        vec![
            ("Hamlet".to_owned(), "Ivan".to_owned()),
            ("Ophelia".to_owned(), "Olena".to_owned()),
        ]
    );
    assert!(cast_of(p2.id).is_empty());
    assert_eq!(cast_of(p3.id), vec![("Cordelia".to_owned(), "Olena".to_owned())]);
}

#[tokio::test]
async fn employment_crud() {
    let db = &setup().await;
    let a1 = create_actor(db, "Ivan").await;
    let a2 = create_actor(db, "Olena").await;
    let p1 = create_performance(db, "Hamlet", 1990).await;
    let employment = employ(db, a1.id, p1.id, "Hamlet").await;

    let details = Query::find_employment_by_id(db, employment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.actor.as_ref().unwrap().name, "Ivan");
    assert_eq!(details.performance.as_ref().unwrap().year, 1990);

    let updated = Mutation::update_employment_by_id(
        db,
        employment.id,
        EmploymentForm {
            actor: Some(a2.id),
            annual_contract_value: Some(2500.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.employment.actor_id, a2.id);
    assert_eq!(updated.employment.role, "Hamlet");
    assert_eq!(updated.employment.annual_contract_value, 2500.0);
    assert_eq!(updated.actor.unwrap().name, "Olena");

    let all = Query::find_employments(db).await.unwrap();
    assert_eq!(all.len(), 1);

    Mutation::delete_employment(db, employment.id).await.unwrap();
    assert!(Query::find_employment_by_id(db, employment.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn employment_requires_contract_value() {
    let db = &setup().await;

    let err = Mutation::create_employment(
        db,
        EmploymentForm {
            actor: Some(Uuid::new_v4()),
            performance: Some(Uuid::new_v4()),
            role: Some("Hamlet".to_owned()),
            annual_contract_value: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Employment validation failed: annualContractValue is required"
    );
    assert_eq!(count(db, ::entity::prelude::Employment).await, 0);
}

fn keys() -> TokenKeys {
    TokenKeys::new(b"crud-secret", chrono::Duration::hours(24))
}

fn alice() -> RegisterForm {
    RegisterForm {
        username: "alice".to_owned(),
        email: "a@x.com".to_owned(),
        password: "pw123".to_owned(),
    }
}

#[tokio::test]
async fn register_then_login() {
    let db = &setup().await;
    let keys = keys();

    let registered = Auth::register(db, &keys, alice()).await.unwrap();
    assert_eq!(registered.username, "alice");
    assert_eq!(registered.role, "user");
    assert_eq!(keys.verify(&registered.token).unwrap().sub, registered.id);

    let stored = Query::find_user_by_id(db, registered.id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password, "pw123");

    let logged_in = Auth::login(
        db,
        &keys,
        LoginForm {
            email: "a@x.com".to_owned(),
            password: "pw123".to_owned(),
        },
    )
    .await
    .unwrap();
    assert_eq!(logged_in.id, registered.id);

    assert_eq!(Query::find_all_users(db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = &setup().await;
    let keys = keys();
    Auth::register(db, &keys, alice()).await.unwrap();

    let again = Auth::register(db, &keys, alice()).await;

    assert!(matches!(again, Err(ServiceError::Conflict(_))));
    assert_eq!(Query::find_all_users(db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let db = &setup().await;
    let keys = keys();
    Auth::register(db, &keys, alice()).await.unwrap();

    let wrong_password = Auth::login(
        db,
        &keys,
        LoginForm {
            email: "a@x.com".to_owned(),
            password: "wrong".to_owned(),
        },
    )
    .await
    .unwrap_err();
    let unknown_email = Auth::login(
        db,
        &keys,
        LoginForm {
            email: "b@x.com".to_owned(),
            password: "pw123".to_owned(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}
