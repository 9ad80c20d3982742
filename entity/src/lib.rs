pub mod prelude;

pub mod actor;
pub mod employment;
pub mod performance;
pub mod user;

/// Stamps `created_at` on insert and refreshes `updated_at` on every save.
macro_rules! stamp {
    ($model:expr, $insert:expr) => {{
        let mut model = $model;
        let now = chrono::Utc::now();
        if $insert {
            model.created_at = sea_orm::Set(now);
        }
        model.updated_at = sea_orm::Set(now);
        model
    }};
}

pub(crate) use stamp;
