//! Data access and integrity rules for the theater backend.
//!
//! [`Query`] and [`Mutation`] are the per-entity access layer. Anything that
//! touches more than one entity type goes through [`Integrity`], which owns
//! the cascading deletes and the transactional performance creation.

mod error;
mod integrity;
mod mutation;
mod query;

pub mod auth;
pub mod form;
pub mod view;

pub use error::ServiceError;
pub use integrity::{CascadeOutcome, Integrity, PerformanceCascade};
pub use mutation::*;
pub use query::*;

pub use sea_orm;
