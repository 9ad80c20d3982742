use serde::Serialize;

pub mod actor;
pub mod employment;
pub mod performance;
pub mod user;

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Message {
    message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
