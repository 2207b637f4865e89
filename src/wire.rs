use serde::{Deserialize, Serialize};

/// `{"data": ...}` wrapper used by the accounts API in both directions.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, T> {
    pub data: &'a T,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Option<T>,
}
