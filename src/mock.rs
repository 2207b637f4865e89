//! In-memory [`Dispatch`] double for exercising request-building code.
//!
//! Responses are canned per `(method, url)` and every call is recorded, so
//! tests can assert on both what was sent and how often.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;

use crate::{Dispatch, DispatchError, RequestResult, RequestSpec};

/// A request as seen by [`MockDispatcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

type RouteKey = (String, String);

/// Table-driven dispatcher.
///
/// Several results registered for one route are served in order and the
/// last one repeats. Unrouted requests get status `0` with a send error.
#[derive(Debug, Default)]
pub struct MockDispatcher {
    routes: Mutex<HashMap<RouteKey, VecDeque<RequestResult>>>,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `result` for requests matching `method` and `url` exactly.
    pub fn respond(self, method: &str, url: impl Into<String>, result: RequestResult) -> Self {
        lock(&self.routes)
            .entry((method.to_ascii_uppercase(), url.into()))
            .or_default()
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_to(&self, method: &str, url: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method.eq_ignore_ascii_case(method) && call.url == url)
            .count()
    }
}

#[async_trait]
impl Dispatch for MockDispatcher {
    async fn dispatch(&self, spec: RequestSpec) -> RequestResult {
        let key = (spec.method.to_ascii_uppercase(), spec.url);
        lock(&self.calls).push(RecordedRequest {
            method: key.0.clone(),
            url: key.1.clone(),
            body: spec.body,
        });

        let canned = match lock(&self.routes).get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        let mut result = canned.unwrap_or_else(|| {
            RequestResult::failed(
                0,
                DispatchError::Send(format!("no canned response for {} {}", key.0, key.1)),
            )
        });
        result.attempts = result.attempts.max(1);
        result
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
