//! `accountapi-http` is an async HTTP client for the organisation accounts API.
//!
//! Resource calls go through [`AccountClient`]:
//! - [`AccountClient::fetch`]
//! - [`AccountClient::create`]
//! - [`AccountClient::delete`]
//!
//! Each call is executed by a [`Dispatch`] implementation. [`HttpDispatcher`]
//! retries transport failures and transient statuses with exponential
//! backoff and reports the raw outcome as a [`RequestResult`]; unexpected
//! statuses are turned into errors by [`classify`].

mod classify;
mod client;
mod dispatcher;
mod error;
mod options;
mod request;
mod types;
mod wire;

pub mod mock;

pub use classify::{classify, status_category, UNKNOWN_CATEGORY};
pub use client::{accounts_url, AccountClient, ACCOUNTS_PATH, BASE_URL_ENV};
pub use dispatcher::{Dispatch, HttpDispatcher};
pub use error::{ApiError, DispatchError};
pub use options::{Backoff, ClientOptions, RetryPolicy, TransportConfig, DEFAULT_BASE_URL};
pub use request::{RequestResult, RequestSpec};
pub use tokio_util::sync::CancellationToken;
pub use types::{AccountAttributes, AccountCreateAttributes, AccountCreateParams, AccountData};

pub type Result<T> = std::result::Result<T, ApiError>;
