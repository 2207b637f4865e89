use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    classify,
    wire::{RequestEnvelope, ResponseEnvelope},
    AccountCreateParams, AccountData, ApiError, ClientOptions, Dispatch, HttpDispatcher,
    RequestResult, RequestSpec, Result,
};

/// Resource path of the accounts collection.
pub const ACCOUNTS_PATH: &str = "v1/organisation/accounts";

/// Environment variable read by [`AccountClient::from_env`].
pub const BASE_URL_ENV: &str = "ACCOUNTAPI_BASE_URL";

/// Formats a base URL into the accounts collection URL.
///
/// Example: `"http://localhost:8080/"` → `"http://localhost:8080/v1/organisation/accounts"`
pub fn accounts_url(base_url: &str) -> String {
    format!("{}/{ACCOUNTS_PATH}", base_url.trim_end_matches('/'))
}

#[derive(Clone)]
/// Client for the organisation accounts API.
pub struct AccountClient {
    dispatcher: Arc<dyn Dispatch>,
    base_url: String,
}

impl fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url)
            .field("dispatcher", &"<dyn Dispatch>")
            .finish()
    }
}

impl AccountClient {
    /// Creates a client backed by an [`HttpDispatcher`].
    ///
    /// A caller-supplied `http_client` is used as-is; otherwise the
    /// transport is built from `options.transport`.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let dispatcher = match options.http_client {
            Some(http) => HttpDispatcher::with_client(http),
            None => HttpDispatcher::from_config(&options.transport)?,
        }
        .with_retry_policy(options.retry);
        Ok(Self::with_dispatcher(options.base_url, Arc::new(dispatcher)))
    }

    /// Creates a client over any [`Dispatch`] implementation.
    pub fn with_dispatcher(base_url: impl Into<String>, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            dispatcher,
            base_url: base_url.into(),
        }
    }

    /// Creates a client from the environment.
    ///
    /// Reads `ACCOUNTAPI_BASE_URL` (e.g. `http://localhost:8080`); all other
    /// settings keep their defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| {
            ApiError::Config(format!("missing {BASE_URL_ENV} environment variable"))
        })?;
        if base_url.trim().is_empty() {
            return Err(ApiError::Config(format!("{BASE_URL_ENV} is set but empty")));
        }
        Self::new(ClientOptions {
            base_url: base_url.trim().to_owned(),
            ..ClientOptions::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one account by id.
    pub async fn fetch(&self, account_id: &str) -> Result<AccountData> {
        ensure_account_id(account_id)?;
        let url = format!("{}/{account_id}", accounts_url(&self.base_url));
        let result = self.send(RequestSpec::get(url)).await?;

        if result.status != 200 {
            return Err(classify(result.status, &result.body));
        }
        decode_data(&result.body, "received invalid response")
    }

    /// Creates an account and returns the stored representation.
    pub async fn create(&self, params: &AccountCreateParams) -> Result<AccountData> {
        let body = serde_json::to_vec(&RequestEnvelope { data: params })
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        let result = self
            .send(RequestSpec::post(accounts_url(&self.base_url), body))
            .await?;

        if result.status != 201 {
            return Err(classify(result.status, &result.body));
        }
        decode_data(&result.body, "resource created, but received invalid response")
    }

    /// Deletes the given version of an account.
    pub async fn delete(&self, account_id: &str, version: i64) -> Result<()> {
        ensure_account_id(account_id)?;
        let url = format!(
            "{}/{account_id}?version={version}",
            accounts_url(&self.base_url)
        );
        let result = self.send(RequestSpec::delete(url)).await?;

        if result.status != 204 {
            return Err(classify(result.status, &result.body));
        }
        Ok(())
    }

    async fn send(&self, spec: RequestSpec) -> Result<RequestResult> {
        let mut result = self.dispatcher.dispatch(spec).await;
        match result.error.take() {
            Some(err) => Err(err.into()),
            None => Ok(result),
        }
    }
}

/// Ids travel as one path segment, so only unreserved URL characters are
/// accepted and dot-only ids are refused.
fn ensure_account_id(account_id: &str) -> Result<()> {
    let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
    if account_id.is_empty()
        || account_id.chars().all(|c| c == '.')
        || !account_id.chars().all(unreserved)
    {
        return Err(ApiError::InvalidArgument("invalid account id".to_owned()));
    }
    Ok(())
}

fn decode_data<T: DeserializeOwned>(body: &[u8], context: &'static str) -> Result<T> {
    let envelope: ResponseEnvelope<T> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode {
            context,
            message: err.to_string(),
        })?;
    envelope.data.ok_or_else(|| ApiError::Decode {
        context,
        message: "missing data".to_owned(),
    })
}
