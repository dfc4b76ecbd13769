//! Request dispatcher shared by every feature client. It attaches the bearer
//! credential read from the session at send time, runs the status handler
//! table on failures, and keeps the tag cache in step with queries and
//! mutations. There are no retries; callers decide what to show.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod interceptor;
pub mod request;

pub use config::ClientConfig;
pub use endpoint::{Mutation, Query};
pub use error::ApiError;
pub use interceptor::{SessionExpired, StatusAction, StatusHandlers};
pub use request::{Body, FilePart, Method, RequestDescriptor};

use reqwest::{
    Client,
    header::AUTHORIZATION,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
    APP_USER_AGENT,
    cache::{QueryCache, QueryKey, Refetch, Subscription, TagProvider},
    session::Session,
};

pub const UNAUTHORIZED: u16 = 401;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Session,
    cache: QueryCache,
    handlers: StatusHandlers,
}

impl ApiClient {
    /// Builds a client with the default handler table (`401` signs out).
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, session: Session, cache: QueryCache) -> Result<Self, ApiError> {
        let handlers = StatusHandlers::new()
            .register(UNAUTHORIZED, Arc::new(SessionExpired::new(session.clone())));
        Self::with_handlers(config, session, cache, handlers)
    }

    /// Builds a client with a caller-supplied handler table.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn with_handlers(
        config: ClientConfig,
        session: Session,
        cache: QueryCache,
        handlers: StatusHandlers,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to initialize HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            session,
            cache,
            handlers,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Sends `request` and returns the JSON body. Empty bodies come back as
    /// an empty object.
    ///
    /// # Errors
    /// Returns `ApiError` for transport failures, non-2xx statuses (after the
    /// status handlers ran) and undecodable bodies.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value, ApiError> {
        let url = self.config.url_for(&request.path);
        let mut builder = self.http.request(request.method.into(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(bearer) = self.session.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|err| {
                        ApiError::Serialization(format!("Invalid upload content type: {err}"))
                    })?;
                builder.multipart(Form::new().part(file.field.clone(), part))
            }
        };

        let response = builder.send().await.map_err(|err| {
            warn!("request failed before a response arrived: {err}");
            ApiError::from(err)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;
        debug!(status = status.as_u16(), "response received");

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            serde_json::from_str(&body)
                .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
        } else {
            let error = ApiError::from_body(status.as_u16(), &body);
            let ran = self.handlers.dispatch(&error);
            if ran > 0 {
                debug!(handlers = ran, "status handlers ran");
            }
            Err(error)
        }
    }

    /// Sends `request` and decodes the body into `T`, bypassing the cache.
    ///
    /// # Errors
    /// See [`ApiClient::execute`].
    pub async fn send<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<T, ApiError> {
        let value = self.execute(request).await?;
        decode(value)
    }

    /// Cached read: served from the cache while fresh, fetched otherwise.
    ///
    /// # Errors
    /// See [`ApiClient::execute`].
    pub async fn query<Q: Query>(&self, query: &Q) -> Result<Q::Output, ApiError> {
        let request = query.request();
        let key = QueryKey::of(&request);

        if let Some(value) = self.cache.fresh(&key) {
            debug!(key = %key, "cache hit");
            return decode(value);
        }

        self.fetch(query, key, request).await
    }

    /// Fetches `query` regardless of the cache and stores the result.
    ///
    /// # Errors
    /// See [`ApiClient::execute`].
    pub async fn refresh<Q: Query>(&self, query: &Q) -> Result<Q::Output, ApiError> {
        let request = query.request();
        let key = QueryKey::of(&request);
        self.fetch(query, key, request).await
    }

    /// Cached value for `query` without touching the network.
    #[must_use]
    pub fn cached<Q: Query>(&self, query: &Q) -> Option<Q::Output> {
        let key = QueryKey::of(&query.request());
        self.cache.peek(&key).and_then(|value| decode(value).ok())
    }

    /// Keeps `query` refetched after invalidations until the guard is dropped.
    #[must_use]
    pub fn subscribe<Q: Query>(&self, query: &Q) -> Subscription {
        self.cache.subscribe(QueryKey::of(&query.request()))
    }

    /// Runs a write. On success the invalidated tags are applied and stale
    /// subscribed reads are refetched before returning.
    ///
    /// # Errors
    /// See [`ApiClient::execute`]. Refetch failures are logged, not returned.
    pub async fn mutate<M: Mutation>(&self, mutation: &M) -> Result<M::Output, ApiError> {
        let request = mutation.request()?;
        let value = self.execute(&request).await?;
        let output: M::Output = decode(value)?;

        let tags = mutation.invalidates(&output);
        let stale = self.cache.invalidate(&tags);
        self.refetch(stale).await;

        Ok(output)
    }

    async fn fetch<Q: Query>(
        &self,
        query: &Q,
        key: QueryKey,
        request: RequestDescriptor,
    ) -> Result<Q::Output, ApiError> {
        let value = self.execute(&request).await?;
        let output: Q::Output = decode(value.clone())?;
        self.cache.store(key, value, request, tag_provider(query));
        Ok(output)
    }

    async fn refetch(&self, stale: Vec<Refetch>) {
        for item in stale {
            match self.execute(&item.request).await {
                Ok(value) => {
                    debug!(key = %item.key, "refetched");
                    self.cache.store(item.key, value, item.request, item.provider);
                }
                Err(err) => warn!(key = %item.key, "refetch failed: {err}"),
            }
        }
    }
}

fn tag_provider<Q: Query>(query: &Q) -> TagProvider {
    let query = query.clone();
    Arc::new(move |value: &Value| {
        serde_json::from_value::<Q::Output>(value.clone())
            .map(|output| query.provides(&output))
            .unwrap_or_default()
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
}
