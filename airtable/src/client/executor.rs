//! Request execution with tracing instrumentation.
//!
//! This module provides the [`Client`] struct, which renders requests against
//! a base, attaches the API key and classifies the outcome into transport
//! failures and API-reported errors.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use tracing::{instrument, warn, Span};
use url::Url;

use crate::config::{normalize_endpoint, ClientConfig};
use crate::error::{AirtableError, ClientRequestError, ConfigError, TransportError};
use crate::query::QueryEncoder;
use crate::record::Record;
use crate::table::Table;

/// Builder for configuring a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: String,
    base_id: String,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    default_headers: HeaderMap,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    fn new(api_key: String, base_id: String) -> Self {
        Self {
            api_key,
            base_id,
            endpoint: None,
            timeout: None,
            connect_timeout: None,
            default_headers: HeaderMap::new(),
            http: None,
        }
    }

    /// Overrides the REST root, e.g. to point at a proxy or a mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the whole-request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = Client::builder(api_key, "appXXXXXXXXXXXXXX")
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, AirtableError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Uses an existing transport instead of building one.
    ///
    /// Timeouts set on this builder are not applied to a supplied transport.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the [`Client`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the key or base id is empty, the endpoint is not a
    /// valid URL, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client, AirtableError> {
        let mut config = ClientConfig::new(self.api_key, self.base_id)?;
        if let Some(endpoint) = &self.endpoint {
            config.set_endpoint(endpoint)?;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout = timeout;
        }

        Client::assemble(config, self.default_headers, self.http)
    }
}

/// Async client for one base.
///
/// Cloning is cheap and clones share the connection pool.
///
/// ## Examples
///
/// ```rust,ignore
/// use airtable::{Client, QueryParams};
/// use reqwest::Method;
///
/// let client = Client::new("keyXXXXXXXXXXXXXX", "appXXXXXXXXXXXXXX")?;
/// let body = client
///     .request_bytes(Method::GET, "Main", &QueryParams::new())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    auth: HeaderValue,
    default_headers: HeaderMap,
}

impl Client {
    /// Creates a new builder.
    ///
    /// ## Arguments
    ///
    /// * `api_key` - Personal access token or API key, sent as a bearer token.
    /// * `base_id` - The base to talk to, e.g. `appXXXXXXXXXXXXXX`.
    pub fn builder(api_key: impl Into<String>, base_id: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key.into(), base_id.into())
    }

    /// Creates a client for the default endpoint with default settings.
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
    ) -> Result<Self, AirtableError> {
        Self::builder(api_key, base_id).build()
    }

    /// Creates a client from a prepared config.
    pub fn from_config(mut config: ClientConfig) -> Result<Self, AirtableError> {
        config.validate()?;
        config.endpoint = normalize_endpoint(config.endpoint.as_str())?;
        Self::assemble(config, HeaderMap::new(), None)
    }

    /// Creates a client from `AIRTABLE_API_KEY` / `AIRTABLE_BASE_ID`.
    pub fn from_env() -> Result<Self, AirtableError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    fn assemble(
        config: ClientConfig,
        default_headers: HeaderMap,
        http: Option<reqwest::Client>,
    ) -> Result<Self, AirtableError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let http = match http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .connect_timeout(config.connect_timeout)
                .pool_max_idle_per_host(10)
                .build()
                .map_err(ConfigError::HttpClient)?,
        };

        Ok(Self {
            http,
            config,
            auth,
            default_headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_id(&self) -> &str {
        &self.config.base_id
    }

    /// Binds a table of this base to a record type.
    ///
    /// The record descriptor is computed and validated here, once.
    ///
    /// ## Errors
    ///
    /// Returns an error if `name` is empty or `R` maps a column twice.
    pub fn table<R: Record>(&self, name: impl Into<String>) -> Result<Table<'_, R>, AirtableError> {
        Table::new(self, name.into())
    }

    /// Performs a request and returns the raw body of a 2xx response.
    ///
    /// `resource` is a `/`-separated path below the base, such as `Main` or
    /// `Main/recXXXXXXXXXXXXXX`. Each segment is percent-encoded. An empty
    /// query adds no `?` to the URL.
    ///
    /// ## Errors
    ///
    /// - [`AirtableError::Query`] if the options cannot be encoded (nothing is sent)
    /// - [`AirtableError::Request`] if the API answered with a non-2xx status
    /// - [`AirtableError::Transport`] if no response could be obtained
    pub async fn request_bytes<Q>(
        &self,
        method: Method,
        resource: &str,
        query: &Q,
    ) -> Result<Bytes, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        let segments: Vec<&str> = resource.split('/').filter(|s| !s.is_empty()).collect();
        self.request_segments(method, &segments, query).await
    }

    /// Builds the full URL for a request.
    pub(crate) fn resource_url<Q>(&self, segments: &[&str], query: &Q) -> Result<Url, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        let query = query.encode()?;

        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidEndpoint(self.config.endpoint.to_string()))?
            .pop_if_empty()
            .push(&self.config.base_id)
            .extend(segments);

        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    #[instrument(
        name = "airtable_request",
        skip(self, query),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub(crate) async fn request_segments<Q>(
        &self,
        method: Method,
        segments: &[&str],
        query: &Q,
    ) -> Result<Bytes, AirtableError>
    where
        Q: QueryEncoder + ?Sized,
    {
        let url = self.resource_url(segments, query)?;
        Span::current().record("http.url", url.as_str());

        let response = self
            .http
            .request(method, url)
            .headers(self.default_headers.clone())
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .await
            .map_err(TransportError::Send)?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            let body = response.bytes().await.map_err(TransportError::Body)?;
            let err = ClientRequestError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            );
            warn!(
                status = err.status,
                error_type = err.error_type.as_deref().unwrap_or("unknown"),
                "API request failed"
            );
            return Err(err.into());
        }

        Span::current().record("otel.status_code", "OK");

        let body = response.bytes().await.map_err(TransportError::Body)?;
        Ok(body)
    }
}
