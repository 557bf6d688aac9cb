//! Main ApiClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::error::Error;
use crate::error::ErrorBody;
use crate::session::CredentialProvider;

/// The REST client for the quizdash backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across views safely. Every request asks the credential provider for the
/// current session and attaches a bearer credential when one exists.
///
/// # Example
///
/// ```ignore
/// use quizdash_lib::ApiClient;
/// use quizdash_lib::session::SessionStore;
///
/// let sessions = SessionStore::new();
/// let client = ApiClient::builder()
///     .base_url("http://localhost:9000/api")
///     .credentials(sessions.clone())
///     .build();
///
/// let users = client.get("/users", &[("page", "0".into())]).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ApiClientBuilder<Missing, Missing> {
        ApiClientBuilder::new()
    }

    /// Issues a `GET` request with query parameters.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse, Error> {
        let request = self.request(Method::GET, path).await?.query(params);
        self.execute(Method::GET, path, request).await
    }

    /// Issues a `POST` request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        let request = self.request(Method::POST, path).await?.json(body);
        self.execute(Method::POST, path, request).await
    }

    /// Issues a `PUT` request with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        let request = self.request(Method::PUT, path).await?.json(body);
        self.execute(Method::PUT, path, request).await
    }

    /// Issues a `DELETE` request.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, Error> {
        let request = self.request(Method::DELETE, path).await?;
        self.execute(Method::DELETE, path, request).await
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let joined = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let parsed =
            url::Url::parse(&joined).map_err(|err| ApiError::InvalidUrl(format!("{joined}: {err}")))?;
        Ok(parsed.into())
    }

    async fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.url(path)?;
        let mut request = self.inner.http_client.request(method, &url);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        // Expired sessions fail here, before any network traffic.
        if let Some(token) = self.inner.credentials.credentials().await? {
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse, Error> {
        log::debug!("{method} {path}");

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let api_err = match (err.is_timeout(), self.inner.timeout) {
                    (true, Some(timeout)) => ApiError::Timeout(timeout),
                    _ => ApiError::from(err),
                };
                log::warn!("{method} {path} failed: {api_err}");
                return Err(api_err.into());
            }
        };
        let status = response.status().as_u16();

        if response.status().is_success() {
            let text = response.text().await.map_err(ApiError::from)?;
            let data = if text.is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&text)
                    .map_err(|err| ApiError::parse_with_body(err.to_string(), text))?
            };
            Ok(ApiResponse { status, data })
        } else {
            let text = response.text().await.unwrap_or_default();
            let detail = ErrorBody::from_text(&text);
            let message = detail
                .as_ref()
                .and_then(|d| d.message.clone())
                .unwrap_or(text);
            log::warn!("{method} {path} failed with HTTP {status}: {message}");
            Err(Error::Api(ApiError::Http {
                status,
                message,
                detail,
            }))
        }
    }
}

/// A successful response: HTTP status plus the raw JSON payload.
///
/// Use [`json`](ApiResponse::json) to deserialize into a typed value.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    data: serde_json::Value,
}

impl ApiResponse {
    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns a reference to the raw JSON payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Deserializes the payload into a typed value.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_value(self.data)
            .map_err(|err| Error::Api(ApiError::parse(err.to_string())))
    }

    /// Consumes the response and returns the raw JSON payload.
    pub fn into_data(self) -> serde_json::Value {
        self.data
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ApiClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile
/// time.
///
/// # Required Fields
///
/// - `base_url` - The backend base URL
/// - `credentials` - A [`CredentialProvider`] implementation
pub struct ApiClientBuilder<Url, Provider> {
    base_url: Url,
    credentials: Provider,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ApiClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            credentials: Missing,
            timeout: None,
            http_client: None,
        }
    }
}

impl Default for ApiClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ApiClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    pub fn base_url(self, url: impl Into<String>) -> ApiClientBuilder<Set<String>, P> {
        ApiClientBuilder {
            base_url: Set(url.into()),
            credentials: self.credentials,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> ApiClientBuilder<U, Missing> {
    /// Sets the credential provider for authentication.
    pub fn credentials<C: CredentialProvider + 'static>(
        self,
        provider: C,
    ) -> ApiClientBuilder<U, Set<Arc<dyn CredentialProvider>>> {
        ApiClientBuilder {
            base_url: self.base_url,
            credentials: Set(Arc::new(provider) as Arc<dyn CredentialProvider>),
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> ApiClientBuilder<U, P> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ApiClientBuilder<Set<String>, Set<Arc<dyn CredentialProvider>>> {
    /// Builds the [`ApiClient`].
    ///
    /// This method is only available when both `base_url` and
    /// `credentials` have been set.
    pub fn build(self) -> ApiClient {
        let http_client = self.http_client.unwrap_or_default();

        ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url: self.base_url.0,
                credentials: self.credentials.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
