//! Uniform remote-call envelope.
//!
//! Every backend call goes through [`Gateway::issue`], which never fails to
//! the caller: transport errors, non-2xx statuses, timeouts and malformed
//! bodies all come back as a failed [`Envelope`]. The actual I/O is behind the
//! [`Transport`] trait so the browser Fetch API can be swapped for a scripted
//! transport in tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{API_BASE_URL, FETCH_TIMEOUT_MS};
use crate::core::error::FetchError;

/// Boxed non-`Send` future, as produced by browser I/O.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

// =============================================================================
// Envelope
// =============================================================================

/// `{success, data, error}` wrapper returned by every remote call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Successful payload, or the error message.
    ///
    /// A success without a payload is reported as an error so callers that
    /// need data can fall back uniformly.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("empty response".to_string()),
            (false, _) => Err(self.error.unwrap_or_else(|| "request failed".to_string())),
        }
    }

    /// Like [`into_result`](Self::into_result), but a success without a
    /// payload is `Ok(None)`. Mutations use this: the backend may accept a
    /// write and send nothing back.
    pub fn into_optional(self) -> Result<Option<T>, String> {
        match (self.success, self.data) {
            (true, data) => Ok(data),
            (false, _) => Err(self.error.unwrap_or_else(|| "request failed".to_string())),
        }
    }

    /// Error message for display, if any.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("request failed")
    }
}

impl Envelope<Value> {
    /// Decode the raw payload into `T`. A decode failure becomes a failed envelope.
    pub fn decode<T: DeserializeOwned>(self) -> Envelope<T> {
        if !self.success {
            return Envelope {
                success: false,
                data: None,
                error: self.error,
            };
        }
        match self.data {
            None | Some(Value::Null) => Envelope {
                success: true,
                data: None,
                error: None,
            },
            Some(value) => match serde_json::from_value(value) {
                Ok(data) => Envelope::ok(data),
                Err(e) => Envelope::failure(FetchError::JsonParseError(e.to_string()).to_string()),
            },
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// In-memory file contents for multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// The transport picks the content type (and boundary) itself.
    Multipart(Vec<MultipartField>),
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: any status, body as text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A call under construction: endpoint, method, optional body and headers.
#[derive(Debug, Clone)]
pub struct Call {
    endpoint: String,
    method: Method,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
    encode_error: Option<String>,
}

impl Call {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: Vec::new(),
            encode_error: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(RequestBody::Json(value)),
            Err(e) => self.encode_error = Some(e.to_string()),
        }
        self
    }

    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = Some(RequestBody::Multipart(fields));
        self
    }

    /// Add or override a header. Later values win over defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Performs the I/O for one request.
///
/// Implementations enforce `timeout_ms` and report non-2xx responses as
/// ordinary [`HttpResponse`]s; the gateway decides what counts as failure.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
        timeout_ms: i32,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, FetchError>>;
}

// =============================================================================
// Gateway
// =============================================================================

/// Normalizes every remote call into an [`Envelope`].
///
/// There are no automatic retries; callers decide what to do with a failure.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport + Send + Sync>,
    base_url: String,
    timeout_ms: i32,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self {
            transport,
            base_url: API_BASE_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> i32 {
        self.timeout_ms
    }

    /// Resolve a [`Call`] into the request the transport will see.
    ///
    /// The JSON content type is a default: caller headers replace it, and it
    /// is left out entirely for multipart bodies.
    pub fn build_request(&self, call: Call) -> HttpRequest {
        let mut headers: Vec<(String, String)> = Vec::new();
        if !matches!(call.body, Some(RequestBody::Multipart(_))) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        for (name, value) in call.headers {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        HttpRequest {
            url: format!("{}{}", self.base_url, call.endpoint),
            method: call.method,
            headers,
            body: call.body,
        }
    }

    /// Issue a call and normalize the outcome. Never fails.
    pub async fn issue(&self, call: Call) -> Envelope<Value> {
        let method = call.method;
        let endpoint = call.endpoint.clone();

        if let Some(err) = call.encode_error.clone() {
            tracing::warn!(%endpoint, error = %err, "request body could not be encoded");
            return Envelope::failure(format!("invalid request body: {}", err));
        }

        let request = self.build_request(call);
        tracing::debug!(method = method.as_str(), %endpoint, "api request");

        let envelope = match self.transport.send(request, self.timeout_ms).await {
            Err(e) => Envelope::failure(e.to_string()),
            Ok(resp) if !resp.is_success() => {
                Envelope::failure(FetchError::HttpError(resp.status).to_string())
            }
            Ok(resp) => parse_envelope(&resp.body),
        };

        if envelope.success {
            tracing::debug!(method = method.as_str(), %endpoint, "api response ok");
        } else {
            tracing::warn!(
                method = method.as_str(),
                %endpoint,
                error = envelope.error_message(),
                "api request failed"
            );
        }
        envelope
    }

    /// Issue a call and decode the payload into `T`.
    pub async fn issue_as<T: DeserializeOwned>(&self, call: Call) -> Envelope<T> {
        self.issue(call).await.decode()
    }
}

/// Parse a 2xx body. Failures always carry `data: None`.
fn parse_envelope(body: &str) -> Envelope<Value> {
    match serde_json::from_str::<Envelope<Value>>(body) {
        Ok(env) if env.success => env,
        Ok(env) => Envelope {
            success: false,
            data: None,
            error: Some(env.error.unwrap_or_else(|| "request failed".to_string())),
        },
        Err(e) => Envelope::failure(FetchError::JsonParseError(e.to_string()).to_string()),
    }
}

// =============================================================================
// Mock Transport
// =============================================================================

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::sync::Mutex;

    use super::*;

    struct Route {
        method: Method,
        path: String,
        response: Result<HttpResponse, FetchError>,
    }

    /// Scripted transport: answers by method and endpoint path, records every request.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<Vec<Route>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `method path` with a 200 envelope carrying `data`.
        pub fn ok(self, method: Method, path: &str, data: Value) -> Self {
            let body = serde_json::json!({ "success": true, "data": data, "error": null });
            self.respond(
                method,
                path,
                Ok(HttpResponse {
                    status: 200,
                    body: body.to_string(),
                }),
            )
        }

        pub fn status(self, method: Method, path: &str, status: u16) -> Self {
            self.respond(
                method,
                path,
                Ok(HttpResponse {
                    status,
                    body: String::new(),
                }),
            )
        }

        pub fn fail(self, method: Method, path: &str, error: FetchError) -> Self {
            self.respond(method, path, Err(error))
        }

        pub fn respond(
            self,
            method: Method,
            path: &str,
            response: Result<HttpResponse, FetchError>,
        ) -> Self {
            if let Ok(mut routes) = self.routes.lock() {
                routes.push(Route {
                    method,
                    path: path.to_string(),
                    response,
                });
            }
            self
        }

        /// Requests sent so far, oldest first.
        pub fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().map(|s| s.clone()).unwrap_or_default()
        }

        fn lookup(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            let path = request
                .url
                .split_once("://")
                .and_then(|(_, rest)| rest.find('/').map(|i| &rest[i..]))
                .unwrap_or(&request.url);
            let path = path.split('?').next().unwrap_or(path);

            self.routes
                .lock()
                .ok()
                .and_then(|routes| {
                    routes
                        .iter()
                        .find(|r| r.method == request.method && path.ends_with(&r.path))
                        .map(|r| r.response.clone())
                })
                .unwrap_or_else(|| Err(FetchError::NetworkError("connection refused".to_string())))
        }
    }

    impl Transport for MockTransport {
        fn send(
            &self,
            request: HttpRequest,
            _timeout_ms: i32,
        ) -> LocalBoxFuture<'_, Result<HttpResponse, FetchError>> {
            let response = self.lookup(&request);
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(request);
            }
            Box::pin(async move { response })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway(mock: MockTransport) -> (Gateway, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let gw = Gateway::new(mock.clone()).with_base_url("https://api.test");
        (gw, mock)
    }

    #[tokio::test]
    async fn test_issue_success() {
        let (gw, _) = gateway(MockTransport::new().ok(
            Method::Get,
            "/admin/profile",
            json!({ "name": "Root" }),
        ));
        let env = gw.issue(Call::get("/admin/profile")).await;
        assert!(env.success);
        assert_eq!(env.data, Some(json!({ "name": "Root" })));
        assert_eq!(env.error, None);
    }

    #[tokio::test]
    async fn test_non_2xx_is_failure_without_data() {
        for status in [301, 400, 404, 500, 503] {
            let (gw, _) = gateway(MockTransport::new().status(Method::Get, "/x", status));
            let env = gw.issue(Call::get("/x")).await;
            assert!(!env.success);
            assert_eq!(env.data, None);
            assert_eq!(env.error, Some(format!("HTTP {}", status)));
        }
    }

    #[tokio::test]
    async fn test_transport_errors_become_envelopes() {
        let (gw, _) = gateway(
            MockTransport::new()
                .fail(Method::Get, "/slow", FetchError::Timeout)
                .fail(Method::Get, "/down", FetchError::NetworkError("offline".into())),
        );

        let slow = gw.issue(Call::get("/slow")).await;
        assert!(!slow.success);
        assert_eq!(slow.error.as_deref(), Some("Request timed out"));

        let down = gw.issue(Call::get("/down")).await;
        assert!(!down.success);
        assert_eq!(down.error.as_deref(), Some("Network error: offline"));

        // Unscripted endpoint: transport refuses, still an envelope.
        let missing = gw.issue(Call::get("/nowhere")).await;
        assert!(!missing.success);
        assert_eq!(missing.data, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let (gw, _) = gateway(
            MockTransport::new()
                .respond(
                    Method::Get,
                    "/html",
                    Ok(HttpResponse {
                        status: 200,
                        body: "<html>".into(),
                    }),
                )
                .respond(
                    Method::Get,
                    "/shape",
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"items":[]}"#.into(),
                    }),
                ),
        );
        let html = gw.issue(Call::get("/html")).await;
        assert!(!html.success);
        assert!(html.error.unwrap_or_default().starts_with("JSON parse error"));

        let shape = gw.issue(Call::get("/shape")).await;
        assert!(!shape.success);
    }

    #[tokio::test]
    async fn test_backend_reported_failure_drops_data() {
        let (gw, _) = gateway(MockTransport::new().respond(
            Method::Post,
            "/admin/system/backup",
            Ok(HttpResponse {
                status: 200,
                body: r#"{"success":false,"data":{"partial":true},"error":"disk full"}"#.into(),
            }),
        ));
        let env = gw.issue(Call::post("/admin/system/backup")).await;
        assert!(!env.success);
        assert_eq!(env.data, None);
        assert_eq!(env.error.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_default_headers_and_override() {
        let gw = Gateway::new(Arc::new(MockTransport::new())).with_base_url("https://api.test/");
        let req = gw.build_request(Call::get("/admin/users"));
        assert_eq!(req.url, "https://api.test/admin/users");
        assert_eq!(req.header("content-type"), Some("application/json"));

        let req = gw.build_request(
            Call::put("/admin/users/1")
                .header("Content-Type", "application/merge-patch+json")
                .header("X-Trace", "abc"),
        );
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.header("Content-Type"), Some("application/merge-patch+json"));
        assert_eq!(req.header("x-trace"), Some("abc"));
        assert_eq!(
            req.headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
    }

    #[test]
    fn test_multipart_omits_content_type() {
        let gw = Gateway::new(Arc::new(MockTransport::new()));
        let req = gw.build_request(Call::post("/admin/upload").multipart(vec![
            MultipartField::Text {
                name: "type".into(),
                value: "general".into(),
            },
        ]));
        assert_eq!(req.header("Content-Type"), None);
        assert!(req.url.starts_with(API_BASE_URL));
    }

    #[test]
    fn test_gateway_defaults() {
        let gw = Gateway::new(Arc::new(MockTransport::new()));
        assert_eq!(gw.timeout_ms(), FETCH_TIMEOUT_MS);
        assert_eq!(gw.with_timeout(2500).timeout_ms(), 2500);
    }

    #[tokio::test]
    async fn test_issue_as_decodes_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Status {
            status: String,
        }

        let (gw, _) = gateway(
            MockTransport::new()
                .ok(Method::Get, "/good", json!({ "status": "operational" }))
                .ok(Method::Get, "/bad", json!({ "state": 1 })),
        );
        let good: Envelope<Status> = gw.issue_as(Call::get("/good")).await;
        assert_eq!(
            good.into_result(),
            Ok(Status {
                status: "operational".into()
            })
        );

        let bad: Envelope<Status> = gw.issue_as(Call::get("/bad")).await;
        assert!(!bad.success);
        assert_eq!(bad.data, None);
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let (gw, mock) = gateway(MockTransport::new().ok(Method::Post, "/admin/users", json!({})));
        let _ = gw
            .issue(Call::post("/admin/users").json(&json!({ "name": "Ada" })))
            .await;
        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(
            sent[0].body,
            Some(RequestBody::Json(json!({ "name": "Ada" })))
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Envelope::ok(3).into_result(), Ok(3));
        assert_eq!(
            Envelope::<i32>::failure("nope").into_result(),
            Err("nope".to_string())
        );
        let empty: Envelope<i32> = Envelope {
            success: true,
            data: None,
            error: None,
        };
        assert!(empty.into_result().is_err());
    }

    #[tokio::test]
    async fn test_accepted_write_without_payload() {
        let (gw, _) = gateway(MockTransport::new().ok(
            Method::Put,
            "/admin/system/settings",
            Value::Null,
        ));
        let env: Envelope<Value> = gw.issue_as(Call::put("/admin/system/settings")).await;
        assert!(env.success);
        assert_eq!(env.into_optional(), Ok(None));

        assert_eq!(Envelope::ok(3).into_optional(), Ok(Some(3)));
        assert_eq!(
            Envelope::<i32>::failure("nope").into_optional(),
            Err("nope".to_string())
        );
    }
}
