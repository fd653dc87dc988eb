//! Browser transport for the gateway.
//!
//! Issues requests through the Fetch API and races them against a timeout.

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::core::error::FetchError;
use crate::core::gateway::{
    HttpRequest, HttpResponse, LocalBoxFuture, MultipartField, RequestBody, Transport, UploadFile,
};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
///
/// The timeout promise resolves to `undefined`, so a fetch that resolves to
/// `undefined` itself would be reported as timed out. Fetch never does.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(
            e.as_string()
                .or_else(|| {
                    e.dyn_ref::<js_sys::Error>()
                        .map(|err| String::from(err.message()))
                })
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
    }
}

// =============================================================================
// Fetch Transport
// =============================================================================

/// [`Transport`] backed by `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl BrowserTransport {
    /// Fails with [`FetchError::NoWindow`] outside a browser.
    pub fn acquire() -> Result<Self, FetchError> {
        web_sys::window().map(|_| Self).ok_or(FetchError::NoWindow)
    }
}

impl Transport for BrowserTransport {
    fn send(
        &self,
        request: HttpRequest,
        timeout_ms: i32,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, FetchError>> {
        Box::pin(fetch_request(request, timeout_ms))
    }
}

async fn fetch_request(request: HttpRequest, timeout_ms: i32) -> Result<HttpResponse, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    for (name, value) in &request.headers {
        headers
            .set(name, value)
            .map_err(|_| FetchError::RequestCreationFailed)?;
    }
    opts.set_headers(&headers);

    match &request.body {
        None => {}
        Some(RequestBody::Json(value)) => {
            opts.set_body(&JsValue::from_str(&value.to_string()));
        }
        Some(RequestBody::Multipart(fields)) => {
            opts.set_body(&build_form_data(fields)?.into());
        }
    }

    let req = Request::new_with_str_and_init(&request.url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    match race_with_timeout(window.fetch_with_request(&req), timeout_ms).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;

            Ok(HttpResponse {
                status: resp.status(),
                body: text.as_string().ok_or(FetchError::InvalidContent)?,
            })
        }
    }
}

fn build_form_data(fields: &[MultipartField]) -> Result<FormData, FetchError> {
    let form = FormData::new().map_err(|_| FetchError::RequestCreationFailed)?;
    for field in fields {
        let appended = match field {
            MultipartField::Text { name, value } => form.append_with_str(name, value),
            MultipartField::File { name, file } => {
                let blob = to_blob(file)?;
                form.append_with_blob_and_filename(name, &blob, &file.name)
            }
        };
        appended.map_err(|_| FetchError::RequestCreationFailed)?;
    }
    Ok(form)
}

fn to_blob(file: &UploadFile) -> Result<Blob, FetchError> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let props = BlobPropertyBag::new();
    props.set_type(&file.mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|_| FetchError::RequestCreationFailed)
}

/// Read a file picked by the user into memory for upload.
pub async fn read_file(file: &File) -> Result<UploadFile, FetchError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    Ok(UploadFile {
        name: file.name(),
        mime: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}
