//! HTTP service uploading a CSV file to the backend.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, ErrorBody, UploadResponse};

/// Turn a non-2xx body into an error.
///
/// Intake failures carry the user-facing message in `error`; anything
/// else is reported with the status code.
pub fn error_from_body(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => AppError::Rejected(parsed.error),
        Err(_) => AppError::Network(format!("server error ({}): {}", status, body)),
    }
}

/// Upload a CSV file to the backend and get the normalized table.
pub async fn upload_csv(file: File, backend_url: &str) -> AppResult<UploadResponse> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Network(format!("failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| AppError::Network(format!("failed to append file: {:?}", e)))?;

    let url = format!("{}/api/upload", backend_url);
    let response = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(format!("failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(response.status(), &body));
    }

    response
        .json::<UploadResponse>()
        .await
        .map_err(|e| AppError::Response(e.to_string()))
}
