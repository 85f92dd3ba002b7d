// src/infrastructure/client.rs
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{ImageUpload, Memo, MemoDraft, MemoPatch};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Server { status: StatusCode, message: String },
}

/// Error body the server sends: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Typed client for the Time Notes HTTP API.
///
/// Every call either returns the server's canonical response or a single
/// error to surface to the user; nothing is retried and no local state is
/// mutated on failure.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// `base_url` is the backend origin, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    pub fn image_url(&self, filename: &str) -> String {
        self.url(&format!("/images/{filename}"))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn list_memos(&self) -> Result<Vec<Memo>, ClientError> {
        let resp = self.http.get(self.url("/memos")).send().await?;
        Ok(checked(resp).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_memo(&self, id: &str) -> Result<Memo, ClientError> {
        let resp = self.http.get(self.url(&format!("/memos/{id}"))).send().await?;
        Ok(checked(resp).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self, draft))]
    pub async fn create_memo(&self, draft: &MemoDraft) -> Result<Memo, ClientError> {
        let resp = self
            .http
            .post(self.url("/memos"))
            .json(draft)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub async fn update_memo(&self, id: &str, patch: &MemoPatch) -> Result<Memo, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/memos/{id}")))
            .json(patch)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete_memo(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/memos/{id}")))
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn toggle_alarm(&self, id: &str) -> Result<Memo, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/memos/{id}/toggle-alarm")))
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    /// Upload an image file; the server stores it and returns the
    /// generated filename.
    #[instrument(level = "debug", skip(self, bytes))]
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ImageUpload, ClientError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename.to_string()));
        let resp = self
            .http
            .post(self.url("/upload-image"))
            .multipart(form)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    /// Upload a base64-encoded camera capture, optionally as a data URI.
    #[instrument(level = "debug", skip(self, image_data))]
    pub async fn upload_base64_image(
        &self,
        image_data: &str,
        filename: &str,
    ) -> Result<ImageUpload, ClientError> {
        let form = Form::new()
            .text("image_data", image_data.to_string())
            .text("filename", filename.to_string());
        let resp = self
            .http
            .post(self.url("/upload-base64-image"))
            .multipart(form)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }
}

/// Turn a non-2xx response into a single user-facing error, preferring the
/// server-supplied detail message when the body carries one.
async fn checked(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("Request failed with status {status}"),
    };
    debug!(%status, %message, "Server reported failure");
    Err(ClientError::Server { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_trailing_slash_when_building_urls_then_normalizes() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/memos"), "http://localhost:8000/api/memos");
        assert_eq!(
            client.image_url("cat.png"),
            "http://localhost:8000/api/images/cat.png"
        );
    }
}
