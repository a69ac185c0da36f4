//! HTTP client for the Vidgate API.

use reqwest::StatusCode;
use thiserror::Error;

use vidpass_common::VidNumber;
use vidpass_common::types::{
    ErrorBody, IdRegRequest, IdRegResponse, PhotoRegRequest, PhotoRegResponse, RegistrationStatus,
};

/// Client-side failure talking to Vidgate
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected the request and said why
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Transport-level failure
    #[error("Network error occurred")]
    Network(#[from] reqwest::Error),
}

/// Vidgate API client
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,

    /// Operator label attached to every request (informational)
    user_login: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, user_login: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
            user_login: user_login.into(),
        }
    }

    /// Step 1: register the ID photo, receiving a fresh VID
    pub async fn register_id(&self, image: &str) -> Result<VidNumber, ClientError> {
        let body = IdRegRequest {
            image: Some(image.to_string()),
            timestamp: Some(wire_timestamp()),
            user_login: Some(self.user_login.clone()),
        };

        let response = self
            .http
            .post(format!("{}/id-reg", self.base_url))
            .json(&body)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let parsed: IdRegResponse = response.json().await?;
        Ok(parsed.vid_number)
    }

    /// Step 2: submit the face photo for an issued VID
    pub async fn register_face(
        &self,
        vid: &VidNumber,
        image: &str,
    ) -> Result<PhotoRegResponse, ClientError> {
        let body = PhotoRegRequest {
            image: Some(image.to_string()),
            vid_number: Some(vid.clone()),
            timestamp: Some(wire_timestamp()),
            user_login: Some(self.user_login.clone()),
        };

        let response = self
            .http
            .post(format!("{}/photo-reg", self.base_url))
            .json(&body)
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Read-only status lookup
    pub async fn status(&self, vid: &VidNumber) -> Result<RegistrationStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/registration/{}", self.base_url, vid))
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Convert non-2xx responses into the service's `{error}` message
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "An error occurred".to_string(),
        };

        Err(ClientError::Rejected { status, message })
    }
}

/// The wire timestamp format the browser client used: "YYYY-MM-DD HH:MM:SS" UTC
fn wire_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn register_id_returns_the_issued_vid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id-reg"))
            .and(body_partial_json(json!({ "userLogin": "kiosk-test" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "vidNumber": "VID123456" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let vid = client.register_id("frame-data").await.expect("succeeds");
        assert_eq!(vid.as_str(), "VID123456");
    }

    #[tokio::test]
    async fn rejections_carry_the_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id-reg"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "No image data provided" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let err = client.register_id("frame-data").await.expect_err("rejected");

        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "No image data provided");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_face_sends_the_vid_along() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/photo-reg"))
            .and(body_partial_json(json!({ "vidNumber": "VID654321" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Registration completed successfully"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let vid = VidNumber::from("VID654321".to_string());
        let result = client
            .register_face(&vid, "frame-data")
            .await
            .expect("succeeds");

        assert!(result.success);
        assert_eq!(result.message, "Registration completed successfully");
    }

    #[tokio::test]
    async fn status_decodes_the_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/registration/VID654321"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vidNumber": "VID654321",
                "timestamp": "2026-08-06T12:00:00Z",
                "faceVerified": true
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let vid = VidNumber::from("VID654321".to_string());
        let status = client.status(&vid).await.expect("succeeds");

        assert_eq!(status.vid_number, vid);
        assert!(status.face_verified);
    }

    #[tokio::test]
    async fn unparseable_error_bodies_fall_back_to_a_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id-reg"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let err = client.register_id("frame-data").await.expect_err("rejected");

        match err {
            ClientError::Rejected { message, .. } => assert_eq!(message, "An error occurred"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
