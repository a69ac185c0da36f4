//! Core types shared across Vidpass components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration identifier: the fixed prefix plus six decimal digits
/// (e.g. `VID483920`). Issued at step 1, names one in-flight registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VidNumber(String);

impl VidNumber {
    /// Identifier prefix
    pub const PREFIX: &'static str = "VID";

    /// Decimal digits following the prefix
    pub const DIGITS: usize = 6;

    /// Parse an identifier, rejecting anything outside the fixed format
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix(Self::PREFIX)?;
        if digits.len() == Self::DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lookups accept whatever the caller sent; unknown strings simply miss
/// the store, so construction is unchecked.
impl From<String> for VidNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for VidNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Step 1 request: register the ID document photo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRegRequest {
    /// Base64 image payload (data URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Client-side capture time; informational, ignored by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Operator label; informational, ignored by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_login: Option<String>,
}

/// Step 1 response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRegResponse {
    pub vid_number: VidNumber,
}

/// Step 2 request: submit the face photo for an issued VID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRegRequest {
    /// Base64 image payload (data URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Identifier returned by step 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid_number: Option<VidNumber>,

    /// Client-side capture time; informational, ignored by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Operator label; informational, ignored by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_login: Option<String>,
}

/// Step 2 response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRegResponse {
    pub success: bool,
    pub message: String,
}

/// Read-only registration summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatus {
    pub vid_number: VidNumber,

    /// Record creation time
    pub timestamp: DateTime<Utc>,

    /// True once the face photo passed verification
    pub face_verified: bool,
}

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
