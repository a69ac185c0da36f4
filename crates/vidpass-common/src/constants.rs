//! Shared constants for Vidpass components.

/// Default Vidgate HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";

/// Default Vidgate API base URL for clients
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001/api";

/// Registration record time-to-live (1 hour)
pub const REGISTRATION_TTL_SECS: u64 = 3600;

/// Expired-record sweep interval (5 minutes)
pub const SWEEP_INTERVAL_SECS: u64 = 300;

/// Minimum accepted image payload length in bytes
pub const MIN_IMAGE_BYTES: usize = 1000;

/// Simulated ID processing delay in milliseconds
pub const PROCESSING_DELAY_MS: u64 = 1500;

/// Simulated face verification delay in milliseconds
pub const VERIFY_DELAY_MS: u64 = 1500;

/// Simulated face verification failure rate
pub const VERIFY_FAILURE_RATE: f64 = 0.2;

/// Maximum accepted request body size (base64 images are large)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// API paths served by Vidgate
pub mod api_paths {
    /// ID photo registration: POST {image}
    pub const ID_REG: &str = "/api/id-reg";

    /// Face photo registration: POST {image, vidNumber}
    pub const PHOTO_REG: &str = "/api/photo-reg";

    /// Registration status lookup: GET, VID appended
    pub const REGISTRATION: &str = "/api/registration";
}

/// User-facing messages returned by the registration flow
pub mod messages {
    /// id-reg with no image payload
    pub const NO_IMAGE: &str = "No image data provided";

    /// id-reg with a payload too short to be a photo
    pub const INVALID_IMAGE: &str = "Invalid image data. Please take a clear photo.";

    /// photo-reg missing the image or the VID
    pub const MISSING_FIELDS: &str = "Missing required information";

    /// photo-reg against an unknown VID
    pub const UNKNOWN_VID: &str =
        "Invalid VID number. Please start the registration process again.";

    /// photo-reg against a record past its TTL
    pub const SESSION_EXPIRED: &str = "Registration session expired. Please start again.";

    /// Simulated matcher rejection
    pub const VERIFICATION_FAILED: &str =
        "Face verification failed. Please ensure proper lighting and try again.";

    /// photo-reg success
    pub const REGISTRATION_COMPLETE: &str = "Registration completed successfully";

    /// Status lookup miss
    pub const NOT_FOUND: &str = "Registration not found";
}
