//! Capture wizard state machine.
//!
//! The browser original kept one mutable bag of step/error/loading
//! fields. Here the same flow is a tagged state with explicit events, so
//! every legal transition sits in one match and nothing else can happen.

use chrono::{DateTime, Utc};
use vidpass_common::VidNumber;

/// Which photo the wizard is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    IdDocument,
    Face,
}

impl CaptureStep {
    /// Prompt shown ahead of the capture
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::IdDocument => "Position your ID document in the frame",
            Self::Face => "Position your face in the frame",
        }
    }
}

/// Wizard state
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    /// Waiting for camera permission
    AwaitingPermission,

    /// Feed up, ready to capture the current step
    Ready {
        step: CaptureStep,
        vid: Option<VidNumber>,
    },

    /// Request in flight; capture is disabled
    Submitting {
        step: CaptureStep,
        vid: Option<VidNumber>,
    },

    /// Something failed. `step: None` means permission acquisition
    /// failed; `Some` keeps the step so it can be retried in place.
    Failed {
        step: Option<CaptureStep>,
        vid: Option<VidNumber>,
        message: String,
        at: DateTime<Utc>,
    },

    /// Registration complete
    Done { vid: VidNumber },
}

/// Discrete wizard events
#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// Camera permission granted; feed available
    PermissionGranted,

    /// Camera permission failed with a user-facing message
    PermissionFailed { message: String, at: DateTime<Utc> },

    /// A capture/submit round started
    SubmitStarted,

    /// Step 1 accepted; the service issued a VID
    IdAccepted { vid: VidNumber },

    /// Step 2 accepted; registration complete
    FaceAccepted,

    /// Capture or request failed with a user-facing message
    SubmitFailed { message: String, at: DateTime<Utc> },

    /// User asked to retry after a failure
    Retry,
}

impl WizardState {
    pub fn initial() -> Self {
        Self::AwaitingPermission
    }

    /// Pure transition function. Events that make no sense in the
    /// current state leave it unchanged.
    pub fn apply(self, event: WizardEvent) -> Self {
        use WizardEvent::*;

        match (self, event) {
            (Self::AwaitingPermission, PermissionGranted) => Self::Ready {
                step: CaptureStep::IdDocument,
                vid: None,
            },
            (Self::AwaitingPermission, PermissionFailed { message, at }) => Self::Failed {
                step: None,
                vid: None,
                message,
                at,
            },

            (Self::Ready { step, vid }, SubmitStarted) => Self::Submitting { step, vid },

            (
                Self::Submitting {
                    step: CaptureStep::IdDocument,
                    ..
                },
                IdAccepted { vid },
            ) => Self::Ready {
                step: CaptureStep::Face,
                vid: Some(vid),
            },
            (
                Self::Submitting {
                    step: CaptureStep::Face,
                    vid: Some(vid),
                },
                FaceAccepted,
            ) => Self::Done { vid },
            (Self::Submitting { step, vid }, SubmitFailed { message, at }) => Self::Failed {
                step: Some(step),
                vid,
                message,
                at,
            },

            // Retry after a submit failure resumes the same step; after a
            // permission failure it restarts acquisition
            (Self::Failed { step: Some(step), vid, .. }, Retry) => Self::Ready { step, vid },
            (Self::Failed { step: None, .. }, Retry) => Self::AwaitingPermission,

            // Anything else is a no-op
            (state, _) => state,
        }
    }

    /// True while a request is in flight (capture disabled)
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }
}
