//! # Vidkiosk - Vidpass Capture Client
//!
//! Walks the two-step registration flow against a running Vidgate: grab
//! an ID frame, trade it for a VID, grab a face frame, submit it, report
//! the outcome. Frames come from image files standing in for a live feed.
//!
//! ## Usage
//! ```bash
//! # Register against a local Vidgate
//! vidkiosk --id-photo id.jpg --face-photo face.jpg
//!
//! # Point at another instance and allow more retries
//! vidkiosk --server http://gate:3001/api --max-retries 5 --id-photo id.jpg --face-photo face.jpg
//! ```

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod api;
mod camera;
mod wizard;

use api::ApiClient;
use camera::{CapturedFrame, FileFrameSource, FrameSource};
use vidpass_common::VidNumber;
use wizard::{CaptureStep, WizardEvent, WizardState};

/// Vidpass capture client
#[derive(Parser, Debug)]
#[command(name = "vidkiosk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vidgate API base URL
    #[arg(
        short,
        long,
        default_value = vidpass_common::constants::DEFAULT_API_URL,
        env = "VIDGATE_URL"
    )]
    server: String,

    /// ID document photo file
    #[arg(long)]
    id_photo: PathBuf,

    /// Face photo file
    #[arg(long)]
    face_photo: PathBuf,

    /// Operator label attached to requests
    #[arg(long, default_value = "vidkiosk")]
    user_login: String,

    /// How many times to retry a failed step before giving up
    #[arg(long, default_value = "2")]
    max_retries: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("📸 Vidkiosk starting (server: {})", args.server);

    let client = ApiClient::new(args.server.clone(), args.user_login.clone());
    let mut source = FileFrameSource::new(vec![args.id_photo.clone(), args.face_photo.clone()]);

    let outcome = run_wizard(&client, &mut source, args.max_retries).await;

    match outcome {
        WizardState::Done { vid } => {
            info!(vid = %vid, "Registration complete");
            match client.status(&vid).await {
                Ok(status) => println!(
                    "Registration {} complete (created {}, verified: {})",
                    status.vid_number, status.timestamp, status.face_verified
                ),
                Err(err) => println!("Registration {vid} complete (status check failed: {err})"),
            }
            Ok(())
        }
        WizardState::Failed { message, at, .. } => {
            eprintln!("Registration failed at {at}: {message}");
            std::process::exit(1);
        }
        other => {
            eprintln!("Registration did not finish: {other:?}");
            std::process::exit(1);
        }
    }
}

/// Drive the wizard until it reaches a terminal state or runs out of
/// retries. Each pass through `Ready` captures one frame and submits it.
async fn run_wizard<S: FrameSource>(
    client: &ApiClient,
    source: &mut S,
    max_retries: u32,
) -> WizardState {
    let mut state = WizardState::initial();
    let mut retries_left = max_retries;

    loop {
        state = match state {
            WizardState::AwaitingPermission => match source.acquire() {
                Ok(()) => WizardState::AwaitingPermission.apply(WizardEvent::PermissionGranted),
                Err(err) => WizardState::AwaitingPermission.apply(WizardEvent::PermissionFailed {
                    message: err.to_string(),
                    at: Utc::now(),
                }),
            },

            WizardState::Ready { step, vid } => {
                info!(prompt = step.prompt(), "Capturing frame");

                let submitting = WizardState::Ready {
                    step,
                    vid: vid.clone(),
                }
                .apply(WizardEvent::SubmitStarted);
                debug_assert!(submitting.is_submitting());

                let event = match source.capture() {
                    Ok(frame) => submit_step(client, step, vid.as_ref(), &frame).await,
                    Err(err) => WizardEvent::SubmitFailed {
                        message: err.to_string(),
                        at: Utc::now(),
                    },
                };

                let next = submitting.apply(event);
                if matches!(
                    next,
                    WizardState::Ready {
                        step: CaptureStep::Face,
                        ..
                    }
                ) {
                    source.next_scene();
                }
                next
            }

            WizardState::Failed { step, vid, message, at } => {
                tracing::warn!(message = %message, at = %at, "Step failed");
                let failed = WizardState::Failed { step, vid, message, at };

                if retries_left == 0 {
                    return failed;
                }
                retries_left -= 1;
                info!(retries_left, "Retrying");
                failed.apply(WizardEvent::Retry)
            }

            done @ WizardState::Done { .. } => return done,

            // Unreachable in this driver: each Ready pass submits inline
            submitting @ WizardState::Submitting { .. } => return submitting,
        };
    }
}

/// Submit a captured frame for the current step, mapping the result to a
/// wizard event
async fn submit_step(
    client: &ApiClient,
    step: CaptureStep,
    vid: Option<&VidNumber>,
    frame: &CapturedFrame,
) -> WizardEvent {
    let now = Utc::now();

    match step {
        CaptureStep::IdDocument => match client.register_id(&frame.data_url).await {
            Ok(vid) => {
                info!(vid = %vid, "VID issued");
                WizardEvent::IdAccepted { vid }
            }
            Err(err) => WizardEvent::SubmitFailed {
                message: err.to_string(),
                at: now,
            },
        },
        CaptureStep::Face => {
            let Some(vid) = vid else {
                return WizardEvent::SubmitFailed {
                    message: "No VID issued yet. Start the registration again.".to_string(),
                    at: now,
                };
            };

            match client.register_face(vid, &frame.data_url).await {
                Ok(result) => {
                    info!(message = %result.message, "Face accepted");
                    WizardEvent::FaceAccepted
                }
                Err(err) => WizardEvent::SubmitFailed {
                    message: err.to_string(),
                    at: now,
                },
            }
        }
    }
}

/// Initialize logging with tracing
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::camera::CameraError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// In-memory frame source for driver tests
    struct StubFrameSource {
        scenes: Vec<&'static [u8]>,
        current: usize,
        grant_permission: bool,
    }

    impl StubFrameSource {
        fn new(scenes: Vec<&'static [u8]>) -> Self {
            Self {
                scenes,
                current: 0,
                grant_permission: true,
            }
        }

        fn denied() -> Self {
            Self {
                scenes: vec![],
                current: 0,
                grant_permission: false,
            }
        }
    }

    impl FrameSource for StubFrameSource {
        fn acquire(&mut self) -> Result<(), CameraError> {
            if self.grant_permission {
                Ok(())
            } else {
                Err(CameraError::AccessDenied)
            }
        }

        fn capture(&mut self) -> Result<CapturedFrame, CameraError> {
            let bytes = self.scenes.get(self.current).ok_or_else(|| {
                CameraError::Other("Failed to capture image. Please try again.".to_string())
            })?;
            Ok(CapturedFrame::from_jpeg_bytes(bytes))
        }

        fn next_scene(&mut self) {
            self.current += 1;
        }
    }

    #[tokio::test]
    async fn wizard_runs_the_full_flow_to_done() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id-reg"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "vidNumber": "VID111222" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/photo-reg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Registration completed successfully"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let mut source = StubFrameSource::new(vec![b"id-frame", b"face-frame"]);

        let outcome = run_wizard(&client, &mut source, 0).await;

        assert_eq!(
            outcome,
            WizardState::Done {
                vid: VidNumber::from("VID111222".to_string())
            }
        );
    }

    #[tokio::test]
    async fn wizard_gives_up_after_exhausting_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id-reg"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "No image data provided" })),
            )
            .expect(3) // initial attempt + two retries
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "kiosk-test");
        let mut source = StubFrameSource::new(vec![b"id-frame", b"face-frame"]);

        let outcome = run_wizard(&client, &mut source, 2).await;

        match outcome {
            WizardState::Failed { step, message, .. } => {
                assert_eq!(step, Some(CaptureStep::IdDocument));
                assert_eq!(message, "No image data provided");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wizard_reports_denied_permission() {
        let client = ApiClient::new("http://127.0.0.1:1", "kiosk-test");
        let mut source = StubFrameSource::denied();

        let outcome = run_wizard(&client, &mut source, 1).await;

        match outcome {
            WizardState::Failed { step, message, .. } => {
                assert_eq!(step, None);
                assert!(message.contains("Camera access was denied"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
