//! Frame acquisition.
//!
//! The wizard only sees the `FrameSource` trait. The shipped
//! implementation reads still frames from disk; a live camera feed would
//! slot in behind the same calls.

use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::PathBuf;
use thiserror::Error;

/// Cause-specific camera failures. Display output is the message shown
/// to the user.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera access was denied. Please allow camera access to continue.")]
    AccessDenied,

    #[error("No camera device was found. Please connect a camera and try again.")]
    NotFound,

    // Only live feeds can raise the next two; the file-backed stand-in never does
    #[allow(dead_code)]
    #[error(
        "Your camera is in use by another application. Please close other apps using the camera."
    )]
    Busy,

    #[allow(dead_code)]
    #[error("Camera constraints not satisfied. Please try a different camera.")]
    Overconstrained,

    #[error("Camera error: {0}")]
    Other(String),
}

/// A captured still frame, encoded the way the browser client shipped it
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// `data:image/jpeg;base64,...` payload
    pub data_url: String,
}

impl CapturedFrame {
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)),
        }
    }
}

/// Source of still frames for the capture flow
pub trait FrameSource {
    /// Acquire the device (the permission prompt, in the browser original)
    fn acquire(&mut self) -> Result<(), CameraError>;

    /// Grab one still frame from the feed
    fn capture(&mut self) -> Result<CapturedFrame, CameraError>;

    /// Signal that the subject for the next step is now in frame. Live
    /// feeds need no notice; staged sources move to their next frame.
    fn next_scene(&mut self) {}
}

/// Frame source backed by image files on disk, one per scene. Stands in
/// for a live feed: a retried capture re-reads the current file, and the
/// file only changes when the flow moves to the next step.
pub struct FileFrameSource {
    frames: Vec<PathBuf>,
    current: usize,
    acquired: bool,
}

impl FileFrameSource {
    pub fn new(frames: Vec<PathBuf>) -> Self {
        Self {
            frames,
            current: 0,
            acquired: false,
        }
    }
}

impl FrameSource for FileFrameSource {
    fn acquire(&mut self) -> Result<(), CameraError> {
        if self.frames.is_empty() {
            return Err(CameraError::NotFound);
        }

        for frame in &self.frames {
            if !frame.exists() {
                return Err(CameraError::Other(format!(
                    "{} does not exist",
                    frame.display()
                )));
            }
        }

        self.acquired = true;
        Ok(())
    }

    fn capture(&mut self) -> Result<CapturedFrame, CameraError> {
        if !self.acquired {
            return Err(CameraError::Other(
                "Feed not ready. Acquire the camera first.".to_string(),
            ));
        }

        let path = self.frames.get(self.current).ok_or_else(|| {
            CameraError::Other("Failed to capture image. Please try again.".to_string())
        })?;

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CameraError::NotFound,
            std::io::ErrorKind::PermissionDenied => CameraError::AccessDenied,
            _ => CameraError::Other(format!("{}: {e}", path.display())),
        })?;

        Ok(CapturedFrame::from_jpeg_bytes(&bytes))
    }

    fn next_scene(&mut self) {
        self.current += 1;
    }
}
