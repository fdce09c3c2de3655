//! Audio I/O layer for tonecmp.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving
//!   mono sample buffers
//! - **Device capture**: [`list_input_devices`] and [`record`] for
//!   grabbing a tone from a live input
//!
//! Everything downstream of this crate works on mono `f32` buffers in
//! [-1, 1] plus a sample rate; this is where multi-channel audio gets
//! averaged down and integer PCM gets normalized.

mod capture;
mod wav;

pub use capture::{AudioDevice, list_input_devices, record};
pub use wav::{read_wav, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("no audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// A sample encoding this tool does not decode.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
