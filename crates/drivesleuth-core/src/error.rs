/// Error types for enumeration and probing.
///
/// [`Error`] is fatal to a whole `list` / `paths` call. [`ProbeError`]
/// describes why a single volume was skipped; it is logged, never returned
/// from `list`.
use crate::host::HostError;

/// Failure that prevents enumeration altogether.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The volume path list could not be fetched.
    #[error("failed to fetch volume path list: {0}")]
    Fetch(#[source] HostError),

    /// No host implementation exists for the current target.
    #[error("drive enumeration is not supported on this platform")]
    Unsupported,
}

/// Reason a single volume was left out of a listing.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The device handle could not be opened.
    #[error("cannot open device: {0}")]
    OpenFailed(#[source] HostError),

    /// A device-control query failed outright.
    #[error("device query failed: {0}")]
    QueryRejected(#[source] HostError),

    /// A device-control query returned fewer bytes than the structure needs.
    #[error("device query returned {actual} bytes, expected at least {expected}")]
    QueryFailed { expected: usize, actual: usize },

    /// The device is not a disk (CD-ROM, virtual device, ...).
    #[error("device type {device_type:#x} is not a disk")]
    NotADisk { device_type: u32 },

    /// Volume label / filesystem metadata could not be read.
    #[error("volume information unavailable: {0}")]
    ProbeFailed(#[source] HostError),

    /// The device descriptor carries no vendor or product identifier.
    #[error("device descriptor has no vendor or product identifier")]
    LabelUnavailable,
}
