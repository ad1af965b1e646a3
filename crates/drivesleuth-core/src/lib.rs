/// DriveSleuth Core — volume enumeration and physical-disk correlation.
///
/// This crate contains all business logic with zero UI dependencies.
/// Host access goes through the [`host::VolumeHost`] trait so the
/// correlation logic can run against the real Win32 API or an in-memory
/// fake.
///
/// # Modules
///
/// - [`host`] — The collaborator trait wrapping raw host calls.
/// - [`platform`] — Win32 implementation of the host trait.
/// - [`model`] — Volumes, drives, and their metadata.
/// - [`enumerate`] — Multi-string parsing of the volume path list.
/// - [`probe`] — Per-volume metadata and device identity queries.
/// - [`aggregate`] — Groups volumes by the physical disk backing them.
/// - [`report`] — JSON, CSV, and text rendering of a listing.
pub mod aggregate;
pub mod enumerate;
pub mod error;
pub mod host;
pub mod model;
pub mod platform;
pub mod probe;
pub mod report;

pub use aggregate::{list, ListOptions};
pub use enumerate::paths;
pub use error::{Error, ProbeError};
