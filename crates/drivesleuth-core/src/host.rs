/// Host collaborator interface.
///
/// Every raw system call the enumeration needs goes through [`VolumeHost`].
/// The Win32 implementation lives in [`crate::platform`]; tests supply an
/// in-memory fake.
use crate::model::VolumePath;

/// Opaque failure reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code:#x})")]
pub struct HostError {
    /// Native error code (e.g. a Win32 `HRESULT`), `0` when unknown.
    pub code: i32,
    /// Human-readable message from the host.
    pub message: String,
}

impl HostError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of a single path-list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The buffer held the whole list; the value is the number of code
    /// units written.
    Filled(usize),
    /// The buffer was too small; the value is the length required.
    NeedsCapacity(usize),
}

/// Raw result of a volume-information query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVolumeInfo {
    pub label: String,
    pub filesystem: String,
    pub flags: u32,
    pub max_component_length: u32,
}

/// Raw host calls consumed by the enumeration core.
///
/// Implementations perform blocking calls and hold no state shared across
/// a `list` invocation.
pub trait VolumeHost {
    /// Open device handle. Released through [`VolumeHost::close_device`].
    type Device;

    /// Write the multi-string of volume roots into `buf`.
    fn fetch_path_list(&self, buf: &mut [u16]) -> Result<FetchStatus, HostError>;

    /// Native drive type code for `path` (`GetDriveTypeW` semantics).
    fn native_drive_type(&self, path: &VolumePath) -> u32;

    /// Label and filesystem metadata, queried on the path without a handle.
    fn query_volume_info(&self, path: &VolumePath) -> Result<RawVolumeInfo, HostError>;

    /// Open the device behind a volume for control queries.
    fn open_device(&self, path: &VolumePath) -> Result<Self::Device, HostError>;

    /// Release a handle returned by [`VolumeHost::open_device`]. Called
    /// exactly once per opened device.
    fn close_device(&self, device: &Self::Device);

    /// Device-number query. Returns the number of bytes written to `out`.
    fn query_device_number(
        &self,
        device: &Self::Device,
        out: &mut [u8],
    ) -> Result<usize, HostError>;

    /// Standard device-property query. The length of `out` selects between a
    /// header-only read and a full descriptor read. Returns the number of
    /// bytes written.
    fn query_device_property(
        &self,
        device: &Self::Device,
        out: &mut [u8],
    ) -> Result<usize, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_display_includes_code() {
        let e = HostError::new(0x5, "Access is denied.");
        assert_eq!(e.to_string(), "Access is denied. (code 0x5)");
    }

    #[test]
    fn host_error_is_a_source_of_probe_errors() {
        use std::error::Error as _;
        let e = crate::error::ProbeError::OpenFailed(HostError::new(0x2, "not found"));
        let source = e.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("not found (code 0x2)"));
    }
}
