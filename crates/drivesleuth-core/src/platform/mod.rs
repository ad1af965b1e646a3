/// Platform-specific host access.
///
/// On Windows, [`SystemHost`] is the Win32 implementation of
/// [`VolumeHost`](crate::host::VolumeHost). Other targets have no host;
/// [`system_host`] reports [`Error::Unsupported`] there.
use crate::error::Error;

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::Win32Host as SystemHost;

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub use unsupported::UnsupportedHost as SystemHost;

/// The host for the current platform.
#[cfg(windows)]
pub fn system_host() -> Result<SystemHost, Error> {
    Ok(SystemHost::new())
}

/// The host for the current platform.
#[cfg(not(windows))]
pub fn system_host() -> Result<SystemHost, Error> {
    Err(Error::Unsupported)
}
