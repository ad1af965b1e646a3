/// Per-volume probing — filesystem metadata, physical-disk identity, and
/// the vendor/product name of the disk.
///
/// Device handles are only held inside a [`ScopedDevice`] guard, so every
/// handle opened here is closed before the probing function returns,
/// whichever way it returns.
use crate::error::ProbeError;
use crate::host::VolumeHost;
use crate::model::{DiskIdentity, FilesystemInfo, VolumePath};
use tracing::debug;

/// `FILE_DEVICE_DISK` device type code.
pub const FILE_DEVICE_DISK: u32 = 0x0000_0007;

/// Size of `STORAGE_DEVICE_NUMBER`: device type, device number, partition
/// number, all `u32`.
pub const DEVICE_NUMBER_LEN: usize = 12;

/// Size of `STORAGE_DESCRIPTOR_HEADER`: version and total size, both `u32`.
pub const DESCRIPTOR_HEADER_LEN: usize = 8;

/// Smallest descriptor that can carry a vendor identifier offset.
pub const MIN_DESCRIPTOR_LEN: u32 = 16;

/// Largest descriptor read. Real descriptors are a few hundred bytes; a
/// header announcing more is treated as carrying no name.
pub const MAX_DESCRIPTOR_LEN: u32 = 64 * 1024;

// Byte offsets inside STORAGE_DEVICE_DESCRIPTOR.
const VENDOR_ID_OFFSET_FIELD: usize = 12;
const PRODUCT_ID_OFFSET_FIELD: usize = 16;

/// Label and filesystem metadata of one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub label: String,
    pub filesystem: FilesystemInfo,
}

/// An open device handle that is closed when the guard is dropped.
pub struct ScopedDevice<'h, H: VolumeHost> {
    host: &'h H,
    device: H::Device,
}

impl<'h, H: VolumeHost> ScopedDevice<'h, H> {
    pub fn open(host: &'h H, path: &VolumePath) -> Result<Self, ProbeError> {
        let device = host.open_device(path).map_err(ProbeError::OpenFailed)?;
        Ok(Self { host, device })
    }

    pub fn device(&self) -> &H::Device {
        &self.device
    }
}

impl<H: VolumeHost> Drop for ScopedDevice<'_, H> {
    fn drop(&mut self) {
        self.host.close_device(&self.device);
    }
}

/// Read the volume label and filesystem metadata. Needs no device handle.
pub fn probe_volume<H: VolumeHost>(
    host: &H,
    path: &VolumePath,
) -> Result<VolumeInfo, ProbeError> {
    let raw = host.query_volume_info(path).map_err(ProbeError::ProbeFailed)?;

    Ok(VolumeInfo {
        label: raw.label,
        filesystem: FilesystemInfo {
            kind: raw.filesystem,
            flags: raw.flags,
            max_component_length: raw.max_component_length,
        },
    })
}

/// Identify the physical disk a volume lives on.
pub fn device_identity<H: VolumeHost>(
    host: &H,
    path: &VolumePath,
) -> Result<DiskIdentity, ProbeError> {
    let device = ScopedDevice::open(host, path)?;

    let mut out = [0u8; DEVICE_NUMBER_LEN];
    let returned = host
        .query_device_number(device.device(), &mut out)
        .map_err(ProbeError::QueryRejected)?;

    let short_read = ProbeError::QueryFailed {
        expected: DEVICE_NUMBER_LEN,
        actual: returned,
    };
    let (device_type, device_number) =
        decode_device_number(&out[..returned.min(out.len())]).ok_or(short_read)?;

    if device_type != FILE_DEVICE_DISK {
        return Err(ProbeError::NotADisk { device_type });
    }

    Ok(DiskIdentity::new(device_number))
}

/// Vendor and product name of the disk behind a volume.
///
/// A descriptor that is too small, implausibly large, or carries no
/// identifiers yields an empty string, not an error.
pub fn device_label<H: VolumeHost>(host: &H, path: &VolumePath) -> Result<String, ProbeError> {
    let device = ScopedDevice::open(host, path)?;

    let mut header = [0u8; DESCRIPTOR_HEADER_LEN];
    let returned = host
        .query_device_property(device.device(), &mut header)
        .map_err(ProbeError::QueryRejected)?;
    if returned < DESCRIPTOR_HEADER_LEN {
        return Err(ProbeError::QueryFailed {
            expected: DESCRIPTOR_HEADER_LEN,
            actual: returned,
        });
    }

    let size = read_u32(&header, 4).unwrap_or(0);
    if !(MIN_DESCRIPTOR_LEN..=MAX_DESCRIPTOR_LEN).contains(&size) {
        debug!(
            "{path}: {} (descriptor is {size} bytes)",
            ProbeError::LabelUnavailable
        );
        return Ok(String::new());
    }

    let size = size as usize;
    let mut descriptor = vec![0u8; size];
    let returned = host
        .query_device_property(device.device(), &mut descriptor)
        .map_err(ProbeError::QueryRejected)?;
    if returned < size {
        return Err(ProbeError::QueryFailed {
            expected: size,
            actual: returned,
        });
    }

    let label = decode_device_label(&descriptor);
    if label.is_empty() {
        debug!("{path}: {}", ProbeError::LabelUnavailable);
    }
    Ok(label)
}

/// Decode `(device type, device number)` from a `STORAGE_DEVICE_NUMBER`.
///
/// Returns `None` when the buffer is shorter than the full structure.
pub fn decode_device_number(buf: &[u8]) -> Option<(u32, u32)> {
    if buf.len() < DEVICE_NUMBER_LEN {
        return None;
    }
    Some((read_u32(buf, 0)?, read_u32(buf, 4)?))
}

/// Build a display name from a `STORAGE_DEVICE_DESCRIPTOR` buffer.
///
/// The vendor and product fields hold byte offsets to NUL-terminated ASCII
/// strings. An offset of zero, or one outside the buffer, means the field is
/// absent.
pub fn decode_device_label(descriptor: &[u8]) -> String {
    let vendor = descriptor_string(descriptor, VENDOR_ID_OFFSET_FIELD);
    let product = descriptor_string(descriptor, PRODUCT_ID_OFFSET_FIELD);

    match (vendor, product) {
        (Some(vendor), Some(product)) => format!("{vendor} {product}"),
        (Some(vendor), None) => vendor,
        (None, Some(product)) => product,
        (None, None) => String::new(),
    }
}

fn descriptor_string(descriptor: &[u8], field: usize) -> Option<String> {
    let offset = read_u32(descriptor, field)? as usize;
    if offset == 0 || offset >= descriptor.len() {
        return None;
    }

    let tail = &descriptor[offset..];
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    let value = String::from_utf8_lossy(&tail[..end]).trim().to_string();

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn read_u32(buf: &[u8], at: usize) -> Option<u32> {
    let bytes = buf.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}
