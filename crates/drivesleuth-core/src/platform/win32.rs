/// Win32 host — volume enumeration and device queries using the Windows API.
///
/// Volume roots come from `GetLogicalDriveStringsW`, metadata from
/// `GetVolumeInformationW`, and disk identity / descriptor data from
/// `DeviceIoControl` on a `\\.\X:` volume handle opened with no access
/// rights (query-only, so no elevation is needed).
use crate::host::{FetchStatus, HostError, RawVolumeInfo, VolumeHost};
use crate::model::VolumePath;
use std::ffi::c_void;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, GetDriveTypeW, GetLogicalDriveStringsW, GetVolumeInformationW,
    FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows::Win32::System::Ioctl::{
    IOCTL_STORAGE_GET_DEVICE_NUMBER, IOCTL_STORAGE_QUERY_PROPERTY,
};
use windows::Win32::System::IO::DeviceIoControl;

/// Length of the label and filesystem name buffers (`MAX_PATH + 1`).
const VOLUME_NAME_BUFFER_LEN: usize = 261;

// STORAGE_PROPERTY_ID::StorageDeviceProperty
const STORAGE_DEVICE_PROPERTY: u32 = 0;
// STORAGE_QUERY_TYPE::PropertyStandardQuery
const PROPERTY_STANDARD_QUERY: u32 = 0;

// STORAGE_PROPERTY_QUERY: { PropertyId, QueryType, AdditionalParameters[1] }
#[repr(C)]
#[derive(Copy, Clone)]
struct StoragePropertyQuery {
    property_id: u32,
    query_type: u32,
    additional_parameters: [u8; 4],
}

/// Open volume device handle.
pub struct Win32Device(HANDLE);

/// [`VolumeHost`] backed by the Win32 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Host;

impl Win32Host {
    pub fn new() -> Self {
        Self
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn host_error(e: windows::core::Error) -> HostError {
    HostError::new(e.code().0, e.to_string())
}

fn until_nul(buf: &[u16]) -> String {
    String::from_utf16_lossy(&buf[..buf.iter().position(|&c| c == 0).unwrap_or(buf.len())])
}

impl VolumeHost for Win32Host {
    type Device = Win32Device;

    fn fetch_path_list(&self, buf: &mut [u16]) -> Result<FetchStatus, HostError> {
        let len = unsafe { GetLogicalDriveStringsW(Some(&mut *buf)) } as usize;

        if len == 0 {
            return Err(host_error(windows::core::Error::from_win32()));
        }
        if len > buf.len() {
            return Ok(FetchStatus::NeedsCapacity(len));
        }
        Ok(FetchStatus::Filled(len))
    }

    fn native_drive_type(&self, path: &VolumePath) -> u32 {
        let root = wide(path.as_str());
        unsafe { GetDriveTypeW(PCWSTR(root.as_ptr())) }
    }

    fn query_volume_info(&self, path: &VolumePath) -> Result<RawVolumeInfo, HostError> {
        let root = wide(path.as_str());
        let mut label_buf = [0u16; VOLUME_NAME_BUFFER_LEN];
        let mut fs_buf = [0u16; VOLUME_NAME_BUFFER_LEN];
        let mut max_component_length: u32 = 0;
        let mut flags: u32 = 0;

        unsafe {
            GetVolumeInformationW(
                PCWSTR(root.as_ptr()),
                Some(&mut label_buf),
                None,
                Some(&mut max_component_length as *mut u32),
                Some(&mut flags as *mut u32),
                Some(&mut fs_buf),
            )
        }
        .map_err(host_error)?;

        Ok(RawVolumeInfo {
            label: until_nul(&label_buf),
            filesystem: until_nul(&fs_buf),
            flags,
            max_component_length,
        })
    }

    fn open_device(&self, path: &VolumePath) -> Result<Self::Device, HostError> {
        let device_path = wide(&path.device_path());

        let handle = unsafe {
            CreateFileW(
                PCWSTR(device_path.as_ptr()),
                0,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                None,
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                None,
            )
        }
        .map_err(host_error)?;

        Ok(Win32Device(handle))
    }

    fn close_device(&self, device: &Self::Device) {
        unsafe {
            let _ = CloseHandle(device.0);
        }
    }

    fn query_device_number(
        &self,
        device: &Self::Device,
        out: &mut [u8],
    ) -> Result<usize, HostError> {
        let mut bytes_returned: u32 = 0;

        unsafe {
            DeviceIoControl(
                device.0,
                IOCTL_STORAGE_GET_DEVICE_NUMBER,
                None,
                0,
                Some(out.as_mut_ptr() as *mut c_void),
                out.len() as u32,
                Some(&mut bytes_returned),
                None,
            )
        }
        .map_err(host_error)?;

        Ok(bytes_returned as usize)
    }

    fn query_device_property(
        &self,
        device: &Self::Device,
        out: &mut [u8],
    ) -> Result<usize, HostError> {
        let query = StoragePropertyQuery {
            property_id: STORAGE_DEVICE_PROPERTY,
            query_type: PROPERTY_STANDARD_QUERY,
            additional_parameters: [0; 4],
        };
        let mut bytes_returned: u32 = 0;

        unsafe {
            DeviceIoControl(
                device.0,
                IOCTL_STORAGE_QUERY_PROPERTY,
                Some(&query as *const StoragePropertyQuery as *const c_void),
                std::mem::size_of::<StoragePropertyQuery>() as u32,
                Some(out.as_mut_ptr() as *mut c_void),
                out.len() as u32,
                Some(&mut bytes_returned),
                None,
            )
        }
        .map_err(host_error)?;

        Ok(bytes_returned as usize)
    }
}
