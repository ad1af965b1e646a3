/// Placeholder host for targets without a volume enumeration API.
///
/// The type has no values, so none of its methods can ever be called.
use crate::host::{FetchStatus, HostError, RawVolumeInfo, VolumeHost};
use crate::model::VolumePath;
use std::convert::Infallible;

pub enum UnsupportedHost {}

impl VolumeHost for UnsupportedHost {
    type Device = Infallible;

    fn fetch_path_list(&self, _buf: &mut [u16]) -> Result<FetchStatus, HostError> {
        match *self {}
    }

    fn native_drive_type(&self, _path: &VolumePath) -> u32 {
        match *self {}
    }

    fn query_volume_info(&self, _path: &VolumePath) -> Result<RawVolumeInfo, HostError> {
        match *self {}
    }

    fn open_device(&self, _path: &VolumePath) -> Result<Self::Device, HostError> {
        match *self {}
    }

    fn close_device(&self, _device: &Self::Device) {
        match *self {}
    }

    fn query_device_number(
        &self,
        _device: &Self::Device,
        _out: &mut [u8],
    ) -> Result<usize, HostError> {
        match *self {}
    }

    fn query_device_property(
        &self,
        _device: &Self::Device,
        _out: &mut [u8],
    ) -> Result<usize, HostError> {
        match *self {}
    }
}
