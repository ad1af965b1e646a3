/// Drive aggregation — groups volumes by the physical disk backing them.
///
/// # Algorithm
///
/// 1. Fetch the volume path list.
/// 2. For each path, in enumeration order:
///    - classify the drive type and apply the caller's type filter,
///    - read label and filesystem metadata,
///    - query the physical disk identity,
///    - append the volume to that disk's `Drive`, creating the `Drive` (and
///      resolving its vendor/product name) on first sight.
/// 3. Return the drives in first-seen order.
///
/// A volume that fails any probe is skipped and logged. It never affects
/// the grouping of other volumes and never fails the listing.
use crate::enumerate::{fetch_volume_paths, INITIAL_PATH_BUFFER_LEN};
use crate::error::Error;
use crate::host::VolumeHost;
use crate::model::{DiskIdentity, Drive, DriveType, Volume, VolumePath};
use crate::probe::{device_identity, device_label, probe_volume};
use std::collections::HashMap;
use tracing::{debug, info};

/// Options for a single [`list`] call.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Drive types to include. Empty means every type.
    pub types: Vec<DriveType>,
    /// Initial path-list buffer length, in UTF-16 code units.
    pub initial_buffer_len: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            initial_buffer_len: INITIAL_PATH_BUFFER_LEN,
        }
    }
}

impl ListOptions {
    /// Only include the given drive types.
    pub fn with_types(types: impl IntoIterator<Item = DriveType>) -> Self {
        Self {
            types: types.into_iter().collect(),
            ..Self::default()
        }
    }

    fn accepts(&self, drive_type: DriveType) -> bool {
        self.types.is_empty() || self.types.contains(&drive_type)
    }
}

/// Insertion-ordered working map of drives keyed by disk identity.
#[derive(Default)]
struct DriveMap {
    index: HashMap<DiskIdentity, usize>,
    drives: Vec<Drive>,
}

impl DriveMap {
    fn get_mut(&mut self, identity: DiskIdentity) -> Option<&mut Drive> {
        let slot = *self.index.get(&identity)?;
        self.drives.get_mut(slot)
    }

    fn insert(&mut self, drive: Drive) {
        self.index.insert(drive.identity, self.drives.len());
        self.drives.push(drive);
    }

    fn into_drives(self) -> Vec<Drive> {
        self.drives
    }
}

/// List the physical drives on the host with their volumes.
///
/// Fails only when the volume path list itself cannot be fetched.
pub fn list<H: VolumeHost>(host: &H, options: &ListOptions) -> Result<Vec<Drive>, Error> {
    let paths = fetch_volume_paths(host, options.initial_buffer_len)?;
    debug!("Enumerated {} volume paths", paths.len());

    let mut map = DriveMap::default();
    let mut skipped = 0usize;

    for path in paths {
        if !correlate(host, options, &mut map, path) {
            skipped += 1;
        }
    }

    let drives = map.into_drives();
    info!("Found {} drives ({skipped} volumes skipped)", drives.len());
    Ok(drives)
}

/// Fold one volume into the map. Returns `false` when it was skipped.
fn correlate<H: VolumeHost>(
    host: &H,
    options: &ListOptions,
    map: &mut DriveMap,
    path: VolumePath,
) -> bool {
    let drive_type = DriveType::from_native(host.native_drive_type(&path));
    if !options.accepts(drive_type) {
        debug!("{path}: skipping {} drive", drive_type.label());
        return false;
    }

    let info = match probe_volume(host, &path) {
        Ok(info) => info,
        Err(e) => {
            debug!("{path}: skipped: {e}");
            return false;
        }
    };

    let identity = match device_identity(host, &path) {
        Ok(identity) => identity,
        Err(e) => {
            debug!("{path}: skipped: {e}");
            return false;
        }
    };

    let volume = Volume {
        label: info.label,
        path,
        filesystem: info.filesystem,
        drive_type,
    };

    if let Some(drive) = map.get_mut(identity) {
        debug!("{}: partition of {}", volume.path, drive.path);
        drive.partitions.push(volume);
        return true;
    }

    let name = device_label(host, &volume.path).unwrap_or_else(|e| {
        debug!("{}: no device name: {e}", volume.path);
        String::new()
    });
    debug!("{}: new drive {} '{name}'", volume.path, identity.display_path());
    map.insert(Drive::new(name, identity, volume));
    true
}
