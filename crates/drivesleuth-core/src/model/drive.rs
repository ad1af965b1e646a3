/// Physical drives and the key used to correlate volumes with them.
use super::volume::Volume;
use serde::Serialize;
use std::fmt;

/// Identity of a physical disk, taken from the device-number query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DiskIdentity(u32);

impl DiskIdentity {
    pub fn new(device_number: u32) -> Self {
        Self(device_number)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    /// Device namespace path of the physical disk, e.g. `\\.\PhysicalDrive0`.
    pub fn display_path(self) -> String {
        format!(r"\\.\PhysicalDrive{}", self.0)
    }
}

/// A physical drive together with the volumes that live on it.
///
/// A `Drive` is only created once a first volume has been correlated with
/// it, so `partitions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drive {
    /// Vendor and product identifiers, empty when the device reports none.
    pub name: String,
    /// Display path, e.g. `\\.\PhysicalDrive1`.
    pub path: String,
    #[serde(skip)]
    pub identity: DiskIdentity,
    /// Volumes in the order they were discovered.
    pub partitions: Vec<Volume>,
}

impl Drive {
    pub(crate) fn new(name: String, identity: DiskIdentity, first: Volume) -> Self {
        Self {
            name,
            path: identity.display_path(),
            identity,
            partitions: vec![first],
        }
    }

    /// True when every partition on the drive is removable.
    pub fn is_removable(&self) -> bool {
        !self.partitions.is_empty() && self.partitions.iter().all(Volume::is_removable)
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str(&self.path)
        } else {
            f.write_str(&self.name)
        }
    }
}
