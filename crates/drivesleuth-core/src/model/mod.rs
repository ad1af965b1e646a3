/// Data model for volumes and the physical drives that host them.
pub mod drive;
pub mod volume;

pub use drive::{DiskIdentity, Drive};
pub use volume::{DriveType, FilesystemInfo, Volume, VolumePath};
