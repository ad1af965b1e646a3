/// Volumes — one mountable filesystem instance each.
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// Filesystem flag bits reported by the volume-information query.
const FILE_CASE_SENSITIVE_SEARCH: u32 = 0x0000_0001;
const FILE_FILE_COMPRESSION: u32 = 0x0000_0010;
const FILE_READ_ONLY_VOLUME: u32 = 0x0008_0000;

/// Platform-native root of a volume, e.g. `C:\`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VolumePath(String);

impl VolumePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Root without its trailing separator, e.g. `C:`.
    pub fn device_name(&self) -> &str {
        self.0.trim_end_matches('\\')
    }

    /// Device namespace path used to open the volume, e.g. `\\.\C:`.
    pub fn device_path(&self) -> String {
        format!(r"\\.\{}", self.device_name())
    }
}

impl fmt::Display for VolumePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drive type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DriveType {
    Unknown,
    NoRootDir,
    Removable,
    Fixed,
    Network,
    CdRom,
    RamDisk,
}

impl DriveType {
    /// Map a native `GetDriveTypeW` code.
    pub fn from_native(code: u32) -> Self {
        match code {
            1 => Self::NoRootDir,
            2 => Self::Removable,
            3 => Self::Fixed,
            4 => Self::Network,
            5 => Self::CdRom,
            6 => Self::RamDisk,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::NoRootDir => "No root",
            Self::Removable => "Removable",
            Self::Fixed => "Fixed",
            Self::Network => "Network",
            Self::CdRom => "CD-ROM",
            Self::RamDisk => "RAM disk",
        }
    }
}

impl FromStr for DriveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "removable" => Ok(Self::Removable),
            "fixed" => Ok(Self::Fixed),
            "network" | "remote" => Ok(Self::Network),
            "cdrom" | "cd-rom" => Ok(Self::CdRom),
            "ramdisk" | "ram" => Ok(Self::RamDisk),
            other => Err(format!(
                "unknown drive type '{other}' \
                 (expected removable, fixed, network, cdrom or ramdisk)"
            )),
        }
    }
}

/// Filesystem metadata of a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilesystemInfo {
    /// Filesystem name (e.g. "NTFS", "FAT32").
    pub kind: String,
    /// Raw filesystem flag bits.
    pub flags: u32,
    /// Maximum length of a single path component.
    pub max_component_length: u32,
}

impl FilesystemInfo {
    pub fn is_read_only(&self) -> bool {
        self.flags & FILE_READ_ONLY_VOLUME != 0
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.flags & FILE_CASE_SENSITIVE_SEARCH != 0
    }

    pub fn supports_compression(&self) -> bool {
        self.flags & FILE_FILE_COMPRESSION != 0
    }
}

/// A single mounted volume (partition) found during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// Volume label (e.g. "Windows", "Data"). May be empty.
    pub label: String,
    /// Root path as returned by the enumeration pass.
    pub path: VolumePath,
    pub filesystem: FilesystemInfo,
    pub drive_type: DriveType,
}

impl Volume {
    pub fn is_removable(&self) -> bool {
        self.drive_type == DriveType::Removable
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.path.device_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_path_strips_trailing_separator() {
        let path = VolumePath::new("C:\\");
        assert_eq!(path.device_name(), "C:");
        assert_eq!(path.device_path(), r"\\.\C:");
    }

    #[test]
    fn drive_type_maps_native_codes() {
        assert_eq!(DriveType::from_native(2), DriveType::Removable);
        assert_eq!(DriveType::from_native(3), DriveType::Fixed);
        assert_eq!(DriveType::from_native(4), DriveType::Network);
        assert_eq!(DriveType::from_native(5), DriveType::CdRom);
        assert_eq!(DriveType::from_native(0), DriveType::Unknown);
        assert_eq!(DriveType::from_native(42), DriveType::Unknown);
    }

    #[test]
    fn drive_type_parses_case_insensitively() {
        assert_eq!("Removable".parse::<DriveType>(), Ok(DriveType::Removable));
        assert_eq!("FIXED".parse::<DriveType>(), Ok(DriveType::Fixed));
        assert!("floppy".parse::<DriveType>().is_err());
    }

    #[test]
    fn read_only_flag() {
        let mut fs = FilesystemInfo {
            kind: "NTFS".into(),
            flags: FILE_CASE_SENSITIVE_SEARCH,
            max_component_length: 255,
        };
        assert!(!fs.is_read_only());
        assert!(fs.is_case_sensitive());

        fs.flags |= FILE_READ_ONLY_VOLUME;
        assert!(fs.is_read_only());
        assert!(!fs.supports_compression());
    }

    #[test]
    fn volume_display_uses_device_name() {
        let volume = Volume {
            label: "Data".into(),
            path: VolumePath::new("D:\\"),
            filesystem: FilesystemInfo::default(),
            drive_type: DriveType::Fixed,
        };
        assert_eq!(volume.to_string(), "Data (D:)");
        assert!(!volume.is_removable());
    }
}
