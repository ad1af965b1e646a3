/// Listing reports — JSON, CSV, and plain-text renderings of a drive list.
use crate::model::Drive;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Snapshot of one listing.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub drives: Vec<Drive>,
}

impl Report {
    pub fn new(drives: Vec<Drive>) -> Self {
        Self {
            generated_at: Local::now(),
            drives,
        }
    }

    /// Total number of partitions across all drives.
    pub fn partition_count(&self) -> usize {
        self.drives.iter().map(|d| d.partitions.len()).sum()
    }
}

/// One CSV row per partition.
#[derive(Serialize)]
struct CsvRow<'a> {
    drive: &'a str,
    drive_path: &'a str,
    removable_drive: bool,
    partition: &'a str,
    label: &'a str,
    filesystem: &'a str,
    drive_type: &'static str,
    read_only: bool,
    max_component_length: u32,
}

/// Pretty-printed JSON.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Write the report as CSV with a header row.
pub fn write_csv<W: Write>(report: &Report, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);

    for drive in &report.drives {
        let removable_drive = drive.is_removable();
        for volume in &drive.partitions {
            writer.serialize(CsvRow {
                drive: &drive.name,
                drive_path: &drive.path,
                removable_drive,
                partition: volume.path.as_str(),
                label: &volume.label,
                filesystem: &volume.filesystem.kind,
                drive_type: volume.drive_type.label(),
                read_only: volume.filesystem.is_read_only(),
                max_component_length: volume.filesystem.max_component_length,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Human-readable tree of drives and their partitions.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    if report.drives.is_empty() {
        out.push_str("No drives found.\n");
        return out;
    }

    for drive in &report.drives {
        let kind = if drive.is_removable() {
            "removable"
        } else {
            "fixed"
        };
        let _ = writeln!(out, "{drive} [{}] ({kind})", drive.path);

        for volume in &drive.partitions {
            let fs = if volume.filesystem.kind.is_empty() {
                "?"
            } else {
                volume.filesystem.kind.as_str()
            };
            let ro = if volume.filesystem.is_read_only() {
                ", read-only"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {volume}  {fs} · {}{ro}",
                volume.drive_type.label()
            );
        }
    }

    let _ = writeln!(
        out,
        "\n{} drives, {} partitions",
        report.drives.len(),
        report.partition_count()
    );
    out
}

/// One path per line.
pub fn render_paths(paths: &[String]) -> String {
    let mut out = String::new();
    for path in paths {
        out.push_str(path);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiskIdentity, DriveType, FilesystemInfo, Volume, VolumePath};

    fn sample() -> Report {
        let volume = |root: &str, label: &str, flags: u32| Volume {
            label: label.into(),
            path: VolumePath::new(root),
            filesystem: FilesystemInfo {
                kind: "NTFS".into(),
                flags,
                max_component_length: 255,
            },
            drive_type: DriveType::Fixed,
        };

        let mut drive = Drive::new(
            "Samsung SSD".into(),
            DiskIdentity::new(0),
            volume("C:\\", "Windows", 0),
        );
        drive.partitions.push(volume("D:\\", "Data", 0x0008_0000));
        Report::new(vec![drive])
    }

    #[test]
    fn text_lists_partitions_under_their_drive() {
        let text = render_text(&sample());
        assert!(text.starts_with("Samsung SSD [\\\\.\\PhysicalDrive0] (fixed)\n"));
        assert!(text.contains("  Windows (C:)  NTFS · Fixed\n"));
        assert!(text.contains("  Data (D:)  NTFS · Fixed, read-only\n"));
        assert!(text.ends_with("1 drives, 2 partitions\n"));
    }

    #[test]
    fn text_for_empty_report() {
        assert_eq!(render_text(&Report::new(Vec::new())), "No drives found.\n");
    }

    #[test]
    fn json_contains_drive_and_partitions() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let drive = &value["drives"][0];
        assert_eq!(drive["name"], "Samsung SSD");
        assert_eq!(drive["path"], "\\\\.\\PhysicalDrive0");
        assert_eq!(drive["partitions"][1]["path"], "D:\\");
        assert_eq!(drive["partitions"][1]["drive_type"], "Fixed");
        assert!(drive.get("identity").is_none());
    }

    #[test]
    fn paths_one_per_line() {
        let paths = vec!["C:\\".to_string(), "D:\\".to_string()];
        assert_eq!(render_paths(&paths), "C:\\\nD:\\\n");
    }
}
