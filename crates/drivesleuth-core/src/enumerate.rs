/// Volume path enumeration.
///
/// The host returns every volume root in one buffer of UTF-16 strings, each
/// terminated by a NUL, with an extra NUL closing the whole list:
///
/// ```text
/// C:\␀D:\␀E:\␀␀
/// ```
///
/// The buffer starts small and is regrown to the exact length the host
/// reports until the list fits.
use crate::error::Error;
use crate::host::{FetchStatus, HostError, VolumeHost};
use crate::model::VolumePath;
use tracing::{debug, warn};

/// Initial path-list buffer length, in UTF-16 code units.
///
/// Enough for 32 drive roots (`X:\` plus terminator) without a retry.
pub const INITIAL_PATH_BUFFER_LEN: usize = 128;

/// Split a NUL-separated, double-NUL-terminated multi-string.
///
/// Scanning stops at the first empty string; anything after it is padding.
pub fn parse_multi_string(buf: &[u16]) -> Vec<VolumePath> {
    let mut paths = Vec::new();
    let mut start = 0;

    for (i, &unit) in buf.iter().enumerate() {
        if unit != 0 {
            continue;
        }
        if i == start {
            break;
        }
        paths.push(VolumePath::new(String::from_utf16_lossy(&buf[start..i])));
        start = i + 1;
    }

    paths
}

/// Fetch and parse the volume path list, growing the buffer as needed.
pub fn fetch_volume_paths<H: VolumeHost>(
    host: &H,
    initial_len: usize,
) -> Result<Vec<VolumePath>, Error> {
    let mut buf = vec![0u16; initial_len.max(1)];

    loop {
        let produced = match host.fetch_path_list(&mut buf) {
            Ok(FetchStatus::Filled(n)) => n.min(buf.len()),
            Ok(FetchStatus::NeedsCapacity(n)) if n > buf.len() => {
                debug!("Path list needs {n} code units, buffer has {}", buf.len());
                buf = vec![0u16; n];
                continue;
            }
            Ok(FetchStatus::NeedsCapacity(n)) => {
                warn!("Host asked for {n} code units with {} available", buf.len());
                return Err(Error::Fetch(HostError::new(
                    0,
                    format!("inconsistent path list length {n}"),
                )));
            }
            Err(e) => {
                warn!("Path list fetch failed: {e}");
                return Err(Error::Fetch(e));
            }
        };

        return Ok(parse_multi_string(&buf[..produced]));
    }
}

/// Raw volume path strings, without any correlation.
pub fn paths<H: VolumeHost>(host: &H) -> Result<Vec<String>, Error> {
    let paths = fetch_volume_paths(host, INITIAL_PATH_BUFFER_LEN)?;
    Ok(paths.into_iter().map(|p| p.as_str().to_owned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn splits_and_drops_final_terminator() {
        let paths = parse_multi_string(&wide("C:\\\0D:\\\0\0"));
        let paths: Vec<&str> = paths.iter().map(VolumePath::as_str).collect();
        assert_eq!(paths, ["C:\\", "D:\\"]);
    }

    #[test]
    fn ignores_padding_after_end_of_list() {
        let paths = parse_multi_string(&wide("C:\\\0\0Z:\\\0\0\0\0"));
        assert_eq!(paths, vec![VolumePath::new("C:\\")]);
    }

    #[test]
    fn empty_and_unterminated_buffers() {
        assert!(parse_multi_string(&[]).is_empty());
        assert!(parse_multi_string(&[0]).is_empty());
        // A trailing run without its terminator is not a complete entry.
        assert!(parse_multi_string(&wide("C:\\")).is_empty());
    }

    #[test]
    fn keeps_mount_folder_paths() {
        let paths = parse_multi_string(&wide("C:\\\0C:\\mnt\\data\\\0\0"));
        assert_eq!(paths[1].as_str(), "C:\\mnt\\data\\");
    }
}
