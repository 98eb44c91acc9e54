//! Frame rate and frame count probing for MP4/MOV and AVI containers.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// Largest `moov` box we are willing to buffer (64 MB).
const MAX_MOOV_SIZE: u64 = 64 * 1024 * 1024;

/// Bytes read from the head of an AVI file to find the main header.
const AVI_HEADER_WINDOW: u64 = 64 * 1024;

/// Raw timing facts read from a video container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoProbe {
    pub fps: f64,
    pub frame_count: u64,
}

/// Probe an MP4 or QuickTime file.
pub fn probe_mp4(path: &Path) -> Result<VideoProbe> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    let moov = read_top_level_box(&mut reader, file_size, b"moov")?
        .ok_or_else(|| Error::Decode("no moov box".into()))?;
    parse_moov(&moov)
}

/// Probe an AVI (RIFF) file.
pub fn probe_avi(path: &Path) -> Result<VideoProbe> {
    let mut head = Vec::new();
    File::open(path)?
        .take(AVI_HEADER_WINDOW)
        .read_to_end(&mut head)?;
    parse_avi(&head)
}

/// Walk top-level boxes and return the payload of the first box of `kind`.
fn read_top_level_box<R: Read + Seek>(
    reader: &mut R,
    file_size: u64,
    kind: &[u8; 4],
) -> Result<Option<Vec<u8>>> {
    let mut position: u64 = 0;

    while file_size.saturating_sub(position) >= 8 {
        let mut header = [0u8; 8];
        reader.read_exact(&mut header)?;

        let mut box_size = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as u64;
        let mut header_len = 8u64;

        if box_size == 1 {
            let mut large = [0u8; 8];
            reader.read_exact(&mut large)?;
            box_size = u64::from_be_bytes(large);
            header_len = 16;
        } else if box_size == 0 {
            // Box extends to end of file
            box_size = file_size - position;
        }

        let end = position
            .checked_add(box_size)
            .filter(|&end| box_size >= header_len && end <= file_size)
            .ok_or_else(|| {
                Error::Decode(format!(
                    "invalid box size {} at offset {}",
                    box_size, position
                ))
            })?;

        let payload_len = box_size - header_len;
        if &header[4..8] == kind {
            if payload_len > MAX_MOOV_SIZE {
                return Err(Error::Decode("moov box too large".into()));
            }
            let mut payload = vec![0u8; payload_len as usize];
            reader.read_exact(&mut payload)?;
            return Ok(Some(payload));
        }

        // end > position since box_size >= header_len >= 8
        reader.seek(SeekFrom::Start(end))?;
        position = end;
    }

    Ok(None)
}

/// Iterator over `(type, payload)` pairs of boxes packed in a buffer.
struct Boxes<'a> {
    data: &'a [u8],
}

impl<'a> Iterator for Boxes<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        if data.len() < 8 {
            return None;
        }
        let kind = &data[4..8];
        let (header_len, size) = match read_u32_be(data, 0)? {
            0 => (8, data.len()),
            1 => (16, read_u64_be(data, 8)? as usize),
            n => (8, n as usize),
        };
        if size < header_len || size > data.len() {
            return None;
        }
        self.data = &data[size..];
        Some((kind, &data[header_len..size]))
    }
}

fn boxes(data: &[u8]) -> Boxes<'_> {
    Boxes { data }
}

fn child<'a>(data: &'a [u8], kind: &[u8; 4]) -> Option<&'a [u8]> {
    boxes(data).find(|(k, _)| *k == kind).map(|(_, payload)| payload)
}

fn parse_moov(moov: &[u8]) -> Result<VideoProbe> {
    for (kind, trak) in boxes(moov) {
        if kind != b"trak" {
            continue;
        }
        let Some(mdia) = child(trak, b"mdia") else {
            continue;
        };
        let is_video = child(mdia, b"hdlr")
            .and_then(|hdlr| hdlr.get(8..12))
            .map(|handler| handler == b"vide")
            .unwrap_or(false);
        if !is_video {
            continue;
        }

        let (timescale, duration) = child(mdia, b"mdhd")
            .and_then(parse_mdhd)
            .ok_or_else(|| Error::Decode("missing or short mdhd box".into()))?;
        let frame_count = child(mdia, b"minf")
            .and_then(|minf| child(minf, b"stbl"))
            .and_then(|stbl| child(stbl, b"stts"))
            .and_then(parse_stts)
            .ok_or_else(|| Error::Decode("missing or short stts box".into()))?;

        let fps = if timescale == 0 || duration == 0 {
            0.0
        } else {
            frame_count as f64 * timescale as f64 / duration as f64
        };

        return Ok(VideoProbe { fps, frame_count });
    }

    Err(Error::Decode("no video track".into()))
}

/// Returns `(timescale, duration)`.
fn parse_mdhd(mdhd: &[u8]) -> Option<(u32, u64)> {
    match mdhd.first()? {
        1 => Some((read_u32_be(mdhd, 20)?, read_u64_be(mdhd, 24)?)),
        _ => Some((read_u32_be(mdhd, 12)?, read_u32_be(mdhd, 16)? as u64)),
    }
}

/// Sum of sample counts in the time-to-sample table.
fn parse_stts(stts: &[u8]) -> Option<u64> {
    let entries = read_u32_be(stts, 4)? as usize;
    let mut total = 0u64;
    for i in 0..entries {
        total += read_u32_be(stts, 8 + i * 8)? as u64;
    }
    Some(total)
}

fn parse_avi(data: &[u8]) -> Result<VideoProbe> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"AVI " {
        return Err(Error::Decode("not a RIFF AVI file".into()));
    }

    let avih = find_riff_chunk(&data[12..], b"avih")
        .ok_or_else(|| Error::Decode("no avih chunk".into()))?;
    let micros_per_frame =
        read_u32_le(avih, 0).ok_or_else(|| Error::Decode("short avih chunk".into()))?;
    let frame_count =
        read_u32_le(avih, 16).ok_or_else(|| Error::Decode("short avih chunk".into()))? as u64;

    let fps = if micros_per_frame == 0 {
        0.0
    } else {
        1_000_000.0 / micros_per_frame as f64
    };

    Ok(VideoProbe { fps, frame_count })
}

/// Depth-first search for a chunk, descending into `LIST` chunks.
fn find_riff_chunk<'a>(mut data: &'a [u8], id: &[u8; 4]) -> Option<&'a [u8]> {
    while data.len() >= 8 {
        let chunk_id = &data[0..4];
        let size = read_u32_le(data, 4)? as usize;
        let end = 8 + size;
        let body = data.get(8..end.min(data.len()))?;

        if chunk_id == id {
            return Some(body);
        }
        if chunk_id == b"LIST" && body.len() >= 4 {
            if let Some(found) = find_riff_chunk(&body[4..], id) {
                return Some(found);
            }
        }

        // Chunks are word aligned
        let next = end + (size & 1);
        if next >= data.len() {
            break;
        }
        data = &data[next..];
    }
    None
}

fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_u64_be(data: &[u8], offset: usize) -> Option<u64> {
    let bytes: [u8; 8] = data.get(offset..offset + 8)?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp4_frame_rate() {
        // 90 frames over 3 seconds at timescale 1000
        let probe = parse_moov_from_file(&fixtures::mp4(1000, 3000, 90));
        assert_eq!(probe.frame_count, 90);
        assert!((probe.fps - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_mp4_zero_duration_gives_zero_fps() {
        let probe = parse_moov_from_file(&fixtures::mp4(1000, 0, 10));
        assert_eq!(probe.fps, 0.0);
    }

    #[test]
    fn test_mp4_without_moov() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        std::fs::write(&path, [0u8, 0, 0, 16, b'f', b't', b'y', b'p', 0, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        assert!(matches!(probe_mp4(&path), Err(Error::Decode(_))));
    }

    #[test]
    fn test_mp4_oversized_largesize_box() {
        let mut bytes = vec![0u8, 0, 0, 8, b'f', b'r', b'e', b'e'];
        bytes.extend_from_slice(&[0, 0, 0, 1, b'm', b'd', b'a', b't']);
        bytes.extend_from_slice(&(u64::MAX - 7).to_be_bytes());
        bytes.extend_from_slice(&[0u8; 16]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.mp4");
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(probe_mp4(&path), Err(Error::Decode(_))));
    }

    #[test]
    fn test_mp4_box_past_end_of_file() {
        let mut bytes = vec![0u8, 0, 0, 8, b'f', b'r', b'e', b'e'];
        bytes.extend_from_slice(&[0, 0, 1, 0, b'm', b'd', b'a', b't']);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.mp4");
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(probe_mp4(&path), Err(Error::Decode(_))));
    }

    #[test]
    fn test_avi_header() {
        let probe = parse_avi(&fixtures::avi(40_000, 250)).unwrap();
        assert_eq!(probe.frame_count, 250);
        assert!((probe.fps - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_avi_rejects_other_riff() {
        let mut data = fixtures::avi(40_000, 250);
        data[8..12].copy_from_slice(b"WAVE");
        assert!(parse_avi(&data).is_err());
    }

    fn parse_moov_from_file(bytes: &[u8]) -> VideoProbe {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, bytes).unwrap();
        probe_mp4(&path).unwrap()
    }
}
