//! Human-readable formatting helpers.

/// Size units, largest last. Values past 1024 MB stay in MB.
const SIZE_UNITS: [&str; 3] = ["B", "KB", "MB"];

/// Format a byte count with two decimals, e.g. `1536` -> `"1.50 KB"`.
pub fn format_size(byte_count: u64) -> String {
    let mut size = byte_count as f64;
    let mut unit = SIZE_UNITS[0];

    for next in &SIZE_UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }

    format!("{:.2} {}", size, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_of(formatted: &str) -> &str {
        formatted.rsplit(' ').next().unwrap()
    }

    #[test]
    fn test_format_size_examples() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(2_464_153), "2.35 MB");
    }

    #[test]
    fn test_format_size_unit_boundaries() {
        assert_eq!(unit_of(&format_size(1023)), "B");
        assert_eq!(unit_of(&format_size(1024)), "KB");
        assert_eq!(unit_of(&format_size(1024 * 1024 - 1)), "KB");
        assert_eq!(unit_of(&format_size(1024 * 1024)), "MB");
    }

    #[test]
    fn test_format_size_caps_at_megabytes() {
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5120.00 MB");
        assert_eq!(unit_of(&format_size(u64::MAX)), "MB");
    }
}
