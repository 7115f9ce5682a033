//! Human-readable formatting for downloader metadata

/// Format a duration in whole seconds as `minutes:seconds`.
///
/// Seconds are intentionally not zero-padded: `125` becomes `"2:5"`.
/// The polling frontend has always displayed this form, so it is kept
/// as the wire format.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{}", seconds / 60, seconds % 60)
}

/// Format a byte count as megabytes with two decimals, e.g. `"10.00 MB"`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_unpadded() {
        assert_eq!(format_duration(125), "2:5");
        assert_eq!(format_duration(60), "1:0");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "0:0");
    }

    #[test]
    fn test_format_duration_long() {
        assert_eq!(format_duration(3600), "60:0");
        assert_eq!(format_duration(3661), "61:1");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10 * 1024 * 1024), "10.00 MB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(1536 * 1024), "1.50 MB");
        assert_eq!(format_size(0), "0.00 MB");
    }

    #[test]
    fn test_format_size_small() {
        assert_eq!(format_size(524288), "0.50 MB");
    }
}
