use std::time::Duration;

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count with binary-prefix scaling (1 KB = 1024 bytes).
///
/// Output examples: `"0 B"`, `"512 B"`, `"1.5 KB"`, `"23.4 MB"`, `"16.0 EB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Formats a byte rate (bytes per second) with binary-prefix scaling.
pub fn format_rate(bytes_per_sec: f64) -> String {
    if !bytes_per_sec.is_finite() || bytes_per_sec < 1.0 {
        return "0 B/s".to_string();
    }
    format!("{}/s", format_bytes(bytes_per_sec.round() as u64))
}

/// Converts a per-tick byte delta into bytes per second.
pub fn per_second(bytes_per_tick: u64, interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs <= 0.0 {
        return bytes_per_tick as f64;
    }
    bytes_per_tick as f64 / secs
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- format_bytes ----

    #[test]
    fn bytes_small() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn bytes_kilobytes() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
    }

    #[test]
    fn bytes_megabytes_and_up() {
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024), "2.0 GB");
        assert_eq!(format_bytes(1u64 << 40), "1.0 TB");
        assert_eq!(format_bytes(1u64 << 50), "1.0 PB");
    }

    #[test]
    fn bytes_max_is_exabytes() {
        assert_eq!(format_bytes(u64::MAX), "16.0 EB");
    }

    // ---- format_rate ----

    #[test]
    fn rate_zero_and_sub_byte() {
        assert_eq!(format_rate(0.0), "0 B/s");
        assert_eq!(format_rate(0.4), "0 B/s");
        assert_eq!(format_rate(f64::NAN), "0 B/s");
    }

    #[test]
    fn rate_scaled() {
        assert_eq!(format_rate(512.0), "512 B/s");
        assert_eq!(format_rate(2048.0), "2.0 KB/s");
        assert_eq!(format_rate(5.0 * 1024.0 * 1024.0), "5.0 MB/s");
    }

    // ---- per_second ----

    #[test]
    fn per_second_divides_by_interval() {
        assert_eq!(per_second(1000, Duration::from_secs(1)), 1000.0);
        assert_eq!(per_second(1000, Duration::from_millis(500)), 2000.0);
        assert_eq!(per_second(1000, Duration::from_secs(2)), 500.0);
    }

    #[test]
    fn per_second_zero_interval_is_raw() {
        assert_eq!(per_second(42, Duration::ZERO), 42.0);
    }
}
