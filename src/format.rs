const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Formats a byte count with binary (1024) units and two decimals.
///
/// | in        | out         |
/// |-----------|-------------|
/// | 12000     | "11.72 KiB" |
/// | 1600000   | "1.53 MiB"  |
pub fn human_readable_bytesize(bytesize: u64) -> String {
    let bytes = bytesize as f64;
    let mut exponent = 0;
    while exponent + 1 < UNITS.len() && bytes >= 1024f64.powi(exponent as i32 + 1) {
        exponent += 1;
    }
    let in_unit = bytes / 1024f64.powi(exponent as i32);
    format!("{:.2} {}", in_unit, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_bytesize() {
        assert_eq!(human_readable_bytesize(0), "0.00 B");
        assert_eq!(human_readable_bytesize(512), "512.00 B");
        assert_eq!(human_readable_bytesize(1024), "1.00 KiB");
        assert_eq!(human_readable_bytesize(12000), "11.72 KiB");
        assert_eq!(human_readable_bytesize(1_600_000), "1.53 MiB");
        assert_eq!(human_readable_bytesize(2048 * 1024), "2.00 MiB");
    }
}
