// Turns loosely-typed tool output into base units: bytes, ratios, absolute timestamps.

use crate::error::AdapterError;
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Parse newline-delimited JSON. Blank lines are skipped; any malformed line fails the batch.
pub fn parse_json_lines<T: DeserializeOwned>(
    source_name: &str,
    output: &str,
) -> Result<Vec<T>, AdapterError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|error| AdapterError::Parse {
                source_name: source_name.to_string(),
                fragment: line.to_string(),
                error,
            })
        })
        .collect()
}

/// Parse a single JSON document.
pub fn parse_json_document<T: DeserializeOwned>(
    source_name: &str,
    output: &str,
) -> Result<T, AdapterError> {
    serde_json::from_str(output).map_err(|error| AdapterError::Parse {
        source_name: source_name.to_string(),
        fragment: output.chars().take(120).collect(),
        error,
    })
}

/// `"17.5MiB / 31.14GiB"` -> 18350080. Only the usage (left) side is kept.
pub fn mem_usage_bytes(field: &'static str, raw: &str) -> Result<u64, AdapterError> {
    let mut parts = raw.split(" / ");
    let (Some(usage), Some(_limit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AdapterError::normalize(
            field,
            raw,
            "expected \"<usage> / <limit>\"",
        ));
    };

    let (number, multiplier) = if let Some(n) = usage.strip_suffix("KiB") {
        (n, KIB)
    } else if let Some(n) = usage.strip_suffix("MiB") {
        (n, MIB)
    } else if let Some(n) = usage.strip_suffix("GiB") {
        (n, GIB)
    } else {
        return Err(AdapterError::normalize(
            field,
            raw,
            "unit must be KiB, MiB or GiB",
        ));
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| AdapterError::normalize(field, raw, "usage is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AdapterError::normalize(
            field,
            raw,
            "usage must be a non-negative number",
        ));
    }
    Ok((value * multiplier).floor() as u64)
}

/// `"12.56%"` -> 0.1256. Values above 100% are kept (multi-core usage).
pub fn percent_ratio(field: &'static str, raw: &str) -> Result<f64, AdapterError> {
    let number = raw
        .trim()
        .strip_suffix('%')
        .ok_or_else(|| AdapterError::normalize(field, raw, "missing '%' suffix"))?;
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| AdapterError::normalize(field, raw, "not a number"))?;
    Ok(value / 100.0)
}

/// `"2025-11-02 16:19:51 +0100 CET"` -> 2025-11-02T16:19:51+01:00.
/// Exactly four tokens. The zone name must be present but is ignored; the offset is authoritative.
pub fn docker_timestamp(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<FixedOffset>, AdapterError> {
    let mut tokens = raw.split_whitespace();
    let (Some(date), Some(time), Some(offset), Some(_zone), None) = (
        tokens.next(),
        tokens.next(),
        tokens.next(),
        tokens.next(),
        tokens.next(),
    ) else {
        return Err(AdapterError::normalize(
            field,
            raw,
            "expected \"<date> <time> <offset> <zone>\"",
        ));
    };
    DateTime::parse_from_str(
        &format!("{} {} {}", date, time, offset),
        "%Y-%m-%d %H:%M:%S%.f %z",
    )
    .map_err(|e| AdapterError::normalize(field, raw, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn mem_usage_takes_left_operand_in_mebibytes() {
        assert_eq!(
            mem_usage_bytes("MemUsage", "17.5MiB / 31.14GiB").unwrap(),
            18_350_080
        );
    }

    #[test]
    fn mem_usage_kibibytes_and_gibibytes() {
        assert_eq!(mem_usage_bytes("MemUsage", "2KiB / 4KiB").unwrap(), 2048);
        assert_eq!(
            mem_usage_bytes("MemUsage", "1.5GiB / 8GiB").unwrap(),
            1_610_612_736
        );
    }

    #[test]
    fn mem_usage_floors_fractional_bytes() {
        // 1.0001 KiB = 1024.1024 bytes
        assert_eq!(mem_usage_bytes("MemUsage", "1.0001KiB / 2KiB").unwrap(), 1024);
    }

    #[test]
    fn mem_usage_rejects_unknown_unit() {
        let err = mem_usage_bytes("MemUsage", "17.5TiB / 31.14TiB").unwrap_err();
        match err {
            AdapterError::Normalize { field, raw, .. } => {
                assert_eq!(field, "MemUsage");
                assert_eq!(raw, "17.5TiB / 31.14TiB");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(mem_usage_bytes("MemUsage", "0B / 0B").is_err());
    }

    #[test]
    fn mem_usage_rejects_missing_or_repeated_separator() {
        assert!(mem_usage_bytes("MemUsage", "17.5MiB").is_err());
        assert!(mem_usage_bytes("MemUsage", "1MiB / 2MiB / 3MiB").is_err());
        assert!(mem_usage_bytes("MemUsage", "abcMiB / 2MiB").is_err());
    }

    #[test]
    fn percent_divides_by_one_hundred() {
        assert!((percent_ratio("CPUPerc", "12.56%").unwrap() - 0.1256).abs() < 1e-12);
        assert_eq!(percent_ratio("CPUPerc", "0%").unwrap(), 0.0);
        assert!((percent_ratio("CPUPerc", "250.00%").unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn percent_rejects_malformed_input() {
        assert!(percent_ratio("CPUPerc", "12.56").is_err());
        assert!(percent_ratio("CPUPerc", "--%").is_err());
    }

    #[test]
    fn timestamp_uses_offset_and_ignores_zone_name() {
        let expected = Utc.with_ymd_and_hms(2025, 11, 2, 15, 19, 51).unwrap();
        let cet = docker_timestamp("CreatedAt", "2025-11-02 16:19:51 +0100 CET").unwrap();
        let bogus = docker_timestamp("CreatedAt", "2025-11-02 16:19:51 +0100 XYZ").unwrap();
        assert_eq!(cet, expected);
        assert_eq!(bogus, expected);
        assert_eq!(cet.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn timestamp_requires_exactly_four_tokens() {
        assert!(docker_timestamp("CreatedAt", "2025-11-02 16:19:51 +0100").is_err());
        assert!(docker_timestamp("CreatedAt", "2025-11-02 16:19:51 +0100 CET extra").is_err());
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(docker_timestamp("CreatedAt", "yesterday").is_err());
        assert!(docker_timestamp("CreatedAt", "2025-13-02 16:19:51 +0100 CET").is_err());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Row {
        id: u32,
    }

    #[test]
    fn json_lines_skip_blank_lines() {
        let rows: Vec<Row> = parse_json_lines("test", "{\"id\":1}\n\n{\"id\":2}\n").unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn json_lines_fail_on_malformed_line() {
        let err = parse_json_lines::<Row>("test", "{\"id\":1}\nnot json\n").unwrap_err();
        match err {
            AdapterError::Parse { fragment, .. } => assert_eq!(fragment, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
