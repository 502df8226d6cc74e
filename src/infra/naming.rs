// ============================================================
// Layer 6 — Persisted Name Codec
// ============================================================
// Checkpoints and attack results carry their metadata in their
// names; there is no side file. The formats are:
//
//   checkpoint:  {prefix}__{corpus}__{epochs}__{batch_size}__{learning_rate}
//                (the "{prefix}__" part is omitted when there is no prefix)
//
//   attack dir:  {YYYYMMDDHHMMSS}__{checkpoint}__{corpus}__{batch_size}__{auc:.3}
//
// Both decoders index fields from the end. For attack
// directories the checkpoint is "everything between the
// timestamp and the last three fields"; a corpus name that
// itself contains the separator would shift those fields.
// All format knowledge lives in this file.

use chrono::NaiveDateTime;

use crate::domain::checkpoint::CheckpointDescriptor;
use crate::domain::mia::AttackSummary;
use crate::error::{Result, TraceError};

pub const SEPARATOR: &str = "__";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

// ─── Checkpoint names ─────────────────────────────────────────────────────────

pub fn encode_checkpoint_name(
    prefix:        Option<&str>,
    corpus:        &str,
    epochs:        usize,
    batch_size:    usize,
    learning_rate: f64,
) -> String {
    let prefix = match prefix {
        Some(p) if !p.is_empty() => format!("{p}{SEPARATOR}"),
        _ => String::new(),
    };
    let learning_rate = format_learning_rate(learning_rate);
    format!("{prefix}{corpus}{SEPARATOR}{epochs}{SEPARATOR}{batch_size}{SEPARATOR}{learning_rate}")
}

/// Shortest round-trip form with the conventions existing checkpoint
/// names use: whole numbers keep a `.0` (`1.0`), and magnitudes below
/// 1e-4 or from 1e16 up switch to an exponent of at least two digits
/// (`1e-05`, `2.5e+16`).
pub fn format_learning_rate(rate: f64) -> String {
    let magnitude = rate.abs();
    if rate.is_finite() && rate != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{rate:e}");
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    let plain = rate.to_string();
    if rate.is_finite() && !plain.contains('.') {
        format!("{plain}.0")
    } else {
        plain
    }
}

pub fn decode_checkpoint_name(name: &str) -> Result<CheckpointDescriptor> {
    let parts: Vec<&str> = name.split(SEPARATOR).collect();
    if parts.len() < 4 {
        return Err(TraceError::malformed(
            name,
            format!("expected at least 4 '{SEPARATOR}'-separated fields, found {}", parts.len()),
        ));
    }

    let n = parts.len();
    let corpus = parts[n - 4];
    if corpus.is_empty() {
        return Err(TraceError::malformed(name, "empty corpus field"));
    }

    let prefix = parts[..n - 4].join(SEPARATOR);

    Ok(CheckpointDescriptor {
        name:          name.to_string(),
        prefix:        (!prefix.is_empty()).then_some(prefix),
        corpus:        corpus.to_string(),
        epochs:        parse_field(name, "epochs", parts[n - 3])?,
        batch_size:    parse_field(name, "batch size", parts[n - 2])?,
        learning_rate: parse_field(name, "learning rate", parts[n - 1])?,
    })
}

// ─── Attack directory names ───────────────────────────────────────────────────

pub fn encode_attack_dir_name(
    timestamp:  &str,
    checkpoint: &str,
    corpus:     &str,
    batch_size: usize,
    auc:        f64,
) -> String {
    format!("{timestamp}{SEPARATOR}{checkpoint}{SEPARATOR}{corpus}{SEPARATOR}{batch_size}{SEPARATOR}{auc:.3}")
}

pub fn decode_attack_dir_name(name: &str) -> Result<AttackSummary> {
    let parts: Vec<&str> = name.split(SEPARATOR).collect();
    if parts.len() < 5 {
        return Err(TraceError::malformed(
            name,
            format!("expected at least 5 '{SEPARATOR}'-separated fields, found {}", parts.len()),
        ));
    }

    let n = parts.len();
    let timestamp = parts[0];
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| TraceError::malformed(name, format!("bad timestamp '{timestamp}': {e}")))?;

    Ok(AttackSummary {
        timestamp:  timestamp.to_string(),
        checkpoint: parts[1..n - 3].join(SEPARATOR),
        corpus:     parts[n - 3].to_string(),
        batch_size: parse_field(name, "batch size", parts[n - 2])?,
        auc:        parse_field(name, "auc", parts[n - 1])?,
    })
}

fn parse_field<T>(name: &str, field: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| TraceError::malformed(name, format!("{field} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_name_with_prefix() {
        assert_eq!(
            encode_checkpoint_name(Some("demo"), "synth50", 2, 8, 0.002),
            "demo__synth50__2__8__0.002",
        );
    }

    #[test]
    fn test_checkpoint_name_without_prefix() {
        assert_eq!(encode_checkpoint_name(None, "web", 100, 64, 0.002), "web__100__64__0.002");
        assert_eq!(encode_checkpoint_name(Some(""), "web", 1, 1, 0.5), "web__1__1__0.5");
    }

    #[test]
    fn test_learning_rate_formatting() {
        assert_eq!(format_learning_rate(0.002), "0.002");
        assert_eq!(format_learning_rate(1.0), "1.0");
        assert_eq!(format_learning_rate(0.0), "0.0");
        assert_eq!(format_learning_rate(0.0001), "0.0001");
        assert_eq!(format_learning_rate(1e-5), "1e-05");
        assert_eq!(format_learning_rate(2.5e-7), "2.5e-07");
        assert_eq!(format_learning_rate(3e16), "3e+16");
    }

    #[test]
    fn test_checkpoint_name_keeps_float_shape_of_learning_rate() {
        assert_eq!(encode_checkpoint_name(None, "web", 1, 1, 1.0), "web__1__1__1.0");
        assert_eq!(encode_checkpoint_name(None, "web", 1, 1, 1e-5), "web__1__1__1e-05");

        let d = decode_checkpoint_name("web__1__1__1e-05").unwrap();
        assert_eq!(d.learning_rate, 1e-5);
    }

    #[test]
    fn test_decode_checkpoint_name() {
        let d = decode_checkpoint_name("demo__synth50__2__8__0.002").unwrap();
        assert_eq!(d.prefix.as_deref(), Some("demo"));
        assert_eq!(d.corpus, "synth50");
        assert_eq!((d.epochs, d.batch_size), (2, 8));
        assert_eq!(d.learning_rate, 0.002);
        assert_eq!(d.name, "demo__synth50__2__8__0.002");
    }

    #[test]
    fn test_decode_checkpoint_name_keeps_multi_part_prefix() {
        let d = decode_checkpoint_name("a__b__corpus__1__2__0.1").unwrap();
        assert_eq!(d.prefix.as_deref(), Some("a__b"));
        assert_eq!(d.corpus, "corpus");
    }

    #[test]
    fn test_decode_checkpoint_name_without_prefix() {
        let d = decode_checkpoint_name("web__100__64__0.002").unwrap();
        assert_eq!(d.prefix, None);
    }

    #[test]
    fn test_decode_checkpoint_name_rejects_bad_fields() {
        assert!(decode_checkpoint_name("too__short").is_err());
        assert!(decode_checkpoint_name("demo__c__two__8__0.1").is_err());
        assert!(decode_checkpoint_name("demo__c__2__8__fast").is_err());
    }

    #[test]
    fn test_attack_dir_name_formats_auc_to_three_places() {
        let name = encode_attack_dir_name("20250101120000", "demo__synth50__2__8__0.002", "synth50", 8, 0.91234);
        assert_eq!(name, "20250101120000__demo__synth50__2__8__0.002__synth50__8__0.912");
    }

    #[test]
    fn test_decode_attack_dir_name_recovers_checkpoint() {
        let s = decode_attack_dir_name("20250101120000__demo__synth50__2__8__0.002__synth50__8__0.912").unwrap();
        assert_eq!(s.timestamp, "20250101120000");
        assert_eq!(s.checkpoint, "demo__synth50__2__8__0.002");
        assert_eq!(s.corpus, "synth50");
        assert_eq!(s.batch_size, 8);
        assert_eq!(s.auc, 0.912);
    }

    #[test]
    fn test_decode_attack_dir_name_rejects_missing_field() {
        let err = decode_attack_dir_name("20250101120000__ckpt__synth50__0.912").unwrap_err();
        assert!(matches!(err, TraceError::MalformedName { .. }));
    }

    #[test]
    fn test_decode_attack_dir_name_rejects_bad_timestamp() {
        assert!(decode_attack_dir_name("yesterday__ckpt__synth50__8__0.912").is_err());
    }
}
