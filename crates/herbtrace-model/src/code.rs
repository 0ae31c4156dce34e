//! Scannable codes for plants and packages
//!
//! A code is a pure function of its inputs. Layout:
//!
//! ```text
//! PLANT-<plant_id>-<farm_id>-<unix_millis>-<check>
//! PKG-<package_id>-<member_count>-<unix_millis>-<check>
//! ```
//!
//! `unix_millis` is written in decimal; times before the epoch carry an
//! `n` sign marker instead of `-` so the field never contains the
//! separator. `check` is the first 4 bytes (8 hex chars) of a BLAKE3
//! digest over everything before it. The prefix lets a scanner branch on record type
//! without a lookup; the check catches damaged or hand-edited labels.

use crate::error::DecodeError;
use crate::id::{PackageId, PlantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Discriminator prefix for plant codes
pub const PLANT_PREFIX: &str = "PLANT";

/// Discriminator prefix for package codes
pub const PACKAGE_PREFIX: &str = "PKG";

const SEPARATOR: char = '-';
const NEGATIVE_MARK: char = 'n';
const CHECK_BYTES: usize = 4;

/// Build the scannable code for a plant
#[must_use]
pub fn new_plant_code(plant_id: PlantId, farm_id: &str, timestamp: DateTime<Utc>) -> String {
    seal(format!(
        "{PLANT_PREFIX}{SEPARATOR}{plant_id}{SEPARATOR}{farm_id}{SEPARATOR}{}",
        format_millis(timestamp)
    ))
}

/// Build the scannable code for a package
#[must_use]
pub fn new_package_code(
    package_id: PackageId,
    member_count: usize,
    timestamp: DateTime<Utc>,
) -> String {
    seal(format!(
        "{PACKAGE_PREFIX}{SEPARATOR}{package_id}{SEPARATOR}{member_count}{SEPARATOR}{}",
        format_millis(timestamp)
    ))
}

/// Prefix sniff for plant codes. Does not decode.
#[inline]
#[must_use]
pub fn is_plant_code(code: &str) -> bool {
    has_prefix(code, PLANT_PREFIX)
}

/// Prefix sniff for package codes. Does not decode.
#[inline]
#[must_use]
pub fn is_package_code(code: &str) -> bool {
    has_prefix(code, PACKAGE_PREFIX)
}

fn has_prefix(code: &str, prefix: &str) -> bool {
    code.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

fn checksum(body: &str) -> String {
    let digest = blake3::hash(body.as_bytes());
    hex::encode(&digest.as_bytes()[..CHECK_BYTES])
}

fn format_millis(timestamp: DateTime<Utc>) -> String {
    let millis = timestamp.timestamp_millis();
    if millis < 0 {
        format!("{NEGATIVE_MARK}{}", millis.unsigned_abs())
    } else {
        millis.to_string()
    }
}

fn seal(body: String) -> String {
    let check = checksum(&body);
    format!("{body}{SEPARATOR}{check}")
}

/// A successfully decoded code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScannedCode {
    /// Plant label
    Plant {
        plant_id: PlantId,
        farm_id: String,
        created_at: DateTime<Utc>,
    },
    /// Package label
    Package {
        package_id: PackageId,
        member_count: usize,
        assembled_at: DateTime<Utc>,
    },
}

impl ScannedCode {
    /// Decode, discarding the failure reason.
    ///
    /// Damaged and foreign labels are routine at a scanner, so callers that
    /// only care whether the label is ours use this.
    #[inline]
    #[must_use]
    pub fn try_scan(code: &str) -> Option<Self> {
        decode_code(code).ok()
    }

    /// Plant id, if this is a plant label
    #[must_use]
    pub fn plant_id(&self) -> Option<PlantId> {
        match self {
            Self::Plant { plant_id, .. } => Some(*plant_id),
            Self::Package { .. } => None,
        }
    }

    /// Package id, if this is a package label
    #[must_use]
    pub fn package_id(&self) -> Option<PackageId> {
        match self {
            Self::Package { package_id, .. } => Some(*package_id),
            Self::Plant { .. } => None,
        }
    }
}

impl FromStr for ScannedCode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_code(s)
    }
}

/// Fully decode a scannable code
///
/// # Errors
/// Returns [`DecodeError`] for empty input, foreign prefixes, missing or
/// malformed fields, and checksum mismatches.
pub fn decode_code(code: &str) -> Result<ScannedCode, DecodeError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    let (prefix, _) = code.split_once(SEPARATOR).unwrap_or((code, ""));
    if prefix != PLANT_PREFIX && prefix != PACKAGE_PREFIX {
        return Err(DecodeError::UnknownPrefix(prefix.to_string()));
    }

    let (body, check) = code
        .rsplit_once(SEPARATOR)
        .filter(|(body, _)| body.len() > prefix.len())
        .ok_or(DecodeError::MissingField("checksum"))?;
    let expected = checksum(body);
    if !expected.eq_ignore_ascii_case(check) {
        return Err(DecodeError::ChecksumMismatch {
            expected,
            actual: check.to_string(),
        });
    }

    let fields = &body[prefix.len() + 1..];
    if prefix == PLANT_PREFIX {
        decode_plant_fields(fields)
    } else {
        decode_package_fields(fields)
    }
}

fn decode_plant_fields(fields: &str) -> Result<ScannedCode, DecodeError> {
    let (id, rest) = fields
        .split_once(SEPARATOR)
        .ok_or(DecodeError::MissingField("farm_id"))?;
    // Farm ids are opaque and may themselves contain the separator.
    let (farm_id, millis) = rest
        .rsplit_once(SEPARATOR)
        .ok_or(DecodeError::MissingField("timestamp"))?;
    if farm_id.is_empty() {
        return Err(DecodeError::MissingField("farm_id"));
    }

    Ok(ScannedCode::Plant {
        plant_id: id.parse()?,
        farm_id: farm_id.to_string(),
        created_at: parse_millis(millis)?,
    })
}

fn decode_package_fields(fields: &str) -> Result<ScannedCode, DecodeError> {
    let mut parts = fields.splitn(3, SEPARATOR);
    let id = parts.next().ok_or(DecodeError::MissingField("package_id"))?;
    let count = parts.next().ok_or(DecodeError::MissingField("member_count"))?;
    let millis = parts.next().ok_or(DecodeError::MissingField("timestamp"))?;

    let member_count = count
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| DecodeError::InvalidCount(count.to_string()))?;

    Ok(ScannedCode::Package {
        package_id: id.parse()?,
        member_count,
        assembled_at: parse_millis(millis)?,
    })
}

fn parse_millis(raw: &str) -> Result<DateTime<Utc>, DecodeError> {
    let (negative, digits) = match raw.strip_prefix(NEGATIVE_MARK) {
        Some(digits) => (true, digits),
        None => (false, raw),
    };
    // Digits only: a stray sign means a field boundary was misread.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidTimestamp(raw.to_string()));
    }

    digits
        .parse::<i64>()
        .ok()
        .map(|millis| if negative { -millis } else { millis })
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| DecodeError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn plant_code_is_deterministic() {
        let id = PlantId::new();
        assert_eq!(new_plant_code(id, "farm-7", at()), new_plant_code(id, "farm-7", at()));
    }

    #[test]
    fn plant_code_sniffs_as_plant_only() {
        let code = new_plant_code(PlantId::new(), "farm-7", at());
        assert!(is_plant_code(&code));
        assert!(!is_package_code(&code));
    }

    #[test]
    fn package_code_sniffs_as_package_only() {
        let code = new_package_code(PackageId::new(), 3, at());
        assert!(is_package_code(&code));
        assert!(!is_plant_code(&code));
    }

    #[test]
    fn sniff_requires_separator() {
        assert!(!is_plant_code("PLANTATION-1"));
        assert!(!is_package_code("PKGX"));
        assert!(!is_plant_code(""));
    }

    #[test]
    fn decode_plant_with_dashed_farm() {
        let id = PlantId::new();
        let code = new_plant_code(id, "north-field-2", at());
        let scanned = decode_code(&code).unwrap();
        assert_eq!(
            scanned,
            ScannedCode::Plant {
                plant_id: id,
                farm_id: "north-field-2".to_string(),
                created_at: at(),
            }
        );
        assert_eq!(scanned.plant_id(), Some(id));
        assert_eq!(scanned.package_id(), None);
    }

    #[test]
    fn decode_package() {
        let id = PackageId::new();
        let code = new_package_code(id, 12, at());
        let scanned: ScannedCode = code.parse().unwrap();
        assert_eq!(scanned.package_id(), Some(id));
        assert!(matches!(scanned, ScannedCode::Package { member_count: 12, .. }));
    }

    #[test]
    fn decode_rejects_foreign_prefix() {
        assert!(matches!(
            decode_code("LOT-1234-abcd"),
            Err(DecodeError::UnknownPrefix(p)) if p == "LOT"
        ));
        assert!(matches!(decode_code("garbage"), Err(DecodeError::UnknownPrefix(_))));
    }

    #[test]
    fn decode_rejects_empty_and_truncated() {
        assert!(matches!(decode_code("   "), Err(DecodeError::Empty)));
        assert!(matches!(decode_code("PLANT"), Err(DecodeError::MissingField("checksum"))));
        assert!(matches!(decode_code("PKG-"), Err(DecodeError::MissingField("checksum"))));
    }

    #[test]
    fn decode_rejects_tampered_code() {
        let code = new_plant_code(PlantId::new(), "farm-7", at());
        let tampered = code.replacen("farm-7", "farm-8", 1);
        assert!(matches!(
            decode_code(&tampered),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_identifier_behind_valid_checksum() {
        let code = seal(format!("{PLANT_PREFIX}-not_a_ulid-farm-1700000000000"));
        assert!(matches!(decode_code(&code), Err(DecodeError::InvalidIdentifier(_))));
    }

    #[test]
    fn decode_rejects_zero_members() {
        let code = seal(format!("{PACKAGE_PREFIX}-{}-0-1700000000000", PackageId::new()));
        assert!(matches!(decode_code(&code), Err(DecodeError::InvalidCount(_))));
    }

    #[test]
    fn pre_epoch_plant_code_keeps_farm_and_time() {
        let id = PlantId::new();
        let planted = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap();
        let code = new_plant_code(id, "farm", planted);
        assert!(code.contains("-farm-n86400000-"));
        assert_eq!(
            decode_code(&code).unwrap(),
            ScannedCode::Plant {
                plant_id: id,
                farm_id: "farm".to_string(),
                created_at: planted,
            }
        );
    }

    #[test]
    fn pre_epoch_package_code_round_trips() {
        let id = PackageId::new();
        let assembled = Utc.with_ymd_and_hms(1950, 6, 1, 12, 0, 0).unwrap();
        let code = new_package_code(id, 2, assembled);
        assert_eq!(
            decode_code(&code).unwrap(),
            ScannedCode::Package {
                package_id: id,
                member_count: 2,
                assembled_at: assembled,
            }
        );
    }

    #[test]
    fn decode_rejects_signed_timestamp_field() {
        let id = PackageId::new();
        let dashed = seal(format!("{PACKAGE_PREFIX}-{id}-2--86400000"));
        assert!(matches!(decode_code(&dashed), Err(DecodeError::InvalidTimestamp(_))));
        let plus = seal(format!("{PACKAGE_PREFIX}-{id}-2-+86400000"));
        assert!(matches!(decode_code(&plus), Err(DecodeError::InvalidTimestamp(_))));
    }

    proptest::proptest! {
        #[test]
        fn generated_codes_always_sniff_and_decode(
            farm in "[a-zA-Z0-9 _-]{1,24}",
            members in 1usize..10_000,
            millis in -8_000_000_000_000i64..4_102_444_800_000,
        ) {
            let ts = DateTime::<Utc>::from_timestamp_millis(millis).unwrap();

            let plant_id = PlantId::new();
            let plant_code = new_plant_code(plant_id, &farm, ts);
            proptest::prop_assert!(is_plant_code(&plant_code));
            proptest::prop_assert!(!is_package_code(&plant_code));
            proptest::prop_assert_eq!(
                decode_code(&plant_code).unwrap(),
                ScannedCode::Plant { plant_id, farm_id: farm.clone(), created_at: ts }
            );

            let package_id = PackageId::new();
            let package_code = new_package_code(package_id, members, ts);
            proptest::prop_assert!(is_package_code(&package_code));
            proptest::prop_assert!(!is_plant_code(&package_code));
            proptest::prop_assert_eq!(
                decode_code(&package_code).unwrap(),
                ScannedCode::Package { package_id, member_count: members, assembled_at: ts }
            );
        }
    }

    #[test]
    fn try_scan_swallows_errors() {
        assert!(ScannedCode::try_scan("PLANT-broken").is_none());
        let code = new_package_code(PackageId::new(), 1, at());
        assert!(ScannedCode::try_scan(&code).is_some());
    }
}
