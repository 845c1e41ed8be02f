//! Schema versions of model objects.
//!
//! Versions are decimal strings with two fractional digits (`"1.00"`).
//! Decoded or restored models pass through [`resolve`], which stamps the
//! current version on unversioned data and migrates known older versions.

/// Fractional digits in a version string.
pub const VERSION_PRECISION: usize = 2;

/// Version stamped on models that carry none.
pub const CURRENT_VERSION: &str = "1.00";

/// Every version this build understands, oldest first.
pub const KNOWN_VERSIONS: &[&str] = &["1.00"];

/// Normalize a numeric version to [`VERSION_PRECISION`] digits.
///
/// `"1"` and `"1.0"` both become `"1.00"`. Non-numeric input yields `None`.
pub fn normalize(raw: &str) -> Option<String> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(format!("{:.*}", VERSION_PRECISION, value))
}

/// Version a model ends up with after decode or restore.
///
/// - missing or empty: [`CURRENT_VERSION`]
/// - current: unchanged
/// - known older: migrated step by step to the resolved version
/// - anything else: kept verbatim
pub fn resolve(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        None | Some("") => return CURRENT_VERSION.to_string(),
        Some(raw) => raw,
    };

    match normalize(raw) {
        Some(version) if version == CURRENT_VERSION => version,
        Some(version) if KNOWN_VERSIONS.contains(&version.as_str()) => migrate(&version),
        _ => raw.to_string(),
    }
}

/// Walk a known version forward.
///
/// Field migrations hook in here; every step so far is the identity.
fn migrate(from: &str) -> String {
    match from {
        "1.00" => "1.00".to_string(),
        other => other.to_string(),
    }
}
