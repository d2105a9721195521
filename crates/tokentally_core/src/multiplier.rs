//! Global pricing multiplier.

use tracing::{debug, warn};

/// Environment variable holding the global multiplier.
pub const BASE_RATIO_VAR: &str = "BASE_RATIO";

/// Where a [`GlobalMultiplier`] value came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MultiplierSource {
    /// Parsed from configuration.
    #[display("configured")]
    Configured,
    /// No value was configured.
    #[display("default (unset)")]
    Unset,
    /// A value was configured but could not be used.
    #[display("default (invalid value {:?})", _0)]
    Invalid(String),
}

/// Scalar applied uniformly to prompt and completion cost.
///
/// Loaded once at startup and copied into every engine; it is never written
/// afterwards. Valid values are finite and non-negative.
///
/// # Examples
///
/// ```
/// use tokentally_core::{GlobalMultiplier, MultiplierSource};
///
/// let (ratio, source) = GlobalMultiplier::resolve(Some("2.5"));
/// assert_eq!(ratio.value(), 2.5);
/// assert_eq!(source, MultiplierSource::Configured);
///
/// let (ratio, _) = GlobalMultiplier::resolve(Some("lots"));
/// assert_eq!(ratio, GlobalMultiplier::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GlobalMultiplier(f64);

impl Default for GlobalMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl GlobalMultiplier {
    /// Create a multiplier, rejecting negative and non-finite values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// The scalar value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Resolve a raw configured value, falling back to `1.0` with a warning.
    pub fn resolve(raw: Option<&str>) -> (Self, MultiplierSource) {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            warn!(var = BASE_RATIO_VAR, "Multiplier not set, using default 1.0");
            return (Self::default(), MultiplierSource::Unset);
        };

        match raw.parse::<f64>().ok().and_then(Self::new) {
            Some(ratio) => {
                debug!(var = BASE_RATIO_VAR, ratio = ratio.0, "Loaded multiplier");
                (ratio, MultiplierSource::Configured)
            }
            None => {
                warn!(
                    var = BASE_RATIO_VAR,
                    value = raw,
                    "Could not parse multiplier, using default 1.0"
                );
                (Self::default(), MultiplierSource::Invalid(raw.to_string()))
            }
        }
    }

    /// Read the multiplier from the `BASE_RATIO` environment variable.
    pub fn from_env() -> Self {
        let raw = std::env::var(BASE_RATIO_VAR).ok();
        Self::resolve(raw.as_deref()).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_defaults_to_one() {
        assert_eq!(
            GlobalMultiplier::resolve(None),
            (GlobalMultiplier(1.0), MultiplierSource::Unset)
        );
        assert_eq!(
            GlobalMultiplier::resolve(Some("  ")),
            (GlobalMultiplier(1.0), MultiplierSource::Unset)
        );
    }

    #[test]
    fn test_parses_with_whitespace() {
        let (ratio, source) = GlobalMultiplier::resolve(Some(" 2.0\n"));
        assert_eq!(ratio.value(), 2.0);
        assert_eq!(source, MultiplierSource::Configured);
    }

    #[test]
    fn test_rejects_unusable_values() {
        for raw in ["abc", "-1", "NaN", "inf", "1.0.0"] {
            let (ratio, source) = GlobalMultiplier::resolve(Some(raw));
            assert_eq!(ratio.value(), 1.0, "{raw}");
            assert_eq!(source, MultiplierSource::Invalid(raw.to_string()));
        }
    }

    #[test]
    fn test_zero_is_allowed() {
        assert_eq!(GlobalMultiplier::new(0.0).map(|m| m.value()), Some(0.0));
    }
}
