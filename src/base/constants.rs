//! Shared constants for feature values and reserved pattern tokens.

/// Feature value meaning "unconstrained". Only meaningful on the pattern side of a match.
pub const UNDEFINED_VALUE: f64 = f64::NAN;

/// Diacritic cell value meaning "leave the base feature untouched".
pub const MASKING_VALUE: f64 = f64::NEG_INFINITY;

/// Sequence boundary marker in patterns and conditions.
pub const BOUNDARY: &str = "#";

/// Target token that contributes nothing to the replacement.
pub const DELETION: &str = "0";

/// Separates left and right context in a condition.
pub const TARGET_MARKER: char = '_';

/// Returns true if a feature value is the wildcard.
#[inline]
pub fn is_undefined(value: f64) -> bool {
    value.is_nan()
}

/// Returns true if a diacritic cell leaves the base value untouched.
#[inline]
pub fn is_masking(value: f64) -> bool {
    value == MASKING_VALUE
}

/// Feature-value equality where two wildcards compare equal.
#[inline]
pub fn values_equal(a: f64, b: f64) -> bool {
    a == b || (is_undefined(a) && is_undefined(b))
}
