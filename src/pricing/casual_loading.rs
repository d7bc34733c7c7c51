//! Casual loading calculation.
//!
//! Casual workers receive a percentage uplift on the base rate in lieu of
//! leave entitlements. The uplift is a single multiplicative step and is
//! never compounded with penalties or overtime multipliers.

use rust_decimal::Decimal;

use crate::models::EmploymentBasis;

/// The result of applying casual loading to a base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasualLoadingResult {
    /// The rate after loading (unchanged for permanent workers).
    pub loaded_rate: Decimal,
    /// Whether loading was applied.
    pub applied: bool,
}

/// Applies casual loading for the given employment basis.
///
/// For casual workers the effective base rate becomes
/// `base_rate * (1 + loading_percent / 100)`; permanent workers keep the
/// base rate unmodified.
///
/// # Examples
///
/// ```
/// use agreement_engine::models::EmploymentBasis;
/// use agreement_engine::pricing::apply_casual_loading;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = apply_casual_loading(
///     Decimal::from_str("28.00").unwrap(),
///     Decimal::from_str("25").unwrap(),
///     EmploymentBasis::Casual,
/// );
/// assert_eq!(result.loaded_rate, Decimal::from_str("35.00").unwrap());
/// assert!(result.applied);
/// ```
pub fn apply_casual_loading(
    base_rate: Decimal,
    loading_percent: Decimal,
    basis: EmploymentBasis,
) -> CasualLoadingResult {
    match basis {
        EmploymentBasis::Casual => {
            let multiplier = Decimal::ONE + loading_percent / Decimal::new(100, 0);
            CasualLoadingResult {
                loaded_rate: base_rate * multiplier,
                applied: true,
            }
        }
        EmploymentBasis::Permanent => CasualLoadingResult {
            loaded_rate: base_rate,
            applied: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_casual_gets_25_percent_loading() {
        let result = apply_casual_loading(dec("28.00"), dec("25"), EmploymentBasis::Casual);
        assert_eq!(result.loaded_rate, dec("35.00"));
        assert!(result.applied);
    }

    #[test]
    fn test_permanent_gets_no_loading() {
        let result = apply_casual_loading(dec("28.00"), dec("25"), EmploymentBasis::Permanent);
        assert_eq!(result.loaded_rate, dec("28.00"));
        assert!(!result.applied);
    }

    #[test]
    fn test_loading_on_different_percent() {
        let result = apply_casual_loading(dec("30.00"), dec("20"), EmploymentBasis::Casual);
        assert_eq!(result.loaded_rate, dec("36.00"));
    }

    #[test]
    fn test_loading_on_zero_rate() {
        let result = apply_casual_loading(dec("0.00"), dec("25"), EmploymentBasis::Casual);
        assert_eq!(result.loaded_rate, dec("0.00"));
    }

    #[test]
    fn test_zero_percent_loading_is_identity() {
        let result = apply_casual_loading(dec("28.00"), dec("0"), EmploymentBasis::Casual);
        assert_eq!(result.loaded_rate, dec("28.00"));
        assert!(result.applied);
    }
}
