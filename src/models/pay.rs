//! Pay breakdown models.
//!
//! A [`PayBreakdown`] is the priced result of one shift: an ordered list of
//! segments whose hours sum exactly to the worked hours and whose amounts
//! sum exactly to the total. Rounding, if any, happens only at display time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single priced segment of a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySegment {
    /// Human-readable label (e.g., "ordinary", "overtime tier 1").
    pub label: String,
    /// Hours worked in this segment.
    pub hours: Decimal,
    /// The hourly rate applied.
    pub rate: Decimal,
    /// The segment amount (hours * rate).
    pub amount: Decimal,
}

/// The complete priced result for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Ordered pay segments.
    pub segments: Vec<PaySegment>,
    /// Total worked hours (shift duration minus unpaid break).
    pub worked_hours: Decimal,
    /// Sum of all segment amounts. Exact, no rounding drift.
    pub total_pay: Decimal,
    /// `total_pay / worked_hours`.
    pub effective_hourly_rate: Decimal,
}

impl PayBreakdown {
    /// Assembles a breakdown from segments, enforcing the additivity
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if segment hours do not
    /// sum to `worked_hours`, or if any segment carries a negative rate or
    /// amount. A negative rate should be structurally impossible; failing
    /// loudly here is deliberate.
    pub fn from_segments(segments: Vec<PaySegment>, worked_hours: Decimal) -> EngineResult<Self> {
        let hours_sum: Decimal = segments.iter().map(|s| s.hours).sum();
        if hours_sum != worked_hours {
            return Err(EngineError::InvariantViolation {
                message: format!(
                    "segment hours {hours_sum} do not sum to worked hours {worked_hours}"
                ),
            });
        }

        for segment in &segments {
            if segment.rate < Decimal::ZERO || segment.amount < Decimal::ZERO {
                return Err(EngineError::InvariantViolation {
                    message: format!(
                        "segment '{}' has negative rate or amount ({} @ {})",
                        segment.label, segment.amount, segment.rate
                    ),
                });
            }
        }

        let total_pay: Decimal = segments.iter().map(|s| s.amount).sum();
        let effective_hourly_rate = total_pay / worked_hours;

        Ok(Self {
            segments,
            worked_hours,
            total_pay,
            effective_hourly_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn segment(label: &str, hours: &str, rate: &str) -> PaySegment {
        let hours = dec(hours);
        let rate = dec(rate);
        PaySegment {
            label: label.to_string(),
            hours,
            rate,
            amount: hours * rate,
        }
    }

    #[test]
    fn test_total_is_sum_of_segment_amounts() {
        let breakdown = PayBreakdown::from_segments(
            vec![
                segment("ordinary", "8", "28.00"),
                segment("overtime tier 1", "2", "42.00"),
            ],
            dec("10"),
        )
        .unwrap();

        assert_eq!(breakdown.total_pay, dec("308.00"));
        assert_eq!(breakdown.effective_hourly_rate, dec("30.8"));
    }

    #[test]
    fn test_hours_mismatch_is_invariant_violation() {
        let result =
            PayBreakdown::from_segments(vec![segment("ordinary", "8", "28.00")], dec("10"));
        assert!(matches!(
            result,
            Err(EngineError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_negative_rate_is_invariant_violation() {
        let result = PayBreakdown::from_segments(
            vec![segment("ordinary", "8", "-28.00")],
            dec("8"),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_single_segment_effective_rate_equals_segment_rate() {
        let breakdown =
            PayBreakdown::from_segments(vec![segment("ordinary", "8", "28.00")], dec("8")).unwrap();
        assert_eq!(breakdown.effective_hourly_rate, dec("28"));
    }

    #[test]
    fn test_breakdown_serialization_round_trip() {
        let breakdown =
            PayBreakdown::from_segments(vec![segment("ordinary", "6", "70.00")], dec("6")).unwrap();
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: PayBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(breakdown, back);
    }
}
