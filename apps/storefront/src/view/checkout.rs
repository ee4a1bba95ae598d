//! Checkout progress bar render model.
//!
//! ```text
//!   (1)━━━━━━━(2)━━━━━━━(3)───────(4)
//!  Shipping  Delivery  Payment   Review
//!    ✓          ✓        ●
//!
//!   fill = (step − 1) / 3 × 100  → 66.67%
//! ```

use serde::Serialize;
use shopease_core::checkout::CheckoutStep;
use ts_rs::TS;

/// One step marker.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StepMarker {
    pub step: CheckoutStep,
    pub number: u8,
    pub label: String,
    pub active: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutProgress {
    pub current_step: CheckoutStep,
    pub steps: Vec<StepMarker>,
    /// Width of the progress line, 0 to 100.
    pub percent: f64,
    pub can_go_back: bool,
    /// True on the review step, where "Place Order" replaces "Continue".
    pub is_last_step: bool,
}

impl CheckoutProgress {
    pub fn new(current: CheckoutStep) -> Self {
        let steps = CheckoutStep::ALL
            .iter()
            .map(|&step| StepMarker {
                step,
                number: step.number(),
                label: step.display_name().to_string(),
                active: step == current,
                completed: step < current,
            })
            .collect();

        let last = CheckoutStep::ALL.len() as f64;
        CheckoutProgress {
            current_step: current,
            steps,
            percent: f64::from(current.number() - 1) / (last - 1.0) * 100.0,
            can_go_back: current.previous().is_some(),
            is_last_step: current.next().is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(CheckoutProgress::new(CheckoutStep::Shipping).percent, 0.0);
        assert_eq!(CheckoutProgress::new(CheckoutStep::Review).percent, 100.0);

        let payment = CheckoutProgress::new(CheckoutStep::Payment).percent;
        assert!((payment - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_step_flags() {
        let progress = CheckoutProgress::new(CheckoutStep::Payment);

        let flags: Vec<(bool, bool)> = progress
            .steps
            .iter()
            .map(|s| (s.completed, s.active))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (true, false), (false, true), (false, false)]
        );
        assert!(progress.can_go_back);
        assert!(!progress.is_last_step);
        assert!(!CheckoutProgress::new(CheckoutStep::Shipping).can_go_back);
    }
}
