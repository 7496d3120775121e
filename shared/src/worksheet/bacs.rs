//! Building Automation and Control System (BACS) applicability check.
//!
//! A building is subject to the BACS obligation when a single piece of equipment reaches the
//! single-equipment threshold, or when the total installed power reaches the total threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BacsThresholds {
    pub single_equipment_threshold_kw: f64,
    pub total_power_threshold_kw: f64,
}

impl Default for BacsThresholds {
    fn default() -> Self {
        Self {
            single_equipment_threshold_kw: 70.0,
            total_power_threshold_kw: 290.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BacsStatus {
    Subject,
    NotSubject,
}

impl BacsStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Subject => "ASSUJETTI",
            Self::NotSubject => "NON ASSUJETTI",
        }
    }
}

impl fmt::Display for BacsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacsAssessment {
    pub status: BacsStatus,
    pub label: &'static str,
    /// Largest per-unit power on the worksheet; `None` when the worksheet is empty.
    pub largest_equipment_kw: Option<f64>,
    pub total_power_kw: f64,
    pub single_threshold_exceeded: bool,
    pub total_threshold_exceeded: bool,
    pub thresholds: BacsThresholds,
}

impl BacsThresholds {
    pub fn assess(&self, largest_equipment_kw: Option<f64>, total_power_kw: f64) -> BacsAssessment {
        let single_threshold_exceeded =
            largest_equipment_kw.is_some_and(|kw| kw >= self.single_equipment_threshold_kw);
        let total_threshold_exceeded = total_power_kw >= self.total_power_threshold_kw;

        let status = if single_threshold_exceeded || total_threshold_exceeded {
            BacsStatus::Subject
        } else {
            BacsStatus::NotSubject
        };

        BacsAssessment {
            status,
            label: status.label(),
            largest_equipment_kw,
            total_power_kw,
            single_threshold_exceeded,
            total_threshold_exceeded,
            thresholds: *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_both_thresholds() {
        let a = BacsThresholds::default().assess(Some(69.9), 289.9);
        assert_eq!(a.status, BacsStatus::NotSubject);
        assert_eq!(a.label, "NON ASSUJETTI");
        assert!(!a.single_threshold_exceeded);
        assert!(!a.total_threshold_exceeded);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let single = BacsThresholds::default().assess(Some(70.0), 70.0);
        assert_eq!(single.status, BacsStatus::Subject);
        assert!(single.single_threshold_exceeded);
        assert!(!single.total_threshold_exceeded);

        let total = BacsThresholds::default().assess(Some(10.0), 290.0);
        assert_eq!(total.status, BacsStatus::Subject);
        assert!(!total.single_threshold_exceeded);
        assert!(total.total_threshold_exceeded);
    }

    #[test]
    fn empty_worksheet_is_not_subject() {
        let a = BacsThresholds::default().assess(None, 0.0);
        assert_eq!(a.status, BacsStatus::NotSubject);
        assert_eq!(a.largest_equipment_kw, None);
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = BacsThresholds {
            single_equipment_threshold_kw: 5.0,
            total_power_threshold_kw: 1000.0,
        };
        let a = thresholds.assess(Some(7.5), 7.5);
        assert_eq!(a.status, BacsStatus::Subject);
        assert_eq!(a.thresholds, thresholds);
    }
}
