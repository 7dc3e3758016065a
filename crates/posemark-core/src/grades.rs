//! Score to letter-grade conversion for the companion gradebook.
//!
//! Both scales accept either a percentage (`87.3`) or a fraction (`0.873`);
//! anything at or below `1.0` is read as a fraction. Invalid input yields a
//! sentinel string rather than an error, matching spreadsheet formulas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PoseMarkError;

pub const INVALID_INPUT: &str = "Invalid input";
pub const OUT_OF_RANGE: &str = "ERROR";

/// Lower bounds of the standard scale, highest first.
const STANDARD_THRESHOLDS: [(f64, &str); 12] = [
    (96.51, "A+"),
    (92.51, "A"),
    (89.51, "A-"),
    (86.51, "B+"),
    (82.51, "B"),
    (79.51, "B-"),
    (76.51, "C+"),
    (72.51, "C"),
    (69.51, "C-"),
    (66.51, "D+"),
    (62.51, "D"),
    (59.51, "D-"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeScale {
    #[default]
    Standard,
    Ap,
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Ap => write!(f, "ap"),
        }
    }
}

impl FromStr for GradeScale {
    type Err = PoseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "ap" => Ok(Self::Ap),
            other => Err(PoseMarkError::Config(format!("unknown grade scale '{other}'"))),
        }
    }
}

/// Standard plus/minus letter grade.
///
/// Fractions are snapped to the whole percent they display as, so `0.965`
/// grades like the `97%` a spreadsheet shows for it. A fraction can therefore
/// grade differently from the same percentage written out: `0.925` is `"A"`
/// while `92.5` is `"A-"`, and `0.595` is `"D-"` while `59.5` is `"F"`.
/// Values outside `[0, 100]` after conversion return `"ERROR"`.
pub fn letter_grade(score: f64) -> &'static str {
    if score.is_nan() {
        return INVALID_INPUT;
    }
    let percent = if score <= 1.0 {
        (score * 100.0 + 1e-9).round()
    } else {
        score
    };
    if !(0.0..=100.0).contains(&percent) {
        return OUT_OF_RANGE;
    }

    STANDARD_THRESHOLDS
        .iter()
        .find(|(min, _)| percent >= *min)
        .map_or("F", |(_, letter)| letter)
}

/// Coarse five-band scale. Out-of-range values are reported as invalid.
pub fn ap_letter(score: f64) -> &'static str {
    if score.is_nan() {
        return INVALID_INPUT;
    }
    let percent = if score <= 1.0 { score * 100.0 } else { score };
    if !(0.0..=100.0).contains(&percent) {
        return INVALID_INPUT;
    }

    match percent {
        p if p < 30.0 => "F",
        p if p < 50.0 => "D",
        p if p < 70.0 => "C",
        p if p < 80.0 => "B",
        p if p < 100.0 => "A",
        _ => "A+",
    }
}

/// Grade a raw spreadsheet cell. Empty or non-numeric cells are invalid.
pub fn grade_cell(cell: &str, scale: GradeScale) -> &'static str {
    let Ok(score) = cell.trim().parse::<f64>() else {
        return INVALID_INPUT;
    };
    match scale {
        GradeScale::Standard => letter_grade(score),
        GradeScale::Ap => ap_letter(score),
    }
}
