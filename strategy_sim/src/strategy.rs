//! Pit-strategy label.
//!
//! Decided from the requested compound name and race length alone. It never
//! looks at tyre wear, so the label can disagree with the stops the lap loop
//! actually takes (e.g. "1 Stop (Lap 5)" on a race with two forced stops).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitPlan {
    OneStop { lap: u32 },
    TwoStop { first: u32, second: u32 },
}

impl PitPlan {
    /// First match wins: long soft race, then hard, then mid-race single stop.
    pub fn classify(compound: &str, laps: u32) -> Self {
        if compound == "Soft" && laps > 20 {
            PitPlan::TwoStop {
                first: laps / 3,
                second: 2 * laps / 3,
            }
        } else if compound == "Hard" {
            PitPlan::OneStop {
                lap: (f64::from(laps) * 0.6).floor() as u32,
            }
        } else {
            PitPlan::OneStop { lap: laps / 2 }
        }
    }

    pub fn laps(&self) -> Vec<u32> {
        match *self {
            PitPlan::OneStop { lap } => vec![lap],
            PitPlan::TwoStop { first, second } => vec![first, second],
        }
    }
}

impl fmt::Display for PitPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitPlan::OneStop { lap } => write!(f, "1 Stop (Lap {lap})"),
            PitPlan::TwoStop { first, second } => write!(f, "2 Stops (Lap {first}, {second})"),
        }
    }
}
