use serde::{Deserialize, Serialize};

use super::TrajectoryEstimator;
use crate::error::{Result, TrackerError};
use crate::types::{Position, TickInput};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrozenState {
    pub position: Option<Position>,
    pub fix_updates: u64,
    pub held_ticks: u64,
}

/// Baseline: report the fix while there is one, then stop where the last
/// fix was.
#[derive(Debug, Default)]
pub struct FrozenEstimator {
    last_fix: Option<Position>,
    fix_updates: u64,
    held_ticks: u64,
}

impl FrozenEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_fix(&mut self, fix: Position) -> Position {
        self.last_fix = Some(fix);
        self.fix_updates += 1;
        fix
    }

    /// Hold position at the last fix.
    pub fn hold(&mut self) -> Result<Position> {
        let position = self.last_fix.ok_or(TrackerError::NoFixYet)?;
        self.held_ticks += 1;
        Ok(position)
    }

    pub fn get_state(&self) -> FrozenState {
        FrozenState {
            position: self.last_fix,
            fix_updates: self.fix_updates,
            held_ticks: self.held_ticks,
        }
    }
}

impl TrajectoryEstimator for FrozenEstimator {
    fn name(&self) -> &'static str {
        "frozen"
    }

    fn update(&mut self, input: &TickInput) -> Result<Position> {
        match input.fix {
            Some(fix) => Ok(self.update_fix(fix)),
            None => self.hold(),
        }
    }
}
