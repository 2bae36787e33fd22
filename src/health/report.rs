//! Status report assembly.
//!
//! Down targets come first, then everything else; ties are broken by
//! name ascending.

use crate::health::state::Status;
use crate::targets::TargetSnapshot;

/// Summary of all targets at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub up: usize,
    pub down: usize,
    pub entries: Vec<TargetSnapshot>,
}

impl StatusReport {
    pub fn from_snapshot(mut entries: Vec<TargetSnapshot>) -> Self {
        let up = entries.iter().filter(|t| t.state.status == Status::Up).count();
        let down = entries.iter().filter(|t| t.state.status == Status::Down).count();

        entries.sort_by(|a, b| {
            let a_key = (a.state.status != Status::Down, &a.name);
            let b_key = (b.state.status != Status::Down, &b.name);
            a_key.cmp(&b_key)
        });

        Self { up, down, entries }
    }
}
