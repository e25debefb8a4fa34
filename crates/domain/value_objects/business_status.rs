use chrono::NaiveTime;

use super::{
    enums::{business_kinds::BusinessKind, business_modes::BusinessMode},
    schedule::is_open_by_schedule,
};

/// The subset of a business the status resolver looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusControl<'a> {
    pub kind: BusinessKind,
    pub mode: BusinessMode,
    pub manual_open: bool,
    pub open_time: Option<&'a str>,
    pub close_time: Option<&'a str>,
}

impl StatusControl<'_> {
    /// Displayed open/closed value at the given local clock reading.
    pub fn resolve(&self, now_local: NaiveTime) -> bool {
        if !self.kind.is_physical() {
            return true;
        }
        match self.mode {
            BusinessMode::Manual => self.manual_open,
            BusinessMode::Automatic => is_open_by_schedule(self.open_time, self.close_time, now_local),
        }
    }
}

/// Outcome of a mode change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: BusinessMode,
    pub manual_open: bool,
    pub is_open: bool,
}

/// Applies a mode switch without touching the stored open/closed value,
/// except when MANUAL comes with an explicit flag.
pub fn apply_mode_change(
    requested: BusinessMode,
    requested_open: Option<bool>,
    current_manual_open: bool,
    current_is_open: bool,
) -> ModeChange {
    match requested {
        BusinessMode::Manual => {
            let value = requested_open.unwrap_or(current_is_open);
            ModeChange {
                mode: BusinessMode::Manual,
                manual_open: value,
                is_open: value,
            }
        }
        BusinessMode::Automatic => ModeChange {
            mode: BusinessMode::Automatic,
            manual_open: current_manual_open,
            is_open: current_is_open,
        },
    }
}
