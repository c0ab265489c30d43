use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress awarded when the adventure starts.
pub const START_PROGRESS: u8 = 20;
/// Progress awarded when a protagonist is chosen.
pub const CHARACTER_PROGRESS: u8 = 40;
/// Progress step applied by every panel transition.
pub const TRANSITION_PROGRESS_STEP: u8 = 15;

/// Display stage derived from the progress percentage.
///
/// Total and monotone over `0..=100`: the label can only move forward as
/// progress does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Beginning,
    ChapterOne,
    ChapterTwo,
    Complete,
}

impl ProgressStage {
    #[must_use]
    pub const fn for_percent(percent: u8) -> Self {
        match percent {
            0 => Self::Beginning,
            1..=49 => Self::ChapterOne,
            50..=99 => Self::ChapterTwo,
            _ => Self::Complete,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginning => "Beginning",
            Self::ChapterOne => "Chapter 1",
            Self::ChapterTwo => "Chapter 2",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_match_display_copy() {
        assert_eq!(ProgressStage::for_percent(0).label(), "Beginning");
        assert_eq!(ProgressStage::for_percent(25).label(), "Chapter 1");
        assert_eq!(ProgressStage::for_percent(75).label(), "Chapter 2");
        assert_eq!(ProgressStage::for_percent(100).label(), "Complete");
    }

    #[test]
    fn chapter_two_is_lower_closed_at_fifty() {
        assert_eq!(ProgressStage::for_percent(49), ProgressStage::ChapterOne);
        assert_eq!(ProgressStage::for_percent(50), ProgressStage::ChapterTwo);
        assert_eq!(ProgressStage::for_percent(99), ProgressStage::ChapterTwo);
    }

    #[test]
    fn mapping_is_monotone() {
        let mut previous = ProgressStage::for_percent(0);
        for percent in 1..=100 {
            let stage = ProgressStage::for_percent(percent);
            assert!(stage >= previous, "label regressed at {percent}");
            previous = stage;
        }
    }
}
