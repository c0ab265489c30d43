//! Single-threaded queue of named presentation stages.
//!
//! The page swap and its cleanup are deferred work; modeling them as
//! explicit cues with due times (instead of anonymous nested timers)
//! makes the ordering observable and lets the host drive the clock.

use serde::{Deserialize, Serialize};

use crate::pages::PageTarget;
use crate::state::CurrentPage;

/// Delay between requesting a transition and the visible panel swap.
pub const PAGE_SWAP_DELAY_MS: u64 = 300;
/// Lifetime of the transition animation class after the swap.
pub const TRANSITION_CLEAR_MS: u64 = 800;
/// Delay between choosing a protagonist and the follow-up navigation.
pub const CHARACTER_FOLLOWUP_DELAY_MS: u64 = 500;

/// Visual variant applied to the incoming panel, chosen uniformly per
/// transition from the seeded variant stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionVariant {
    SlideLeft,
    SlideRight,
    Zoom,
}

impl TransitionVariant {
    pub const ALL: [Self; 3] = [Self::SlideLeft, Self::SlideRight, Self::Zoom];

    /// CSS class toggled on the incoming panel.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Zoom => "zoom",
        }
    }
}

/// A scheduled presentation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageCue {
    /// Mark the outgoing panel as leaving.
    BeginLeave { from: CurrentPage },
    /// Hide the outgoing panel, show the incoming one with its variant.
    Swap {
        from: CurrentPage,
        to: CurrentPage,
        variant: TransitionVariant,
    },
    /// Remove the transition variant class once the animation settles.
    ClearTransition { on: CurrentPage },
    /// Deferred navigation (protagonist selection leads here).
    FollowUp { target: PageTarget },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    cue: StageCue,
}

/// Pending cues ordered by due time, FIFO among equals.
///
/// Posted cues always run; there is no cancellation path except
/// [`Timeline::clear`], which restart uses when it resets the whole
/// presentation synchronously.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, due_ms: u64, cue: StageCue) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due_ms, seq, cue });
    }

    /// Remove and return every cue due at or before `now_ms`, in order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<StageCue> {
        let mut due: Vec<Scheduled> = Vec::new();
        let mut idx = 0;
        while idx < self.pending.len() {
            if self.pending[idx].due_ms <= now_ms {
                due.push(self.pending.swap_remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|task| (task.due_ms, task.seq));
        due.into_iter().map(|task| task.cue).collect()
    }

    /// Earliest pending due time, if anything is queued.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|task| task.due_ms).min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PanelId;

    fn cue(on: PanelId) -> StageCue {
        StageCue::ClearTransition {
            on: CurrentPage::Panel(on),
        }
    }

    #[test]
    fn drains_in_due_order_with_fifo_ties() {
        let mut timeline = Timeline::new();
        timeline.post(300, cue(PanelId::ForestEntrance));
        timeline.post(0, cue(PanelId::StartScreen));
        timeline.post(300, cue(PanelId::MysticClearing));

        assert_eq!(timeline.drain_due(100), vec![cue(PanelId::StartScreen)]);
        assert_eq!(timeline.next_due(), Some(300));
        assert_eq!(
            timeline.drain_due(1_000),
            vec![cue(PanelId::ForestEntrance), cue(PanelId::MysticClearing)]
        );
        assert!(timeline.is_empty());
    }

    #[test]
    fn undue_cues_stay_queued() {
        let mut timeline = Timeline::new();
        timeline.post(500, cue(PanelId::StartScreen));
        assert!(timeline.drain_due(499).is_empty());
        assert!(!timeline.is_empty());
        timeline.clear();
        assert!(timeline.is_empty());
    }
}
