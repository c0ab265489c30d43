//! Keyboard surface: quick-select digits, hotkeys, and the secret
//! ten-code sequence.

use smallvec::SmallVec;

/// Action resolved from a key press against the currently visible
/// choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    /// Activate the nth visible choice button (zero-based, document order).
    Choice(usize),
    Restart,
    ToggleAudio,
}

/// Map a DOM `key` value to an action.
///
/// Digits address the visible choice buttons positionally; a digit past
/// the end of the list resolves to nothing rather than an error. Only
/// choice buttons count; character cards have their own click surface.
#[must_use]
pub fn quick_action(key: &str, visible_choices: usize) -> Option<QuickAction> {
    match key {
        "r" | "R" => Some(QuickAction::Restart),
        "m" | "M" => Some(QuickAction::ToggleAudio),
        _ => {
            let digit = key.parse::<usize>().ok().filter(|d| (1..=9).contains(d))?;
            let idx = digit - 1;
            (idx < visible_choices).then_some(QuickAction::Choice(idx))
        }
    }
}

/// The ten DOM `code` values that unlock the easter egg, in order.
pub const SECRET_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Sliding window over the most recent key codes.
///
/// Keeps exactly the last [`SECRET_SEQUENCE`] worth of entries; `feed`
/// reports a match whenever the full window equals the sequence. One-shot
/// gating lives with the caller; the tracker itself keeps matching.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    window: SmallVec<[String; 10]>,
}

impl SequenceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, code: &str) -> bool {
        if self.window.len() == SECRET_SEQUENCE.len() {
            self.window.remove(0);
        }
        self.window.push(code.to_string());
        self.window.len() == SECRET_SEQUENCE.len()
            && self
                .window
                .iter()
                .zip(SECRET_SEQUENCE.iter())
                .all(|(entered, expected)| entered == expected)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
