#![forbid(unsafe_code)]

//! Deferred caret correction.
//!
//! Auto-formatting inserts and removes separators, so the caret position
//! computed while handling a keystroke is wrong for the rewritten text. The
//! edit records how many digits sit before the caret instead, tagged with a
//! generation number. The correction is resolved against whatever the text
//! is at resolve time: on the next render, or before the next edit,
//! whichever comes first. A newer edit replaces an older pending
//! correction, so a stale position is never applied.

use datefield_calendar::codec::offset_after_digits;

/// A caret target waiting for the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCaret {
    /// Edit that produced this correction.
    pub generation: u64,
    /// Number of digits that must precede the caret.
    pub digits_before: usize,
}

/// Tracks at most one pending caret correction.
#[derive(Debug, Clone, Default)]
pub struct CaretCorrector {
    generation: u64,
    pending: Option<PendingCaret>,
}

impl CaretCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a correction for a new edit, superseding any pending one.
    ///
    /// Returns the generation of the new correction.
    pub fn schedule(&mut self, digits_before: usize) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingCaret {
            generation: self.generation,
            digits_before,
        });
        self.generation
    }

    /// Drop any pending correction.
    ///
    /// Used when the text is replaced wholesale and the caret is placed
    /// directly.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Generation of the most recent edit.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn pending(&self) -> Option<PendingCaret> {
        self.pending
    }

    /// Resolve the pending correction against `text` and clear it.
    ///
    /// Returns the caret position in characters.
    pub fn take_resolved(&mut self, text: &str) -> Option<usize> {
        self.pending
            .take()
            .map(|p| offset_after_digits(text, p.digits_before))
    }

    /// Resolve only if `generation` is still the latest edit.
    ///
    /// A callback captured for an older edit gets `None` and leaves the
    /// newer correction pending.
    pub fn resolve_if_current(&mut self, generation: u64, text: &str) -> Option<usize> {
        match self.pending {
            Some(p) if p.generation == generation => self.take_resolved(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_against_latest_text() {
        let mut caret = CaretCorrector::new();
        caret.schedule(3);
        // Three digits before the caret in "01.0" means after the '0' at index 3.
        assert_eq!(caret.take_resolved("01.0"), Some(4));
        assert_eq!(caret.take_resolved("01.0"), None);
    }

    #[test]
    fn newer_edit_supersedes_older() {
        let mut caret = CaretCorrector::new();
        let first = caret.schedule(2);
        let second = caret.schedule(5);
        assert_ne!(first, second);
        assert_eq!(caret.resolve_if_current(first, "01.01.2"), None);
        assert_eq!(caret.pending().map(|p| p.digits_before), Some(5));
        assert_eq!(caret.resolve_if_current(second, "01.01.2"), Some(7));
        assert_eq!(caret.pending(), None);
    }

    #[test]
    fn cancel_invalidates_outstanding_generation() {
        let mut caret = CaretCorrector::new();
        let generation = caret.schedule(4);
        caret.cancel();
        assert_eq!(caret.resolve_if_current(generation, "01.01"), None);
        assert!(caret.generation() > generation);
    }

    #[test]
    fn zero_digits_puts_caret_at_start() {
        let mut caret = CaretCorrector::new();
        caret.schedule(0);
        assert_eq!(caret.take_resolved("12.3"), Some(0));
    }
}
