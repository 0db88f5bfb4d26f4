#![forbid(unsafe_code)]

//! Editing operations on the display text.
//!
//! Every edit is applied to the raw text and then run back through
//! [`auto_format_keystroke`], so separators are never typed or deleted on
//! their own. The caret is tracked as a character offset; an edit reports
//! how many digits precede the caret, and the caret corrector turns that
//! back into an offset once the formatted text is known.

use datefield_calendar::codec::{MAX_DIGITS, SEPARATOR, auto_format_keystroke, digits_before};

/// Result of an edit: the formatted text and the caret anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub text: String,
    pub digits_before: usize,
}

fn split_at_char(text: &str, caret: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(caret)
        .map_or(text.len(), |(i, _)| i);
    text.split_at(byte)
}

fn finish(raw: &str, digits: usize) -> TextEdit {
    let text = auto_format_keystroke(raw);
    let available = text.chars().filter(char::is_ascii_digit).count();
    TextEdit {
        text,
        digits_before: digits.min(available).min(MAX_DIGITS),
    }
}

/// Insert `typed` at `caret`.
///
/// Returns `None` when `typed` has no digits, which leaves the text alone.
#[must_use]
pub fn insert(text: &str, caret: usize, typed: &str) -> Option<TextEdit> {
    let typed_digits = typed.chars().filter(char::is_ascii_digit).count();
    if typed_digits == 0 {
        return None;
    }
    let (head, tail) = split_at_char(text, caret);
    let raw = format!("{head}{typed}{tail}");
    Some(finish(&raw, digits_before(head, usize::MAX) + typed_digits))
}

/// Delete the character before `caret`.
///
/// Deleting a separator also deletes the digit before it.
#[must_use]
pub fn backspace(text: &str, caret: usize) -> Option<TextEdit> {
    let (head, tail) = split_at_char(text, caret);
    let mut head: Vec<char> = head.chars().collect();
    let removed = head.pop()?;
    if removed == SEPARATOR {
        head.pop();
    }
    let head: String = head.into_iter().collect();
    let digits = digits_before(&head, usize::MAX);
    Some(finish(&format!("{head}{tail}"), digits))
}

/// Delete the character at `caret`.
///
/// Deleting a separator also deletes the digit after it.
#[must_use]
pub fn delete(text: &str, caret: usize) -> Option<TextEdit> {
    let (head, tail) = split_at_char(text, caret);
    let mut rest = tail.chars();
    let removed = rest.next()?;
    if removed == SEPARATOR {
        rest.next();
    }
    let digits = digits_before(head, usize::MAX);
    Some(finish(&format!("{head}{}", rest.as_str()), digits))
}

/// Caret after moving one character left.
#[inline]
#[must_use]
pub fn move_left(caret: usize) -> usize {
    caret.saturating_sub(1)
}

/// Caret after moving one character right, stopping at the end of `text`.
#[inline]
#[must_use]
pub fn move_right(text: &str, caret: usize) -> usize {
    (caret + 1).min(text.chars().count())
}

/// Clamp a caret to the text.
#[inline]
#[must_use]
pub fn clamp_caret(text: &str, caret: usize) -> usize {
    caret.min(text.chars().count())
}
