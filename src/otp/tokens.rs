//! Token sequence - one character (or nothing) per entry cell.
//!
//! The aggregate value is a derived over the token signal, so it is never
//! stored on its own and can never drift from the cells.

use std::rc::Rc;
use spark_signals::{derived, signal, Signal};

use crate::error::{OtpError, Result};

/// Take at most one character from `text`.
pub(crate) fn first_char(text: &str) -> String {
    text.chars().next().map(String::from).unwrap_or_default()
}

/// Ordered tokens for `length` cells.
///
/// Invariants: exactly `length` tokens, each at most one character long.
#[derive(Clone)]
pub struct TokenSequence {
    length: usize,
    tokens: Signal<Vec<String>>,
    value: Rc<dyn Fn() -> String>,
}

impl TokenSequence {
    /// Create `length` empty tokens.
    pub fn new(length: usize) -> Self {
        let tokens = signal(vec![String::new(); length]);

        let tokens_for_value = tokens.clone();
        let aggregate = derived(move || tokens_for_value.get().concat());

        Self {
            length,
            tokens,
            value: Rc::new(move || aggregate.get()),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Snapshot of all tokens in cell order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.get()
    }

    /// Token at `index` (empty string for an unfilled cell).
    pub fn token(&self, index: usize) -> Option<String> {
        self.tokens.get().get(index).cloned()
    }

    /// Whether the cell at `index` holds a character.
    pub fn is_filled(&self, index: usize) -> bool {
        self.token(index).is_some_and(|t| !t.is_empty())
    }

    /// Whether every cell holds a character.
    pub fn is_complete(&self) -> bool {
        self.tokens.get().iter().all(|t| !t.is_empty())
    }

    /// The aggregate value: all tokens concatenated in cell order.
    pub fn value(&self) -> String {
        (self.value)()
    }

    /// The underlying signal, for reactive bindings.
    pub fn signal(&self) -> Signal<Vec<String>> {
        self.tokens.clone()
    }

    /// Replace the token at `index`.
    ///
    /// Content is not validated here; only the first character of `text`
    /// is kept. Returns whether the token changed.
    pub fn set_token(&self, index: usize, text: &str) -> Result<bool> {
        if index >= self.length {
            return Err(OtpError::out_of_range(index, self.length));
        }

        let token = first_char(text);
        let mut tokens = self.tokens.get();
        if tokens[index] == token {
            return Ok(false);
        }
        tokens[index] = token;
        self.tokens.set(tokens);
        Ok(true)
    }

    /// Overwrite cells positionally from cell 0.
    ///
    /// Characters past the last cell are ignored; cells past the end of
    /// `chars` keep their tokens. Returns how many cells were written.
    pub fn overwrite_from_start(&self, chars: &[char]) -> usize {
        let mut tokens = self.tokens.get();
        let written = chars.len().min(self.length);
        for (slot, ch) in tokens.iter_mut().zip(chars.iter()) {
            *slot = ch.to_string();
        }
        self.tokens.set(tokens);
        written
    }

    /// Populate all cells from an external aggregate value.
    ///
    /// Extra characters are dropped and missing ones become empty tokens.
    /// Returns whether any token changed.
    pub fn load_value(&self, value: &str) -> bool {
        let mut chars = value.chars();
        let tokens: Vec<String> = (0..self.length)
            .map(|_| chars.next().map(String::from).unwrap_or_default())
            .collect();

        if tokens == self.tokens.get() {
            return false;
        }
        self.tokens.set(tokens);
        true
    }
}

impl std::fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSequence")
            .field("length", &self.length)
            .field("tokens", &self.tokens.get())
            .finish()
    }
}
