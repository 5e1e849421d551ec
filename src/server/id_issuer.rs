//! # Identifier Issuer
//!
//! Hands out server identifiers. Whoever builds server units owns one issuer,
//! so there is no process-wide counter.

use crate::server::error::{Result, ServerError};

/// Monotonic identifier source with post-increment semantics.
///
/// Once `u32::MAX` has been handed out the issuer is exhausted and refuses
/// further requests instead of wrapping.
#[derive(Debug, Clone)]
pub struct IdIssuer {
    next: Option<u32>,
}

impl IdIssuer {
    /// Create an issuer whose first identifier is `first_id`.
    pub fn new(first_id: u32) -> Self {
        Self {
            next: Some(first_id),
        }
    }

    /// Return the current identifier and advance the counter.
    ///
    /// # Errors
    /// [`ServerError::IdsExhausted`] once every identifier has been issued.
    pub fn next_id(&mut self) -> Result<u32> {
        let id = self.next.ok_or(ServerError::IdsExhausted { last: u32::MAX })?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// Identifier the next call to [`next_id`](Self::next_id) will return,
    /// `None` when exhausted.
    pub fn peek(&self) -> Option<u32> {
        self.next
    }
}

impl Default for IdIssuer {
    fn default() -> Self {
        Self::new(1)
    }
}
