//! Positional, in-memory prompt storage.
//!
//! Prompts are addressed only by their position in the sequence. Removing a
//! prompt shifts every later prompt down by one, so an index held across a
//! removal of an earlier prompt will address a different prompt afterwards.

use tracing::debug;

use super::PromptError;

/// An ordered, dense sequence of prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    prompts: Vec<String>,
}

impl PromptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Whether the store holds no prompts.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Resolve a caller-supplied index to a position in the sequence.
    pub fn position(&self, index: i64) -> Result<usize, PromptError> {
        usize::try_from(index)
            .ok()
            .filter(|&pos| pos < self.prompts.len())
            .ok_or_else(|| PromptError::out_of_range(index, self.prompts.len()))
    }

    /// Get the prompt stored at `index`.
    pub fn get(&self, index: i64) -> Result<&str, PromptError> {
        let pos = self.position(index)?;
        Ok(self.prompts[pos].as_str())
    }

    /// Append a prompt and return its index.
    pub fn append(&mut self, text: &str) -> Result<usize, PromptError> {
        validate_text(text)?;
        self.prompts.push(text.to_string());
        let index = self.prompts.len() - 1;
        debug!("Stored prompt at index {}", index);
        Ok(index)
    }

    /// Overwrite the prompt at `index` in place.
    ///
    /// The index is checked before the text, so an out-of-range call with an
    /// empty text reports the index.
    pub fn replace(&mut self, index: i64, text: &str) -> Result<usize, PromptError> {
        let pos = self.position(index)?;
        validate_text(text)?;
        self.prompts[pos] = text.to_string();
        debug!("Replaced prompt at index {}", pos);
        Ok(pos)
    }

    /// Remove the prompt at `index`, shifting later prompts down by one.
    pub fn remove(&mut self, index: i64) -> Result<String, PromptError> {
        let pos = self.position(index)?;
        let removed = self.prompts.remove(pos);
        debug!("Removed prompt at index {} ({} left)", pos, self.prompts.len());
        Ok(removed)
    }
}

fn validate_text(text: &str) -> Result<(), PromptError> {
    if text.is_empty() {
        return Err(PromptError::InvalidInput);
    }
    Ok(())
}
