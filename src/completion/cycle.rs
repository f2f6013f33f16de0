//! Keyboard-driven cycling through a candidate list.
//!
//! The cycle remembers the text it replaced (the raw stub) so stepping past
//! either end of the list puts the user's own typing back:
//!
//! ```text
//!   none ─▶ 0 ─▶ 1 ─▶ … ─▶ n-1 ─▶ none      (forward)
//!   none ─▶ n-1 ─▶ … ─▶ 0 ─▶ none           (backward)
//! ```

use super::apply::{replaced_text, splice};
use super::{Candidate, clamp_cursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// What a step landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep<'a> {
    Candidate(&'a Candidate),
    /// Back to the raw typed text.
    Stub(&'a str),
}

#[derive(Debug, Clone)]
pub struct CompletionCycle {
    candidates: Vec<Candidate>,
    index: Option<usize>,
    stub: String,
    start: usize,
    end: usize,
}

impl CompletionCycle {
    /// Start a cycle over `candidates` for the token being typed at `cursor`.
    pub fn new(text: &str, cursor: usize, candidates: Vec<Candidate>) -> Self {
        let cursor = clamp_cursor(text, cursor);
        let stub = replaced_text(text, cursor).to_string();
        CompletionCycle { candidates, index: None, start: cursor - stub.len(), end: cursor, stub }
    }

    /// Pure index arithmetic; `None` is the stub position.
    pub fn next_index(current: Option<usize>, len: usize, direction: CycleDirection) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match (direction, current) {
            (CycleDirection::Forward, None) => Some(0),
            (CycleDirection::Forward, Some(i)) if i + 1 >= len => None,
            (CycleDirection::Forward, Some(i)) => Some(i + 1),
            (CycleDirection::Backward, None) => Some(len - 1),
            (CycleDirection::Backward, Some(0)) => None,
            (CycleDirection::Backward, Some(i)) => Some(i - 1),
        }
    }

    /// Lists that are empty or lead with an info row do not cycle.
    pub fn is_inert(&self) -> bool {
        self.candidates.first().is_none_or(|c| !c.selectable)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.index.map(|i| &self.candidates[i])
    }

    pub fn stub(&self) -> &str {
        &self.stub
    }

    pub fn step(&mut self, direction: CycleDirection) -> Option<CycleStep<'_>> {
        if self.is_inert() {
            return None;
        }
        self.index = Self::next_index(self.index, self.candidates.len(), direction);
        Some(match self.index {
            Some(i) => CycleStep::Candidate(&self.candidates[i]),
            None => CycleStep::Stub(&self.stub),
        })
    }

    /// Step and splice the result into `text`, which must be the text left by
    /// the previous `apply` (or the text the cycle was created from).
    ///
    /// Returns `None` when the cycle is inert or `text` no longer lines up.
    pub fn apply(&mut self, text: &str, direction: CycleDirection) -> Option<(String, usize)> {
        let head = text.get(..self.start)?;
        let tail = text.get(self.end..)?;

        let id = match self.step(direction)? {
            CycleStep::Candidate(candidate) => Some(candidate.replacement_id.clone()),
            CycleStep::Stub(_) => None,
        };

        let restored = format!("{head}{}{tail}", self.stub);
        let stub_end = self.start + self.stub.len();
        let (out, cursor) = match id {
            Some(id) => splice(&restored, stub_end, &id, false),
            None => (restored, stub_end),
        };
        log::trace!("[cycle] index {:?} -> cursor {}", self.index, cursor);
        self.end = cursor;
        Some((out, cursor))
    }
}
