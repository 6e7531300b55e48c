//! Left (retrospective) and right (prospective) context buffers.

use std::collections::VecDeque;
use std::mem;

/// A token as it sits in a context window: source text plus dictionary key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowToken {
    pub raw: String,
    pub key: String,
}

impl WindowToken {
    pub fn new(raw: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            key: key.into(),
        }
    }
}

/// Sliding buffer of the most recent `capacity` tokens.
#[derive(Clone, Debug)]
pub struct LeftWindow {
    capacity: usize,
    tokens: VecDeque<WindowToken>,
}

impl LeftWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tokens: VecDeque::new(),
        }
    }

    /// The buffered tokens followed by `completing`: the preceding context
    /// plus the whole phrase when `completing` finishes a match.
    pub fn snapshot_with(&self, completing: &WindowToken) -> Vec<WindowToken> {
        let mut snapshot = Vec::with_capacity(self.tokens.len() + 1);
        snapshot.extend(self.tokens.iter().cloned());
        snapshot.push(completing.clone());
        snapshot
    }

    /// Trim from the front, then append.
    pub fn push(&mut self, token: WindowToken) {
        while self.tokens.len() >= self.capacity && self.tokens.pop_front().is_some() {}
        self.tokens.push_back(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Right-context buffers.
///
/// Tokens of a partial match accumulate in the in-progress buffer, which is
/// dropped when the match breaks. A completed match turns it into an open
/// window that keeps taking tokens until it holds `target_len` of them.
/// Windows still open at end of file are discarded by their owner.
#[derive(Clone, Debug)]
pub struct RightWindows {
    target_len: usize,
    in_progress: Vec<WindowToken>,
    open: VecDeque<Vec<WindowToken>>,
}

impl RightWindows {
    pub fn new(target_len: usize) -> Self {
        Self {
            target_len,
            in_progress: Vec::new(),
            open: VecDeque::new(),
        }
    }

    /// Append `token` to every open window and return the ones now full,
    /// oldest first.
    pub fn extend(&mut self, token: &WindowToken) -> Vec<Vec<WindowToken>> {
        for window in self.open.iter_mut() {
            window.push(token.clone());
        }
        // Older windows are never shorter, so full ones sit at the front.
        let mut full = Vec::new();
        while self
            .open
            .front()
            .is_some_and(|w| w.len() >= self.target_len)
        {
            if let Some(window) = self.open.pop_front() {
                full.push(window);
            }
        }
        full
    }

    pub fn advance(&mut self, token: WindowToken) {
        self.in_progress.push(token);
    }

    /// Close the in-progress match with `token`. Returns the window right
    /// away when it is already full (zero-width context).
    pub fn complete(&mut self, token: WindowToken) -> Option<Vec<WindowToken>> {
        self.in_progress.push(token);
        let window = mem::take(&mut self.in_progress);
        if window.len() >= self.target_len {
            Some(window)
        } else {
            self.open.push_back(window);
            None
        }
    }

    pub fn abandon(&mut self) {
        self.in_progress.clear();
    }

    pub fn in_progress(&self) -> &[WindowToken] {
        &self.in_progress
    }

    /// Completed matches still waiting for trailing tokens.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
