//! Keyboard navigation through search results

/// Keys handled by the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Open the focused result
    Enter,
    /// Focus the previous result
    ArrowUp,
    /// Focus the next result
    ArrowDown,
    /// Tab, Shift+Tab when `shift` is set
    Tab { shift: bool },
    /// Any other key
    Other,
}

/// Result of handling a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus moved to the given result
    Moved(usize),
    /// The given result was chosen
    Activated(usize),
    /// The key is not handled here
    Ignored,
}

/// Focus position in a result list; moving past either end wraps around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCursor {
    len: usize,
    active: usize,
}

impl ResultCursor {
    /// Cursor over `len` results, focused on the first
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    /// Focused result, if there are results
    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    /// Handle a key press
    pub fn handle(&mut self, key: NavKey) -> NavOutcome {
        if self.len == 0 {
            return NavOutcome::Ignored;
        }

        let key = match key {
            NavKey::Tab { shift: true } => NavKey::ArrowUp,
            NavKey::Tab { shift: false } => NavKey::ArrowDown,
            other => other,
        };

        match key {
            NavKey::Enter => NavOutcome::Activated(self.active),
            NavKey::ArrowUp => {
                self.active = (self.active + self.len - 1) % self.len;
                NavOutcome::Moved(self.active)
            }
            NavKey::ArrowDown => {
                self.active = (self.active + 1) % self.len;
                NavOutcome::Moved(self.active)
            }
            _ => NavOutcome::Ignored,
        }
    }
}
