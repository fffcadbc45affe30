//! Tracks where the compiler is in the DOM tree that cloning will produce.

/// A depth-first sibling counter with a stack of saved positions.
///
/// Before any node at the current level is visited the index is unset. Each
/// visited sibling advances it by one, so after advancing it is exactly the
/// position the node will occupy among its siblings in the cloned fragment.
#[derive(Debug, Default)]
pub struct IndexTracker {
    current: Option<u32>,
    path: Vec<u32>,
}

impl IndexTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of the most recently visited sibling at this level.
    #[cfg(test)]
    pub fn current(&self) -> Option<u32> {
        self.current
    }

    /// Move on to the next sibling and return its index.
    pub fn advance(&mut self) -> u32 {
        let i = self.current.map_or(0, |i| i + 1);
        self.current = Some(i);
        i
    }

    /// Descend into the children of the node at `index`.
    pub fn enter(&mut self, index: u32) {
        self.path.push(index);
        self.current = None;
    }

    /// Return to the parent level, restoring its index.
    pub fn leave(&mut self) {
        debug_assert!(!self.path.is_empty(), "left more levels than entered");
        self.current = self.path.pop();
    }

    /// The indices from the program root down to the current level.
    pub fn path(&self) -> &[u32] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_tracker_advance() {
        let mut t = IndexTracker::new();
        assert_eq!(t.current(), None);
        assert_eq!(t.advance(), 0);
        assert_eq!(t.advance(), 1);
        assert_eq!(t.current(), Some(1));
    }

    #[test]
    fn index_tracker_enter_and_leave() {
        let mut t = IndexTracker::new();
        t.advance();
        let i = t.advance();
        t.enter(i);
        assert_eq!(t.current(), None);
        assert_eq!(t.path(), &[1]);

        let j = t.advance();
        t.enter(j);
        t.advance();
        t.advance();
        assert_eq!(t.path(), &[1, 0]);

        t.leave();
        assert_eq!(t.current(), Some(0));
        t.leave();
        assert_eq!(t.current(), Some(1));
        assert!(t.path().is_empty());
        assert_eq!(t.advance(), 2);
    }
}
