//! Defers morph creation until the parent they hang off has been established.

use crate::types::program::{Morph, Opcode};

/// Buffers morph descriptors and splices them into the opcode stream.
///
/// A morph must come after the opcode that makes its parent current, but the
/// opcodes for its content are emitted as soon as the node is visited. So
/// morphs are collected here and distributed at the next safe point, right
/// after the most recent parent anchor (`element`, `consumeParent` or
/// `popParent`). When there is no anchor they go to the start of the stream.
#[derive(Debug, Default)]
pub struct MorphBuffer {
    pending: Vec<Morph>,
    next_id: u32,
    /// Position just after the most recent anchor opcode.
    anchor: usize,
}

impl MorphBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a morph and return its id.
    pub fn record(
        &mut self,
        path: &[u32],
        start: Option<u32>,
        end: Option<u32>,
        escaped: bool,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Morph {
            id,
            path: path.to_vec(),
            start,
            end,
            escaped,
        });
        id
    }

    /// Must be called after every opcode appended to `opcodes`.
    pub fn observe(&mut self, opcodes: &[Opcode]) {
        if opcodes.last().map_or(false, Opcode::is_parent_anchor) {
            self.anchor = opcodes.len();
        }
    }

    /// Splice all pending morphs into the stream after the current anchor.
    ///
    /// With no anchor yet they go to the start, since a morph must precede
    /// every opcode that uses it.
    pub fn distribute(&mut self, opcodes: &mut Vec<Opcode>) {
        if self.pending.is_empty() {
            return;
        }
        let at = self.anchor;
        tracing::trace!(count = self.pending.len(), at, "distributing morphs");
        opcodes.splice(at..at, self.pending.drain(..).map(Opcode::Morph));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
