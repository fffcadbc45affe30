//! The hydration opcode emitter.
//!
//! The template visitor calls one entry point per node in document order.
//! The emitter keeps track of the position in the DOM that cloning will
//! produce, assigns morph and element ids, and appends opcodes to a single
//! output stream.

use crate::compile::expr::attributes_hash;
use crate::compile::index::IndexTracker;
use crate::compile::morph::MorphBuffer;
use crate::types::ast;
use crate::types::options::Options;
use crate::types::program::{Opcode, Program};
use crate::{Error, Result};

pub struct Emitter<'a> {
    options: &'a Options,
    opcodes: Vec<Opcode>,
    children: Vec<Program>,
    index: IndexTracker,
    morphs: MorphBuffer,
    /// The most recently assigned element reference.
    element_num: Option<u32>,
    /// Whether the element being opened still needs an `element` opcode
    /// before it can be referenced.
    uncached_element: bool,
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            opcodes: Vec::new(),
            children: Vec::new(),
            index: IndexTracker::new(),
            morphs: MorphBuffer::new(),
            element_num: None,
            uncached_element: false,
        }
    }

    pub fn start_program(&mut self, program: &ast::Program, blank_text_nodes: &[u32]) {
        self.opcodes.clear();
        self.children.clear();
        self.index = IndexTracker::new();
        self.morphs = MorphBuffer::new();
        self.element_num = None;
        self.uncached_element = false;

        for (i, name) in program.block_params.iter().enumerate() {
            self.push(Opcode::BlockParam {
                name: name.clone(),
                index: i as u32,
            });
        }

        if self.options.repair_blank_text && !blank_text_nodes.is_empty() {
            self.push(Opcode::RepairClonedNode {
                blank_text_nodes: blank_text_nodes.to_vec(),
                checked: false,
            });
        }
    }

    pub fn end_program(mut self) -> Program {
        self.morphs.distribute(&mut self.opcodes);
        debug_assert!(self.morphs.is_empty());
        let program = Program {
            opcodes: self.opcodes,
            children: self.children,
        };
        tracing::debug!(
            opcodes = program.opcodes.len(),
            morphs = program.morphs().count(),
            children = program.children.len(),
            "compiled program"
        );
        program
    }

    pub fn text(&mut self) {
        self.index.advance();
    }

    pub fn comment(&mut self) {
        self.index.advance();
    }

    pub fn open_element(
        &mut self,
        element: &ast::Element,
        is_single_root: bool,
        dynamic_uses: u32,
        blank_text_nodes: &[u32],
    ) -> Result<()> {
        self.morphs.distribute(&mut self.opcodes);
        let index = self.index.advance();
        self.uncached_element = true;

        if !is_single_root {
            self.push(Opcode::ConsumeParent(index));

            // The reference is needed more than once so cache it now.
            if dynamic_uses > self.options.cache_threshold {
                self.cache_element();
            }
        }

        let checked = self.options.repair_checked && element.is_checked();
        let repair_blanks = self.options.repair_blank_text && !blank_text_nodes.is_empty();
        if checked || repair_blanks {
            let blank_text_nodes = if repair_blanks {
                blank_text_nodes.to_vec()
            } else {
                Vec::new()
            };
            self.push(Opcode::RepairClonedNode {
                blank_text_nodes,
                checked,
            });
        }

        self.index.enter(index);

        for attr in &element.attributes {
            self.attribute(attr)?;
        }
        for helper in &element.helpers {
            self.node_helper(helper)?;
        }
        Ok(())
    }

    pub fn close_element(&mut self, is_single_root: bool) {
        self.morphs.distribute(&mut self.opcodes);
        if !is_single_root {
            self.push(Opcode::PopParent);
        }
        self.index.leave();
    }

    fn attribute(&mut self, attr: &ast::Attr) -> Result<()> {
        if attr.is_static() {
            return Ok(());
        }
        self.push(Opcode::Program {
            body: None,
            inverse: None,
        });
        self.call_parts(&attr.value)?;
        let element = self.cache_element();
        self.push(Opcode::Attribute {
            quoted: attr.quoted,
            name: attr.name.clone(),
            parts: attr.value.len() as u32,
            element,
        });
        Ok(())
    }

    fn node_helper(&mut self, call: &ast::Call) -> Result<()> {
        self.push(Opcode::Program {
            body: None,
            inverse: None,
        });
        self.call(call)?;
        let element = self.cache_element();
        self.push(Opcode::NodeHelper {
            params: call.params.len() as u32,
            element,
        });
        Ok(())
    }

    pub fn mustache(
        &mut self,
        mustache: &ast::Mustache,
        child_index: usize,
        children_len: usize,
    ) -> Result<()> {
        let (start, end) = self.bounds(child_index, children_len);
        let morph = self
            .morphs
            .record(self.index.path(), start, end, mustache.escaped);

        let call = &mustache.call;
        if call.is_helper() {
            self.push(Opcode::Program {
                body: None,
                inverse: None,
            });
            self.call(call)?;
            self.push(Opcode::Helper {
                params: call.params.len() as u32,
                morph,
                block_params: None,
            });
        } else {
            self.name(Some(&call.path))?;
            self.push(Opcode::Ambiguous { morph });
        }
        Ok(())
    }

    pub fn block(
        &mut self,
        block: &ast::Block,
        child_index: usize,
        children_len: usize,
        body: Program,
        inverse: Option<Program>,
    ) -> Result<()> {
        let (start, end) = self.bounds(child_index, children_len);
        let morph = self.morphs.record(self.index.path(), start, end, true);

        let body = self.add_child(body);
        let inverse = inverse.map(|p| self.add_child(p));
        self.push(Opcode::Program {
            body: Some(body),
            inverse,
        });
        self.call(&block.call)?;
        self.push(Opcode::Helper {
            params: block.call.params.len() as u32,
            morph,
            block_params: Some(block.program.block_params.len() as u32),
        });
        Ok(())
    }

    pub fn component(
        &mut self,
        component: &ast::Component,
        child_index: usize,
        children_len: usize,
        body: Program,
    ) -> Result<()> {
        if component.tag.is_empty() {
            return Err(Error::node(
                "ComponentNode",
                "expected a tag name",
                component.span,
            ));
        }

        let (start, end) = self.bounds(child_index, children_len);
        let morph = self.morphs.record(self.index.path(), start, end, false);

        let body = self.add_child(body);
        self.push(Opcode::Program {
            body: Some(body),
            inverse: None,
        });
        self.push(Opcode::String(component.tag.clone()));
        self.hash(Some(&attributes_hash(&component.attributes)))?;
        self.push(Opcode::Component {
            morph,
            block_params: component.program.block_params.len() as u32,
        });
        Ok(())
    }

    /// Advance past a dynamic node and compute its morph bounds.
    ///
    /// The morph starts at the node's own slot and ends before the next
    /// sibling. Either bound is open (`None`) when the node is the first or
    /// last child respectively.
    fn bounds(&mut self, child_index: usize, children_len: usize) -> (Option<u32>, Option<u32>) {
        let slot = self.index.advance();
        let start = if slot == 0 { None } else { Some(slot) };
        let end = if child_index + 1 == children_len {
            None
        } else {
            Some(slot + 1)
        };
        (start, end)
    }

    /// Returns a reference to the current element, emitting an `element`
    /// opcode the first time one is needed.
    fn cache_element(&mut self) -> u32 {
        match self.element_num {
            Some(n) if !self.uncached_element => n,
            _ => {
                let n = self.element_num.map_or(0, |n| n + 1);
                self.element_num = Some(n);
                self.uncached_element = false;
                self.push(Opcode::Element(n));
                n
            }
        }
    }

    fn add_child(&mut self, program: Program) -> u32 {
        let id = self.children.len() as u32;
        self.children.push(program);
        id
    }

    pub(super) fn push(&mut self, opcode: Opcode) {
        self.opcodes.push(opcode);
        self.morphs.observe(&self.opcodes);
    }
}
