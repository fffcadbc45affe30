//! Compile a template tree into a hydration program.
//!
//! This process has three parts:
//! - The visitor walks the tree in document order.
//! - The emitter tracks the DOM position of each node and appends opcodes,
//!   deferring morph creation until the node's parent is established.
//! - The expression serializer turns calls, paths and literals into opcodes
//!   for a stack based runtime.

mod emit;
mod expr;
mod index;
mod morph;
mod visit;

use crate::types::ast;
use crate::types::program::Program;
use crate::{Compiler, Result};

/// Compile a template into a program.
pub fn template(compiler: &Compiler, template: &ast::Template) -> Result<Program> {
    visit::program(&compiler.options, &template.program)
        .map_err(|err| err.with_source(template.source.as_deref()))
}
