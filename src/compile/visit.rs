//! Walks the template tree and drives the emitter.

use crate::compile::emit::Emitter;
use crate::types::ast;
use crate::types::options::Options;
use crate::types::program::Program;
use crate::Result;

/// Compile a program and, depth first, every program nested inside it.
pub fn program(options: &Options, program: &ast::Program) -> Result<Program> {
    let mut emitter = Emitter::new(options);
    emitter.start_program(program, &blank_text_nodes(&program.body));
    let is_single_root = program.body.len() == 1;
    children(options, &mut emitter, &program.body, is_single_root)?;
    Ok(emitter.end_program())
}

fn children(
    options: &Options,
    emitter: &mut Emitter<'_>,
    nodes: &[ast::Statement],
    is_single_root: bool,
) -> Result<()> {
    let len = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        match node {
            ast::Statement::Text(_) => emitter.text(),

            ast::Statement::Comment(_) => emitter.comment(),

            ast::Statement::Element(element) => {
                emitter.open_element(
                    element,
                    is_single_root,
                    dynamic_uses(element),
                    &blank_text_nodes(&element.children),
                )?;
                children(options, emitter, &element.children, false)?;
                emitter.close_element(is_single_root);
            }

            ast::Statement::Mustache(mustache) => {
                emitter.mustache(mustache, i, len)?;
            }

            ast::Statement::Block(block) => {
                let body = program(options, &block.program)?;
                let inverse = match &block.inverse {
                    Some(inverse) => Some(program(options, inverse)?),
                    None => None,
                };
                emitter.block(block, i, len, body, inverse)?;
            }

            ast::Statement::Component(component) => {
                let body = program(options, &component.program)?;
                emitter.component(component, i, len, body)?;
            }
        }
    }
    Ok(())
}

/// The number of times the element's reference is used at hydration time:
/// once per dynamic attribute, node helper, and dynamic child.
fn dynamic_uses(element: &ast::Element) -> u32 {
    let attrs = element.attributes.iter().filter(|a| !a.is_static()).count();
    let helpers = element.helpers.len();
    let children = element.children.iter().filter(|c| c.is_dynamic()).count();
    (attrs + helpers + children) as u32
}

/// Positions of the children that are empty text nodes.
fn blank_text_nodes(nodes: &[ast::Statement]) -> Vec<u32> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| match node {
            ast::Statement::Text(text) if text.chars.is_empty() => Some(i as u32),
            _ => None,
        })
        .collect()
}
