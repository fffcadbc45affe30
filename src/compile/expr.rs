//! Serializes expressions into opcodes for a stack based runtime.
//!
//! A call is emitted as its callee name, then each positional param, then
//! the hash. Hash pairs are emitted value first and key second, followed by
//! the number of pairs, so the runtime can pop them off in reverse.

use crate::compile::emit::Emitter;
use crate::types::ast;
use crate::types::program::{Literal, Opcode, StackLiteral};
use crate::types::span::Span;
use crate::{Error, Result};

impl Emitter<'_> {
    pub(super) fn call(&mut self, call: &ast::Call) -> Result<()> {
        self.name(Some(&call.path))?;
        for param in &call.params {
            self.expr(param)?;
        }
        self.hash(call.hash.as_ref())
    }

    /// An attribute value is emitted as a call with no callee whose params
    /// are the value parts.
    pub(super) fn call_parts(&mut self, parts: &[ast::AttrPart]) -> Result<()> {
        self.name(None)?;
        for part in parts {
            match part {
                ast::AttrPart::Text(text) => {
                    self.push(Opcode::StringLiteral(text.chars.clone()));
                }
                ast::AttrPart::Path(path) => self.path(path)?,
                ast::AttrPart::SubExpr(call) => self.sexpr(call)?,
            }
        }
        self.hash(None)
    }

    pub(super) fn name(&mut self, path: Option<&ast::PathExpr>) -> Result<()> {
        let name = match path {
            Some(path) => {
                check_path(path)?;
                path.original()
            }
            None => String::new(),
        };
        self.push(Opcode::String(name));
        Ok(())
    }

    pub(super) fn hash(&mut self, hash: Option<&ast::Hash>) -> Result<()> {
        let hash = match hash {
            Some(hash) => hash,
            None => {
                self.push(Opcode::StackLiteral(StackLiteral::Count(0)));
                return Ok(());
            }
        };

        for pair in &hash.pairs {
            if pair.key.is_empty() {
                return Err(Error::node("HashPair", "expected a key", pair.span));
            }
            self.expr(&pair.value)?;
            self.push(Opcode::StackLiteral(StackLiteral::Key(pair.key.clone())));
        }
        self.push(Opcode::StackLiteral(StackLiteral::Count(
            hash.pairs.len() as u32
        )));
        Ok(())
    }

    fn expr(&mut self, expr: &ast::Expr) -> Result<()> {
        match expr {
            ast::Expr::Path(path) => self.path(path)?,
            ast::Expr::SubExpr(call) => self.sexpr(call)?,
            ast::Expr::String(lit) => self.push(Opcode::StringLiteral(lit.value.clone())),
            ast::Expr::Number(lit) => self.push(Opcode::Literal(Literal::Number(lit.value))),
            ast::Expr::Boolean(lit) => self.push(Opcode::Literal(Literal::Boolean(lit.value))),
        }
        Ok(())
    }

    fn path(&mut self, path: &ast::PathExpr) -> Result<()> {
        check_path(path)?;
        self.push(Opcode::Id(path.parts.clone()));
        Ok(())
    }

    fn sexpr(&mut self, call: &ast::Call) -> Result<()> {
        self.push(Opcode::String("sexpr".into()));
        self.push(Opcode::Program {
            body: None,
            inverse: None,
        });
        self.call(call)?;
        self.push(Opcode::Sexpr(call.params.len() as u32));
        Ok(())
    }
}

/// A path may have no segments (`this`) but none of them may be empty.
fn check_path(path: &ast::PathExpr) -> Result<()> {
    if path.parts.iter().any(String::is_empty) {
        return Err(Error::node(
            "PathExpression",
            format_args!("empty segment in `{}`", path.original()),
            path.span,
        ));
    }
    Ok(())
}

/// Builds the hash a component is invoked with from its attributes.
///
/// A value with a single part is passed as is, static text becoming a string
/// literal. A value with several parts is joined at runtime using the
/// `concat` helper.
pub(super) fn attributes_hash(attrs: &[ast::Attr]) -> ast::Hash {
    let pairs = attrs
        .iter()
        .map(|attr| ast::HashPair {
            key: attr.name.clone(),
            value: attr_value(attr),
            span: attr.span,
        })
        .collect();
    ast::Hash {
        pairs,
        span: attrs
            .iter()
            .map(|attr| attr.span)
            .reduce(Span::combine)
            .unwrap_or_default(),
    }
}

fn attr_value(attr: &ast::Attr) -> ast::Expr {
    match attr.value.as_slice() {
        [] => ast::Expr::string(""),
        [part] => part_expr(part),
        parts => ast::Expr::SubExpr(ast::Call {
            path: ast::PathExpr {
                parts: vec!["concat".into()],
                span: attr.span,
            },
            params: parts.iter().map(part_expr).collect(),
            hash: None,
            span: attr.span,
        }),
    }
}

fn part_expr(part: &ast::AttrPart) -> ast::Expr {
    match part {
        ast::AttrPart::Text(text) => ast::Expr::String(ast::StringLit {
            value: text.chars.clone(),
            span: text.span,
        }),
        ast::AttrPart::Path(path) => ast::Expr::Path(path.clone()),
        ast::AttrPart::SubExpr(call) => ast::Expr::SubExpr(call.clone()),
    }
}
