//! Defines a compiled [`Program`] which is a sequence of [`Opcode`] that can
//! be replayed by a hydration runtime against a cloned DOM fragment.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A compiled program.
///
/// Holds the opcodes for one template body along with the compiled nested
/// programs it refers to. A program id allocated by a [`Opcode::Program`]
/// instruction is the index of that program in [`children`][Program::children].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Program {
    pub(crate) opcodes: Vec<Opcode>,
    pub(crate) children: Vec<Program>,
}

/// A single hydration instruction.
///
/// The opcode stream is straight-line: there are no jumps, and nested bodies
/// are referenced by program id rather than inlined.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "op", content = "args", rename_all = "camelCase")
)]
pub enum Opcode {
    /// Declare a block parameter of the program at the given ordinal
    BlockParam { name: String, index: u32 },

    /// Restore what the browser dropped while cloning the current node
    RepairClonedNode {
        blank_text_nodes: Vec<u32>,
        checked: bool,
    },

    /// Make the child at the given index the current parent
    ConsumeParent(u32),

    /// Cache a reference to the current parent
    Element(u32),

    /// Return to the previous parent
    PopParent,

    /// Start a call, naming the nested programs it may render
    Program {
        body: Option<u32>,
        inverse: Option<u32>,
    },

    /// Push a callee name or a marker onto the stack
    String(String),

    /// Push a string literal onto the stack
    StringLiteral(String),

    /// Push a number or boolean literal onto the stack
    Literal(Literal),

    /// Push a path lookup onto the stack
    Id(Vec<String>),

    /// Finish a sub-expression taking the given number of params
    Sexpr(u32),

    /// Push a hash key or the number of hash pairs onto the stack
    StackLiteral(StackLiteral),

    /// Bind an attribute of a cached element
    Attribute {
        quoted: bool,
        name: String,
        parts: u32,
        element: u32,
    },

    /// Invoke a helper on a cached element
    NodeHelper { params: u32, element: u32 },

    /// Invoke a helper and render the result into a morph
    Helper {
        params: u32,
        morph: u32,
        block_params: Option<u32>,
    },

    /// Render a path into a morph, resolving it as a helper or a value
    Ambiguous { morph: u32 },

    /// Render a component into a morph
    Component { morph: u32, block_params: u32 },

    /// Create a morph
    Morph(Morph),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Literal {
    Number(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StackLiteral {
    Key(String),
    Count(u32),
}

/// Describes a dynamic content site in the cloned fragment.
///
/// The morph spans from the child at `start` up to, but excluding, the child
/// at `end` of the node located by `path`. A `None` bound means the morph
/// extends to the first or last child respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Morph {
    pub id: u32,
    pub path: Vec<u32>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub escaped: bool,
}

impl Program {
    /// Returns the opcodes of this program.
    #[inline]
    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    /// Returns the nested programs, indexed by program id.
    #[inline]
    pub fn children(&self) -> &[Program] {
        &self.children
    }

    /// Lookup a nested program by id.
    #[inline]
    pub fn child(&self, id: u32) -> Option<&Program> {
        self.children.get(id as usize)
    }

    /// Returns the morph descriptors of this program in stream order.
    pub fn morphs(&self) -> impl Iterator<Item = &Morph> + '_ {
        self.opcodes.iter().filter_map(|op| match op {
            Opcode::Morph(morph) => Some(morph),
            _ => None,
        })
    }

    /// Consumes the program returning its opcodes.
    #[inline]
    pub fn into_opcodes(self) -> Vec<Opcode> {
        self.opcodes
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        for op in &self.opcodes {
            writeln!(f, "{pad}{op}")?;
        }
        for (id, child) in self.children.iter().enumerate() {
            writeln!(f, "{pad}program {id}:")?;
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl Opcode {
    /// Returns the opcode name as the runtime knows it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlockParam { .. } => "blockParam",
            Self::RepairClonedNode { .. } => "repairClonedNode",
            Self::ConsumeParent(_) => "consumeParent",
            Self::Element(_) => "element",
            Self::PopParent => "popParent",
            Self::Program { .. } => "program",
            Self::String(_) => "string",
            Self::StringLiteral(_) => "stringLiteral",
            Self::Literal(_) => "literal",
            Self::Id(_) => "id",
            Self::Sexpr(_) => "sexpr",
            Self::StackLiteral(_) => "stackLiteral",
            Self::Attribute { .. } => "attribute",
            Self::NodeHelper { .. } => "nodeHelper",
            Self::Helper { .. } => "helper",
            Self::Ambiguous { .. } => "ambiguous",
            Self::Component { .. } => "component",
            Self::Morph(_) => "morph",
        }
    }

    /// Whether this opcode changes or pins the current parent, which makes
    /// it a valid anchor for morphs.
    pub(crate) fn is_parent_anchor(&self) -> bool {
        matches!(
            self,
            Self::Element(_) | Self::ConsumeParent(_) | Self::PopParent
        )
    }
}

struct Opt(Option<u32>);

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::BlockParam { name, index } => write!(f, " {name:?} {index}"),
            Self::RepairClonedNode {
                blank_text_nodes,
                checked,
            } => write!(f, " {blank_text_nodes:?} {checked}"),
            Self::ConsumeParent(i) | Self::Element(i) | Self::Sexpr(i) => write!(f, " {i}"),
            Self::PopParent => Ok(()),
            Self::Program { body, inverse } => write!(f, " {} {}", Opt(*body), Opt(*inverse)),
            Self::String(s) | Self::StringLiteral(s) => write!(f, " {s:?}"),
            Self::Literal(Literal::Number(n)) => write!(f, " {n}"),
            Self::Literal(Literal::Boolean(b)) => write!(f, " {b}"),
            Self::Id(parts) => write!(f, " {parts:?}"),
            Self::StackLiteral(StackLiteral::Key(key)) => write!(f, " {key:?}"),
            Self::StackLiteral(StackLiteral::Count(n)) => write!(f, " {n}"),
            Self::Attribute {
                quoted,
                name,
                parts,
                element,
            } => write!(f, " {quoted} {name:?} {parts} {element}"),
            Self::NodeHelper { params, element } => write!(f, " {params} {element}"),
            Self::Helper {
                params,
                morph,
                block_params,
            } => match block_params {
                Some(n) => write!(f, " {params} {morph} {n}"),
                None => write!(f, " {params} {morph}"),
            },
            Self::Ambiguous { morph } => write!(f, " {morph}"),
            Self::Component {
                morph,
                block_params,
            } => write!(f, " {morph} {block_params}"),
            Self::Morph(Morph {
                id,
                path,
                start,
                end,
                escaped,
            }) => write!(
                f,
                " {id} {path:?} {} {} {escaped}",
                Opt(*start),
                Opt(*end)
            ),
        }
    }
}
