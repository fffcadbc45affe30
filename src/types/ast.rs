//! AST representing a parsed template.
//!
//! The tree is produced by an external HTML/mustache parser. With the `serde`
//! feature enabled it can be deserialized directly from the parser's output,
//! where every node carries a `type` tag naming its kind. The builder methods
//! on each node type make it convenient to assemble a tree by hand.

use crate::types::span::Span;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// A complete template: the root program and, optionally, its source text.
///
/// The source is only used to render error messages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Template {
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
    pub program: Program,
}

/// A sequence of statements with its own block parameters.
///
/// Every template has a root program, and every block body, block inverse,
/// and component body is a nested program.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Program {
    pub body: Vec<Statement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_params: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Statement {
    #[cfg_attr(feature = "serde", serde(rename = "TextNode"))]
    Text(Text),
    #[cfg_attr(feature = "serde", serde(rename = "CommentStatement"))]
    Comment(Comment),
    #[cfg_attr(feature = "serde", serde(rename = "ElementNode"))]
    Element(Element),
    #[cfg_attr(feature = "serde", serde(rename = "MustacheStatement"))]
    Mustache(Mustache),
    #[cfg_attr(feature = "serde", serde(rename = "BlockStatement"))]
    Block(Block),
    #[cfg_attr(feature = "serde", serde(rename = "ComponentNode"))]
    Component(Component),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Text {
    pub chars: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Comment {
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A plain HTML element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Element {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<Attr>,
    /// Helper calls placed inside the start tag, e.g. `<div {{action "go"}}>`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub helpers: Vec<Call>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Statement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Attr {
    pub name: String,
    pub value: Vec<AttrPart>,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub quoted: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// One piece of an attribute value.
///
/// A mustache inside an attribute is unwrapped by the parser into either its
/// path or, if it calls a helper, its sub-expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum AttrPart {
    #[cfg_attr(feature = "serde", serde(rename = "TextNode"))]
    Text(Text),
    #[cfg_attr(feature = "serde", serde(rename = "PathExpression"))]
    Path(PathExpr),
    #[cfg_attr(feature = "serde", serde(rename = "SubExpression"))]
    SubExpr(Call),
}

/// A `{{ ... }}` in text position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Mustache {
    #[cfg_attr(feature = "serde", serde(rename = "sexpr"))]
    pub call: Call,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub escaped: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A `{{#name ...}} ... {{else}} ... {{/name}}` block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Block {
    #[cfg_attr(feature = "serde", serde(rename = "sexpr"))]
    pub call: Call,
    pub program: Program,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inverse: Option<Program>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A custom element, i.e. one whose tag contains a dash.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Component {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<Attr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub program: Program,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A call expression: a callee path with positional and named arguments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Call {
    pub path: PathExpr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hash: Option<Hash>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Hash {
    pub pairs: Vec<HashPair>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct HashPair {
    pub key: String,
    pub value: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Expr {
    #[cfg_attr(feature = "serde", serde(rename = "PathExpression"))]
    Path(PathExpr),
    #[cfg_attr(feature = "serde", serde(rename = "SubExpression"))]
    SubExpr(Call),
    #[cfg_attr(feature = "serde", serde(rename = "StringLiteral"))]
    String(StringLit),
    #[cfg_attr(feature = "serde", serde(rename = "NumberLiteral"))]
    Number(NumberLit),
    #[cfg_attr(feature = "serde", serde(rename = "BooleanLiteral"))]
    Boolean(BoolLit),
}

/// A dotted lookup path like `user.name`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct PathExpr {
    pub parts: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct StringLit {
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct NumberLit {
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct BoolLit {
    pub value: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

////////////////////////////////////////////////////////////////////////////////
// Builders
////////////////////////////////////////////////////////////////////////////////

impl Template {
    pub fn new(program: Program) -> Self {
        Self {
            source: None,
            program,
        }
    }

    /// Attach the template source, used when rendering errors.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self {
            body,
            block_params: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn block_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_params = params.into_iter().map(Into::into).collect();
        self
    }
}

impl Statement {
    pub fn text(chars: impl Into<String>) -> Self {
        Self::Text(Text {
            chars: chars.into(),
            span: Span::default(),
        })
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment(Comment {
            value: value.into(),
            span: Span::default(),
        })
    }

    /// Returns the name of this node kind as the parser reports it.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "TextNode",
            Self::Comment(_) => "CommentStatement",
            Self::Element(_) => "ElementNode",
            Self::Mustache(_) => "MustacheStatement",
            Self::Block(_) => "BlockStatement",
            Self::Component(_) => "ComponentNode",
        }
    }

    /// Whether this node gets a morph at hydration time.
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            Self::Mustache(_) | Self::Block(_) | Self::Component(_)
        )
    }
}

impl From<Element> for Statement {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Mustache> for Statement {
    fn from(mustache: Mustache) -> Self {
        Self::Mustache(mustache)
    }
}

impl From<Block> for Statement {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

impl From<Component> for Statement {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            helpers: Vec::new(),
            children: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn attr(mut self, attr: Attr) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn helper(mut self, call: Call) -> Self {
        self.helpers.push(call);
        self
    }

    pub fn child(mut self, child: impl Into<Statement>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Whether the element has a `checked` attribute.
    ///
    /// Browsers drop this attribute when cloning template content, so it has
    /// to be restored on the cloned node.
    pub fn is_checked(&self) -> bool {
        self.attributes.iter().any(|attr| attr.name == "checked")
    }
}

impl Attr {
    pub fn new(name: impl Into<String>, value: Vec<AttrPart>) -> Self {
        Self {
            name: name.into(),
            value,
            quoted: true,
            span: Span::default(),
        }
    }

    /// An attribute with a single static text value.
    pub fn text(name: impl Into<String>, chars: impl Into<String>) -> Self {
        Self::new(name, vec![AttrPart::text(chars)])
    }

    pub fn unquoted(mut self) -> Self {
        self.quoted = false;
        self
    }

    /// An attribute is static if none of its value parts need evaluation.
    pub fn is_static(&self) -> bool {
        self.value.iter().all(|part| matches!(part, AttrPart::Text(_)))
    }
}

impl AttrPart {
    pub fn text(chars: impl Into<String>) -> Self {
        Self::Text(Text {
            chars: chars.into(),
            span: Span::default(),
        })
    }

    pub fn path(path: &str) -> Self {
        Self::Path(PathExpr::new(path))
    }
}

impl Mustache {
    pub fn new(call: Call) -> Self {
        Self {
            call,
            escaped: true,
            span: Span::default(),
        }
    }

    /// A mustache that simply looks up the given path.
    pub fn path(path: &str) -> Self {
        Self::new(Call::new(path))
    }

    pub fn unescaped(mut self) -> Self {
        self.escaped = false;
        self
    }
}

impl Block {
    pub fn new(call: Call, program: Program) -> Self {
        Self {
            call,
            program,
            inverse: None,
            span: Span::default(),
        }
    }

    pub fn inverse(mut self, inverse: Program) -> Self {
        self.inverse = Some(inverse);
        self
    }
}

impl Component {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            program: Program::default(),
            span: Span::default(),
        }
    }

    pub fn attr(mut self, attr: Attr) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn program(mut self, program: Program) -> Self {
        self.program = program;
        self
    }
}

impl Call {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathExpr::new(path),
            params: Vec::new(),
            hash: None,
            span: Span::default(),
        }
    }

    pub fn param(mut self, param: Expr) -> Self {
        self.params.push(param);
        self
    }

    pub fn pair(mut self, key: impl Into<String>, value: Expr) -> Self {
        self.hash.get_or_insert_with(Hash::default).pairs.push(HashPair {
            key: key.into(),
            value,
            span: Span::default(),
        });
        self
    }

    /// A call with arguments invokes a helper; a bare path is ambiguous until
    /// the runtime resolves it.
    pub fn is_helper(&self) -> bool {
        !self.params.is_empty() || self.hash.is_some()
    }
}

impl Expr {
    pub fn path(path: &str) -> Self {
        Self::Path(PathExpr::new(path))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(StringLit {
            value: value.into(),
            span: Span::default(),
        })
    }

    pub fn number(value: f64) -> Self {
        Self::Number(NumberLit {
            value,
            span: Span::default(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean(BoolLit {
            value,
            span: Span::default(),
        })
    }

    pub fn sexpr(call: Call) -> Self {
        Self::SubExpr(call)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Path(path) => path.span,
            Self::SubExpr(call) => call.span,
            Self::String(lit) => lit.span,
            Self::Number(lit) => lit.span,
            Self::Boolean(lit) => lit.span,
        }
    }
}

impl PathExpr {
    /// Split a dotted path into its segments.
    pub fn new(path: &str) -> Self {
        Self {
            parts: path.split('.').map(String::from).collect(),
            span: Span::default(),
        }
    }

    /// Returns the path joined back together with periods.
    pub fn original(&self) -> String {
        self.parts.join(".")
    }
}
