//! Compile HTML templates into hydration opcode programs.
//!
//! Rendering a template is split in two. The static markup is turned into a
//! DOM fragment once and cloned for every instance. Then a program of
//! *hydration opcodes* is replayed against each clone to locate the nodes that
//! have dynamic content and attach bindings ("morphs") to them. This crate
//! builds that program from a parsed template tree.
//!
//! # Features
//!
//! - Straight-line opcode programs with no jumps, nested bodies are compiled
//!   into separate programs referenced by id
//! - Deferred morph placement so every morph follows the opcode that makes
//!   its parent current
//! - Element references cached at most once per element
//! - Repairs for nodes browsers mangle while cloning (blank text nodes and the
//!   `checked` attribute)
//! - Exchange trees and programs with other tools using [`serde`]
//!
//! # Getting started
//!
//! Your entry point is the [`Compiler`] struct. It stores the configuration
//! and can compile any number of templates.
//!
//! ```
//! use hydrant::ast::{Element, Mustache, Program, Statement, Template};
//!
//! let template = Template::new(Program::new(vec![Element::new("p")
//!     .child(Statement::text("Hello "))
//!     .child(Mustache::path("user.name"))
//!     .child(Statement::text("!"))
//!     .into()]));
//!
//! let program = hydrant::Compiler::new().compile(&template)?;
//! assert_eq!(program.morphs().count(), 1);
//! # Ok::<(), hydrant::Error>(())
//! ```
//!
//! Each opcode prints the way the runtime names it, which makes it easy to
//! inspect a compiled program.
//!
//! ```
//! # use hydrant::ast::{Element, Mustache, Program, Statement, Template};
//! # let template = Template::new(Program::new(vec![Element::new("p")
//! #     .child(Statement::text("Hello "))
//! #     .child(Mustache::path("user.name"))
//! #     .child(Statement::text("!"))
//! #     .into()]));
//! let program = hydrant::compile(&template)?;
//! assert_eq!(
//!     program.to_string(),
//!     "morph 0 [0] 1 2 true\nstring \"user.name\"\nambiguous 0\n"
//! );
//! # Ok::<(), hydrant::Error>(())
//! ```
//!
//! # Configuration
//!
//! Use [`Compiler::with_options`] to change which repairs are emitted and
//! when element references are cached.
//!
//! ```
//! let options = hydrant::Options::builder().repair_blank_text(false).build();
//! let compiler = hydrant::Compiler::with_options(options);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod compile;
mod error;
mod types;

use std::fmt;

pub use crate::error::Error;
pub use crate::types::ast;
pub use crate::types::options::{Options, OptionsBuilder};
pub use crate::types::program::{Literal, Morph, Opcode, Program, StackLiteral};
pub use crate::types::span::Span;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The hydration opcode compiler.
///
/// A compiler holds no state between calls so it can be shared freely across
/// threads, every compilation starts from fresh counters.
#[derive(Clone, Default)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    /// Construct a new compiler with the default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Construct a new compiler with custom options.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydrant::{Compiler, Options};
    ///
    /// let options = Options::builder().cache_threshold(2).build();
    /// let compiler = Compiler::with_options(options);
    /// ```
    #[inline]
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Returns the compiler options.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compile a template.
    ///
    /// The root program is returned, nested programs are available through
    /// [`Program::children`].
    #[inline]
    pub fn compile(&self, template: &ast::Template) -> Result<Program> {
        compile::template(self, template)
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .finish()
    }
}

/// Compile a template using the default options.
#[inline]
pub fn compile(template: &ast::Template) -> Result<Program> {
    Compiler::new().compile(template)
}
