//! Route pattern grammar.
//!
//! # Data Flow
//! ```text
//! pattern string ("/users/{id}/files/{path}*")
//!     → parser.rs (split on "/", classify segments)
//!     → encoding.rs (canonical percent-encoding of literal segments)
//!     → ParsedRoute { segments, source }
//! ```
//!
//! # Design Decisions
//! - Segments are an explicit tagged enum, immutable once parsed
//! - Only the final segment may carry a `+`/`*` quantifier
//! - Literal mode takes every character as data (no variable syntax)

pub mod encoding;
pub mod parser;

pub use parser::parse;

/// Repetition suffix of a trailing variable segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// `{name}+`: one or more segments.
    Plus,
    /// `{name}*`: zero or more segments.
    Star,
}

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Canonically encoded literal text.
    Literal(String),
    /// A named variable matching one non-empty segment, or several if quantified.
    Variable {
        name: String,
        quantifier: Option<Quantifier>,
    },
}

impl Segment {
    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable { .. })
    }

    /// True for `{name}*`.
    pub fn is_star(&self) -> bool {
        matches!(
            self,
            Segment::Variable {
                quantifier: Some(Quantifier::Star),
                ..
            }
        )
    }
}

/// A successfully parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoute {
    pub segments: Vec<Segment>,
    /// The pattern exactly as registered.
    pub source: String,
}

impl ParsedRoute {
    pub fn has_variables(&self) -> bool {
        self.segments.iter().any(Segment::is_variable)
    }
}
