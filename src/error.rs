use std::fmt;

use proc_macro2::Span;

/// Input shapes the analyzer refuses to synthesize for.
#[derive(Debug, Clone)]
pub enum SynthesisError {
    /// The derive is attached to an enum or union.
    NotClass { span: Span },
    /// The type is declared `open`.
    OpenModifier { span: Span },
    /// A member's binding can't be turned into unambiguous names.
    MultipleBindings { span: Span },
}

impl SynthesisError {
    pub fn span(&self) -> Span {
        match self {
            SynthesisError::NotClass { span }
            | SynthesisError::OpenModifier { span }
            | SynthesisError::MultipleBindings { span } => *span,
        }
    }
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::NotClass { .. } => f.write_str("must be a `struct` declaration"),
            SynthesisError::OpenModifier { .. } => f.write_str("must not be `open`"),
            SynthesisError::MultipleBindings { .. } => {
                f.write_str("use a single binding per member")
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

impl From<SynthesisError> for darling::Error {
    fn from(err: SynthesisError) -> Self {
        darling::Error::custom(&err).with_span(&err.span())
    }
}
