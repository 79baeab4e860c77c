//! Literate transcripts for JavaScript sources.
//!
//! Block comments become prose and everything else is emitted
//! verbatim inside fenced code blocks, so a well-commented file
//! reads as a markdown document.
//!
//! # Quick start
//!
//! ```
//! use literate_rs::{TranscriptOptions, transcribe};
//!
//! let source = "/* Add one. */\nconst inc = (x) => x + 1;";
//! let output = transcribe(source, &TranscriptOptions::new()).unwrap();
//! assert_eq!(
//!     output,
//!     " Add one. \n```js\n\nconst inc = (x) => x + 1;\n```"
//! );
//! ```
//!
//! ## Working with spans directly
//!
//! ```
//! use literate_rs::{TranscriptOptions, build_transcript, tokenize};
//!
//! let source = "let a = 1; // one";
//! let lexed = tokenize(source).unwrap();
//! let output = build_transcript(
//!     source,
//!     &lexed.comments,
//!     &lexed.tokens,
//!     &TranscriptOptions::new().language("javascript"),
//! )
//! .unwrap();
//! assert_eq!(output, "```javascript\nlet a = 1; // one\n```");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod options;
pub mod token;
pub mod transcript;

pub use lexer::{LexError, LexErrorKind, Lexed, tokenize};
pub use options::{DEFAULT_LANGUAGE, TranscriptOptions};
pub use token::{Position, Span, SpanKind};
pub use transcript::{TranscriptError, build_transcript};

/// Unified error type covering both lexing and transcript building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// Spans that do not describe the source.
    #[error("{0}")]
    Transcript(#[from] TranscriptError),
}

/// Tokenize a source string and build its transcript in one step.
pub fn transcribe(source: &str, options: &TranscriptOptions) -> Result<String, Error> {
    let lexed = tokenize(source)?;
    Ok(build_transcript(
        source,
        &lexed.comments,
        &lexed.tokens,
        options,
    )?)
}
