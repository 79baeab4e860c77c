//! Merges comments and tokens into a literate transcript.
//!
//! Block comments become prose. Everything else is sliced verbatim
//! from the source and wrapped in fenced code blocks.

use std::ops::Range;

use crate::options::TranscriptOptions;
use crate::token::Span;

const FENCE: &str = "```";

/// Error produced when spans do not describe the source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// A span ends past the end of the source.
    #[error("span {range:?} is out of bounds for source of length {len}")]
    OutOfBounds { range: Range<usize>, len: usize },
    /// A span starts after it ends.
    #[error("span {range:?} starts after it ends")]
    InvertedRange { range: Range<usize> },
    /// A span starts before the previous span ends.
    #[error("span {range:?} overlaps the previous span ending at {previous_end}")]
    Overlap {
        range: Range<usize>,
        previous_end: usize,
    },
    /// A code slice boundary falls inside a UTF-8 sequence.
    #[error("code slice {slice:?} does not fall on character boundaries")]
    NotCharBoundary { slice: Range<usize> },
}

/// Build a transcript from a source text and its comments and tokens.
///
/// Spans are merged by start line and column. At an identical
/// position a non-comment span sorts before a comment span.
///
/// The result carries no trailing newline after the final fence.
pub fn build_transcript(
    source: &str,
    comments: &[Span],
    tokens: &[Span],
    options: &TranscriptOptions,
) -> Result<String, TranscriptError> {
    let mut spans: Vec<&Span> = comments.iter().chain(tokens).collect();
    spans.sort_by_key(|span| (span.start.line, span.start.column, span.is_comment()));

    tracing::debug!(
        spans = spans.len(),
        language = %options.language,
        "building transcript"
    );

    let mut builder = Builder::new(source, &options.language);
    for span in spans {
        builder.push(span)?;
    }
    Ok(builder.finish())
}

struct Builder<'a> {
    source: &'a str,
    language: &'a str,
    in_comment: bool,
    previous_end: Option<usize>,
    out: String,
}

impl<'a> Builder<'a> {
    const fn new(source: &'a str, language: &'a str) -> Self {
        Self {
            source,
            language,
            in_comment: true,
            previous_end: None,
            out: String::new(),
        }
    }

    fn push(&mut self, span: &Span) -> Result<(), TranscriptError> {
        self.check_bounds(span)?;
        self.check_overlap(span)?;

        let is_prose = span.is_block_comment();
        if is_prose && !self.in_comment {
            self.in_comment = true;
            self.close_fence();
        } else if !is_prose && self.in_comment {
            self.in_comment = false;
            self.open_fence();
        }

        let end = span.range.end;
        if is_prose {
            self.out.push_str(&span.value);
        } else {
            let slice = self.code_slice(span)?;
            self.out.push_str(slice);
        }
        self.previous_end = Some(end);
        Ok(())
    }

    fn finish(mut self) -> String {
        if !self.in_comment {
            self.close_fence();
        }
        self.out
    }

    fn check_bounds(&self, span: &Span) -> Result<(), TranscriptError> {
        let range = &span.range;
        if range.start > range.end {
            return Err(TranscriptError::InvertedRange {
                range: range.clone(),
            });
        }
        if range.end > self.source.len() {
            return Err(TranscriptError::OutOfBounds {
                range: range.clone(),
                len: self.source.len(),
            });
        }
        Ok(())
    }

    fn check_overlap(&self, span: &Span) -> Result<(), TranscriptError> {
        match self.previous_end {
            Some(previous_end) if span.range.start < previous_end => {
                Err(TranscriptError::Overlap {
                    range: span.range.clone(),
                    previous_end,
                })
            }
            _ => Ok(()),
        }
    }

    /// Source text from the end of the previous span through the end
    /// of this one, including any whitespace in between.
    fn code_slice(&self, span: &Span) -> Result<&'a str, TranscriptError> {
        let start = self.previous_end.unwrap_or(0);
        let end = span.range.end;

        self.source
            .get(start..end)
            .ok_or(TranscriptError::NotCharBoundary { slice: start..end })
    }

    fn open_fence(&mut self) {
        tracing::trace!(at = self.previous_end, "opening code fence");
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(FENCE);
        self.out.push_str(self.language);
        self.out.push('\n');
    }

    fn close_fence(&mut self) {
        tracing::trace!(at = self.previous_end, "closing code fence");
        self.out.push('\n');
        self.out.push_str(FENCE);
    }
}
