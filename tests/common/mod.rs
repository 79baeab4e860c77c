#![allow(dead_code)]

use literate_rs::{TranscriptOptions, transcribe};

pub const FENCE: &str = "```";

/// Transcribe with default options, panicking on error.
pub fn transcript(source: &str) -> String {
    transcribe(source, &TranscriptOptions::new())
        .unwrap_or_else(|e| panic!("transcribe failed: {e}\n--- source ---\n{source}"))
}

/// Prose and code segments of a transcript, in output order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Segments {
    pub prose: Vec<String>,
    pub code: Vec<String>,
}

/// Split a transcript on its fences.
///
/// Assumes neither prose nor code contains a fence of its own.
pub fn segments(output: &str, language: &str) -> Segments {
    let pieces: Vec<&str> = output.split(FENCE).collect();
    assert!(
        pieces.len() % 2 == 1,
        "unbalanced fences ({} markers):\n{output}",
        pieces.len() - 1
    );

    let open = format!("{language}\n");
    let mut result = Segments::default();
    for (i, piece) in pieces.iter().enumerate() {
        if i % 2 == 0 {
            // prose before an opening fence carries that fence's newline
            let followed_by_fence = i + 1 < pieces.len();
            let prose = if followed_by_fence && !piece.is_empty() {
                piece
                    .strip_suffix('\n')
                    .unwrap_or_else(|| panic!("opening fence not on its own line:\n{output}"))
            } else {
                piece
            };
            if !prose.is_empty() {
                result.prose.push(prose.to_string());
            }
        } else {
            let code = piece
                .strip_prefix(open.as_str())
                .and_then(|rest| rest.strip_suffix('\n'))
                .unwrap_or_else(|| panic!("malformed code block {piece:?}:\n{output}"));
            result.code.push(code.to_string());
        }
    }
    result
}

/// Remove every ASCII whitespace character.
pub fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}
