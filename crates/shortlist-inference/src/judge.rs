//! Judge prompt construction and reply parsing.
//!
//! The judge call is the pipeline's single serialization point: one prompt
//! embedding every surviving candidate's excerpt, one reply. The reply is
//! free text, not guaranteed JSON, so parsing is a best-effort structured
//! extraction: the first bracketed list of integers anywhere in the reply is
//! taken as the selection. Anything else is `Unparseable` — an expected,
//! handled failure mode of the external model, not a crash.

use regex::Regex;
use tracing::{debug, warn};

use shortlist_core::CandidateText;

/// Outcome of parsing a judge reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionReply {
    /// A bracketed integer list was found and parsed (1-based display indices,
    /// in reply order).
    Parsed(Vec<usize>),
    /// No bracketed integer list anywhere in the reply.
    Unparseable,
}

/// Build the judge prompt over the surviving candidates.
///
/// Each candidate appears under its 1-based display index with an excerpt
/// truncated to `excerpt_chars` Unicode scalars. Display indices are
/// positions in the *surviving* list; the caller is responsible for keeping
/// that ordering stable until translation.
pub fn build_judge_prompt(survivors: &[CandidateText], n: usize, excerpt_chars: usize) -> String {
    let ideas = survivors
        .iter()
        .enumerate()
        .map(|(i, c)| format!("Idea {}:\n{}", i + 1, truncate_chars(&c.text, excerpt_chars)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a judge evaluating hackathon ideas. Here are the project summaries:\n\n\
         {}\n\n\
         Please select the best {} ideas based on uniqueness, impact on society, \
         feasibility, viability, and implementation potential.\n\
         Return ONLY a JSON array of the idea numbers (e.g. [2, 5, 1]).",
        ideas, n
    )
}

/// Scan a judge reply for the first bracketed list of integers.
///
/// Matches substrings like `[3, 1]` or `[2]`; surrounding prose is ignored.
pub fn parse_selection_reply(reply: &str) -> SelectionReply {
    let re = Regex::new(r"\[\s*\d+(?:\s*,\s*\d+)*\s*\]").unwrap();

    let Some(m) = re.find(reply) else {
        warn!(reply_len = reply.len(), "Judge reply contained no index list");
        return SelectionReply::Unparseable;
    };

    match serde_json::from_str::<Vec<usize>>(m.as_str()) {
        Ok(indices) => {
            debug!(?indices, "Parsed judge selection");
            SelectionReply::Parsed(indices)
        }
        Err(e) => {
            warn!(matched = m.as_str(), error = %e, "Index list failed to parse");
            SelectionReply::Unparseable
        }
    }
}

/// Translate 1-based display indices back to survivor URLs.
///
/// Indices are positions in the surviving (filtered) candidate list, not the
/// original input list. Out-of-range indices and duplicates are dropped;
/// reply order is otherwise preserved.
pub fn translate_indices(indices: &[usize], survivors: &[CandidateText]) -> Vec<String> {
    let mut seen = vec![false; survivors.len()];
    let mut urls = Vec::with_capacity(indices.len().min(survivors.len()));

    for &idx in indices {
        if idx == 0 || idx > survivors.len() {
            warn!(index = idx, survivors = survivors.len(), "Dropping out-of-range index");
            continue;
        }
        if seen[idx - 1] {
            warn!(index = idx, "Dropping duplicate index");
            continue;
        }
        seen[idx - 1] = true;
        urls.push(survivors[idx - 1].source_url.clone());
    }

    urls
}

/// Truncate to at most `max_chars` Unicode scalar values.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
