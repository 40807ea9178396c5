//! Domain models for the shortlist pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submitted document under consideration for shortlisting.
///
/// The `ordinal` is assigned once at pipeline-run start, in input order, and
/// is never reassigned mid-run: the generation reply references candidates
/// positionally, so a stable ordinal is the only identifier the external
/// model ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDocument {
    /// Stable 1-based position within this pipeline run.
    pub ordinal: usize,
    /// Where to retrieve the document (must be fetchable over the network).
    pub source_url: String,
}

/// A candidate's extracted text, produced by the fetch/extract stage.
///
/// Candidates that failed to fetch or parse carry an empty `text`; the
/// survivor filter removes them before selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateText {
    pub ordinal: usize,
    pub source_url: String,
    pub text: String,
}

/// Input contract for one pipeline run.
///
/// Deduplication of `urls` is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistRequest {
    /// Candidate document URLs, in caller order.
    pub urls: Vec<String>,
    /// Requested selection size. Must be positive.
    pub n: usize,
}

/// Output contract for one successful pipeline run.
///
/// `shortlisted` contains at most `n` URLs drawn from the input set, in the
/// order the generation reply listed them (invalid entries removed). No
/// quality ordering beyond that is guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortlistResult {
    /// Parent event whose shortlist was replaced.
    pub event_id: Uuid,
    /// Selected document URLs, reply order preserved.
    pub shortlisted: Vec<String>,
}

/// A team registration, the owning record for a submitted document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub id: Uuid,
    /// Parent event (hackathon) this registration belongs to.
    pub event_id: Uuid,
    /// URL of the registration's submitted idea document.
    pub document_url: String,
}

/// One durable shortlist row. The parent event exclusively owns its rows;
/// each successful run fully supersedes the previous set (last-run-wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortlistEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub registration_id: Uuid,
    /// Position in the generation reply (0-based insertion order).
    pub rank: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortlist_result_serializes_shortlisted_field() {
        let result = ShortlistResult {
            event_id: Uuid::nil(),
            shortlisted: vec!["https://cdn.example/a.pdf".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["shortlisted"][0], "https://cdn.example/a.pdf");
    }

    #[test]
    fn test_candidate_ordinals_are_one_based() {
        let docs: Vec<CandidateDocument> = ["a", "b"]
            .iter()
            .enumerate()
            .map(|(i, url)| CandidateDocument {
                ordinal: i + 1,
                source_url: url.to_string(),
            })
            .collect();
        assert_eq!(docs[0].ordinal, 1);
        assert_eq!(docs[1].ordinal, 2);
    }
}
