//! The shortlist pipeline orchestrator.
//!
//! Control flows strictly forward: fetch → extract → select → persist.
//! Fetch and extract fan out concurrently per candidate (bounded by the
//! candidate ceiling), each writing its own ordinal slot. The single
//! generation call is the serialization point: every surviving candidate's
//! text must be known before the judge prompt is built. Persister steps are
//! sequential, with the delete-and-insert folded into one transactional
//! replace downstream.

use std::sync::Arc;

use futures::future::join_all;
use regex::Regex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shortlist_core::{
    defaults, CandidateDocument, CandidateText, DocumentFetcher, Error, GenerationBackend,
    RegistrationRepository, Result, ShortlistRepository, ShortlistRequest, ShortlistResult,
    TextExtractor,
};
use shortlist_inference::{build_judge_prompt, parse_selection_reply, translate_indices, SelectionReply};

/// Tunable pipeline parameters. Defaults come from `shortlist_core::defaults`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum conforming candidates per run.
    pub max_candidates: usize,
    /// Minimum trimmed text length (Unicode scalars) to survive filtering.
    pub min_text_chars: usize,
    /// Per-candidate excerpt budget in the judge prompt.
    pub excerpt_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::MAX_CANDIDATES,
            min_text_chars: defaults::MIN_TEXT_CHARS,
            excerpt_chars: defaults::EXCERPT_CHARS,
        }
    }
}

/// One pipeline run per invocation; no shared mutable state crosses runs.
/// Every collaborator is injected, so tests substitute fakes freely.
pub struct ShortlistPipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn GenerationBackend>,
    registrations: Arc<dyn RegistrationRepository>,
    shortlists: Arc<dyn ShortlistRepository>,
    config: PipelineConfig,
}

impl ShortlistPipeline {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn GenerationBackend>,
        registrations: Arc<dyn RegistrationRepository>,
        shortlists: Arc<dyn ShortlistRepository>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            generator,
            registrations,
            shortlists,
            config,
        }
    }

    /// Execute one full shortlisting run.
    #[instrument(skip(self, request), fields(n = request.n, urls = request.urls.len()))]
    pub async fn run(&self, request: &ShortlistRequest) -> Result<ShortlistResult> {
        if request.n == 0 {
            return Err(Error::InvalidInput("n must be a positive integer".into()));
        }

        // Policy filter, not a failure: non-fetchable locators never reach
        // the network. Ordinals are assigned here, once, in input order.
        let candidates = conforming_candidates(&request.urls);
        if candidates.is_empty() {
            return Err(Error::InvalidInput(
                "no fetchable document URLs provided".into(),
            ));
        }
        if candidates.len() > self.config.max_candidates {
            return Err(Error::TooManyDocuments {
                found: candidates.len(),
                limit: self.config.max_candidates,
            });
        }

        // Fan out fetch+extract; completion order does not matter because
        // each candidate's result lands in its own ordinal slot.
        let texts: Vec<CandidateText> =
            join_all(candidates.iter().map(|c| self.fetch_and_extract(c))).await;

        let survivors: Vec<CandidateText> = texts
            .into_iter()
            .filter(|c| c.text.trim().chars().count() >= self.config.min_text_chars)
            .collect();
        debug!(
            candidate_count = candidates.len(),
            survivors = survivors.len(),
            "Fetch and extract stage complete"
        );

        if survivors.len() < request.n {
            return Err(Error::InsufficientCandidates {
                found: survivors.len(),
                requested: request.n,
            });
        }

        // Single serialization point: one judge call per run.
        let prompt = build_judge_prompt(&survivors, request.n, self.config.excerpt_chars);
        let reply = self.generator.generate(&prompt).await?;

        let indices = match parse_selection_reply(&reply) {
            SelectionReply::Parsed(indices) => indices,
            SelectionReply::Unparseable => {
                return Err(Error::NoSelection(
                    "generation reply contained no index list".into(),
                ));
            }
        };

        // Display indices are 1-based over the surviving list, never the
        // unfiltered input. Invalid entries are dropped, reply order kept.
        let mut shortlisted = translate_indices(&indices, &survivors);
        shortlisted.truncate(request.n);

        let event_id = self.persist(&candidates, &shortlisted).await?;

        info!(
            event_id = %event_id,
            selected = shortlisted.len(),
            "Shortlist run complete"
        );
        Ok(ShortlistResult {
            event_id,
            shortlisted,
        })
    }

    /// Fetch and extract one candidate, tolerating per-document failure.
    async fn fetch_and_extract(&self, doc: &CandidateDocument) -> CandidateText {
        let text = match self.fetcher.fetch(&doc.source_url).await {
            Ok(bytes) => match self.extractor.extract(&bytes) {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        ordinal = doc.ordinal,
                        document_url = %doc.source_url,
                        error = %e,
                        "Extraction failed, candidate dropped"
                    );
                    String::new()
                }
            },
            Err(e) => {
                warn!(
                    ordinal = doc.ordinal,
                    document_url = %doc.source_url,
                    error = %e,
                    "Fetch failed, candidate dropped"
                );
                String::new()
            }
        };
        CandidateText {
            ordinal: doc.ordinal,
            source_url: doc.source_url.clone(),
            text,
        }
    }

    /// Resolve the parent event and replace its shortlist.
    ///
    /// Registrations are resolved for the full candidate set so that an
    /// empty selection still knows which event to clear.
    async fn persist(
        &self,
        candidates: &[CandidateDocument],
        shortlisted: &[String],
    ) -> Result<Uuid> {
        let candidate_urls: Vec<String> =
            candidates.iter().map(|c| c.source_url.clone()).collect();

        let registrations = self
            .registrations
            .find_by_document_urls(&candidate_urls)
            .await
            .map_err(|e| Error::lookup_failed(e.to_string()))?;

        if registrations.is_empty() {
            return Err(Error::lookup_failed(
                "no registrations found for the candidate documents",
            ));
        }

        let event_id = registrations[0].event_id;
        if registrations.iter().any(|r| r.event_id != event_id) {
            // Guaranteed impossible upstream: one run is always invoked for
            // one event's candidate set.
            return Err(Error::Internal(
                "candidate documents span multiple events".into(),
            ));
        }

        let registration_ids: Vec<Uuid> = shortlisted
            .iter()
            .filter_map(|url| {
                registrations
                    .iter()
                    .find(|r| &r.document_url == url)
                    .map(|r| r.id)
            })
            .collect();

        self.shortlists
            .replace_for_event(event_id, &registration_ids)
            .await
            .map_err(|e| match e {
                err @ Error::Persistence { .. } => err,
                other => Error::replace_failed(other.to_string()),
            })?;

        Ok(event_id)
    }
}

/// Filter input URLs down to network-fetchable candidates, assigning stable
/// 1-based ordinals in input order.
fn conforming_candidates(urls: &[String]) -> Vec<CandidateDocument> {
    let remote = Regex::new(r"(?i)^https?://").unwrap();
    urls.iter()
        .filter(|url| remote.is_match(url))
        .enumerate()
        .map(|(i, url)| CandidateDocument {
            ordinal: i + 1,
            source_url: url.clone(),
        })
        .collect()
}
