// ABOUTME: The extraction pipeline: classify, run strategy chains, normalize, filter, merge, fall back.
// ABOUTME: The only module that can fail a run, and only for invalid caller parameters.

//! Pipeline orchestration.
//!
//! Key behaviors:
//! - `extract` is the single synchronous entry point: envelopes in, an
//!   [`ExtractionResult`] out. It never returns an empty record list — a
//!   matchless keyword set yields the no-match sentinel, and total extraction
//!   failure yields one synthesized placeholder.
//! - Invalid caller parameters are the only error path. Per-source failures
//!   during a live fetch are logged and absorbed as zero candidates.
//! - `extract_live` fans out fetches concurrently but always reassembles
//!   results in the caller's source order, so source priority is a property
//!   of the plan, never of network timing.

use std::collections::BTreeMap;

use crate::aggregate::merge_sources;
use crate::client::{ProxyClient, SourceSpec};
use crate::envelope::ResponseEnvelope;
use crate::error::ExtractError;
use crate::filter::{no_match_sentinel, normalize_keywords, retain_matching};
use crate::normalize::normalize;
use crate::options::Options;
use crate::record::{EntityKind, ExtractionResult, RawCandidate};
use crate::strategies::{chain_for, run_chain};
use crate::synth::synthesize;

/// Caller-supplied request parameters, interpolated into sentinel and
/// placeholder records. Keys in use: `location`, `hotel_name`.
pub type RequestContext = BTreeMap<String, String>;

fn require_context_key(
    context: &RequestContext,
    key: &'static str,
) -> Result<(), ExtractError> {
    match context.get(key).map(String::as_str) {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ExtractError::invalid_input(key, "Extract", None)),
    }
}

/// Reject requests missing the parameters the entity kind needs.
pub fn validate_context(entity: EntityKind, context: &RequestContext) -> Result<(), ExtractError> {
    require_context_key(context, "location")?;
    if entity == EntityKind::Review {
        require_context_key(context, "hotel_name")?;
    }
    Ok(())
}

/// The extraction pipeline. Stateless per request; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    opts: Options,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: Options) -> Self {
        Self { opts }
    }

    /// Run the full pipeline over pre-fetched envelopes.
    ///
    /// `envelopes` pairs each source tag with its classified payload, ordered
    /// by source priority. Returns at least one record for every valid
    /// request.
    pub fn extract(
        &self,
        entity: EntityKind,
        envelopes: &[(String, ResponseEnvelope)],
        keywords: &[String],
        context: &RequestContext,
    ) -> Result<ExtractionResult, ExtractError> {
        validate_context(entity, context)?;
        let keywords = normalize_keywords(keywords);
        let chain = chain_for(entity);

        // Candidates stay grouped per source until after filtering, but ids
        // must be assigned over the whole pass so duplicate tags cannot
        // collide. Flatten for normalization, then split back by run length.
        let mut run_lengths = Vec::with_capacity(envelopes.len());
        let mut candidates: Vec<RawCandidate> = Vec::new();
        for (tag, envelope) in envelopes {
            let mut found = run_chain(&chain, envelope, tag);
            found.truncate(self.opts.max_records);
            run_lengths.push(found.len());
            candidates.extend(found);
        }
        let extracted_any = !candidates.is_empty();

        let mut records = normalize(&candidates);
        let mut runs = Vec::with_capacity(run_lengths.len());
        for len in run_lengths {
            let rest = records.split_off(len);
            let run = std::mem::replace(&mut records, rest);
            runs.push(retain_matching(run, &keywords));
        }

        let mut merged = merge_sources(runs);
        if merged.is_empty() {
            let fallback = if extracted_any && !keywords.is_empty() {
                no_match_sentinel(entity, &keywords)
            } else {
                tracing::warn!(entity = %entity, "no source produced candidates; synthesizing placeholder");
                synthesize(entity, context)
            };
            merged = vec![fallback];
        }

        Ok(ExtractionResult::new(merged))
    }

    /// Fetch every source through the proxy, then run [`Self::extract`].
    ///
    /// Sources are fetched concurrently. A source that fails or times out is
    /// logged and contributes zero candidates; it never fails the run.
    pub async fn extract_live(
        &self,
        client: &ProxyClient,
        entity: EntityKind,
        sources: &[SourceSpec],
        keywords: &[String],
        context: &RequestContext,
    ) -> Result<ExtractionResult, ExtractError> {
        validate_context(entity, context)?;

        let fetches = sources
            .iter()
            .map(|s| tokio::time::timeout(self.opts.timeout, client.fetch(&s.target_url, &s.options)));
        let outcomes = futures::future::join_all(fetches).await;

        let mut envelopes = Vec::with_capacity(sources.len());
        for (spec, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Ok(Ok(envelope)) => envelopes.push((spec.tag.clone(), envelope)),
                Ok(Err(err)) => {
                    tracing::warn!(source = %spec.tag, error = %err, "source fetch failed; skipping");
                }
                Err(_) => {
                    tracing::warn!(source = %spec.tag, "source fetch exceeded deadline; skipping");
                }
            }
        }

        self.extract(entity, &envelopes, keywords, context)
    }
}

/// Run the pipeline once with default options.
pub fn extract(
    entity: EntityKind,
    envelopes: &[(String, ResponseEnvelope)],
    keywords: &[String],
    context: &RequestContext,
) -> Result<ExtractionResult, ExtractError> {
    Pipeline::new().extract(entity, envelopes, keywords, context)
}
