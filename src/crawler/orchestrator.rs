//! Stage orchestration
//!
//! Drives one stage over an ordered input sequence. Every visit carries its
//! own `(index, accumulator)` pair, and finished visits are folded back into
//! the output vector by index. Completion order therefore never affects
//! which output an extracted field lands in, whether fetches run one at a
//! time or several are in flight.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, PageSource};
use crate::crawler::stages::Stage;
use futures_util::stream::{self, StreamExt};
use std::time::Duration;

/// A visit whose fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedVisit {
    /// Stage the visit belonged to
    pub stage: &'static str,

    /// Position of the input within that stage
    pub index: usize,

    pub url: String,

    pub error: FetchError,
}

/// Everything a stage run produced
#[derive(Debug)]
pub struct StageRun<T> {
    /// One output per input, in input order
    pub outputs: Vec<T>,

    /// Failed visits, ordered by input position
    pub failures: Vec<FailedVisit>,
}

/// A finished visit, tagged with the input position it belongs to
struct Visit<T> {
    index: usize,
    url: String,
    output: T,
    error: Option<FetchError>,
}

/// Runs stages against a [`PageSource`]
pub struct Orchestrator<P> {
    source: P,
    max_concurrent: usize,
    fetch_timeout: Duration,
}

impl<P: PageSource> Orchestrator<P> {
    /// Creates an orchestrator
    ///
    /// # Arguments
    ///
    /// * `source` - Where pages come from
    /// * `max_concurrent` - Fetches allowed in flight at once (1 = strictly sequential)
    /// * `fetch_timeout` - Budget for a single fetch
    pub fn new(source: P, max_concurrent: usize, fetch_timeout: Duration) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
            fetch_timeout,
        }
    }

    pub fn from_config(source: P, config: &CrawlerConfig) -> Self {
        Self::new(
            source,
            config.max_concurrent_fetches,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Visits every input and returns one output per input, in input order
    ///
    /// A failed fetch still produces an output: the accumulator is finalized
    /// with whatever `begin` put into it, and the failure is reported
    /// alongside.
    pub async fn run<S: Stage>(&self, stage: &S, inputs: Vec<S::Input>) -> StageRun<S::Output> {
        let total = inputs.len();
        tracing::info!("Stage '{}': {} pages to visit", S::NAME, total);

        let visits: Vec<Visit<S::Output>> = stream::iter(inputs.into_iter().enumerate())
            .map(|(index, input)| self.visit(stage, index, input))
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut slots: Vec<Option<S::Output>> = std::iter::repeat_with(|| None).take(total).collect();
        let mut failures = Vec::new();

        for visit in visits {
            if let Some(error) = visit.error {
                failures.push(FailedVisit {
                    stage: S::NAME,
                    index: visit.index,
                    url: visit.url,
                    error,
                });
            }
            slots[visit.index] = Some(visit.output);
        }

        failures.sort_by_key(|failure| failure.index);

        let outputs: Vec<S::Output> = slots.into_iter().flatten().collect();
        debug_assert_eq!(outputs.len(), total);

        tracing::info!(
            "Stage '{}' finished: {} visited, {} failed",
            S::NAME,
            total,
            failures.len()
        );

        StageRun { outputs, failures }
    }

    /// One begin → fetch → extract → complete cycle
    async fn visit<S: Stage>(&self, stage: &S, index: usize, input: S::Input) -> Visit<S::Output> {
        let url = stage.target_url(&input);
        let mut output = stage.begin(input, &url);

        tracing::info!("Visiting {}", url);

        let error = match tokio::time::timeout(self.fetch_timeout, self.source.fetch(&url)).await {
            Ok(Ok(body)) => {
                let matched = stage.rules().apply_html(&body, &mut output);
                tracing::trace!("{} elements matched on {}", matched, url);
                None
            }
            Ok(Err(e)) => Some(e),
            Err(_) => Some(FetchError::Timeout(self.fetch_timeout)),
        };

        if let Some(e) = &error {
            tracing::warn!("Failed to fetch {}: {}", url, e);
        }

        stage.complete(&mut output, &url);

        Visit {
            index,
            url,
            output,
            error,
        }
    }
}
