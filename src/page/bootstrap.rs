//! Drives resolution and rendering for every element of a page

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::page::descriptor::ElementDescriptor;
use crate::page::render::{RenderError, RenderSink, render_snippet};
use crate::version::fetcher::CachedFetcher;
use crate::version::store::KeyValueStore;

/// Outcome counts of a page load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rendered: usize,
    /// Elements without an id
    pub skipped: usize,
    pub failed: usize,
}

enum ElementOutcome {
    Rendered,
    Skipped,
    Failed,
}

async fn load_element<S: KeyValueStore>(
    element: &ElementDescriptor,
    fetcher: &CachedFetcher<S>,
    sink: &dyn RenderSink,
) -> ElementOutcome {
    if element.id.is_empty() {
        error!("Element missing ID: {:?}", element);
        return ElementOutcome::Skipped;
    }

    let resolution = match fetcher.resolve(&element.query()).await {
        Ok(resolution) => resolution,
        Err(e) => {
            error!("Loading error for element {}: {}", element.id, e);
            return ElementOutcome::Failed;
        }
    };
    debug!("Resolved {}: {:?}", element.id, resolution.payload);

    let result = resolution
        .payload
        .latest_name()
        .ok_or(RenderError::MissingVersion)
        .and_then(|version| {
            let text = render_snippet(&element.description, &element.url, version);
            sink.render(&element.id, &text)
        });

    match result {
        Ok(()) => ElementOutcome::Rendered,
        Err(e) => {
            error!("Failed to render element {}: {}", element.id, e);
            ElementOutcome::Failed
        }
    }
}

/// Resolves and renders all elements concurrently.
///
/// A failing element is logged and left untouched; it never stops the others.
pub async fn load_all<S: KeyValueStore>(
    elements: &[ElementDescriptor],
    fetcher: &CachedFetcher<S>,
    sink: &dyn RenderSink,
) -> LoadReport {
    let outcomes = join_all(
        elements
            .iter()
            .map(|element| load_element(element, fetcher, sink)),
    )
    .await;

    let report = outcomes
        .into_iter()
        .fold(LoadReport::default(), |mut report, outcome| {
            match outcome {
                ElementOutcome::Rendered => report.rendered += 1,
                ElementOutcome::Skipped => report.skipped += 1,
                ElementOutcome::Failed => report.failed += 1,
            }
            report
        });

    info!(
        "Loaded {} elements: {} rendered, {} skipped, {} failed",
        elements.len(),
        report.rendered,
        report.skipped,
        report.failed
    );
    report
}
