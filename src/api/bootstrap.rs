use chrono::NaiveDate;
use tracing::{error, info};

use crate::core::StatsSummary;
use crate::error::{ChartError, ChartResult};
use crate::feeds::{FeedBundle, LivePriceSource, Translations, resolve_live_price};
use crate::render::Renderer;

use super::chart_core::CoreModel;
use super::{ChartCore, ChartCoreConfig};

/// Outcome of the one-shot initial load.
pub enum LoadState<R: Renderer> {
    Ready {
        core: Box<ChartCore<R>>,
        stats: Option<StatsSummary>,
        translations: Translations,
    },
    /// Terminal. The renderer has already been shown the failure.
    Failed { renderer: R, error: ChartError },
}

impl<R: Renderer> LoadState<R> {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Turns loaded feeds into a ready chart, or a terminal failure.
///
/// Any feed, ingestion or first-render error calls
/// `Renderer::render_failure` exactly once. The live quote is optional; its
/// failure only affects the stats summary.
pub fn bootstrap<R: Renderer>(
    renderer: R,
    config: ChartCoreConfig,
    feeds: ChartResult<FeedBundle>,
    live_source: Option<&dyn LivePriceSource>,
    today: NaiveDate,
) -> LoadState<R> {
    let built = feeds.and_then(|bundle| {
        let FeedBundle {
            raw_prices,
            events,
            cycles,
            translations,
        } = bundle;
        CoreModel::build(config, raw_prices, events, cycles).map(|model| (model, translations))
    });
    let (model, translations) = match built {
        Ok(parts) => parts,
        Err(err) => return fail(renderer, err),
    };

    let mut core = ChartCore::from_model(renderer, model);
    if let Err(err) = core.render() {
        return fail(core.into_renderer(), err);
    }

    let stats = core.stats(resolve_live_price(live_source), today);
    info!(
        points = core.series().len(),
        events = core.events().len(),
        live = stats.is_some_and(|summary| summary.is_live),
        "chart ready"
    );
    LoadState::Ready {
        core: Box::new(core),
        stats,
        translations,
    }
}

fn fail<R: Renderer>(mut renderer: R, error: ChartError) -> LoadState<R> {
    error!(error = %error, "chart load failed");
    renderer.render_failure(&error);
    LoadState::Failed { renderer, error }
}
