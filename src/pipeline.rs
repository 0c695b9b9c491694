use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::{
    foundation::error::GraphfoldResult,
    render::{
        composite::{PageLayout, PageSink},
        config::RenderConfig,
        layers::{
            LayerContext, render_background_layer, render_highlight_layer, render_label_layer,
            render_trajectory_layer,
        },
        text::text_painter_for,
    },
    snapshot::{
        load::{SliceSet, load_all},
        model::{NodeId, Snapshot},
    },
    stats::{
        bounds::{Aggregate, GlobalBounds, aggregate},
        rank::{ColorTable, RankedNode, Ranking, rank_and_color},
        trajectory::collect_trajectories,
    },
};

/// Inputs of one batch run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub slices: SliceSet,
    pub out_dir: PathBuf,
    pub config: RenderConfig,
}

/// Loaded slices plus everything derived from the full slice set before rendering.
#[derive(Clone, Debug)]
pub struct Prepared {
    pub snapshots: Vec<Snapshot>,
    pub aggregate: Aggregate,
    pub ranking: Ranking,
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    pub pages: Vec<PathBuf>,
    pub bounds: GlobalBounds,
    pub ranking: Ranking,
}

/// Machine-readable view of what a run would highlight.
#[derive(Clone, Debug, Serialize)]
pub struct Inspection {
    pub slices: usize,
    pub bounds: GlobalBounds,
    pub ranked: Vec<RankedNode>,
    pub highlighted: Vec<NodeId>,
    pub colors: ColorTable,
}

/// Load every slice, aggregate bounds, then rank and color nodes.
pub fn prepare(slices: &SliceSet, config: &RenderConfig) -> GraphfoldResult<Prepared> {
    config.validate()?;
    let snapshots = load_all(slices)?;
    let aggregate = aggregate(&snapshots)?;
    let ranking = rank_and_color(
        &aggregate.history,
        aggregate.snapshot_count,
        &config.palette,
        config.highlight_policy(),
    )?;
    Ok(Prepared {
        snapshots,
        aggregate,
        ranking,
    })
}

/// Render every layer and write the paired pages into `opts.out_dir`.
///
/// Layer order: background and highlight for each slice, then trajectories, then labels.
#[tracing::instrument(skip(opts), fields(slices = opts.slices.len(), out_dir = %opts.out_dir.display()))]
pub fn run(opts: &RunOptions) -> GraphfoldResult<RunSummary> {
    let prepared = prepare(&opts.slices, &opts.config)?;
    let pages = render_pages(&prepared, &opts.config, &opts.out_dir)?;
    tracing::info!(pages = pages.len(), "render complete");
    Ok(RunSummary {
        pages,
        bounds: prepared.aggregate.bounds,
        ranking: prepared.ranking,
    })
}

pub fn render_pages(
    prepared: &Prepared,
    config: &RenderConfig,
    out_dir: &Path,
) -> GraphfoldResult<Vec<PathBuf>> {
    let ctx = LayerContext::new(config, &prepared.aggregate.bounds, &prepared.ranking)?;
    let layout = PageLayout::from_config(config)?;
    let mut text = text_painter_for(config.font.as_deref())?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    // The overlays come last in page order but are drawn first, so the font can then
    // move into the sink for page numbers.
    let trajectories = collect_trajectories(&prepared.snapshots);
    let trajectory_layer = render_trajectory_layer(&ctx, &trajectories)?;
    let label_layer = render_label_layer(&ctx, &trajectories, text.as_mut())?;

    let mut sink = PageSink::new(layout, text, out_dir);
    for snap in &prepared.snapshots {
        sink.push(render_background_layer(&ctx, snap)?)?;
        sink.push(render_highlight_layer(&ctx, snap)?)?;
    }
    sink.push(trajectory_layer)?;
    sink.push(label_layer)?;
    sink.finish()
}

/// Everything `run` would decide, without rendering.
#[tracing::instrument(skip(config), fields(slices = slices.len()))]
pub fn inspect(slices: &SliceSet, config: &RenderConfig) -> GraphfoldResult<Inspection> {
    let prepared = prepare(slices, config)?;
    Ok(Inspection {
        slices: prepared.snapshots.len(),
        bounds: prepared.aggregate.bounds,
        ranked: prepared.ranking.ranked,
        highlighted: prepared.ranking.highlighted.ids().to_vec(),
        colors: prepared.ranking.colors,
    })
}
