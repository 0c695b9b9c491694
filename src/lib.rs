//! Render time-sliced network snapshots into foldable, paginated PNG pages.
//!
//! A run loads an ordered set of slice files, aggregates corpus-wide bounds, ranks nodes by
//! median centrality, draws background, highlight, trajectory and label layers, and pairs
//! the layers into double-height pages whose lower half is rotated 180°.
#![forbid(unsafe_code)]

pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod snapshot;
pub mod stats;
pub mod transform;

pub use foundation::color::{HexColor, parse_palette};
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{GraphfoldError, GraphfoldResult};
pub use pipeline::{Inspection, Prepared, RunOptions, RunSummary, inspect, prepare, run};
pub use render::composite::{PageLayout, PageSink, compose_page, compose_pages, page_file_name};
pub use render::config::{
    LabelStyle, LayerStyle, MappingOptions, PageGeometry, RenderConfig, TrajectoryStyle,
};
pub use render::surface::LayerImage;
pub use snapshot::load::{SliceSet, load_all, load_snapshot};
pub use snapshot::model::{Edge, Node, NodeId, NodeRef, Snapshot};
pub use stats::bounds::{Aggregate, GlobalBounds, Range, aggregate};
pub use stats::rank::{ColorTable, Highlight, RankedNode, Ranking, median, rank_and_color};
pub use stats::trajectory::{Trajectory, Waypoint, collect_trajectories};
