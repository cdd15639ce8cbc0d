//! Progress reporting for step-by-step visualization
//!
//! The pipeline runs synchronously; a sink only observes it. Callers
//! that want to animate generation implement [`ProgressSink`] and
//! receive stage transitions and line events as they happen. The
//! default [`NullSink`] ignores everything.

use crate::geometry::Vertex;

/// Pipeline stages, reported in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Placement,
    Triangulation,
    SpanningTree,
    Carving,
    Smoothing,
    Tiling,
}

/// What a reported line segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Triangulation,
    SpanningTree,
}

/// Line-drawing sink injected into the pipeline.
pub trait ProgressSink {
    /// A new stage is starting.
    fn stage(&mut self, _stage: Stage) {}

    /// A line segment was produced (triangulation edge, tree edge).
    fn line(&mut self, _from: Vertex, _to: Vertex, _kind: LineKind) {}
}

/// Sink that discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {}
