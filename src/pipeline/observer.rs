//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! matrices for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::csr::CsrGraph;
use crate::matrix::RankMatrix;
use crate::pagerank::DominantEigenpair;

pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_TRANSITION: &str = "transition";
pub const STAGE_DAMPING: &str = "damping";
pub const STAGE_EIGEN: &str = "eigen";
pub const STAGE_ASSEMBLE: &str = "assemble";

/// All stages, in execution order.
pub const STAGES: [&str; 5] = [
    STAGE_GRAPH,
    STAGE_TRANSITION,
    STAGE_DAMPING,
    STAGE_EIGEN,
    STAGE_ASSEMBLE,
];

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What happened during one stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    /// Nodes without outgoing links
    pub dangling: Option<usize>,
    pub iterations: Option<usize>,
    pub eigenvalue: Option<f64>,
    pub residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Fluent construction for reports with stage-specific details.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn dangling(mut self, dangling: usize) -> Self {
        self.report.dangling = Some(dangling);
        self
    }

    pub fn iterations(mut self, iterations: Option<usize>) -> Self {
        self.report.iterations = iterations;
        self
    }

    pub fn eigenvalue(mut self, eigenvalue: f64) -> Self {
        self.report.eigenvalue = Some(eigenvalue);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks fired by [`super::runner::Pipeline::run`].
///
/// Every method has an empty default, so observers implement only what they
/// need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_graph(&mut self, _graph: &CsrGraph) {}

    /// Called with the transition matrix, then with the damped matrix.
    fn on_matrix(&mut self, _stage: &'static str, _matrix: &RankMatrix) {}

    fn on_eigenpair(&mut self, _pair: &DominantEigenpair) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records the report of every completed stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    pub reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for `stage`, if it ran.
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder_sets_fields() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(8)
            .dangling(1)
            .iterations(Some(12))
            .eigenvalue(1.0)
            .residual(1e-14)
            .build();

        assert_eq!(report.elapsed, Duration::from_millis(3));
        assert_eq!(report.nodes, Some(4));
        assert_eq!(report.edges, Some(8));
        assert_eq!(report.dangling, Some(1));
        assert_eq!(report.iterations, Some(12));
        assert_eq!(report.eigenvalue, Some(1.0));
    }

    #[test]
    fn test_timing_observer_collects_reports() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_EIGEN, &StageReport::new(Duration::from_millis(2)));

        assert_eq!(obs.reports.len(), 2);
        assert!(obs.report(STAGE_EIGEN).is_some());
        assert!(obs.report(STAGE_DAMPING).is_none());
        assert_eq!(obs.total(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
