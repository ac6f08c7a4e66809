//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds the damping setting, an optional node limit
//! and a statically-dispatched [`EigenSolver`]. Calling [`Pipeline::run`]
//! executes the stages in order, threading each intermediate result into the
//! next and notifying a [`PipelineObserver`] at each boundary.
//!
//! All input checks happen before the first matrix is allocated, so an
//! invalid graph or damping value never triggers partial computation.

use crate::error::RankError;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::matrix::damping::DampingBlender;
use crate::matrix::transition::transition_matrix;
use crate::pagerank::RankOutput;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_ASSEMBLE,
    STAGE_DAMPING, STAGE_EIGEN, STAGE_GRAPH, STAGE_TRANSITION,
};
use crate::pipeline::traits::{ConfiguredSolver, EigenSolver};
use crate::types::{NodeIndex, RankConfig, DEFAULT_DAMPING};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: stage container
// ============================================================================

/// The ranking pipeline: build graph, transition matrix, damping blend,
/// eigen-solve, assemble.
#[derive(Debug, Clone)]
pub struct Pipeline<S = ConfiguredSolver> {
    pub damping: f64,
    pub max_nodes: Option<usize>,
    pub solver: S,
}

impl Pipeline<ConfiguredSolver> {
    /// Build a pipeline from a resolved configuration.
    pub fn new(cfg: &RankConfig) -> Self {
        Pipeline {
            damping: cfg.damping,
            max_nodes: cfg.max_nodes,
            solver: ConfiguredSolver::from_config(cfg),
        }
    }
}

impl Default for Pipeline<ConfiguredSolver> {
    fn default() -> Self {
        Self::new(&RankConfig::default())
    }
}

impl<S: EigenSolver> Pipeline<S> {
    /// Build a pipeline around a specific solver.
    pub fn with_solver(damping: f64, solver: S) -> Self {
        Pipeline {
            damping,
            max_nodes: None,
            solver,
        }
    }

    /// Build a pipeline around a specific solver with the default damping.
    pub fn from_solver(solver: S) -> Self {
        Self::with_solver(DEFAULT_DAMPING, solver)
    }

    /// Reject graphs with more than `max_nodes` nodes.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Execute the pipeline, producing a [`RankOutput`].
    ///
    /// Stages run in order:
    /// 1. Build and validate the link graph
    /// 2. Build the transition matrix
    /// 3. Blend with the uniform jump matrix
    /// 4. Extract the dominant eigenpair
    /// 5. Assemble the ranking
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`](super::observer::NoopObserver) for zero-overhead
    /// execution.
    pub fn run<L: AsRef<[NodeIndex]>>(
        &self,
        links: &[L],
        observer: &mut impl PipelineObserver,
    ) -> Result<RankOutput, RankError> {
        let blender = DampingBlender::new(self.damping)?;
        self.solver.check_settings()?;
        if let Some(max_nodes) = self.max_nodes {
            if links.len() > max_nodes {
                return Err(RankError::TooManyNodes {
                    num_nodes: links.len(),
                    max_nodes,
                });
            }
        }

        // Stage 1: Build graph
        trace_stage!(STAGE_GRAPH);
        observer.on_stage_start(STAGE_GRAPH);
        let clock = StageClock::start();
        let graph = CsrGraph::from_builder(&GraphBuilder::from_links(links)?);
        let dangling = graph.dangling_nodes();
        #[cfg(feature = "tracing")]
        {
            if !dangling.is_empty() {
                tracing::debug!(?dangling, "dangling nodes keep only the uniform jump share");
            }
        }
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.num_nodes)
            .edges(graph.num_edges())
            .dangling(dangling.len())
            .build();
        observer.on_stage_end(STAGE_GRAPH, &report);
        observer.on_graph(&graph);

        // Stage 2: Transition matrix
        trace_stage!(STAGE_TRANSITION);
        observer.on_stage_start(STAGE_TRANSITION);
        let clock = StageClock::start();
        let transition = transition_matrix(&graph);
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_TRANSITION, &report);
        observer.on_matrix(STAGE_TRANSITION, &transition);

        // Stage 3: Damping blend
        trace_stage!(STAGE_DAMPING);
        observer.on_stage_start(STAGE_DAMPING);
        let clock = StageClock::start();
        let damped = blender.blend(&transition);
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_DAMPING, &report);
        observer.on_matrix(STAGE_DAMPING, &damped);

        // Stage 4: Dominant eigenpair
        trace_stage!(STAGE_EIGEN);
        observer.on_stage_start(STAGE_EIGEN);
        let clock = StageClock::start();
        let pair = self.solver.solve(&damped)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .iterations(pair.iterations)
            .eigenvalue(pair.eigenvalue.re)
            .residual(pair.residual)
            .build();
        observer.on_stage_end(STAGE_EIGEN, &report);
        observer.on_eigenpair(&pair);

        // Stage 5: Assemble ranking
        trace_stage!(STAGE_ASSEMBLE);
        observer.on_stage_start(STAGE_ASSEMBLE);
        let clock = StageClock::start();
        let output = RankOutput::from_eigenpair(pair);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(output.len())
            .build();
        observer.on_stage_end(STAGE_ASSEMBLE, &report);

        #[cfg(feature = "tracing")]
        tracing::info!(
            solver = self.solver.name(),
            nodes = output.len(),
            eigenvalue = output.eigenvalue,
            "ranking complete"
        );

        Ok(output)
    }
}
