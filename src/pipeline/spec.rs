//! Ranking specification types.
//!
//! A [`RankSpec`] is the file-facing form of a [`RankConfig`]: every setting
//! is optional and unrecognized fields are captured rather than rejected, so
//! the [`super::validation::ValidationEngine`] can report all problems at once.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "damping": 0.15,
//!   "modules": { "solver": "power_iteration" },
//!   "power": { "max_iterations": 500, "threshold": 1e-10 },
//!   "runtime": { "max_nodes": 2000 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::{ValidationEngine, ValidationReport};
use crate::types::{RankConfig, SolverKind};

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

/// Top-level ranking specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Share of mass given to the uniform jump. Defaults to 0.15.
    #[serde(default)]
    pub damping: Option<f64>,

    /// Explicit module selections.
    #[serde(default)]
    pub modules: ModuleSet,

    /// Power-iteration settings.
    #[serde(default)]
    pub power: PowerSpec,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// The set of modules selected for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleSet {
    #[serde(default)]
    pub solver: Option<SolverKind>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Power-iteration settings, ignored by the dense solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerSpec {
    #[serde(default)]
    pub max_iterations: Option<usize>,

    #[serde(default)]
    pub threshold: Option<f64>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl PowerSpec {
    /// Whether any power-iteration setting was given.
    pub fn is_set(&self) -> bool {
        self.max_iterations.is_some() || self.threshold.is_some()
    }
}

/// Runtime execution limits (fail-fast guards).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of graph nodes before rejecting.
    #[serde(default)]
    pub max_nodes: Option<usize>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RankSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            damping: None,
            modules: ModuleSet::default(),
            power: PowerSpec::default(),
            runtime: RuntimeSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl RankSpec {
    /// Parse a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The solver this spec selects, defaulting to the dense solver.
    pub fn solver(&self) -> SolverKind {
        self.modules.solver.unwrap_or_default()
    }

    /// Overlay the spec's settings on the defaults without validating.
    pub fn resolve(&self) -> RankConfig {
        let defaults = RankConfig::default();
        RankConfig {
            damping: self.damping.unwrap_or(defaults.damping),
            solver: self.solver(),
            max_iterations: self.power.max_iterations.unwrap_or(defaults.max_iterations),
            threshold: self.power.threshold.unwrap_or(defaults.threshold),
            max_nodes: self.runtime.max_nodes,
        }
    }

    /// Run the default validation rules.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Validate with the default rules and resolve into a [`RankConfig`].
    ///
    /// Warnings do not block resolution; the full report is returned when
    /// any error is present.
    pub fn to_config(&self) -> Result<RankConfig, ValidationReport> {
        let report = self.validate();
        if report.has_errors() {
            return Err(report);
        }
        Ok(self.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = RankSpec::from_json(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert!(spec.damping.is_none());
        assert_eq!(spec.solver(), SolverKind::DenseEigen);
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "damping": 0.2,
            "modules": { "solver": "power_iteration" },
            "power": { "max_iterations": 500, "threshold": 1e-10 },
            "runtime": { "max_nodes": 2000 },
            "strict": true
        }"#;
        let spec = RankSpec::from_json(json).unwrap();
        assert_eq!(spec.damping, Some(0.2));
        assert_eq!(spec.modules.solver, Some(SolverKind::PowerIteration));
        assert_eq!(spec.power.max_iterations, Some(500));
        assert_eq!(spec.runtime.max_nodes, Some(2000));
        assert!(spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "modules": {
                "solver": "dense_eigen",
                "bogus_module": "xyz"
            }
        }"#;
        let spec = RankSpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.modules.unknown_fields.contains_key("bogus_module"));
    }

    #[test]
    fn test_resolve_overlays_defaults() {
        let spec = RankSpec::from_json(r#"{ "v": 1, "power": { "max_iterations": 7 } }"#).unwrap();
        let cfg = spec.resolve();

        assert_eq!(cfg.max_iterations, 7);
        assert_eq!(cfg.threshold, RankConfig::default().threshold);
        assert!((cfg.damping - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_to_config_rejects_invalid_spec() {
        let spec = RankSpec::from_json(r#"{ "v": 1, "damping": 1.5 }"#).unwrap();
        let report = spec.to_config().unwrap_err();
        assert!(report.has_errors());
    }

    #[test]
    fn test_to_config_accepts_warnings() {
        // Power settings with the dense solver only warn
        let spec = RankSpec::from_json(r#"{ "v": 1, "power": { "threshold": 1e-9 } }"#).unwrap();
        let cfg = spec.to_config().unwrap();
        assert_eq!(cfg.solver, SolverKind::DenseEigen);
    }

    #[test]
    fn test_validate_reports_warnings_without_errors() {
        let spec = RankSpec::from_json(r#"{ "v": 1, "power": { "threshold": 1e-9 } }"#).unwrap();
        let report = spec.validate();

        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
        assert!((spec.resolve().threshold - 1e-9).abs() < 1e-24);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"v":1,"modules":{"solver":"power_iteration"}}"#;
        let spec = RankSpec::from_json(json).unwrap();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["modules"]["solver"], "power_iteration");
    }
}
