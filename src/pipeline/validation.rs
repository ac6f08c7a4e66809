//! Validation engine for ranking spec files.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RankSpec`](super::spec::RankSpec) and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so users
//! see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use rapid_pagerank::pipeline::spec::RankSpec;
//! use rapid_pagerank::pipeline::validation::ValidationEngine;
//!
//! let spec = RankSpec::from_json(r#"{ "v": 1, "damping": 2.0 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! assert!(report.has_errors());
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::RankSpecError;
use super::spec::*;
use crate::types::SolverKind;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: an error or warning attached to a
/// [`RankSpecError`] that carries the code, path, message, and hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: RankSpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: RankSpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: RankSpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &RankSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &RankSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors().count();
        write!(f, "ranking spec has {count} error(s)")?;
        for err in self.errors() {
            write!(f, "\n  {err}")?;
            if let Some(hint) = &err.hint {
                write!(f, " (hint: {hint})")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`RankSpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads (e.g., in a long-lived validation engine).
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`RankSpec`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(PowerSettingsRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &RankSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version must be supported ──────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            RankSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Damping must be a probability ───────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        match spec.damping {
            Some(d) if !d.is_finite() || !(0.0..=1.0).contains(&d) => {
                vec![ValidationDiagnostic::error(
                    RankSpecError::new(
                        ErrorCode::OutOfRange,
                        "/damping",
                        format!("damping must be in [0, 1], got {d}"),
                    )
                    .with_hint("Use the uniform-jump share, e.g. 0.15"),
                )]
            }
            _ => vec![],
        }
    }
}

// ─── 3. Power-iteration settings ────────────────────────────────────────────

struct PowerSettingsRule;

impl ValidationRule for PowerSettingsRule {
    fn name(&self) -> &str {
        "power_settings"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if spec.power.max_iterations == Some(0) {
            out.push(ValidationDiagnostic::error(
                RankSpecError::new(
                    ErrorCode::LimitExceeded,
                    "/power/max_iterations",
                    "max_iterations must be greater than 0",
                )
                .with_hint("Remove max_iterations to use the default of 1000"),
            ));
        }

        if let Some(t) = spec.power.threshold {
            if !t.is_finite() || t < 0.0 {
                out.push(ValidationDiagnostic::error(
                    RankSpecError::new(
                        ErrorCode::OutOfRange,
                        "/power/threshold",
                        format!("threshold must be a finite non-negative number, got {t}"),
                    )
                    .with_hint("Use a small positive tolerance such as 1e-12"),
                ));
            }
        }

        if spec.power.is_set() && spec.solver() != SolverKind::PowerIteration {
            out.push(ValidationDiagnostic::warning(
                RankSpecError::new(
                    ErrorCode::InvalidCombo,
                    "/power",
                    format!(
                        "power settings are ignored by the {} solver",
                        spec.solver().as_str()
                    ),
                )
                .with_hint("Set modules.solver to \"power_iteration\" or drop the power block"),
            ));
        }

        out
    }
}

// ─── 4. Runtime limits must be positive when set ────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        if spec.runtime.max_nodes == Some(0) {
            vec![ValidationDiagnostic::error(
                RankSpecError::new(
                    ErrorCode::LimitExceeded,
                    "/runtime/max_nodes",
                    "max_nodes must be greater than 0",
                )
                .with_hint("Remove max_nodes to disable the limit, or set it to a positive value"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from a `HashMap` of extra fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = unknowns.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    RankSpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/modules",
            &spec.modules.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/power",
            &spec.power.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/runtime",
            &spec.runtime.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
