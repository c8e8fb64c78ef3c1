//! Execution-context classification
//!
//! Classifies *how* the current node invocation was triggered: single-stepped
//! in the editor, manually run while the workflow is inactive, or running
//! unattended in production. The classification is derived fresh per work
//! item from a typed snapshot of host signals and is never persisted.

use serde::{Deserialize, Serialize};

/// How the current node invocation was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionContext {
    /// The user explicitly single-stepped this node in the editor
    ExecuteStep,
    /// Manual full run while the workflow is inactive
    ManualInactive,
    /// Unattended production run of an active workflow
    Active,
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionContext::ExecuteStep => write!(f, "execute-step"),
            ExecutionContext::ManualInactive => write!(f, "manual-inactive"),
            ExecutionContext::Active => write!(f, "active"),
        }
    }
}

/// The host's declared run mode for the current execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Interactive/manual run started by a user
    Manual,
    /// Any non-interactive trigger (schedule, webhook, event)
    Trigger,
}

/// Typed, read-only snapshot of the host environment for one invocation.
///
/// All host signals enter the core through this struct; the core never
/// reaches into host-engine internals. Optional fields model signals the
/// host may not populate — resolution must still succeed without them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSignals {
    /// Workflow identifier
    pub workflow_id: String,
    /// Whether the workflow is flagged active (production)
    pub workflow_active: bool,
    /// Execution identifier for this run
    pub execution_id: String,
    /// Name of the node currently executing
    pub node_name: String,
    /// The node the user explicitly asked to execute, if single-stepping
    pub destination_node: Option<String>,
    /// Declared run mode, if the host populated it
    pub run_mode: Option<RunMode>,
    /// Resolvable user identity, if any
    pub user_id: Option<String>,
    /// Per-workflow trading mode setting, if configured
    pub trading_mode: Option<crate::decision::TradingMode>,
}

/// Classify the current invocation from host signals.
///
/// Ordered rules, first match wins:
/// 1. Destination node equals the current node and the run is manual →
///    [`ExecutionContext::ExecuteStep`], even if the workflow is active.
/// 2. Manual run of an inactive workflow → [`ExecutionContext::ManualInactive`].
/// 3. Workflow active → [`ExecutionContext::Active`].
/// 4. Anything else (including missing signals) →
///    [`ExecutionContext::ManualInactive`], the fail-safe default.
///
/// Total and deterministic: performs no I/O and never panics.
pub fn resolve_execution_context(signals: &RunSignals) -> ExecutionContext {
    let is_manual = matches!(signals.run_mode, Some(RunMode::Manual));

    let is_single_step = is_manual
        && signals
            .destination_node
            .as_deref()
            .is_some_and(|dest| !dest.is_empty() && dest == signals.node_name);

    if is_single_step {
        // An explicit single-step request wins even on an active workflow
        ExecutionContext::ExecuteStep
    } else if is_manual && !signals.workflow_active {
        ExecutionContext::ManualInactive
    } else if signals.workflow_active {
        ExecutionContext::Active
    } else {
        ExecutionContext::ManualInactive
    }
}
