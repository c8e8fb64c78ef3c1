//! Order tracking / audit pipeline
//!
//! After a trade attempt (real or simulated) completes, the tracker persists
//! an audit trail to the external ledger service. Tracking is explicitly
//! non-critical: it re-derives the safety classification defensively, skips
//! the network write entirely in mock mode, and converts every transport
//! failure into an empty successful-looking record so the trade operation
//! itself can never fail because of audit plumbing.

pub mod client;

use crate::{
    context::{resolve_execution_context, ExecutionContext, RunSignals},
    credentials::{BrokerCredentials, CredentialEnvironment},
    decision::TradingMode,
    order::{OrderSnapshot, OrderType},
    Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Test-vs-production classification of one tracked order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Anything outside an active production run
    Test,
    /// Unattended run of an active workflow
    Production,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Test => write!(f, "test"),
            ExecutionMode::Production => write!(f, "production"),
        }
    }
}

/// The audit payload shipped to the ledger service.
///
/// [`TrackingRecord::default`] is the "empty record": the successful-looking
/// value returned on every skip or failure path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    /// Broker-agnostic order fields
    #[serde(flatten)]
    pub order: OrderSnapshot,
    /// Correlating workflow identifier
    #[serde(default)]
    pub workflow_id: String,
    /// Correlating execution identifier
    #[serde(default)]
    pub execution_id: String,
    /// Test-vs-production classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<ExecutionMode>,
    /// Stringified execution context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_context: Option<ExecutionContext>,
    /// Brokerage environment the order targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<CredentialEnvironment>,
    /// Resolvable user identity, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl TrackingRecord {
    /// Whether this is the empty record returned on skip/failure paths
    pub fn is_empty(&self) -> bool {
        self.workflow_id.is_empty() && self.execution_id.is_empty()
    }
}

/// The injectable network layer the tracker writes through.
///
/// [`client::TradingApiClient`] is the production implementation; tests
/// substitute doubles to assert the network stays untouched on mock paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Ship one tracking record to the ledger service.
    ///
    /// Transport failures must propagate to the caller — the tracker, not
    /// the transport, decides to swallow them.
    async fn send_order(
        &self,
        record: TrackingRecord,
        order_type: OrderType,
        base_url_override: Option<String>,
    ) -> Result<serde_json::Value>;
}

/// Compute whether tracking must run in mock mode (skip the network write).
///
/// Precedence: an explicit `Some(true)` always mocks; an explicit
/// `Some(false)` is overridden back to mock when the context is
/// [`ExecutionContext::ExecuteStep`] (the safety override cannot be disabled
/// by a caller's mistaken flag); an unset flag falls back to mocking for
/// `ExecuteStep` or a [`TradingMode::Mock`] workflow.
pub fn mock_mode_for(
    explicit_mock: Option<bool>,
    context: ExecutionContext,
    trading_mode: Option<TradingMode>,
) -> bool {
    match explicit_mock {
        Some(true) => true,
        Some(false) => context == ExecutionContext::ExecuteStep,
        None => {
            context == ExecutionContext::ExecuteStep || trading_mode == Some(TradingMode::Mock)
        }
    }
}

/// Orchestrates the audit write for one work item
pub struct OrderTracker {
    signals: RunSignals,
    transport: Arc<dyn LedgerTransport>,
}

impl OrderTracker {
    /// Create a tracker for one invocation's host signals
    pub fn new(signals: RunSignals, transport: Arc<dyn LedgerTransport>) -> Self {
        Self { signals, transport }
    }

    /// Persist the audit trail for a completed trade attempt.
    ///
    /// Never returns an error: mock mode and transport failures both yield
    /// the empty record. The workflow/execution classification is re-derived
    /// here from the tracker's own signals rather than trusting the caller's
    /// decision — a deliberate second, defense-in-depth classification.
    pub async fn track_order(
        &self,
        order: &OrderSnapshot,
        order_type: OrderType,
        credentials: &BrokerCredentials,
        context_hint: Option<ExecutionContext>,
        explicit_mock: Option<bool>,
    ) -> TrackingRecord {
        let context =
            context_hint.unwrap_or_else(|| resolve_execution_context(&self.signals));

        if mock_mode_for(explicit_mock, context, self.signals.trading_mode) {
            info!(
                workflow_id = %self.signals.workflow_id,
                context = %context,
                "Mock mode: skipping order tracking write"
            );
            return TrackingRecord::default();
        }

        let execution_mode = if context == ExecutionContext::Active {
            ExecutionMode::Production
        } else {
            ExecutionMode::Test
        };

        let record = TrackingRecord {
            order: order.clone(),
            workflow_id: self.signals.workflow_id.clone(),
            execution_id: self.signals.execution_id.clone(),
            execution_mode: Some(execution_mode),
            execution_context: Some(context),
            environment: Some(credentials.environment),
            user_id: self.signals.user_id.clone(),
        };

        debug!(
            workflow_id = %record.workflow_id,
            order_type = %order_type,
            execution_mode = %execution_mode,
            "Sending order tracking record to ledger"
        );

        match self
            .transport
            .send_order(record.clone(), order_type, None)
            .await
        {
            Ok(_) => record,
            Err(e) => {
                // Tracking is advisory: absorb the failure here so the trade
                // outcome is never affected.
                warn!(
                    workflow_id = %self.signals.workflow_id,
                    error = %e,
                    "Order tracking failed; continuing without audit record"
                );
                TrackingRecord::default()
            }
        }
    }
}
