//! Trading decision engine
//!
//! Combines the resolved [`ExecutionContext`], the per-workflow
//! [`TradingMode`], and whether the current operation is trade-producing into
//! a single [`ExecutionDecision`]. The engine is pure: identical inputs
//! always produce an identical decision, and the only error it can raise is
//! the fail-closed configuration error for a missing trading mode.

use crate::{context::ExecutionContext, GateError};
use serde::{Deserialize, Serialize};

/// Per-workflow trading mode, set by the workflow owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    /// Simulate trades entirely; no brokerage call is made
    Mock,
    /// Execute against a paper/sandbox brokerage account
    Paper,
}

impl std::fmt::Display for TradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradingMode::Mock => write!(f, "mock"),
            TradingMode::Paper => write!(f, "paper"),
        }
    }
}

impl std::str::FromStr for TradingMode {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(TradingMode::Mock),
            "paper" => Ok(TradingMode::Paper),
            other => Err(GateError::DataParsing(format!(
                "Unknown trading mode: {}",
                other
            ))),
        }
    }
}

/// Typed capability of the executing node type.
///
/// Checked at construction of the calling node, not via runtime string
/// membership tests on loosely-typed metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeCapability {
    /// This node type can place, cancel, or modify orders
    TradeProducing,
    /// This node type only reads account/market state
    ReadOnly,
}

/// The operation the node is about to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradeOperation {
    /// Place a new order
    PlaceOrder,
    /// Cancel an existing order
    CancelOrder,
    /// Modify an existing order
    ModifyOrder,
    /// Read account state
    GetAccount,
    /// Read open positions
    GetPositions,
    /// Read a quote
    GetQuote,
}

impl TradeOperation {
    /// Whether this operation produces or alters orders
    pub fn is_trade_producing(&self) -> bool {
        matches!(
            self,
            TradeOperation::PlaceOrder | TradeOperation::CancelOrder | TradeOperation::ModifyOrder
        )
    }
}

/// The gate's verdict for one work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDecision {
    /// The execution context the decision was made under
    pub context: ExecutionContext,
    /// Fabricate a mock response instead of calling any brokerage
    pub should_mock: bool,
    /// Downgrade the credential bundle to the paper environment
    pub force_paper_trading: bool,
    /// Perform the real brokerage call (live or paper per credentials)
    pub execute_real_trade: bool,
}

impl ExecutionDecision {
    /// Build a decision, enforcing the mock-xor-real invariant.
    fn gated(
        context: ExecutionContext,
        should_mock: bool,
        force_paper_trading: bool,
    ) -> Self {
        let decision = Self {
            context,
            should_mock,
            force_paper_trading,
            execute_real_trade: !should_mock,
        };
        debug_assert!(decision.should_mock ^ decision.execute_real_trade);
        decision
    }

    /// Permissive decision for operations the gate does not cover
    fn permissive(context: ExecutionContext) -> Self {
        Self {
            context,
            should_mock: false,
            force_paper_trading: false,
            execute_real_trade: true,
        }
    }
}

/// Decide how a trade may execute in the current context.
///
/// Non-trade operations and read-only node types are never gated. For
/// trade-producing operations on a trade-capable node the canonical table
/// applies:
///
/// - `ExecuteStep` always mocks and forces paper, regardless of mode.
/// - `ManualInactive` mocks under [`TradingMode::Mock`]; under
///   [`TradingMode::Paper`] it executes for real but forces the paper
///   environment.
/// - `Active` mocks under [`TradingMode::Mock`]; under
///   [`TradingMode::Paper`] it executes for real against the credential
///   bundle's own environment (production runs honor the configured
///   credentials; the mode toggle gates only non-production contexts).
///
/// A missing trading mode on a trade-capable workflow is a configuration
/// error and fails closed.
pub fn decide(
    capability: NodeCapability,
    operation: TradeOperation,
    context: ExecutionContext,
    mode: Option<TradingMode>,
) -> Result<ExecutionDecision, GateError> {
    if capability == NodeCapability::ReadOnly || !operation.is_trade_producing() {
        return Ok(ExecutionDecision::permissive(context));
    }

    // Fail closed: defaulting to live risks money, defaulting to mock hides
    // the configuration bug from the operator.
    let mode = mode.ok_or_else(|| {
        GateError::Config(
            "Trading mode is not configured for a trade-capable workflow".to_string(),
        )
    })?;

    let decision = match (context, mode) {
        (ExecutionContext::ExecuteStep, _) => ExecutionDecision::gated(context, true, true),
        (ExecutionContext::ManualInactive, TradingMode::Mock) => {
            ExecutionDecision::gated(context, true, true)
        }
        (ExecutionContext::ManualInactive, TradingMode::Paper) => {
            ExecutionDecision::gated(context, false, true)
        }
        (ExecutionContext::Active, TradingMode::Mock) => {
            ExecutionDecision::gated(context, true, true)
        }
        (ExecutionContext::Active, TradingMode::Paper) => {
            ExecutionDecision::gated(context, false, false)
        }
    };

    Ok(decision)
}
