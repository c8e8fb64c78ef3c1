//! Integration tests for the trade execution safety gate

pub mod test_order_tracker;

use async_trait::async_trait;
use std::sync::Mutex;
use trade_gate::{
    BrokerCredentials, CredentialEnvironment, LedgerTransport, OrderSnapshot, OrderSide,
    OrderType, Result, RunMode, RunSignals, TradingMode, TrackingRecord,
};

/// Test utilities for integration tests
pub struct TestUtils;

impl TestUtils {
    /// Host signals for a manual run of an inactive workflow
    pub fn manual_inactive_signals(mode: Option<TradingMode>) -> RunSignals {
        RunSignals {
            workflow_id: "wf-integration".to_string(),
            workflow_active: false,
            execution_id: "exec-1".to_string(),
            node_name: "place-order".to_string(),
            destination_node: None,
            run_mode: Some(RunMode::Manual),
            user_id: Some("user-1".to_string()),
            trading_mode: mode,
        }
    }

    /// Host signals for a single-stepped node
    pub fn execute_step_signals(mode: Option<TradingMode>) -> RunSignals {
        let mut signals = Self::manual_inactive_signals(mode);
        signals.destination_node = Some(signals.node_name.clone());
        signals
    }

    /// Host signals for an active production run
    pub fn active_signals(mode: Option<TradingMode>) -> RunSignals {
        let mut signals = Self::manual_inactive_signals(mode);
        signals.workflow_active = true;
        signals.run_mode = Some(RunMode::Trigger);
        signals
    }

    /// A live-environment credential bundle
    pub fn live_credentials() -> BrokerCredentials {
        BrokerCredentials {
            environment: CredentialEnvironment::Live,
            api_key: "broker-key".to_string(),
            api_secret: "broker-secret".to_string(),
            account_id: Some("acct-1".to_string()),
        }
    }

    /// A partially-populated market-style order
    pub fn market_order(symbol: &str) -> OrderSnapshot {
        OrderSnapshot {
            symbol: symbol.to_string(),
            side: Some(OrderSide::Buy),
            quantity: Some(2.0),
            ..Default::default()
        }
    }
}

/// Ledger transport double that records calls instead of touching a network
pub struct RecordingTransport {
    calls: Mutex<Vec<(TrackingRecord, OrderType)>>,
    fail: bool,
}

impl RecordingTransport {
    /// Transport that accepts every write
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Transport that fails every write
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of writes attempted through this transport
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent record written, if any
    pub fn last_record(&self) -> Option<TrackingRecord> {
        self.calls.lock().unwrap().last().map(|(r, _)| r.clone())
    }
}

#[async_trait]
impl LedgerTransport for RecordingTransport {
    async fn send_order(
        &self,
        record: TrackingRecord,
        order_type: OrderType,
        _base_url_override: Option<String>,
    ) -> Result<serde_json::Value> {
        self.calls.lock().unwrap().push((record, order_type));
        if self.fail {
            anyhow::bail!("simulated ledger outage");
        }
        Ok(serde_json::json!({ "accepted": true }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_transport_counts_calls() {
        let transport = RecordingTransport::new();
        assert_eq!(transport.call_count(), 0);

        transport
            .send_order(TrackingRecord::default(), OrderType::Stock, None)
            .await
            .unwrap();

        assert_eq!(transport.call_count(), 1);
        assert!(transport.last_record().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_transport_still_records() {
        let transport = RecordingTransport::failing();
        let result = transport
            .send_order(TrackingRecord::default(), OrderType::Crypto, None)
            .await;

        assert!(result.is_err());
        assert_eq!(transport.call_count(), 1);
    }
}
