//! Integration tests for the order tracker's audit pipeline

use crate::integration::{RecordingTransport, TestUtils};
use std::io;
use std::sync::{Arc, Mutex};
use trade_gate::{
    tracking::ExecutionMode, CredentialEnvironment, ExecutionContext, OrderTracker, OrderType,
    TradingMode,
};

/// In-memory log sink for asserting on emitted tracing events
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_explicit_mock_flag_never_touches_the_network() {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = OrderTracker::new(
        TestUtils::active_signals(Some(TradingMode::Paper)),
        transport.clone(),
    );

    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            Some(ExecutionContext::Active),
            Some(true),
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_explicit_false_is_overridden_for_execute_step() {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = OrderTracker::new(
        TestUtils::execute_step_signals(Some(TradingMode::Paper)),
        transport.clone(),
    );

    // The caller wrongly claims this is not a mock run; the safety override
    // must win because the node is being single-stepped.
    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            None,
            Some(false),
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_scenario_b_manual_inactive_mock_mode_skips_network() {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = OrderTracker::new(
        TestUtils::manual_inactive_signals(Some(TradingMode::Mock)),
        transport.clone(),
    );

    let record = tracker
        .track_order(
            &TestUtils::market_order("BTCUSD"),
            OrderType::Crypto,
            &TestUtils::live_credentials(),
            None,
            None,
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_scenario_d_unset_flag_with_mock_workflow_returns_empty() {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = OrderTracker::new(
        TestUtils::active_signals(Some(TradingMode::Mock)),
        transport.clone(),
    );

    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let record = tracker
        .track_order(
            &TestUtils::market_order("NVDA"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            None,
            None,
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 0);

    // The skip is announced at info level with the workflow correlation
    let captured = logs.contents();
    assert!(captured.contains("skipping order tracking write"));
    assert!(captured.contains("wf-integration"));
}

#[tokio::test]
async fn test_real_path_records_paper_environment() {
    let transport = Arc::new(RecordingTransport::new());
    let signals = TestUtils::manual_inactive_signals(Some(TradingMode::Paper));
    let tracker = OrderTracker::new(signals.clone(), transport.clone());

    let credentials = trade_gate::force_paper_trading_credentials(&TestUtils::live_credentials());

    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &credentials,
            None,
            None,
        )
        .await;

    assert!(!record.is_empty());
    assert_eq!(transport.call_count(), 1);

    let sent = transport.last_record().unwrap();
    assert_eq!(sent.environment, Some(CredentialEnvironment::Paper));
    assert_eq!(sent.execution_mode, Some(ExecutionMode::Test));
    assert_eq!(sent.execution_context, Some(ExecutionContext::ManualInactive));
    assert_eq!(sent.workflow_id, signals.workflow_id);
    assert_eq!(sent.execution_id, signals.execution_id);
    assert_eq!(sent.user_id, signals.user_id);
}

#[tokio::test]
async fn test_active_run_is_tracked_as_production() {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = OrderTracker::new(
        TestUtils::active_signals(Some(TradingMode::Paper)),
        transport.clone(),
    );

    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            None,
            None,
        )
        .await;

    assert_eq!(record.execution_mode, Some(ExecutionMode::Production));
    assert_eq!(record.environment, Some(CredentialEnvironment::Live));
}

#[tokio::test]
async fn test_ledger_outage_never_fails_the_caller() {
    let transport = Arc::new(RecordingTransport::failing());
    let tracker = OrderTracker::new(
        TestUtils::manual_inactive_signals(Some(TradingMode::Paper)),
        transport.clone(),
    );

    // track_order is infallible by contract: an outage produces the empty
    // record, not an error.
    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            None,
            None,
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_tracker_rederives_context_when_hint_is_absent() {
    let transport = Arc::new(RecordingTransport::new());

    // Signals describe a single-step run; no hint is passed, so the tracker
    // must classify the run itself and skip the write.
    let tracker = OrderTracker::new(
        TestUtils::execute_step_signals(Some(TradingMode::Paper)),
        transport.clone(),
    );

    let record = tracker
        .track_order(
            &TestUtils::market_order("AAPL"),
            OrderType::Stock,
            &TestUtils::live_credentials(),
            None,
            None,
        )
        .await;

    assert!(record.is_empty());
    assert_eq!(transport.call_count(), 0);
}
