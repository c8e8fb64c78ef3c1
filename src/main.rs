use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trade_gate::{
    config::GateConfig,
    context::{resolve_execution_context, RunMode, RunSignals},
    decision::{decide, NodeCapability, TradeOperation, TradingMode},
    log_gate_decision,
    utils::logger,
    GateError, Result,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "trade-gate")]
#[command(about = "Trade execution safety gate for workflow nodes")]
#[command(version)]
struct Cli {
    /// Configuration file path (environment variables apply without one)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file path
    #[arg(long, default_value = "logs/trade-gate.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the gate for a set of host signals
    Decide {
        /// Workflow identifier
        #[arg(long)]
        workflow_id: String,

        /// Whether the workflow is flagged active
        #[arg(long)]
        active: bool,

        /// Execution identifier
        #[arg(long, default_value = "manual")]
        execution_id: String,

        /// Name of the node being evaluated
        #[arg(long)]
        node: String,

        /// Destination node of the run, if single-stepping
        #[arg(long)]
        destination_node: Option<String>,

        /// The run was started manually
        #[arg(long)]
        manual: bool,

        /// Workflow trading mode (mock|paper)
        #[arg(long)]
        trading_mode: Option<String>,

        /// Operation the node is about to perform
        #[arg(long, default_value = "place-order")]
        operation: String,

        /// Resolvable user identity, if any
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Validate configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    logger::init(&cli.log_level, &cli.log_file)?;

    info!("Starting trade-gate v{}", trade_gate::VERSION);

    let config = match &cli.config {
        Some(path) => {
            let config = GateConfig::from_file(path)?;
            info!("Configuration loaded from: {}", path.display());
            config
        }
        None => GateConfig::from_env(),
    };

    match cli.command {
        Commands::Decide {
            workflow_id,
            active,
            execution_id,
            node,
            destination_node,
            manual,
            trading_mode,
            operation,
            user_id,
        } => {
            run_decide(
                workflow_id,
                active,
                execution_id,
                node,
                destination_node,
                manual,
                trading_mode,
                operation,
                user_id,
            )
            .await
        }
        Commands::Validate => validate_config(config).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_decide(
    workflow_id: String,
    active: bool,
    execution_id: String,
    node: String,
    destination_node: Option<String>,
    manual: bool,
    trading_mode: Option<String>,
    operation: String,
    user_id: Option<String>,
) -> Result<()> {
    let trading_mode = trading_mode
        .map(|mode| mode.parse::<TradingMode>())
        .transpose()?;

    let signals = RunSignals {
        workflow_id,
        workflow_active: active,
        execution_id,
        node_name: node,
        destination_node,
        run_mode: Some(if manual { RunMode::Manual } else { RunMode::Trigger }),
        user_id,
        trading_mode,
    };

    let context = resolve_execution_context(&signals);
    let decision = decide(
        NodeCapability::TradeProducing,
        parse_operation(&operation)?,
        context,
        signals.trading_mode,
    )?;

    log_gate_decision!(info, signals.workflow_id, context, decision, "Gate evaluated");

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "context": context,
            "decision": decision,
        }))?
    );

    Ok(())
}

fn parse_operation(operation: &str) -> Result<TradeOperation> {
    let parsed = match operation {
        "place-order" => TradeOperation::PlaceOrder,
        "cancel-order" => TradeOperation::CancelOrder,
        "modify-order" => TradeOperation::ModifyOrder,
        "get-account" => TradeOperation::GetAccount,
        "get-positions" => TradeOperation::GetPositions,
        "get-quote" => TradeOperation::GetQuote,
        other => {
            return Err(GateError::DataParsing(format!("Unknown operation: {}", other)).into())
        }
    };
    Ok(parsed)
}

async fn validate_config(config: GateConfig) -> Result<()> {
    info!("Validating configuration...");

    match config.validate() {
        Ok(_) => {
            info!("Configuration is valid");
            println!("Configuration validation passed!");
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
