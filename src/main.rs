//! Entry point. Wires CLI input -> validation -> FeeEngine -> report.

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::{fs, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trade_calc::parser::parse_target;
use trade_calc::report::Report;
use trade_calc::{AppConfig, FeeEngine, Mode, RawTradeInput, Side, TradeRequest};

#[derive(Debug, Parser)]
#[command(
    name = "trade-calc",
    version,
    about = "Quantity, exit price, charges and net P&L for an intraday or delivery trade"
)]
struct Args {
    /// buy or sell
    #[arg(long, default_value = "buy")]
    side: Side,

    /// intraday or delivery
    #[arg(long, default_value = "intraday")]
    mode: Mode,

    /// Capital in ₹
    #[arg(long, default_value = "10000")]
    capital: Decimal,

    /// Entry price in ₹
    #[arg(long, required_unless_present = "input")]
    entry: Option<Decimal>,

    /// t1 | t2 | t3 | tsl | sl | signed percent such as -2.5 or custom:4
    #[arg(long, default_value = "t1", allow_hyphen_values = true)]
    target: String,

    /// Read the trade from a JSON file ({side, mode, capital, entry_price, target})
    #[arg(long, conflicts_with = "entry")]
    input: Option<PathBuf>,

    /// Path to config.yaml (overrides $TRADE_CALC_CONFIG and the default lookup)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also compute every preset target
    #[arg(long)]
    ladder: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let (cfg, cfg_path) = AppConfig::discover(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cfg_path {
        Some(p) => info!("Config loaded from {}", p.display()),
        None => info!("No config file found, using built-in rates"),
    }
    debug!("Rates: {:?}", cfg.rates);

    let req = build_request(&args)?;
    cfg.input.check(&req)?;

    let engine = FeeEngine::new(cfg.rates);
    let report = Report::build(&engine, &req, args.ladder);
    info!(
        "{} {} qty={} net={}",
        req.side(),
        req.mode(),
        report.result.quantity,
        report.result.net_pnl
    );

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn build_request(args: &Args) -> anyhow::Result<TradeRequest> {
    if let Some(path) = &args.input {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading trade input {}", path.display()))?;
        let raw: RawTradeInput = serde_json::from_str(&s)
            .with_context(|| format!("parsing trade input {}", path.display()))?;
        return Ok(raw.validate()?);
    }
    let Some(entry) = args.entry else {
        anyhow::bail!("enter a valid entry price (--entry)");
    };
    let target = parse_target(&args.target)?;
    Ok(TradeRequest::new(args.side, args.mode, args.capital, entry, target)?)
}
