use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tradewinds::{SkillConfig, ToolOutput, TradeTools, db};

/// Tradewinds - galactic trade knowledge base for AI voice assistants
#[derive(Parser)]
#[command(name = "tradewinds", version, about)]
struct Cli {
    /// Path to the skill configuration file (TOML)
    #[arg(short, long, env = "TRADEWINDS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database path from the configuration
    #[arg(long, env = "TRADEWINDS_DB")]
    db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize (or recreate) the knowledge base schema
    Init,
    /// Print the tool definitions exposed to the LLM channel
    Tools,
    /// Look up commodities
    Commodity {
        /// Commodity names or codes to match
        #[arg(short, long)]
        name: Vec<String>,
        /// Only sellable commodities
        #[arg(long)]
        sellable: bool,
        /// Only buyable commodities
        #[arg(long)]
        buyable: bool,
        /// Only commodities traded at these locations
        #[arg(short, long)]
        location: Vec<String>,
        /// Order by implied profit, best first
        #[arg(long)]
        by_profit: bool,
    },
    /// Look up items
    Item {
        /// Item names to match
        #[arg(short, long)]
        name: Vec<String>,
        /// Category name to match
        #[arg(long)]
        category: Option<String>,
    },
    /// Find profitable routes for a commodity
    Route {
        /// Commodity name
        commodity: String,
        /// Restrict buying to this location
        #[arg(long)]
        from: Option<String>,
        /// Maximum number of routes
        #[arg(long)]
        max: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,tradewinds=info",
        1 => "info,tradewinds=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SkillConfig::load_or_default(cli.config.as_deref())?;
    if let Some(db_path) = cli.db {
        config.database_path = db_path;
    }

    if matches!(cli.command, Command::Tools) {
        println!("{}", serde_json::to_string_pretty(&TradeTools::tool_definitions())?);
        return Ok(());
    }

    let pool = db::init(&config.database_path)?;

    match cli.command {
        Command::Init => {
            // db::init already ran the schema gate
            println!("database ready at {}", config.database_path.display());
            Ok(())
        }
        Command::Tools => unreachable!("handled above"),
        Command::Commodity {
            name,
            sellable,
            buyable,
            location,
            by_profit,
        } => {
            let mut args = serde_json::json!({
                "names": name,
                "locations": location,
                "sort_by_profit": by_profit,
            });
            if sellable {
                args["is_sellable"] = serde_json::Value::Bool(true);
            }
            if buyable {
                args["is_buyable"] = serde_json::Value::Bool(true);
            }
            invoke(&pool, &config, "trade_commodity_info", &args)
        }
        Command::Item { name, category } => {
            let mut args = serde_json::json!({ "names": name });
            if let Some(category) = category {
                args["category"] = serde_json::Value::String(category);
            }
            invoke(&pool, &config, "trade_item_info", &args)
        }
        Command::Route {
            commodity,
            from,
            max,
        } => {
            let mut args = serde_json::json!({ "commodity": commodity });
            if let Some(from) = from {
                args["from_location"] = serde_json::Value::String(from);
            }
            if let Some(max) = max {
                args["max_routes"] = serde_json::Value::Number(max.into());
            }
            invoke(&pool, &config, "trade_route_info", &args)
        }
    }
}

fn invoke(
    pool: &db::DbPool,
    config: &SkillConfig,
    tool: &str,
    args: &serde_json::Value,
) -> anyhow::Result<()> {
    let tools = TradeTools::new(pool.clone(), config.tools.clone());
    let ToolOutput { payload, notes } = tools.execute(tool, &args.to_string())?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    for note in notes {
        eprintln!("note: {note}");
    }
    Ok(())
}
