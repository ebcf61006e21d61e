use bsonfilter::cli::{self as prog_cli, Command};
use bsonfilter::config::Config;
use bsonfilter::utils::logger;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bsonfilter", version, about = "Build and check MongoDB filter documents", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). Defaults to $BSONFILTER_CONFIG or ./bsonfilter.toml")]
    config: Option<PathBuf>,
    #[arg(long, help = "Override the connection URI (takes precedence over config/env)")]
    uri: Option<String>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Parse a filter and print its canonical document as Extended JSON")]
    Render {
        #[arg(help = "Filter JSON (e.g., {\"age\": {\"$gte\": 21}}); '-' reads STDIN")]
        filter: String,
        #[arg(long, help = "Pretty-print the output")]
        pretty: bool,
    },
    #[command(about = "Validate a filter; prints ok or the first error")]
    Check {
        #[arg(help = "Filter JSON; '-' reads STDIN")]
        filter: String,
    },
    #[cfg(feature = "mongodb")]
    #[command(about = "Connect and ping the configured server")]
    Ping,
    #[cfg(feature = "mongodb")]
    #[command(about = "Find documents matching a filter; prints NDJSON to stdout")]
    Find {
        #[arg(long, help = "Database name; falls back to connection.database")]
        db: Option<String>,
        #[arg(long, help = "Collection name")]
        collection: String,
        #[arg(help = "Filter JSON; '-' reads STDIN")]
        filter: String,
        #[arg(long, help = "Projection JSON (e.g., {\"name\": 1, \"_id\": 0})")]
        projection: Option<String>,
        #[arg(long, help = "Limit results")]
        limit: Option<i64>,
    },
    #[cfg(feature = "mongodb")]
    #[command(name = "delete-ids", about = "Delete documents by hex ObjectId")]
    DeleteIds {
        #[arg(long, help = "Database name; falls back to connection.database")]
        db: Option<String>,
        #[arg(long, help = "Collection name")]
        collection: String,
        #[arg(required = true, help = "ObjectIds as 24-character hex strings")]
        ids: Vec<String>,
    },
}

fn read_filter(arg: String) -> std::io::Result<String> {
    if arg != "-" {
        return Ok(arg);
    }
    let mut s = String::new();
    std::io::stdin().read_to_string(&mut s)?;
    Ok(s)
}

fn to_command(cmd: Commands) -> std::io::Result<Command> {
    Ok(match cmd {
        Commands::Render { filter, pretty } => {
            Command::Render { filter_json: read_filter(filter)?, pretty }
        }
        Commands::Check { filter } => Command::Check { filter_json: read_filter(filter)? },
        #[cfg(feature = "mongodb")]
        Commands::Ping => Command::Ping,
        #[cfg(feature = "mongodb")]
        Commands::Find { db, collection, filter, projection, limit } => Command::Find {
            db,
            collection,
            filter_json: read_filter(filter)?,
            projection,
            limit,
        },
        #[cfg(feature = "mongodb")]
        Commands::DeleteIds { db, collection, ids } => Command::DeleteIds { db, collection, ids },
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut cfg = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    if let Some(uri) = cli.uri {
        cfg.connection.uri = uri;
    }
    if let Some(level) = cli.log_level {
        cfg.logging.level = Some(level);
    }
    if let Err(e) = logger::configure_logging(&cfg.logging) {
        eprintln!("warning: logging not configured: {e}");
    }

    let cmd = match to_command(cli.command) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = prog_cli::run(&cfg, cmd, &mut stdout).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
