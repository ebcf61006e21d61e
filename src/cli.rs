use std::io::Write;

use crate::config::Config;
use crate::errors::DbError;
use crate::filter::{Expression, ParseOptions, parse_filter_json_with};

/// Programmatic form of the `bsonfilter` subcommands.
#[derive(Debug, Clone)]
pub enum Command {
    Render { filter_json: String, pretty: bool },
    Check { filter_json: String },
    #[cfg(feature = "mongodb")]
    Ping,
    #[cfg(feature = "mongodb")]
    Find {
        db: Option<String>,
        collection: String,
        filter_json: String,
        projection: Option<String>,
        limit: Option<i64>,
    },
    #[cfg(feature = "mongodb")]
    DeleteIds { db: Option<String>, collection: String, ids: Vec<String> },
}

fn parse_with_config(cfg: &Config, json: &str) -> Result<Expression, DbError> {
    let opts = ParseOptions { object_id_policy: cfg.encoding.object_id_policy };
    parse_filter_json_with(json, opts)
}

/// # Errors
/// Returns an error if the filter does not parse, output cannot be written,
/// or a database command fails.
pub async fn run(cfg: &Config, cmd: Command, out: &mut dyn Write) -> Result<(), DbError> {
    match cmd {
        Command::Render { filter_json, pretty } => {
            let expr = parse_with_config(cfg, &filter_json)?;
            let json = expr.to_relaxed_extjson();
            let text =
                if pretty { serde_json::to_string_pretty(&json)? } else { serde_json::to_string(&json)? };
            writeln!(out, "{text}")?;
            Ok(())
        }
        Command::Check { filter_json } => {
            parse_with_config(cfg, &filter_json)?;
            writeln!(out, "ok")?;
            Ok(())
        }
        #[cfg(feature = "mongodb")]
        Command::Ping => {
            let store = crate::store::Store::new(cfg.connection.clone());
            store.ping().await?;
            writeln!(out, "pong")?;
            Ok(())
        }
        #[cfg(feature = "mongodb")]
        Command::Find { db, collection, filter_json, projection, limit } => {
            let db = resolve_db(cfg, db)?;
            let expr = parse_with_config(cfg, &filter_json)?;
            let mut opts = mongodb::options::FindOptions::default();
            if let Some(p) = projection {
                let value: serde_json::Value = serde_json::from_str(&p)?;
                match bson::Bson::try_from(value)? {
                    bson::Bson::Document(d) => opts.projection = Some(d),
                    _ => return Err(DbError::Parse("projection must be an object".into())),
                }
            }
            opts.limit = limit;
            let store = crate::store::Store::new(cfg.connection.clone());
            let mut docs: Vec<bson::Document> = Vec::new();
            store.find(&db, &collection, &expr, &mut docs, Some(opts)).await?;
            for d in docs {
                let line = serde_json::to_string(&bson::Bson::Document(d).into_relaxed_extjson())?;
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        #[cfg(feature = "mongodb")]
        Command::DeleteIds { db, collection, ids } => {
            let db = resolve_db(cfg, db)?;
            let store = crate::store::Store::new(cfg.connection.clone());
            let n = store.delete_by_hex_ids(&db, &collection, &ids).await?;
            writeln!(out, "deleted={n}")?;
            Ok(())
        }
    }
}

#[cfg(feature = "mongodb")]
fn resolve_db(cfg: &Config, db: Option<String>) -> Result<String, DbError> {
    db.or_else(|| cfg.connection.database.clone())
        .ok_or_else(|| DbError::Config("no database given and none configured".into()))
}
