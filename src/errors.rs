use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extended JSON: {0}")]
    ExtJson(#[from] bson::extjson::de::Error),

    #[error("Filter parse error: {0}")]
    Parse(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Operator {op} requires an orderable value, got {kind}")]
    NotOrderable { op: &'static str, kind: String },

    #[error("Invalid ObjectId: {0}")]
    InvalidObjectId(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[cfg(feature = "mongodb")]
    #[error("MongoDB: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
