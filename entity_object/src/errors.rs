use thiserror::Error;
use type_mapping::TypeMismatch;

#[derive(Error, Debug)]
pub enum EntityError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Argument mismatch: statement has {expected} placeholders but {actual} arguments were supplied")]
    ArgumentMismatch { expected: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error executing `{sql}`: {source}")]
    DatabaseExecution {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Type mismatch for field '{field}': {source}")]
    TypeMismatch {
        field: String,
        #[source]
        source: TypeMismatch,
    },

    #[error("Unknown field '{field}' on entity {entity}")]
    UnknownField { entity: String, field: String },
}

impl EntityError {
    pub fn schema(message: impl Into<String>) -> Self {
        EntityError::Schema(message.into())
    }

    pub fn query_execution(sql: &str, source: sqlx::Error) -> Self {
        EntityError::DatabaseExecution {
            sql: sql.to_string(),
            source,
        }
    }

    /// Pool checkout failures are connection problems, not statement failures
    pub(crate) fn checkout(source: sqlx::Error) -> Self {
        EntityError::Connection(source)
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, EntityError::Schema(_))
    }

    /// Underlying driver error, when there is one
    pub fn database_error(&self) -> Option<&sqlx::Error> {
        match self {
            EntityError::Connection(source) | EntityError::DatabaseExecution { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
