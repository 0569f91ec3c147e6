use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("cannot parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },
    #[error("malformed epoch: {0:?}")]
    MalformedEpoch(String),
    #[error("operation requires at least one state vector")]
    EmptyInput,
    #[error("invalid range: offset {offset}, limit {limit}")]
    InvalidRange { offset: i64, limit: i64 },
    #[error("epoch not found: {0}")]
    NotFound(String),
    #[error("clock skew {skew} moves {instant} out of the representable range")]
    SkewOverflow { instant: String, skew: String },
}
