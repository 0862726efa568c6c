use std::path::PathBuf;

use thiserror::Error;

use crate::messages::Pool;

#[derive(Error, Debug)]
pub enum DialerError {
    #[error("reference asset not found: {0}")]
    MissingAsset(String),

    #[error("reference asset is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("failed to read reference data from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference data: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("the popular country group is empty; there is no default country")]
    NoDefaultCountry,

    #[error("country `{0}` must require at least one digit")]
    ZeroDigits(String),

    #[error("country `{name}` has an invalid calling code `{code}`")]
    InvalidCallingCode { name: String, code: String },

    #[error("country `{0}` is listed more than once")]
    DuplicateCountry(String),

    #[error("the {0} pool has no messages")]
    EmptyPool(Pool),

    #[error("unknown country: {0}")]
    UnknownCountry(String),
}

pub type DialerResult<T> = Result<T, DialerError>;
