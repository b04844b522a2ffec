use thiserror::Error;

use crate::query::{Band, QueryError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown catalog mode: {0} (mode must be in [coadd, visit])")]
    UnknownMode(String),

    #[error("No {band} sources found")]
    NoSources { band: Band },

    #[error(transparent)]
    Query(#[from] QueryError),
}
