use thiserror::Error;

use crate::query::{Band, QueryError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("No {band} sources with a positive FWHM in the search radius")]
    NoQualifyingSources { band: Band },

    #[error("No {band} source found outside the target margin")]
    NoDistinctSource { band: Band },

    #[error(transparent)]
    Query(#[from] QueryError),
}
