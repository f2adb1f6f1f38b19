//! Simulation errors

use formica_trail::TrailError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Trail(#[from] TrailError),

    #[error("interaction budget must be at least 1")]
    ZeroBudget,

    #[error("unknown primitive `{0}`")]
    UnknownPrimitive(String),
}
