use thiserror::Error;

use crate::config::ConfigError;
use crate::encode::EncodeError;
use crate::save::SaveError;

#[derive(Debug, Error)]
pub enum QrgenError {
    #[error("missing required argument: --url")]
    MissingArgument,

    #[error("invalid URL {0:?}: expected http(s) with a host, e.g. https://example.com")]
    InvalidUrl(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Save(#[from] SaveError),
}
