use thiserror::Error;

/// Fatal integration errors raised while constructing stage components.
///
/// These are programming/configuration bugs rather than runtime conditions,
/// so construction does not complete when one is returned.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("missing stage element ({0})")]
    MissingStage(String),

    #[error("zones file has no design space (meta block)")]
    MissingDesignSpace,

    #[error("invalid design space: {width}x{height}")]
    InvalidDesignSpace { width: f64, height: f64 },

    #[error("duplicate zone id: {0}")]
    DuplicateZone(String),

    #[error("no parallax layer matched any of: {0}")]
    NoLayers(String),

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StageError>;
