use thiserror::Error;

/// Library error type for reception-tv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A playlist with no videos was built or advanced.
    ///
    /// Discovery never yields an empty show, so hitting this means an
    /// upstream invariant was broken.
    #[error("playlist for show {0:?} has no videos")]
    EmptyPlaylist(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
