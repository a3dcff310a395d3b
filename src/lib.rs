pub mod classify;
pub mod config;
pub mod error;
pub mod playlist;
pub mod scan;
pub mod schedule;
pub mod shows;
pub mod tasks {
    pub mod playback;
}

pub use error::Error;
