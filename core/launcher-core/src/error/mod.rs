pub mod bootstrap;
pub mod discovery;
pub mod spawn;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Discovery(#[from] discovery::DiscoveryError),

    #[error(transparent)]
    Bootstrap(#[from] bootstrap::BootstrapError),

    #[error(transparent)]
    Spawn(#[from] spawn::SpawnError),

    #[error("Console Error: {message} {location}")]
    Console {
        message: String,
        location: common::ErrorLocation,
    },
}
