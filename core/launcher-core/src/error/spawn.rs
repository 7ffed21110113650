use common::ErrorLocation;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SpawnError {
    #[error("Spawn Error: {service}: {message} {location}")]
    Spawn {
        service: String,
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Terminate Error: {service}: {message} {location}")]
    Terminate {
        service: String,
        message: String,
        location: ErrorLocation,
    },
}
