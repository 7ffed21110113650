use common::ErrorLocation;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DiscoveryError {
    #[error("Hostname Error: {message} {location}")]
    Hostname {
        message: String,
        location: ErrorLocation,
    },

    #[error("Resolve Error: {message} {location}")]
    Resolve {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Socket Error: {message} {location}")]
    Socket {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
