use std::result;

use serenity::prelude::SerenityError;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("You already have an open application ticket!")]
    DuplicateTicket,
    #[error("Failed to create application channel. Please try again later.")]
    ChannelCreationFailed,
    #[error("You don't have permission to use this command.")]
    MissingPermission,
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    SerenityError(String),
}

impl From<SerenityError> for Error {
    fn from(err: SerenityError) -> Error {
        let description = err.to_string();
        Error::SerenityError(description)
    }
}
