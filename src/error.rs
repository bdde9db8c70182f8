use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Settings could not be encoded or decoded: {_0:?}")]
    SettingsEncoding(#[error(not(source))] postcard::Error),

    #[display("Settings record failed its CRC check")]
    SettingsCorrupted,
}

impl From<postcard::Error> for Error {
    fn from(err: postcard::Error) -> Self {
        Self::SettingsEncoding(err)
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
