use thiserror::Error;

use crate::FlagType;

/// Everything that can go wrong during registration or parsing.
///
/// Registration failures (`DuplicateFlag`, `DuplicateSubcommand`,
/// `ZeroCapacity`, `CapacityExhausted`) are reported before any parsing
/// begins; the rest are parse failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate flag name: `{0}`")]
    DuplicateFlag(String),

    #[error("duplicate subcommand name: `{0}`")]
    DuplicateSubcommand(String),

    #[error("subcommand `{0}` needs a flag capacity greater than zero")]
    ZeroCapacity(String),

    #[error("no room for flag `{flag}`: subcommand `{cmd}` is capped at {capacity} flags")]
    CapacityExhausted { cmd: String, flag: String, capacity: usize },

    #[error("invalid {ty} value for flag `{flag}`: `{token}`")]
    InvalidValue { flag: String, ty: FlagType, token: String },

    #[error("{ty} overflow for flag `{flag}`: `{token}`")]
    Overflow { flag: String, ty: FlagType, token: String },

    #[error("expected a value for `{0}`")]
    MissingValue(String),

    #[error("{0}")]
    Rejected(String),

    #[error("flag is required: `{0}`")]
    MissingRequired(String),
}
