use thiserror::Error;

/// Fatal conditions. Anything in here aborts the console, since the registry
/// can no longer promise that memory and the backing file agree.
#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Data corruption: {message}")]
    DataCorruption { message: String },
    #[error("Unknown kind in stored data: {kind}")]
    UnknownKind { kind: String },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, HbnbError>;

// Helper conversions
impl From<std::io::Error> for HbnbError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

impl From<config::ConfigError> for HbnbError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

/// User mistakes. These are printed and the console keeps going.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complaint {
    #[error("** class name missing **")]
    ClassNameMissing,
    #[error("** class doesn't exist **")]
    ClassDoesNotExist,
    #[error("** instance id missing **")]
    InstanceIdMissing,
    #[error("** no instance found **")]
    NoInstanceFound,
    #[error("** attribute name missing **")]
    AttributeNameMissing,
    #[error("** value missing **")]
    ValueMissing,
}
