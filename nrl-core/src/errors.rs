use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region on line {line}: {reason}")]
    RegionParseError { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
