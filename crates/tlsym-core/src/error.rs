use thiserror::Error;

pub type TlsymResult<T> = Result<T, TlsymError>;

#[derive(Debug, Error)]
pub enum TlsymError {
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
