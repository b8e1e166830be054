pub mod algorithm;
pub mod config;
pub mod error;

pub use algorithm::{Algorithm, Mode};
pub use config::TlsymConfig;
pub use error::{TlsymError, TlsymResult};
