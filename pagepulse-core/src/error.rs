use crate::model::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("scoring request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scoring service returned HTTP {status}")]
    Api { status: u16 },

    #[error("retries exhausted for {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("collection timed out for {url} after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("no {0} samples collected")]
    NoData(Category),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PulseError>;
