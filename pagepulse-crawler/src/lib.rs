pub mod crawler;
pub mod error;
pub mod extract;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use extract::{Origin, extract_links};
