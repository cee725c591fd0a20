// Declare all our modules
mod client;
mod error;
mod models;
pub mod parsers;

// Publicly export the parts of our library that users will need
pub use client::ElschoolSession;
pub use error::{Result, ScraperError};
pub use models::*; // Exposes User, Week, Day, Subject, ClientConfig
pub use parsers::{AccountMetadata, ElschoolParser, PortalParser, SubjectFields};
