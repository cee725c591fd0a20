use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Request to elschool failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Wrong login or password")]
    WrongLoginOrPassword,

    #[error("Diary page structure not recognised, missing: {0}")]
    StructureNotFound(String),

    #[error("Could not find account metadata on the private office page: {0}")]
    MetadataNotFound(String),

    #[error("Invalid calendar date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid user agent header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
