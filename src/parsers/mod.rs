//! HTML parsers for the portal pages.
//!
//! The free functions in the submodules are tied to the current elschool
//! markup. The session only talks to them through [`PortalParser`], so a
//! layout change is handled by a new parser type.

pub mod diary;
pub mod login;
pub mod private_office;

use crate::error::Result;
use crate::models::Week;
use scraper::ElementRef;

pub use diary::SubjectFields;
pub use private_office::AccountMetadata;

/// Page-level parsing used by [`crate::ElschoolSession`].
pub trait PortalParser: Send + Sync {
    /// Whether the page returned by the login POST belongs to a logged-in user.
    fn is_authenticated(&self, html: &str) -> bool;

    /// Extracts the user name and ids from the private office page.
    fn parse_account_metadata(&self, html: &str) -> Result<AccountMetadata>;

    /// Builds a [`Week`] from a diary details page.
    fn parse_week(&self, html: &str) -> Result<Week>;
}

/// Parser for the current elschool.ru layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElschoolParser;

impl PortalParser for ElschoolParser {
    fn is_authenticated(&self, html: &str) -> bool {
        login::is_authenticated(html)
    }

    fn parse_account_metadata(&self, html: &str) -> Result<AccountMetadata> {
        private_office::extract_account_metadata(html)
    }

    fn parse_week(&self, html: &str) -> Result<Week> {
        diary::parse_week(html)
    }
}

/// Whitespace-trimmed text content of an element and all its descendants.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
