use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static PERSONAL_DATA_WRAPPER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.personal-data-wrapper").unwrap());

/// Finds the personal data block that only a logged-in user gets to see.
pub fn extract_success_marker(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&PERSONAL_DATA_WRAPPER).next()
}

/// Checks the page returned by the login form for the success marker.
pub fn is_authenticated(html: &str) -> bool {
    let document = Html::parse_document(html);
    extract_success_marker(&document).is_some()
}
