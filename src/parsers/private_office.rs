use crate::error::{Result, ScraperError};
use crate::parsers::element_text;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DIARY_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"table[style="table-layout: fixed; width: 100%;"] a"#).unwrap()
});
static PERSONAL_DATA: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div.personal-data[href="/users/privateoffice/edit"]"#).unwrap()
});
static PERSONAL_NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static PERSONAL_ID: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td.personal-data__info-value.personal-data__info-value_bold").unwrap()
});

/// Account data found on the private office page.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AccountMetadata {
    pub user_name: String,
    pub user_id: String,
    pub district_id: String,
    pub school_id: String,
    pub class_id: String,
}

/// Parses the private office page.
///
/// The district, school and class ids come from the diary link
/// (`/<a>/<district>/<b>/<school>/<c>/<class>/...`), the pupil id and name
/// from the personal data block. Both blocks are required; the name is not.
pub fn extract_account_metadata(html: &str) -> Result<AccountMetadata> {
    let document = Html::parse_document(html);

    let href = document
        .select(&DIARY_LINK)
        .next()
        .and_then(|link| link.value().attr("href"))
        .ok_or_else(|| ScraperError::MetadataNotFound("diary link".to_string()))?;

    let (district_id, school_id, class_id) = ids_from_link(href).ok_or_else(|| {
        ScraperError::MetadataNotFound(format!("ids in diary link \"{}\"", href))
    })?;

    let personal_data = document
        .select(&PERSONAL_DATA)
        .next()
        .ok_or_else(|| ScraperError::MetadataNotFound("personal data block".to_string()))?;

    let user_id = personal_data
        .select(&PERSONAL_ID)
        .next()
        .map(element_text)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ScraperError::MetadataNotFound("pupil id".to_string()))?;

    let user_name = match personal_data.select(&PERSONAL_NAME).next() {
        Some(element) => element_text(element),
        None => {
            log::debug!("private office page has no user name heading");
            String::new()
        }
    };

    Ok(AccountMetadata {
        user_name,
        user_id,
        district_id,
        school_id,
        class_id,
    })
}

/// Picks path segments 2, 4 and 6 out of the diary link.
fn ids_from_link(href: &str) -> Option<(String, String, String)> {
    let segments: Vec<&str> = href.split('/').collect();

    let segment = |index: usize| {
        segments
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some((segment(2)?, segment(4)?, segment(6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_positional_segments() {
        let ids = ids_from_link("/users/11/schools/22/classes/33/diary");
        assert_eq!(
            ids,
            Some(("11".to_string(), "22".to_string(), "33".to_string()))
        );
    }

    #[test]
    fn short_link_has_no_ids() {
        assert_eq!(ids_from_link("/users/11/schools/22"), None);
        assert_eq!(ids_from_link("/users/11/schools//classes/33"), None);
    }
}
