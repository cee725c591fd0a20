use crate::error::{Result, ScraperError};
use crate::models::{ClientConfig, User, Week};
use crate::parsers::{ElschoolParser, PortalParser};
use chrono::{Datelike, Local, NaiveDate};
use reqwest::cookie::Jar;
use reqwest::header::{HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

const LOGIN_PATH: &str = "/Logon/Index";
const PRIVATE_OFFICE_PATH: &str = "/users/privateoffice";
const DIARY_DETAILS_PATH: &str = "/users/diaries/details";

/// An authenticated session against the elschool portal.
///
/// A value of this type only exists after a successful login with the pupil's
/// ids resolved. It is not mutated afterwards, so every method takes `&self`.
pub struct ElschoolSession {
    client: reqwest::Client,
    base_url: String,
    user_agent: HeaderValue,
    parser: Box<dyn PortalParser>,
    user: User,
}

impl ElschoolSession {
    /// Logs into the public portal with the default configuration.
    pub async fn login(login: &str, password: &str) -> Result<Self> {
        Self::login_with_config(login, password, ClientConfig::default()).await
    }

    pub async fn login_with_config(
        login: &str,
        password: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::login_with_parser(login, password, config, ElschoolParser).await
    }

    /// Logs in and resolves the pupil's ids.
    ///
    /// Fails with [`ScraperError::WrongLoginOrPassword`] when the login page does
    /// not show the personal data block; the private office is not requested then.
    pub async fn login_with_parser<P>(
        login: &str,
        password: &str,
        config: ClientConfig,
        parser: P,
    ) -> Result<Self>
    where
        P: PortalParser + 'static,
    {
        let user_agent = HeaderValue::from_str(&config.user_agent)?;

        let mut builder = reqwest::Client::builder().cookie_provider(Arc::new(Jar::default()));
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        let mut session = Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent,
            parser: Box::new(parser),
            user: User::new(login, password),
        };

        session.authenticate().await?;
        session.resolve_metadata().await?;

        Ok(session)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authenticate(&self) -> Result<()> {
        log::info!("Logging into elschool");

        let form = [
            ("login", self.user.login()),
            ("password", self.user.password()),
        ];
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .header(USER_AGENT, self.user_agent.clone())
            .form(&form)
            .send()
            .await?;

        let body = response.text().await?;
        if !self.parser.is_authenticated(&body) {
            log::warn!("Login rejected: no personal data block on the response page");
            return Err(ScraperError::WrongLoginOrPassword);
        }

        Ok(())
    }

    async fn resolve_metadata(&mut self) -> Result<()> {
        let html = self.get_html(PRIVATE_OFFICE_PATH, &[]).await?;
        let account = self.parser.parse_account_metadata(&html)?;

        log::info!(
            "Resolved pupil {} (district {}, school {}, class {})",
            account.user_id,
            account.district_id,
            account.school_id,
            account.class_id
        );
        self.user.resolve_metadata(account);

        Ok(())
    }

    async fn get_html(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let response = self
            .client
            .get(self.url(path))
            .header(USER_AGENT, self.user_agent.clone())
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// Fetches the diary page of the ISO week containing the given date.
    pub async fn get_usual_diary(&self, year: i32, month: u32, day: u32) -> Result<Week> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ScraperError::InvalidDate { year, month, day })?;
        self.get_usual_diary_for_date(date).await
    }

    pub async fn get_usual_diary_for_date(&self, date: NaiveDate) -> Result<Week> {
        let year = date.year();
        let week = iso_week_number(date);
        let meta = self.user.meta();

        log::debug!("Requesting diary for year {} week {}", year, week);
        let query = [
            ("rooId", meta.district_id.clone()),
            ("instituteId", meta.school_id.clone()),
            ("departmentId", meta.class_id.clone()),
            ("pupilId", meta.id.clone()),
            ("year", year.to_string()),
            ("week", week.to_string()),
            ("log", "false".to_string()),
        ];
        let html = self.get_html(DIARY_DETAILS_PATH, &query).await?;

        let diary = self.parser.parse_week(&html)?;
        log::info!("Parsed {} diary days for week {}", diary.len(), week);

        Ok(diary)
    }

    /// Fetches the diary page of the current week (local time).
    pub async fn get_usual_diary_for_today(&self) -> Result<Week> {
        self.get_usual_diary_for_date(Local::now().date_naive()).await
    }

    pub fn get_user(&self) -> &User {
        &self.user
    }
}

/// ISO-8601 week of the year for the given date.
fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_week_numbers() {
        assert_eq!(iso_week_number(date(2019, 5, 13)), 20);
        assert_eq!(iso_week_number(date(2024, 12, 30)), 1);
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_number(date(2026, 10, 16)), 42);
    }
}
