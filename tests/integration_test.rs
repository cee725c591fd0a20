// tests/integration_test.rs

use dotenvy::from_path;
use elschool_core::{ElschoolSession, Result, ScraperError};
use std::env;
use std::path::PathBuf;

fn credentials() -> (String, String) {
    let env_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".env");
    from_path(&env_path).ok();

    let login =
        env::var("ELSCHOOL_LOGIN").expect("ERROR: ELSCHOOL_LOGIN environment variable not set.");
    let password = env::var("ELSCHOOL_PASSWORD")
        .expect("ERROR: ELSCHOOL_PASSWORD environment variable not set.");
    (login, password)
}

/// Logs into the live portal, checks the resolved ids and fetches this week's diary.
///
/// To run this test:
/// ELSCHOOL_LOGIN="your_login" ELSCHOOL_PASSWORD="your_password" \
///     cargo test -- --ignored --nocapture
#[tokio::test]
#[ignore] // Needs real credentials and network access
async fn test_full_login_and_diary_flow() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (login, password) = credentials();

    let session = ElschoolSession::login(&login, &password).await?;

    let user = session.get_user();
    println!("{}", user);
    assert!(!user.meta().id.is_empty(), "Pupil id must be resolved");
    assert!(!user.meta().district_id.is_empty());
    assert!(!user.meta().school_id.is_empty());
    assert!(!user.meta().class_id.is_empty());

    let week = session.get_usual_diary_for_today().await?;
    println!("{}", week);
    for day in &week {
        if day.is_no_lesson() {
            assert!(day.subjects().is_empty());
        }
    }

    Ok(())
}

#[tokio::test]
#[ignore] // Needs network access
async fn test_wrong_login_or_password() {
    let result = ElschoolSession::login("WrongPassword", "WrongPassword").await;
    assert!(matches!(result, Err(ScraperError::WrongLoginOrPassword)));
}
