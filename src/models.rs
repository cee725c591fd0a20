use crate::parsers::AccountMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal identifiers of a pupil, resolved from the private office page.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserMeta {
    /// The pupil id (`pupilId` query parameter).
    pub id: String,
    /// The district id (`rooId` query parameter).
    pub district_id: String,
    /// The school id (`instituteId` query parameter).
    pub school_id: String,
    /// The class id (`departmentId` query parameter).
    pub class_id: String,
}

/// The authenticated portal user.
///
/// Credentials are kept private, never serialized and redacted from `Debug`.
/// Metadata is filled in once by the session right after login and does not
/// change afterwards.
#[derive(Serialize, Clone)]
pub struct User {
    name: String,
    #[serde(skip)]
    login: String,
    #[serde(skip)]
    password: String,
    meta: UserMeta,
}

impl User {
    pub(crate) fn new(login: &str, password: &str) -> Self {
        Self {
            name: String::new(),
            login: login.to_string(),
            password: password.to_string(),
            meta: UserMeta::default(),
        }
    }

    pub(crate) fn resolve_metadata(&mut self, account: AccountMetadata) {
        self.name = account.user_name;
        self.meta = UserMeta {
            id: account.user_id,
            district_id: account.district_id,
            school_id: account.school_id,
            class_id: account.class_id,
        };
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Display name as shown on the private office page.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn login(&self) -> &str {
        &self.login
    }

    pub fn meta(&self) -> &UserMeta {
        &self.meta
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("login", &"<redacted>")
            .field("password", &"<redacted>")
            .field("meta", &self.meta)
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Id: {}", self.meta.id)?;
        writeln!(f, "District_id: {}", self.meta.district_id)?;
        writeln!(f, "School_id: {}", self.meta.school_id)?;
        write!(f, "Class_id: {}", self.meta.class_id)
    }
}

/// One lesson of a diary day. Every field may be empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    /// Name of the discipline.
    pub name: String,
    /// Form of the lesson (e.g. intramural, extramural).
    #[serde(rename = "type")]
    pub kind: String,
    /// Time range of the lesson (e.g. "8:00 - 8:45").
    pub time: String,
    /// Homework assigned for the lesson.
    pub homework: String,
    /// Marks received for the lesson.
    pub marks: String,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Type: {}, Time: {}, Homework: {}, Marks: {}",
            self.name, self.kind, self.time, self.homework, self.marks
        )
    }
}

/// One day of the diary.
///
/// A day either has no lessons at all or carries its subjects in page order;
/// a day created with [`Day::without_lessons`] never gains subjects.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Day {
    date: String,
    no_lesson: bool,
    subjects: Vec<Subject>,
}

impl Day {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            no_lesson: false,
            subjects: Vec::new(),
        }
    }

    pub fn without_lessons(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            no_lesson: true,
            subjects: Vec::new(),
        }
    }

    /// Appends a subject. Returns `false` and drops the subject on a no-lesson day.
    pub fn add_subject(&mut self, subject: Subject) -> bool {
        if self.no_lesson {
            return false;
        }
        self.subjects.push(subject);
        true
    }

    /// Date label as printed by the portal (e.g. "понедельник 13.05").
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn is_no_lesson(&self) -> bool {
        self.no_lesson
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// 1-based lookup, matching the lesson numbers shown on the portal.
    pub fn subject(&self, number: usize) -> Option<&Subject> {
        number.checked_sub(1).and_then(|i| self.subjects.get(i))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Расписание на {}:", self.date)?;

        if self.no_lesson {
            return write!(f, "\nЗанятий нет");
        }

        for subject in &self.subjects {
            write!(f, "\n{}", subject)?;
        }
        Ok(())
    }
}

/// One diary page: the days in the order the portal lists them.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Week {
    days: Vec<Day>,
}

impl Week {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_day(&mut self, day: Day) {
        self.days.push(day);
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// 1-based lookup into the days of the page.
    pub fn day(&self, number: usize) -> Option<&Day> {
        number.checked_sub(1).and_then(|i| self.days.get(i))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Day> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a Day;
    type IntoIter = std::slice::Iter<'a, Day>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.days.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n\n")?;
            }
            write!(f, "{}", day)?;
        }
        Ok(())
    }
}

/// Connection settings for [`crate::ElschoolSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the portal, without a trailing slash.
    pub base_url: String,
    /// User agent attached to every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds. `0` disables it.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    /// Default configuration: the public portal, a mobile Chrome user agent, 30s timeout.
    fn default() -> Self {
        Self {
            base_url: "https://elschool.ru".to_string(),
            user_agent: "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/83.0.4103.116 Mobile \
                         Safari/537.36"
                .to_string(),
            timeout_secs: 30,
        }
    }
}
