use crate::error::{Result, ScraperError};
use crate::models::{Day, Subject, Week};
use crate::parsers::element_text;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DIARIES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.diaries").unwrap());
static HALF_WEEK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.col-6").unwrap());
static DAYS_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.table.table-bordered").unwrap());
static DAY_BLOCK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());

static LESSON_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr.diary__lesson").unwrap());
static NO_LESSON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.diary__nolesson").unwrap());
static DATE_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.diary__dayweek p").unwrap());

static SUBJECT_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.flex-grow-1").unwrap());
static SUBJECT_TYPE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.lesson-form").unwrap());
static SUBJECT_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.diary__discipline__time").unwrap());
static SUBJECT_HOMEWORK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.diary__homework-text").unwrap());
static SUBJECT_MARKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span.diary__mark[model-type="mark"]"#).unwrap());

/// Raw lesson fields. `None` means the element is missing from the row.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SubjectFields {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub time: Option<String>,
    pub homework: Option<String>,
    pub marks: Option<String>,
}

impl From<SubjectFields> for Subject {
    fn from(fields: SubjectFields) -> Self {
        Subject {
            name: fields.name.unwrap_or_default(),
            kind: fields.kind.unwrap_or_default(),
            time: fields.time.unwrap_or_default(),
            homework: fields.homework.unwrap_or_default(),
            marks: fields.marks.unwrap_or_default(),
        }
    }
}

/// Collects the day blocks of both half-week tables, first half first.
pub fn extract_week_day_blocks(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    let diaries = document
        .select(&DIARIES)
        .next()
        .ok_or_else(|| ScraperError::StructureNotFound("div.diaries".to_string()))?;

    let mut days = Vec::new();
    for half in diaries.select(&HALF_WEEK).take(2) {
        let table = half.select(&DAYS_TABLE).next().ok_or_else(|| {
            ScraperError::StructureNotFound("half-week table.table-bordered".to_string())
        })?;
        days.extend(table.select(&DAY_BLOCK));
    }

    Ok(days)
}

/// All lesson rows of a day block, in page order.
pub fn extract_subject_rows<'a>(day: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    day.select(&LESSON_ROW).collect()
}

pub fn has_no_lesson_marker(day: ElementRef<'_>) -> bool {
    day.select(&NO_LESSON).next().is_some()
}

/// The day label (e.g. "понедельник 13.05"), if the block has one.
pub fn extract_date_label(day: ElementRef<'_>) -> Option<String> {
    day.select(&DATE_LABEL).next().map(element_text)
}

/// Extracts every lesson field independently; a missing element leaves its field `None`.
pub fn extract_subject_fields(row: ElementRef<'_>) -> SubjectFields {
    SubjectFields {
        name: first_text(row, &SUBJECT_NAME),
        kind: first_text(row, &SUBJECT_TYPE),
        time: first_text(row, &SUBJECT_TIME),
        homework: first_text(row, &SUBJECT_HOMEWORK),
        marks: first_text(row, &SUBJECT_MARKS),
    }
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(element_text)
}

/// Parses a diary details page into a [`Week`], keeping the page's day order.
pub fn parse_week(html: &str) -> Result<Week> {
    let document = Html::parse_document(html);
    let mut week = Week::new();

    for block in extract_week_day_blocks(&document)? {
        let date = extract_date_label(block).unwrap_or_else(|| {
            log::debug!("diary day block without a date label");
            String::new()
        });

        if has_no_lesson_marker(block) {
            log::debug!("no lessons on {}", date);
            week.add_day(Day::without_lessons(date));
            continue;
        }

        let mut day = Day::new(date);
        for row in extract_subject_rows(block) {
            let fields = extract_subject_fields(row);
            if fields.name.is_none() {
                log::debug!("lesson row on {} has no subject name", day.date());
            }
            day.add_subject(fields.into());
        }
        week.add_day(day);
    }

    Ok(week)
}
