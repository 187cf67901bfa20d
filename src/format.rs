//! Human-readable event values and activator markup.
//!
//! Schedule data arrives as JSON records (one array per month). These helpers
//! turn raw dates, times, and teacher lists into the display strings carried
//! by activator `data-*` attributes, and render those attributes for a page
//! template. [`EventRecord::from_draft`] builds new records from an admin
//! entry, expanding recurring classes into one record per scheduled day.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::event::EventDescriptor;

/// Genitive month names, as used after a day number.
const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября", "октября", "ноября",
    "декабря",
];

/// One event as stored in a monthly schedule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    /// Already humanized, e.g. `17-19 октября`.
    pub date: String,
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teachers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<String>,
}

/// Kinds of events on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    FirstStep,
    Happiness,
    ArtOfMeditation,
    AyurvedicCooking,
    ArtOfSilence,
    Dsn,
    Practices,
    PracticesVtp,
    Yoga,
    YogaSpine,
    YogaJoints,
    Satsang,
}

impl EventType {
    pub const ALL: [Self; 12] = [
        Self::FirstStep,
        Self::Happiness,
        Self::ArtOfMeditation,
        Self::AyurvedicCooking,
        Self::ArtOfSilence,
        Self::Dsn,
        Self::Practices,
        Self::PracticesVtp,
        Self::Yoga,
        Self::YogaSpine,
        Self::YogaJoints,
        Self::Satsang,
    ];

    /// Form key, e.g. `happiness`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstStep => "first_step",
            Self::Happiness => "happiness",
            Self::ArtOfMeditation => "art_of_meditation",
            Self::AyurvedicCooking => "ayurvedic_cooking",
            Self::ArtOfSilence => "art_of_silence",
            Self::Dsn => "dsn",
            Self::Practices => "practices",
            Self::PracticesVtp => "practices_vtp",
            Self::Yoga => "yoga",
            Self::YogaSpine => "yoga_spine",
            Self::YogaJoints => "yoga_joints",
            Self::Satsang => "satsang",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Name shown on the schedule.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstStep => "Первый шаг",
            Self::Happiness => "Счастье",
            Self::ArtOfMeditation => "Искусство медитации",
            Self::AyurvedicCooking => "Здоровое питание",
            Self::ArtOfSilence => "Искусство тишины",
            Self::Dsn => "DSN",
            Self::Practices => "Поддерживающее занятие",
            Self::PracticesVtp => "Поддерживающее занятие для VTP",
            Self::Yoga => "Йога",
            Self::YogaSpine => "Йога для позвоночника",
            Self::YogaJoints => "Суставная йога",
            Self::Satsang => "Песенный сатсанг",
        }
    }

    /// Weekly classes that expand into one record per scheduled day.
    #[must_use]
    pub fn is_recurring(self) -> bool {
        matches!(self, Self::Practices | Self::PracticesVtp | Self::Yoga | Self::YogaSpine | Self::YogaJoints)
    }
}

/// A new event as entered by an editor, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventType,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub place: String,
    /// `Surname Given` entries.
    pub teachers: Vec<String>,
    /// Weekdays a recurring class meets on. Empty for a one-off event.
    pub schedule: Vec<Weekday>,
}

impl EventRecord {
    /// One record spanning `start..=end`.
    #[must_use]
    pub fn single(draft: &EventDraft) -> Self {
        Self {
            name: draft.kind.title().to_string(),
            date: human_dates(draft.start, draft.end),
            place: draft.place.clone(),
            time: draft.time.map(clock_time),
            teachers: teachers_field(&draft.teachers),
            people: None,
        }
    }

    /// One record per scheduled weekday in the start month, limited to
    /// `start..=end` (open-ended without `end`). Grouped by weekday in
    /// schedule order, then by date.
    #[must_use]
    pub fn recurring(draft: &EventDraft) -> Vec<Self> {
        let in_range = |day: &NaiveDate| *day >= draft.start && draft.end.is_none_or(|end| *day <= end);
        draft
            .schedule
            .iter()
            .flat_map(|&weekday| weekdays_in_month(draft.start.year(), draft.start.month(), weekday))
            .filter(in_range)
            .map(|day| Self { date: human_dates(day, None), ..Self::single(draft) })
            .collect()
    }

    /// Records to add for `draft`: recurring kinds with a schedule expand,
    /// everything else is a single record.
    #[must_use]
    pub fn from_draft(draft: &EventDraft) -> Vec<Self> {
        if draft.kind.is_recurring() && !draft.schedule.is_empty() {
            Self::recurring(draft)
        } else {
            vec![Self::single(draft)]
        }
    }

    /// Parse a schedule file: a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or records missing
    /// `name`, `date` or `place`.
    pub fn list_from_json(raw: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl From<EventRecord> for EventDescriptor {
    fn from(record: EventRecord) -> Self {
        Self {
            name: record.name,
            dates: record.date,
            place: record.place,
            time: record.time,
            teachers: record.teachers,
            people: record.people,
        }
    }
}

fn teachers_field(teachers: &[String]) -> Option<String> {
    (!teachers.is_empty()).then(|| display_teachers(teachers))
}

fn month_name(date: NaiveDate) -> &'static str {
    MONTHS_GENITIVE[date.month0() as usize]
}

/// `19 октября`, `17-19 октября`, or `29 апреля-3 мая`.
#[must_use]
pub fn human_dates(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        None => format!("{} {}", start.day(), month_name(start)),
        Some(end) if end == start => format!("{} {}", start.day(), month_name(start)),
        Some(end) if end.month() == start.month() && end.year() == start.year() => {
            format!("{}-{} {}", start.day(), end.day(), month_name(start))
        }
        Some(end) => format!("{} {}-{} {}", start.day(), month_name(start), end.day(), month_name(end)),
    }
}

/// Teacher list for display: each `Surname Given` becomes `Given Surname`.
///
/// Single-word names are kept as they are.
#[must_use]
pub fn display_teachers<S: AsRef<str>>(teachers: &[S]) -> String {
    teachers
        .iter()
        .map(|full| match full.as_ref().trim().split_once(char::is_whitespace) {
            Some((surname, given)) => format!("{} {surname}", given.trim()),
            None => full.as_ref().trim().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Start time as `HH:MM`.
#[must_use]
pub fn clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Every `weekday` in the given month, in order. Empty for an invalid month.
#[must_use]
pub fn weekdays_in_month(year: i32, month: u32, weekday: Weekday) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| d.weekday() == weekday)
        .collect()
}

/// Escape a value for a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `data-name="…" data-dates="…" …` for an activator element.
#[must_use]
pub fn attribute_markup(event: &EventDescriptor) -> String {
    event
        .activator_attributes()
        .into_iter()
        .map(|(name, value)| format!("{name}=\"{}\"", escape_attribute(value)))
        .collect::<Vec<_>>()
        .join(" ")
}
