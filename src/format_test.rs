use crate::event::FieldKey;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================
// human_dates
// =============================================================

#[test]
fn single_day() {
    assert_eq!(human_dates(day(2025, 10, 19), None), "19 октября");
}

#[test]
fn range_within_a_month() {
    assert_eq!(human_dates(day(2025, 10, 17), Some(day(2025, 10, 19))), "17-19 октября");
}

#[test]
fn range_across_months() {
    assert_eq!(human_dates(day(2026, 4, 29), Some(day(2026, 5, 3))), "29 апреля-3 мая");
}

#[test]
fn range_across_years_names_both_months() {
    assert_eq!(human_dates(day(2025, 12, 30), Some(day(2026, 1, 2))), "30 декабря-2 января");
}

#[test]
fn same_day_range_collapses() {
    assert_eq!(human_dates(day(2025, 3, 8), Some(day(2025, 3, 8))), "8 марта");
}

// =============================================================
// Teachers and time
// =============================================================

#[test]
fn teachers_are_given_name_first() {
    let teachers = ["Артиш Анжелика", "Кузьминич Алексей"];
    assert_eq!(display_teachers(&teachers), "Анжелика Артиш, Алексей Кузьминич");
}

#[test]
fn single_word_teacher_is_kept() {
    assert_eq!(display_teachers(&["Мира"]), "Мира");
    assert_eq!(display_teachers::<&str>(&[]), "");
}

#[test]
fn clock_time_pads_hours() {
    assert_eq!(clock_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()), "09:00");
    assert_eq!(clock_time(NaiveTime::from_hms_opt(18, 30, 59).unwrap()), "18:30");
}

#[test]
fn wednesdays_in_april_2026() {
    let days: Vec<u32> = weekdays_in_month(2026, 4, Weekday::Wed).iter().map(Datelike::day).collect();
    assert_eq!(days, vec![1, 8, 15, 22, 29]);
}

#[test]
fn invalid_month_has_no_days() {
    assert!(weekdays_in_month(2026, 13, Weekday::Mon).is_empty());
}

// =============================================================
// Records and markup
// =============================================================

const OCTOBER: &str = r#"[
    {"name": "Счастье", "date": "17-19 октября", "place": "Театральная, 17", "time": "10:00",
     "teachers": "Анжелика Артиш"},
    {"name": "Поддерживающее занятие online", "date": "19 октября", "place": "Онлайн, время МСК+5"}
]"#;

#[test]
fn records_parse_from_monthly_file() {
    let records = EventRecord::list_from_json(OCTOBER).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].time.as_deref(), Some("10:00"));
    assert_eq!(records[1].teachers, None);
}

#[test]
fn record_without_place_is_rejected() {
    assert!(EventRecord::list_from_json(r#"[{"name": "x", "date": "1 мая"}]"#).is_err());
}

#[test]
fn record_becomes_descriptor() {
    let record = EventRecord::list_from_json(OCTOBER).unwrap().remove(0);
    let event = EventDescriptor::from(record);
    assert_eq!(event.dates, "17-19 октября");
    assert_eq!(event.value(FieldKey::Teachers), "Анжелика Артиш");
    assert!(event.is_blank(FieldKey::People));
}

#[test]
fn markup_escapes_and_skips_absent_values() {
    let event = EventDescriptor {
        name: "Tom & \"Jerry\"".into(),
        dates: "1 мая".into(),
        place: "<Hall>".into(),
        time: Some("09:00".into()),
        ..EventDescriptor::default()
    };
    assert_eq!(
        attribute_markup(&event),
        "data-name=\"Tom &amp; &quot;Jerry&quot;\" data-dates=\"1 мая\" data-time=\"09:00\" data-place=\"&lt;Hall&gt;\""
    );
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape_attribute("Театральная, 17"), "Театральная, 17");
    assert_eq!(escape_attribute("it's"), "it&#39;s");
}

// =============================================================
// Event types and drafts
// =============================================================

fn draft(kind: EventType, start: NaiveDate, end: Option<NaiveDate>) -> EventDraft {
    EventDraft {
        kind,
        start,
        end,
        time: None,
        place: "Театральная, 17".into(),
        teachers: Vec::new(),
        schedule: Vec::new(),
    }
}

fn dates(records: &[EventRecord]) -> Vec<&str> {
    records.iter().map(|r| r.date.as_str()).collect()
}

#[test]
fn event_type_keys_and_titles() {
    assert_eq!(EventType::from_key("happiness"), Some(EventType::Happiness));
    assert_eq!(EventType::Happiness.title(), "Счастье");
    assert_eq!(EventType::from_key("yoga_joints").map(EventType::title), Some("Суставная йога"));
    assert_eq!(EventType::from_key("karaoke"), None);
    for kind in EventType::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.key()));
    }
}

#[test]
fn single_event_skips_absent_time_and_teachers() {
    let record = EventRecord::single(&draft(EventType::Happiness, day(2025, 10, 17), Some(day(2025, 10, 19))));
    assert_eq!(record.name, "Счастье");
    assert_eq!(record.date, "17-19 октября");
    assert_eq!(record.place, "Театральная, 17");
    assert_eq!(record.time, None);
    assert_eq!(record.teachers, None);
    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("time") && !json.contains("teachers"));
}

#[test]
fn single_event_formats_time_and_teachers() {
    let mut entry = draft(EventType::ArtOfSilence, day(2026, 4, 29), Some(day(2026, 5, 3)));
    entry.time = NaiveTime::from_hms_opt(9, 0, 0);
    entry.teachers = vec!["Артиш Анжелика".into(), "Кузьминич Алексей".into()];
    let record = EventRecord::single(&entry);
    assert_eq!(record.date, "29 апреля-3 мая");
    assert_eq!(record.time.as_deref(), Some("09:00"));
    assert_eq!(record.teachers.as_deref(), Some("Анжелика Артиш, Алексей Кузьминич"));
}

#[test]
fn recurring_event_is_limited_to_start_and_end() {
    let mut entry = draft(EventType::Yoga, day(2026, 4, 8), Some(day(2026, 4, 22)));
    entry.time = NaiveTime::from_hms_opt(18, 30, 0);
    entry.schedule = vec![Weekday::Wed, Weekday::Fri];
    let records = EventRecord::recurring(&entry);
    // Wednesdays 8, 15, 22 then Fridays 10, 17; 1 and 29 April fall outside.
    assert_eq!(dates(&records), vec!["8 апреля", "15 апреля", "22 апреля", "10 апреля", "17 апреля"]);
    assert!(records.iter().all(|r| r.name == "Йога" && r.time.as_deref() == Some("18:30")));
}

#[test]
fn recurring_event_without_end_runs_to_month_end() {
    let mut entry = draft(EventType::Practices, day(2026, 4, 20), None);
    entry.schedule = vec![Weekday::Wed];
    entry.teachers = vec!["Яскевич Мира".into()];
    let records = EventRecord::recurring(&entry);
    assert_eq!(dates(&records), vec!["22 апреля", "29 апреля"]);
    assert!(records.iter().all(|r| r.teachers.as_deref() == Some("Мира Яскевич")));
}

#[test]
fn from_draft_expands_only_scheduled_recurring_kinds() {
    let mut yoga = draft(EventType::Yoga, day(2026, 4, 1), Some(day(2026, 4, 30)));
    assert_eq!(EventRecord::from_draft(&yoga).len(), 1);
    yoga.schedule = vec![Weekday::Wed];
    assert_eq!(EventRecord::from_draft(&yoga).len(), 5);

    let mut retreat = draft(EventType::Happiness, day(2026, 4, 1), Some(day(2026, 4, 30)));
    retreat.schedule = vec![Weekday::Wed];
    assert_eq!(dates(&EventRecord::from_draft(&retreat)), vec!["1-30 апреля"]);
}
