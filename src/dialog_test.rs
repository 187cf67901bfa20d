use crate::config::FieldBinding;
use crate::doc::{DocTree, Element, NodeId};
use crate::fixtures::{SchedulePage, schedule_page};

use super::*;

fn mount(page: &SchedulePage, config: &DialogConfig) -> DialogCore<NodeId> {
    DialogCore::mount(&page.doc, config).unwrap()
}

fn activate(page: &mut SchedulePage, dialog: &mut DialogCore<NodeId>, activator: NodeId) {
    let event = EventDescriptor::from_node(&page.doc, &activator);
    let effects = dialog.activate(event);
    page.doc.apply_all(&effects);
}

fn intro() -> EventDescriptor {
    EventDescriptor {
        name: "Intro".into(),
        dates: "Mon-Fri".into(),
        place: "Room 1".into(),
        ..Default::default()
    }
}

// =============================================================
// Mounting
// =============================================================

#[test]
fn mount_binds_container_close_and_activators() {
    let page = schedule_page();
    let dialog = mount(&page, &DialogConfig::default());
    assert_eq!(*dialog.container(), page.dialog);
    assert_eq!(dialog.close_control(), Some(&page.close));
    assert_eq!(dialog.activators(), &[page.full_event, page.intro_event, page.nested_event]);
    assert!(!dialog.is_open());
}

#[test]
fn mount_binds_fields_with_rows_for_row_hiding() {
    let page = schedule_page();
    let dialog = mount(&page, &DialogConfig::default());
    let fields = dialog.fields();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0], BoundField { key: FieldKey::Name, node: page.header, row: None });
    let teachers = page.cell(FieldKey::Teachers);
    assert!(fields.contains(&BoundField { key: FieldKey::Teachers, node: teachers.node, row: Some(teachers.row) }));
}

#[test]
fn mount_plain_variant_records_no_rows() {
    let page = schedule_page();
    let dialog = mount(&page, &DialogConfig::plain());
    assert_eq!(dialog.variant(), DialogVariant::Plain);
    assert!(dialog.fields().iter().all(|f| f.row.is_none()));
    assert!(!dialog.fields().iter().any(|f| f.key == FieldKey::Time));
}

#[test]
fn mount_without_container_fails() {
    let doc = DocTree::new();
    let err = DialogCore::mount(&doc, &DialogConfig::default()).unwrap_err();
    assert_eq!(err, WidgetError::MissingNode { selector: ".event-details".into() });
}

#[test]
fn mount_skips_unresolved_fields() {
    let page = schedule_page();
    let mut config = DialogConfig::default();
    config.fields.push(FieldBinding { key: FieldKey::People, selector: Some(".nowhere".into()) });
    let dialog = mount(&page, &config);
    assert_eq!(dialog.fields().len(), 6);
}

#[test]
fn mount_without_close_control_still_works() {
    let page = schedule_page();
    let config = DialogConfig { close_control: "button.dismiss".into(), ..DialogConfig::default() };
    let dialog = mount(&page, &config);
    assert_eq!(dialog.close_control(), None);
    assert!(!dialog.is_close_control(&page.close));
}

#[test]
fn row_lookup_stays_inside_the_dialog() {
    // Layout table around the dialog; the fields themselves are not in rows.
    let mut doc = DocTree::new();
    let table = doc.append(doc.root(), Element::new("table"));
    let outer_row = doc.append(table, Element::new("tr"));
    let cell = doc.append(outer_row, Element::new("td"));
    let container = doc.append(cell, Element::new("dialog").class("event-details"));
    doc.append(container, Element::new("h3"));
    for key in ["dates", "place", "teachers"] {
        doc.append(container, Element::new("p").attr("data-name", key));
    }
    let activator = doc.append(
        doc.root(),
        Element::new("button").class("event").attr("data-name", "Intro").attr("data-dates", "Mon-Fri"),
    );

    let mut dialog = DialogCore::mount(&doc, &DialogConfig::default()).unwrap();
    assert!(dialog.fields().iter().all(|f| f.row.is_none()));

    let effects = dialog.activate(EventDescriptor::from_node(&doc, &activator));
    assert!(effects.iter().all(|e| !matches!(e, Effect::SetHidden { .. })));
    doc.apply_all(&effects);
    assert!(!doc.is_hidden(outer_row));
    assert!(doc.is_open(container));
}

// =============================================================
// Activation: effects
// =============================================================

#[test]
fn activate_plain_writes_fields_then_opens() {
    let page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::plain());
    let effects = dialog.activate(intro());

    let expected = vec![
        Effect::SetText { node: page.header, text: "Intro".into() },
        Effect::SetText { node: page.cell(FieldKey::Dates).node, text: "Mon-Fri".into() },
        Effect::SetText { node: page.cell(FieldKey::Place).node, text: "Room 1".into() },
        Effect::SetText { node: page.cell(FieldKey::Teachers).node, text: String::new() },
        Effect::SetText { node: page.cell(FieldKey::People).node, text: String::new() },
        Effect::ShowModal { node: page.dialog },
    ];
    assert_eq!(effects, expected);
}

#[test]
fn activate_row_hiding_resets_rows_first_and_hides_empty_optionals_last() {
    let page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    let effects = dialog.activate(intro());

    let rows: Vec<NodeId> = [FieldKey::Dates, FieldKey::Time, FieldKey::Place, FieldKey::Teachers, FieldKey::People]
        .into_iter()
        .map(|k| page.cell(k).row)
        .collect();
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(effects[i], Effect::SetHidden { node: *row, hidden: false });
    }

    let hidden: Vec<NodeId> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetHidden { node, hidden: true } => Some(*node),
            _ => None,
        })
        .collect();
    assert_eq!(
        hidden,
        vec![page.cell(FieldKey::Time).row, page.cell(FieldKey::Teachers).row, page.cell(FieldKey::People).row]
    );
    assert_eq!(effects.last(), Some(&Effect::ShowModal { node: page.dialog }));
}

#[test]
fn activate_never_hides_required_rows() {
    let page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    let effects = dialog.activate(EventDescriptor::default());
    let place_row = page.cell(FieldKey::Place).row;
    assert!(!effects.contains(&Effect::SetHidden { node: place_row, hidden: true }));
}

#[test]
fn activate_sets_open_state() {
    let page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    dialog.activate(intro());
    assert!(dialog.is_open());
    assert_eq!(dialog.shown(), Some(&intro()));
    assert_eq!(dialog.state(), &DialogState::Open { shown: intro() });
}

#[test]
fn close_always_emits_close_and_resets_state() {
    let page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    assert_eq!(dialog.close(), vec![Effect::CloseModal { node: page.dialog }]);
    dialog.activate(intro());
    assert_eq!(dialog.close(), vec![Effect::CloseModal { node: page.dialog }]);
    assert_eq!(dialog.state(), &DialogState::Closed);
    assert_eq!(dialog.shown(), None);
}

// =============================================================
// Activation: applied to a document
// =============================================================

#[test]
fn complete_event_shows_every_field() {
    let mut page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    let full = page.full_event;
    activate(&mut page, &mut dialog, full);

    assert_eq!(page.doc.text(page.header), "Счастье");
    for key in FieldKey::ALL.into_iter().filter(|&k| k != FieldKey::Name) {
        let cell = page.cell(key);
        let expected = page.doc.attribute(&full, key.attribute()).unwrap();
        assert_eq!(page.doc.text(cell.node), expected);
        assert!(!page.doc.is_hidden(cell.row));
    }
    assert!(page.doc.is_open(page.dialog));
}

#[test]
fn rows_hidden_for_one_event_reappear_for_the_next() {
    let mut page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    let (intro, full) = (page.intro_event, page.full_event);

    activate(&mut page, &mut dialog, intro);
    assert!(page.doc.is_hidden(page.cell(FieldKey::Teachers).row));
    assert!(page.doc.is_hidden(page.cell(FieldKey::Time).row));

    activate(&mut page, &mut dialog, full);
    for key in [FieldKey::Time, FieldKey::Teachers, FieldKey::People] {
        assert!(!page.doc.is_hidden(page.cell(key).row));
    }
}

#[test]
fn plain_variant_leaves_rows_visible_and_blank() {
    let mut page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::plain());
    let intro = page.intro_event;
    activate(&mut page, &mut dialog, intro);

    let teachers = page.cell(FieldKey::Teachers);
    assert_eq!(page.doc.text(teachers.node), "");
    assert!(!page.doc.is_hidden(teachers.row));
    // Time is not bound in the plain variant.
    assert!(!page.doc.is_hidden(page.cell(FieldKey::Time).row));
}

#[test]
fn activating_twice_shows_the_same_values() {
    let mut page = schedule_page();
    let mut dialog = mount(&page, &DialogConfig::default());
    let full = page.full_event;

    activate(&mut page, &mut dialog, full);
    let first: Vec<String> = dialog.fields().iter().map(|f| page.doc.text(f.node).to_string()).collect();
    activate(&mut page, &mut dialog, full);
    let second: Vec<String> = dialog.fields().iter().map(|f| page.doc.text(f.node).to_string()).collect();
    assert_eq!(first, second);
}

#[test]
fn dialog_core_works_with_foreign_handles() {
    // Any handle type works; nothing here touches a document.
    let fields = vec![
        BoundField { key: FieldKey::Name, node: "title", row: None },
        BoundField { key: FieldKey::People, node: "people", row: Some("people-row") },
    ];
    let mut dialog = DialogCore::new("dlg", Some("x"), vec!["a"], fields, vec!["people-row"], DialogVariant::RowHiding);
    let effects = dialog.activate(intro());
    assert_eq!(
        effects,
        vec![
            Effect::SetHidden { node: "people-row", hidden: false },
            Effect::SetText { node: "title", text: "Intro".into() },
            Effect::SetText { node: "people", text: String::new() },
            Effect::SetHidden { node: "people-row", hidden: true },
            Effect::ShowModal { node: "dlg" },
        ]
    );
    assert!(dialog.is_activator(&"a"));
    assert!(dialog.is_close_control(&"x"));
}
