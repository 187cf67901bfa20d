//! Event descriptors carried by activator elements.
//!
//! Each clickable event on the schedule holds its details in `data-*`
//! attributes. `FieldKey` names those attributes, and `EventDescriptor` is
//! the typed view read from one activator. Required fields that are absent
//! read as empty strings; nothing here fails.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::dom::Dom;

/// One named field of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Name,
    Dates,
    Time,
    Place,
    Teachers,
    People,
}

impl FieldKey {
    /// Every key, in display order.
    pub const ALL: [Self; 6] = [Self::Name, Self::Dates, Self::Time, Self::Place, Self::Teachers, Self::People];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Dates => "dates",
            Self::Time => "time",
            Self::Place => "place",
            Self::Teachers => "teachers",
            Self::People => "people",
        }
    }

    /// Attribute on the activator holding this field.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Name => "data-name",
            Self::Dates => "data-dates",
            Self::Time => "data-time",
            Self::Place => "data-place",
            Self::Teachers => "data-teachers",
            Self::People => "data-people",
        }
    }

    /// Optional fields may be absent; their rows are hidden when empty.
    #[must_use]
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Time | Self::Teachers | Self::People)
    }
}

/// Details of one scheduled event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub name: String,
    pub dates: String,
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teachers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<String>,
}

impl EventDescriptor {
    /// Read the attribute bag of `node`.
    pub fn from_node<D: Dom>(dom: &D, node: &D::Node) -> Self {
        let read = |key: FieldKey| dom.attribute(node, key.attribute());
        Self {
            name: read(FieldKey::Name).unwrap_or_default(),
            dates: read(FieldKey::Dates).unwrap_or_default(),
            place: read(FieldKey::Place).unwrap_or_default(),
            time: read(FieldKey::Time),
            teachers: read(FieldKey::Teachers),
            people: read(FieldKey::People),
        }
    }

    /// Value of `key`, empty when absent.
    #[must_use]
    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Dates => &self.dates,
            FieldKey::Place => &self.place,
            FieldKey::Time => self.time.as_deref().unwrap_or(""),
            FieldKey::Teachers => self.teachers.as_deref().unwrap_or(""),
            FieldKey::People => self.people.as_deref().unwrap_or(""),
        }
    }

    /// Whether `key` has nothing worth displaying (absent or whitespace).
    #[must_use]
    pub fn is_blank(&self, key: FieldKey) -> bool {
        self.value(key).trim().is_empty()
    }

    /// `data-*` attribute pairs for rendering this event as an activator.
    ///
    /// Required fields are always present; absent optional fields are omitted.
    #[must_use]
    pub fn activator_attributes(&self) -> Vec<(&'static str, &str)> {
        FieldKey::ALL
            .into_iter()
            .filter(|&key| self.is_present(key))
            .map(|key| (key.attribute(), self.value(key)))
            .collect()
    }

    /// Whether `key` was supplied. Required fields always count as present.
    #[must_use]
    pub fn is_present(&self, key: FieldKey) -> bool {
        match key {
            FieldKey::Name | FieldKey::Dates | FieldKey::Place => true,
            FieldKey::Time => self.time.is_some(),
            FieldKey::Teachers => self.teachers.is_some(),
            FieldKey::People => self.people.is_some(),
        }
    }
}
