//! Event detail dialog.
//!
//! `DialogCore` copies an activated event's fields into the dialog's display
//! nodes and opens it as a modal; the close control dismisses it. In the
//! row-hiding variant every row is first reset to visible, and rows whose
//! optional field is empty are hidden after the write.
//!
//! The core holds node handles only and never reads the document after
//! mounting: each transition maps `(state, input)` to a new state and a list
//! of [`Effect`]s for the caller to apply.

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

use std::fmt::Debug;

use crate::config::{DialogConfig, DialogVariant};
use crate::dom::Dom;
use crate::effect::Effect;
use crate::error::WidgetError;
use crate::event::{EventDescriptor, FieldKey};

/// A display node bound to one event field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField<N> {
    pub key: FieldKey,
    pub node: N,
    /// Nearest enclosing row, hidden when the field is an empty optional.
    pub row: Option<N>,
}

/// Whether the dialog is showing, and what.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        shown: EventDescriptor,
    },
}

/// Dialog controller over node handles of type `N`.
#[derive(Debug, Clone)]
pub struct DialogCore<N> {
    container: N,
    close_control: Option<N>,
    activators: Vec<N>,
    fields: Vec<BoundField<N>>,
    rows: Vec<N>,
    variant: DialogVariant,
    state: DialogState,
}

impl<N: Clone + PartialEq + Debug> DialogCore<N> {
    /// Build a controller from explicit node handles.
    #[must_use]
    pub fn new(
        container: N,
        close_control: Option<N>,
        activators: Vec<N>,
        fields: Vec<BoundField<N>>,
        rows: Vec<N>,
        variant: DialogVariant,
    ) -> Self {
        Self { container, close_control, activators, fields, rows, variant, state: DialogState::Closed }
    }

    /// Locate the dialog and its parts in `dom`.
    ///
    /// Only the container is required. Unresolved field selectors are
    /// skipped with a warning; the close control is looked up inside the
    /// container first, then in the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::MissingNode`] when the container is absent.
    pub fn mount<D: Dom<Node = N>>(dom: &D, config: &DialogConfig) -> Result<Self, WidgetError> {
        let container = dom
            .query(&config.container)
            .ok_or_else(|| WidgetError::MissingNode { selector: config.container.clone() })?;

        let close_control = dom
            .query_within(&container, &config.close_control)
            .or_else(|| dom.query(&config.close_control));
        if close_control.is_none() {
            log::warn!("dialog close control `{}` not found", config.close_control);
        }

        let activators = dom.query_all(&config.activators);
        if activators.is_empty() {
            log::debug!("no activators match `{}`", config.activators);
        }

        let row_hiding = config.variant == DialogVariant::RowHiding;
        let rows = if row_hiding { dom.query_all_within(&container, &config.row_selector) } else { Vec::new() };

        let mut fields = Vec::with_capacity(config.fields.len());
        for binding in &config.fields {
            let selector = binding.selector();
            let Some(node) = dom.query_within(&container, &selector) else {
                log::warn!("dialog field `{}` not found at `{selector}`", binding.key.as_str());
                continue;
            };
            // Rows outside the dialog are never touched.
            let row = if row_hiding {
                dom.closest(&node, &config.row_selector).filter(|row| rows.contains(row))
            } else {
                None
            };
            fields.push(BoundField { key: binding.key, node, row });
        }

        Ok(Self::new(container, close_control, activators, fields, rows, config.variant))
    }

    /// Show `event` in the dialog.
    pub fn activate(&mut self, event: EventDescriptor) -> Vec<Effect<N>> {
        let row_hiding = self.variant == DialogVariant::RowHiding;
        let mut effects = Vec::new();

        if row_hiding {
            effects.extend(self.rows.iter().map(|row| Effect::SetHidden { node: row.clone(), hidden: false }));
        }

        effects.extend(self.fields.iter().map(|field| Effect::SetText {
            node: field.node.clone(),
            text: event.value(field.key).to_string(),
        }));

        if row_hiding {
            for field in &self.fields {
                if !field.key.is_optional() || !event.is_blank(field.key) {
                    continue;
                }
                if let Some(row) = &field.row {
                    effects.push(Effect::SetHidden { node: row.clone(), hidden: true });
                }
            }
        }

        effects.push(Effect::ShowModal { node: self.container.clone() });
        log::debug!("dialog open: {}", event.name);
        self.state = DialogState::Open { shown: event };
        effects
    }

    /// Dismiss the dialog, whatever its current state.
    pub fn close(&mut self) -> Vec<Effect<N>> {
        self.state = DialogState::Closed;
        log::debug!("dialog closed");
        vec![Effect::CloseModal { node: self.container.clone() }]
    }

    #[must_use]
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    /// The event currently displayed, if open.
    #[must_use]
    pub fn shown(&self) -> Option<&EventDescriptor> {
        match &self.state {
            DialogState::Open { shown } => Some(shown),
            DialogState::Closed => None,
        }
    }

    #[must_use]
    pub fn container(&self) -> &N {
        &self.container
    }

    #[must_use]
    pub fn close_control(&self) -> Option<&N> {
        self.close_control.as_ref()
    }

    #[must_use]
    pub fn activators(&self) -> &[N] {
        &self.activators
    }

    #[must_use]
    pub fn fields(&self) -> &[BoundField<N>] {
        &self.fields
    }

    #[must_use]
    pub fn variant(&self) -> DialogVariant {
        self.variant
    }

    #[must_use]
    pub fn is_activator(&self, node: &N) -> bool {
        self.activators.contains(node)
    }

    #[must_use]
    pub fn is_close_control(&self, node: &N) -> bool {
        self.close_control.as_ref() == Some(node)
    }
}
