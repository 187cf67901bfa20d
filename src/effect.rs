//! Side effects emitted by the controllers for the host to apply.
//!
//! Controllers never touch the document. Every transition returns a list of
//! `Effect`s addressed to node handles the controller was mounted with, and
//! the caller feeds them to [`crate::dom::Dom::apply`] in order.

/// A single document mutation (or host instruction) produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<N> {
    /// Replace the node's rendered text.
    SetText { node: N, text: String },
    /// Show or hide the node.
    SetHidden { node: N, hidden: bool },
    SetAttribute { node: N, name: &'static str, value: String },
    RemoveAttribute { node: N, name: &'static str },
    /// Open the node as a modal dialog.
    ShowModal { node: N },
    /// Close a modal dialog.
    CloseModal { node: N },
    /// Suppress the default action of the event that triggered the transition.
    PreventDefault,
}

impl<N> Effect<N> {
    /// The node this effect targets, if any.
    #[must_use]
    pub fn node(&self) -> Option<&N> {
        match self {
            Self::SetText { node, .. }
            | Self::SetHidden { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::RemoveAttribute { node, .. }
            | Self::ShowModal { node }
            | Self::CloseModal { node } => Some(node),
            Self::PreventDefault => None,
        }
    }
}

/// Whether a batch of effects asks the host to cancel the triggering event's default action.
#[must_use]
pub fn prevents_default<N>(effects: &[Effect<N>]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::PreventDefault))
}
