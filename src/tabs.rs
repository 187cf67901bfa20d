//! Tab strip switching between calendar sections.
//!
//! `TabsCore` keeps three things consistent: exactly one tab carries
//! `aria-selected="true"`, only that tab's panel is visible, and every node
//! carries its ARIA role. The tab-to-panel mapping is resolved once at mount
//! from each control's reference attribute (`href="#id"`) and used for both
//! the initial state and every later switch.

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

use std::fmt::Debug;

use crate::config::TabsConfig;
use crate::consts::{
    ARIA_SELECTED, ROLE, ROLE_PRESENTATION, ROLE_TAB, ROLE_TABLIST, ROLE_TABPANEL, TABINDEX,
};
use crate::dom::Dom;
use crate::effect::Effect;
use crate::error::WidgetError;

/// One tab: its control, list-item wrapper, and the panel it reveals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<N> {
    pub control: N,
    pub item: Option<N>,
    /// Raw reference read from the control, e.g. `#october`.
    pub reference: Option<String>,
    /// Panel the reference resolved to at mount time.
    pub panel: Option<N>,
}

/// Tab controller over node handles of type `N`.
#[derive(Debug, Clone)]
pub struct TabsCore<N> {
    list: N,
    tabs: Vec<Tab<N>>,
    panels: Vec<N>,
    selected: usize,
}

/// Panel id named by a reference such as `#october` or `2025.html#october`.
#[must_use]
pub fn panel_id(reference: &str) -> Option<&str> {
    let id = match reference.split_once('#') {
        Some((_, fragment)) => fragment,
        None => reference,
    }
    .trim();
    (!id.is_empty()).then_some(id)
}

impl<N: Clone + PartialEq + Debug> TabsCore<N> {
    /// Build a controller from explicit handles. `None` when there are no tabs.
    ///
    /// Panels owned by a tab but missing from `panels` are appended to it.
    #[must_use]
    pub fn new(list: N, tabs: Vec<Tab<N>>, mut panels: Vec<N>) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }
        for panel in tabs.iter().filter_map(|t| t.panel.as_ref()) {
            if !panels.contains(panel) {
                panels.push(panel.clone());
            }
        }
        Some(Self { list, tabs, panels, selected: 0 })
    }

    /// Locate the tab list, its tabs, and the panels in `dom`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::MissingNode`] when the tab list is absent and
    /// [`WidgetError::NoTabs`] when it holds no tab controls.
    pub fn mount<D: Dom<Node = N>>(dom: &D, config: &TabsConfig) -> Result<Self, WidgetError> {
        let list = dom
            .query(&config.tablist)
            .ok_or_else(|| WidgetError::MissingNode { selector: config.tablist.clone() })?;

        let mut tabs = Vec::new();
        for item in dom.query_all_within(&list, &config.item) {
            let Some(control) = dom.query_within(&item, &config.control) else {
                log::warn!("tab item without a `{}` control", config.control);
                continue;
            };
            let reference = dom.attribute(&control, &config.reference_attribute);
            let panel = reference
                .as_deref()
                .and_then(panel_id)
                .and_then(|id| dom.element_by_id(id));
            if panel.is_none() {
                log::warn!("tab reference {reference:?} does not resolve to a panel");
            }
            tabs.push(Tab { control, item: Some(item), reference, panel });
        }

        let panels = dom.query_all(&config.panels);
        Self::new(list, tabs, panels).ok_or_else(|| WidgetError::NoTabs { selector: config.tablist.clone() })
    }

    /// Assign roles and select the first tab.
    pub fn initialize(&mut self) -> Vec<Effect<N>> {
        let role = |node: &N, value: &str| Effect::SetAttribute { node: node.clone(), name: ROLE, value: value.to_string() };

        let mut effects = vec![role(&self.list, ROLE_TABLIST)];
        for tab in &self.tabs {
            if let Some(item) = &tab.item {
                effects.push(role(item, ROLE_PRESENTATION));
            }
            effects.push(role(&tab.control, ROLE_TAB));
        }
        effects.extend(self.panels.iter().map(|panel| role(panel, ROLE_TABPANEL)));

        self.selected = 0;
        effects.extend(self.selection_effects(0));
        effects
    }

    /// Switch to tab `index`. Out-of-range indices change nothing.
    pub fn activate(&mut self, index: usize) -> Vec<Effect<N>> {
        if index >= self.tabs.len() {
            log::debug!("ignoring activation of tab {index} of {}", self.tabs.len());
            return Vec::new();
        }
        let mut effects = vec![Effect::PreventDefault];
        effects.extend(self.selection_effects(index));
        self.selected = index;
        log::debug!("tab {index} selected");
        effects
    }

    /// Deselect every tab, hide every panel, reveal `index`'s panel, select `index`.
    fn selection_effects(&self, index: usize) -> Vec<Effect<N>> {
        let mut effects = Vec::new();
        for tab in &self.tabs {
            effects.push(Effect::RemoveAttribute { node: tab.control.clone(), name: ARIA_SELECTED });
            effects.push(Effect::SetAttribute { node: tab.control.clone(), name: TABINDEX, value: "-1".to_string() });
        }
        effects.extend(self.panels.iter().map(|panel| Effect::SetHidden { node: panel.clone(), hidden: true }));

        let Some(tab) = self.tabs.get(index) else {
            return effects;
        };
        match &tab.panel {
            Some(panel) => effects.push(Effect::SetHidden { node: panel.clone(), hidden: false }),
            None => log::debug!("tab {index} has no panel to reveal"),
        }
        effects.push(Effect::SetAttribute { node: tab.control.clone(), name: ARIA_SELECTED, value: "true".to_string() });
        effects.push(Effect::RemoveAttribute { node: tab.control.clone(), name: TABINDEX });
        effects
    }

    /// Index of the tab whose control is `control`.
    #[must_use]
    pub fn position(&self, control: &N) -> Option<usize> {
        self.tabs.iter().position(|t| &t.control == control)
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Panel of the selected tab, if it has one.
    #[must_use]
    pub fn visible_panel(&self) -> Option<&N> {
        self.tabs.get(self.selected).and_then(|t| t.panel.as_ref())
    }

    #[must_use]
    pub fn list(&self) -> &N {
        &self.list
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab<N>] {
        &self.tabs
    }

    #[must_use]
    pub fn panels(&self) -> &[N] {
        &self.panels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always `false`: a mounted tab strip has at least one tab.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
