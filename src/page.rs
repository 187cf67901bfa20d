//! Page-level host for the two widgets.
//!
//! `PageCore` owns the host document and whichever widgets mounted on it.
//! It is the single place where controller effects meet the document:
//! every entry point runs a transition, applies its effects, and returns
//! them so the caller can honour [`Effect::PreventDefault`].
//!
//! ```text
//!   click ──► PageCore ──► DialogCore / TabsCore ──► Vec<Effect> ──► Dom::apply
//! ```

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::PageConfig;
use crate::dialog::DialogCore;
use crate::dom::Dom;
use crate::effect::Effect;
use crate::event::EventDescriptor;
use crate::tabs::TabsCore;

/// The page's widgets bound to a host document.
pub struct PageCore<D: Dom> {
    dom: D,
    dialog: Option<DialogCore<D::Node>>,
    tabs: Option<TabsCore<D::Node>>,
    activator_selector: String,
    close_selector: String,
}

impl<D: Dom> PageCore<D> {
    /// Mount both widgets on `dom` and initialize the tab strip.
    ///
    /// A widget whose required nodes are missing is left out with a
    /// warning; the other still mounts.
    pub fn mount(dom: D, config: &PageConfig) -> Self {
        let dialog = match DialogCore::mount(&dom, &config.dialog) {
            Ok(dialog) => Some(dialog),
            Err(err) => {
                log::warn!("event dialog disabled: {err}");
                None
            }
        };
        let tabs = match TabsCore::mount(&dom, &config.tabs) {
            Ok(tabs) => Some(tabs),
            Err(err) => {
                log::warn!("tab strip disabled: {err}");
                None
            }
        };

        let mut page = Self {
            dom,
            dialog,
            tabs,
            activator_selector: config.dialog.activators.clone(),
            close_selector: config.dialog.close_control.clone(),
        };
        if let Some(tabs) = page.tabs.as_mut() {
            let effects = tabs.initialize();
            page.dom.apply_all(&effects);
        }
        log::info!(
            "page mounted: dialog={}, tabs={}",
            page.dialog.is_some(),
            page.tabs.as_ref().map_or(0, TabsCore::len)
        );
        page
    }

    /// Open the dialog for `activator`. Nodes that are not activators are ignored.
    pub fn activate_event(&mut self, activator: &D::Node) -> Vec<Effect<D::Node>> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Vec::new();
        };
        if !dialog.is_activator(activator) {
            return Vec::new();
        }
        let event = EventDescriptor::from_node(&self.dom, activator);
        let effects = dialog.activate(event);
        self.dom.apply_all(&effects);
        effects
    }

    /// Close the dialog.
    pub fn close_dialog(&mut self) -> Vec<Effect<D::Node>> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Vec::new();
        };
        let effects = dialog.close();
        self.dom.apply_all(&effects);
        effects
    }

    /// Switch to the tab whose control is `control`.
    pub fn activate_tab(&mut self, control: &D::Node) -> Vec<Effect<D::Node>> {
        let Some(tabs) = self.tabs.as_mut() else {
            return Vec::new();
        };
        let Some(index) = tabs.position(control) else {
            return Vec::new();
        };
        let effects = tabs.activate(index);
        self.dom.apply_all(&effects);
        effects
    }

    /// Route a click on `target` to the widget it belongs to.
    ///
    /// The target may be nested inside an activator, the close control, or
    /// a tab control; the nearest matching ancestor decides. Clicks
    /// elsewhere produce no effects.
    pub fn dispatch_click(&mut self, target: &D::Node) -> Vec<Effect<D::Node>> {
        if let Some(tabs) = &self.tabs {
            let hit = std::iter::successors(Some(target.clone()), |n| self.dom.parent(n))
                .find(|n| tabs.position(n).is_some());
            if let Some(control) = hit {
                return self.activate_tab(&control);
            }
        }

        if let Some(close) = self.dom.closest(target, &self.close_selector) {
            if self.dialog.as_ref().is_some_and(|d| d.is_close_control(&close)) {
                return self.close_dialog();
            }
        }

        if let Some(activator) = self.dom.closest(target, &self.activator_selector) {
            return self.activate_event(&activator);
        }

        Vec::new()
    }

    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&DialogCore<D::Node>> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub fn tabs(&self) -> Option<&TabsCore<D::Node>> {
        self.tabs.as_ref()
    }

    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.dialog.as_ref().is_some_and(DialogCore::is_open)
    }

    /// The event shown in the dialog, if open.
    #[must_use]
    pub fn shown_event(&self) -> Option<&EventDescriptor> {
        self.dialog.as_ref().and_then(DialogCore::shown)
    }

    /// Index of the selected tab, if the tab strip mounted.
    #[must_use]
    pub fn selected_tab(&self) -> Option<usize> {
        self.tabs.as_ref().map(TabsCore::selected)
    }

    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tabs.as_ref().map_or(0, TabsCore::len)
    }
}

/// A [`PageCore`] shared between event listeners and a JS-facing handle.
///
/// Re-entrant access (a host callback firing while a dispatch still holds
/// the page) is skipped with a warning instead of panicking.
pub struct SharedPage<D: Dom>(Rc<RefCell<PageCore<D>>>);

impl<D: Dom> Clone for SharedPage<D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<D: Dom> SharedPage<D> {
    #[must_use]
    pub fn new(page: PageCore<D>) -> Self {
        Self(Rc::new(RefCell::new(page)))
    }

    /// Run `f` on the page, or return `None` if it is mutably borrowed.
    pub fn read<T>(&self, what: &str, f: impl FnOnce(&PageCore<D>) -> T) -> Option<T> {
        match self.0.try_borrow() {
            Ok(page) => Some(f(&page)),
            Err(_) => {
                log::warn!("{what} skipped: page is busy");
                None
            }
        }
    }

    /// Run `f` on the page mutably, or return `None` if it is borrowed.
    pub fn update<T>(&self, what: &str, f: impl FnOnce(&mut PageCore<D>) -> T) -> Option<T> {
        match self.0.try_borrow_mut() {
            Ok(mut page) => Some(f(&mut page)),
            Err(_) => {
                log::warn!("{what} skipped: page is busy");
                None
            }
        }
    }
}
