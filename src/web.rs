//! Browser adapter: `web_sys` document access and the wasm entry points.
//!
//! `WebDom` implements [`Dom`] over the live document. `mount_page` builds a
//! [`PageCore`] on it and returns a [`PageHandle`] that owns the click
//! listener; dropping the handle (or calling `free()` from JS) detaches it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, Element, Event, EventTarget, HtmlDialogElement, HtmlElement, NodeList};

use crate::config::PageConfig;
use crate::dom::Dom;
use crate::effect::{Effect, prevents_default};
use crate::page::{PageCore, SharedPage};

/// The live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Document of the current window, if there is one.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

fn selected(result: Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    match result {
        Ok(list) => elements(&list),
        Err(err) => {
            log::warn!("invalid selector `{selector}`: {err:?}");
            Vec::new()
        }
    }
}

fn warn_on_error(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

fn set_hidden(node: &Element, hidden: bool) {
    if let Some(el) = node.dyn_ref::<HtmlElement>() {
        el.set_hidden(hidden);
    } else if hidden {
        warn_on_error(node.set_attribute("hidden", ""), "setAttribute(hidden)");
    } else {
        warn_on_error(node.remove_attribute("hidden"), "removeAttribute(hidden)");
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        selected(self.document.query_selector_all(selector), selector)
    }

    fn query_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        selected(scope.query_selector_all(selector), selector)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        match node.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector `{selector}`: {err:?}");
                None
            }
        }
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn apply(&mut self, effect: &Effect<Element>) {
        match effect {
            Effect::SetText { node, text } => node.set_text_content(Some(text.as_str())),
            Effect::SetHidden { node, hidden } => set_hidden(node, *hidden),
            Effect::SetAttribute { node, name, value } => {
                warn_on_error(node.set_attribute(name, value), "setAttribute");
            }
            Effect::RemoveAttribute { node, name } => {
                warn_on_error(node.remove_attribute(name), "removeAttribute");
            }
            Effect::ShowModal { node } => match node.dyn_ref::<HtmlDialogElement>() {
                Some(dialog) if !dialog.open() => warn_on_error(dialog.show_modal(), "showModal"),
                Some(_) => {}
                None => set_hidden(node, false),
            },
            Effect::CloseModal { node } => match node.dyn_ref::<HtmlDialogElement>() {
                Some(dialog) => dialog.close(),
                None => set_hidden(node, true),
            },
            // Honoured by the listener that owns the event.
            Effect::PreventDefault => {}
        }
    }
}

// =============================================================
// wasm entry points
// =============================================================

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Install the panic hook and the console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Trace).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(log::LevelFilter::Info);
}

/// Mount the schedule widgets on the current document.
///
/// `config_json` is an optional JSON `PageConfig`; omitted fields take
/// their defaults.
///
/// # Errors
///
/// Fails with a JS `Error` when the config is invalid, there is no
/// document, or the click listener cannot be attached.
#[wasm_bindgen]
pub fn mount_page(config_json: Option<String>) -> Result<PageHandle, JsValue> {
    let config = match config_json.as_deref() {
        Some(raw) => PageConfig::from_json(raw).map_err(js_error)?,
        None => PageConfig::default(),
    };
    log::set_max_level(config.level_filter().map_err(js_error)?);

    let dom = WebDom::from_window().ok_or_else(|| js_error("no document to mount on"))?;
    let target: EventTarget = dom.document().clone().into();
    let page = SharedPage::new(PageCore::mount(dom, &config));

    let mut handle = PageHandle { page, listeners: Vec::new() };
    handle.listen(target, "click")?;
    Ok(handle)
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A mounted page. Listeners stay attached for the handle's lifetime.
#[wasm_bindgen]
pub struct PageHandle {
    page: SharedPage<WebDom>,
    listeners: Vec<Listener>,
}

impl PageHandle {
    /// Delegate `kind` events on `target` to [`PageCore::dispatch_click`].
    fn listen(&mut self, target: EventTarget, kind: &'static str) -> Result<(), JsValue> {
        let page = self.page.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(element) = event.target().and_then(|t| t.dyn_ref::<Element>().cloned()) else {
                return;
            };
            let effects = page.update(kind, |page| page.dispatch_click(&element));
            if effects.is_some_and(|effects| prevents_default(&effects)) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, kind, callback });
        Ok(())
    }
}

#[wasm_bindgen]
impl PageHandle {
    /// Index of the selected tab, or `undefined` without a tab strip.
    #[must_use]
    pub fn selected_tab(&self) -> Option<usize> {
        self.page.read("selected_tab", PageCore::selected_tab).flatten()
    }

    /// Number of tabs; `0` while the page is busy.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.page.read("tab_count", PageCore::tab_count).unwrap_or(0)
    }

    /// Whether the dialog is open; `false` while the page is busy.
    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.page.read("dialog_open", PageCore::dialog_open).unwrap_or(false)
    }

    pub fn close_dialog(&self) {
        self.page.update("close_dialog", PageCore::close_dialog);
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            warn_on_error(
                listener
                    .target
                    .remove_event_listener_with_callback(listener.kind, listener.callback.as_ref().unchecked_ref()),
                "removeEventListener",
            );
        }
    }
}
