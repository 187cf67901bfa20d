//! Client-side behavior for the schedule page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It drives
//! two independent widgets on a calendar listing: an event detail dialog
//! filled from the clicked entry's `data-*` attributes, and a tab strip that
//! switches between calendar sections while keeping ARIA state consistent.
//! Widget logic is pure: controllers return [`effect::Effect`]s and the page
//! applies them to a [`dom::Dom`], either the live document
//! ([`web::WebDom`]) or the in-memory [`doc::DocTree`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Mounts both widgets and routes clicks ([`page::PageCore`]) |
//! | [`dialog`] | Event detail dialog controller |
//! | [`tabs`] | Tab strip controller |
//! | [`event`] | Event fields and the descriptor read from an activator |
//! | [`effect`] | Document mutations requested by the controllers |
//! | [`dom`] | Host document trait |
//! | [`doc`] | In-memory document tree |
//! | [`selector`] | CSS selector subset used by the in-memory tree |
//! | [`web`] | `web_sys` adapter and wasm entry points |
//! | [`format`] | Display strings for dates, times, and teachers |
//! | [`config`] | Page configuration |
//! | [`error`] | Mount and config errors |
//! | [`consts`] | Default selectors and ARIA names |

pub mod config;
pub mod consts;
pub mod dialog;
pub mod doc;
pub mod dom;
pub mod effect;
pub mod error;
pub mod event;
pub mod format;
pub mod page;
pub mod selector;
pub mod tabs;
pub mod web;

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures;
