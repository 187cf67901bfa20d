//! Host document seam.
//!
//! Everything the page layer needs from a document: selector queries, id
//! lookup, attribute reads, ancestor search, and effect application. The
//! in-memory [`crate::doc::DocTree`] and the browser [`crate::web::WebDom`]
//! both implement it, so `PageCore` is tested without a browser.

use std::fmt::Debug;

use crate::effect::Effect;

/// Query and mutation surface of a host document.
///
/// Query methods never fail: a malformed selector or a missing node yields
/// an empty result.
pub trait Dom {
    /// Non-owning handle to an element.
    type Node: Clone + PartialEq + Debug;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Descendants of `scope` matching `selector`, in document order.
    fn query_all_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Parent element of `node`.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Apply one effect. Host failures are logged, never returned.
    fn apply(&mut self, effect: &Effect<Self::Node>);

    /// Apply a batch of effects in order.
    fn apply_all(&mut self, effects: &[Effect<Self::Node>]) {
        for effect in effects {
            self.apply(effect);
        }
    }
}
