//! Gesture providers

use crate::domain::{Gesture, GestureProvider, Node};

/// Native gesture handler components
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGestures;

impl GestureProvider for NativeGestures {
    fn root_view(&self, children: Vec<Node>) -> Node {
        Node::element("GestureHandlerRootView").with_children(children)
    }

    fn detector(&self, gesture: Gesture, children: Vec<Node>) -> Node {
        Node::element("GestureDetector")
            .attr("gesture", gesture.as_str())
            .with_children(children)
    }

    fn recognizes(&self, _gesture: Gesture) -> bool {
        true
    }
}

/// Web stand-in: plain containers, no recognition
#[derive(Debug, Default, Clone, Copy)]
pub struct WebGestures;

impl GestureProvider for WebGestures {
    fn root_view(&self, children: Vec<Node>) -> Node {
        Node::element("div").with_children(children)
    }

    fn detector(&self, gesture: Gesture, children: Vec<Node>) -> Node {
        tracing::trace!("gesture(web): '{}' rendered without a recognizer", gesture.as_str());
        Node::element("div")
            .attr("data-gesture", gesture.as_str())
            .with_children(children)
    }

    fn recognizes(&self, _gesture: Gesture) -> bool {
        false
    }
}
