//! Navigation-helper providers (native screen containers)

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{NavigationProvider, Node};

/// Native screen containers, toggled with `enable_screens`
#[derive(Debug)]
pub struct NativeScreens {
    enabled: AtomicBool,
}

impl Default for NativeScreens {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl NavigationProvider for NativeScreens {
    fn enable_screens(&self, enabled: bool) -> bool {
        self.enabled.store(enabled, Ordering::SeqCst);
        enabled
    }

    fn screen_container(&self, children: Vec<Node>) -> Node {
        let tag = if self.enabled.load(Ordering::SeqCst) {
            "ScreenContainer"
        } else {
            "View"
        };
        Node::element(tag).with_children(children)
    }

    fn screen(&self, name: &str, active: bool, children: Vec<Node>) -> Node {
        Node::element("Screen")
            .attr("name", name)
            .attr("activityState", if active { "2" } else { "0" })
            .with_children(children)
    }
}

/// Web stand-in: `enable_screens` is a no-op, screens are plain sections
#[derive(Debug, Default, Clone, Copy)]
pub struct WebScreens;

impl NavigationProvider for WebScreens {
    fn enable_screens(&self, enabled: bool) -> bool {
        if enabled {
            tracing::debug!("screens(web): native screens requested, ignoring");
        }
        false
    }

    fn screen_container(&self, children: Vec<Node>) -> Node {
        Node::element("div").with_children(children)
    }

    fn screen(&self, name: &str, active: bool, children: Vec<Node>) -> Node {
        let node = Node::element("section").attr("data-screen", name);
        let node = if active { node } else { node.attr("hidden", "") };
        node.with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_enable_is_noop() {
        assert!(!WebScreens.enable_screens(true));
        assert!(!WebScreens.enable_screens(false));
    }

    #[test]
    fn test_web_inactive_screen_hidden() {
        let children = vec![Node::text("Nutrition plan")];
        let node = WebScreens.screen("nutrition", false, children.clone());
        assert_eq!(node.get_attr("hidden"), Some(""));
        assert_eq!(node.children(), children.as_slice());

        let node = WebScreens.screen("news", true, vec![]);
        assert_eq!(node.get_attr("hidden"), None);
    }

    #[test]
    fn test_native_toggle() {
        let screens = NativeScreens::default();
        assert_eq!(screens.screen_container(vec![]).tag(), Some("ScreenContainer"));
        assert!(!screens.enable_screens(false));
        assert_eq!(screens.screen_container(vec![]).tag(), Some("View"));
    }
}
