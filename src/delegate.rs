//! Delegated click routing.
//!
//! The page keeps one document-level click listener. It walks up from the
//! clicked element to find which control was hit:
//!
//! | Ancestor | Action |
//! |----------|--------|
//! | `[data-repo]` | open that repository's detail panel |
//! | `.back-btn` | return to the main page |
//! | `[data-lightbox]` | open the lightbox on the enclosing media item |
//!
//! A control that carries its own inline `onclick` is left to it, so pages
//! wired with `onclick="openLightbox(this)"` and friends run each action once.

pub const REPO_TRIGGER: &str = "[data-repo]";
pub const BACK_TRIGGER: &str = ".back-btn";
pub const LIGHTBOX_TRIGGER: &str = "[data-lightbox]";

/// Attribute holding an inline click handler.
pub const INLINE_HANDLER: &str = "onclick";

/// The parts of a DOM element the router needs.
pub trait Clicked: Sized {
    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;
    fn attribute(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegated<E> {
    OpenRepository(String),
    BackToMain,
    /// The control that was clicked, inside a media item.
    OpenLightbox(E),
    Ignore,
}

impl<E> Delegated<E> {
    /// Whether the browser's default action (following `href="#"`) is suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Delegated::OpenRepository(_) | Delegated::BackToMain)
    }
}

/// Decide what a click on `target` does.
pub fn route_click<E: Clicked>(target: &E) -> Delegated<E> {
    if let Some(trigger) = target.closest(REPO_TRIGGER) {
        if has_inline_handler(&trigger) {
            return Delegated::Ignore;
        }
        return trigger
            .attribute("data-repo")
            .map_or(Delegated::Ignore, Delegated::OpenRepository);
    }
    if let Some(back) = target.closest(BACK_TRIGGER) {
        if has_inline_handler(&back) {
            return Delegated::Ignore;
        }
        return Delegated::BackToMain;
    }
    match target.closest(LIGHTBOX_TRIGGER) {
        Some(control) if !has_inline_handler(&control) => Delegated::OpenLightbox(control),
        _ => Delegated::Ignore,
    }
}

fn has_inline_handler<E: Clicked>(element: &E) -> bool {
    element.attribute(INLINE_HANDLER).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A detached element chain: the element plus its ancestors.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Node {
        class: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
        parent: Option<Box<Node>>,
    }

    fn el(class: &'static str, attrs: &[(&'static str, &'static str)]) -> Node {
        Node {
            class,
            attrs: attrs.to_vec(),
            parent: None,
        }
    }

    impl Node {
        fn inside(mut self, parent: Node) -> Node {
            self.parent = Some(Box::new(parent));
            self
        }

        fn matches(&self, selector: &str) -> bool {
            if let Some(class) = selector.strip_prefix('.') {
                self.class.split_whitespace().any(|c| c == class)
            } else if let Some(attr) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                self.attrs.iter().any(|(name, _)| *name == attr)
            } else {
                false
            }
        }
    }

    impl Clicked for Node {
        fn closest(&self, selector: &str) -> Option<Self> {
            if self.matches(selector) {
                Some(self.clone())
            } else {
                self.parent.as_deref()?.closest(selector)
            }
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
        }
    }

    fn media_item() -> Node {
        el("media-item", &[("data-category", "photos")])
    }

    #[test]
    fn repo_card_opens_repository() {
        let icon = el("fa-github", &[]).inside(el("repo-card", &[("data-repo", "portfolio")]));
        let routed = route_click(&icon);
        assert_eq!(routed, Delegated::OpenRepository("portfolio".into()));
        assert!(routed.prevents_default());
    }

    #[test]
    fn back_button_returns_to_main() {
        let label = el("label", &[]).inside(el("back-btn", &[("href", "#")]));
        assert_eq!(route_click(&label), Delegated::BackToMain);
    }

    #[test]
    fn expand_control_opens_lightbox() {
        let button = el("expand-btn", &[("data-lightbox", "")]).inside(media_item());
        let icon = el("fa-expand", &[]).inside(button.clone());

        let routed = route_click(&icon);
        assert_eq!(routed, Delegated::OpenLightbox(button));
        assert!(!routed.prevents_default());
    }

    #[test]
    fn inline_handlers_are_left_alone() {
        let lightbox = el(
            "expand-btn",
            &[("data-lightbox", ""), ("onclick", "openLightbox(this)")],
        )
        .inside(media_item());
        let back = el("back-btn", &[("onclick", "goBackToMain()")]);
        let repo = el(
            "repo-card",
            &[("data-repo", "portfolio"), ("onclick", "openRepository('portfolio')")],
        );

        assert_eq!(route_click(&lightbox), Delegated::Ignore);
        assert_eq!(route_click(&back), Delegated::Ignore);
        assert_eq!(route_click(&repo), Delegated::Ignore);
    }

    #[test]
    fn unrelated_clicks_are_ignored() {
        let image = el("thumb", &[]).inside(media_item());
        assert_eq!(route_click(&image), Delegated::Ignore);
        assert!(!Delegated::<Node>::Ignore.prevents_default());
    }
}
