//! Cosmetic effects: pure computations behind the scroll, hover and load
//! animations. Nothing here holds state; the browser bindings feed in scroll
//! offsets, element rectangles and text, and apply the returned styles.

use std::time::Duration;

use crate::config::millis;

/// Stylesheet for the filter-button ripple, injected once at startup.
pub const RIPPLE_CSS: &str = r#"
    .filter-btn {
        position: relative;
        overflow: hidden;
    }

    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.6);
        transform: scale(0);
        animation: ripple-animation 0.6s linear;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

/// Elements that get `animate` when they scroll into view.
pub const REVEAL_SELECTOR: &str = ".media-item, .section-title, .contact-item";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Elements faded in one after another once the page has loaded.
pub const LOAD_FADE_SELECTOR: &str = ".profile-section, .media-item";

pub const PROFILE_HOVER: Hover = Hover {
    enter: "scale(1.1) rotate(5deg)",
    leave: "scale(1) rotate(0deg)",
};

pub const SOCIAL_HOVER: Hover = Hover {
    enter: "translateY(-10px) scale(1.1)",
    leave: "translateY(0) scale(1)",
};

/// Transform pair applied on `mouseenter` / `mouseleave`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub enter: &'static str,
    pub leave: &'static str,
}

/// Header background and shadow for a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl HeaderStyle {
    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            Self {
                background: "rgba(255, 255, 255, 0.98)",
                box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
            }
        } else {
            Self {
                background: "rgba(255, 255, 255, 0.95)",
                box_shadow: "none",
            }
        }
    }
}

/// `transform` for the hero at a scroll position.
pub fn parallax_transform(scroll_y: f64, rate: f64) -> String {
    let offset = scroll_y * rate;
    // -0.0 would print as "-0"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translateY({offset}px)")
}

/// CSS `animation-delay` for the `index`-th social link.
pub fn animation_delay(index: usize, step_ms: u32) -> String {
    let seconds = index as f64 * f64::from(step_ms) / 1000.0;
    format!("{seconds}s")
}

/// Successive states of a one-character-at-a-time text reveal.
///
/// Yields the empty string first, then each prefix of `text` one `char`
/// longer than the last, so multi-byte scripts never split mid-character.
#[derive(Debug, Clone)]
pub struct Typewriter<'a> {
    text: &'a str,
    next_end: Option<usize>,
}

impl<'a> Typewriter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            next_end: Some(0),
        }
    }
}

impl<'a> Iterator for Typewriter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next_end?;
        let frame = &self.text[..end];
        self.next_end = self.text[end..]
            .chars()
            .next()
            .map(|c| end + c.len_utf8());
        Some(frame)
    }
}

/// Frame schedule for the typewriter: frame `i` is shown at `start + i * speed`.
pub fn typewriter_schedule(
    text: &str,
    start_ms: u32,
    speed_ms: u32,
) -> Vec<(Duration, &str)> {
    let start = millis(start_ms);
    Typewriter::new(text)
        .enumerate()
        .map(|(i, frame)| (start + crate::gallery::stagger(i, speed_ms), frame))
        .collect()
}

/// Position and size of a click ripple, relative to its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Centre a square ripple covering the button on the click point.
    ///
    /// `rect` is `(left, top, width, height)` of the button in client
    /// coordinates; `click` is the pointer position in the same space.
    pub fn at(rect: (f64, f64, f64, f64), click: (f64, f64)) -> Self {
        let (left, top, width, height) = rect;
        let size = width.max(height);
        Self {
            size,
            left: click.0 - left - size / 2.0,
            top: click.1 - top - size / 2.0,
        }
    }

    /// `(property, value)` pairs for the ripple span.
    pub fn style(&self) -> [(&'static str, String); 4] {
        [
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
            ("left", format!("{}px", self.left)),
            ("top", format!("{}px", self.top)),
        ]
    }
}
