//! Media gallery: category filter and lightbox.
//!
//! Both features are timed two-phase transitions. Something changes right
//! away (an item enters the layout, the lightbox appears) and a second change
//! follows after a delay so CSS transitions can run. Each is described as a
//! [`Step`]: the immediate change plus one [`Scheduled`] change. The browser
//! bindings apply `now`, then arm a cancellable timer for `later`.
//! Scheduling a new step for the same element cancels the old timer.

use crate::config::{GalleryConfig, millis};
use std::time::Duration;

/// A change applied after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled<T> {
    pub delay: Duration,
    pub change: T,
}

/// An immediate change followed by a delayed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<T> {
    pub now: T,
    pub later: Scheduled<T>,
}

// ============================================================================
// Category filter
// ============================================================================

/// Value of a filter control's `data-filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    /// Whether an item with `category` (its `data-category`) passes.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// Presentation changes applied to a single media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemChange {
    /// Put the item in (`display: block`) or take it out of (`display: none`) the layout.
    Display(bool),
    /// Add `show`, remove `hidden`.
    MarkShown,
    /// Add `hidden`, remove `show`.
    MarkHidden,
}

/// Plan the per-item transitions for a filter click.
///
/// Matching items enter the layout immediately and fade in staggered by
/// their position among *all* items; the rest fade out immediately and leave
/// the layout after the hide delay.
pub fn plan_filter<'a>(
    filter: &Filter,
    categories: impl IntoIterator<Item = Option<&'a str>>,
    timing: &GalleryConfig,
) -> Vec<Step<ItemChange>> {
    categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| {
            if filter.matches(category) {
                Step {
                    now: ItemChange::Display(true),
                    later: Scheduled {
                        delay: stagger(index, timing.reveal_stagger_ms),
                        change: ItemChange::MarkShown,
                    },
                }
            } else {
                Step {
                    now: ItemChange::MarkHidden,
                    later: Scheduled {
                        delay: millis(timing.hide_delay_ms),
                        change: ItemChange::Display(false),
                    },
                }
            }
        })
        .collect()
}

/// Delay for the `index`-th element of a staggered sequence.
pub fn stagger(index: usize, step_ms: u32) -> Duration {
    millis(step_ms).saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

// ============================================================================
// Lightbox
// ============================================================================

/// Value of a media item's `data-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

/// What the lightbox shows for one media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxContent {
    pub title: String,
    /// Paragraphs of the item's info block, newline-joined.
    pub details: String,
    pub image_src: String,
    pub kind: MediaKind,
}

impl LightboxContent {
    pub fn new<I, S>(title: impl Into<String>, paragraphs: I, image_src: impl Into<String>, kind: MediaKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let details = paragraphs
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            title: title.into(),
            details,
            image_src: image_src.into(),
            kind,
        }
    }

    /// Source shown in the lightbox image element.
    ///
    /// Videos have no playback path; their thumbnail is shown instead.
    pub fn display_src(&self) -> &str {
        &self.image_src
    }
}

/// Lightbox presentation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalChange {
    /// Put the lightbox in or out of the layout; page scrolling is locked while it is in.
    Layout(bool),
    /// Add or remove the `show` fade class.
    Fade(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxPhase {
    #[default]
    Hidden,
    Opening,
    Open,
    Closing,
}

/// What a key press in the lightbox should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close(Step<ModalChange>),
    /// Show the item at this index.
    Show(usize),
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Lightbox state: phase plus the index of the media item on display.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    phase: LightboxPhase,
    current: Option<usize>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// In the layout, including while fading out.
    pub fn is_displayed(&self) -> bool {
        self.phase != LightboxPhase::Hidden
    }

    /// Show the item at `index`. Re-opening while displayed just swaps the item.
    pub fn open(&mut self, index: usize, timing: &GalleryConfig) -> Step<ModalChange> {
        self.phase = LightboxPhase::Opening;
        self.current = Some(index);
        Step {
            now: ModalChange::Layout(true),
            later: Scheduled {
                delay: millis(timing.lightbox_fade_in_ms),
                change: ModalChange::Fade(true),
            },
        }
    }

    /// Start fading out. `None` when already hidden or closing.
    pub fn close(&mut self, timing: &GalleryConfig) -> Option<Step<ModalChange>> {
        match self.phase {
            LightboxPhase::Hidden | LightboxPhase::Closing => None,
            LightboxPhase::Opening | LightboxPhase::Open => {
                self.phase = LightboxPhase::Closing;
                Some(Step {
                    now: ModalChange::Fade(false),
                    later: Scheduled {
                        delay: millis(timing.lightbox_fade_out_ms),
                        change: ModalChange::Layout(false),
                    },
                })
            }
        }
    }

    /// The scheduled half of the last step has been applied.
    pub fn settle(&mut self) {
        self.phase = match self.phase {
            LightboxPhase::Opening => LightboxPhase::Open,
            LightboxPhase::Closing => {
                self.current = None;
                LightboxPhase::Hidden
            }
            other => other,
        };
    }

    /// Move to the nearest visible item in `direction`, without wrapping.
    ///
    /// `visible[i]` tells whether item `i` is currently in the layout.
    pub fn step(&mut self, direction: Direction, visible: &[bool]) -> Option<usize> {
        if !matches!(self.phase, LightboxPhase::Opening | LightboxPhase::Open) {
            return None;
        }
        let current = self.current?;
        let next = match direction {
            Direction::Previous => (0..current.min(visible.len())).rev().find(|&i| visible[i]),
            Direction::Next => (current + 1..visible.len()).find(|&i| visible[i]),
        }?;
        self.current = Some(next);
        Some(next)
    }

    /// Handle a `keydown` while the page is focused.
    pub fn on_key(&mut self, key: &str, visible: &[bool], timing: &GalleryConfig) -> KeyAction {
        if !self.is_displayed() {
            return KeyAction::Ignore;
        }
        let action = match key {
            "Escape" => self.close(timing).map(KeyAction::Close),
            "ArrowLeft" => self.step(Direction::Previous, visible).map(KeyAction::Show),
            "ArrowRight" => self.step(Direction::Next, visible).map(KeyAction::Show),
            _ => None,
        };
        action.unwrap_or(KeyAction::Ignore)
    }
}
