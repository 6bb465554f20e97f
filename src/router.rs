//! Repository detail router.
//!
//! The page shows exactly one of two things: the main sections, or the detail
//! panel of one catalog repository. That choice is a [`ViewState`]; user
//! actions and history navigation are [`Action`]s; [`transition`] is the pure
//! reducer deciding the next state together with the history entry to record.
//!
//! [`Router`] applies transitions to a [`ViewHost`] (the DOM in the browser,
//! a recording fake in tests):
//!
//! ```text
//! action ─▶ transition() ─▶ ensure panel built ─▶ hide/show ─▶ history ─▶ scroll
//!                │
//!                └─ None (unknown key): nothing changes
//! ```
//!
//! The visible elements are recomputed from the target state on every
//! transition, never toggled relative to the previous one. Replaying any
//! sequence of actions therefore converges on the same page as applying the
//! last effective one alone.
//!
//! ## History
//!
//! | Action | Entry |
//! |--------|-------|
//! | `Open(key)` | push `{repo: key}`, URL `#repo-<key>` |
//! | `Close` | push `{}`, home URL |
//! | `Restore(..)` (popstate) | none, the browser already moved |
//! | `Load(fragment)` | replace with `{repo: key}` so Back/Forward can restore it |
//!
//! ## Panel cache
//!
//! Panels are built on first visit and kept for the page's lifetime; nothing
//! is ever evicted.

use crate::catalog::Catalog;
use crate::config::RouterConfig;
use crate::render;
use maud::Markup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

const FRAGMENT_PREFIX: &str = "#repo-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Main,
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a repository's detail panel.
    Open(String),
    /// Return to the main sections.
    Close,
    /// Browser back/forward landed on an entry carrying this state.
    Restore(Option<HistoryState>),
    /// Initial page load with this URL fragment (including `#`).
    Load(String),
}

/// The state object stored with each history entry.
///
/// Serializes to `{"repo": "<key>"}` or `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl HistoryState {
    pub fn repo(key: &str) -> Self {
        Self {
            repo: Some(key.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: HistoryState,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOp {
    Push(HistoryEntry),
    Replace(HistoryEntry),
    Keep,
}

/// Result of a successful reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ViewState,
    pub history: HistoryOp,
}

/// Element id of a repository's detail panel.
pub fn panel_id(key: &str) -> String {
    format!("repo-{key}")
}

/// URL fragment addressing a repository's detail panel.
pub fn fragment_for(key: &str) -> String {
    format!("{FRAGMENT_PREFIX}{key}")
}

/// Extract the repository key from a `#repo-<key>` fragment.
pub fn parse_fragment(fragment: &str) -> Option<&str> {
    fragment
        .strip_prefix(FRAGMENT_PREFIX)
        .filter(|key| !key.is_empty())
}

/// Decide the next state for `action`. `None` means the action is ignored.
pub fn transition(catalog: &Catalog, home: &RouterConfig, action: &Action) -> Option<Transition> {
    let detail = |key: &str| {
        let repo = catalog.get(key)?;
        Some((
            ViewState::Detail(key.to_string()),
            HistoryEntry {
                state: HistoryState::repo(key),
                title: repo.title.clone(),
                url: fragment_for(key),
            },
        ))
    };

    match action {
        Action::Open(key) => detail(key.as_str()).map(|(next, entry)| Transition {
            next,
            history: HistoryOp::Push(entry),
        }),
        Action::Close => Some(Transition {
            next: ViewState::Main,
            history: HistoryOp::Push(HistoryEntry {
                state: HistoryState::default(),
                title: home.home_title.clone(),
                url: home.home_url.clone(),
            }),
        }),
        Action::Restore(state) => match state
            .as_ref()
            .and_then(|s| s.repo.as_deref())
            .filter(|key| !key.is_empty())
        {
            Some(key) => detail(key).map(|(next, _)| Transition {
                next,
                history: HistoryOp::Keep,
            }),
            None => Some(Transition {
                next: ViewState::Main,
                history: HistoryOp::Keep,
            }),
        },
        Action::Load(fragment) => {
            let key = parse_fragment(fragment)?;
            detail(key).map(|(next, entry)| Transition {
                next,
                history: HistoryOp::Replace(entry),
            })
        }
    }
}

/// The state after `action`; ignored actions leave `state` unchanged.
pub fn reduce(catalog: &Catalog, home: &RouterConfig, state: &ViewState, action: &Action) -> ViewState {
    transition(catalog, home, action)
        .map(|t| t.next)
        .unwrap_or_else(|| state.clone())
}

/// The document the router drives.
///
/// Missing elements are the host's concern: a host may skip sections it cannot
/// find, but `mount_panel` returning `None` aborts the transition so the page
/// never ends up with nothing visible.
pub trait ViewHost {
    /// Handle to a mounted detail panel.
    type Panel;

    /// Show or hide every main-page section.
    fn show_main(&mut self, visible: bool);
    /// Build (or adopt an existing) panel for `key` with the given contents.
    fn mount_panel(&mut self, key: &str, contents: Markup) -> Option<Self::Panel>;
    fn show_panel(&mut self, panel: &Self::Panel, visible: bool);
    fn record_history(&mut self, op: &HistoryOp);
    fn scroll_to_panel(&mut self, panel: &Self::Panel);
    fn scroll_to_section(&mut self, id: &str);
}

pub struct Router<H: ViewHost> {
    catalog: Catalog,
    home: RouterConfig,
    state: ViewState,
    panels: BTreeMap<String, H::Panel>,
    host: H,
}

impl<H: ViewHost> Router<H> {
    pub fn new(catalog: Catalog, home: RouterConfig, host: H) -> Self {
        Self {
            catalog,
            home,
            state: ViewState::Main,
            panels: BTreeMap::new(),
            host,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Number of panels built so far.
    pub fn cached_panels(&self) -> usize {
        self.panels.len()
    }

    pub fn open(&mut self, key: &str) -> bool {
        self.dispatch(Action::Open(key.to_string()))
    }

    pub fn close(&mut self) -> bool {
        self.dispatch(Action::Close)
    }

    pub fn restore(&mut self, state: Option<HistoryState>) -> bool {
        self.dispatch(Action::Restore(state))
    }

    pub fn load(&mut self, fragment: &str) -> bool {
        self.dispatch(Action::Load(fragment.to_string()))
    }

    /// Apply `action`. Returns whether anything changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let Some(Transition { next, history }) = transition(&self.catalog, &self.home, &action)
        else {
            debug!(?action, "ignoring router action");
            return false;
        };

        if let ViewState::Detail(key) = &next {
            if !self.ensure_panel(key) {
                warn!(key = key.as_str(), "detail panel could not be mounted");
                return false;
            }
        }

        self.present(&next);
        self.host.record_history(&history);
        match &next {
            ViewState::Detail(key) => {
                if let Some(panel) = self.panels.get(key) {
                    self.host.scroll_to_panel(panel);
                }
            }
            ViewState::Main => self.host.scroll_to_section(&self.home.return_section),
        }

        info!(from = ?self.state, to = ?next, "view changed");
        self.state = next;
        true
    }

    fn ensure_panel(&mut self, key: &str) -> bool {
        if self.panels.contains_key(key) {
            return true;
        }
        let Some(repo) = self.catalog.get(key) else {
            return false;
        };
        match self.host.mount_panel(key, render::repository_panel(repo)) {
            Some(panel) => {
                self.panels.insert(key.to_string(), panel);
                true
            }
            None => false,
        }
    }

    /// Make the host match `target`: everything else hidden first, then the target shown.
    fn present(&mut self, target: &ViewState) {
        let current = match target {
            ViewState::Detail(key) => Some(key.as_str()),
            ViewState::Main => None,
        };
        for (key, panel) in &self.panels {
            if Some(key.as_str()) != current {
                self.host.show_panel(panel, false);
            }
        }
        self.host.show_main(current.is_none());
        if let Some(panel) = current.and_then(|key| self.panels.get(key)) {
            self.host.show_panel(panel, true);
        }
    }
}
