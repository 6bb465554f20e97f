//! Shared test doubles for the portfolio-site test suite.
//!
//! Stand-ins for the browser so router, gallery and contact logic can be
//! exercised natively:
//!
//! - [`FakeHost`]: a [`ViewHost`] recording visibility, history and scrolls
//! - [`RecordingSurface`]: a [`FormSurface`] logging every call in order
//! - [`FakeRelay`]: a [`FormRelay`] with a scripted response
//! - [`ItemState`]: the presentation of one media item under filter changes
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut router = test_router();
//! router.open("portfolio");
//! assert_eq!(router.host().visible_panels(), vec!["portfolio"]);
//! assert_eq!(router.host().visible_count(), 1);
//! ```

use std::cell::{Cell, RefCell};

use maud::Markup;

use crate::catalog::Catalog;
use crate::config::{FormConfig, RouterConfig};
use crate::contact::{
    ContactForm, FormRelay, FormSurface, MessageSlot, Posted, RelayError, StatusMessage,
};
use crate::gallery::ItemChange;
use crate::router::{HistoryOp, Router, ViewHost};

// =========================================================================
// Router host
// =========================================================================

#[derive(Debug, Clone)]
pub struct FakePanel {
    pub key: String,
    pub html: String,
    pub visible: bool,
}

/// Records what the router did to the "document".
#[derive(Debug)]
pub struct FakeHost {
    pub main_visible: bool,
    pub panels: Vec<FakePanel>,
    /// Keys in the order their panels were mounted.
    pub mounts: Vec<String>,
    pub history: Vec<HistoryOp>,
    /// `panel:<key>` or `section:<id>`, in order.
    pub scrolls: Vec<String>,
    refuse_mounts: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            main_visible: true,
            panels: Vec::new(),
            mounts: Vec::new(),
            history: Vec::new(),
            scrolls: Vec::new(),
            refuse_mounts: false,
        }
    }

    /// A host where no panel can be mounted (e.g. no `<body>`).
    pub fn refusing_mounts() -> Self {
        Self {
            refuse_mounts: true,
            ..Self::new()
        }
    }

    pub fn visible_panels(&self) -> Vec<String> {
        self.panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.key.clone())
            .collect()
    }

    /// Main page counts as one view.
    pub fn visible_count(&self) -> usize {
        usize::from(self.main_visible) + self.panels.iter().filter(|p| p.visible).count()
    }
}

impl ViewHost for FakeHost {
    type Panel = usize;

    fn show_main(&mut self, visible: bool) {
        self.main_visible = visible;
    }

    fn mount_panel(&mut self, key: &str, contents: Markup) -> Option<usize> {
        if self.refuse_mounts {
            return None;
        }
        self.mounts.push(key.to_string());
        self.panels.push(FakePanel {
            key: key.to_string(),
            html: contents.into_string(),
            visible: false,
        });
        Some(self.panels.len() - 1)
    }

    fn show_panel(&mut self, panel: &usize, visible: bool) {
        self.panels[*panel].visible = visible;
    }

    fn record_history(&mut self, op: &HistoryOp) {
        self.history.push(op.clone());
    }

    fn scroll_to_panel(&mut self, panel: &usize) {
        let key = &self.panels[*panel].key;
        self.scrolls.push(format!("panel:{key}"));
    }

    fn scroll_to_section(&mut self, id: &str) {
        self.scrolls.push(format!("section:{id}"));
    }
}

/// Router over the built-in catalog and default sections.
pub fn test_router() -> Router<FakeHost> {
    Router::new(Catalog::builtin(), RouterConfig::default(), FakeHost::new())
}

// =========================================================================
// Contact form
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Sending(bool),
    Message(StatusMessage),
    Reset,
}

/// A form holding fixed values, logging every call.
///
/// Messages go through a [`MessageSlot`] with the default timeout; timers
/// are fired by hand with [`RecordingSurface::expire`].
pub struct RecordingSurface {
    form: RefCell<ContactForm>,
    events: RefCell<Vec<SurfaceEvent>>,
    slot: RefCell<MessageSlot>,
    posted: RefCell<Vec<Posted>>,
}

impl RecordingSurface {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form: RefCell::new(form),
            events: RefCell::new(Vec::new()),
            slot: RefCell::new(MessageSlot::new(FormConfig::default().message_timeout())),
            posted: RefCell::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.posted.borrow().clone()
    }

    pub fn visible_message(&self) -> Option<StatusMessage> {
        self.slot.borrow().visible().cloned()
    }

    /// Fire the removal timer of message `id`.
    pub fn expire(&self, id: u64) -> bool {
        self.slot.borrow_mut().expire(id)
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn form(&self) -> ContactForm {
        self.form.borrow().clone()
    }
}

impl FormSurface for RecordingSurface {
    fn read(&self) -> ContactForm {
        self.form()
    }

    fn set_sending(&self, sending: bool) {
        self.events.borrow_mut().push(SurfaceEvent::Sending(sending));
    }

    fn show_message(&self, message: &StatusMessage) {
        let posted = self.slot.borrow_mut().post(message.clone());
        self.posted.borrow_mut().push(posted);
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Message(message.clone()));
    }

    fn reset(&self) {
        *self.form.borrow_mut() = ContactForm::default();
        self.events.borrow_mut().push(SurfaceEvent::Reset);
    }
}

#[derive(Debug, Clone, Copy)]
enum Scripted {
    Ok,
    Status(u16),
    Unreachable,
}

/// Relay answering every request the same way.
pub struct FakeRelay {
    response: Scripted,
    calls: Cell<usize>,
    last: RefCell<Option<(String, Vec<(String, String)>)>>,
}

impl FakeRelay {
    fn scripted(response: Scripted) -> Self {
        Self {
            response,
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }

    pub fn ok() -> Self {
        Self::scripted(Scripted::Ok)
    }

    pub fn status(code: u16) -> Self {
        Self::scripted(Scripted::Status(code))
    }

    pub fn unreachable() -> Self {
        Self::scripted(Scripted::Unreachable)
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_request(&self) -> Option<(String, Vec<(String, String)>)> {
        self.last.borrow().clone()
    }
}

impl FormRelay for FakeRelay {
    async fn post(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<(), RelayError> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some((
            endpoint.to_string(),
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        match self.response {
            Scripted::Ok => Ok(()),
            Scripted::Status(code) => Err(RelayError::Status(code)),
            Scripted::Unreachable => Err(RelayError::Network("connection refused".into())),
        }
    }
}

// =========================================================================
// Gallery
// =========================================================================

/// Presentation of one media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub displayed: bool,
    pub shown: bool,
    pub hidden: bool,
}

impl ItemState {
    /// As authored: in the layout, no filter classes.
    pub fn initial() -> Self {
        Self {
            displayed: true,
            shown: false,
            hidden: false,
        }
    }

    pub fn apply(&mut self, change: ItemChange) {
        match change {
            ItemChange::Display(on) => self.displayed = on,
            ItemChange::MarkShown => {
                self.shown = true;
                self.hidden = false;
            }
            ItemChange::MarkHidden => {
                self.hidden = true;
                self.shown = false;
            }
        }
    }
}
