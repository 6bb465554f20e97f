//! Contact form submission.
//!
//! The sequence run on every submit:
//!
//! ```text
//! read fields ─▶ validate ──✗──▶ inline error, no request
//!                   │
//!                   ✓
//!                   ▼
//!      disable button, "Sending..." label
//!                   │
//!           POST to form relay
//!           (Accept: application/json)
//!             │            │
//!            2xx       other / network error
//!             ▼            ▼
//!     success message   failure message
//!       + reset form    (fields kept)
//!             └─────┬──────┘
//!                   ▼
//!      re-enable button, restore label
//! ```
//!
//! Two traits keep the sequence independent of the browser: [`FormSurface`]
//! is the form as the user sees it and [`FormRelay`] is the outbound HTTP call.
//! [`ReqwestRelay`] implements the relay on both native and wasm32 targets
//! (reqwest uses `fetch` in the browser).
//!
//! Submissions are not guarded against re-entry: the disabled button is the
//! only thing stopping a second submit while one is outstanding.

use regex::Regex;
use std::fmt;
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const SUCCESS_TEXT: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_TEXT: &str =
    "Oops! There was a problem sending your message. Please try again.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// The four required fields, identified by their element id / form name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Element id and submitted field name.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Validation failures. The `Display` text is what the visitor sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingField(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("form relay answered with HTTP {0}")]
    Status(u16),
}

/// Field values as read from the form, trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Other named controls (relay settings, honeypots), posted unchanged.
    pub extra: Vec<(String, String)>,
}

impl ContactForm {
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        subject: impl AsRef<str>,
        message: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
            subject: subject.as_ref().trim().to_string(),
            message: message.as_ref().trim().to_string(),
            extra: Vec::new(),
        }
    }

    /// Add a control that is not one of the four validated fields.
    /// Names of the validated fields are ignored; their trimmed values win.
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() && !Field::ALL.iter().any(|f| f.id() == name) {
            self.extra.push((name, value.into()));
        }
        self
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// All fields must be non-empty, then the email must look like `local@domain.tld`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(field) = Field::ALL.into_iter().find(|f| self.value(*f).is_empty()) {
            return Err(ValidationError::MissingField(field));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// `(name, value)` pairs in submission order: the validated fields, then the rest.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        Field::ALL
            .iter()
            .map(|f| (f.id(), self.value(*f)))
            .chain(self.extra.iter().map(|(n, v)| (n.as_str(), v.as_str())))
            .collect()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Modifier class next to `form-message`.
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// The single status message shown below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success() -> Self {
        Self {
            kind: MessageKind::Success,
            text: SUCCESS_TEXT.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            kind: MessageKind::Error,
            text: FAILURE_TEXT.to_string(),
        }
    }

    pub fn invalid(error: &ValidationError) -> Self {
        Self {
            kind: MessageKind::Error,
            text: error.to_string(),
        }
    }
}

/// The message area under the form.
///
/// Holds at most one message. Posting a new one replaces whatever is shown,
/// and each message is removed after the timeout unless a newer one has
/// already taken its place.
#[derive(Debug, Clone)]
pub struct MessageSlot {
    timeout: Duration,
    current: Option<(u64, StatusMessage)>,
    posted: u64,
}

/// What the page must do to show a posted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posted {
    /// Hand back to [`MessageSlot::expire`] once `expires_in` has elapsed.
    pub id: u64,
    /// An earlier message is still displayed and must be removed first.
    pub replaces: bool,
    pub expires_in: Duration,
}

impl MessageSlot {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
            posted: 0,
        }
    }

    pub fn post(&mut self, message: StatusMessage) -> Posted {
        self.posted += 1;
        let replaces = self.current.replace((self.posted, message)).is_some();
        Posted {
            id: self.posted,
            replaces,
            expires_in: self.timeout,
        }
    }

    /// Remove message `id` if it is still the one shown. Returns whether it was.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|(current, _)| *current == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn visible(&self) -> Option<&StatusMessage> {
        self.current.as_ref().map(|(_, message)| message)
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(ValidationError),
    /// The relay accepted the message.
    Sent,
    /// The relay rejected the message or could not be reached.
    Failed,
}

/// The form as presented to the visitor.
///
/// Methods take `&self` so a browser implementation can be shared with the
/// pending future while other event handlers keep running.
pub trait FormSurface {
    /// Current field values.
    fn read(&self) -> ContactForm;
    /// Disable the submit control and show the sending label, or restore both.
    fn set_sending(&self, sending: bool);
    /// Replace any visible status message with `message`.
    fn show_message(&self, message: &StatusMessage);
    /// Clear every field.
    fn reset(&self);
}

/// The external endpoint the form is forwarded to.
pub trait FormRelay {
    /// POST `fields` to `endpoint`. `Ok` only for a 2xx response.
    fn post(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = Result<(), RelayError>>;
}

/// Form relay over reqwest, one attempt per call.
#[derive(Debug, Clone, Default)]
pub struct ReqwestRelay {
    client: reqwest::Client,
}

impl ReqwestRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormRelay for ReqwestRelay {
    async fn post(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<(), RelayError> {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(fields)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RelayError::Status(status.as_u16()))
        }
    }
}

/// Run one submit attempt against `surface`, forwarding through `relay`.
pub async fn submit<S, R>(surface: &S, relay: &R, endpoint: &str) -> SubmitOutcome
where
    S: FormSurface + ?Sized,
    R: FormRelay + ?Sized,
{
    let form = surface.read();
    if let Err(error) = form.validate() {
        surface.show_message(&StatusMessage::invalid(&error));
        return SubmitOutcome::Invalid(error);
    }

    surface.set_sending(true);
    let outcome = match relay.post(endpoint, &form.fields()).await {
        Ok(()) => {
            info!(endpoint, "contact message sent");
            surface.show_message(&StatusMessage::success());
            surface.reset();
            SubmitOutcome::Sent
        }
        Err(error) => {
            warn!(endpoint, %error, "form submission error");
            surface.show_message(&StatusMessage::failure());
            SubmitOutcome::Failed
        }
    };
    surface.set_sending(false);
    outcome
}
