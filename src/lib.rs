//! # Portfolio Site
//!
//! Client-side behavior for a single-page developer portfolio: a repository
//! detail view switcher kept in sync with the address bar, a filterable media
//! gallery with a lightbox, a handful of scroll and hover effects, and a
//! contact form forwarded to a third-party form relay.
//!
//! The page itself (markup, styles, copy) is static and lives elsewhere. This
//! crate compiles to WebAssembly and attaches to it by element ids and classes.
//!
//! # Architecture: Logic Natively, DOM at the Edge
//!
//! Every behavior with a rule in it is plain Rust with no browser dependency,
//! so it runs under `cargo test` on any machine:
//!
//! ```text
//!              ┌──────────────────────────────┐
//!  DOM events ─▶  web (wasm32 only)           │
//!              │   listeners, timers, fetch   │
//!              └──┬──────────┬──────────┬─────┘
//!                 ▼          ▼          ▼
//!              router     gallery    contact      effects
//!              (reducer)  (filter,   (validate,   (pure style
//!                 │        lightbox)  relay)       math)
//!                 ▼
//!              render (maud) ◀── catalog
//! ```
//!
//! The `web` module is the only code touching `web_sys`. It implements the
//! seams the logic modules define ([`router::ViewHost`],
//! [`contact::FormSurface`]) against the real document.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Repository records shown in detail panels; built-in entries or `catalog.toml` |
//! | [`router`] | `Main` / `Detail(key)` view state, history entries, `#repo-<key>` fragments, panel cache |
//! | [`render`] | Maud markup for detail panels and form status messages |
//! | [`gallery`] | Category filter plan and lightbox state machine |
//! | [`delegate`] | Which control a document click hit: repository card, back button, lightbox trigger |
//! | [`effects`] | Header restyle, parallax, typewriter, ripple and hover values |
//! | [`contact`] | Contact form validation and the submit sequence against a form relay |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Visible State Is Recomputed, Never Toggled
//!
//! The router hides every panel that is not the target and then shows the
//! target, on every transition. Back/Forward, deep links and repeated clicks
//! all converge on the same page no matter what came before, and at most one
//! view is ever visible.
//!
//! ## Every Feature Guards Its Own Elements
//!
//! A missing lightbox or contact form disables that feature only. The
//! bindings look elements up with `Option`-returning queries and skip the
//! feature when anything it needs is absent.
//!
//! ## One Relay Implementation For Both Targets
//!
//! [`contact::ReqwestRelay`] uses reqwest, which is backed by `fetch` on
//! wasm32 and by hyper natively. The browser and the `send` CLI command share
//! the same request code.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod delegate;
pub mod effects;
pub mod gallery;
pub mod output;
pub mod render;
pub mod router;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
