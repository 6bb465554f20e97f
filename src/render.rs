//! Markup for the parts of the page built at runtime.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the page tooling:
//! every interpolated catalog string is escaped, so repository text can never
//! inject markup into the detail panel.
//!
//! - [`repository_panel`]: body of a `section.repo-page` detail panel
//! - [`form_message`]: body of the `div.form-message` shown under the contact form
//! - [`sending_label`]: submit button contents while a message is in flight
//!
//! The surrounding elements (`section#repo-<key>`, `div.form-message`) are
//! created by whoever mounts the markup; only their contents are rendered here.

use crate::catalog::Repository;
use crate::contact::{MessageKind, StatusMessage};
use maud::{Markup, html};

const BACK_LABEL: &str = "মূল পেজে ফিরুন";
const TECH_HEADING: &str = "ব্যবহৃত প্রযুক্তি";
const FEATURES_HEADING: &str = "মূল বৈশিষ্ট্যসমূহ";
const GITHUB_LABEL: &str = "GitHub দেখুন";
const LIVE_LABEL: &str = "লাইভ দেখুন";

/// Renders the contents of a repository detail panel.
pub fn repository_panel(repo: &Repository) -> Markup {
    let stats = [
        (&repo.stats.commits, "কমিট"),
        (&repo.stats.files, "ফাইল"),
        (&repo.stats.languages, "ভাষা"),
        (&repo.stats.size, "সাইজ"),
    ];

    html! {
        div.container {
            div.repo-header {
                a.back-btn href="#" {
                    i.fas.fa-arrow-left {}
                    " " (BACK_LABEL)
                }
                h1.section-title { (repo.title) }
                p.section-subtitle { (repo.description) }
            }
            div.repo-content {
                div.repo-stats {
                    @for (value, label) in stats {
                        div.stat-card {
                            span.stat-number { (value) }
                            span.stat-label { (label) }
                        }
                    }
                }
                h3 { (TECH_HEADING) }
                div.project-tech {
                    @for tech in &repo.technologies {
                        span.tech-tag { (tech) }
                    }
                }
                h3 { (FEATURES_HEADING) }
                ul.repo-features {
                    @for feature in &repo.features {
                        li { (feature) }
                    }
                }
                div.project-actions {
                    a.btn-primary href=(repo.github_url) target="_blank" rel="noopener" {
                        i.fab.fa-github {}
                        " " (GITHUB_LABEL)
                    }
                    a.btn-secondary href=(repo.live_url) target="_blank" rel="noopener" {
                        i.fas.fa-external-link-alt {}
                        " " (LIVE_LABEL)
                    }
                }
            }
        }
    }
}

/// Renders the icon and text of a form status message.
pub fn form_message(message: &StatusMessage) -> Markup {
    let icon = match message.kind {
        MessageKind::Success => "fa-check-circle",
        MessageKind::Error => "fa-exclamation-circle",
    };
    html! {
        i class={ "fas " (icon) } {}
        span { (message.text) }
    }
}

/// Renders the submit button contents shown while sending.
pub fn sending_label(text: &str) -> Markup {
    html! {
        i.fas.fa-spinner.fa-spin {}
        " " (text)
    }
}
