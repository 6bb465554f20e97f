//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, tested) and
//! a `print_*` wrapper writing them to stdout.
//!
//! ## Catalog
//!
//! ```text
//! 001 Personal Portfolio (portfolio)
//!     Commits: 150+  Files: 25  Languages: 3  Size: 2.5 MB
//!     Tech: HTML5, CSS3, JavaScript, Responsive Design
//!     5 features
//!     GitHub: https://github.com/md-hasibur-rahman/portfolio
//!     Live: https://md-hasibur-rahman.github.io/portfolio
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     Form endpoint: https://formspree.io/f/abcd
//!     Main sections: home, pinterest, projects, contact
//! Catalog
//!     6 repositories
//! ```

use crate::catalog::{Catalog, Repository};
use crate::config::SiteConfig;
use crate::contact::{MessageKind, StatusMessage};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn repository_lines(index: usize, key: &str, repo: &Repository) -> Vec<String> {
    let mut lines = vec![format!("{} {} ({})", format_index(index), repo.title, key)];
    let s = &repo.stats;
    lines.push(format!(
        "{}Commits: {}  Files: {}  Languages: {}  Size: {}",
        indent(1),
        s.commits,
        s.files,
        s.languages,
        s.size
    ));
    if !repo.technologies.is_empty() {
        lines.push(format!("{}Tech: {}", indent(1), repo.technologies.join(", ")));
    }
    match repo.features.len() {
        0 => {}
        1 => lines.push(format!("{}1 feature", indent(1))),
        n => lines.push(format!("{}{} features", indent(1), n)),
    }
    lines.push(format!("{}GitHub: {}", indent(1), repo.github_url));
    lines.push(format!("{}Live: {}", indent(1), repo.live_url));
    lines
}

pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .enumerate()
        .flat_map(|(i, (key, repo))| repository_lines(i + 1, key, repo))
        .collect()
}

pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{}", line);
    }
}

pub fn format_check(config: &SiteConfig, catalog: &Catalog) -> Vec<String> {
    let endpoint = if config.form.endpoint.is_empty() {
        "(form action)"
    } else {
        config.form.endpoint.as_str()
    };
    let count = match catalog.len() {
        1 => "1 repository".to_string(),
        n => format!("{n} repositories"),
    };
    vec![
        "Config".to_string(),
        format!("{}Form endpoint: {}", indent(1), endpoint),
        format!(
            "{}Main sections: {}",
            indent(1),
            config.router.main_sections.join(", ")
        ),
        "Catalog".to_string(),
        format!("{}{}", indent(1), count),
    ]
}

pub fn print_check(config: &SiteConfig, catalog: &Catalog) {
    for line in format_check(config, catalog) {
        println!("{}", line);
    }
}

/// One status line for a contact-form message.
pub fn format_status(message: &StatusMessage) -> String {
    let marker = match message.kind {
        MessageKind::Success => "✓",
        MessageKind::Error => "✗",
    };
    format!("{} {}", marker, message.text)
}
