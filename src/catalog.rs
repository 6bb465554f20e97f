//! The repository catalog shown in detail panels.
//!
//! A fixed mapping from a short key (`portfolio`, `web-projects`, ...) to the
//! record rendered when that repository is opened. The built-in entries are
//! the published ones; a `catalog.toml` next to `config.toml` replaces them
//! wholesale:
//!
//! ```toml
//! [repos.portfolio]
//! title = "Personal Portfolio"
//! description = "..."
//! technologies = ["HTML5", "CSS3"]
//! features = ["Fully Responsive Design"]
//! github_url = "https://github.com/me/portfolio"
//! live_url = "https://me.github.io/portfolio"
//!
//! [repos.portfolio.stats]
//! commits = "150+"
//! files = "25"
//! languages = "3"
//! size = "2.5 MB"
//! ```
//!
//! The catalog is immutable once built. Keys double as URL fragments
//! (`#repo-<key>`), so they are restricted to lowercase ASCII letters,
//! digits, `-` and `_`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid repository key '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidKey(String),
    #[error("repository '{key}' has an invalid URL '{url}'")]
    InvalidUrl { key: String, url: String },
    #[error("catalog has no repositories")]
    Empty,
}

/// Display statistics shown as four cards at the top of a detail panel.
///
/// Kept as free-form strings: the page shows values like `"150+"` or `"2.5 MB"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoStats {
    pub commits: String,
    pub files: String,
    pub languages: String,
    pub size: String,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repository {
    pub title: String,
    pub description: String,
    /// Technology names, in display order.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Feature descriptions, in display order.
    #[serde(default)]
    pub features: Vec<String>,
    pub stats: RepoStats,
    pub github_url: String,
    pub live_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    repos: BTreeMap<String, Repository>,
}

impl Catalog {
    pub fn new(repos: BTreeMap<String, Repository>) -> Self {
        Self { repos }
    }

    pub fn get(&self, key: &str) -> Option<&Repository> {
        self.repos.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.repos.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Repository)> {
        self.repos.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check keys are fragment-safe and every URL is absolute.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.repos.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (key, repo) in &self.repos {
            if !is_valid_key(key) {
                return Err(CatalogError::InvalidKey(key.clone()));
            }
            for url in [&repo.github_url, &repo.live_url] {
                if reqwest::Url::parse(url).is_err() {
                    return Err(CatalogError::InvalidUrl {
                        key: key.clone(),
                        url: url.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The catalog published with the page.
    pub fn builtin() -> Self {
        let entries = [
            (
                "portfolio",
                Repository {
                    title: "Personal Portfolio".into(),
                    description: "My complete portfolio website showcasing 3 years of software development experience and professional journey.".into(),
                    technologies: strings(&["HTML5", "CSS3", "JavaScript", "Responsive Design"]),
                    features: strings(&[
                        "Fully Responsive Design",
                        "Animated UI Elements",
                        "Interactive Project Gallery",
                        "Multi-Repository Navigation",
                        "Professional Contact Form",
                    ]),
                    stats: stats("150+", "25", "3", "2.5 MB"),
                    github_url: "https://github.com/md-hasibur-rahman/portfolio".into(),
                    live_url: "https://md-hasibur-rahman.github.io/portfolio".into(),
                },
            ),
            (
                "web-projects",
                Repository {
                    title: "ওয়েব ডেভেলপমেন্ট প্রজেক্ট".into(),
                    description: "বিভিন্ন ধরনের ওয়েব অ্যাপ্লিকেশন এবং ওয়েবসাইট যা আমি তৈরি করেছি।".into(),
                    technologies: strings(&["React", "Node.js", "Express", "MongoDB", "Firebase"]),
                    features: strings(&[
                        "ই-কমার্স ওয়েবসাইট",
                        "ব্লগিং প্ল্যাটফর্ম",
                        "টাস্ক ম্যানেজমেন্ট অ্যাপ",
                        "রিয়েল-টাইম চ্যাট অ্যাপ",
                        "ওয়েদার অ্যাপ্লিকেশন",
                    ]),
                    stats: stats("300+", "120", "5", "15 MB"),
                    github_url: "https://github.com/md-hasibur-rahman/web-projects".into(),
                    live_url: "https://md-hasibur-rahman.github.io/web-projects".into(),
                },
            ),
            (
                "mobile-apps",
                Repository {
                    title: "মোবাইল অ্যাপ্লিকেশন".into(),
                    description: "Android এবং iOS প্ল্যাটফর্মের জন্য তৈরি করা বিভিন্ন মোবাইল অ্যাপ।".into(),
                    technologies: strings(&["Flutter", "React Native", "Firebase", "SQLite"]),
                    features: strings(&[
                        "ক্রস-প্ল্যাটফর্ম অ্যাপ",
                        "অফলাইন ডেটা স্টোরেজ",
                        "পুশ নোটিফিকেশন",
                        "সোশ্যাল লগইন",
                        "পেমেন্ট ইন্টিগ্রেশন",
                    ]),
                    stats: stats("200+", "80", "4", "10 MB"),
                    github_url: "https://github.com/md-hasibur-rahman/mobile-apps".into(),
                    live_url: "https://play.google.com/store/apps/developer?id=md-hasibur-rahman".into(),
                },
            ),
            (
                "data-science",
                Repository {
                    title: "ডেটা সাইন্স প্রজেক্ট".into(),
                    description: "মেশিন লার্নিং, ডেটা অ্যানালাইসিস এবং AI সংক্রান্ত প্রজেক্টসমূহ।".into(),
                    technologies: strings(&["Python", "TensorFlow", "Pandas", "Jupyter", "Scikit-learn"]),
                    features: strings(&[
                        "প্রেডিক্টিভ মডেলিং",
                        "ডেটা ভিজুয়ালাইজেশন",
                        "নেচারাল ল্যাঙ্গুয়েজ প্রসেসিং",
                        "ইমেজ রিকগনিশন",
                        "টাইম সিরিজ অ্যানালাইসিস",
                    ]),
                    stats: stats("180+", "45", "2", "25 MB"),
                    github_url: "https://github.com/md-hasibur-rahman/legal-software".into(),
                    live_url: "https://md-hasibur-rahman.github.io/legal-software".into(),
                },
            ),
            (
                "game-dev",
                Repository {
                    title: "গেম ডেভেলপমেন্ট".into(),
                    description: "বিভিন্ন ধরনের গেম এবং ইন্টারঅ্যাক্টিভ অ্যাপ্লিকেশন।".into(),
                    technologies: strings(&["Unity", "C#", "JavaScript", "HTML5 Canvas"]),
                    features: strings(&[
                        "2D/3D গেম",
                        "মাল্টিপ্লেয়ার সাপোর্ট",
                        "মোবাইল গেম",
                        "ওয়েব-বেসড গেম",
                        "AR/VR এক্সপেরিয়েন্স",
                    ]),
                    stats: stats("250+", "200", "3", "50 MB"),
                    github_url: "https://github.com/md-hasibur-rahman/enterprise-solutions".into(),
                    live_url: "https://md-hasibur-rahman.github.io/enterprise-solutions".into(),
                },
            ),
            (
                "open-source",
                Repository {
                    title: "ওপেন সোর্স কন্ট্রিবিউশন".into(),
                    description: "বিভিন্ন ওপেন সোর্স প্রজেক্টে আমার অবদান এবং কমিউনিটি কাজ।".into(),
                    technologies: strings(&["Various", "Git", "GitHub Actions", "Documentation"]),
                    features: strings(&[
                        "বাগ ফিক্স",
                        "নতুন ফিচার যোগ",
                        "ডকুমেন্টেশন উন্নতি",
                        "কোড রিভিউ",
                        "কমিউনিটি সাপোর্ট",
                    ]),
                    stats: stats("500+", "300+", "10+", "100+ MB"),
                    github_url: "https://github.com/md-hasibur-rahman/government-projects".into(),
                    live_url: "https://github.com/md-hasibur-rahman".into(),
                },
            ),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(key, repo)| (key.to_string(), repo))
                .collect(),
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stats(commits: &str, files: &str, languages: &str, size: &str) -> RepoStats {
    RepoStats {
        commits: commits.into(),
        files: files.into(),
        languages: languages.into(),
        size: size.into(),
    }
}

/// Keys end up in element ids and URL fragments.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Load `catalog.toml` from a directory, falling back to the built-in catalog.
pub fn load_catalog(dir: &Path) -> Result<Catalog, CatalogError> {
    let path = dir.join("catalog.toml");
    if !path.exists() {
        return Ok(Catalog::builtin());
    }
    let content = fs::read_to_string(&path)?;
    Catalog::from_toml_str(&content)
}
