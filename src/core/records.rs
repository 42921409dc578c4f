//! Typed views of the profile data source's JSON payloads. Only the fields
//! the scene consumes are modeled; everything else is ignored.

use serde::Deserialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub public_repos: u32,
    pub html_url: String,
}

impl ProfileRecord {
    /// Display name falls back to the login handle.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.login,
        }
    }

    pub fn bio_text(&self) -> &str {
        match self.bio.as_deref() {
            Some(b) if !b.is_empty() => b,
            _ => "No bio available",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub stargazers_count: u64,
}

impl RepoRecord {
    /// Ordered tech-stack tags: primary language first, then topics,
    /// deduplicated case-insensitively and capped at `max`.
    pub fn tech_tags(&self, max: usize) -> SmallVec<[String; 4]> {
        let mut tags: SmallVec<[String; 4]> = SmallVec::new();
        let candidates = self
            .language
            .iter()
            .chain(self.topics.iter())
            .map(String::as_str);
        for tag in candidates {
            if tags.len() >= max {
                break;
            }
            if tag.is_empty() {
                continue;
            }
            if tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                continue;
            }
            tags.push(tag.to_string());
        }
        tags
    }
}
