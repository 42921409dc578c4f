// Host-side tests for data-source record parsing and tag assembly.
// The main crate is wasm-only, so we include the pure module directly.

#![allow(dead_code)]
#[path = "../src/core/records.rs"]
mod records;

use records::{ProfileRecord, RepoRecord};

#[test]
fn profile_parses_the_consumed_fields_and_ignores_the_rest() {
    let body = r#"{
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.example/u/583231",
        "name": "The Octocat",
        "company": "GitHub",
        "bio": null,
        "public_repos": 8,
        "followers": 3000,
        "html_url": "https://github.com/octocat"
    }"#;
    let profile: ProfileRecord = serde_json::from_str(body).unwrap();
    assert_eq!(profile.display_name(), "The Octocat");
    assert_eq!(profile.bio_text(), "No bio available");
    assert_eq!(profile.public_repos, 8);
    assert_eq!(profile.html_url, "https://github.com/octocat");
}

#[test]
fn profile_display_name_falls_back_to_login() {
    let body = r#"{
        "login": "octocat",
        "avatar_url": "a",
        "name": null,
        "public_repos": 0,
        "html_url": "h"
    }"#;
    let profile: ProfileRecord = serde_json::from_str(body).unwrap();
    assert_eq!(profile.display_name(), "octocat");
}

#[test]
fn repo_listing_parses_with_missing_optionals() {
    let body = r#"[
        {"name": "zmk-config", "language": null, "stargazers_count": 2},
        {"name": "viewer", "language": "Rust", "topics": ["wasm", "webgpu"], "stargazers_count": 41}
    ]"#;
    let repos: Vec<RepoRecord> = serde_json::from_str(body).unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].language, None);
    assert!(repos[0].topics.is_empty());
    assert_eq!(repos[1].stargazers_count, 41);
}

#[test]
fn tech_tags_put_the_language_first_then_topics() {
    let repo = RepoRecord {
        name: "viewer".into(),
        language: Some("Rust".into()),
        topics: vec!["wasm".into(), "webgpu".into()],
        stargazers_count: 0,
    };
    let tags = repo.tech_tags(6);
    assert_eq!(tags.as_slice(), ["Rust", "wasm", "webgpu"]);
}

#[test]
fn tech_tags_deduplicate_case_insensitively_and_cap() {
    let repo = RepoRecord {
        name: "viewer".into(),
        language: Some("Rust".into()),
        topics: vec![
            "rust".into(),
            "wasm".into(),
            "".into(),
            "webgpu".into(),
            "graphics".into(),
            "viewer".into(),
        ],
        stargazers_count: 0,
    };
    let tags = repo.tech_tags(4);
    assert_eq!(tags.as_slice(), ["Rust", "wasm", "webgpu", "graphics"]);
}

#[test]
fn tech_tags_without_language_start_at_the_topics() {
    let repo = RepoRecord {
        name: "zmk-config".into(),
        language: None,
        topics: vec!["keyboard".into()],
        stargazers_count: 2,
    };
    assert_eq!(repo.tech_tags(6).as_slice(), ["keyboard"]);
}
