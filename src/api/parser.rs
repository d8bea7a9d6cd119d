//! Reads the API's JSON envelopes.
//!
//! Missing or mistyped fields read as empty: an absent list is an empty
//! list, an absent string is an empty string.

use serde_json::Value;
use tracing::debug;

use super::models::{Section, Subject};
use crate::{common::types::SubjectId, streams::StreamDescriptor};

fn array<'a>(json: &'a Value, what: &str) -> &'a [Value] {
    match json.as_array() {
        Some(items) => items.as_slice(),
        None => {
            if !json.is_null() {
                debug!("Expected a list for {}, got: {}", what, json);
            } else {
                debug!("Response has no {}", what);
            }
            &[]
        }
    }
}

fn optional_text(json: &Value) -> Option<String> {
    match json {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse_subject(json: &Value) -> Subject {
    Subject {
        subject_id: SubjectId::from_json(&json["subjectId"]).unwrap_or_default(),
        title: json["title"].as_str().unwrap_or_default().to_string(),
        release_date: optional_text(&json["releaseDate"]),
        genre: optional_text(&json["genre"]),
        imdb_rating: optional_text(&json["imdbRatingValue"])
            .or_else(|| optional_text(&json["imdbRating"])),
    }
}

/// Subjects of a section: its `subjects` list when present, otherwise the
/// `subject` of each `customData.items` entry.
pub fn parse_section(json: &Value) -> Section {
    let subjects = if json.get("subjects").is_some() {
        array(&json["subjects"], "section subjects")
            .iter()
            .map(parse_subject)
            .collect()
    } else {
        array(&json["customData"]["items"], "section customData items")
            .iter()
            .filter(|item| item["subject"].is_object())
            .map(|item| parse_subject(&item["subject"]))
            .collect()
    };

    Section {
        title: json["title"].as_str().unwrap_or_default().to_string(),
        subjects,
    }
}

/// `tab-operating` → `data.items[]`
pub fn parse_sections(json: &Value) -> Vec<Section> {
    array(&json["data"]["items"], "data.items")
        .iter()
        .map(parse_section)
        .collect()
}

/// `search/v2` → every subject of every `data.results[]` group, in order.
pub fn parse_search_results(json: &Value) -> Vec<Subject> {
    array(&json["data"]["results"], "data.results")
        .iter()
        .flat_map(|group| array(&group["subjects"], "result subjects"))
        .map(parse_subject)
        .collect()
}

/// `play-info` → `data.streams[]`
pub fn parse_streams(json: &Value) -> Vec<StreamDescriptor> {
    array(&json["data"]["streams"], "data.streams")
        .iter()
        .map(StreamDescriptor::from_json)
        .collect()
}
