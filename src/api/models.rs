use serde::Serialize;

use crate::common::types::SubjectId;

/// A movie or series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: SubjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
}

/// A titled row of a home-feed tab (a "category").
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Section {
    pub title: String,
    pub subjects: Vec<Subject>,
}

/// `POST search/v2` body. Field order is the order the app sends.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub page: u32,
    pub per_page: u32,
    pub keyword: &'a str,
}
