use serde::Serialize;

use crate::{
    api::{Section, Subject},
    auth::AuthHeaders,
    streams::{RenderedStream, Selection},
};

/// Sections of one tab, as listed by `tabs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabListing {
    pub tab_id: u32,
    pub sections: Vec<Section>,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn tabs_text(tabs: &[TabListing]) -> String {
    let mut out = String::new();
    for tab in tabs {
        out.push_str(&format!("\nTAB {}\n", tab.tab_id));
        for section in &tab.sections {
            out.push_str(&format!(" - {}\n", section.title));
        }
    }
    out
}

pub fn categories_text(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| format!("- {}\n", s.title))
        .collect()
}

pub fn subjects_text(subjects: &[Subject]) -> String {
    subjects
        .iter()
        .map(|s| format!("{} => {}\n", s.title, s.subject_id))
        .collect()
}

/// `None` means no section carries that title.
pub fn items_text(category: &str, section: Option<&Section>) -> String {
    match section {
        None => "Category not found\n".to_string(),
        Some(section) if section.subjects.is_empty() => {
            format!("\n{}\n(No items)\n", category)
        }
        Some(section) => format!("\n{}\n{}", category, subjects_text(&section.subjects)),
    }
}

fn rendered_stream_text(rendered: &RenderedStream) -> String {
    let stream = rendered.stream();
    let mut out = format!(
        "\nFORMAT: {}\nRES: {}\nCODEC: {}\nURL: {}\n",
        stream.format,
        stream.resolutions_display(),
        stream.codec_name,
        stream.url
    );

    match rendered {
        RenderedStream::Playable { instruction, .. } => {
            out.push_str(&format!("▶ {}\n", instruction.access.label()));
            out.push_str(&instruction.mpv_command());
            out.push('\n');
            out.push_str(&instruction.ffmpeg_command());
            out.push('\n');
        }
        RenderedStream::Unusable { reason, .. } => {
            out.push_str(&format!("⚠ Stream unusable ({})\n", reason));
        }
    }
    out
}

pub fn links_text(selection: &Selection) -> String {
    match selection {
        Selection::NoStreams => "No streams found\n".to_string(),
        Selection::Ranked(rendered) => rendered.iter().map(rendered_stream_text).collect(),
    }
}

pub fn sign_text(headers: &AuthHeaders) -> String {
    format!(
        "{}: {}\n{}: {}\n",
        AuthHeaders::CLIENT_TOKEN_HEADER,
        headers.client_token,
        AuthHeaders::SIGNATURE_HEADER,
        headers.signature
    )
}
