use serde::Serialize;
use tracing::{debug, warn};

use super::{
    Command, Opts,
    output::{self, TabListing},
};
use crate::{
    api::MovieBoxClient,
    common::types::{AnyResult, SubjectId},
    configs::Config,
    log_print, log_println,
    streams::select_and_render,
};

/// Prints either the JSON form of `value` or the human-readable `text`.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> AnyResult<()> {
    if json {
        log_println!("{}", output::to_json(value)?);
    } else {
        log_print!("{}", text(value));
    }
    Ok(())
}

pub async fn run(opts: Opts, config: Config) -> AnyResult<()> {
    let json = opts.json;
    let client = MovieBoxClient::new(config.api)?;

    match opts.command {
        Command::Tabs => {
            let tabs = scan_tabs(&client).await;
            emit(json, &tabs, |t| output::tabs_text(t))
        }
        Command::Categories { tab } => {
            let sections = client.tab_sections(tab).await?;
            emit(json, &sections, |s| output::categories_text(s))
        }
        Command::Items { tab, category } => {
            let sections = client.tab_sections(tab).await?;
            let section = sections.iter().find(|s| s.title == category);
            emit(json, &section, |s| output::items_text(&category, *s))
        }
        Command::Search {
            query,
            page,
            per_page,
        } => {
            let subjects = client.search(&query, page, per_page).await?;
            emit(json, &subjects, |s| output::subjects_text(s))
        }
        Command::Links {
            subject_id,
            season,
            episode,
        } => {
            let subject_id = SubjectId::from(subject_id);
            let streams = client.play_info(&subject_id, season, episode).await?;
            debug!("{} candidate streams for {}", streams.len(), subject_id);
            let selection = select_and_render(streams, client.referer());
            emit(json, &selection, output::links_text)
        }
        Command::Sign {
            method,
            url,
            body,
            timestamp,
        } => {
            let signer = client.signer();
            let body = body.as_deref();
            let headers = match timestamp {
                Some(ts) => signer.sign_at(ts, method, &url, body)?,
                None => signer.sign(method, &url, body)?,
            };
            emit(json, &headers, output::sign_text)
        }
    }
}

/// Probes tabs `0..tab_scan_limit`; a tab that fails is logged and skipped.
pub async fn scan_tabs(client: &MovieBoxClient) -> Vec<TabListing> {
    let mut tabs = Vec::new();
    for tab_id in 0..client.config().tab_scan_limit {
        match client.tab_sections(tab_id).await {
            Ok(sections) if sections.is_empty() => debug!("Tab {} is empty", tab_id),
            Ok(sections) => tabs.push(TabListing { tab_id, sections }),
            Err(e) => warn!("Failed to fetch tab {}: {}", tab_id, e),
        }
    }
    tabs
}
