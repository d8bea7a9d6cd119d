use reqwest::{Url, header};
use serde_json::Value;
use tracing::{debug, info};

use super::{
    models::{SearchRequest, Section, Subject},
    parser::{parse_search_results, parse_sections, parse_streams},
};
use crate::{
    auth::{HttpMethod, RequestSigner, canonical::ACCEPT, canonical::CONTENT_TYPE},
    common::{
        errors::{MovieBoxError, Result},
        http::HttpClient,
        types::SubjectId,
    },
    configs::ApiConfig,
    streams::StreamDescriptor,
};

const TAB_OPERATING_PATH: &str = "/wefeed-mobile-bff/tab-operating";
const SEARCH_PATH: &str = "/wefeed-mobile-bff/subject-api/search/v2";
const PLAY_INFO_PATH: &str = "/wefeed-mobile-bff/subject-api/play-info";

/// Signed JSON client for the MovieBox mobile backend.
///
/// Requests are sent one at a time and never retried.
pub struct MovieBoxClient {
    client: reqwest::Client,
    signer: RequestSigner,
    config: ApiConfig,
    client_info: String,
}

impl MovieBoxClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = HttpClient::new(&config)?;
        let signer = RequestSigner::new(&config.secret_key)?;
        let client_info = config.client_info.header_value()?;

        Ok(Self {
            client,
            signer,
            config,
            client_info,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// API origin; media hosts expect it as the Referer of cookie-protected streams.
    pub fn referer(&self) -> &str {
        self.config.origin()
    }

    pub fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.config.origin(), path);
        let mut url = Url::parse(&raw).map_err(|e| MovieBoxError::malformed_url(raw, e))?;
        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn base_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, ACCEPT)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-client-info", &self.client_info)
            .header("x-client-status", "0")
    }

    async fn send(&self, method: HttpMethod, url: Url, body: Option<String>) -> Result<Value> {
        let auth = self.signer.sign(method, url.as_str(), body.as_deref())?;

        let builder = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
        };
        let mut request = auth.apply(self.base_request(builder));
        if let Some(body) = body {
            request = request.body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        info!("{} {} -> {}", method, url.path(), status);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!("Error body from {}: {}", url, body);
            return Err(MovieBoxError::http_status(status.as_u16(), url.as_str()));
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            MovieBoxError::InvalidResponse(format!("{} returned non-JSON body: {}", url.path(), e))
        })
    }

    pub async fn get_json(&self, url: Url) -> Result<Value> {
        self.send(HttpMethod::Get, url, None).await
    }

    pub async fn post_json(&self, url: Url, body: String) -> Result<Value> {
        self.send(HttpMethod::Post, url, Some(body)).await
    }

    /// Sections ("categories") of one home-feed tab.
    pub async fn tab_sections(&self, tab_id: u32) -> Result<Vec<Section>> {
        let url = self.endpoint(
            TAB_OPERATING_PATH,
            &[
                ("page", "1".to_string()),
                ("tabId", tab_id.to_string()),
                ("version", String::new()),
            ],
        )?;
        let json = self.get_json(url).await?;
        Ok(parse_sections(&json))
    }

    pub async fn search(&self, keyword: &str, page: u32, per_page: u32) -> Result<Vec<Subject>> {
        let url = self.endpoint(SEARCH_PATH, &[])?;
        let body = serde_json::to_string(&SearchRequest {
            page,
            per_page,
            keyword,
        })?;
        let json = self.post_json(url, body).await?;
        Ok(parse_search_results(&json))
    }

    /// Candidate streams for a movie (`season = episode = 0`) or an episode.
    pub async fn play_info(
        &self,
        subject_id: &SubjectId,
        season: u32,
        episode: u32,
    ) -> Result<Vec<StreamDescriptor>> {
        let url = self.endpoint(
            PLAY_INFO_PATH,
            &[
                ("subjectId", subject_id.to_string()),
                ("se", season.to_string()),
                ("ep", episode.to_string()),
            ],
        )?;
        let json = self.get_json(url).await?;
        Ok(parse_streams(&json))
    }
}
