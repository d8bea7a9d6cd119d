use std::time::Duration;

use reqwest::Client;

use crate::{
    common::errors::{MovieBoxError, Result},
    configs::ApiConfig,
};

pub struct HttpClient;

impl HttpClient {
    /// Builds the transport used for every API call. The timeout is the only
    /// deadline and covers the whole exchange.
    pub fn new(config: &ApiConfig) -> Result<Client> {
        Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MovieBoxError::from_reqwest)
    }
}
