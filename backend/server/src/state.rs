use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub client: Client,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.ml_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Arc::new(Self { config, client }))
    }
}
