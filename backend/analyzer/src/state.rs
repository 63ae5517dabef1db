//! # Analyzer State
//!
//! Three observable pieces: the preview of the picked image, the last score
//! set, and whether a request is in flight.
//!
//! ```text
//! Idle --select_file--> PreviewReady --submit--> Analyzing --ok--> Displayed
//!                                                    |
//!                                                    +--err--> alert, scores untouched
//! ```
//!
//! `loading` is dropped back to false after every submission, whatever the
//! outcome. Every mutation is pushed to the [`Observer`].
//!
//! ## Notes
//! - A failed request leaves the previous scores on screen
//! - The HTTP status of the endpoint is not checked, a `422` carrying
//!   `{"detail": ...}` parses fine and displays an empty score set
//! - `submit` borrows the analyzer mutably, so two requests can never race on
//!   the same state
use reqwest::Client;
use scores::{
    TraitScores, format_scores,
    remote::{ImagePart, send_image},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::AnalyzeError, upload::Upload};

pub const DEFAULT_ENDPOINT: &str = "https://web-production-ff11c.up.railway.app/predict";
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerState {
    pub image_preview: Option<String>,
    pub scores: Option<TraitScores>,
    pub loading: bool,
}

/// Gets told about every state change. Renderers implement this.
pub trait Observer {
    fn changed(&mut self, state: &AnalyzerState);

    /// Blocking, user facing failure notice.
    fn alert(&mut self, message: &str);
}

pub struct Analyzer<O> {
    client: Client,
    endpoint: String,
    upload: Option<Upload>,
    state: AnalyzerState,
    observer: O,
}

impl<O: Observer> Analyzer<O> {
    pub fn new(client: Client, endpoint: impl Into<String>, observer: O) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            upload: None,
            state: AnalyzerState::default(),
            observer,
        }
    }

    pub fn state(&self) -> &AnalyzerState {
        &self.state
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Replaces the picked image and its preview. No network call.
    pub fn select_file(&mut self, upload: Upload) {
        info!("Selected {} ({})", upload.file_name, upload.content_type);

        self.state.image_preview = Some(upload.preview_url());
        self.upload = Some(upload);
        self.notify();
    }

    /// Sends the picked image to the endpoint and displays the scores.
    ///
    /// Failures are alerted to the observer and returned.
    pub async fn submit(&mut self) -> Result<(), AnalyzeError> {
        let Some(part) = self.upload.as_ref().map(Upload::to_part) else {
            let error = AnalyzeError::NoImage;
            self.observer.alert(&error.alert_message());
            return Err(error);
        };

        self.state.loading = true;
        self.notify();

        let result = match fetch_scores(&self.client, &self.endpoint, part).await {
            Ok(scores) => {
                info!("Received {} trait scores", scores.len());
                self.state.scores = Some(scores);
                Ok(())
            }
            Err(error) => {
                warn!("Analysis failed: {error}");
                self.observer.alert(&error.alert_message());
                Err(error)
            }
        };

        self.state.loading = false;
        self.notify();

        result
    }

    fn notify(&mut self) {
        self.observer.changed(&self.state);
    }
}

/// One request/response cycle against the inference endpoint.
pub async fn fetch_scores(
    client: &Client,
    endpoint: &str,
    image: ImagePart,
) -> Result<TraitScores, AnalyzeError> {
    let reply = send_image(client, endpoint, IMAGE_FIELD, image).await?;

    if !reply.status.is_success() {
        warn!("Endpoint answered {}, reading scores anyway", reply.status);
    }

    if reply.body.is_empty() {
        return Err(AnalyzeError::EmptyResponse);
    }

    let data: Value = serde_json::from_str(&reply.body)?;
    if data.is_null() {
        return Err(AnalyzeError::NullResponse);
    }

    Ok(format_scores(&data))
}
