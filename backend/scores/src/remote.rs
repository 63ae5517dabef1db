use reqwest::{
    Client, StatusCode,
    header::{CACHE_CONTROL, HeaderValue},
    multipart::{Form, Part},
};
use thiserror::Error;
use tracing::debug;

/// File name browsers put on blobs without one.
pub const DEFAULT_FILE_NAME: &str = "blob";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// An image on its way to the inference endpoint.
#[derive(Debug, Clone, Default)]
pub struct ImagePart {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Raw answer of the inference endpoint, body not yet decoded.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

/// POSTs `image` as a single multipart `field` and reads the body back as text.
///
/// Never retries. Timeouts are whatever `client` was built with.
pub async fn send_image(
    client: &Client,
    endpoint: &str,
    field: &str,
    image: ImagePart,
) -> Result<Reply, RemoteError> {
    let size = image.bytes.len();
    let mut part = Part::bytes(image.bytes)
        .file_name(image.file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()));

    if let Some(content_type) = image.content_type {
        part = part.mime_str(&content_type)?;
    }

    debug!("Sending {size} bytes as '{field}' to {endpoint}");

    let response = client
        .post(endpoint)
        .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .multipart(Form::new().part(field.to_string(), part))
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    debug!("Endpoint answered {status} with {} bytes", body.len());

    Ok(Reply { status, body })
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method, path},
    };

    use super::*;

    #[tokio::test]
    async fn test_sends_named_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("cache-control", "no-store"))
            .and(body_string_contains("name=\"file\"; filename=\"face.png\""))
            .and(body_string_contains("Content-Type: image/png"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"scores":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let image = ImagePart {
            bytes: b"not really a png".to_vec(),
            file_name: Some("face.png".to_string()),
            content_type: Some("image/png".to_string()),
        };

        let reply = send_image(
            &Client::new(),
            &format!("{}/predict", server.uri()),
            "file",
            image,
        )
        .await
        .unwrap();

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, r#"{"scores":{}}"#);
    }

    #[tokio::test]
    async fn test_default_file_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_string_contains("name=\"image\"; filename=\"blob\""))
            .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"detail":"bad image"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let reply = send_image(&Client::new(), &server.uri(), "image", ImagePart::default())
            .await
            .unwrap();

        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // nothing listens on port 9 locally
        let result = send_image(
            &Client::new(),
            "http://127.0.0.1:9/predict",
            "file",
            ImagePart::default(),
        )
        .await;

        assert!(matches!(result, Err(RemoteError::Transport(_))));
    }
}
