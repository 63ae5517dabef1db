use axum::extract::{Multipart, multipart::MultipartError};
use scores::remote::ImagePart;
use serde_json::Value;

pub const IMAGE_FIELD: &str = "image";
pub const UPSTREAM_FIELD: &str = "file";
pub const UPSTREAM_FALLBACK: &str = "ML service error";

/// Pulls the first `image` field out of the form, skipping everything else.
///
/// An `image` text field left empty counts as no image.
pub async fn read_image(mut multipart: Multipart) -> Result<Option<ImagePart>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();

        if file_name.is_none() && bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ImagePart {
            bytes,
            file_name,
            content_type,
        }));
    }

    Ok(None)
}

/// The upstream `detail` when it carries anything, otherwise a generic message.
pub fn upstream_detail(data: &Value) -> Value {
    data.get("detail")
        .filter(|detail| is_truthy(detail))
        .cloned()
        .unwrap_or_else(|| Value::from(UPSTREAM_FALLBACK))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_detail() {
        assert_eq!(upstream_detail(&json!({ "detail": "bad image" })), json!("bad image"));
    }

    #[test]
    fn test_structured_detail() {
        let detail = json!([{ "loc": ["body", "file"], "msg": "field required" }]);
        assert_eq!(upstream_detail(&json!({ "detail": detail })), detail);
    }

    #[test]
    fn test_fallback_detail() {
        let fallback = json!(UPSTREAM_FALLBACK);

        assert_eq!(upstream_detail(&json!({})), fallback);
        assert_eq!(upstream_detail(&json!({ "detail": "" })), fallback);
        assert_eq!(upstream_detail(&json!({ "detail": null })), fallback);
        assert_eq!(upstream_detail(&json!({ "detail": 0 })), fallback);
        assert_eq!(upstream_detail(&json!("plain text")), fallback);
    }
}
