use serde::Serialize;
use serde_json::Value;

/// One playable rendition, as listed by the play-info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDescriptor {
    pub format: String,
    pub url: String,
    /// Passed through untouched; the API sends either a string or a list.
    pub resolutions: Value,
    pub codec_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_cookie: Option<String>,
}

impl StreamDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            format: String::new(),
            url: url.into(),
            resolutions: Value::Null,
            codec_name: String::new(),
            sign_cookie: None,
        }
    }

    pub fn with_sign_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.sign_cookie = Some(cookie.into());
        self
    }

    /// Missing or mistyped fields read as empty.
    pub fn from_json(json: &Value) -> Self {
        let text = |key: &str| json[key].as_str().unwrap_or_default().to_string();

        Self {
            format: text("format"),
            url: text("url"),
            resolutions: json["resolutions"].clone(),
            codec_name: text("codecName"),
            sign_cookie: json["signCookie"].as_str().map(|s| s.to_string()),
        }
    }

    /// `resolutions` as shown to a person.
    pub fn resolutions_display(&self) -> String {
        match &self.resolutions {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}
