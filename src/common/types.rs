/// A generic boxed error type.
pub type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// A convenient Result alias returning `AnyError`.
pub type AnyResult<T> = std::result::Result<T, AnyError>;

/// Identifier of a movie or series on the service.
///
/// The API sends it either as a string or as a number; both are kept as the
/// decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        value
            .as_str()
            .map(|s| s.to_string())
            .or_else(|| value.as_i64().map(|n| n.to_string()))
            .or_else(|| value.as_u64().map(|n| n.to_string()))
            .map(Self)
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::ops::Deref for SubjectId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subject_id_from_string_or_number() {
        assert_eq!(
            SubjectId::from_json(&json!("8906247916759695608")),
            Some(SubjectId::from("8906247916759695608"))
        );
        assert_eq!(SubjectId::from_json(&json!(42)), Some(SubjectId::from("42")));
        assert_eq!(SubjectId::from_json(&json!(null)), None);
        assert_eq!(SubjectId::from_json(&json!({"id": 1})), None);
    }
}
