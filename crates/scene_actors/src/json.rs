use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid json at '{path}': {source}")]
pub struct JsonPathError {
    pub path: String,
    #[source]
    pub source: serde_json::Error,
}

pub(crate) fn deserialize_with_path<T: DeserializeOwned>(raw: &str) -> Result<T, JsonPathError> {
    let deserializer = &mut serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(deserializer).map_err(|error| JsonPathError {
        path: error.path().to_string(),
        source: error.into_inner(),
    })
}
