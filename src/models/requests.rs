use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Top-level request bodies must be JSON objects
type JsonObject = Map<String, Value>;

/// Request to score the sentiment of a piece of text
///
/// `null` and a missing field are treated alike.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "JsonObject")]
pub struct AnalyzeSentimentRequest {
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
}

/// Request to summarize a conversation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "JsonObject")]
pub struct SummarizeRequest {
    #[validate(required, length(min = 1))]
    pub messages: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct SentimentFields {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct SummarizeFields {
    #[serde(default)]
    messages: Option<Vec<String>>,
}

fn from_object<T: DeserializeOwned>(object: JsonObject) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(object))
}

impl TryFrom<JsonObject> for AnalyzeSentimentRequest {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let fields: SentimentFields = from_object(object)?;
        Ok(Self { text: fields.text })
    }
}

impl TryFrom<JsonObject> for SummarizeRequest {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let fields: SummarizeFields = from_object(object)?;
        Ok(Self { messages: fields.messages })
    }
}
