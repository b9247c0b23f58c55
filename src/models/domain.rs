use serde::{Deserialize, Serialize};

/// One label/score pair produced by a text-classification model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}
