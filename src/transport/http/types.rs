use crate::app::CafeService;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: CafeService,
}

/// `{"response": {"success": "..."}}`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SuccessBody {
    pub response: SuccessMessage,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SuccessMessage {
    pub success: String,
}

impl SuccessBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            response: SuccessMessage {
                success: message.into(),
            },
        }
    }
}

/// `{"error": {"<label>": "<message>"}}`, e.g. `{"error": {"Not Found": "..."}}`.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: BTreeMap<String, String>,
}

impl ErrorBody {
    pub fn new(label: &str, message: impl Into<String>) -> Self {
        Self {
            error: BTreeMap::from([(label.to_string(), message.into())]),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthBody {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw query-string pairs.
///
/// When a parameter is repeated the first occurrence wins; repeats never reject the
/// request.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_of_a_repeated_parameter_wins() {
        let params = QueryParams::from(vec![
            ("api-key".to_string(), "first".to_string()),
            ("loc".to_string(), "Peckham".to_string()),
            ("api-key".to_string(), "second".to_string()),
        ]);
        assert_eq!(params.first("api-key"), Some("first"));
        assert_eq!(params.first("loc"), Some("Peckham"));
        assert_eq!(params.first("coffee_price"), None);
    }
}
