//! GitHub search API response types.
//!
//! These types model the subset of `GET /search/issues` that the
//! autocomplete needs: the issue title, its browser URL and its labels.

use serde::{Deserialize, Serialize};

/// Search result from the issue search endpoint.
///
/// Returned by `GET /search/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching issues on the server (not just this page).
    #[serde(default)]
    pub total_count: u64,
    /// The issues in server-ranked order.
    #[serde(default)]
    pub items: Vec<Issue>,
}

impl SearchResult {
    /// Check if the page contains no issues.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of issues in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A GitHub issue (or pull request) as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: u64,
    /// The issue title.
    pub title: String,
    /// Browser URL of the issue.
    #[serde(rename = "html_url")]
    pub url: String,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Background color as six hex digits without the leading `#`.
    #[serde(default)]
    pub color: String,
}

/// Error body returned by GitHub on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_result() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 1,
                    "number": 100,
                    "title": "Hooks warning",
                    "html_url": "https://github.com/facebook/react/issues/100",
                    "labels": [
                        {"id": 7, "name": "Type: Bug", "color": "b60205", "default": false}
                    ]
                },
                {
                    "id": 2,
                    "title": "Docs typo",
                    "html_url": "https://github.com/facebook/react/issues/101"
                }
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_count, 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result.items[0].title, "Hooks warning");
        assert_eq!(
            result.items[0].url,
            "https://github.com/facebook/react/issues/100"
        );
        assert_eq!(result.items[0].labels[0].color, "b60205");
        assert!(result.items[1].labels.is_empty());
    }

    #[test]
    fn test_missing_items_degrades_to_empty() {
        let result: SearchResult = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_deserialize_error_body() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Validation Failed", "errors": []}"#).unwrap();
        assert_eq!(body.message, "Validation Failed");
    }
}
