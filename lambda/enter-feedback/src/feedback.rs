use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::error::Category;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::FeedbackError;

pub(crate) const POSTED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Deserialize, Debug)]
pub(crate) struct FeedbackRequest {
    #[serde(rename = "FirstName")]
    pub(crate) first_name: String,
    #[serde(rename = "LastName")]
    pub(crate) last_name: String,
    #[serde(rename = "Feedback", default)]
    pub(crate) feedback: Option<String>,
}

impl FeedbackRequest {
    pub(crate) fn from_body(body: &[u8]) -> Result<Self, FeedbackError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FeedbackError::MalformedInput(
                "Missing request body".to_string(),
            ));
        }
        serde_json::from_slice(body).map_err(|e| match e.classify() {
            Category::Data => FeedbackError::MalformedInput(format!("Invalid field: {}", e)),
            _ => FeedbackError::MalformedInput(format!("Invalid JSON: {}", e)),
        })
    }
}

/// One stored submission. `id` and `posted_time` form the table's composite key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FeedbackRecord {
    pub(crate) id: String,
    pub(crate) posted_time: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) feedback: Option<String>,
}

impl FeedbackRecord {
    pub(crate) fn new(req: FeedbackRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            posted_time: format_posted_time(Local::now().naive_local()),
            first_name: req.first_name,
            last_name: req.last_name,
            feedback: req.feedback.filter(|f| !f.is_empty()),
        }
    }

    pub(crate) fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("ID".to_string(), AttributeValue::S(self.id.clone()));
        item.insert(
            "PostedTime".to_string(),
            AttributeValue::S(self.posted_time.clone()),
        );
        item.insert(
            "FirstName".to_string(),
            AttributeValue::S(self.first_name.clone()),
        );
        item.insert(
            "LastName".to_string(),
            AttributeValue::S(self.last_name.clone()),
        );
        if let Some(feedback) = &self.feedback {
            item.insert("Feedback".to_string(), AttributeValue::S(feedback.clone()));
        }
        item
    }
}

pub(crate) fn format_posted_time(at: NaiveDateTime) -> String {
    at.format(POSTED_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(feedback: Option<&str>) -> FeedbackRequest {
        FeedbackRequest {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            feedback: feedback.map(str::to_string),
        }
    }

    #[test]
    fn test_parses_required_and_optional_fields() {
        let req = FeedbackRequest::from_body(
            br#"{"FirstName":"Jane","LastName":"Doe","Feedback":"Great!"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Jane");
        assert_eq!(req.last_name, "Doe");
        assert_eq!(req.feedback.as_deref(), Some("Great!"));
    }

    #[test]
    fn test_missing_last_name_is_malformed() {
        let err = FeedbackRequest::from_body(br#"{"FirstName":"Jane"}"#).unwrap_err();
        assert!(matches!(err, FeedbackError::MalformedInput(_)));
        let message = err.to_string();
        assert!(message.starts_with("Invalid request: Invalid field:"));
        assert!(message.contains("LastName"));
    }

    #[test]
    fn test_syntax_error_is_reported_as_invalid_json() {
        let err = FeedbackRequest::from_body(b"{\"FirstName\":").unwrap_err();
        assert!(err.to_string().starts_with("Invalid request: Invalid JSON:"));
    }

    #[test]
    fn test_non_string_name_is_malformed() {
        let err =
            FeedbackRequest::from_body(br#"{"FirstName":1,"LastName":"Doe"}"#).unwrap_err();
        assert!(matches!(err, FeedbackError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let err = FeedbackRequest::from_body(b"").unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: Missing request body");
    }

    #[test]
    fn test_item_without_feedback() {
        let record = FeedbackRecord::new(request(None));
        let item = record.to_item();
        assert_eq!(item.len(), 4);
        assert_eq!(item.get("FirstName"), Some(&AttributeValue::S("A".to_string())));
        assert_eq!(item.get("LastName"), Some(&AttributeValue::S("B".to_string())));
        assert!(!item.contains_key("Feedback"));
    }

    #[test]
    fn test_empty_feedback_is_dropped() {
        let record = FeedbackRecord::new(request(Some("")));
        assert_eq!(record.feedback, None);
        assert!(!record.to_item().contains_key("Feedback"));
    }

    #[test]
    fn test_item_with_feedback() {
        let item = FeedbackRecord::new(request(Some("Great!"))).to_item();
        assert_eq!(
            item.get("Feedback"),
            Some(&AttributeValue::S("Great!".to_string()))
        );
    }

    #[test]
    fn test_key_is_fresh_per_record() {
        let first = FeedbackRecord::new(request(None));
        let second = FeedbackRecord::new(request(None));
        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn test_posted_time_is_iso8601_and_not_before_start() {
        let start = NaiveDateTime::parse_from_str(
            &format_posted_time(Local::now().naive_local()),
            POSTED_TIME_FORMAT,
        )
        .unwrap();
        let record = FeedbackRecord::new(request(None));
        let posted = NaiveDateTime::parse_from_str(&record.posted_time, POSTED_TIME_FORMAT)
            .unwrap();
        assert!(posted >= start);
    }
}
