use serde::{Deserialize, Serialize};

/// How a missing field is rendered inside `QaRecord::text`
pub const NULL_PLACEHOLDER: &str = "None";

/// One question page, as written to the JSONL output
///
/// Only `url` is guaranteed; the other fields are `None` when the page did
/// not contain the matching markup. Field order here is the key order of the
/// serialised object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub title: Option<String>,
    pub question: Option<String>,
    pub replier: Option<String>,
    pub answer: Option<String>,
    pub url: String,

    /// `title`, `question`, `replier`, `answer` and `url` joined by newlines
    pub text: String,
}

impl QaRecord {
    pub fn new(
        title: Option<String>,
        question: Option<String>,
        replier: Option<String>,
        answer: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let text = [&title, &question, &replier, &answer]
            .iter()
            .map(|field| field.as_deref().unwrap_or(NULL_PLACEHOLDER))
            .chain(std::iter::once(url.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            title,
            question,
            replier,
            answer,
            url,
            text,
        }
    }

    /// Number of extracted fields that came back empty-handed
    pub fn missing_fields(&self) -> usize {
        [&self.title, &self.question, &self.replier, &self.answer]
            .iter()
            .filter(|field| field.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_fields_in_order() {
        let record = QaRecord::new(
            Some("T".to_string()),
            Some("Q".to_string()),
            Some("R".to_string()),
            Some("A".to_string()),
            "/QA/1",
        );
        assert_eq!(record.text, "T\nQ\nR\nA\n/QA/1");
        assert_eq!(record.missing_fields(), 0);
    }

    #[test]
    fn test_text_renders_missing_fields() {
        let record = QaRecord::new(None, None, Some("R".to_string()), None, "/QA/2");
        assert_eq!(record.text, "None\nNone\nR\nNone\n/QA/2");
        assert_eq!(record.missing_fields(), 3);
    }

    #[test]
    fn test_serialized_key_order_and_nulls() {
        let record = QaRecord::new(Some("X".to_string()), None, Some("Y".to_string()), Some("Z".to_string()), "u");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"X","question":null,"replier":"Y","answer":"Z","url":"u","text":"X\nNone\nY\nZ\nu"}"#
        );
    }
}
