use std::fmt;

pub mod pipeline;
pub mod publish;
pub mod render;

pub use pipeline::{run, RecordOutcome, RecordSource, Report};
pub use publish::{publish, Destination, PostsDir, PublishOutcome};
pub use render::{process_markdown, render, sanitize_filename, RenderError};

/// Issue identifier. Gitee hands out both plain numbers and string keys
/// such as `I4ABCD`.
#[derive(
    Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Deserialize, serde::Serialize,
)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Key(String),
}

impl RecordId {
    /// Zero and the empty string count as "no identifier".
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Number(n) => *n == 0,
            RecordId::Key(k) => k.is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Key(k) => f.write_str(k),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

/// One entry of the issue listing. Only the fields the pipeline looks at.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RecordSummary {
    #[serde(default)]
    pub number: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RecordSummary {
    pub fn id(&self) -> Option<&RecordId> {
        self.number.as_ref().filter(|id| !id.is_blank())
    }
}

/// Full issue detail. Timestamps are kept verbatim and only parsed when the
/// record is rendered.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Record {
    pub number: RecordId,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Where the issues live, used for the link back to each one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Site {
    pub web_base: String,
    pub owner: String,
    pub repo: String,
}

impl Site {
    pub fn issue_url(&self, id: &RecordId) -> String {
        format!(
            "{}/{}/{}/issues/{id}",
            self.web_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// A generated article, ready to be written under its file name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_keys() {
        let n: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(n, RecordId::Number(42));
        let k: RecordId = serde_json::from_str("\"I4ABCD\"").unwrap();
        assert_eq!(k.to_string(), "I4ABCD");
    }

    #[test]
    fn summary_without_usable_id() {
        let s: RecordSummary = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert!(s.id().is_none());
        let s: RecordSummary = serde_json::from_str(r#"{"number": 0, "title": "x"}"#).unwrap();
        assert!(s.id().is_none());
        let s: RecordSummary = serde_json::from_str(r#"{"number": "", "title": "x"}"#).unwrap();
        assert!(s.id().is_none());
        let s: RecordSummary = serde_json::from_str(r#"{"number": 7}"#).unwrap();
        assert_eq!(s.id(), Some(&RecordId::Number(7)));
    }

    #[test]
    fn record_optional_fields() {
        let r: Record = serde_json::from_str(
            r#"{"number": 1, "title": "t", "body": null, "created_at": "2023-01-15T10:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(r.body, None);
        assert_eq!(r.updated_at, None);
    }

    #[test]
    fn issue_url() {
        let site = Site {
            web_base: "https://gitee.com/".to_string(),
            owner: "aywlzj".to_string(),
            repo: "aywlzj.gitee.io".to_string(),
        };
        assert_eq!(
            site.issue_url(&RecordId::Number(42)),
            "https://gitee.com/aywlzj/aywlzj.gitee.io/issues/42"
        );
    }
}
