use super::{ensure_any, Url};
use crate::error::Result;
use serde::Serialize;

/// A free text note ("general observation").
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Note {
    #[serde(rename = "ObsComment")]
    comment: String,
    #[serde(rename = "Urls")]
    urls: Vec<Url>,
}

impl Note {
    /// A note must carry some non-blank text.
    pub fn new(comment: impl Into<String>) -> Result<Note> {
        let comment = comment.into();
        ensure_any("note", &[!comment.trim().is_empty()])?;
        Ok(Note {
            comment,
            urls: Vec::new(),
        })
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.urls.push(url);
        self
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

#[cfg(test)]
mod tests {
    use super::Note;
    use crate::observation::Url;
    use serde_json::json;

    #[test]
    fn test_blank_note_fails() {
        assert!(Note::new("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_note_payload() {
        let note = Note::new("Demo registration.")
            .unwrap()
            .with_url(Url::new("https://varsom.no", "Varsom"));
        assert_eq!(
            serde_json::to_value(note).unwrap(),
            json!({
                "ObsComment": "Demo registration.",
                "Urls": [{"UrlDescription": "Varsom", "UrlLine": "https://varsom.no"}],
            })
        );
    }
}
