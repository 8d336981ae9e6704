//! Post models

use serde::{Deserialize, Serialize};

/// A blog post as read from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    /// File name without extension
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    /// Raw markdown body after the metadata block
    pub content: String,
}

impl PostRecord {
    /// Project to the fields a listing needs
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            date: self.date.clone(),
            title: self.title.clone(),
        }
    }
}

/// One entry of the home page listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub date: String,
    pub title: String,
}

impl From<PostRecord> for PostSummary {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            title: record.title,
        }
    }
}
