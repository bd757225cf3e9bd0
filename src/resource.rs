//! Resource records and URL/text classification.

use crate::{Error, Result};
use std::str::FromStr;

/// The two shapes a resource can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Content that looks like a web address
    Url,
    /// Everything else: notes, snippets, file paths
    Text,
}

impl ResourceKind {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Url => "url",
            ResourceKind::Text => "text",
        }
    }

    /// Guess the kind from content shape: anything whose trimmed content
    /// starts with "http" (case-insensitively) is a URL. No network
    /// validation is attempted.
    pub fn classify(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"))
        {
            ResourceKind::Url
        } else {
            ResourceKind::Text
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "url" => Ok(ResourceKind::Url),
            "text" => Ok(ResourceKind::Text),
            _ => Err(Error::Validation(format!("Unknown resource kind: {}", s))),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A piece of content attached to a thread. Owned exclusively by its
/// thread; there is no independent lifecycle.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: i64,
    pub kind: ResourceKind,
    pub content: String,
    pub added_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_url() {
        assert_eq!(ResourceKind::classify("https://x.com"), ResourceKind::Url);
        assert_eq!(ResourceKind::classify("http://example.org/page"), ResourceKind::Url);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(ResourceKind::classify("HTTP://X"), ResourceKind::Url);
        assert_eq!(ResourceKind::classify("HtTpS://mixed.example"), ResourceKind::Url);
    }

    #[test]
    fn test_classify_tolerates_whitespace() {
        assert_eq!(ResourceKind::classify("  http://x "), ResourceKind::Url);
        assert_eq!(ResourceKind::classify("\nhttps://y\t"), ResourceKind::Url);
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(ResourceKind::classify("notes here"), ResourceKind::Text);
        assert_eq!(ResourceKind::classify(""), ResourceKind::Text);
        assert_eq!(ResourceKind::classify("see http://x later"), ResourceKind::Text);
    }

    #[test]
    fn test_classify_multibyte_content() {
        assert_eq!(ResourceKind::classify("日本語のメモ"), ResourceKind::Text);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!("url".parse::<ResourceKind>().unwrap(), ResourceKind::Url);
        assert_eq!("text".parse::<ResourceKind>().unwrap(), ResourceKind::Text);
        assert!("link".parse::<ResourceKind>().is_err());
    }
}
