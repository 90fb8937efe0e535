use std::fmt::{self, Display};

use log::warn;

/// Searched instead of text that can't be put in a url
pub const FALLBACK_QUERY: &str = "paris";

/// Raw contents of the search input. Kept as bytes because the input source
/// isn't guaranteed to hand us valid UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery(Vec<u8>);

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The text that goes into the `q` parameter. Input that isn't valid UTF-8
    /// can't be percent-encoded as text and is replaced by [FALLBACK_QUERY]
    pub fn url_text(&self) -> &str {
        match std::str::from_utf8(&self.0) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "Search text {:?} can't be encoded ({}), searching {:?} instead",
                    self.to_string(),
                    err,
                    FALLBACK_QUERY
                );
                FALLBACK_QUERY
            }
        }
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for SearchQuery {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<Vec<u8>> for SearchQuery {
    fn from(raw: Vec<u8>) -> Self {
        Self(raw)
    }
}
