use serde::Deserialize;

/// A single search hit. Both fields take part in equality so two photos with
/// the same id but a different url are different cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Photo {
    pub id: i64,
    #[serde(rename = "webformatURL")]
    pub url: String,
}

impl Photo {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Ordered hits of one search response. Always replaced wholesale
pub type ResultSet = Vec<Photo>;

/// Shape of the search endpoint's body, everything other than `hits` is ignored
#[derive(Debug, Deserialize)]
pub struct PhotoResultsWrapper {
    pub hits: ResultSet,
}
