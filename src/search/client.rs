use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, InvalidHeaderValue};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::models::{PhotoResultsWrapper, ResultSet};
use crate::request::{parse_successful_response, request_default_headers};

use super::{PhotoSearch, SearchFailure, SearchQuery};

/// Every search asks for a single page this big, nothing is paginated
pub const PAGE_SIZE: usize = 200;

pub struct SearchClient {
    client: Client,
    base_url: Url,
    api_key: String,
    headers: HeaderMap,
}

impl SearchClient {
    pub fn new(client: Client, config: &Config) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            headers: request_default_headers(&config.user_agent)?,
        })
    }

    pub fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("q", query.url_text())
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("safesearch", "true");
        url
    }
}

#[async_trait]
impl PhotoSearch for SearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet, SearchFailure> {
        let instant = Instant::now();
        info!("Searching for {:?}", query.to_string());
        let response = self
            .client
            .get(self.search_url(query))
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(SearchFailure::Network)?;
        let wrapper = parse_successful_response::<PhotoResultsWrapper>(response).await?;
        debug!(
            "{} hits for {:?} in {:?}",
            wrapper.hits.len(),
            query.to_string(),
            instant.elapsed()
        );
        Ok(wrapper.hits)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::StaleResponses;
    use crate::models::Photo;
    use crate::search::FALLBACK_QUERY;

    fn config(base_url: &str) -> Config {
        Config {
            api_key: "secret".to_owned(),
            base_url: Url::parse(base_url).unwrap(),
            user_agent: "pixgrid-test".to_owned(),
            settle_window: crate::debounce::DEFAULT_SETTLE_WINDOW,
            stale_responses: StaleResponses::Drop,
        }
    }

    fn client_for(server: &MockServer) -> SearchClient {
        SearchClient::new(Client::new(), &config(&format!("{}/api/", server.uri()))).unwrap()
    }

    const TWO_HITS: &str = r#"{"total":2,"hits":[{"id":1,"webformatURL":"http://x/a.jpg"},{"id":2,"webformatURL":"http://x/b.jpg"}]}"#;

    #[test]
    fn url_carries_fixed_parameters() {
        let client = SearchClient::new(Client::new(), &config("https://pixabay.com/api/")).unwrap();
        let url = client.search_url(&SearchQuery::from("red cars & trucks"));
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("key".to_owned(), "secret".to_owned()),
                ("q".to_owned(), "red cars & trucks".to_owned()),
                ("per_page".to_owned(), "200".to_owned()),
                ("safesearch".to_owned(), "true".to_owned()),
            ]
        );
        assert!(!url.as_str().contains("red cars"));
    }

    #[test]
    fn unencodable_text_searches_fallback() {
        let client = SearchClient::new(Client::new(), &config("https://pixabay.com/api/")).unwrap();
        let url = client.search_url(&SearchQuery::from(vec![0xff, 0x00, 0xfe]));
        let q = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned());
        assert_eq!(q.as_deref(), Some(FALLBACK_QUERY));
    }

    #[tokio::test]
    async fn decodes_hits_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("q", "red cars"))
            .and(query_param("key", "secret"))
            .and(query_param("per_page", "200"))
            .and(query_param("safesearch", "true"))
            .and(header("user-agent", "pixgrid-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TWO_HITS))
            .expect(1)
            .mount(&server)
            .await;

        let hits = assert_ok!(client_for(&server).search(&SearchQuery::from("red cars")).await);
        assert_eq!(
            hits,
            vec![Photo::new(1, "http://x/a.jpg"), Photo::new(2, "http://x/b.jpg")]
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hits":[{"id":"one"}]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search(&SearchQuery::from("cats"))
            .await
            .unwrap_err();
        assert!(err.is_decode());
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn failing_status_is_reported_with_its_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("[ERROR 400] Invalid API key"))
            .expect(1)
            .mount(&server)
            .await;

        match client_for(&server).search(&SearchQuery::from("cats")).await {
            Err(SearchFailure::Status(context)) => {
                assert_eq!(context.code.as_u16(), 400);
                assert!(context.body.contains("Invalid API key"));
            }
            other => panic!("expected a status failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = SearchClient::new(
            Client::new(),
            &config(&format!("http://127.0.0.1:{}/api/", port)),
        )
        .unwrap();
        let err = client.search(&SearchQuery::from("cats")).await.unwrap_err();
        assert!(err.is_network());
    }
}
