use crate::error::DetailError;
use crate::model::{Identifier, Record};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Source of records. The HTTP client is the only production implementation;
/// tests plug in fakes.
#[async_trait]
pub trait RecordReader: Send + Sync {
    async fn fetch(&self, id: &Identifier) -> Result<Record, DetailError>;
}

const USER_AGENT: &str = concat!("detail-view/", env!("CARGO_PKG_VERSION"));

pub struct HttpRecordReader {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRecordReader {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, DetailError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn record_url(&self, id: &Identifier) -> Result<Url, DetailError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DetailError::Config(format!("Base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["recipes", id.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl RecordReader for HttpRecordReader {
    async fn fetch(&self, id: &Identifier) -> Result<Record, DetailError> {
        let url = self.record_url(id)?;
        tracing::info!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DetailError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let record: Record = serde_json::from_slice(&body)?;
        tracing::debug!("Received record {} ({} bytes)", id, body.len());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reader_for(server: &MockServer) -> TestResult<HttpRecordReader> {
        Ok(HttpRecordReader::new(Url::parse(&server.uri())?, None)?)
    }

    #[test]
    fn record_url_joins_base_path() -> TestResult {
        let reader = HttpRecordReader::new(Url::parse("https://dummyjson.com")?, None)?;
        let id = Identifier::parse("7")?;
        assert_eq!(
            reader.record_url(&id)?.as_str(),
            "https://dummyjson.com/recipes/7"
        );

        let nested = HttpRecordReader::new(Url::parse("http://localhost:8080/api/")?, None)?;
        assert_eq!(
            nested.record_url(&id)?.as_str(),
            "http://localhost:8080/api/recipes/7"
        );
        Ok(())
    }

    #[tokio::test]
    async fn fetches_record_with_one_request() -> TestResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/1"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "title": "Cake",
                "rating": 4.6
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reader = reader_for(&server)?;
        let record = reader.fetch(&Identifier::parse("1")?).await?;
        assert_eq!(record.title.as_deref(), Some("Cake"));
        assert_eq!(record.rating, Some(4.6));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() -> TestResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let reader = reader_for(&server)?;
        let err = reader
            .fetch(&Identifier::parse("999")?)
            .await
            .err()
            .ok_or("expected an error")?;
        assert!(matches!(err, DetailError::Status { status, .. } if status.as_u16() == 404));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() -> TestResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let reader = reader_for(&server)?;
        let err = reader
            .fetch(&Identifier::parse("2")?)
            .await
            .err()
            .ok_or("expected an error")?;
        assert!(matches!(err, DetailError::Json(_)));
        Ok(())
    }

    #[tokio::test]
    async fn configured_timeout_fails_slow_reads() -> TestResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"title": "Late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let reader = HttpRecordReader::new(
            Url::parse(&server.uri())?,
            Some(Duration::from_millis(100)),
        )?;
        let err = reader
            .fetch(&Identifier::parse("3")?)
            .await
            .err()
            .ok_or("expected a timeout")?;
        assert!(matches!(err, DetailError::Network(ref e) if e.is_timeout()));
        Ok(())
    }
}
