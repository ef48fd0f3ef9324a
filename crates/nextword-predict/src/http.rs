//! [`Predictor`] and [`HealthProbe`] over HTTP with `reqwest`.

use crate::config::PredictConfig;
use crate::wire::{PredictRequest, PredictResponse};
use futures::future::BoxFuture;
use futures::FutureExt;
use nextword_engine::{HealthProbe, PredictError, Predictor, Suggestion};
use reqwest::Client;

fn build_client(config: &PredictConfig) -> Result<Client, PredictError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| PredictError::Transport(e.to_string()))
}

fn transport(err: reqwest::Error) -> PredictError {
    PredictError::Transport(err.to_string())
}

/// Posts the text to the prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    /// Build a predictor for `config.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &PredictConfig) -> Result<Self, PredictError> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The URL requests go to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(
        client: Client,
        endpoint: String,
        text: String,
    ) -> Result<Vec<Suggestion>, PredictError> {
        let response = client
            .post(&endpoint)
            .json(&PredictRequest { text: &text })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport)?;
        let decoded: PredictResponse =
            serde_json::from_slice(&body).map_err(|e| PredictError::Malformed(e.to_string()))?;
        let suggestions = decoded.into_suggestions();
        tracing::trace!(count = suggestions.len(), "prediction response decoded");
        Ok(suggestions)
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, text: String) -> BoxFuture<'static, Result<Vec<Suggestion>, PredictError>> {
        Self::request(self.client.clone(), self.endpoint.clone(), text).boxed()
    }
}

/// `GET`s the health endpoint; any 2xx answer counts as healthy.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: Client,
    endpoint: String,
}

impl HttpHealthProbe {
    /// Build a probe for `config.health_endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &PredictConfig) -> Result<Self, PredictError> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.health_endpoint.clone(),
        })
    }
}

impl HealthProbe for HttpHealthProbe {
    fn check(&self) -> BoxFuture<'static, Result<(), PredictError>> {
        let request = self.client.get(&self.endpoint).send();
        async move {
            let response = request.await.map_err(transport)?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(PredictError::Status(status.as_u16()))
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single HTTP response and hand back the request body.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/predict", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break raw.len();
                }
            };
            let head = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while raw.len() < header_end + length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&raw[header_end..]).into_owned());

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        (url, rx)
    }

    fn predictor(url: &str) -> HttpPredictor {
        let config = PredictConfig::default()
            .with_endpoint(url)
            .with_timeout(Duration::from_secs(5));
        HttpPredictor::new(&config).unwrap()
    }

    #[tokio::test]
    async fn posts_text_and_decodes_predictions() {
        let (url, body) = serve_once(
            "200 OK",
            r#"{"predictions":[{"word":"bạn","probability":0.7},{"word":"thế","probability":0.2}]}"#,
        )
        .await;

        let list = predictor(&url).predict("xin chào".into()).await.unwrap();
        let words: Vec<_> = list.iter().map(Suggestion::word).collect();
        assert_eq!(words, vec!["bạn", "thế"]);
        assert_eq!(body.await.unwrap(), r#"{"text":"xin chào"}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (url, _) = serve_once("503 Service Unavailable", "{}").await;
        let err = predictor(&url).predict("xin".into()).await.unwrap_err();
        assert_eq!(err, PredictError::Status(503));
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let (url, _) = serve_once("200 OK", "<html>").await;
        let err = predictor(&url).predict("xin".into()).await.unwrap_err();
        assert!(matches!(err, PredictError::Malformed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let err = predictor(&format!("http://{addr}/predict"))
            .predict("xin".into())
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn health_is_ok_on_2xx_only() {
        let (url, _) = serve_once("204 No Content", "").await;
        let probe = HttpHealthProbe::new(&PredictConfig::default().with_health_endpoint(&url)).unwrap();
        assert_eq!(probe.check().await, Ok(()));

        let (url, _) = serve_once("500 Internal Server Error", "").await;
        let probe = HttpHealthProbe::new(&PredictConfig::default().with_health_endpoint(&url)).unwrap();
        assert_eq!(probe.check().await, Err(PredictError::Status(500)));
    }
}
