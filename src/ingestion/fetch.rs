use std::env;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use url::Url;

use super::error::FetchError;
use super::types::RawPayload;
use super::url::ValidUrl;

/// Single GET of a site document. No retries: one attempt succeeds or fails.
pub trait SiteFetcher {
    fn fetch(&self, url: &ValidUrl) -> impl Future<Output = Result<RawPayload, FetchError>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// `None` waits for as long as the transport allows.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig { timeout: None, user_agent: default_user_agent() }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self { Self::from_lookup(|key| env::var(key).ok()) }

    /// `SITECARDS_TIMEOUT_SECS` (unset or 0 = no timeout) and `SITECARDS_USER_AGENT`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = lookup("SITECARDS_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .and_then(timeout_from_secs);
        let user_agent = lookup("SITECARDS_USER_AGENT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_user_agent);
        FetchConfig { timeout, user_agent }
    }

    /// A command-line timeout replaces the configured one; 0 disables it.
    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs { self.timeout = timeout_from_secs(secs); }
        self
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> { (secs > 0).then(|| Duration::from_secs(secs)) }

fn default_user_agent() -> String { format!("site-cards/{}", env!("CARGO_PKG_VERSION")) }

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(timeout) = cfg.timeout { builder = builder.timeout(timeout); }
        Ok(HttpFetcher { client: builder.build()? })
    }
}

impl SiteFetcher for HttpFetcher {
    async fn fetch(&self, url: &ValidUrl) -> Result<RawPayload, FetchError> {
        let target = Url::parse(url.as_str())
            .map_err(|e| FetchError::Transport(format!("invalid URL {url}: {e}")))?;
        let resp = self.client.get(target).send().await.map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(transport)?;
        decode_payload(&body)
    }
}

fn transport(e: reqwest::Error) -> FetchError { FetchError::Transport(e.to_string()) }

pub fn decode_payload(body: &[u8]) -> Result<RawPayload, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::url::validate;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut seen = Vec::new();
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 { break; }
                seen.extend_from_slice(&buf[..n]);
                if seen.windows(4).any(|w| w == b"\r\n\r\n") { break; }
            }
            let resp = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            sock.shutdown().await.unwrap();
        });
        format!("http://{addr}/site.json")
    }

    fn fetcher() -> HttpFetcher { HttpFetcher::new(&FetchConfig::default()).unwrap() }

    #[tokio::test]
    async fn decodes_json_body() {
        let url = serve_once("200 OK", r#"{"items":[],"metadata":{}}"#).await;
        let payload = fetcher().fetch(&validate(&url).unwrap()).await.unwrap();
        assert_eq!(payload, json!({"items": [], "metadata": {}}));
    }

    #[tokio::test]
    async fn non_success_status_is_http_status() {
        let url = serve_once("404 Not Found", "").await;
        let err = fetcher().fetch(&validate(&url).unwrap()).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(404));
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let url = serve_once("200 OK", "<html>nope</html>").await;
        let err = fetcher().fetch(&validate(&url).unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unparseable_url_is_transport_error() {
        let err = fetcher().fetch(&validate("not a url/site.json").unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{addr}/site.json");
        let err = fetcher().fetch(&validate(&url).unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn silent_server_times_out_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (release, hold) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            let (_sock, _) = listener.accept().await.unwrap();
            let _ = hold.await;
        });

        let cfg = FetchConfig { timeout: Some(Duration::from_millis(200)), ..FetchConfig::default() };
        let url = format!("http://{addr}/site.json");
        let err = HttpFetcher::new(&cfg).unwrap().fetch(&validate(&url).unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
        drop(release);
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn config_defaults_to_no_timeout() {
        let cfg = FetchConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.user_agent, format!("site-cards/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn config_reads_timeout_and_user_agent() {
        let cfg = FetchConfig::from_lookup(lookup(&[
            ("SITECARDS_TIMEOUT_SECS", " 15 "),
            ("SITECARDS_USER_AGENT", "cards-bot/2"),
        ]));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(15)));
        assert_eq!(cfg.user_agent, "cards-bot/2");
    }

    #[test]
    fn config_ignores_zero_garbage_and_blank() {
        for raw in ["0", "soon", "-3"] {
            let cfg = FetchConfig::from_lookup(lookup(&[("SITECARDS_TIMEOUT_SECS", raw), ("SITECARDS_USER_AGENT", "  ")]));
            assert_eq!(cfg.timeout, None, "{raw:?}");
            assert!(cfg.user_agent.starts_with("site-cards/"));
        }
    }

    #[test]
    fn flag_overrides_env_timeout() {
        let env_cfg = FetchConfig::from_lookup(lookup(&[("SITECARDS_TIMEOUT_SECS", "30")]));
        assert_eq!(env_cfg.clone().with_timeout_secs(Some(5)).timeout, Some(Duration::from_secs(5)));
        assert_eq!(env_cfg.clone().with_timeout_secs(Some(0)).timeout, None);
        assert_eq!(env_cfg.with_timeout_secs(None).timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn decode_accepts_any_json_value() {
        assert_eq!(decode_payload(b"[1,2]").unwrap(), json!([1, 2]));
        assert!(matches!(decode_payload(b""), Err(FetchError::Decode(_))));
    }
}
