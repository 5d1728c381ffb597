//! HTTP client for the DHCP management API.

use super::wire::{parse_envelope, LeaseList, LeaseRecord, ScopeDetail, ScopeList, ScopeSummary};
use crate::config::RunConfig;
use crate::error::ApiError;
use colored::Colorize;
use std::future::Future;

/// Endpoint listing all configured scopes.
pub const SCOPES_LIST: &str = "/api/dhcp/scopes/list";
/// Endpoint returning one scope's full configuration.
pub const SCOPES_GET: &str = "/api/dhcp/scopes/get";
/// Endpoint listing leases.
pub const LEASES_LIST: &str = "/api/dhcp/leases/list";

/// Read access to a DHCP server's scopes and leases.
pub trait DhcpApi {
    fn list_scopes(&self) -> impl Future<Output = Result<Vec<ScopeSummary>, ApiError>>;

    fn get_scope(&self, name: &str) -> impl Future<Output = Result<ScopeDetail, ApiError>>;

    /// Leases for the named scope. Callers still filter by scope name since
    /// servers may return leases of every scope.
    fn list_leases(&self, scope: &str) -> impl Future<Output = Result<Vec<LeaseRecord>, ApiError>>;
}

/// [`DhcpApi`] over HTTP(S) with a token passed as query parameter.
#[derive(Debug, Clone)]
pub struct HttpDhcpApi {
    client: reqwest::Client,
    server: String,
    token: String,
}

impl HttpDhcpApi {
    pub fn new(config: &RunConfig) -> Result<HttpDhcpApi, ApiError> {
        if config.insecure {
            log::warn!("TLS certificate verification is {}", "disabled".on_red());
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| ApiError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(HttpDhcpApi {
            client,
            server: config.server.clone(),
            token: config.token.clone(),
        })
    }

    /// GET an endpoint and return the raw body of a 2xx response.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = format!("{}{path}", self.server);
        log::debug!("GET {url} {params:?}", url = url.on_blue());

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Connectivity {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        log::debug!("GET {url} -> {status}");
        if !status.is_success() {
            log::warn!("{failed} GET {url} status={status}", failed = "failed".on_red());
            return Err(ApiError::http(status.as_u16(), &url));
        }

        response.text().await.map_err(|source| ApiError::Connectivity {
            url: url.clone(),
            source,
        })
    }
}

impl DhcpApi for HttpDhcpApi {
    async fn list_scopes(&self) -> Result<Vec<ScopeSummary>, ApiError> {
        let body = self.get(SCOPES_LIST, &[]).await?;
        let list: ScopeList = parse_envelope(SCOPES_LIST, &body)?;
        log::info!("got {} scopes from {}", list.scopes.len(), self.server);
        Ok(list.scopes)
    }

    async fn get_scope(&self, name: &str) -> Result<ScopeDetail, ApiError> {
        let body = self.get(SCOPES_GET, &[("name", name)]).await?;
        parse_envelope(SCOPES_GET, &body)
    }

    async fn list_leases(&self, scope: &str) -> Result<Vec<LeaseRecord>, ApiError> {
        let body = self.get(LEASES_LIST, &[("scope", scope)]).await?;
        let list: LeaseList = parse_envelope(LEASES_LIST, &body)?;
        log::debug!("got {} leases for scope '{scope}'", list.leases.len());
        Ok(list.leases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("src/tests/test_data/{name}"))
            .expect("Error reading test fixture")
    }

    /// Answer one connection per canned `(status, body)` and return the
    /// request lines that were received.
    async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    let n = socket.read(&mut buf).await.unwrap();
                    request.extend_from_slice(&buf[..n]);
                    if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&request);
                request_lines.push(request.lines().next().unwrap_or_default().to_string());

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
            request_lines
        });
        (format!("http://{addr}"), handle)
    }

    fn api(server: &str) -> HttpDhcpApi {
        let config = RunConfig::new(server, "secret").unwrap();
        HttpDhcpApi::new(&config).unwrap()
    }

    #[test]
    fn test_new_keeps_server() {
        let mut config = RunConfig::new("dns.local:5380", "secret").unwrap();
        config.insecure = true;
        let api = HttpDhcpApi::new(&config).expect("client should build");
        assert_eq!(api.server, "http://dns.local:5380");
        assert_eq!(api.token, "secret");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connectivity_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let config = RunConfig::new("http://127.0.0.1:9", "secret").unwrap();
        let api = HttpDhcpApi::new(&config).unwrap();
        let err = api.list_scopes().await.unwrap_err();
        assert!(matches!(err, ApiError::Connectivity { .. }), "{err}");
        assert!(err.to_string().contains("hint"));
    }

    #[tokio::test]
    async fn test_requests_carry_token_and_parameters() {
        let (server, handle) = serve(vec![
            (200, fixture("scopes_list.json")),
            (200, fixture("scope_get_office.json")),
            (200, fixture("leases_list.json")),
        ])
        .await;
        let api = api(&server);

        let scopes = api.list_scopes().await.expect("scope list");
        assert_eq!(scopes.len(), 2);
        let detail = api.get_scope("Office").await.expect("scope detail");
        assert_eq!(detail.starting_address, "10.10.10.1");
        let leases = api.list_leases("Main Office").await.expect("lease list");
        assert_eq!(leases.len(), 5);

        let requests = handle.await.unwrap();
        assert_eq!(
            requests[0],
            "GET /api/dhcp/scopes/list?token=secret HTTP/1.1"
        );
        assert_eq!(
            requests[1],
            "GET /api/dhcp/scopes/get?token=secret&name=Office HTTP/1.1"
        );
        assert_eq!(
            requests[2],
            "GET /api/dhcp/leases/list?token=secret&scope=Main+Office HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let (server, handle) = serve(vec![(401, "unauthorized".to_string())]).await;
        let err = api(&server).list_scopes().await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }), "{err}");
        assert!(err.to_string().contains("token was rejected"));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_envelope_is_protocol_error() {
        let (server, handle) = serve(vec![(200, fixture("error_invalid_token.json"))]).await;
        let err = api(&server).get_scope("Office").await.unwrap_err();
        match err {
            ApiError::Protocol { endpoint, message } => {
                assert_eq!(endpoint, SCOPES_GET);
                assert_eq!(message, "Invalid token or session expired.");
            }
            other => panic!("unexpected error {other:?}"),
        }
        handle.await.unwrap();
    }
}
