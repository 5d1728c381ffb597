//! Error types for talking to the DHCP management API.

const CONNECT_HINT: &str =
    "check that the server address is correct and the API port is reachable";
const TOKEN_HINT: &str = "check that the API token is valid and has DHCP view permission";

/// Errors raised while configuring a run or calling the management API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached at all.
    #[error("Cannot connect to {url}: {source}\n  hint: {}", CONNECT_HINT)]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}{hint}")]
    Http {
        status: u16,
        url: String,
        hint: &'static str,
    },

    /// The API envelope reported `status: "error"`.
    #[error("API error from {endpoint}: {message}\n  hint: {}", TOKEN_HINT)]
    Protocol { endpoint: String, message: String },

    /// The response could not be understood.
    #[error("Invalid data from {endpoint}: {message}")]
    Data { endpoint: String, message: String },

    /// Scopes were listed but not one of them could be read.
    #[error("None of the {listed} listed scope(s) could be read, see the warnings above")]
    NoScopeData { listed: usize },

    /// Invalid thresholds or other settings, detected before any request.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn http(status: u16, url: &str) -> ApiError {
        let hint = match status {
            401 | 403 => "\n  hint: the API token was rejected",
            404 => "\n  hint: the endpoint was not found, is this a DHCP management API?",
            _ => "",
        };
        ApiError::Http {
            status,
            url: url.to_string(),
            hint,
        }
    }
}
