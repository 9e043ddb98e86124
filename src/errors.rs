/// Transport-level failures. None of these carry an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error while reading response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("Failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Classifies an error returned while sending the request.
    pub fn from_send(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_connect() {
            FetchError::Connect { url, source }
        } else {
            FetchError::Request { url, source }
        }
    }
}

/// Raised when the server answers with anything above 2xx.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Got {code} http response code, expected 2xx")]
pub struct HttpStatusError {
    pub code: u16,
}
