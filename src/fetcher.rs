use log::{debug, info};
use url::Url;

use crate::connection::{Connection, ConnectionGuard, Connector};
use crate::errors::{FetchError, HttpStatusError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { size: u64 },
    Failure { status: u16, message: String },
}

impl FetchOutcome {
    fn from_status(status: u16, size: u64) -> Self {
        if status > 299 {
            let err = HttpStatusError { code: status };
            FetchOutcome::Failure {
                status,
                message: err.to_string(),
            }
        } else {
            FetchOutcome::Success { size }
        }
    }

    pub fn into_result(self) -> Result<u64, HttpStatusError> {
        match self {
            FetchOutcome::Success { size } => Ok(size),
            FetchOutcome::Failure { status, .. } => Err(HttpStatusError { code: status }),
        }
    }
}

pub struct Fetcher<C> {
    connector: C,
}

impl<C: Connector> Fetcher<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    #[cfg(test)]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Issues one GET and drains the body, counting bytes as they arrive.
    ///
    /// The status is only inspected after the body is exhausted. Transport
    /// failures come back as `Err`; a non-2xx status is a `Failure` outcome.
    pub async fn fetch(&self, url: &Url) -> Result<FetchOutcome, FetchError> {
        let mut conn = ConnectionGuard::new(self.connector.connect(url).await?);

        let mut size: u64 = 0;
        while let Some(chunk) = conn.read_chunk().await? {
            size += chunk.len() as u64;
        }
        conn.close_body();
        debug!("read {} bytes from {}", size, url);

        let status = conn.status();
        let outcome = FetchOutcome::from_status(status, size);
        info!("{} -> {} ({:?})", url, status, outcome);
        Ok(outcome)
    }
}
