use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use log::{debug, trace};
use reqwest::Client;
use std::ops::{Deref, DerefMut};
use url::Url;

use crate::config::FetchConfig;
use crate::errors::FetchError;

/// An open request whose head has been received and whose body can be drained.
pub trait Connection {
    fn status(&self) -> u16;

    /// Returns the next piece of the body, or `None` once it is exhausted.
    async fn read_chunk(&mut self) -> Result<Option<Bytes>, FetchError>;

    /// Drops the body stream. Reading afterwards yields `None`.
    fn close_body(&mut self);

    fn disconnect(&mut self);
}

pub trait Connector {
    type Conn: Connection;

    async fn connect(&self, url: &Url) -> Result<Self::Conn, FetchError>;
}

pub struct HttpConnector {
    client: Client,
}

impl HttpConnector {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        // No idle pool: the socket closes when the connection is released
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Connector for HttpConnector {
    type Conn = HttpConnection;

    async fn connect(&self, url: &Url) -> Result<HttpConnection, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_send(url.as_str(), e))?;

        let status = response.status().as_u16();
        debug!("{} answered {}", response.url(), status);

        Ok(HttpConnection {
            status,
            body: Some(response.bytes_stream().boxed()),
        })
    }
}

pub struct HttpConnection {
    status: u16,
    body: Option<BoxStream<'static, reqwest::Result<Bytes>>>,
}

impl Connection for HttpConnection {
    fn status(&self) -> u16 {
        self.status
    }

    async fn read_chunk(&mut self) -> Result<Option<Bytes>, FetchError> {
        let Some(body) = self.body.as_mut() else {
            return Ok(None);
        };
        match body.next().await {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(e)) => Err(std::io::Error::new(std::io::ErrorKind::Other, e).into()),
            None => Ok(None),
        }
    }

    fn close_body(&mut self) {
        self.body = None;
    }

    fn disconnect(&mut self) {
        // With idle pooling disabled, dropping the stream closes the socket
        self.body.take();
    }
}

/// Owns a connection for the duration of a fetch and disconnects it on drop,
/// whichever way the fetch exits.
pub struct ConnectionGuard<C: Connection> {
    conn: C,
}

impl<C: Connection> ConnectionGuard<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

impl<C: Connection> Deref for ConnectionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.conn
    }
}

impl<C: Connection> DerefMut for ConnectionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.conn
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.conn.disconnect();
        trace!("connection released");
    }
}
