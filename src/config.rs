use anyhow::{Context, Result};
use url::Url;

/// The resource probed on every run.
pub const DEFAULT_URL: &str = "https://www.google.com/images/branding/product/ico/googleg_lodp.ico";

pub const USER_AGENT: &str = concat!("fetchcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub url: Url,
    pub user_agent: String,
    /// Honour HTTP(S)_PROXY from the environment.
    pub system_proxy: bool,
}

impl FetchConfig {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid url: {}", url))?;
        Ok(Self {
            url,
            user_agent: USER_AGENT.to_string(),
            system_proxy: true,
        })
    }
}
