use std::env;

use crate::balldontlie::FetchWindow;
use crate::error::Error;

/// Everything a tick needs, gathered from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bdl_api_key: String,
    pub mongodb_uri: String,
    /// When false, belt updates are logged instead of posted.
    pub post_to_bluesky: bool,
    pub bluesky_username: String,
    pub bluesky_password: String,
    pub fetch_window: FetchWindow,
}

impl Config {
    /// Load configuration from the environment. A missing required variable
    /// is fatal; the process must not start ticking without them.
    pub fn from_env() -> Result<Self, Error> {
        let bdl_api_key = require("BDL_API_KEY")?;
        let mongodb_uri = require("MONGODB_URI")?;
        let post_to_bluesky = require("POST_TO_BLUESKY")? == "1";
        let bluesky_username = require("BLUESKY_USERNAME")?;
        let bluesky_password = require("BLUESKY_PASSWORD")?;
        let fetch_window = match env::var("FETCH_WINDOW") {
            Ok(raw) => FetchWindow::parse(&raw)
                .ok_or_else(|| Error::Config(format!("unrecognized FETCH_WINDOW value: {}", raw)))?,
            Err(_) => FetchWindow::CatchUp,
        };
        Ok(Self {
            bdl_api_key,
            mongodb_uri,
            post_to_bluesky,
            bluesky_username,
            bluesky_password,
            fetch_window,
        })
    }
}

fn require(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
}
