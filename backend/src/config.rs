//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present), and CLI flags override them.
//!
//! | Variable           | Default       |
//! |--------------------|---------------|
//! | `CWR_SENDER_ID`    | `SENDER_ID`   |
//! | `CWR_RECEIVER_ID`  | `RECEIVER_ID` |
//! | `CWR_VERSION_TAG`  | `CWR2.1`      |
//! | `CWR_OUTPUT_DIR`   | `converted`   |
//! | `CWR_PORT`         | `3000`        |

use chrono::{NaiveDate, Utc};
use std::env;
use std::path::PathBuf;

use crate::cwr::HeaderInfo;
use crate::error::ConfigError;

pub const DEFAULT_SENDER_ID: &str = "SENDER_ID";
pub const DEFAULT_RECEIVER_ID: &str = "RECEIVER_ID";
pub const DEFAULT_VERSION_TAG: &str = "CWR2.1";
pub const DEFAULT_OUTPUT_DIR: &str = "converted";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sender_id: String,
    pub receiver_id: String,
    pub version_tag: String,
    /// Where the HTTP server writes generated `.cwr` files.
    pub output_dir: PathBuf,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sender_id: DEFAULT_SENDER_ID.to_string(),
            receiver_id: DEFAULT_RECEIVER_ID.to_string(),
            version_tag: DEFAULT_VERSION_TAG.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("CWR_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "CWR_PORT",
                    value: raw.clone(),
                })?,
            None => defaults.port,
        };

        Ok(Self {
            sender_id: var("CWR_SENDER_ID").unwrap_or(defaults.sender_id),
            receiver_id: var("CWR_RECEIVER_ID").unwrap_or(defaults.receiver_id),
            version_tag: var("CWR_VERSION_TAG").unwrap_or(defaults.version_tag),
            output_dir: var("CWR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            port,
        })
    }

    /// Header identification for a transmission dated `date`.
    pub fn header_info(&self, date: NaiveDate) -> HeaderInfo {
        HeaderInfo::new(&self.sender_id, &self.receiver_id, date)
            .with_version_tag(&self.version_tag)
    }

    /// Header identification dated today (UTC).
    pub fn header_info_today(&self) -> HeaderInfo {
        self.header_info(Utc::now().date_naive())
    }
}
