use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;
use serde::Deserialize;
use log::LevelFilter;

use crate::{
    Error,
    core::{
        config::Config,
        Result
    },
};

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

pub const ENV_API_URL: &str = "CONTACTS_API_URL";
pub const ENV_API_TIMEOUT: &str = "CONTACTS_API_TIMEOUT";

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,

    #[serde(skip)]
    deserde_level: Option<LevelFilter>,
}

#[derive(Clone, Deserialize)]
struct Configuration {
    #[serde(rename = "apiUrl")]
    api_url     : Option<String>,
    #[serde(rename = "timeoutMs")]
    timeout_ms  : Option<u64>,
    #[serde(rename = "dataDir")]
    data_dir    : Option<String>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apiUrl:{},timeoutMs:{},dataDir:{}",
            self.api_url(),
            self.timeout().as_millis(),
            self.data_dir()
        )?;
        if let Some(logger) = self.logger.as_ref() {
            write!(f, ",logger:{}", logger.level)?;
            if let Some(file) = logger.file.as_ref() {
                write!(f, "@{}", file)?;
            }
        }
        Ok(())
    }
}

pub struct Builder<'a> {
    api_url     : Option<&'a str>,
    timeout_ms  : Option<u64>,
    data_dir    : Option<String>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<Configuration>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            api_url     : None,
            timeout_ms  : None,
            data_dir    : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_api_url(&mut self, url: &'a str) -> &mut Self {
        self.api_url = Some(url);
        self
    }

    pub fn with_timeout_ms(&mut self, timeout: u64) -> &mut Self {
        self.timeout_ms = Some(timeout);
        self
    }

    pub fn with_data_dir(&mut self, input: &str) -> &mut Self {
        let data_dir = match input.strip_prefix("~") {
            Some(rest) => format!("{}{}", env::var("HOME").unwrap_or_else(|_| ".".into()), rest),
            None => input.to_string(),
        };
        self.data_dir = Some(data_dir);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<Configuration>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl<'a> Default for Builder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

// A non-numeric or zero timeout falls back to the default.
fn parse_timeout(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let mut cfg = match b.cfg.as_ref() {
            Some(cfg) => cfg.clone(),
            None => Self {
                api_url     : None,
                timeout_ms  : None,
                data_dir    : None,
                logger      : None,
            }
        };

        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                cfg.api_url = Some(url.trim().to_string());
            }
        }
        if let Ok(timeout) = env::var(ENV_API_TIMEOUT) {
            cfg.timeout_ms = parse_timeout(&timeout);
        }

        if let Some(url) = b.api_url {
            cfg.api_url = Some(url.to_string());
        }
        if let Some(timeout) = b.timeout_ms {
            cfg.timeout_ms = Some(timeout);
        }
        cfg.timeout_ms = cfg.timeout_ms.filter(|v| *v > 0);

        let url = cfg.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        url::Url::parse(url).map_err(|e| {
            Error::Argument(format!("bad api url {}, error: {}", url, e))
        })?;

        if let Some(dir) = b.data_dir.as_ref() {
            cfg.data_dir = Some(dir.to_string());
        }

        if let Some(ref mut logger) = cfg.logger {
            logger.deserde_level = Some(logger.level.parse::<LevelFilter>()
                .unwrap_or(LevelFilter::Info));
            if let Some(level) = b.log_level {
                logger.level = level.to_string();
                logger.deserde_level = Some(level);
            }
            if let Some(file) = b.log_file {
                logger.file = Some(file.to_string());
            }
        } else {
            cfg.logger = Some(LogCfg {
                level: b.log_level.unwrap_or(LevelFilter::Info).to_string(),
                file: b.log_file.map(|f| f.to_string()),
                deserde_level: Some(b.log_level.unwrap_or(LevelFilter::Info)),
            });
        }

        Ok(cfg)
    }
}

impl Config for Configuration {
    fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    fn data_dir(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(".")
    }

    fn log_level(&self) -> LevelFilter {
        self.logger.as_ref()
            .and_then(|v| v.deserde_level)
            .unwrap_or(LevelFilter::Info)
    }

    fn log_file(&self) -> Option<&str> {
        self.logger.as_ref().and_then(|v| v.file.as_deref())
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}
