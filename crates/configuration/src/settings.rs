use serde::Deserialize;
use std::fmt;

/// The root configuration structure for the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The interface the REST server binds to.
    pub host: String,
    /// The TCP port the REST server listens on.
    pub port: u16,
    /// Upper bound on the time spent serving a single request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Default log filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub db: DbConfig,
}

/// Connection parameters for the PostgreSQL instance.
#[derive(Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub dbname: String,
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// The `host:port` string the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// The password never appears in logs.
impl fmt::Display for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:xxx@{}:{}/{}", self.user, self.host, self.port, self.dbname)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"xxx")
            .field("dbname", &self.dbname)
            .finish()
    }
}
