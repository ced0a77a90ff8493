//! Server configuration, parsed from the command line.

use clap::Parser;

/// Command-line options for the `linekv` server.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "linekv",
    author,
    version,
    about = "In-memory key-value store served over a line-based TCP protocol",
    after_help = "CONNECTING:\n    $ linekv-cli --port 6379\n    linekv> SET name Ariz\n    OK\n    linekv> GET name\n    \"Ariz\""
)]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, default_value = crate::DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = crate::DEFAULT_PORT)]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
