//! TCP client for talking to a LineKV server.
//!
//! The client sends one request line and reads back exactly one reply line.
//! It backs the interactive `linekv-cli` binary.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

/// Errors returned by [`Client`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server closed the connection before replying
    #[error("connection closed by server")]
    ConnectionClosed,

    /// The request itself contains a line break
    #[error("request must be a single line")]
    InvalidInput,
}

/// Line client using split read/write halves.
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl Client {
    /// Connects to a LineKV server.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let socket = TcpStream::connect(addr).await?;
        let (reader, writer) = socket.into_split();

        Ok(Client {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        })
    }

    /// Sends one request line and returns the reply without its terminator.
    pub async fn send(&mut self, line: &str) -> Result<String, ClientError> {
        if line.contains('\n') {
            return Err(ClientError::InvalidInput);
        }

        debug!(request = %line, "Sending");
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        let mut reply = String::new();
        if self.reader.read_line(&mut reply).await? == 0 {
            return Err(ClientError::ConnectionClosed);
        }

        let reply = reply.trim_end_matches(['\r', '\n']).to_string();
        debug!(reply = %reply, "Received");
        Ok(reply)
    }
}

/// Returns true if the user asked the interactive client to exit.
pub fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("EXIT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandHandler;
    use crate::connection::{handle_connection, ConnectionStats};
    use crate::storage::StorageEngine;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn create_test_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler = CommandHandler::new(Arc::new(StorageEngine::new()));
        let stats = Arc::new(ConnectionStats::new());

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                tokio::spawn(handle_connection(
                    stream,
                    client_addr,
                    handler.clone(),
                    Arc::clone(&stats),
                ));
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_round_trip() {
        let addr = create_test_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        assert_eq!(client.send("SET city New York").await.unwrap(), "OK");
        assert_eq!(client.send("GET city").await.unwrap(), "\"New York\"");
        assert_eq!(client.send("INCR n").await.unwrap(), "(integer) 1");
        assert_eq!(client.send("GET missing").await.unwrap(), "(nil)");
    }

    #[tokio::test]
    async fn test_error_replies() {
        let addr = create_test_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        let reply = client.send("FOO").await.unwrap();
        assert!(reply.starts_with("ERROR"));

        // The connection is still usable
        assert_eq!(client.send("PING").await.unwrap(), "PONG");
    }

    #[tokio::test]
    async fn test_connection_closed_after_quit() {
        let addr = create_test_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        assert_eq!(client.send("QUIT").await.unwrap(), "OK");
        assert!(client.send("PING").await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_multi_line_input() {
        let addr = create_test_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        assert!(matches!(
            client.send("SET a 1\nSET b 2").await,
            Err(ClientError::InvalidInput)
        ));
    }

    #[test]
    fn test_exit_command() {
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  Exit \n"));
        assert!(!is_exit_command("EXIT now"));
        assert!(!is_exit_command("QUIT"));
    }
}
