//! Bridging a child process' output to whoever is watching it.
//!
//! Each redirected stream gets its own reader task, so lines of one stream
//! reach the sink in the order the process wrote them. Lines of stdout and
//! stderr may interleave in any order.

use futures_lite::io::{AsyncBufReadExt, AsyncRead, BufReader};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Which standard stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// One line of console output, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub stream: OutputStream,
    pub text: String,
}

/// Receives console output of a running server.
///
/// Called from the reader tasks; implementations must return quickly and
/// must never block, or the child process stalls on a full pipe.
pub trait OutputSink: Send + Sync {
    fn send(&self, line: ConsoleLine);
}

/// Forwards console lines into an unbounded channel.
///
/// # Example
///
/// ```
/// use starrupture_server::server::ChannelSink;
///
/// let (sink, mut rx) = ChannelSink::new();
/// // hand `sink` to the adapter, then drain `rx` in the host console
/// # drop(sink);
/// # assert!(rx.try_recv().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ConsoleLine>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConsoleLine>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl OutputSink for ChannelSink {
    fn send(&self, line: ConsoleLine) {
        // A closed receiver just means nobody is watching anymore.
        let _ = self.tx.send(line);
    }
}

/// Logs console lines as `tracing` events tagged with the server id.
#[derive(Debug, Clone)]
pub struct TracingSink {
    server_id: String,
}

impl TracingSink {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
        }
    }
}

impl OutputSink for TracingSink {
    fn send(&self, line: ConsoleLine) {
        match line.stream {
            OutputStream::Stdout => {
                tracing::info!(server_id = %self.server_id, "{}", line.text)
            }
            OutputStream::Stderr => {
                tracing::warn!(server_id = %self.server_id, "{}", line.text)
            }
        }
    }
}

/// Spawns a task that reads `reader` line by line into `sink` until EOF.
///
/// Invalid UTF-8 is replaced rather than dropping the line.
pub(crate) fn spawn_line_reader<R>(
    reader: R,
    stream: OutputStream,
    sink: Arc<dyn OutputSink>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer).await {
                Ok(0) => break,
                Ok(_) => {
                    while matches!(buffer.last(), Some(b'\n' | b'\r')) {
                        buffer.pop();
                    }
                    sink.send(ConsoleLine {
                        stream,
                        text: String::from_utf8_lossy(&buffer).into_owned(),
                    });
                }
                Err(e) => {
                    tracing::debug!(?stream, error = %e, "Console reader stopped");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_reader_preserves_order_and_strips_terminators() {
        let (sink, mut rx) = ChannelSink::new();
        let input: &[u8] = b"first\r\nsecond\nthird";

        let handle = spawn_line_reader(input, OutputStream::Stderr, Arc::new(sink));
        handle.await.unwrap();

        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            assert_eq!(line.stream, OutputStream::Stderr);
            lines.push(line.text);
        }
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_line_reader_tolerates_invalid_utf8() {
        let (sink, mut rx) = ChannelSink::new();
        let input: &[u8] = b"ok \xff\xfe\n";

        spawn_line_reader(input, OutputStream::Stdout, Arc::new(sink))
            .await
            .unwrap();

        let line = rx.try_recv().unwrap();
        assert!(line.text.starts_with("ok "));
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.send(ConsoleLine {
            stream: OutputStream::Stdout,
            text: "lost".to_string(),
        });
    }
}
