//! Clipboard capability.
//!
//! The server has no clipboard of its own. When configured, text is piped
//! into an external command (`wl-copy`, `pbcopy`, `xclip -selection
//! clipboard`, ...). Every failure here degrades to a warning for the
//! client; none of them fail a tool call.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::config::ClipboardConfig;
use crate::transforms::ErrorKind;

/// How long a clipboard command may take before the copy is abandoned.
pub const COPY_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors that can occur while writing to the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// There is no text to copy.
    #[error("Nothing to copy.")]
    NothingToCopy,

    /// No clipboard is available (not configured or command missing).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard command ran but did not accept the text.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

impl ClipboardError {
    /// Create a new "unavailable" error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a new "write failed" error.
    pub fn write_failed(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }

    /// Clipboard problems are always capability problems.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::CapabilityUnavailable
    }
}

/// Something that can receive copied text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Short description for logs and the server info resource.
    fn describe(&self) -> String;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Shared handle used by tools and transports.
pub type SharedClipboard = Arc<dyn Clipboard>;

/// Clipboard used when nothing is configured; every write is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

#[async_trait]
impl Clipboard for NoClipboard {
    fn describe(&self) -> String {
        "unavailable".to_string()
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::unavailable(
            "no clipboard command configured (set DEVKIT_CLIPBOARD_COMMAND)",
        ))
    }
}

/// Clipboard backed by an external command that reads the text on stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    /// Create a clipboard that runs `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: COPY_TIMEOUT,
        }
    }

    /// Override the time limit for one write.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a whitespace-separated command line such as `xclip -selection clipboard`.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            format!("command: {}", self.program)
        } else {
            format!("command: {} {}", self.program, self.args.join(" "))
        }
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!("Writing {} bytes to clipboard via {}", text.len(), self.program);

        // The child is killed if the write is abandoned.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipboardError::unavailable(format!("{}: {}", self.program, e)))?;

        let write = async {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| ClipboardError::write_failed(e.to_string()))?;
                // Dropping stdin closes the pipe so the command can finish.
            }
            child
                .wait()
                .await
                .map_err(|e| ClipboardError::write_failed(e.to_string()))
        };

        let status = tokio::time::timeout(self.timeout, write)
            .await
            .map_err(|_| {
                ClipboardError::write_failed(format!(
                    "{} did not finish within {}ms",
                    self.program,
                    self.timeout.as_millis()
                ))
            })??;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::write_failed(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}

/// Build the clipboard described by the configuration.
pub fn from_config(config: &ClipboardConfig) -> SharedClipboard {
    match config
        .command
        .as_deref()
        .and_then(CommandClipboard::from_command_line)
    {
        Some(clipboard) => {
            info!("Clipboard enabled ({})", clipboard.describe());
            Arc::new(clipboard)
        }
        None => {
            info!("No clipboard command configured; copy requests will only warn");
            Arc::new(NoClipboard)
        }
    }
}

/// Copy `text`, refusing empty input before touching the clipboard.
pub async fn copy_text(clipboard: &dyn Clipboard, text: &str) -> Result<(), ClipboardError> {
    if text.is_empty() {
        return Err(ClipboardError::NothingToCopy);
    }
    clipboard.write_text(text).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_none());
    }

    #[test]
    fn test_from_config_without_command() {
        let clipboard = from_config(&ClipboardConfig::default());
        assert_eq!(clipboard.describe(), "unavailable");
    }

    #[tokio::test]
    async fn test_no_clipboard_refuses() {
        let err = NoClipboard.write_text("text").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
        assert_eq!(err.kind(), ErrorKind::CapabilityUnavailable);
    }

    #[tokio::test]
    async fn test_copy_text_empty() {
        let err = copy_text(&NoClipboard, "").await.unwrap_err();
        assert!(matches!(err, ClipboardError::NothingToCopy));
        assert_eq!(err.to_string(), "Nothing to copy.");
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let clipboard = CommandClipboard::new("devkit-no-such-clipboard-binary", vec![]);
        let err = clipboard.write_text("text").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_clipboard_writes_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clipboard.txt");
        let clipboard = CommandClipboard::new(
            "sh",
            vec![
                "-c".to_string(),
                format!("cat > '{}'", target.display()),
            ],
        );

        copy_text(&clipboard, "aGVsbG8=").await.unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "aGVsbG8=");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_failure_is_reported() {
        let clipboard = CommandClipboard::new("sh", vec!["-c".to_string(), "cat > /dev/null; exit 3".to_string()]);
        let err = clipboard.write_text("text").await.unwrap_err();
        assert!(matches!(err, ClipboardError::WriteFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hanging_command_times_out() {
        let clipboard = CommandClipboard::new("sh", vec!["-c".to_string(), "sleep 20".to_string()])
            .with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = copy_text(&clipboard, "text").await.unwrap_err();
        assert!(matches!(err, ClipboardError::WriteFailed(_)));
        assert!(err.to_string().contains("did not finish within 200ms"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
