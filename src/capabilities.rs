//! Optional collaborators injected at startup
//!
//! The application state never probes for features at runtime. Whatever
//! the host can do (show notices, speak a word) is handed over here.

use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Informational notices can be silenced by the user
    pub fn is_optional(self) -> bool {
        matches!(self, NoticeLevel::Info | NoticeLevel::Success)
    }
}

/// Short user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Speaks a word aloud
pub trait Pronouncer: Send + Sync {
    fn speak(&self, text: &str) -> std::io::Result<()>;
}

/// Routes notices to the log
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => info!("{}", message),
            NoticeLevel::Warning => warn!("{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
    }
}

/// Keeps every notice; handy for tests and batch output
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(NoticeLevel, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(NoticeLevel, String)> {
        self.notices().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((level, message.to_string()));
        }
    }
}

/// Text-to-speech through a system command (espeak-ng, espeak, say)
pub struct CommandPronouncer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandPronouncer {
    /// First TTS program found on `PATH`, if any
    pub fn detect() -> Option<Self> {
        let candidates: [(&str, &[&str]); 3] = [
            ("espeak-ng", &["-s", "120", "-v", "en-us"]),
            ("espeak", &["-s", "120", "-v", "en-us"]),
            ("say", &["-r", "140"]),
        ];

        for (name, args) in candidates {
            if let Ok(program) = which::which(name) {
                debug!("pronunciation via {}", program.display());
                return Some(Self {
                    program,
                    args: args.iter().map(|a| a.to_string()).collect(),
                });
            }
        }
        None
    }
}

impl Pronouncer for CommandPronouncer {
    fn speak(&self, text: &str) -> std::io::Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} exited with {}", self.program.display(), status),
            ))
        }
    }
}

/// Everything optional the host provides
#[derive(Clone)]
pub struct Capabilities {
    pub notifier: Arc<dyn Notifier>,
    pub pronouncer: Option<Arc<dyn Pronouncer>>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            pronouncer: None,
        }
    }
}

impl Capabilities {
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn with_pronouncer(mut self, pronouncer: impl Pronouncer + 'static) -> Self {
        self.pronouncer = Some(Arc::new(pronouncer));
        self
    }
}
