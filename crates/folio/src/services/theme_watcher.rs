//! Theme file watcher with live reload support.
//!
//! A background thread watches the theme file's directory. When the file
//! changes, its content is read and forwarded to the owning thread, which
//! imports it into the store. Editors often write the same bytes several
//! times per save; content whose SHA-256 matches the last delivered version
//! is dropped.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

/// Debounce interval (in ms) for file change events.
const FILE_CHANGE_DEBOUNCE_MS: u64 = 300;

/// Messages sent from the watcher thread.
#[derive(Debug, PartialEq)]
pub enum ThemeMessage {
    /// The file has new content.
    Changed(String),
    /// The file changed but could not be read.
    Error(String),
}

/// Hex SHA-256 of `content`.
pub fn fingerprint(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

/// Remembers the last delivered content by fingerprint.
#[derive(Debug, Default)]
pub struct ContentTracker {
    last: Option<String>,
}

impl ContentTracker {
    pub fn new(initial: &[u8]) -> Self {
        Self {
            last: Some(fingerprint(initial)),
        }
    }

    /// Record `content`, returning whether it differs from the last version.
    pub fn changed(&mut self, content: &[u8]) -> bool {
        let print = fingerprint(content);
        if self.last.as_deref() == Some(print.as_str()) {
            return false;
        }
        self.last = Some(print);
        true
    }
}

/// Handle to the watcher thread. Dropping it stops the thread.
pub struct ThemeWatcher {
    shutdown_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ThemeWatcher {
    /// Start watching `path`, sending changes to `sender`.
    ///
    /// `initial` is the content the caller already loaded; it is not sent
    /// again.
    pub fn start(path: &Path, initial: &[u8], sender: Sender<ThemeMessage>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("cannot watch {}", path.display()))?;
        let tracker = ContentTracker::new(initial);
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        info!("Starting theme file watcher for: {}", path.display());

        let flag = shutdown_flag.clone();
        let handle = thread::spawn(move || {
            run_file_watcher(path, tracker, sender, flag);
        });

        Ok(Self {
            shutdown_flag,
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.shutdown_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        debug!("Theme watcher stopped");
    }
}

impl Drop for ThemeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Watcher loop, run on the background thread.
fn run_file_watcher(
    path: PathBuf,
    mut tracker: ContentTracker,
    sender: Sender<ThemeMessage>,
    shutdown_flag: Arc<AtomicBool>,
) {
    let debounce_duration = Duration::from_millis(FILE_CHANGE_DEBOUNCE_MS);
    let watched = path.clone();

    let mut debouncer = match new_debouncer(debounce_duration, move |res: DebounceEventResult| {
        match res {
            Ok(events) => {
                if !events.iter().any(|e| e.path == watched) {
                    return;
                }
                debug!("Theme file change detected");
                let message = match std::fs::read(&watched) {
                    Ok(content) => {
                        if !tracker.changed(&content) {
                            debug!("Theme file content unchanged, skipping");
                            return;
                        }
                        match String::from_utf8(content) {
                            Ok(text) => ThemeMessage::Changed(text),
                            Err(e) => ThemeMessage::Error(format!("theme file is not UTF-8: {}", e)),
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read theme file: {}", e);
                        ThemeMessage::Error(format!("failed to read theme file: {}", e))
                    }
                };
                // The receiver is gone once the owner shuts down.
                let _ = sender.send(message);
            }
            Err(err) => {
                error!("File watcher error: {}", err);
            }
        }
    }) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to create file watcher: {}", e);
            return;
        }
    };

    // Watch the parent directory; editors that save by rename replace the
    // file's inode.
    let watch_dir = path.parent().unwrap_or(path.as_path());
    if let Err(e) = debouncer
        .watcher()
        .watch(watch_dir, RecursiveMode::NonRecursive)
    {
        error!("Failed to watch theme directory: {}", e);
        return;
    }

    info!("File watcher started, watching: {}", watch_dir.display());

    while !shutdown_flag.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_millis(100));
    }

    debug!("Theme file watcher thread shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(fingerprint(b"abc").len(), 64);
    }

    #[test]
    fn test_tracker_skips_identical_content() {
        let mut tracker = ContentTracker::new(b"{}");
        assert!(!tracker.changed(b"{}"));
        assert!(tracker.changed(b"{\"a\":1}"));
        assert!(!tracker.changed(b"{\"a\":1}"));
        assert!(tracker.changed(b"{}"));
    }

    #[test]
    fn test_start_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = std::sync::mpsc::channel();
        assert!(ThemeWatcher::start(&dir.path().join("missing.json"), b"", tx).is_err());
    }

    #[test]
    fn test_watcher_stops_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "{}").unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        let watcher = ThemeWatcher::start(&path, b"{}", tx).unwrap();
        drop(watcher);

        // The thread has exited, so the sender is gone.
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_err());
    }
}
