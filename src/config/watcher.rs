//! Source document watcher for hot reload.
//!
//! Editors often emit several modify events for one save, and a save that
//! leaves the JSON unchanged should not throw away the working copy. Only a
//! document that parses and differs from the last one sent goes out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::loader::load_document;

/// Decides which file events turn into reloads.
#[derive(Debug)]
struct ReloadFilter {
    path: PathBuf,
    last: Option<Value>,
}

impl ReloadFilter {
    fn new(path: PathBuf, current: Option<Value>) -> Self {
        Self { path, last: current }
    }

    /// The freshly parsed document, if this event warrants a reload.
    fn on_event(&mut self, kind: &EventKind) -> Option<Value> {
        if !(kind.is_modify() || kind.is_create()) {
            return None;
        }

        let document = match load_document(&self.path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(error = %e, "Source document unreadable, keeping current routes");
                return None;
            }
        };

        if self.last.as_ref() == Some(&document) {
            tracing::debug!(path = ?self.path, "Source document unchanged");
            return None;
        }
        self.last = Some(document.clone());
        Some(document)
    }
}

/// Watches the source JSON document and emits each new version.
pub struct DocumentWatcher {
    filter: ReloadFilter,
    update_tx: mpsc::UnboundedSender<Value>,
}

impl DocumentWatcher {
    /// Returns the watcher and the receiving end for reloaded documents.
    ///
    /// `current` is the document already being served, if known; an event
    /// that reproduces it is ignored.
    pub fn new(path: &Path, current: Option<Value>) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            filter: ReloadFilter::new(path.to_path_buf(), current),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Events stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.filter.path.clone();
        let Self { mut filter, update_tx } = self;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(document) = filter.on_event(&event.kind) {
                        tracing::info!(path = ?filter.path, "Source document changed");
                        let _ = update_tx.send(document);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Document watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?path, "Document watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, ModifyKind};
    use serde_json::json;
    use std::fs;

    fn temp_doc(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-watch-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reload_only_on_change() {
        let path = temp_doc("change.json", r#"{"a": []}"#);
        let mut filter = ReloadFilter::new(path.clone(), Some(json!({"a": []})));
        let modify = EventKind::Modify(ModifyKind::Any);

        assert_eq!(filter.on_event(&modify), None);

        fs::write(&path, r#"{"b": []}"#).unwrap();
        assert_eq!(filter.on_event(&modify), Some(json!({"b": []})));
        assert_eq!(filter.on_event(&modify), None);

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_ignores_access_and_broken_json() {
        let path = temp_doc("broken.json", "{oops");
        let mut filter = ReloadFilter::new(path.clone(), None);

        assert_eq!(filter.on_event(&EventKind::Access(AccessKind::Any)), None);
        assert_eq!(filter.on_event(&EventKind::Modify(ModifyKind::Any)), None);

        fs::remove_file(path).unwrap_or_default();
    }
}
