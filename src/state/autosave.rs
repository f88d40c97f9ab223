use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::TemplateError;
use crate::template::{TEMPLATE_EXTENSION, save_template};

const AUTOSAVE_PREFIX: &str = "autosave_";

/// Autosave configuration, persisted with the rest of the app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    pub enabled: bool,
    /// Directory where autosave files are written
    pub directory: PathBuf,
    /// Seconds between autosaves
    pub interval_secs: u64,
    /// Maximum number of autosave files to keep
    pub max_files: usize,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("autosave"),
            interval_secs: 300, // 5 minutes
            max_files: 5,
        }
    }
}

/// Periodically writes the open document as a template into the autosave directory.
#[derive(Debug, Clone)]
pub struct Autosave {
    settings: AutosaveSettings,
    /// Last auto-save timestamp
    last_autosave: u64,
}

impl Autosave {
    pub fn new(settings: AutosaveSettings) -> Self {
        Self {
            settings,
            last_autosave: timestamp_secs(),
        }
    }

    pub fn settings(&self) -> &AutosaveSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut AutosaveSettings {
        &mut self.settings
    }

    /// Check if we should auto-save based on the interval
    pub fn is_due(&self, now: u64) -> bool {
        self.settings.enabled && now.saturating_sub(self.last_autosave) >= self.settings.interval_secs
    }

    /// Write an autosave file if one is due. Returns the path written.
    pub fn tick(&mut self, document: &Document) -> Result<Option<PathBuf>, TemplateError> {
        let now = timestamp_secs();
        if !self.is_due(now) {
            return Ok(None);
        }
        self.last_autosave = now;
        self.write(document, now).map(Some)
    }

    /// Write an autosave file stamped with `now` and prune old ones.
    pub fn write(&self, document: &Document, now: u64) -> Result<PathBuf, TemplateError> {
        fs::create_dir_all(&self.settings.directory)?;

        let path = self
            .settings
            .directory
            .join(format!("{}{}.{}", AUTOSAVE_PREFIX, now, TEMPLATE_EXTENSION));
        save_template(&path, &document.to_template())?;
        log::info!("Autosaved {} layers to {}", document.len(), path.display());

        self.cleanup_old_autosaves()?;
        Ok(path)
    }

    fn cleanup_old_autosaves(&self) -> Result<(), TemplateError> {
        let files = autosave_files(&self.settings.directory)?;
        let excess = files.len().saturating_sub(self.settings.max_files);

        for old in &files[..excess] {
            log::info!("Removing old autosave {}", old.display());
            fs::remove_file(old)?;
        }
        Ok(())
    }
}

/// Autosave files in `dir`, oldest first.
fn autosave_files(dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let mut files: Vec<(u64, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let stamp = path
                .file_stem()?
                .to_str()?
                .strip_prefix(AUTOSAVE_PREFIX)?
                .parse::<u64>()
                .ok()?;
            Some((stamp, path))
        })
        .collect();

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
