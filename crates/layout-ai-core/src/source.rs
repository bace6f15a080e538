//! Upstream layout sources
//!
//! A source turns a `(system, user)` message pair into raw model output. The
//! recovery pipeline consumes that text, so sources return it untouched,
//! envelope and all.

use anyhow::{anyhow, Context, Result};
use layout_ai_config::config::SourceConfig;
use layout_ai_config::types::{LayoutData, LayoutObject, Vec3};
use std::path::PathBuf;
use std::sync::Arc;

/// Which kind of source produces the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Canned response, no model involved
    Fake,
    /// Recorded response read from disk
    File,
}

impl SourceKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fake" | "mock" => Some(SourceKind::Fake),
            "file" | "replay" => Some(SourceKind::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Fake => "fake",
            SourceKind::File => "file",
        }
    }
}

/// Something that answers a layout request with raw text
pub trait LayoutSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Produce raw output for the given messages
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Source returning a fixed response
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    model_name: Option<String>,
    response: Option<String>,
}

impl FakeSource {
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Replace the canned arena layout with a custom response
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or("fake-model")
    }

    /// The layout served when no custom response is set
    pub fn canned_layout() -> LayoutData {
        let mut layout = LayoutData::new("arena-3d").with_objects(vec![
            LayoutObject::new("EnemySpawner.Basic", Vec3::new(2.0, 0.0, 5.0)),
            LayoutObject::new("Pickup.HealthSmall", Vec3::new(0.0, 0.0, -3.0)),
            LayoutObject::new("Cover.CrateSmall", Vec3::new(-4.0, 0.0, 2.0)),
        ]);
        layout.theme = "desert".to_string();
        layout
    }
}

impl LayoutSource for FakeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fake
    }

    fn complete(&self, _system: &str, user: &str) -> Result<String> {
        tracing::debug!(
            "{} answering request of {} bytes",
            self.model_name(),
            user.len()
        );
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => serde_json::to_string_pretty(&Self::canned_layout())
                .context("Failed to serialize canned layout"),
        }
    }
}

/// Source replaying a response recorded on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayoutSource for FileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read recorded response {}", self.path.display()))
    }
}

/// Create a layout source from configuration
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn LayoutSource>> {
    let kind = SourceKind::from_str(&config.provider)
        .ok_or_else(|| anyhow!("Unknown source provider: {}", config.provider))?;

    match kind {
        SourceKind::Fake => {
            let source = match &config.model_name {
                Some(model_name) => FakeSource::default().with_model_name(model_name.clone()),
                None => FakeSource::default(),
            };
            Ok(Arc::new(source))
        }
        SourceKind::File => {
            let path = config
                .response_file
                .clone()
                .context("The file source needs source.response_file")?;
            Ok(Arc::new(FileSource::new(path)))
        }
    }
}
