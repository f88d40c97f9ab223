use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::shape::{CanvasSize, ShapeDescriptor};

/// File extension used for template files.
pub const TEMPLATE_EXTENSION: &str = "json";

/// On-disk form of a drawing: canvas size plus shapes in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "Size")]
    pub size: CanvasSize,
    #[serde(rename = "Shapes")]
    pub shapes: Vec<ShapeDescriptor>,
}

impl Template {
    pub fn new(size: CanvasSize, shapes: Vec<ShapeDescriptor>) -> Self {
        Self { size, shapes }
    }

    /// Decode a template from UTF-8 JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TemplateError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode as UTF-8 JSON.
    pub fn to_vec(&self) -> Result<Vec<u8>, TemplateError> {
        Ok(serde_json::to_vec(self)?)
    }
}

pub fn load_template(path: impl AsRef<Path>) -> Result<Template, TemplateError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let template = Template::from_slice(&bytes)?;
    log::info!(
        "Loaded template {} ({}x{}, {} shapes)",
        path.display(),
        template.size.width,
        template.size.height,
        template.shapes.len()
    );
    Ok(template)
}

pub fn save_template(path: impl AsRef<Path>, template: &Template) -> Result<(), TemplateError> {
    let path = path.as_ref();
    fs::write(path, template.to_vec()?)?;
    log::info!("Saved template {} ({} shapes)", path.display(), template.shapes.len());
    Ok(())
}
