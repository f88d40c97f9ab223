use thiserror::Error;

/// Errors reading or writing template files
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to access template file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template data: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors exporting the drawing as a raster image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot export an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Canvas {width}x{height} is too large to export")]
    TooLarge { width: u32, height: u32 },
}

/// Errors in the width/height fields of the new document dialog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("A value is required")]
    Empty,

    #[error("The value {0} is not valid!")]
    NotANumber(String),

    #[error("The value {0} is too large!")]
    OutOfRange(String),
}

/// Anything that ends up in front of the user as a notification
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

impl AppError {
    /// Short title for the notification window
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Template(_) => "Template error",
            AppError::Export(_) => "Export failed",
            AppError::Dimension(_) => "Invalid value",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
