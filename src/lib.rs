#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod style;
pub mod template;

pub use app::{AppSettings, ShapesApp};
pub use document::Document;
pub use error::{AppError, DimensionError, ExportError, TemplateError};
pub use input::{InputEvent, InputHandler};
pub use renderer::{RenderInstruction, Renderer, render_instructions};
pub use shape::{CanvasSize, Coordinate, Outline, ShapeDescriptor, ShapeKind, normalize};
pub use state::{EditorContext, EditorState, PointerOutcome};
pub use style::{FillMode, StyleConfiguration, Tool};
pub use template::{Template, load_template, save_template};
