use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{AppError, AppResult};
use crate::export::export_image;
use crate::input::InputHandler;
use crate::panels::{
    self, DialogResponse, NewDocumentDialog, Notification, PathPrompt, PathPurpose,
};
use crate::renderer::Renderer;
use crate::shape::CanvasSize;
use crate::state::{Autosave, AutosaveSettings, EditorContext};
use crate::style::StyleConfiguration;
use crate::template::{load_template, save_template};

const APP_NAME: &str = "Shapes";

/// Settings that survive restarts. Stored through eframe's persistence.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub style: StyleConfiguration,
    pub autosave: AutosaveSettings,
    pub canvas_size: CanvasSize,
}

/// The dialog currently on screen, if any
#[derive(Debug, Clone)]
pub enum Dialog {
    NewDocument(NewDocumentDialog),
    Path(PathPrompt),
}

/// Window title for a document: `"<name> - Shapes"`, starred when unsaved.
pub fn window_title(document: &Document) -> String {
    let star = if document.is_modified() { "*" } else { "" };
    format!("{}{} - {}", document.display_name(), star, APP_NAME)
}

pub struct ShapesApp {
    editor: EditorContext,
    default_canvas_size: CanvasSize,
    autosave: Autosave,
    input: InputHandler,
    renderer: Renderer,
    dialog: Option<Dialog>,
    notification: Option<Notification>,
    title: String,
}

impl Default for ShapesApp {
    fn default() -> Self {
        Self::with_settings(AppSettings::default())
    }
}

impl ShapesApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: AppSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting with settings: {:?}", settings);
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let document = Document::new(settings.canvas_size);
        Self {
            title: window_title(&document),
            editor: EditorContext::new(document, settings.style),
            default_canvas_size: settings.canvas_size,
            autosave: Autosave::new(settings.autosave),
            input: InputHandler::new(),
            renderer: Renderer::default(),
            dialog: None,
            notification: None,
        }
    }

    pub fn settings(&self) -> AppSettings {
        AppSettings {
            style: *self.editor.style(),
            autosave: self.autosave.settings().clone(),
            canvas_size: self.default_canvas_size,
        }
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    pub fn autosave_settings_mut(&mut self) -> &mut AutosaveSettings {
        self.autosave.settings_mut()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Split borrow for the canvas: input handler and editor together.
    pub(crate) fn canvas_parts(&mut self) -> (&mut InputHandler, &mut EditorContext, &Renderer) {
        (&mut self.input, &mut self.editor, &self.renderer)
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn show_new_document_dialog(&mut self) {
        let size = self.document().size();
        self.open_dialog(Dialog::NewDocument(NewDocumentDialog::new(size)));
    }

    pub fn show_path_prompt(&mut self, purpose: PathPurpose) {
        let initial = match purpose {
            PathPurpose::Export => self
                .document()
                .path()
                .map(|p| p.with_extension("png").display().to_string())
                .unwrap_or_else(|| "drawing.png".to_owned()),
            PathPurpose::Open | PathPurpose::SaveAs => self
                .document()
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "drawing.json".to_owned()),
        };
        self.open_dialog(Dialog::Path(PathPrompt::new(purpose, initial)));
    }

    /// Replace the drawing with an empty canvas.
    pub fn new_document(&mut self, size: CanvasSize) {
        log::info!("New document {}x{}", size.width, size.height);
        self.editor.replace_document(Document::new(size));
        self.default_canvas_size = size;
    }

    /// Load a template. The current drawing is kept if loading fails.
    pub fn open(&mut self, path: &Path) -> AppResult<()> {
        let template = load_template(path)?;
        self.editor
            .replace_document(Document::from_template(template, Some(path.to_path_buf())));
        Ok(())
    }

    /// Save to the known path. Returns false if there is none yet and Save As is needed.
    pub fn save(&mut self) -> AppResult<bool> {
        let Some(path) = self.document().path().map(Path::to_path_buf) else {
            return Ok(false);
        };
        self.save_as(path)?;
        Ok(true)
    }

    pub fn save_as(&mut self, path: PathBuf) -> AppResult<()> {
        save_template(&path, &self.document().to_template())?;
        self.editor.document_mut().mark_saved(path);
        Ok(())
    }

    pub fn export(&self, path: &Path) -> AppResult<()> {
        export_image(self.document(), path)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.editor.cancel_drag();
        self.editor.document_mut().clear();
    }

    /// Run a fallible action, turning failures into a notification.
    pub fn report<T>(&mut self, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{}: {}", err.title(), err);
                self.notification = Some(Notification::from(&err));
                None
            }
        }
    }

    /// Save, falling back to Save As when the document has never been saved.
    pub fn save_or_prompt(&mut self) {
        let result = self.save();
        if let Some(false) = self.report(result) {
            self.show_path_prompt(PathPurpose::SaveAs);
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(notification) = &self.notification {
            if notification.show(ctx) {
                self.notification = None;
            }
            return;
        }

        let Some(mut dialog) = self.dialog.take() else {
            return;
        };

        let keep_open = match &mut dialog {
            Dialog::NewDocument(new_document) => match new_document.show(ctx) {
                DialogResponse::Open => true,
                DialogResponse::Cancelled => false,
                DialogResponse::Confirmed => match new_document.size() {
                    Ok(size) => {
                        self.new_document(size);
                        false
                    }
                    Err(err) => {
                        self.report::<()>(Err(AppError::from(err)));
                        true
                    }
                },
            },
            Dialog::Path(prompt) => match prompt.show(ctx) {
                DialogResponse::Open => true,
                DialogResponse::Cancelled => false,
                DialogResponse::Confirmed => match prompt.path() {
                    None => true,
                    Some(path) => {
                        let result = match prompt.purpose() {
                            PathPurpose::Open => self.open(&path),
                            PathPurpose::SaveAs => self.save_as(path),
                            PathPurpose::Export => self.export(&path),
                        };
                        self.report(result).is_none()
                    }
                },
            },
        };

        if keep_open && self.dialog.is_none() {
            self.dialog = Some(dialog);
        }
    }

    fn tick_autosave(&mut self) {
        if let Err(err) = self.autosave.tick(self.editor.document()) {
            log::warn!("Autosave failed: {}", err);
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let title = window_title(self.document());
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for ShapesApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::menu_bar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.show_dialogs(ctx);

        self.tick_autosave();
        self.update_title(ctx);

        if self.autosave.settings().enabled {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}
