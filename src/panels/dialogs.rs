use std::path::PathBuf;

use egui::{Align2, Context};

use crate::error::{AppError, DimensionError};
use crate::shape::CanvasSize;

/// What the user did with a dialog this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Open,
    Confirmed,
    Cancelled,
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

fn ok_cancel_row(ui: &mut egui::Ui, ok_label: &str) -> DialogResponse {
    let mut response = DialogResponse::Open;
    ui.horizontal(|ui| {
        if ui.button(ok_label).clicked() {
            response = DialogResponse::Confirmed;
        }
        if ui.button("Cancel").clicked() {
            response = DialogResponse::Cancelled;
        }
    });
    response
}

/// Parse a width or height typed into the new document dialog.
///
/// Only ASCII digits are accepted, and the value must fit in an `i32`.
pub fn parse_dimension(text: &str) -> Result<u32, DimensionError> {
    if text.is_empty() {
        return Err(DimensionError::Empty);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DimensionError::NotANumber(text.to_owned()));
    }
    match text.parse::<u64>() {
        Ok(value) if value <= i32::MAX as u64 => Ok(value as u32),
        _ => Err(DimensionError::OutOfRange(text.to_owned())),
    }
}

#[derive(Debug, Clone)]
pub struct NewDocumentDialog {
    width: String,
    height: String,
}

impl NewDocumentDialog {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            width: size.width.to_string(),
            height: size.height.to_string(),
        }
    }

    /// The size currently typed in. Width is checked first.
    pub fn size(&self) -> Result<CanvasSize, DimensionError> {
        let width = parse_dimension(&self.width)?;
        let height = parse_dimension(&self.height)?;
        Ok(CanvasSize::new(width, height))
    }

    pub fn show(&mut self, ctx: &Context) -> DialogResponse {
        let mut response = DialogResponse::Open;
        modal("New").show(ctx, |ui| {
            egui::Grid::new("new_document_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Width");
                    ui.text_edit_singleline(&mut self.width);
                    ui.end_row();

                    ui.label("Height");
                    ui.text_edit_singleline(&mut self.height);
                    ui.end_row();
                });
            ui.separator();
            response = ok_cancel_row(ui, "OK");
        });
        response
    }
}

/// Which file operation a path prompt is collecting a path for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPurpose {
    Open,
    SaveAs,
    Export,
}

impl PathPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            PathPurpose::Open => "Open template",
            PathPurpose::SaveAs => "Save template as",
            PathPurpose::Export => "Export image",
        }
    }

    fn confirm_label(&self) -> &'static str {
        match self {
            PathPurpose::Open => "Open",
            PathPurpose::SaveAs => "Save",
            PathPurpose::Export => "Export",
        }
    }
}

/// Single-line prompt for a file path
#[derive(Debug, Clone)]
pub struct PathPrompt {
    purpose: PathPurpose,
    path: String,
}

impl PathPrompt {
    pub fn new(purpose: PathPurpose, initial: impl Into<String>) -> Self {
        Self {
            purpose,
            path: initial.into(),
        }
    }

    pub fn purpose(&self) -> PathPurpose {
        self.purpose
    }

    /// The typed path, or `None` while the field is blank.
    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn show(&mut self, ctx: &Context) -> DialogResponse {
        let mut response = DialogResponse::Open;
        modal(self.purpose.title()).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Path");
                let edit = ui.add(egui::TextEdit::singleline(&mut self.path).desired_width(320.0));
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    response = DialogResponse::Confirmed;
                }
            });
            ui.separator();
            let buttons = ok_cancel_row(ui, self.purpose.confirm_label());
            if buttons != DialogResponse::Open {
                response = buttons;
            }
        });
        response
    }
}

/// Dismissible message shown after a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Returns true once the user dismisses it.
    pub fn show(&self, ctx: &Context) -> bool {
        let mut dismissed = false;
        modal(&self.title).show(ctx, |ui| {
            ui.label(&self.message);
            ui.separator();
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        dismissed
    }
}

impl From<&AppError> for Notification {
    fn from(err: &AppError) -> Self {
        Self::new(err.title(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension_accepts_digits() {
        assert_eq!(parse_dimension("800"), Ok(800));
        assert_eq!(parse_dimension("0"), Ok(0));
        assert_eq!(parse_dimension("2147483647"), Ok(i32::MAX as u32));
    }

    #[test]
    fn test_parse_dimension_rejects_bad_input() {
        assert_eq!(parse_dimension(""), Err(DimensionError::Empty));
        assert_eq!(
            parse_dimension("12a"),
            Err(DimensionError::NotANumber("12a".to_owned()))
        );
        assert_eq!(
            parse_dimension("-5"),
            Err(DimensionError::NotANumber("-5".to_owned()))
        );
        assert_eq!(
            parse_dimension("2147483648"),
            Err(DimensionError::OutOfRange("2147483648".to_owned()))
        );
        assert_eq!(
            parse_dimension("99999999999999999999999"),
            Err(DimensionError::OutOfRange("99999999999999999999999".to_owned()))
        );
    }

    #[test]
    fn test_new_document_checks_width_first() {
        let dialog = NewDocumentDialog {
            width: "x".to_owned(),
            height: "y".to_owned(),
        };
        assert_eq!(dialog.size(), Err(DimensionError::NotANumber("x".to_owned())));

        let dialog = NewDocumentDialog::new(CanvasSize::new(640, 480));
        assert_eq!(dialog.size(), Ok(CanvasSize::new(640, 480)));
    }

    #[test]
    fn test_path_prompt_trims() {
        assert_eq!(PathPrompt::new(PathPurpose::Open, "   ").path(), None);
        assert_eq!(
            PathPrompt::new(PathPurpose::Export, " out.png ").path(),
            Some(PathBuf::from("out.png"))
        );
    }

    #[test]
    fn test_notification_from_error() {
        let err = AppError::from(DimensionError::NotANumber("abc".to_owned()));
        let note = Notification::from(&err);
        assert_eq!(note.title, "Invalid value");
        assert_eq!(note.message, "The value abc is not valid!");
    }
}
