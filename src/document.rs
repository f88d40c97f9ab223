use std::path::{Path, PathBuf};

use crate::geometry::hit_testing;
use crate::shape::{CanvasSize, Coordinate, ShapeDescriptor};
use crate::template::Template;

/// The open drawing: canvas size, layers in paint order, and where it lives on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    size: CanvasSize,
    layers: Vec<ShapeDescriptor>,
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Build a document from a loaded template, remembering where it came from.
    ///
    /// Boxed shapes stored with swapped corners are normalized.
    pub fn from_template(template: Template, path: Option<PathBuf>) -> Self {
        Self {
            size: template.size,
            layers: template
                .shapes
                .into_iter()
                .map(ShapeDescriptor::normalized)
                .collect(),
            path,
            modified: false,
        }
    }

    pub fn to_template(&self) -> Template {
        Template::new(self.size, self.layers.clone())
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn layers(&self) -> &[ShapeDescriptor] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record that the document now lives at `path` and matches what is on disk.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.modified = false;
    }

    /// Append a finished shape on top of the others.
    pub fn add_layer(&mut self, shape: ShapeDescriptor) {
        self.layers.push(shape);
        self.modified = true;
    }

    /// Remove the layer at `idx`; later layers shift down by one.
    pub fn remove_layer(&mut self, idx: usize) -> Option<ShapeDescriptor> {
        if idx >= self.layers.len() {
            log::warn!(
                "Index {} out of bounds for layers. Length = {}",
                idx,
                self.layers.len()
            );
            return None;
        }
        self.modified = true;
        Some(self.layers.remove(idx))
    }

    /// Replace every layer at once.
    pub fn set_layers(&mut self, shapes: Vec<ShapeDescriptor>) {
        self.layers = shapes;
        self.modified = true;
    }

    pub fn clear(&mut self) {
        self.set_layers(Vec::new());
    }

    /// Remove the topmost shape under `point`, if any.
    pub fn erase_at(&mut self, point: Coordinate) -> Option<ShapeDescriptor> {
        match hit_testing::topmost_hit(&self.layers, point, self.size) {
            Some(idx) => {
                log::debug!("Eraser hit layer {} at {:?}", idx, point);
                self.remove_layer(idx)
            }
            None => {
                log::debug!("Eraser missed at {:?}", point);
                None
            }
        }
    }

    /// Name shown in the window title.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn filled_rect(x0: f64, y0: f64, x1: f64, y1: f64, fill: u32) -> ShapeDescriptor {
        ShapeDescriptor::boxed(
            ShapeKind::Rectangle,
            Coordinate::new(x0, y0),
            Coordinate::new(x1, y1),
        )
        .with_fill(Some(fill))
    }

    #[test]
    fn test_add_and_remove_layers() {
        let mut doc = Document::new(CanvasSize::new(100, 100));
        assert!(!doc.is_modified());

        doc.add_layer(filled_rect(0.0, 0.0, 1.0, 1.0, 1));
        doc.add_layer(filled_rect(0.0, 0.0, 1.0, 1.0, 2));
        doc.add_layer(filled_rect(0.0, 0.0, 1.0, 1.0, 3));
        assert!(doc.is_modified());

        let removed = doc.remove_layer(1).unwrap();
        assert_eq!(removed.fill, Some(2));
        let fills: Vec<_> = doc.layers().iter().map(|s| s.fill).collect();
        assert_eq!(fills, vec![Some(1), Some(3)]);

        assert!(doc.remove_layer(2).is_none());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_erase_removes_topmost() {
        let mut doc = Document::new(CanvasSize::new(100, 100));
        let a = filled_rect(0.0, 0.0, 20.0, 20.0, 0xFF0000FF);
        let b = filled_rect(0.0, 0.0, 20.0, 20.0, 0xFFFF0000);
        doc.add_layer(a);
        doc.add_layer(b);

        assert_eq!(doc.erase_at(Coordinate::new(10.0, 10.0)), Some(b));
        assert_eq!(doc.layers(), &[a]);

        assert_eq!(doc.erase_at(Coordinate::new(90.0, 90.0)), None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_template_round_trip_keeps_size() {
        let mut doc = Document::new(CanvasSize::new(320, 240));
        doc.add_layer(filled_rect(1.0, 2.0, 3.0, 4.0, 5));

        let restored = Document::from_template(doc.to_template(), None);
        assert_eq!(restored.size(), CanvasSize::new(320, 240));
        assert_eq!(restored.layers(), doc.layers());
        assert!(!restored.is_modified());
    }

    #[test]
    fn test_loaded_shapes_get_normalized_corners() {
        let reversed = ShapeDescriptor {
            kind: ShapeKind::Rectangle,
            a: Coordinate::new(100.0, 100.0),
            b: Coordinate::new(0.0, 0.0),
            outline: None,
            fill: Some(0xFFFF0000),
        };
        let line = ShapeDescriptor {
            kind: ShapeKind::Line,
            ..reversed
        };
        let template = Template::new(CanvasSize::new(200, 200), vec![reversed, line]);

        let mut doc = Document::from_template(template, None);
        assert_eq!(doc.layers()[0].a, Coordinate::new(0.0, 0.0));
        assert_eq!(doc.layers()[0].b, Coordinate::new(100.0, 100.0));
        assert_eq!(doc.layers()[1].a, Coordinate::new(100.0, 100.0));

        let removed = doc.erase_at(Coordinate::new(50.0, 50.0));
        assert_eq!(removed.map(|s| s.kind), Some(ShapeKind::Line));
        assert_eq!(doc.erase_at(Coordinate::new(50.0, 50.0)).map(|s| s.kind), Some(ShapeKind::Rectangle));
    }

    #[test]
    fn test_display_name() {
        let mut doc = Document::default();
        assert_eq!(doc.display_name(), "untitled");
        doc.mark_saved(PathBuf::from("/tmp/drawings/house.json"));
        assert_eq!(doc.display_name(), "house.json");
        assert!(!doc.is_modified());
    }
}
