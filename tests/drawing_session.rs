use eframe_shapes::input::route_event;
use eframe_shapes::{
    CanvasSize, Coordinate, Document, EditorContext, FillMode, InputEvent, Outline,
    PointerOutcome, ShapeKind, StyleConfiguration, Tool, render_instructions,
};
use egui::PointerButton;

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn drag(ctx: &mut EditorContext, from: Coordinate, to: Coordinate) -> PointerOutcome {
    let events = [
        InputEvent::PointerDown {
            position: from,
            button: PointerButton::Primary,
        },
        InputEvent::PointerMove { position: to },
        InputEvent::PointerUp {
            position: to,
            button: PointerButton::Primary,
        },
    ];
    let mut last = PointerOutcome::Ignored;
    for event in &events {
        last = route_event(event, ctx);
    }
    last
}

fn editor(fill_mode: FillMode) -> EditorContext {
    let style = StyleConfiguration {
        tool: Tool::Rectangle,
        fill_mode,
        primary_color: 0xFF000000,
        secondary_color: 0xFFFF0000,
        brush_width: 3,
    };
    EditorContext::new(Document::new(CanvasSize::new(400, 300)), style)
}

#[test]
fn test_filled_outline_rectangle_style() {
    let mut ctx = editor(FillMode::FilledOutline);
    let PointerOutcome::Finished(shape) = drag(&mut ctx, c(80.0, 90.0), c(20.0, 10.0)) else {
        panic!("drag should finish a shape");
    };
    assert_eq!(shape.kind, ShapeKind::Rectangle);
    assert_eq!(shape.a, c(20.0, 10.0));
    assert_eq!(shape.b, c(80.0, 90.0));
    assert_eq!(shape.fill, Some(0xFF000000));
    assert_eq!(shape.outline, Some(Outline::new(0xFFFF0000, 3.0)));
    assert!(ctx.document().is_modified());
}

#[test]
fn test_each_tool_draws_its_kind() {
    let mut ctx = editor(FillMode::Outline);
    for (tool, kind) in [
        (Tool::Rectangle, ShapeKind::Rectangle),
        (Tool::Ellipse, ShapeKind::Ellipse),
        (Tool::Line, ShapeKind::Line),
    ] {
        ctx.set_tool(tool);
        drag(&mut ctx, c(10.0, 10.0), c(60.0, 40.0));
        assert_eq!(ctx.document().layers().last().map(|s| s.kind), Some(kind));
    }
    assert_eq!(ctx.document().len(), 3);

    let line = ctx.document().layers()[2];
    assert_eq!(line.fill, None);
    assert_eq!(line.outline, Some(Outline::new(0xFF000000, 3.0)));
}

#[test]
fn test_preview_renders_on_top() {
    let mut ctx = editor(FillMode::Filled);
    drag(&mut ctx, c(0.0, 0.0), c(50.0, 50.0));
    ctx.set_tool(Tool::Ellipse);

    ctx.pointer_down(c(100.0, 100.0), true);
    assert_eq!(render_instructions(&ctx).len(), 1);
    ctx.pointer_move(c(150.0, 120.0));

    let instructions = render_instructions(&ctx);
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].kind, ShapeKind::Rectangle);
    assert_eq!(instructions[1].kind, ShapeKind::Ellipse);
    assert_eq!(ctx.document().len(), 1);
}

#[test]
fn test_secondary_release_discards_drag() {
    let mut ctx = editor(FillMode::Filled);
    ctx.pointer_down(c(0.0, 0.0), true);
    ctx.pointer_move(c(20.0, 20.0));
    let up = InputEvent::PointerUp {
        position: c(20.0, 20.0),
        button: PointerButton::Secondary,
    };
    assert_eq!(route_event(&up, &mut ctx), PointerOutcome::Abandoned);
    assert!(ctx.document().is_empty());
    assert!(render_instructions(&ctx).is_empty());
}

#[test]
fn test_eraser_session() {
    let mut ctx = editor(FillMode::Filled);
    drag(&mut ctx, c(0.0, 0.0), c(100.0, 100.0));
    drag(&mut ctx, c(50.0, 50.0), c(150.0, 150.0));
    ctx.set_tool(Tool::Eraser);

    let down = InputEvent::PointerDown {
        position: c(75.0, 75.0),
        button: PointerButton::Primary,
    };
    let PointerOutcome::Erased(removed) = route_event(&down, &mut ctx) else {
        panic!("eraser should remove the top shape");
    };
    assert_eq!(removed.a, c(50.0, 50.0));
    assert_eq!(ctx.document().len(), 1);
    assert!(ctx.state().is_idle());
}

#[test]
fn test_click_without_drag_can_be_erased() {
    let mut ctx = editor(FillMode::Outline);
    for tool in [Tool::Line, Tool::Rectangle] {
        ctx.set_tool(tool);
        ctx.pointer_down(c(50.0, 50.0), true);
        assert!(matches!(ctx.pointer_up(c(50.0, 50.0), true), PointerOutcome::Finished(_)));
    }
    assert_eq!(ctx.document().len(), 2);

    ctx.set_tool(Tool::Eraser);
    assert!(matches!(ctx.pointer_down(c(50.0, 50.0), true), PointerOutcome::Erased(_)));
    assert!(matches!(ctx.pointer_down(c(50.0, 50.0), true), PointerOutcome::Erased(_)));
    assert!(ctx.document().is_empty());
}
