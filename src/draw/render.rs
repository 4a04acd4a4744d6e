//! Cairo-based render pass for pit maps.
//!
//! Everything here is a pure function of the document and the transient
//! overlay state: nothing in this module mutates the [`Document`].

use super::color::{Color, GRID_GRAY, WHITE};
use super::document::Document;
use super::element::{Element, ElementKind};
use super::font::FontDescriptor;
use crate::scout::{RadialMenu, StatusMap, StatusPalette};

/// Alpha of the tinted fill inside pits while editing (CSS `#RRGGBB20`).
const PIT_FILL_ALPHA: f64 = 32.0 / 255.0;
/// Alpha of the status fill inside pits while scouting.
const STATUS_FILL_ALPHA: f64 = 0.4;
/// Pit outline width while scouting.
const STATUS_STROKE_WIDTH: f64 = 3.0;

/// Scouting colors applied to pits instead of their own stroke color.
#[derive(Clone, Copy)]
pub struct ScoutingLook<'a> {
    pub statuses: &'a StatusMap,
    pub palette: &'a StatusPalette,
}

/// Transient state drawn on top of committed content.
#[derive(Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Element being built by press-drag-release, not yet in the document
    pub provisional: Option<&'a Element>,
    /// Radial status menu while a hold gesture is active or fading
    pub menu: Option<&'a RadialMenu>,
    /// Status coloring; `None` renders the editing look
    pub scouting: Option<ScoutingLook<'a>>,
}

/// Redraws the whole map.
///
/// Clears to white, applies zoom then pan, draws the grid, every element in
/// order, and finally the overlays. A zero-sized target is skipped.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `doc` - Document providing elements and camera
/// * `overlay` - Transient content drawn last
/// * `width` - Surface width in device pixels
/// * `height` - Surface height in device pixels
/// * `grid_size` - Background grid spacing in logical units
pub fn render_map(
    ctx: &cairo::Context,
    doc: &Document,
    overlay: &Overlay<'_>,
    width: i32,
    height: i32,
    grid_size: f64,
) {
    if width <= 0 || height <= 0 {
        log::debug!("Skipping render of zero-sized surface {width}x{height}");
        return;
    }

    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Source);
    set_color(ctx, WHITE);
    let _ = ctx.paint();
    ctx.set_operator(cairo::Operator::Over);

    ctx.scale(doc.zoom, doc.zoom);
    ctx.translate(doc.pan_x, doc.pan_y);

    render_grid(ctx, width as f64, height as f64, grid_size);

    for element in &doc.elements {
        render_element(ctx, element, overlay.scouting.as_ref());
    }

    if let Some(element) = overlay.provisional {
        render_element(ctx, element, None);
    }

    if let Some(menu) = overlay.menu {
        render_status_menu(ctx, menu);
    }

    ctx.restore().ok();
}

/// Draws the background grid over `0..width` × `0..height` in logical space.
pub fn render_grid(ctx: &cairo::Context, width: f64, height: f64, grid_size: f64) {
    if grid_size <= 0.0 {
        return;
    }

    set_color(ctx, GRID_GRAY);
    ctx.set_line_width(1.0);

    let mut x = 0.0;
    while x <= width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        x += grid_size;
    }

    let mut y = 0.0;
    while y <= height {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        y += grid_size;
    }

    let _ = ctx.stroke();
}

/// Renders a single element.
///
/// With a scouting look, pits take their status color and show a bare team
/// number; otherwise they use their own color and a "Team N" caption.
pub fn render_element(ctx: &cairo::Context, element: &Element, scouting: Option<&ScoutingLook<'_>>) {
    match &element.kind {
        ElementKind::Line {
            start_x,
            start_y,
            end_x,
            end_y,
            color,
            stroke_width,
        } => {
            render_line(ctx, *start_x, *start_y, *end_x, *end_y, *color, *stroke_width);
        }
        ElementKind::Pit {
            start_x,
            start_y,
            width,
            height,
            color,
            stroke_width,
            team_number,
        } => {
            if *width == 0.0 || *height == 0.0 {
                return;
            }
            match scouting {
                Some(look) => {
                    let status = look.statuses.get(element.id());
                    let status_color = look.palette.color_for(status);
                    render_pit(
                        ctx,
                        *start_x,
                        *start_y,
                        *width,
                        *height,
                        status_color,
                        STATUS_STROKE_WIDTH,
                        STATUS_FILL_ALPHA,
                    );
                    if let Some(team) = team_number {
                        render_centered_label(
                            ctx,
                            start_x + width / 2.0,
                            start_y + height / 2.0,
                            &team.to_string(),
                            status_color,
                            &FontDescriptor::scouting_label(),
                        );
                    }
                }
                None => {
                    render_pit(
                        ctx,
                        *start_x,
                        *start_y,
                        *width,
                        *height,
                        *color,
                        *stroke_width,
                        PIT_FILL_ALPHA,
                    );
                    if let Some(team) = team_number {
                        render_centered_label(
                            ctx,
                            start_x + width / 2.0,
                            start_y + height / 2.0,
                            &format!("Team {team}"),
                            *color,
                            &FontDescriptor::pit_label(),
                        );
                    }
                }
            }
        }
        ElementKind::Text {
            start_x,
            start_y,
            text,
            color,
            ..
        } => {
            if !text.is_empty() {
                render_text(
                    ctx,
                    *start_x,
                    *start_y,
                    text,
                    *color,
                    &FontDescriptor::text_element(),
                );
            }
        }
    }
}

fn set_color(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Render a straight line
fn render_line(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    stroke_width: f64,
) {
    set_color(ctx, color);
    ctx.set_line_width(stroke_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();
}

/// Render a pit: outline plus a translucent fill of the same color
#[allow(clippy::too_many_arguments)]
fn render_pit(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: Color,
    stroke_width: f64,
    fill_alpha: f64,
) {
    ctx.rectangle(x, y, w, h);
    set_color(ctx, color);
    ctx.set_line_width(stroke_width);
    ctx.set_line_join(cairo::LineJoin::Round);
    let _ = ctx.stroke_preserve();

    set_color(ctx, color.with_alpha(color.a * fill_alpha));
    let _ = ctx.fill();
}

fn create_layout(ctx: &cairo::Context, text: &str, font: &FontDescriptor) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string());
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

/// Renders text with its baseline starting at `(x, y)`.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    font: &FontDescriptor,
) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = create_layout(ctx, text, font);

    // Pango measures from the top-left corner; shift up by the baseline.
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(x, y - baseline);
    set_color(ctx, color);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Renders a single line of text centered on `(cx, cy)`.
pub fn render_centered_label(
    ctx: &cairo::Context,
    cx: f64,
    cy: f64,
    text: &str,
    color: Color,
    font: &FontDescriptor,
) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = create_layout(ctx, text, font);
    let (_ink, logical) = layout.extents();
    let scale = pango::SCALE as f64;
    let w = logical.width() as f64 / scale;
    let h = logical.height() as f64 / scale;

    ctx.move_to(cx - w / 2.0, cy - h / 2.0);
    set_color(ctx, color);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Renders the three status circles with their captions.
///
/// Circles are drawn at their animated scale and faded by the menu opacity;
/// hit-testing elsewhere always uses the unscaled radius.
pub fn render_status_menu(ctx: &cairo::Context, menu: &RadialMenu) {
    let opacity = menu.opacity().clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    for circle in menu.circles() {
        let radius = (circle.radius * circle.scale).max(1.0);
        let color = circle.color;

        ctx.save().ok();

        ctx.arc(circle.cx, circle.cy, radius, 0.0, std::f64::consts::PI * 2.0);
        set_color(ctx, color.with_alpha(0.9 * opacity));
        let _ = ctx.fill_preserve();

        let outline = if circle.hovered { 3.0 } else { 2.0 };
        set_color(ctx, WHITE.with_alpha(opacity));
        ctx.set_line_width(outline);
        let _ = ctx.stroke();

        render_centered_label(
            ctx,
            circle.cx,
            circle.cy,
            circle.choice.label(),
            color.contrasting().with_alpha(opacity),
            &FontDescriptor::menu_label(),
        );

        ctx.restore().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::MAP_BLUE;

    fn surface_with_context(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    #[test]
    fn render_leaves_document_untouched() {
        let mut doc = Document::new();
        doc.add(Element::pit(10.0, 10.0, 50.0, 50.0, MAP_BLUE, 2.0));
        let before = doc.clone();

        let (_surface, ctx) = surface_with_context(100, 100);
        render_map(&ctx, &doc, &Overlay::default(), 100, 100, 20.0);

        assert_eq!(doc, before);
    }

    #[test]
    fn zero_size_is_a_noop() {
        let doc = Document::new();
        let (mut surface, ctx) = surface_with_context(10, 10);
        render_map(&ctx, &doc, &Overlay::default(), 0, 10, 20.0);
        drop(ctx);
        let data = surface.data().unwrap();
        assert!(data.iter().all(|byte| *byte == 0));
    }
}
