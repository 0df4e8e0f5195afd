use super::model::{DialGeometry, LabelGeometry};
use super::{INACTIVE_ALPHA, LABEL_FONT_SIZE, MARKER_RADIUS};
use crate::gui::tasks::FrameTask;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use orbit::Label;
use orbit::dial::RotarySelector;
use palette::Srgba;
use std::f64::consts::PI;

struct LabelRenderer<'a> {
    label: &'a Label,
    geometry: LabelGeometry,
    active: bool,
}

impl<'a> LabelRenderer<'a> {
    fn new(label: &'a Label, geometry: LabelGeometry, active: bool) -> Self {
        Self {
            label,
            geometry,
            active,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let alpha = if self.active { 1.0 } else { INACTIVE_ALPHA };
        let (r, g, b, a) = colors.label.into_components();
        cr.set_source_rgba(r, g, b, a * alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);

        let text = self.label.as_str();
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                self.geometry.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.geometry.center.y - ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

pub fn draw(
    cr: &Context,
    dial: &RotarySelector<FrameTask>,
    geometry: &DialGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_ring(cr, geometry, colors)?;
    draw_circle(cr, geometry.hub.x, geometry.hub.y, geometry.hub_radius(), colors.hub)?;

    let marker = geometry.marker();
    draw_circle(cr, marker.x, marker.y, MARKER_RADIUS, colors.marker)?;

    let labels = geometry.labels(dial.layout(), dial.rotation());
    for (i, (item, label)) in dial.entries().iter().zip(labels).enumerate() {
        LabelRenderer::new(&item.label, label, dial.active_index() == Some(i)).draw(cr, colors)?;
    }
    Ok(())
}

fn draw_ring(cr: &Context, geometry: &DialGeometry, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.ring.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(2.0);
    cr.new_sub_path();
    cr.arc(
        geometry.hub.x,
        geometry.hub.y,
        geometry.ring_radius(),
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}

fn draw_circle(cr: &Context, x: f64, y: f64, radius: f64, color: Srgba<f64>) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.new_sub_path();
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    cr.fill()
}
