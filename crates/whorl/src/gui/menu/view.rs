use super::animate::ItemFrame;
use super::scene::Scene;
use super::{ANCHOR_DOT_RADIUS, ICON_SCALE, LABEL_FONT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use std::f64::consts::PI;

struct ItemRenderer<'a> {
    frame: &'a ItemFrame,
    radius: f64,
    pixbuf: Option<&'a Pixbuf>,
}

impl<'a> ItemRenderer<'a> {
    fn new(frame: &'a ItemFrame, radius: f64, pixbuf: Option<&'a Pixbuf>) -> Self {
        Self {
            frame,
            radius,
            pixbuf,
        }
    }

    /// Frame positions are top-left placements; drawing is center-based.
    fn center(&self) -> (f64, f64) {
        (
            self.frame.position.x + self.radius,
            self.frame.position.y + self.radius,
        )
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_content(cr, colors)
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.item.into_components();
        cr.set_source_rgba(r, g, b, a * self.frame.opacity);
        let (cx, cy) = self.center();
        cr.arc(cx, cy, self.radius, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(pixbuf) = self.pixbuf {
            self.draw_icon(cr, pixbuf)
        } else {
            self.draw_label(cr, colors)
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        // fit icon into the item circle
        let icon_scale = (self.radius * 2.0 * ICON_SCALE) / pixbuf.width().max(1) as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );
        let (cx, cy) = self.center();
        let (ix, iy) = (cx - iw / 2.0, cy - ih / 2.0);

        cr.save()?;
        cr.translate(ix, iy);
        cr.scale(icon_scale, icon_scale);

        if self.frame.opacity < 1.0 {
            cr.push_group();
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint()?;
            cr.pop_group_to_source()?;
            cr.paint_with_alpha(self.frame.opacity)?;
        } else {
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint()?;
        }
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.label.into_components();
        cr.set_source_rgba(r, g, b, a * self.frame.opacity);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);
        let text = self.frame.name.as_ref();
        if let Ok(ext) = cr.text_extents(text) {
            let (cx, cy) = self.center();
            cr.move_to(cx - ext.width() / 2.0, cy + ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }
}

pub fn draw(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_anchor_dot(cr, scene, colors)?;

    for frame in scene.frames() {
        ItemRenderer::new(frame, scene.item_radius(), scene.icons().get(&frame.icon))
            .draw(cr, colors)?;
    }
    Ok(())
}

fn draw_anchor_dot(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(center) = scene.anchor_center() else {
        return Ok(());
    };
    let (r, g, b, a) = colors.anchor.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(center.x, center.y, ANCHOR_DOT_RADIUS, 0.0, 2.0 * PI);
    cr.fill()
}
