//! Canvas2D backend
//!
//! Executes draw commands on a `CanvasRenderingContext2d`. Drawing errors
//! are dropped: a missed shape is never worth stopping the frame.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::command::{DrawCommand, Glow, Paint};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Shadow-blur halos (the most expensive part of a frame)
    glow: bool,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, glow: bool) -> Self {
        Self { ctx, glow }
    }

    pub fn render(&self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCommand::Polygon {
                    points,
                    paint,
                    glow,
                } => self.polygon(points, paint, glow.as_ref()),
                DrawCommand::Disc {
                    center,
                    radius,
                    scale_x,
                    paint,
                    alpha,
                    glow,
                } => self.disc(
                    (center.x as f64, center.y as f64),
                    *radius as f64,
                    *scale_x as f64,
                    paint,
                    *alpha as f64,
                    glow.as_ref(),
                ),
            }
        }
    }

    fn apply_glow(&self, glow: Option<&Glow>) {
        match glow {
            Some(glow) if self.glow => {
                self.ctx.set_shadow_color(&glow.color.to_css());
                self.ctx.set_shadow_blur(glow.blur as f64);
            }
            _ => self.ctx.set_shadow_blur(0.0),
        }
    }

    /// Set the fill. Gradients are built around the current origin.
    fn apply_paint(&self, paint: &Paint, radius: f64) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial {
                inner,
                outer,
                focus,
                focus_radius,
            } => {
                let Ok(gradient) = self.ctx.create_radial_gradient(
                    focus.x as f64,
                    focus.y as f64,
                    *focus_radius as f64,
                    0.0,
                    0.0,
                    radius,
                ) else {
                    self.ctx.set_fill_style_str(&outer.to_css());
                    return;
                };
                gradient.add_color_stop(0.0, &inner.to_css()).ok();
                gradient.add_color_stop(1.0, &outer.to_css()).ok();
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn polygon(&self, points: &[glam::Vec2], paint: &Paint, glow: Option<&Glow>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.save();
        self.apply_glow(glow);
        self.apply_paint(paint, 0.0);

        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.restore();
    }

    fn disc(
        &self,
        center: (f64, f64),
        radius: f64,
        scale_x: f64,
        paint: &Paint,
        alpha: f64,
        glow: Option<&Glow>,
    ) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.apply_glow(glow);

        // Draw around the origin so gradients and squash share one frame
        self.ctx.translate(center.0, center.1).ok();
        self.ctx.scale(scale_x, 1.0).ok();
        self.apply_paint(paint, radius);

        self.ctx.begin_path();
        self.ctx.arc(0.0, 0.0, radius.max(0.0), 0.0, TAU).ok();
        self.ctx.fill();
        self.ctx.restore();
    }
}
