use raylib::prelude::*;
use raylib::core::text::measure_text;
use crate::constants::*;
use crate::slider::{CaptionAnchor, Layer};

/// Textures of the two slider images, `None` while missing or after a failed load.
#[derive(Default)]
pub struct SliderTextures {
    pub first: Option<Texture2D>,
    pub second: Option<Texture2D>,
}

impl SliderTextures {
    pub fn first_size(&self) -> Option<(f32, f32)> {
        self.first.as_ref().map(|t| (t.width() as f32, t.height() as f32))
    }
}

fn draw_image(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Rectangle, fraction: f32) {
    let source = Rectangle::new(0.0, 0.0, texture.width() as f32 * fraction, texture.height() as f32);
    let target = Rectangle::new(dest.x, dest.y, dest.width * fraction, dest.height);
    d.draw_texture_pro(texture, source, target, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
}

/// Stand-in for an image that could not be shown.
fn draw_alt_text(d: &mut RaylibDrawHandle, alt: &str, dest: Rectangle, fraction: f32) {
    let area = Rectangle::new(dest.x, dest.y, dest.width * fraction, dest.height);
    d.draw_rectangle_rec(area, Color::DARKGRAY);
    let text_width = measure_text(alt, CAPTION_FONT_SIZE) as f32;
    if text_width + 2.0 * CAPTION_PADDING <= area.width {
        d.draw_text(
            alt,
            (area.x + CAPTION_PADDING) as i32,
            (area.y + area.height / 2.0) as i32,
            CAPTION_FONT_SIZE,
            Color::LIGHTGRAY,
        );
    }
}

fn draw_caption(d: &mut RaylibDrawHandle, text: &str, anchor: CaptionAnchor, bounds: Rectangle) {
    let text_width = measure_text(text, CAPTION_FONT_SIZE) as f32;
    let box_width = text_width + 2.0 * CAPTION_PADDING;
    // Captions never spill outside the image part they label
    if box_width + CAPTION_PADDING > bounds.width {
        return;
    }
    let x = match anchor {
        CaptionAnchor::TopLeft => bounds.x + CAPTION_PADDING,
        CaptionAnchor::TopRight => bounds.x + bounds.width - CAPTION_PADDING - box_width,
    };
    let y = bounds.y + CAPTION_PADDING;
    let background = Rectangle::new(x, y, box_width, CAPTION_FONT_SIZE as f32 + CAPTION_PADDING);
    d.draw_rectangle_rec(background, Color::new(0, 0, 0, 140));
    d.draw_text(
        text,
        (x + CAPTION_PADDING) as i32,
        (y + CAPTION_PADDING / 2.0) as i32,
        CAPTION_FONT_SIZE,
        Color::WHITE,
    );
}

pub fn draw_slider(d: &mut RaylibDrawHandle, layers: &[Layer], textures: &SliderTextures) {
    for layer in layers {
        match layer {
            Layer::SizeProbe { dest } => {
                if let Some(texture) = &textures.first {
                    draw_image(d, texture, *dest, 1.0);
                }
            }
            Layer::FirstImage { dest, alt } => match &textures.first {
                Some(texture) => draw_image(d, texture, *dest, 1.0),
                None => draw_alt_text(d, alt, *dest, 1.0),
            },
            Layer::SecondImage { dest, visible_fraction, alt } => match &textures.second {
                Some(texture) => draw_image(d, texture, *dest, *visible_fraction),
                None => draw_alt_text(d, alt, *dest, *visible_fraction),
            },
            Layer::Caption { text, anchor, bounds } => draw_caption(d, text, *anchor, *bounds),
            Layer::Delimiter { line, handle, color } => {
                d.draw_rectangle_rec(*line, *color);
                d.draw_circle_v(*handle, DELIMITER_ICON_RADIUS, *color);
                d.draw_circle_v(*handle, DELIMITER_ICON_RADIUS - DELIMITER_WIDTH, Color::new(0, 0, 0, 90));
            }
        }
    }
}

pub fn draw_button(d: &mut RaylibDrawHandle, bounds: Rectangle, label: &str, hovered: bool) {
    let background = if hovered { Color::new(70, 70, 90, 255) } else { Color::new(50, 50, 64, 255) };
    d.draw_rectangle_rec(bounds, background);
    let text_width = measure_text(label, CAPTION_FONT_SIZE) as f32;
    d.draw_text(
        label,
        (bounds.x + (bounds.width - text_width) / 2.0) as i32,
        (bounds.y + (bounds.height - CAPTION_FONT_SIZE as f32) / 2.0) as i32,
        CAPTION_FONT_SIZE,
        Color::RAYWHITE,
    );
}
