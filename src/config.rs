use clap::Parser;
use raylib::prelude::*;
use thiserror::Error;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::slider::{SliderImage, SliderProps};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected #RRGGBB or #RRGGBBAA, got {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
pub fn parse_color(value: &str) -> Result<Color, ColorError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return Err(ColorError::InvalidLength(value.to_string()));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(value.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidDigit(value.to_string()))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Compare two images with a draggable divider.
#[derive(Parser, Debug)]
#[command(name = "before-after-slider", version, about)]
pub struct Args {
    /// Image shown on the right of the divider ("after")
    pub first: String,

    /// Image shown on the left of the divider ("before")
    pub second: String,

    /// Text alternative for the first image
    #[arg(long)]
    pub first_alt: Option<String>,

    /// Text alternative for the second image
    #[arg(long)]
    pub second_alt: Option<String>,

    /// Divider color as #RRGGBB or #RRGGBBAA
    #[arg(long, value_parser = parse_color)]
    pub delimiter_color: Option<Color>,

    /// Hide the "Before" / "After" captions
    #[arg(long)]
    pub no_captions: bool,

    /// Keep the measured width when the window is resized
    #[arg(long)]
    pub no_resize_feel: bool,

    /// Only the divider starts a drag, not the whole image
    #[arg(long)]
    pub only_delimiter: bool,

    /// Let the slider own its position and skip the demonstration
    #[arg(long)]
    pub uncontrolled: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,
}

impl Args {
    pub fn images(&self) -> (SliderImage, SliderImage) {
        let image = |url: &str, alt: &Option<String>| match alt {
            Some(alt) => SliderImage::new(url).with_alt(alt.as_str()),
            None => SliderImage::new(url),
        };
        (image(&self.first, &self.first_alt), image(&self.second, &self.second_alt))
    }

    /// Applies the presentation flags on top of host-provided props.
    pub fn apply(&self, mut props: SliderProps) -> SliderProps {
        props = props
            .with_class_name("cli")
            .with_resize_feel(!self.no_resize_feel)
            .with_after_before_text(!self.no_captions);
        if self.only_delimiter {
            props = props.with_feels_only_the_delimiter(true);
        }
        if let Some(color) = self.delimiter_color {
            props = props.with_delimiter_color(color);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colors() {
        assert_eq!(parse_color("#ff8000"), Ok(Color::new(255, 128, 0, 255)));
        assert_eq!(parse_color("00ff0080"), Ok(Color::new(0, 255, 0, 128)));
        assert_eq!(parse_color("#fff"), Err(ColorError::InvalidLength("#fff".to_string())));
        assert_eq!(parse_color("#gg0000"), Err(ColorError::InvalidDigit("#gg0000".to_string())));
        assert!(parse_color("#ffé000").is_err());
    }

    #[test]
    fn parses_command_line() {
        let args = Args::try_parse_from([
            "before-after-slider",
            "after.jpg",
            "before.jpg",
            "--first-alt",
            "Restored",
            "--delimiter-color",
            "#112233",
            "--only-delimiter",
        ])
        .unwrap();
        assert_eq!(args.width, WINDOW_WIDTH);
        assert_eq!(args.delimiter_color, Some(Color::new(0x11, 0x22, 0x33, 255)));
        assert!(args.only_delimiter);
        assert!(!args.uncontrolled);

        let (first, second) = args.images();
        assert_eq!(first.alt.as_deref(), Some("Restored"));
        assert_eq!(second.alt, None);
        assert_eq!(second.url, "before.jpg");
    }

    #[test]
    fn rejects_bad_color_and_missing_images() {
        assert!(Args::try_parse_from(["before-after-slider", "a.jpg", "b.jpg", "--delimiter-color", "red"]).is_err());
        assert!(Args::try_parse_from(["before-after-slider", "a.jpg"]).is_err());
    }
}
