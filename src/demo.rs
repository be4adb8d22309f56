//! Host page: owns the divider position, plays the introductory demonstration
//! once the slider is on screen, and toggles which area can be dragged.

use std::cell::Cell;
use std::rc::Rc;
use raylib::prelude::*;
use tracing::debug;

use crate::animation::Demonstration;
use crate::constants::*;
use crate::slider::{BeforeAfterSlider, SliderImage, SliderProps};

pub struct DemoHost {
    position: Rc<Cell<f32>>,
    visible: Rc<Cell<bool>>,
    feels_only_the_delimiter: bool,
    demonstration: Demonstration,
}

impl Default for DemoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoHost {
    pub fn new() -> Self {
        Self {
            position: Rc::new(Cell::new(START_POSITION)),
            visible: Rc::new(Cell::new(false)),
            feels_only_the_delimiter: false,
            demonstration: Demonstration::new(),
        }
    }

    /// Props for a slider whose position is owned by this host.
    pub fn slider_props(&self, first_image: SliderImage, second_image: SliderImage) -> SliderProps {
        let visible = self.visible.clone();
        let position = self.position.clone();
        SliderProps::new(first_image, second_image)
            .with_current_percent_position(self.position.get())
            .with_feels_only_the_delimiter(self.feels_only_the_delimiter)
            .on_visible(move || visible.set(true))
            .on_change_percent_position(move |percent| position.set(percent))
    }

    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn is_demonstrating(&self) -> bool {
        self.demonstration.is_running()
    }

    /// Runs once per frame, after the slider has seen this frame's input.
    pub fn update(&mut self, now: f64, slider: &mut BeforeAfterSlider) {
        if self.visible.replace(false) {
            self.demonstration.schedule(now);
        }
        if let Some(position) = self.demonstration.tick(now) {
            self.position.set(position);
        }
        slider.set_current_percent_position(Some(self.position.get()));
    }

    pub fn feels_only_the_delimiter(&self) -> bool {
        self.feels_only_the_delimiter
    }

    pub fn toggle_feels_only_the_delimiter(&mut self, slider: &mut BeforeAfterSlider) {
        self.feels_only_the_delimiter = !self.feels_only_the_delimiter;
        slider.set_feels_only_the_delimiter(self.feels_only_the_delimiter);
        debug!(only_delimiter = self.feels_only_the_delimiter, "drag area toggled");
    }

    pub fn button_text(&self) -> String {
        let area = if self.feels_only_the_delimiter { "Only separator" } else { "All area" };
        ["Now:", area, "is clickable"].join(" ")
    }
}

/// Lays out the slider container and the toggle button for a window size.
///
/// `image_size` is the size of the first image once known; the container keeps
/// its aspect ratio and fits between the margins.
pub fn layout(screen_width: f32, screen_height: f32, image_size: Option<(f32, f32)>) -> (Rectangle, Rectangle) {
    let (image_width, image_height) = image_size.unwrap_or((16.0, 9.0));
    let max_width = (screen_width - 2.0 * CONTAINER_MARGIN).max(0.0);
    let max_height = (screen_height - 3.0 * CONTAINER_MARGIN - BUTTON_HEIGHT).max(0.0);

    let mut width = max_width;
    let mut height = if image_width > 0.0 { width * image_height / image_width } else { 0.0 };
    if height > max_height && height > 0.0 {
        width *= max_height / height;
        height = max_height;
    }

    let container = Rectangle::new((screen_width - width) / 2.0, CONTAINER_MARGIN, width, height);
    let button_width = 320.0_f32.min(max_width);
    let button = Rectangle::new(
        (screen_width - button_width) / 2.0,
        container.y + container.height + CONTAINER_MARGIN,
        button_width,
        BUTTON_HEIGHT,
    );
    (container, button)
}
