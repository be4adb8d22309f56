//! The before/after comparison slider.
//!
//! Two images are stacked inside a container; the second one is cropped to the
//! divider position. Dragging the divider (or the whole container) moves the
//! split. The position is either owned by the slider or, when a change callback
//! is supplied, owned by the host and only requested from here.

use std::cell::Cell;
use std::rc::Rc;
use raylib::prelude::*;
use tracing::{debug, info};

use crate::constants::*;
use crate::dom::{Capabilities, ContainerRef, Document, DocumentEvent, ListenerId};
use crate::state::{ReadyStatus, SliderMode};
use crate::visibility::{select_strategy, VisibilityStrategy};

#[derive(Debug, Clone, PartialEq)]
pub struct SliderImage {
    pub url: String,
    pub alt: Option<String>,
}

impl SliderImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), alt: None }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    fn alt_or(&self, fallback: &str) -> String {
        self.alt.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Configuration of a slider, built by the host.
pub struct SliderProps {
    first_image: SliderImage,
    second_image: SliderImage,
    current_percent_position: Option<f32>,
    class_name: Option<String>,
    with_resize_feel: bool,
    on_ready: Option<Box<dyn FnMut()>>,
    on_visible: Option<Box<dyn FnMut()>>,
    on_change_percent_position: Option<Box<dyn FnMut(f32)>>,
    delimiter_color: Option<Color>,
    show_after_before_text: bool,
    feels_only_the_delimiter: bool,
}

impl SliderProps {
    pub fn new(first_image: SliderImage, second_image: SliderImage) -> Self {
        Self {
            first_image,
            second_image,
            current_percent_position: None,
            class_name: None,
            with_resize_feel: true,
            on_ready: None,
            on_visible: None,
            on_change_percent_position: None,
            delimiter_color: None,
            show_after_before_text: true,
            feels_only_the_delimiter: false,
        }
    }

    pub fn with_current_percent_position(mut self, percent: f32) -> Self {
        self.current_percent_position = Some(percent);
        self
    }

    /// Extra label for this instance, attached to its log lines.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_resize_feel(mut self, enabled: bool) -> Self {
        self.with_resize_feel = enabled;
        self
    }

    pub fn on_ready(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    pub fn on_visible(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_visible = Some(Box::new(callback));
        self
    }

    /// Makes the slider controlled: drags are reported here instead of applied.
    pub fn on_change_percent_position(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.on_change_percent_position = Some(Box::new(callback));
        self
    }

    pub fn with_delimiter_color(mut self, color: Color) -> Self {
        self.delimiter_color = Some(color);
        self
    }

    pub fn with_after_before_text(mut self, show: bool) -> Self {
        self.show_after_before_text = show;
        self
    }

    pub fn with_feels_only_the_delimiter(mut self, only_delimiter: bool) -> Self {
        self.feels_only_the_delimiter = only_delimiter;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionAnchor {
    TopLeft,
    TopRight,
}

/// One entry of the render plan, drawn back to front.
#[derive(Debug, Clone)]
pub enum Layer {
    /// The first image at container size, shown until the container is measured.
    SizeProbe { dest: Rectangle },
    FirstImage { dest: Rectangle, alt: String },
    /// Left part of the second image, `visible_fraction` of its width.
    SecondImage { dest: Rectangle, visible_fraction: f32, alt: String },
    Caption { text: &'static str, anchor: CaptionAnchor, bounds: Rectangle },
    Delimiter { line: Rectangle, handle: Vector2, color: Color },
}

/// Clamps a pixel offset into the container.
pub fn normalize_new_position(position: f32, width: f32) -> f32 {
    if position > width {
        return width;
    }
    if position < 0.0 {
        return 0.0;
    }
    position
}

pub fn percent_of(position: f32, width: f32) -> f32 {
    normalize_new_position(position, width) / width * 100.0
}

pub fn contains(rect: Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

/// Measures the container, leaving the last width in place when there is nothing to measure.
fn measure_width(container: &ContainerRef, images_width: &Cell<Option<f32>>) {
    let Some(rect) = container.get() else {
        return;
    };
    let width = (rect.width > 0.0).then_some(rect.width);
    debug!(width = ?width, "measured slider container");
    images_width.set(width);
}

pub struct BeforeAfterSlider {
    props: SliderProps,
    container: ContainerRef,
    images_width: Rc<Cell<Option<f32>>>,
    mode: Rc<Cell<SliderMode>>,
    delimiter_percent_position: f32,
    container_position: Vector2,
    ready: ReadyStatus,
    observer: Box<dyn VisibilityStrategy>,
    listeners: Vec<ListenerId>,
}

impl BeforeAfterSlider {
    pub fn new(props: SliderProps, container: ContainerRef, capabilities: Capabilities) -> Self {
        let observer = select_strategy(props.on_visible.is_some(), capabilities);
        let delimiter_percent_position = props.current_percent_position.unwrap_or(DEFAULT_START_PERCENT);
        Self {
            props,
            container,
            images_width: Rc::new(Cell::new(None)),
            mode: Rc::new(Cell::new(SliderMode::Default)),
            delimiter_percent_position,
            container_position: Vector2::new(0.0, 0.0),
            ready: ReadyStatus::default(),
            observer,
            listeners: Vec::new(),
        }
    }

    /// Registers the window-level listeners. A second mount is ignored.
    pub fn mount(&mut self, document: &mut Document) {
        if !self.listeners.is_empty() {
            return;
        }
        self.update_container_width();

        let mode = self.mode.clone();
        self.listeners.push(document.add_listener(DocumentEvent::Click, move || {
            mode.set(SliderMode::Default);
        }));

        if self.props.with_resize_feel {
            let container = self.container.clone();
            let images_width = self.images_width.clone();
            self.listeners.push(document.add_listener(DocumentEvent::Resize, move || {
                measure_width(&container, &images_width);
            }));
        }
        debug!(class_name = ?self.props.class_name, listeners = self.listeners.len(), "slider mounted");
    }

    pub fn unmount(&mut self, document: &mut Document) {
        for id in self.listeners.drain(..) {
            document.remove_listener(id);
        }
        self.observer.disconnect();
        debug!(class_name = ?self.props.class_name, "slider unmounted");
    }

    pub fn first_image(&self) -> &SliderImage {
        &self.props.first_image
    }

    pub fn second_image(&self) -> &SliderImage {
        &self.props.second_image
    }

    pub fn mode(&self) -> SliderMode {
        self.mode.get()
    }

    pub fn percent_position(&self) -> f32 {
        self.delimiter_percent_position
    }

    pub fn images_width(&self) -> Option<f32> {
        self.images_width.get()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_ready()
    }

    pub fn feels_only_the_delimiter(&self) -> bool {
        self.props.feels_only_the_delimiter
    }

    pub fn set_feels_only_the_delimiter(&mut self, only_delimiter: bool) {
        self.props.feels_only_the_delimiter = only_delimiter;
    }

    pub fn set_current_percent_position(&mut self, percent: Option<f32>) {
        self.props.current_percent_position = percent;
        self.apply_external_position();
    }

    /// The size probe (first image) finished loading.
    pub fn on_size_probe_load(&mut self) {
        self.update_container_width();
        self.settle();
    }

    /// One of the two displayed images finished loading.
    pub fn on_image_load(&mut self) {
        self.ready.on_image_load();
        self.settle();
    }

    fn update_container_width(&mut self) {
        measure_width(&self.container, &self.images_width);
        self.apply_external_position();
    }

    fn apply_external_position(&mut self) {
        if let (Some(percent), Some(_)) = (self.props.current_percent_position, self.images_width.get()) {
            self.delimiter_percent_position = percent.clamp(0.0, 100.0);
        }
    }

    fn update_container_position(&mut self) {
        if let Some(rect) = self.container.get() {
            self.container_position = Vector2::new(rect.x, rect.y);
        }
    }

    fn settle(&mut self) {
        if self.ready.settle(self.images_width.get(), self.container.is_attached()) {
            info!(class_name = ?self.props.class_name, "slider ready");
            self.observer.observe();
            if let Some(on_ready) = self.props.on_ready.as_mut() {
                on_ready();
            }
        }
    }

    fn delimiter_rect(&self, width: f32) -> Option<Rectangle> {
        let rect = self.container.get()?;
        let x = rect.x + width * self.delimiter_percent_position / 100.0;
        Some(Rectangle::new(x - DELIMITER_HIT_WIDTH / 2.0, rect.y, DELIMITER_HIT_WIDTH, rect.height))
    }

    /// Area that starts a drag when pressed.
    pub fn drag_region(&self) -> Option<Rectangle> {
        if self.props.feels_only_the_delimiter {
            // The divider only exists once the container is measured
            self.delimiter_rect(self.images_width.get()?)
        } else {
            self.container.get()
        }
    }

    /// Pointer (or touch) pressed at `point`. Returns whether a drag started.
    pub fn pointer_down(&mut self, point: Vector2) -> bool {
        let Some(region) = self.drag_region() else {
            return false;
        };
        if !contains(region, point) {
            return false;
        }
        // The page may have scrolled or resized since mount
        self.update_container_position();
        self.mode.set(SliderMode::Move);
        debug!(x = point.x, "slider drag started");
        true
    }

    pub fn pointer_move(&mut self, page_x: f32) {
        if self.mode.get() != SliderMode::Move {
            return;
        }
        let Some(width) = self.images_width.get() else {
            return;
        };
        let new_position = percent_of(page_x - self.container_position.x, width);
        match self.props.on_change_percent_position.as_mut() {
            Some(on_change) => on_change(new_position),
            None => self.delimiter_percent_position = new_position,
        }
    }

    pub fn touch_move(&mut self, touches: &[Vector2]) {
        if let Some(touch) = touches.first() {
            self.pointer_move(touch.x);
        }
    }

    pub fn touch_end(&mut self) {
        self.mode.set(SliderMode::Default);
    }

    pub fn touch_cancel(&mut self) {
        self.touch_end();
    }

    /// Feeds the current viewport to the visibility strategy. Call once per frame.
    pub fn observe_viewport(&mut self, viewport: Rectangle) {
        self.settle();
        let Some(target) = self.container.get() else {
            return;
        };
        if self.observer.check(target, viewport) {
            info!(class_name = ?self.props.class_name, "slider visible");
            if let Some(on_visible) = self.props.on_visible.as_mut() {
                on_visible();
            }
        }
    }

    pub fn layers(&self) -> Vec<Layer> {
        let Some(container) = self.container.get() else {
            return Vec::new();
        };
        let Some(width) = self.images_width.get() else {
            return vec![Layer::SizeProbe { dest: container }];
        };

        let dest = Rectangle::new(container.x, container.y, width, container.height);
        let fraction = self.delimiter_percent_position / 100.0;
        let second_bounds = Rectangle::new(container.x, container.y, width * fraction, container.height);
        let mut layers = vec![Layer::FirstImage { dest, alt: self.props.first_image.alt_or("After Image") }];
        if self.props.show_after_before_text {
            layers.push(Layer::Caption { text: "After", anchor: CaptionAnchor::TopRight, bounds: dest });
        }
        layers.push(Layer::SecondImage {
            dest,
            visible_fraction: fraction,
            alt: self.props.second_image.alt_or("Before Image"),
        });
        if self.props.show_after_before_text {
            layers.push(Layer::Caption { text: "Before", anchor: CaptionAnchor::TopLeft, bounds: second_bounds });
        }

        let line_x = container.x + width * fraction;
        layers.push(Layer::Delimiter {
            line: Rectangle::new(line_x - DELIMITER_WIDTH / 2.0, container.y, DELIMITER_WIDTH, container.height),
            handle: Vector2::new(line_x, container.y + container.height / 2.0),
            color: self.props.delimiter_color.unwrap_or(Color::WHITE),
        });
        layers
    }
}
