use anyhow::{ensure, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod animation;
mod config;
mod constants;
mod demo;
mod dom;
mod render;
mod slider;
mod state;
mod texture_loader;
mod visibility;

use crate::config::Args;
use crate::constants::*;
use crate::demo::{layout, DemoHost};
use crate::dom::{Capabilities, ContainerRef, Document, DocumentEvent};
use crate::render::{draw_button, draw_slider, SliderTextures};
use crate::slider::{contains, BeforeAfterSlider, SliderProps};
use crate::texture_loader::load_slider_texture;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    ensure!(args.width > 0 && args.height > 0, "window size must be positive, got {}x{}", args.width, args.height);
    info!(first = %args.first, second = %args.second, "starting before/after slider");

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Before / After Slider")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Build the slider ---
    let mut document = Document::new();
    let container = ContainerRef::new();
    let mut host = DemoHost::new();
    let (first_image, second_image) = args.images();
    let props = if args.uncontrolled {
        SliderProps::new(first_image, second_image)
    } else {
        host.slider_props(first_image, second_image)
    };
    let mut slider = BeforeAfterSlider::new(args.apply(props), container.clone(), Capabilities::default());
    if args.only_delimiter {
        host.toggle_feels_only_the_delimiter(&mut slider);
    }
    let mut textures = SliderTextures::default();

    let screen = |rl: &RaylibHandle| (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let (sw, sh) = screen(&rl);
    container.set(Some(layout(sw, sh, None).0));
    slider.mount(&mut document);

    // --- Load Images ---
    // The first image doubles as the size probe: its aspect ratio sets the container height.
    match load_slider_texture(&mut rl, &thread, slider.first_image()) {
        Ok(texture) => {
            textures.first = Some(texture);
            container.set(Some(layout(sw, sh, textures.first_size()).0));
            slider.on_size_probe_load();
            slider.on_image_load();
        }
        Err(e) => warn!(error = %e, "first image unavailable"),
    }
    match load_slider_texture(&mut rl, &thread, slider.second_image()) {
        Ok(texture) => {
            textures.second = Some(texture);
            slider.on_image_load();
        }
        Err(e) => warn!(error = %e, "second image unavailable"),
    }

    let mut last_mouse = rl.get_mouse_position();
    let mut was_touching = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = rl.get_time() * 1000.0;
        let (sw, sh) = screen(&rl);

        // 1. Layout, and let resize listeners re-measure
        let (container_rect, button_rect) = layout(sw, sh, textures.first_size());
        container.set(Some(container_rect));
        if rl.is_window_resized() {
            document.dispatch(DocumentEvent::Resize);
        }

        // 2. Pointer input
        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if contains(button_rect, mouse) {
                host.toggle_feels_only_the_delimiter(&mut slider);
            } else {
                slider.pointer_down(mouse);
            }
        }

        let touches: Vec<Vector2> = (0..rl.get_touch_point_count() as u32)
            .map(|i| rl.get_touch_position(i))
            .collect();
        if !touches.is_empty() {
            slider.touch_move(&touches);
        } else if mouse.x != last_mouse.x || mouse.y != last_mouse.y {
            slider.pointer_move(mouse.x);
        }
        if was_touching && touches.is_empty() {
            slider.touch_end();
        }
        was_touching = !touches.is_empty();
        last_mouse = mouse;

        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            document.dispatch(DocumentEvent::Click);
        }

        // 3. Visibility, then the host's animation frame
        slider.observe_viewport(Rectangle::new(0.0, 0.0, sw, sh));
        if !args.uncontrolled {
            host.update(now, &mut slider);
        }

        // --- Render ---
        let layers = slider.layers();
        let button_label = host.button_text();
        let hovered = contains(button_rect, mouse);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(24, 24, 32, 255));
        draw_slider(&mut d, &layers, &textures);
        draw_button(&mut d, button_rect, &button_label, hovered);
    }

    slider.unmount(&mut document);
    Ok(())
}
