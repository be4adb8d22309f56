pub const WINDOW_WIDTH: i32 = 960;            // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const CONTAINER_MARGIN: f32 = 40.0;       // Space around the slider container (pixels)
pub const BUTTON_HEIGHT: f32 = 36.0;          // Height of the interaction mode toggle

pub const DEFAULT_START_PERCENT: f32 = 50.0;  // Divider position of an uncontrolled slider
pub const VISIBLE_THRESHOLD: f32 = 0.95;      // Intersection ratio that counts as "visible"
pub const DELIMITER_WIDTH: f32 = 4.0;         // Width of the divider line (pixels)
pub const DELIMITER_HIT_WIDTH: f32 = 40.0;    // Width of the divider drag band (pixels)
pub const DELIMITER_ICON_RADIUS: f32 = 16.0;  // Radius of the divider grip
pub const CAPTION_FONT_SIZE: i32 = 20;
pub const CAPTION_PADDING: f32 = 12.0;

pub const DEMONSTRATION_DELAY: f64 = 500.0;   // Delay before the demonstration starts (ms)
pub const DEFAULT_DURATION: f64 = 800.0;      // Duration of an eased demonstration move (ms)
pub const PAUSE_DURATION: f64 = 30.0;         // Hold between the two demonstration moves (ms)
pub const START_POSITION: f32 = 55.0;
pub const END_POSITION_1: f32 = 35.0;
pub const END_POSITION_2: f32 = 80.0;
