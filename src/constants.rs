pub const RENDER_WIDTH: i32 = 1600;           // Default window width
pub const RENDER_HEIGHT: i32 = 900;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const BACKGROUND: (u8, u8, u8) = (2, 6, 23); // #020617

// --- Access gate ---
pub const ACCESS_PASSWORD: &str = "ownersnetwork";
pub const SESSION_COOKIE: &str = "pitchdeck_auth";
pub const SESSION_VALUE: &str = "authenticated";
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24;
pub const SESSION_FILE: &str = ".pitchdeck_session.json";
pub const DEFAULT_DOMAIN: &str = "localhost";
pub const WRONG_PASSWORD: &str = "Incorrect password. Please try again.";

// --- Navigation ---
pub const SLIDE_COUNT: usize = 11;
pub const DEBOUNCE_MS: u64 = 800;             // Minimum time between accepted transitions
pub const WHEEL_THRESHOLD: f32 = 30.0;        // Pixels of wheel delta needed to turn a page
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Pixels of vertical swipe needed to turn a page
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0;
pub const KEY_SCROLL_STEP: f32 = 40.0;        // Native scroll per arrow key press
pub const PAGE_SCROLL_FRACTION: f32 = 0.875;  // Share of the viewport a page key scrolls
pub const NARROW_VIEWPORT: f32 = 768.0;       // Below this width slides stack and navigation is off
pub const SCROLL_RATE: f32 = 9.0;             // Exponential ease rate for smooth scrolling (1/s)

// --- Cyber grid ---
pub const GRID_PARTICLES: usize = 150;
pub const GRID_LINES: usize = 20;
pub const GRID_VERTICAL_LINES: i32 = 30;
pub const GRID_FOV: f32 = 300.0;
pub const GRID_DEPTH: f32 = 1000.0;
pub const GRID_TIME_STEP: f32 = 0.01;         // Grid clock advance per 1/60 s

// --- Moon scene ---
pub const STAR_COUNT: usize = 1500;
pub const DUST_COUNT: usize = 300;
pub const SHOOTING_STAR_COUNT: usize = 3;
pub const SHOOTING_STAR_PERIOD: f32 = 12.0;   // Seconds per shooting star cycle
pub const SHOOTING_STAR_VISIBLE: f32 = 2.0;   // Seconds visible at the start of each cycle
pub const CAMERA_FOV_DEG: f32 = 55.0;
pub const CAMERA_DISTANCE: f32 = 12.0;
pub const MOON_RADIUS: f32 = 4.0;
pub const MOON_SPIN: f32 = 0.02;              // Radians per second
pub const STAR_SPIN: f32 = 0.005;             // Radians per second
pub const CRATER_MAP_WIDTH: usize = 512;
pub const CRATER_MAP_HEIGHT: usize = 256;
pub const MOON_RASTER_MAX: u32 = 320;         // Largest moon raster edge (pixels)
pub const MOON_RASTER_SLOT: usize = 0;
