use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rand::Rng;

use crate::constants::*;

/// What animates behind the slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backdrop {
    /// Perspective grid with drifting particles
    Grid,
    /// Starfield and shaded moon
    Moon,
    /// The grid drawn over the moon scene
    Layered,
}

#[derive(Debug, Parser)]
#[command(name = "pitchdeck", about = "Password-protected pitch deck")]
pub struct Args {
    /// Initial window width
    #[arg(long, default_value_t = RENDER_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = RENDER_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Where the session marker is kept between runs
    #[arg(long, default_value = SESSION_FILE)]
    pub session_file: PathBuf,

    /// Domain the session marker is scoped to
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Development mode: the session marker is not flagged secure
    #[arg(long)]
    pub dev: bool,

    /// Minimum milliseconds between accepted slide changes
    #[arg(long, default_value_t = DEBOUNCE_MS)]
    pub debounce_ms: u64,

    #[arg(long, value_enum, default_value_t = Backdrop::Grid)]
    pub backdrop: Backdrop,

    /// Image shown on the title slide
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Seed for the background animations
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub session_file: PathBuf,
    pub domain: String,
    pub secure_cookie: bool,
    pub debounce: Duration,
    pub backdrop: Backdrop,
    pub logo: Option<PathBuf>,
    pub seed: u64,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            width: args.width.max(1),
            height: args.height.max(1),
            fps: args.fps.max(1),
            session_file: args.session_file,
            domain: args.domain,
            secure_cookie: !args.dev,
            debounce: Duration::from_millis(args.debounce_ms),
            backdrop: args.backdrop,
            logo: args.logo,
            seed: args.seed.unwrap_or_else(|| rand::rng().random()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Config {
        let mut full = vec!["pitchdeck"];
        full.extend_from_slice(argv);
        Config::from(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.width, RENDER_WIDTH);
        assert_eq!(config.debounce, Duration::from_millis(800));
        assert_eq!(config.backdrop, Backdrop::Grid);
        assert_eq!(config.domain, "localhost");
        assert!(config.secure_cookie);
        assert!(config.logo.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["--dev", "--backdrop", "layered", "--seed", "7", "--debounce-ms", "250"]);
        assert!(!config.secure_cookie);
        assert_eq!(config.backdrop, Backdrop::Layered);
        assert_eq!(config.seed, 7);
        assert_eq!(config.debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_unknown_backdrop() {
        assert!(Args::try_parse_from(["pitchdeck", "--backdrop", "plasma"]).is_err());
    }
}
