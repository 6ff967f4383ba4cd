//! Terminal front-end: the runtime session, the startup splash, and the main
//! window. The launcher wires these together in a fixed order; see
//! `crate::launcher` for the sequence.

mod helpers;
mod runtime;
mod splash;
mod window;

pub use runtime::AppRuntime;
pub use splash::{SplashScreen, SPLASH_HEIGHT, SPLASH_MESSAGE, SPLASH_WIDTH};
pub use window::{MainWindow, WindowError};
