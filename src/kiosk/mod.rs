//! Kiosk screens
//!
//! The Home/Capture view machine, the navigation button grid and the
//! capture screen model. Rendering to HTML lives in the http layer.

pub mod capture;
pub mod grid;
pub mod view;

pub use capture::CaptureScreen;
pub use grid::ButtonGrid;
pub use view::View;
