pub mod app;
pub mod render;
pub mod theme;
pub mod view;

pub use app::ConsoleApp;
