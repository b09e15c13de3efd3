pub mod config;
pub mod error;
pub mod fade;
pub mod infusion;
pub mod log;
pub mod store;
pub mod theme;
pub mod util;

// Decoupled loop architecture
pub mod actors;
pub mod app;
pub mod mvu;
pub mod render;
pub mod ui;

pub use error::{Error, Result};
pub use store::{Tea, TeaStore};
