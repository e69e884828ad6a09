pub mod classifier;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod settings;
pub mod utils;

pub use error::{LoadError, ProcessingError, Result};
