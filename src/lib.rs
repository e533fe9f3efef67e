pub mod app;
pub mod articles;
pub mod cli;
pub mod config;
pub mod error;
pub mod predictor;
pub mod storage;
pub mod submission;
pub mod surface;

pub use error::{Error, Result};
