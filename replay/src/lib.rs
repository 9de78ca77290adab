// Trace replay library

pub mod demo;
pub mod error;
pub mod generator;
pub mod input;
pub mod models;
pub mod runner;
pub mod stats;

pub use error::ReplayError;
