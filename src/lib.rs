pub mod config;
pub mod domain;
pub mod engine;
pub mod input;
pub mod platform;
pub mod utils;

#[cfg(test)]
mod tests;
