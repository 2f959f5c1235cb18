pub mod controller;
pub mod core;
pub mod render;
mod run_effect;

#[cfg(test)]
mod tests;
