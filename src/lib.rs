pub mod classification;
pub mod config;
pub mod error;
pub mod image_classifier;
pub mod image_decoder;
pub mod library;
pub mod screen;
pub mod verdict;
