// src/config/config_types.rs
//
// Config types for the demo app

use serde::Deserialize;

use crate::surface::DEFAULT_ARC_RESOLUTION;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_arc_resolution")]
    pub arc_resolution: usize,
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    pub default_stroke_weight: f32,
    pub stroke_color: String,
    pub fill_color: String,
    pub background: String,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub output_directory: String,
    pub source_image: Option<String>,
}

fn default_arc_resolution() -> usize {
    DEFAULT_ARC_RESOLUTION
}
