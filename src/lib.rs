// src/lib.rs
//
// Interactive 3D typography: typed text becomes extruded, beveled geometry
// that hovers over a translucent floor and turns with a horizontal drag.

pub mod animation;
pub mod app;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod render;
pub mod services;
pub mod utilities;
pub mod views;

pub use app::AppContext;
