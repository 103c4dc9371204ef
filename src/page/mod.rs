//! Page adapters around the resolution core
//!
//! # Modules
//!
//! - [`descriptor`]: Element descriptors and page manifests
//! - [`render`]: Include snippet rendering and render sinks
//! - [`bootstrap`]: Loads every element of a page

pub mod bootstrap;
pub mod descriptor;
pub mod render;
