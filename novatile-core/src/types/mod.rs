//! Core data types shared across the workspace.

pub mod geometry;

pub use geometry::{Displacement, Point, Rectangle, Rectangles, Size};
