//! Core types and utilities for retroreflective stripe detection.
//!
//! This crate holds the pieces shared by every pipeline stage: BGR and mask
//! containers, the contour type, planar polygon helpers and oriented
//! rectangles. It knows nothing about stripes or targets.

mod draw;
mod frame;
mod geometry;
mod logger;
mod rect;

pub use draw::fill_oriented_rect;
pub use frame::{ensure_mask_size, BgrImage, BgrImageView, BinaryMask, ImageError};
pub use geometry::{
    arc_length, bounding_box, convex_hull, polygon_area, BorderKind, BoundingBox, Contour,
};
pub use rect::{min_area_rect, wrap_half_turn, OrientedRect};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
