//! Core types and traits for the Ventana viewport toolkit.
//!
//! This crate provides the foundational types used throughout Ventana:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`MouseButton`], [`KeyModifiers`]
//! - The widget contract: [`Widget`], [`Canvas`], [`EventResult`]
//! - The Brick verification layer: [`Brick`] and friends
//! - A recording canvas for tests and command serialization:
//!   [`RecordingCanvas`]

mod brick;
mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod widget;

pub use brick::{Brick, BrickAssertion, BrickBudget, BrickVerification};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, KeyModifiers, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{Canvas, EventResult, EventStatus, LayoutResult, TypeId, Widget, WidgetId};
