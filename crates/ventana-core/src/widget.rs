//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle:
//!
//! 1. **Measure**: Compute intrinsic size given constraints
//! 2. **Layout**: Position self and children within allocated bounds
//! 3. **Paint**: Generate draw commands for rendering (only if verified)
//!
//! Input events flow through [`Widget::event`], which reports whether the
//! event was consumed so parents can decide whether to bubble it.

use crate::brick::Brick;
use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type identifier for widget types (used for diffing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Whether a widget consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was not handled; parents or siblings may process it.
    Ignored,
    /// The event was handled and must not propagate further.
    Captured,
}

/// Outcome of delivering an event to a widget.
///
/// Carries the consumption status plus an optional message for the
/// application layer. Consumption and message emission are independent: a
/// widget can capture an event without emitting anything.
pub struct EventResult {
    /// Whether the event was consumed
    pub status: EventStatus,
    /// Message emitted by the widget, if any
    pub message: Option<Box<dyn Any + Send>>,
}

impl EventResult {
    /// Event not handled.
    #[must_use]
    pub const fn ignored() -> Self {
        Self {
            status: EventStatus::Ignored,
            message: None,
        }
    }

    /// Event handled, nothing to report.
    #[must_use]
    pub const fn captured() -> Self {
        Self {
            status: EventStatus::Captured,
            message: None,
        }
    }

    /// Event handled with a message for the application layer.
    #[must_use]
    pub fn captured_with(message: impl Any + Send) -> Self {
        Self {
            status: EventStatus::Captured,
            message: Some(Box::new(message)),
        }
    }

    /// Check whether the event was consumed.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.status == EventStatus::Captured
    }
}

impl std::fmt::Debug for EventResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventResult")
            .field("status", &self.status)
            .field("message", &self.message.is_some())
            .finish()
    }
}

/// Core widget trait that all UI elements implement.
///
/// # Lifecycle
///
/// 1. `measure`: Compute intrinsic size given constraints
/// 2. `layout`: Position self and children within allocated bounds
/// 3. `paint`: Generate draw commands (only if `can_render()` returns true)
pub trait Widget: Brick + Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position children within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events.
    fn event(&mut self, event: &Event) -> EventResult;

    /// Get child widgets for tree traversal.
    fn children(&self) -> &[Box<dyn Widget>];

    /// Get mutable child widgets.
    fn children_mut(&mut self) -> &mut [Box<dyn Widget>];

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget should be drawn.
    fn visible(&self) -> bool {
        true
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: crate::Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: crate::Color, width: f32);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: crate::Point, to: crate::Point, color: crate::Color, width: f32);

    /// Push a clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);
}
