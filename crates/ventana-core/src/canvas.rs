//! Canvas implementations for rendering.

use crate::geometry::{Point, Rect};
use crate::widget::Canvas;
use crate::Color;
use serde::{Deserialize, Serialize};

/// A single draw operation recorded by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Stroked rectangle outline
    StrokeRect {
        /// Rectangle bounds
        bounds: Rect,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Line segment
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Clip region pushed
    PushClip {
        /// Clip bounds
        bounds: Rect,
    },
    /// Clip region popped
    PopClip,
}

/// A Canvas implementation that records draw operations as [`DrawCommand`]s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (send commands to a backend)
/// - Diffing (compare render outputs)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.clip_stack.clear();
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Get the clip stack depth.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Iterate over the filled rectangles in recording order.
    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect { bounds, color } => Some((*bounds, *color)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            bounds: rect,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            bounds: rect,
            color,
            width,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(DrawCommand::PushClip { bounds: rect });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(DrawCommand::PopClip);
    }
}
