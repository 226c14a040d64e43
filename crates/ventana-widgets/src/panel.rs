//! Panel widget: a fixed-size content region.

use serde::{Deserialize, Serialize};
use ventana_core::{
    widget::LayoutResult, Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Color,
    Constraints, Event, EventResult, Rect, Size, TypeId, Widget,
};
use std::time::Duration;

/// A leaf widget with a fixed preferred size and an optional background.
///
/// Panels are the canonical content for a [`crate::ScrollView`]: they report
/// an intrinsic size regardless of the space offered, which is what makes a
/// viewport overflow.
#[derive(Serialize, Deserialize)]
pub struct Panel {
    /// Intrinsic content size
    preferred: Size,
    /// Background fill, if any
    background: Option<Color>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds after layout
    #[serde(skip)]
    bounds: Rect,
}

impl Panel {
    /// Create a panel with the given intrinsic size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            preferred: Size::new(width, height),
            background: None,
            test_id_value: None,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Set the background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the intrinsic content size.
    #[must_use]
    pub const fn preferred(&self) -> Size {
        self.preferred
    }
}

impl Widget for Panel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(color) = self.background {
            canvas.fill_rect(self.bounds, color);
        }
    }

    fn event(&mut self, _event: &Event) -> EventResult {
        EventResult::ignored()
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Panel {
    fn brick_name(&self) -> &'static str {
        "Panel"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::MaxLatencyMs(16)]
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(16)
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification {
            passed: self.assertions().to_vec(),
            failed: vec![],
            verification_time: Duration::from_micros(10),
        }
    }

    fn to_html(&self) -> String {
        r#"<div class="brick-panel"></div>"#.to_string()
    }

    fn to_css(&self) -> String {
        ".brick-panel { display: block; }".to_string()
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
