//! Scroll view widget: a single-child viewport with scrollbars.
//!
//! `ScrollView` presents an oversized child through a fixed window. Layout
//! derives per-axis overflow from the child's preferred size; pointer, drag,
//! and wheel input move a normalized scroll offset in `[0, 1]` per axis; and
//! painting clips the child to the viewport and overlays a scrollbar for
//! each overflowing axis. All thumb rectangles come from
//! [`crate::scrollbar::scrollbar_geometry`], so hit-testing and painting can
//! never disagree.

use crate::scrollbar::{scrollbar_geometry, Axis, ScrollbarGeometry, ScrollbarStyle, ThumbHit};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ventana_core::{
    widget::LayoutResult, Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Color,
    Constraints, Event, EventResult, KeyModifiers, MouseButton, Point, Rect, Size, TypeId, Widget,
};

/// Fraction of a page applied by a click on the track outside the thumb.
const TRACK_CLICK_DAMPING: f32 = 0.98;

/// Wheel delta to viewport-length multiplier.
const WHEEL_STEP: f32 = 0.25;

/// Message emitted when the scroll offset changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollChanged {
    /// Normalized horizontal offset in [0, 1]
    pub scroll_x: f32,
    /// Normalized vertical offset in [0, 1]
    pub scroll_y: f32,
}

/// Which scrollbar, if any, the pointer is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    DraggingHorizontal,
    DraggingVertical,
}

/// Viewport widget wrapping a single oversized child.
#[derive(Serialize, Deserialize)]
pub struct ScrollView {
    /// Scrollbar visual configuration, fixed at construction
    style: ScrollbarStyle,
    /// Normalized scroll offset per axis, each in [0, 1]
    scroll: Point,
    /// Test ID
    test_id_value: Option<String>,
    /// Pixels by which the child exceeds the viewport, per axis
    #[serde(skip)]
    overflow: Point,
    /// True iff both axes overflow
    #[serde(skip)]
    both_scrollbars: bool,
    /// Pointer interaction state
    #[serde(skip)]
    drag: DragState,
    /// Cursor position at the last press or drag step
    #[serde(skip)]
    last_cursor: Point,
    /// Deferred child re-layout requested by interaction
    #[serde(skip)]
    layout_dirty: bool,
    /// Cached bounds after layout
    #[serde(skip)]
    bounds: Rect,
    /// Child preferred size cached at the last layout
    #[serde(skip)]
    child_preferred: Size,
    /// The wrapped child (0 or 1 entries)
    #[serde(skip)]
    children: Vec<Box<dyn Widget>>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollView {
    /// Create an empty scroll view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            style: ScrollbarStyle::default(),
            scroll: Point::ORIGIN,
            test_id_value: None,
            overflow: Point::ORIGIN,
            both_scrollbars: false,
            drag: DragState::Idle,
            last_cursor: Point::ORIGIN,
            layout_dirty: false,
            bounds: Rect::default(),
            child_preferred: Size::ZERO,
            children: Vec::new(),
        }
    }

    /// Set the wrapped child.
    ///
    /// A scroll view presents exactly one child; attaching more than one is
    /// a configuration error reported fatally at layout time.
    #[must_use]
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    /// Set the scrollbar gutter thickness in pixels.
    #[must_use]
    pub fn scrollbar_thickness(mut self, thickness: f32) -> Self {
        self.style.thickness = thickness.max(0.0);
        self
    }

    /// Set the arrow inset reserved at each end of a track.
    #[must_use]
    pub fn arrow_size(mut self, size: f32) -> Self {
        self.style.arrow_size = size.max(0.0);
        self
    }

    /// Set the track fill color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.style.track_color = color;
        self
    }

    /// Set the thumb fill color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.style.thumb_color = color;
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Current normalized scroll offset, each component in [0, 1].
    ///
    /// 0 means scrolled to the start (top/left) and 1 to the end.
    #[must_use]
    pub const fn scroll(&self) -> Point {
        self.scroll
    }

    /// Set the scroll offset; components are clamped to [0, 1].
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll = Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        self.layout_dirty = true;
    }

    /// Per-axis overflow computed at the last layout.
    #[must_use]
    pub const fn overflow(&self) -> Point {
        self.overflow
    }

    /// Whether both scrollbars are currently active.
    #[must_use]
    pub const fn both_scrollbars_active(&self) -> bool {
        self.both_scrollbars
    }

    /// Whether interaction has requested a child re-layout since the last
    /// layout pass.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.layout_dirty
    }

    /// Apply a pending deferred re-layout.
    ///
    /// Interaction handlers only mark the layout dirty; hosts call this once
    /// per frame before painting, so a burst of drag events costs a single
    /// child re-layout.
    pub fn flush_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }
        self.layout_dirty = false;
        if self.children.is_empty() {
            return;
        }
        let child_rect = self.child_rect();
        self.children[0].layout(child_rect);
    }

    /// Geometry of one scrollbar for the current scroll state.
    #[must_use]
    pub fn scrollbar(&self, axis: Axis) -> ScrollbarGeometry {
        scrollbar_geometry(
            axis,
            self.bounds,
            self.child_preferred,
            self.axis_scroll(axis),
            self.both_scrollbars,
            &self.style,
        )
    }

    fn axis_scroll(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.scroll.x,
            Axis::Vertical => self.scroll.y,
        }
    }

    fn set_axis_scroll(&mut self, axis: Axis, value: f32) {
        let value = value.clamp(0.0, 1.0);
        match axis {
            Axis::Horizontal => self.scroll.x = value,
            Axis::Vertical => self.scroll.y = value,
        }
    }

    fn axis_overflow(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.overflow.x,
            Axis::Vertical => self.overflow.y,
        }
    }

    /// Overflow on one axis; a degenerate preferred length counts as none.
    fn overflow_amount(preferred: f32, available: f32) -> f32 {
        if preferred <= 0.0 {
            0.0
        } else {
            (preferred - available).max(0.0)
        }
    }

    /// Rectangle allocated to the child for the current scroll state.
    ///
    /// The child is shifted by `-scroll * overflow` and its region excludes
    /// the gutter of every active scrollbar.
    fn child_rect(&self) -> Rect {
        if self.overflow.x <= 0.0 && self.overflow.y <= 0.0 {
            return self.bounds;
        }
        let origin = Point::new(
            self.bounds.x - self.scroll.x * self.overflow.x,
            self.bounds.y - self.scroll.y * self.overflow.y,
        );
        let width_cut = if self.overflow.y > 0.0 {
            self.style.thickness
        } else {
            0.0
        };
        let height_cut = if self.overflow.x > 0.0 {
            self.style.thickness
        } else {
            0.0
        };
        let size = Size::new(
            (self.bounds.width - width_cut).max(0.0),
            (self.bounds.height - height_cut).max(0.0),
        );
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    fn scroll_changed(&self) -> ScrollChanged {
        ScrollChanged {
            scroll_x: self.scroll.x,
            scroll_y: self.scroll.y,
        }
    }

    fn forward_to_child(&mut self, event: &Event) -> EventResult {
        match self.children.first_mut() {
            Some(child) => child.event(event),
            None => EventResult::ignored(),
        }
    }

    /// Fraction of the content covered by one viewport page on an axis.
    fn page_fraction(&self, axis: Axis) -> f32 {
        let child_len = axis.length(self.child_preferred);
        if child_len <= 0.0 {
            0.0
        } else {
            axis.length(self.bounds.size()) / child_len
        }
    }

    fn on_mouse_down(&mut self, event: &Event, position: Point) -> EventResult {
        if !self.bounds.contains_point(&position) {
            return EventResult::ignored();
        }
        for axis in [Axis::Vertical, Axis::Horizontal] {
            if self.axis_overflow(axis) <= 0.0 {
                continue;
            }
            let geo = self.scrollbar(axis);
            if geo.track.contains_point(&position) {
                self.drag = match axis {
                    Axis::Horizontal => DragState::DraggingHorizontal,
                    Axis::Vertical => DragState::DraggingVertical,
                };
                self.last_cursor = position;
                return self.track_press(axis, &geo, position);
            }
        }
        self.drag = DragState::Idle;
        self.forward_to_child(event)
    }

    /// Handle a press inside a track: grab the thumb, or jump-scroll by one
    /// damped page when the press lands outside it.
    fn track_press(&mut self, axis: Axis, geo: &ScrollbarGeometry, position: Point) -> EventResult {
        let jump = match geo.hit_thumb(axis, position) {
            ThumbHit::On => return EventResult::captured(),
            ThumbHit::Before => -self.page_fraction(axis),
            ThumbHit::After => self.page_fraction(axis),
        };
        let current = self.axis_scroll(axis);
        self.set_axis_scroll(axis, current + jump * TRACK_CLICK_DAMPING);
        self.layout_dirty = true;
        EventResult::captured_with(self.scroll_changed())
    }

    fn on_drag(&mut self, axis: Axis, position: Point) -> EventResult {
        let geo = self.scrollbar(axis);
        let delta = axis.coord(position) - axis.coord(self.last_cursor);
        self.last_cursor = position;
        if geo.travel <= 0.0 || delta == 0.0 {
            return EventResult::captured();
        }
        let current = self.axis_scroll(axis);
        self.set_axis_scroll(axis, current + delta / geo.travel);
        self.layout_dirty = true;
        EventResult::captured_with(self.scroll_changed())
    }

    fn on_wheel(
        &mut self,
        event: &Event,
        delta_x: f32,
        delta_y: f32,
        modifiers: KeyModifiers,
    ) -> EventResult {
        if self.children.is_empty() || (self.overflow.x <= 0.0 && self.overflow.y <= 0.0) {
            return self.forward_to_child(event);
        }

        let horizontal = delta_x != 0.0 || (delta_y != 0.0 && modifiers.shift);
        let delta = if horizontal {
            if delta_x == 0.0 {
                delta_y
            } else {
                delta_x
            }
        } else {
            delta_y
        };
        let axis = if horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        let child_len = axis.length(self.child_preferred);
        if self.axis_overflow(axis) > 0.0 && child_len > 0.0 {
            let amount = delta * axis.length(self.bounds.size()) * WHEEL_STEP;
            let current = self.axis_scroll(axis);
            self.set_axis_scroll(axis, current - amount / child_len);
            self.layout_dirty = true;
            return EventResult::captured_with(self.scroll_changed());
        }

        // The targeted axis has nothing to scroll; let the event bubble.
        EventResult::ignored()
    }
}

impl Widget for ScrollView {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let Some(child) = self.children.first() else {
            return Size::ZERO;
        };
        let preferred = child.measure(Constraints::unbounded());
        // Reserve the vertical gutter's width up front; a conservative
        // estimate, since vertical overflow is unknown until layout.
        constraints.constrain(Size::new(
            preferred.width + self.style.thickness,
            preferred.height,
        ))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        assert!(
            self.children.len() <= 1,
            "ScrollView supports a single child, got {}",
            self.children.len()
        );

        self.bounds = bounds;
        self.layout_dirty = false;

        if self.children.is_empty() {
            self.overflow = Point::ORIGIN;
            self.both_scrollbars = false;
            return LayoutResult {
                size: bounds.size(),
            };
        }

        self.child_preferred = self.children[0].measure(Constraints::unbounded());
        self.overflow = Point::new(
            Self::overflow_amount(self.child_preferred.width, bounds.width),
            Self::overflow_amount(self.child_preferred.height, bounds.height),
        );
        self.both_scrollbars = self.overflow.x > 0.0 && self.overflow.y > 0.0;

        // An axis that stopped overflowing snaps back to the origin, so a
        // stale offset cannot reappear if the child overflows again later.
        if self.overflow.x <= 0.0 {
            self.scroll.x = 0.0;
        }
        if self.overflow.y <= 0.0 {
            self.scroll.y = 0.0;
        }

        let child_rect = self.child_rect();
        self.children[0].layout(child_rect);

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let Some(child) = self.children.first() else {
            return;
        };

        canvas.push_clip(self.bounds);
        if child.visible() && child.can_render() {
            child.paint(canvas);
        }
        canvas.pop_clip();

        for axis in Axis::ALL {
            if self.axis_overflow(axis) > 0.0 {
                let geo = self.scrollbar(axis);
                canvas.fill_rect(geo.track, self.style.track_color);
                canvas.fill_rect(geo.thumb, self.style.thumb_color);
            }
        }
    }

    fn event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.on_mouse_down(event, *position),
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                let was_dragging = self.drag != DragState::Idle;
                self.drag = DragState::Idle;
                if was_dragging {
                    EventResult::captured()
                } else {
                    self.forward_to_child(event)
                }
            }
            Event::MouseMove { position } => match self.drag {
                DragState::Idle => self.forward_to_child(event),
                DragState::DraggingHorizontal => self.on_drag(Axis::Horizontal, *position),
                DragState::DraggingVertical => self.on_drag(Axis::Vertical, *position),
            },
            Event::Scroll {
                delta_x,
                delta_y,
                modifiers,
            } => self.on_wheel(event, *delta_x, *delta_y, *modifiers),
            _ => self.forward_to_child(event),
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for ScrollView {
    fn brick_name(&self) -> &'static str {
        "ScrollView"
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
        r#"<div class="brick-scroll-view"></div>"#.to_string()
    }

    fn to_css(&self) -> String {
        ".brick-scroll-view { overflow: hidden; position: relative; }".to_string()
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Panel;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use ventana_core::{DrawCommand, RecordingCanvas};

    /// Child widget that counts delivered events and optionally captures
    /// left clicks inside its bounds.
    struct Probe {
        preferred: Size,
        capture_clicks: bool,
        clicks: Arc<AtomicUsize>,
        moves: Arc<AtomicUsize>,
        bounds: Rect,
    }

    impl Probe {
        fn new(width: f32, height: f32) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let clicks = Arc::new(AtomicUsize::new(0));
            let moves = Arc::new(AtomicUsize::new(0));
            let probe = Self {
                preferred: Size::new(width, height),
                capture_clicks: true,
                clicks: Arc::clone(&clicks),
                moves: Arc::clone(&moves),
                bounds: Rect::default(),
            };
            (probe, clicks, moves)
        }
    }

    impl Widget for Probe {
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

        fn paint(&self, _canvas: &mut dyn Canvas) {}

        fn event(&mut self, event: &Event) -> EventResult {
            match event {
                Event::MouseDown { position, .. } => {
                    if self.capture_clicks && self.bounds.contains_point(position) {
                        self.clicks.fetch_add(1, Ordering::SeqCst);
                        return EventResult::captured();
                    }
                    EventResult::ignored()
                }
                Event::MouseMove { .. } => {
                    self.moves.fetch_add(1, Ordering::SeqCst);
                    EventResult::ignored()
                }
                _ => EventResult::ignored(),
            }
        }

        fn children(&self) -> &[Box<dyn Widget>] {
            &[]
        }

        fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
            &mut []
        }

        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    impl Brick for Probe {
        fn brick_name(&self) -> &'static str {
            "Probe"
        }

        fn assertions(&self) -> &[BrickAssertion] {
            &[]
        }

        fn budget(&self) -> BrickBudget {
            BrickBudget::default()
        }

        fn verify(&self) -> BrickVerification {
            BrickVerification {
                passed: vec![],
                failed: vec![],
                verification_time: Duration::ZERO,
            }
        }

        fn to_html(&self) -> String {
            String::new()
        }

        fn to_css(&self) -> String {
            String::new()
        }
    }

    fn laid_out_view(viewport: Size, content: Size) -> ScrollView {
        let mut view = ScrollView::new().child(Panel::new(content.width, content.height));
        view.layout(Rect::from_size(viewport));
        view
    }

    fn left_down(x: f32, y: f32) -> Event {
        Event::MouseDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn left_up(x: f32, y: f32) -> Event {
        Event::MouseUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn wheel(delta_x: f32, delta_y: f32, modifiers: KeyModifiers) -> Event {
        Event::Scroll {
            delta_x,
            delta_y,
            modifiers,
        }
    }

    // =========================================================================
    // Layout Engine
    // =========================================================================

    #[test]
    fn test_overflow_follows_preferred_minus_viewport() {
        let view = laid_out_view(Size::new(300.0, 300.0), Size::new(500.0, 900.0));
        assert_eq!(view.overflow(), Point::new(200.0, 600.0));
        assert!(view.both_scrollbars_active());
    }

    #[test]
    fn test_no_overflow_when_child_fits() {
        let view = laid_out_view(Size::new(300.0, 300.0), Size::new(200.0, 100.0));
        assert_eq!(view.overflow(), Point::ORIGIN);
        assert!(!view.both_scrollbars_active());
    }

    #[test]
    fn test_degenerate_child_treated_as_no_overflow() {
        let view = laid_out_view(Size::new(300.0, 300.0), Size::new(0.0, -50.0));
        assert_eq!(view.overflow(), Point::ORIGIN);
    }

    #[test]
    fn test_scroll_resets_per_axis_when_overflow_vanishes() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(500.0, 900.0));
        view.set_scroll(0.5, 0.5);

        // Wide enough now that only the vertical axis still overflows.
        view.layout(Rect::from_size(Size::new(600.0, 300.0)));
        assert_eq!(view.scroll().x, 0.0);
        assert_eq!(view.scroll().y, 0.5);

        // Tall enough too: everything resets.
        view.layout(Rect::from_size(Size::new(600.0, 1000.0)));
        assert_eq!(view.scroll(), Point::ORIGIN);
    }

    #[test]
    fn test_child_shifted_by_scroll_times_overflow() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        view.set_scroll(0.0, 0.5);
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        let child_bounds = view.children()[0].bounds();
        assert_eq!(child_bounds.y, -300.0);
        assert_eq!(child_bounds.x, 0.0);
    }

    #[test]
    fn test_child_region_excludes_active_gutters() {
        // Vertical overflow only: the right gutter eats width.
        let view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        let child_bounds = view.children()[0].bounds();
        assert_eq!(child_bounds.width, 290.0);
        assert_eq!(child_bounds.height, 300.0);

        // Both axes: both gutters.
        let view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 900.0));
        let child_bounds = view.children()[0].bounds();
        assert_eq!(child_bounds.width, 290.0);
        assert_eq!(child_bounds.height, 290.0);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(500.0, 900.0));
        view.set_scroll(0.3, 0.7);

        let bounds = Rect::from_size(Size::new(300.0, 300.0));
        view.layout(bounds);
        let first = view.children()[0].bounds();
        view.layout(bounds);
        let second = view.children()[0].bounds();
        assert_eq!(first, second);
    }

    #[test]
    fn test_measure_reserves_gutter_width() {
        let view = ScrollView::new().child(Panel::new(300.0, 900.0));
        let size = view.measure(Constraints::unbounded());
        assert_eq!(size, Size::new(310.0, 900.0));
    }

    #[test]
    fn test_measure_without_child_is_zero() {
        let view = ScrollView::new();
        assert_eq!(view.measure(Constraints::unbounded()), Size::ZERO);
    }

    #[test]
    fn test_layout_and_paint_without_child_are_noops() {
        let mut view = ScrollView::new();
        view.layout(Rect::from_size(Size::new(100.0, 100.0)));
        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    #[should_panic(expected = "single child")]
    fn test_second_child_is_fatal_at_layout() {
        let mut view = ScrollView::new()
            .child(Panel::new(10.0, 10.0))
            .child(Panel::new(20.0, 20.0));
        view.layout(Rect::from_size(Size::new(100.0, 100.0)));
    }

    // =========================================================================
    // Scroll state
    // =========================================================================

    #[test]
    fn test_set_scroll_round_trip() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 900.0));
        view.set_scroll(0.5, 0.3);
        assert_eq!(view.scroll(), Point::new(0.5, 0.3));
    }

    #[test]
    fn test_set_scroll_clamps() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 900.0));
        view.set_scroll(-1.0, 7.0);
        assert_eq!(view.scroll(), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_flush_layout_applies_deferred_reposition() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        view.set_scroll(0.0, 1.0);
        assert!(view.needs_layout());

        view.flush_layout();
        assert!(!view.needs_layout());
        assert_eq!(view.children()[0].bounds().y, -600.0);
    }

    // =========================================================================
    // Wheel scrolling
    // =========================================================================

    #[test]
    fn test_wheel_scrolls_vertical_axis() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        let result = view.event(&wheel(0.0, -1.0, KeyModifiers::NONE));

        assert!(result.is_captured());
        assert!((view.scroll().y - 300.0 * 0.25 / 900.0).abs() < 1e-5);
        assert!(view.needs_layout());
    }

    #[test]
    fn test_wheel_emits_scroll_changed() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        let result = view.event(&wheel(0.0, -1.0, KeyModifiers::NONE));

        let message = result.message.expect("message emitted");
        let changed = message
            .downcast_ref::<ScrollChanged>()
            .expect("ScrollChanged");
        assert!((changed.scroll_y - view.scroll().y).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_wheel_without_horizontal_overflow_bubbles() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        let result = view.event(&wheel(-1.0, 0.0, KeyModifiers::NONE));

        assert!(!result.is_captured());
        assert_eq!(view.scroll().x, 0.0);
    }

    #[test]
    fn test_shift_wheel_targets_horizontal_axis() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 300.0));
        let result = view.event(&wheel(0.0, -1.0, KeyModifiers::SHIFT));

        assert!(result.is_captured());
        assert!((view.scroll().x - 300.0 * 0.25 / 900.0).abs() < 1e-5);
        assert_eq!(view.scroll().y, 0.0);
    }

    #[test]
    fn test_wheel_clamps_at_origin() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 900.0));
        // Scrolling up from the top stays at the top.
        let result = view.event(&wheel(0.0, 1.0, KeyModifiers::NONE));
        assert!(result.is_captured());
        assert_eq!(view.scroll().y, 0.0);
    }

    #[test]
    fn test_wheel_without_any_overflow_bubbles() {
        let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(100.0, 100.0));
        let result = view.event(&wheel(0.0, -1.0, KeyModifiers::NONE));
        assert!(!result.is_captured());
    }

    // =========================================================================
    // Track clicks and thumb drags
    // =========================================================================

    #[test]
    fn test_track_click_below_thumb_jumps_by_damped_page() {
        // Viewport height 200, content height 1000: one page is 0.2, damped
        // to 0.196.
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));
        let result = view.event(&left_down(195.0, 150.0));

        assert!(result.is_captured());
        assert!((view.scroll().y - 0.196).abs() < 1e-4);
    }

    #[test]
    fn test_track_click_above_thumb_jumps_back() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));
        view.set_scroll(0.0, 0.5);

        let result = view.event(&left_down(195.0, 5.0));
        assert!(result.is_captured());
        assert!((view.scroll().y - (0.5 - 0.196)).abs() < 1e-4);
    }

    #[test]
    fn test_track_click_clamps_to_full_extent() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 210.0));
        // Page fraction is almost 1; repeated clicks saturate at 1.0.
        view.event(&left_down(195.0, 190.0));
        view.event(&left_down(195.0, 190.0));
        assert!(view.scroll().y <= 1.0);
    }

    #[test]
    fn test_thumb_drag_moves_scroll_by_travel_ratio() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));

        // Thumb spans roughly y in [1, 40.6]; grab it.
        let grab = view.event(&left_down(195.0, 20.0));
        assert!(grab.is_captured());
        assert_eq!(view.scroll().y, 0.0);

        let travel = view.scrollbar(Axis::Vertical).travel;
        let drag = view.event(&Event::MouseMove {
            position: Point::new(195.0, 60.0),
        });
        assert!(drag.is_captured());
        assert!((view.scroll().y - 40.0 / travel).abs() < 1e-5);
    }

    #[test]
    fn test_drag_accumulates_across_motion_events() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));
        view.event(&left_down(195.0, 20.0));

        let travel = view.scrollbar(Axis::Vertical).travel;
        view.event(&Event::MouseMove {
            position: Point::new(195.0, 30.0),
        });
        view.event(&Event::MouseMove {
            position: Point::new(195.0, 50.0),
        });
        assert!((view.scroll().y - 30.0 / travel).abs() < 1e-5);
    }

    #[test]
    fn test_mouse_up_always_returns_to_idle() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));
        view.event(&left_down(195.0, 20.0));
        let up = view.event(&left_up(195.0, 20.0));
        assert!(up.is_captured());

        // Motion afterwards no longer scrolls.
        let before = view.scroll();
        view.event(&Event::MouseMove {
            position: Point::new(195.0, 90.0),
        });
        assert_eq!(view.scroll(), before);
    }

    #[test]
    fn test_horizontal_drag_symmetry() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(1000.0, 200.0));

        // Grab the horizontal thumb in the bottom gutter.
        let grab = view.event(&left_down(20.0, 195.0));
        assert!(grab.is_captured());

        let travel = view.scrollbar(Axis::Horizontal).travel;
        view.event(&Event::MouseMove {
            position: Point::new(60.0, 195.0),
        });
        assert!((view.scroll().x - 40.0 / travel).abs() < 1e-5);
        assert_eq!(view.scroll().y, 0.0);
    }

    #[test]
    fn test_gutter_not_hit_testable_without_overflow() {
        let (probe, clicks, _moves) = Probe::new(300.0, 900.0);
        let mut view = ScrollView::new().child(probe);
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        // Only vertical overflow: a click in the bottom strip is content,
        // not a horizontal scrollbar.
        let result = view.event(&left_down(50.0, 295.0));
        assert!(result.is_captured());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(view.scroll(), Point::ORIGIN);
    }

    // =========================================================================
    // Child forwarding
    // =========================================================================

    #[test]
    fn test_content_click_goes_to_child_and_stays_idle() {
        let (probe, clicks, _moves) = Probe::new(300.0, 900.0);
        let mut view = ScrollView::new().child(probe);
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        let result = view.event(&left_down(100.0, 100.0));
        assert!(result.is_captured());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        // No drag was started by the content click.
        let before = view.scroll();
        view.event(&Event::MouseMove {
            position: Point::new(150.0, 150.0),
        });
        assert_eq!(view.scroll(), before);
    }

    #[test]
    fn test_idle_motion_is_forwarded_to_child() {
        let (probe, _clicks, moves) = Probe::new(300.0, 900.0);
        let mut view = ScrollView::new().child(probe);
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        view.event(&Event::MouseMove {
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(moves.load(Ordering::SeqCst), 1);
    }

    // =========================================================================
    // Painting
    // =========================================================================

    #[test]
    fn test_paint_clips_child_to_viewport() {
        let mut view = ScrollView::new().child(
            Panel::new(300.0, 900.0).background(Color::WHITE),
        );
        let bounds = Rect::from_size(Size::new(300.0, 300.0));
        view.layout(bounds);

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);

        assert_eq!(canvas.commands()[0], DrawCommand::PushClip { bounds });
        assert_eq!(canvas.clip_depth(), 0, "clip must be released");

        let pops = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PopClip))
            .count();
        let pushes = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushClip { .. }))
            .count();
        assert_eq!(pushes, pops);
    }

    #[test]
    fn test_paint_draws_scrollbar_per_overflowing_axis() {
        // Vertical overflow only: child fill + track + thumb.
        let mut view = ScrollView::new().child(
            Panel::new(300.0, 900.0).background(Color::WHITE),
        );
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);
        assert_eq!(canvas.filled_rects().count(), 3);

        // Both axes: child fill + two tracks + two thumbs.
        let mut view = ScrollView::new().child(
            Panel::new(900.0, 900.0).background(Color::WHITE),
        );
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);
        assert_eq!(canvas.filled_rects().count(), 5);
    }

    #[test]
    fn test_paint_no_scrollbars_without_overflow() {
        let mut view = ScrollView::new().child(
            Panel::new(100.0, 100.0).background(Color::WHITE),
        );
        view.layout(Rect::from_size(Size::new(300.0, 300.0)));

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);
        assert_eq!(canvas.filled_rects().count(), 1);
    }

    #[test]
    fn test_painted_thumb_matches_hit_geometry() {
        let mut view = laid_out_view(Size::new(200.0, 200.0), Size::new(200.0, 1000.0));
        view.set_scroll(0.0, 0.5);

        let geo = view.scrollbar(Axis::Vertical);
        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);

        let painted: Vec<_> = canvas.filled_rects().map(|(rect, _)| rect).collect();
        assert!(painted.contains(&geo.track));
        assert!(painted.contains(&geo.thumb));
    }

    #[test]
    fn test_scrollbars_never_overlap_when_both_active() {
        let view = laid_out_view(Size::new(300.0, 200.0), Size::new(900.0, 800.0));
        assert!(view.both_scrollbars_active());

        let v = view.scrollbar(Axis::Vertical);
        let h = view.scrollbar(Axis::Horizontal);
        assert!(!v.track.intersects(&h.track));
    }

    // =========================================================================
    // Invariants under arbitrary input
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Down(f32, f32),
        Move(f32, f32),
        Up,
        Wheel(f32, f32, bool),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..320.0, 0.0f32..320.0).prop_map(|(x, y)| Op::Down(x, y)),
            (-50.0f32..370.0, -50.0f32..370.0).prop_map(|(x, y)| Op::Move(x, y)),
            Just(Op::Up),
            (-3.0f32..3.0, -3.0f32..3.0, proptest::bool::ANY)
                .prop_map(|(dx, dy, shift)| Op::Wheel(dx, dy, shift)),
        ]
    }

    proptest! {
        #[test]
        fn prop_scroll_stays_normalized(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 1200.0));

            for op in ops {
                match op {
                    Op::Down(x, y) => {
                        view.event(&left_down(x, y));
                    }
                    Op::Move(x, y) => {
                        view.event(&Event::MouseMove { position: Point::new(x, y) });
                    }
                    Op::Up => {
                        view.event(&left_up(0.0, 0.0));
                    }
                    Op::Wheel(dx, dy, shift) => {
                        let modifiers = if shift { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
                        view.event(&wheel(dx, dy, modifiers));
                    }
                }

                let scroll = view.scroll();
                prop_assert!((0.0..=1.0).contains(&scroll.x));
                prop_assert!((0.0..=1.0).contains(&scroll.y));
            }
        }

        #[test]
        fn prop_zero_overflow_axis_keeps_zero_scroll(
            ops in proptest::collection::vec(op_strategy(), 0..40),
        ) {
            // Vertical-only overflow: x must never leave zero.
            let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(300.0, 1200.0));

            for op in ops {
                match op {
                    Op::Down(x, y) => {
                        view.event(&left_down(x, y));
                    }
                    Op::Move(x, y) => {
                        view.event(&Event::MouseMove { position: Point::new(x, y) });
                    }
                    Op::Up => {
                        view.event(&left_up(0.0, 0.0));
                    }
                    Op::Wheel(dx, dy, shift) => {
                        let modifiers = if shift { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
                        view.event(&wheel(dx, dy, modifiers));
                    }
                }
                prop_assert_eq!(view.scroll().x, 0.0);
            }
        }

        #[test]
        fn prop_event_sequences_are_deterministic(
            ops in proptest::collection::vec(op_strategy(), 0..40),
        ) {
            let run = |ops: &[Op]| {
                let mut view = laid_out_view(Size::new(300.0, 300.0), Size::new(900.0, 1200.0));
                for op in ops {
                    match op {
                        Op::Down(x, y) => {
                            view.event(&left_down(*x, *y));
                        }
                        Op::Move(x, y) => {
                            view.event(&Event::MouseMove { position: Point::new(*x, *y) });
                        }
                        Op::Up => {
                            view.event(&left_up(0.0, 0.0));
                        }
                        Op::Wheel(dx, dy, shift) => {
                            let modifiers =
                                if *shift { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
                            view.event(&wheel(*dx, *dy, modifiers));
                        }
                    }
                }
                view.scroll()
            };

            prop_assert_eq!(run(&ops), run(&ops));
        }
    }
}
