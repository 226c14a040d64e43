//! Widgets for the Ventana viewport toolkit.
//!
//! The centerpiece is [`ScrollView`], a single-child viewport with
//! normalized two-axis scrolling, draggable scrollbars, and wheel support.
//! [`Panel`] provides fixed-size content to put inside one, and the
//! [`scrollbar`] module exposes the pure geometry shared by painting and
//! hit-testing.

pub mod panel;
pub mod scrollbar;
pub mod scroll_view;

pub use panel::Panel;
pub use scroll_view::{ScrollChanged, ScrollView};
pub use scrollbar::{scrollbar_geometry, Axis, ScrollbarGeometry, ScrollbarStyle, ThumbHit};
