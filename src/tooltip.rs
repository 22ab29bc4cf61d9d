//! The single floating tooltip shared by all markers of a map

use crate::projection::Point;

/// Offset from the pointer so the box clears both pointer and marker
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -40.0);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub content: String,
    pub anchor: Point,
}

#[derive(Debug, Default)]
pub struct TooltipPresenter {
    state: TooltipState,
}

impl TooltipPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    /// Replace content, move next to `pointer`, and make visible
    pub fn show(&mut self, content: impl Into<String>, pointer: Point) {
        self.state.content = content.into();
        self.state.anchor = anchor_for(pointer);
        self.state.visible = true;
    }

    /// Follow the pointer. Never changes visibility.
    pub fn reposition(&mut self, pointer: Point) {
        self.state.anchor = anchor_for(pointer);
    }

    pub fn hide(&mut self) {
        self.state.visible = false;
        self.state.content.clear();
    }
}

fn anchor_for(pointer: Point) -> Point {
    pointer.offset(TOOLTIP_OFFSET.0, TOOLTIP_OFFSET.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_positions_with_offset() {
        let mut tooltip = TooltipPresenter::new();
        tooltip.show("Starlink-10", Point::new(100.0, 200.0));
        let state = tooltip.state();
        assert!(state.visible);
        assert_eq!(state.content, "Starlink-10");
        assert_eq!(state.anchor, Point::new(110.0, 160.0));
    }

    #[test]
    fn reposition_while_hidden_stays_hidden() {
        let mut tooltip = TooltipPresenter::new();
        tooltip.reposition(Point::new(5.0, 5.0));
        assert!(!tooltip.state().visible);

        tooltip.show("a", Point::new(0.0, 0.0));
        tooltip.hide();
        tooltip.reposition(Point::new(50.0, 50.0));
        assert!(!tooltip.state().visible);
        assert_eq!(tooltip.state().anchor, Point::new(60.0, 10.0));
    }

    #[test]
    fn show_replaces_stale_content() {
        let mut tooltip = TooltipPresenter::new();
        tooltip.show("first\nline", Point::new(0.0, 0.0));
        tooltip.hide();
        assert!(tooltip.state().content.is_empty());
        tooltip.show("second", Point::new(0.0, 0.0));
        assert_eq!(tooltip.state().content, "second");
    }
}
