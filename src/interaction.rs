//! Hover state machine: highlights one marker and drives the tooltip

use crate::config::MarkerStyle;
use crate::projection::Point;
use crate::render::{MarkerHandle, MarkerId, PointerEvent, PointerHooks, RenderedMap, Surface};
use crate::tooltip::{TooltipPresenter, TooltipState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered(MarkerId),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    tooltip: TooltipPresenter,
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
            tooltip: TooltipPresenter::new(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        match self.state() {
            InteractionState::Idle => None,
            InteractionState::Hovered(id) => Some(id),
        }
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    /// Route one event through the rendered map's hooks. False if ignored.
    pub fn handle(&mut self, map: &RenderedMap, surface: &mut Surface, event: PointerEvent) -> bool {
        map.dispatch(surface, event, self)
    }

    /// Back to Idle with the tooltip hidden. Called when the surface is
    /// re-rendered; the old marker elements are already gone.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.tooltip.hide();
    }
}

impl PointerHooks for InteractionController {
    fn enter(&mut self, surface: &mut Surface, marker: &MarkerHandle, pointer: Point) {
        // Enter without a leave for the previous marker
        if let InteractionState::Hovered(previous) = self.state {
            if previous != marker.id {
                surface.set_marker_style(previous, MarkerStyle::BASELINE);
            }
        }

        surface.set_marker_style(marker.id, MarkerStyle::HIGHLIGHTED);
        self.tooltip.show(marker.site.tooltip_text(), pointer);
        self.state = InteractionState::Hovered(marker.id);
        tracing::debug!(site = %marker.site.name, index = marker.id.index, "hover enter");
    }

    fn moved(&mut self, _surface: &mut Surface, marker: &MarkerHandle, pointer: Point) {
        if self.state == InteractionState::Hovered(marker.id) {
            self.tooltip.reposition(pointer);
        }
    }

    fn leave(&mut self, surface: &mut Surface, marker: &MarkerHandle) {
        if self.state != InteractionState::Hovered(marker.id) {
            return;
        }
        surface.set_marker_style(marker.id, MarkerStyle::BASELINE);
        self.tooltip.hide();
        self.state = InteractionState::Idle;
        tracing::debug!(site = %marker.site.name, index = marker.id.index, "hover leave");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::projection::GeoProjector;
    use crate::render::MapRenderer;
    use crate::scene::{fixtures, SceneBuilder};

    fn setup() -> (Surface, RenderedMap, InteractionController) {
        let config = MapConfig::default();
        let projector = GeoProjector::new(config.projection);
        let scene = SceneBuilder::new(&projector).build(&[], &fixtures::sites());
        let mut surface = Surface::new(config.viewport);
        let map = MapRenderer::new(config.base_style).render(scene, &mut surface);
        (surface, map, InteractionController::new())
    }

    fn highlighted(surface: &Surface, map: &RenderedMap) -> Vec<MarkerId> {
        map.markers()
            .iter()
            .filter(|m| surface.marker_style(m.id) == Some(MarkerStyle::HIGHLIGHTED))
            .map(|m| m.id)
            .collect()
    }

    #[test]
    fn enter_highlights_and_shows_tooltip() {
        let (mut surface, map, mut controller) = setup();
        let starlink = map.markers()[0].id;
        let pointer = Point::new(300.0, 250.0);
        assert!(controller.handle(&map, &mut surface, PointerEvent::Enter { marker: starlink, pointer }));

        assert_eq!(controller.state(), InteractionState::Hovered(starlink));
        assert_eq!(highlighted(&surface, &map), vec![starlink]);
        let tooltip = controller.tooltip();
        assert!(tooltip.visible);
        assert!(tooltip.content.contains("Starlink-10"));
        assert!(tooltip.content.contains("Cape Canaveral, Florida"));
    }

    #[test]
    fn leave_reverts_and_hides() {
        let (mut surface, map, mut controller) = setup();
        let id = map.markers()[0].id;
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: id, pointer: Point::default() });
        controller.handle(&map, &mut surface, PointerEvent::Leave { marker: id });

        assert_eq!(controller.state(), InteractionState::Idle);
        assert!(highlighted(&surface, &map).is_empty());
        assert!(!controller.tooltip().visible);
    }

    #[test]
    fn move_repositions_without_restyling() {
        let (mut surface, map, mut controller) = setup();
        let id = map.markers()[1].id;
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: id, pointer: Point::new(1.0, 1.0) });
        controller.handle(&map, &mut surface, PointerEvent::Move { marker: id, pointer: Point::new(20.0, 80.0) });

        assert_eq!(controller.tooltip().anchor, Point::new(30.0, 40.0));
        assert_eq!(highlighted(&surface, &map), vec![id]);
    }

    #[test]
    fn enter_without_leave_reverts_previous() {
        let (mut surface, map, mut controller) = setup();
        let a = map.markers()[0].id;
        let b = map.markers()[2].id;
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: a, pointer: Point::default() });
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: b, pointer: Point::default() });

        assert_eq!(controller.state(), InteractionState::Hovered(b));
        assert_eq!(highlighted(&surface, &map), vec![b]);
        assert!(controller.tooltip().content.contains("Omelek"));
    }

    #[test]
    fn at_most_one_marker_highlighted_for_any_sequence() {
        let (mut surface, map, mut controller) = setup();
        let ids: Vec<_> = map.markers().iter().map(|m| m.id).collect();
        let p = Point::new(10.0, 10.0);

        // Deterministic pseudo-random walk over every event kind and marker
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let marker = ids[(seed as usize) % ids.len()];
            let event = match (seed >> 8) % 3 {
                0 => PointerEvent::Enter { marker, pointer: p },
                1 => PointerEvent::Move { marker, pointer: p },
                _ => PointerEvent::Leave { marker },
            };
            controller.handle(&map, &mut surface, event);

            let lit = highlighted(&surface, &map);
            assert!(lit.len() <= 1, "two markers highlighted after {:?}", event);
            assert_eq!(lit.first().copied(), controller.hovered());
            assert_eq!(controller.tooltip().visible, controller.hovered().is_some());
        }
    }

    #[test]
    fn leave_for_other_marker_is_ignored() {
        let (mut surface, map, mut controller) = setup();
        let a = map.markers()[0].id;
        let b = map.markers()[1].id;
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: a, pointer: Point::default() });
        controller.handle(&map, &mut surface, PointerEvent::Leave { marker: b });
        assert_eq!(controller.state(), InteractionState::Hovered(a));
        assert!(controller.tooltip().visible);
    }

    #[test]
    fn stale_events_are_ignored_after_rerender() {
        let (mut surface, map, mut controller) = setup();
        let old = map.markers()[0].id;
        controller.handle(&map, &mut surface, PointerEvent::Enter { marker: old, pointer: Point::default() });

        let config = MapConfig::default();
        let projector = GeoProjector::new(config.projection);
        let scene = SceneBuilder::new(&projector).build(&[], &fixtures::sites());
        let fresh = MapRenderer::new(config.base_style).render(scene, &mut surface);
        controller.reset();

        assert!(!controller.handle(&fresh, &mut surface, PointerEvent::Leave { marker: old }));
        assert!(!controller.handle(&fresh, &mut surface, PointerEvent::Enter { marker: old, pointer: Point::default() }));
        assert_eq!(controller.state(), InteractionState::Idle);
        assert!(highlighted(&surface, &fresh).is_empty());
    }
}
