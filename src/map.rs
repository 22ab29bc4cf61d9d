//! The map core: projection, scene, rendering and hover state behind one
//! entry point. Only invoked once both datasets are available.

use crate::config::MapConfig;
use crate::geo::GeographyFeature;
use crate::interaction::{InteractionController, InteractionState};
use crate::projection::{GeoProjector, Point};
use crate::render::{MapRenderer, MarkerHandle, MarkerId, PointerEvent, RenderedMap, Surface};
use crate::scene::SceneBuilder;
use crate::site::LaunchSite;
use crate::tooltip::TooltipState;

pub struct MapView {
    projector: GeoProjector,
    renderer: MapRenderer,
    surface: Surface,
    rendered: RenderedMap,
    controller: InteractionController,
}

impl MapView {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            projector: GeoProjector::new(config.projection),
            renderer: MapRenderer::new(config.base_style),
            surface: Surface::new(config.viewport),
            rendered: RenderedMap::default(),
            controller: InteractionController::new(),
        }
    }

    /// Build and draw a new scene, discarding the previous one and any hover
    pub fn load(&mut self, geography: &[GeographyFeature], sites: &[LaunchSite]) {
        let scene = SceneBuilder::new(&self.projector).build(geography, sites);
        if scene.is_empty() {
            tracing::warn!("nothing to draw: no geography and no valid launch sites");
        }
        self.rendered = self.renderer.render(scene, &mut self.surface);
        self.controller.reset();
        tracing::info!(
            shapes = geography.len(),
            markers = self.rendered.markers().len(),
            generation = self.rendered.generation(),
            "map loaded"
        );
    }

    /// Pointer at a surface position. `slop` widens marker hit areas.
    pub fn pointer_at(&mut self, point: Point, slop: f64) {
        let events = self
            .rendered
            .route(&self.surface, self.controller.hovered(), point, slop);
        for event in events {
            self.controller.handle(&self.rendered, &mut self.surface, event);
        }
    }

    /// Pointer left the map entirely
    pub fn pointer_left(&mut self) {
        if let Some(marker) = self.controller.hovered() {
            let event = PointerEvent::Leave { marker };
            self.controller.handle(&self.rendered, &mut self.surface, event);
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        self.rendered.markers()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.controller.hovered()
    }

    pub fn hovered_site(&self) -> Option<&LaunchSite> {
        self.rendered.marker(self.hovered()?).map(|m| &m.site)
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.controller.tooltip()
    }
}
