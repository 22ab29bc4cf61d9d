//! Materializes a scene onto the drawing surface and exposes markers as
//! pointer targets.

use crate::config::{MarkerStyle, ShapeStyle, Viewport};
use crate::projection::Point;
use crate::scene::{Scene, ShapePath};
use crate::site::LaunchSite;

/// Identifies a marker within one render cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId {
    pub generation: u64,
    pub index: usize,
}

/// A drawn element, in drawable-area coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    BaseShape { paths: Vec<ShapePath>, style: ShapeStyle },
    Marker { center: Point, style: MarkerStyle },
}

impl Element {
    /// Visual class, as used for styling and in SVG output
    pub fn class(&self) -> &'static str {
        match self {
            Element::BaseShape { .. } => "base-shape",
            Element::Marker { .. } => "marker",
        }
    }
}

/// Retained drawing surface. Content is replaced wholesale on each render;
/// `generation` counts those replacements.
#[derive(Clone, Debug)]
pub struct Surface {
    viewport: Viewport,
    generation: u64,
    elements: Vec<Element>,
    marker_elements: Vec<usize>,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            generation: 0,
            elements: Vec::new(),
            marker_elements: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Full surface size including margins
    pub fn size(&self) -> (f64, f64) {
        self.viewport.surface_size()
    }

    /// Top-left of the drawable area within the surface
    pub fn origin(&self) -> Point {
        Point::new(self.viewport.margin.left, self.viewport.margin.top)
    }

    /// Surface coordinates to drawable-area coordinates
    pub fn to_drawable(&self, p: Point) -> Point {
        let origin = self.origin();
        Point::new(p.x - origin.x, p.y - origin.y)
    }

    /// Drop all content and start a new generation
    pub fn clear(&mut self) {
        self.elements.clear();
        self.marker_elements.clear();
        self.generation += 1;
    }

    fn push_base_shape(&mut self, paths: Vec<ShapePath>, style: ShapeStyle) {
        self.elements.push(Element::BaseShape { paths, style });
    }

    fn push_marker(&mut self, center: Point, style: MarkerStyle) -> MarkerId {
        let index = self.marker_elements.len();
        self.marker_elements.push(self.elements.len());
        self.elements.push(Element::Marker { center, style });
        MarkerId { generation: self.generation, index }
    }

    fn marker_element(&self, id: MarkerId) -> Option<usize> {
        if id.generation != self.generation {
            return None;
        }
        self.marker_elements.get(id.index).copied()
    }

    pub fn marker_style(&self, id: MarkerId) -> Option<MarkerStyle> {
        match self.elements.get(self.marker_element(id)?)? {
            Element::Marker { style, .. } => Some(*style),
            Element::BaseShape { .. } => None,
        }
    }

    /// Restyle one marker in place. False if the id is from an older render.
    pub fn set_marker_style(&mut self, id: MarkerId, new_style: MarkerStyle) -> bool {
        let Some(element) = self.marker_element(id) else {
            return false;
        };
        match self.elements.get_mut(element) {
            Some(Element::Marker { style, .. }) => {
                *style = new_style;
                true
            }
            _ => false,
        }
    }
}

/// Pointer input addressed to one marker
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter { marker: MarkerId, pointer: Point },
    Move { marker: MarkerId, pointer: Point },
    Leave { marker: MarkerId },
}

impl PointerEvent {
    pub fn marker(&self) -> MarkerId {
        match *self {
            PointerEvent::Enter { marker, .. }
            | PointerEvent::Move { marker, .. }
            | PointerEvent::Leave { marker } => marker,
        }
    }
}

/// Per-marker pointer callbacks. The renderer resolves the marker and hands
/// over its backing record; implementors own all interaction state.
pub trait PointerHooks {
    fn enter(&mut self, surface: &mut Surface, marker: &MarkerHandle, pointer: Point);
    fn moved(&mut self, surface: &mut Surface, marker: &MarkerHandle, pointer: Point);
    fn leave(&mut self, surface: &mut Surface, marker: &MarkerHandle);
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerHandle {
    pub id: MarkerId,
    pub position: Point,
    pub site: LaunchSite,
}

/// Handles to the markers of one render
#[derive(Clone, Debug, Default)]
pub struct RenderedMap {
    generation: u64,
    markers: Vec<MarkerHandle>,
}

impl RenderedMap {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerHandle> {
        if id.generation != self.generation {
            return None;
        }
        self.markers.get(id.index)
    }

    /// Topmost marker under a surface point, using each marker's current
    /// radius plus `slop` pixels of tolerance
    pub fn marker_at(&self, surface: &Surface, point: Point, slop: f64) -> Option<MarkerId> {
        let local = surface.to_drawable(point);
        self.markers.iter().rev().find_map(|marker| {
            let radius = surface.marker_style(marker.id)?.radius;
            (marker.position.distance(local) <= radius + slop).then_some(marker.id)
        })
    }

    /// Translate a raw pointer position into the events a pointer device
    /// would deliver, given the currently hovered marker. Leave comes first.
    pub fn route(
        &self,
        surface: &Surface,
        hovered: Option<MarkerId>,
        point: Point,
        slop: f64,
    ) -> Vec<PointerEvent> {
        let target = self.marker_at(surface, point, slop);
        match (hovered, target) {
            (Some(current), Some(next)) if current == next => {
                vec![PointerEvent::Move { marker: current, pointer: point }]
            }
            (Some(current), Some(next)) => vec![
                PointerEvent::Leave { marker: current },
                PointerEvent::Enter { marker: next, pointer: point },
            ],
            (Some(current), None) => vec![PointerEvent::Leave { marker: current }],
            (None, Some(next)) => vec![PointerEvent::Enter { marker: next, pointer: point }],
            (None, None) => Vec::new(),
        }
    }

    /// Deliver an event to the hooks. Events for markers that are no longer
    /// on the surface are ignored and return false.
    pub fn dispatch<H: PointerHooks>(
        &self,
        surface: &mut Surface,
        event: PointerEvent,
        hooks: &mut H,
    ) -> bool {
        let Some(marker) = self.marker(event.marker()) else {
            tracing::debug!(?event, generation = self.generation, "ignoring event for stale marker");
            return false;
        };
        match event {
            PointerEvent::Enter { pointer, .. } => hooks.enter(surface, marker, pointer),
            PointerEvent::Move { pointer, .. } => hooks.moved(surface, marker, pointer),
            PointerEvent::Leave { .. } => hooks.leave(surface, marker),
        }
        true
    }
}

pub struct MapRenderer {
    base_style: ShapeStyle,
}

impl MapRenderer {
    pub fn new(base_style: ShapeStyle) -> Self {
        Self { base_style }
    }

    /// Replace whatever is on `surface` with `scene`
    pub fn render(&self, scene: Scene, surface: &mut Surface) -> RenderedMap {
        surface.clear();

        for shape in scene.base_shapes {
            surface.push_base_shape(shape.paths, self.base_style);
        }

        let markers = scene
            .markers
            .into_iter()
            .map(|marker| MarkerHandle {
                id: surface.push_marker(marker.position, MarkerStyle::BASELINE),
                position: marker.position,
                site: marker.site,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            generation = surface.generation(),
            elements = surface.elements().len(),
            markers = markers.len(),
            "rendered map"
        );

        RenderedMap {
            generation: surface.generation(),
            markers,
        }
    }
}
