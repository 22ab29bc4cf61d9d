//! Braille rasterization of the drawing surface for the terminal

use crate::config::{MarkerStyle, Rgb};
use crate::projection::Point;
use crate::render::{Element, Surface};
use crate::terminal::{rgb, Terminal};

// Dot layers; a cell takes the color of its highest layer
pub const LAYER_BASE: u8 = 1;
pub const LAYER_MARKER: u8 = 2;
pub const LAYER_HOVER: u8 = 3;

const DOT_BITS: [(usize, usize, u8); 8] = [
    (0, 0, 0x01), (0, 1, 0x02), (0, 2, 0x04),
    (1, 0, 0x08), (1, 1, 0x10), (1, 2, 0x20),
    (0, 3, 0x40), (1, 3, 0x80),
];

/// Uniform fit of the surface into a grid of terminal cells (2x4 dots each)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub cols: u16,
    pub rows: u16,
    pub scale: f64, // dots per surface pixel
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Fit {
    pub fn new(surface_size: (f64, f64), cols: u16, rows: u16) -> Self {
        let dots_w = cols as f64 * 2.0;
        let dots_h = rows as f64 * 4.0;
        let (w, h) = surface_size;
        let scale = (dots_w / w).min(dots_h / h).max(f64::EPSILON);
        Self {
            cols,
            rows,
            scale,
            offset_x: (dots_w - w * scale) / 2.0,
            offset_y: (dots_h - h * scale) / 2.0,
        }
    }

    pub fn to_dot(&self, p: Point) -> (f64, f64) {
        (self.offset_x + p.x * self.scale, self.offset_y + p.y * self.scale)
    }

    /// Surface point at the center of a terminal cell
    pub fn cell_to_surface(&self, col: u16, row: u16) -> Point {
        let dx = col as f64 * 2.0 + 1.0;
        let dy = row as f64 * 4.0 + 2.0;
        Point::new((dx - self.offset_x) / self.scale, (dy - self.offset_y) / self.scale)
    }

    pub fn surface_to_cell(&self, p: Point) -> (i32, i32) {
        let (dx, dy) = self.to_dot(p);
        ((dx / 2.0).floor() as i32, (dy / 4.0).floor() as i32)
    }

    /// Half a cell height in surface pixels: pointer precision in the terminal
    pub fn slop(&self) -> f64 {
        2.0 / self.scale
    }

    /// True if the cell falls inside the fitted surface
    pub fn contains_cell(&self, col: u16, row: u16, surface_size: (f64, f64)) -> bool {
        let p = self.cell_to_surface(col, row);
        (0.0..=surface_size.0).contains(&p.x) && (0.0..=surface_size.1).contains(&p.y)
    }
}

pub struct BrailleCanvas {
    width: usize,
    height: usize,
    layers: Vec<u8>,
    colors: Vec<Rgb>,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let width = cols as usize * 2;
        let height = rows as usize * 4;
        Self {
            width,
            height,
            layers: vec![0; width * height],
            colors: vec![Rgb(0, 0, 0); width * height],
        }
    }

    pub fn plot(&mut self, x: i32, y: i32, layer: u8, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = y as usize * self.width + x as usize;
        if layer >= self.layers[i] {
            self.layers[i] = layer;
            self.colors[i] = color;
        }
    }

    #[cfg(test)]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.layers[y * self.width + x] > 0
    }

    /// Bresenham line between dot coordinates
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), layer: u8, color: Rgb) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, layer, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Filled disc; radius in dots, at least the center dot
    pub fn disc(&mut self, center: (f64, f64), radius: f64, layer: u8, color: Rgb) {
        let r = radius.max(0.5);
        let (cx, cy) = center;
        let reach = r.ceil() as i32;
        let (ix, iy) = (cx.round() as i32, cy.round() as i32);
        self.plot(ix, iy, layer, color);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (x, y) = (ix + dx, iy + dy);
                let (fx, fy) = (x as f64 - cx, y as f64 - cy);
                if fx * fx + fy * fy <= r * r {
                    self.plot(x, y, layer, color);
                }
            }
        }
    }

    /// Write braille characters into the terminal buffer
    pub fn blit(&self, term: &mut Terminal) {
        let cols = self.width / 2;
        let rows = self.height / 4;
        for cy in 0..rows {
            for cx in 0..cols {
                let mut bits: u8 = 0;
                let mut top = 0u8;
                let mut color = Rgb(0, 0, 0);
                for &(ox, oy, bit) in DOT_BITS.iter() {
                    let i = (cy * 4 + oy) * self.width + cx * 2 + ox;
                    let layer = self.layers[i];
                    if layer > 0 {
                        bits |= bit;
                        if layer >= top {
                            top = layer;
                            color = self.colors[i];
                        }
                    }
                }
                if bits > 0 {
                    let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                    term.set(cx as i32, cy as i32, ch, Some(rgb(color)), top >= LAYER_HOVER);
                }
            }
        }
    }
}

/// Rasterize every element of the surface, in paint order
pub fn draw_surface(canvas: &mut BrailleCanvas, fit: &Fit, surface: &Surface) {
    let origin = surface.origin();
    let to_dot = |p: Point| {
        let (x, y) = fit.to_dot(p.offset(origin.x, origin.y));
        (x.round() as i32, y.round() as i32)
    };
    // Segments this long are wrap-around artifacts, not coastline
    let max_jump = (fit.cols as i32).max(1);

    for element in surface.elements() {
        match element {
            Element::BaseShape { paths, style } => {
                for path in paths {
                    let mut segments: Vec<(Point, Point)> =
                        path.points.windows(2).map(|w| (w[0], w[1])).collect();
                    if path.closed && path.points.len() > 2 {
                        if let (Some(&first), Some(&last)) = (path.points.first(), path.points.last()) {
                            segments.push((last, first));
                        }
                    }
                    for (a, b) in segments {
                        let (from, to) = (to_dot(a), to_dot(b));
                        if (from.0 - to.0).abs() < max_jump {
                            canvas.line(from, to, LAYER_BASE, style.stroke);
                        }
                    }
                }
            }
            Element::Marker { center, style } => {
                let layer = if style.radius > MarkerStyle::BASELINE.radius {
                    LAYER_HOVER
                } else {
                    LAYER_MARKER
                };
                let dot = fit.to_dot(center.offset(origin.x, origin.y));
                canvas.disc(dot, style.radius * fit.scale, layer, style.fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::map::MapView;
    use crate::scene::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn fit_round_trips_cell_centers() {
        let fit = Fit::new((750.0, 540.0), 120, 40);
        let p = fit.cell_to_surface(60, 20);
        assert_eq!(fit.surface_to_cell(p), (60, 20));
        assert_relative_eq!(fit.scale, (160.0f64 / 540.0).min(240.0 / 750.0));
    }

    #[test]
    fn fit_centers_the_surface() {
        let fit = Fit::new((100.0, 100.0), 100, 10);
        // 40 dots tall limits the scale; width is padded evenly
        assert_relative_eq!(fit.scale, 0.4);
        assert_relative_eq!(fit.offset_x, 80.0);
        assert_relative_eq!(fit.offset_y, 0.0);
        assert!(!fit.contains_cell(0, 5, (100.0, 100.0)));
        assert!(fit.contains_cell(50, 5, (100.0, 100.0)));
    }

    #[test]
    fn line_covers_endpoints() {
        let mut canvas = BrailleCanvas::new(10, 3);
        canvas.line((0, 0), (19, 11), LAYER_BASE, Rgb(1, 1, 1));
        assert!(canvas.is_set(0, 0));
        assert!(canvas.is_set(19, 11));
    }

    #[test]
    fn markers_land_on_the_terminal() {
        let mut view = MapView::new(&MapConfig::default());
        view.load(&[], &fixtures::sites());
        let fit = Fit::new(view.surface().size(), 120, 40);
        let mut canvas = BrailleCanvas::new(120, 40);
        draw_surface(&mut canvas, &fit, view.surface());

        let mut term = Terminal::offscreen(120, 40);
        canvas.blit(&mut term);
        let origin = view.surface().origin();
        for marker in view.markers() {
            let (col, row) = fit.surface_to_cell(marker.position.offset(origin.x, origin.y));
            let cell = term.get(col as u16, row as u16).unwrap();
            assert_ne!(cell.ch, ' ', "marker {} not drawn", marker.site.name);
        }
    }
}
