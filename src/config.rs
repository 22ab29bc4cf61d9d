/// Margins around the drawable area, in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 10.0,
            bottom: 40.0,
            left: 100.0,
        }
    }
}

/// Drawing surface geometry, fixed for the lifetime of a map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            margin: Margin::default(),
        }
    }
}

impl Viewport {
    /// Full surface size including margins
    pub fn surface_size(&self) -> (f64, f64) {
        (
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom,
        )
    }

    /// True if a drawable-area point lies inside width x height
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Projection constants, chosen once so the world fits the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    pub scale: f64,
    pub center: (f64, f64),    // (lon, lat) in degrees
    pub translate: (f64, f64), // Pixel position of `center`
}

impl ProjectionConfig {
    /// Defaults for a viewport: world centered slightly north, scale 90
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            scale: 90.0,
            center: (0.0, 20.0),
            translate: (viewport.width / 2.0, viewport.height / 2.0),
        }
    }
}

/// Visual style of a marker glyph
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: Rgb,
    pub opacity: f64,
}

impl MarkerStyle {
    pub const BASELINE: MarkerStyle = MarkerStyle {
        radius: 5.0,
        fill: Rgb(0x19, 0x76, 0xd2),
        opacity: 0.85,
    };

    pub const HIGHLIGHTED: MarkerStyle = MarkerStyle {
        radius: 9.0,
        fill: Rgb(0xff, 0xa5, 0x00), // orange
        opacity: 0.85,
    };
}

/// Fill/stroke for base-map shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Rgb(0xe0, 0xe0, 0xe0),
            stroke: Rgb(0x99, 0x99, 0x99),
        }
    }
}

/// 24-bit color shared by the SVG and terminal backends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Everything the map core needs at construction
#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub viewport: Viewport,
    pub projection: ProjectionConfig,
    pub base_style: ShapeStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            projection: ProjectionConfig::for_viewport(&viewport),
            viewport,
            base_style: ShapeStyle::default(),
        }
    }
}
