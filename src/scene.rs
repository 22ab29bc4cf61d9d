//! Scene construction: what to draw, independent of how it is drawn

use crate::geo::GeographyFeature;
use crate::projection::{GeoProjector, Point};
use crate::site::LaunchSite;

/// A projected geography feature
#[derive(Clone, Debug, PartialEq)]
pub struct BaseShape {
    pub feature: usize,
    pub name: Option<String>,
    pub paths: Vec<ShapePath>,
}

/// A projected ring (closed) or line (open)
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePath {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// A marker at a projected site position, carrying its source record
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerShape {
    pub index: usize,
    pub position: Point,
    pub site: LaunchSite,
}

/// Shapes for one render cycle, in paint order: base shapes, then markers
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub base_shapes: Vec<BaseShape>,
    pub markers: Vec<MarkerShape>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.base_shapes.is_empty() && self.markers.is_empty()
    }
}

pub struct SceneBuilder<'a> {
    projector: &'a GeoProjector,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(projector: &'a GeoProjector) -> Self {
        Self { projector }
    }

    pub fn build(&self, geography: &[GeographyFeature], sites: &[LaunchSite]) -> Scene {
        let base_shapes = geography
            .iter()
            .enumerate()
            .map(|(i, feature)| self.base_shape(i, feature))
            .collect();

        let mut markers = Vec::with_capacity(sites.len());
        let mut dropped = 0usize;
        for site in sites {
            let Some((lon, lat)) = site.coordinate() else {
                tracing::debug!(id = %site.id, name = %site.name, "dropping site without valid coordinates");
                dropped += 1;
                continue;
            };
            markers.push(MarkerShape {
                index: markers.len(),
                position: self.projector.project(lon, lat),
                site: site.clone(),
            });
        }

        if dropped > 0 {
            tracing::info!(dropped, kept = markers.len(), "excluded launch sites with invalid coordinates");
        }

        Scene { base_shapes, markers }
    }

    fn base_shape(&self, index: usize, feature: &GeographyFeature) -> BaseShape {
        let paths = feature
            .geometry
            .as_ref()
            .map(|g| g.paths())
            .unwrap_or_default()
            .into_iter()
            .map(|path| ShapePath {
                points: path
                    .positions
                    .iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| self.projector.project(p[0], p[1]))
                    .collect(),
                closed: path.closed,
            })
            .filter(|path| !path.points.is_empty())
            .collect();

        BaseShape {
            feature: index,
            name: feature.name().map(String::from),
            paths,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::site::LaunchSite;

    pub fn site(name: &str, lon: Option<f64>, lat: Option<f64>) -> LaunchSite {
        LaunchSite {
            id: format!("id-{}", name),
            name: name.to_string(),
            locality: "Cape Canaveral".to_string(),
            region: "Florida".to_string(),
            status: "active".to_string(),
            longitude: lon,
            latitude: lat,
        }
    }

    /// Three valid pads spread across the map plus two invalid records
    pub fn sites() -> Vec<LaunchSite> {
        vec![
            site("Starlink-10", Some(-80.577), Some(28.561)),
            site("Missing", None, Some(10.0)),
            site("Vandenberg", Some(-120.611), Some(34.632)),
            site("OutOfRange", Some(181.0), Some(0.0)),
            site("Omelek", Some(167.743), Some(9.047)),
        ]
    }
}
