use crate::{point::*, Assignment, Error, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Canvas and marker settings used by the [`Renderer`].
///
/// The [`Default`] implementation yields a 512×512 white canvas, cluster points with a radius
/// of 2 in a light red / green / blue palette, and black centroids with a radius of 4.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Rgb<u8>,
    pub cluster_point_radius: u32,
    /// Color per cluster index; cycles when there are more clusters than colors
    pub cluster_colors: Vec<Rgb<u8>>,
    pub center_point_radius: u32,
    pub center_point_color: Rgb<u8>
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background_color: Rgb([255, 255, 255]),
            cluster_point_radius: 2,
            cluster_colors: vec![
                Rgb([255, 127, 127]),
                Rgb([127, 255, 127]),
                Rgb([127, 127, 255]),
            ],
            center_point_radius: 4,
            center_point_color: Rgb([0, 0, 0])
        }
    }
}

/// Draws a clustering result onto an RGB canvas.
///
/// A coordinate `(x, y)` maps to the pixel `(trunc(x·W), trunc(y·H))`, with `x` selecting the column.
/// Markers are filled discs; the parts falling outside of the canvas are clipped.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig
}
impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig { &self.config }

    /// Render all **points** in the color of their cluster, then all **centroids** on top.
    ///
    /// ## Errors
    /// - [`Error::DimensionMismatch`] if **assignment** does not match **points** / **centroids**
    /// - [`Error::UnassignedPoint`] if a point has no cluster
    /// - [`Error::NonFiniteCoordinate`] / [`Error::NonFiniteCentroid`] for NaN or infinite coordinates
    /// - [`Error::InvalidConfiguration`] if the cluster palette is empty
    pub fn render<T: Primitive>(&self, points: &[Point<T>], centroids: &[Point<T>], assignment: &Assignment) -> Result<RgbImage> {
        if assignment.sample_cnt() != points.len() {
            return Err(Error::DimensionMismatch { expected: points.len(), found: assignment.sample_cnt() });
        }
        if assignment.k() != centroids.len() {
            return Err(Error::DimensionMismatch { expected: centroids.len(), found: assignment.k() });
        }
        if self.config.cluster_colors.is_empty() {
            return Err(Error::invalid_configuration("at least one cluster color is required"));
        }
        if let Some(index) = centroids.iter().position(|c| !c.is_finite()) {
            return Err(Error::NonFiniteCentroid { index });
        }

        let mut image = RgbImage::from_pixel(self.config.width, self.config.height, self.config.background_color);
        for (index, (point, label)) in points.iter().zip(assignment.labels()).enumerate() {
            let cluster = label.ok_or(Error::UnassignedPoint { index })?;
            let (px, py) = self.to_pixel(point).ok_or(Error::NonFiniteCoordinate { index })?;
            let color = self.config.cluster_colors[cluster % self.config.cluster_colors.len()];
            fill_disc(&mut image, px, py, self.config.cluster_point_radius, color);
        }
        for (index, centroid) in centroids.iter().enumerate() {
            let (px, py) = self.to_pixel(centroid).ok_or(Error::NonFiniteCentroid { index })?;
            fill_disc(&mut image, px, py, self.config.center_point_radius, self.config.center_point_color);
        }
        Ok(image)
    }

    fn to_pixel<T: Primitive>(&self, point: &Point<T>) -> Option<(i64, i64)> {
        if !point.is_finite() {
            return None;
        }
        let scale = |v: T, extent: u32| -> i64 {
            // saturate instead of failing for coordinates far outside the canvas
            T::from(extent)
                .map(|e| v * e)
                .and_then(|v| v.to_i64())
                .unwrap_or(if v < T::zero() { i64::MIN / 2 } else { i64::MAX / 2 })
        };
        Some((scale(point.x, self.config.width), scale(point.y, self.config.height)))
    }
}

/// Paint all pixels within **radius** of `(cx, cy)`.
/// Radii beyond the larger canvas side cover the whole canvas anyway and are clamped to it.
fn fill_disc(image: &mut RgbImage, cx: i64, cy: i64, radius: u32, color: Rgb<u8>) {
    let r = i64::from(radius.min(image.width().max(image.height())));
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    if cx + r < 0 || cy + r < 0 || cx - r >= width || cy - r >= height {
        return;
    }
    let r_squared = i128::from(r) * i128::from(r);
    // only visit the part of the bounding box that lies on the canvas
    for y in (cy - r).max(0)..=(cy + r).min(height - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(width - 1) {
            let (dx, dy) = (i128::from(x - cx), i128::from(y - cy));
            if dx * dx + dy * dy <= r_squared {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Encode **image** and write it to **path**. The format is derived from the file extension.
pub fn save(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref())?;
    log::info!("wrote {}x{} image to {}", image.width(), image.height(), path.as_ref().display());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RenderConfig {
        RenderConfig { width: 100, height: 50, ..RenderConfig::default() }
    }

    #[test]
    fn background_only() {
        let image = Renderer::new(small_config()).render::<f64>(&[], &[], &Assignment::empty(0, 0)).unwrap();
        assert_eq!(image.dimensions(), (100, 50));
        assert!(image.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn points_and_centroids() {
        let config = small_config();
        let points = vec![Point::new(0.1f64, 0.2), Point::new(0.899, 0.5), Point::new(0.5, 0.9)];
        let centroids = vec![Point::new(0.1, 0.2), Point::new(0.7, 0.7)];
        let assignment = Assignment::from_labels(&[Some(0), Some(1), Some(1)], 2);
        let image = Renderer::new(config.clone()).render(&points, &centroids, &assignment).unwrap();

        // truncation: 0.899 * 100 -> 89, 0.5 * 50 -> 25
        assert_eq!(*image.get_pixel(89, 25), config.cluster_colors[1]);
        assert_eq!(*image.get_pixel(91, 25), config.cluster_colors[1]);
        assert_eq!(*image.get_pixel(92, 25), config.background_color);
        assert_eq!(*image.get_pixel(50, 45), config.cluster_colors[1]);
        // centroids are drawn above the points
        assert_eq!(*image.get_pixel(10, 10), config.center_point_color);
        assert_eq!(*image.get_pixel(14, 10), config.center_point_color);
        assert_eq!(*image.get_pixel(70, 35), config.center_point_color);
        // corners of the bounding box are outside of the disc
        assert_eq!(*image.get_pixel(74, 39), config.background_color);
    }

    #[test]
    fn palette_cycles() {
        let config = small_config();
        let points = vec![Point::new(0.5f32, 0.5)];
        let centroids = vec![Point::new(0.0, 0.0); 5];
        let assignment = Assignment::from_labels(&[Some(4)], 5);
        let image = Renderer::new(config.clone()).render(&points, &centroids, &assignment).unwrap();
        assert_eq!(*image.get_pixel(50, 25), config.cluster_colors[4 % 3]);
    }

    #[test]
    fn markers_are_clipped() {
        let config = small_config();
        let points = vec![Point::new(0.0f64, 0.0), Point::new(0.999, 0.999), Point::new(-3.0, 7.0)];
        let centroids = vec![Point::new(1.0, 1.0)];
        let assignment = Assignment::from_labels(&[Some(0), Some(0), Some(0)], 1);
        let image = Renderer::new(config.clone()).render(&points, &centroids, &assignment).unwrap();
        assert_eq!(*image.get_pixel(0, 0), config.cluster_colors[0]);
        assert_eq!(*image.get_pixel(99, 49), config.center_point_color);
    }

    #[test]
    fn oversized_markers_cover_the_canvas() {
        let config = RenderConfig { cluster_point_radius: u32::MAX, ..small_config() };
        let points = vec![Point::new(0.5f64, 0.5)];
        let centroids = vec![Point::new(5.0, 5.0)];
        let assignment = Assignment::from_labels(&[Some(0)], 1);
        let image = Renderer::new(config.clone()).render(&points, &centroids, &assignment).unwrap();
        assert!(image.pixels().all(|p| *p == config.cluster_colors[0]));

        let config = RenderConfig { center_point_radius: u32::MAX, ..small_config() };
        let image = Renderer::new(config.clone()).render(&points, &[Point::new(0.5, 0.5)], &assignment).unwrap();
        assert!(image.pixels().all(|p| *p == config.center_point_color));
    }

    #[test]
    fn unassigned_point_is_rejected() {
        let points = vec![Point::new(0.1f64, 0.1), Point::new(0.2, 0.2)];
        let centroids = vec![Point::new(0.1, 0.1)];
        let assignment = Assignment::from_labels(&[Some(0), None], 1);
        let res = Renderer::default().render(&points, &centroids, &assignment);
        assert!(matches!(res, Err(Error::UnassignedPoint { index: 1 })));
    }

    #[test]
    fn non_finite_centroid_is_rejected() {
        let points = vec![Point::new(0.1f64, 0.1)];
        let centroids = vec![Point::new(0.1, 0.1), Point::new(f64::NAN, f64::NAN)];
        let assignment = Assignment::from_labels(&[Some(0)], 2);
        let res = Renderer::default().render(&points, &centroids, &assignment);
        assert!(matches!(res, Err(Error::NonFiniteCentroid { index: 1 })));
    }

    #[test]
    fn mismatching_inputs_are_rejected() {
        let points = vec![Point::new(0.1f64, 0.1)];
        let centroids = vec![Point::new(0.1, 0.1)];
        let res = Renderer::default().render(&points, &centroids, &Assignment::empty(2, 1));
        assert!(matches!(res, Err(Error::DimensionMismatch { expected: 1, found: 2 })));
        let res = Renderer::default().render(&points, &centroids, &Assignment::from_labels(&[Some(0)], 3));
        assert!(matches!(res, Err(Error::DimensionMismatch { expected: 1, found: 3 })));
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::new(4, 4);
        let res = save(&image, dir.path().join("missing").join("output.png"));
        assert!(matches!(res, Err(Error::RenderFailure(_))));
        save(&image, dir.path().join("output.png")).unwrap();
        assert!(dir.path().join("output.png").exists());
    }
}
