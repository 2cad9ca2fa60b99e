//! Plotters-powered hazard scatter, encoded as PNG.
//!
//! X is the object's position in the dataset, Y its maximum estimated
//! diameter in kilometers. The point series and axis bounds are computed
//! outside the drawing code so they can be tested without decoding pixels.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

use crate::domain::Dataset;
use crate::error::RenderError;

pub const CHART_WIDTH: u32 = 1920;
pub const CHART_HEIGHT: u32 = 512;

/// Marker color (matplotlib "tab:blue").
pub const MARKER_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
const AXIS_COLOR: RGBColor = RGBColor(64, 64, 64);
const MARKER_RADIUS: i32 = 5;
const Y_GRID_LINES: usize = 5;

/// `(index, max diameter km)` for every object, in dataset order.
pub fn scatter_points(dataset: &Dataset) -> Vec<(f64, f64)> {
    dataset
        .objects
        .iter()
        .enumerate()
        .map(|(i, neo)| (i as f64, neo.max_diameter_km()))
        .collect()
}

/// Axis bounds implied by the points.
///
/// X gets half a step of padding on each side so end markers are not clipped;
/// Y runs from zero to the largest diameter plus 10% headroom. An empty
/// series falls back to unit ranges.
pub fn axis_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    if points.is_empty() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    let x_max = (points.len() - 1) as f64;
    let y_max = points
        .iter()
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold(0.0_f64, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    ([-0.5, x_max + 0.5], [0.0, y_top])
}

/// Render the dataset to PNG bytes.
pub fn render_png(dataset: &Dataset) -> Result<Vec<u8>, RenderError> {
    let points = scatter_points(dataset);
    let (x_bounds, y_bounds) = axis_bounds(&points);

    let mut rgb = vec![0u8; CHART_WIDTH as usize * CHART_HEIGHT as usize * 3];
    draw_scatter(&mut rgb, &points, x_bounds, y_bounds)
        .map_err(|e| RenderError::Draw(e.to_string()))?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&rgb, CHART_WIDTH, CHART_HEIGHT, ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(png)
}

fn draw_scatter(
    rgb: &mut [u8],
    points: &[(f64, f64)],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) -> Result<(), Box<dyn std::error::Error>> {
    let [x0, x1] = x_bounds;
    let [y0, y1] = y_bounds;

    let root = BitMapBackend::with_buffer(rgb, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    // No text is drawn anywhere: without a font backend plotters cannot
    // rasterise labels, so the mesh is drawn by hand below.
    let mut chart = ChartBuilder::on(&root)
        .margin(24)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    for i in 1..=Y_GRID_LINES {
        let y = y0 + (y1 - y0) * i as f64 / Y_GRID_LINES as f64;
        chart.draw_series(LineSeries::new([(x0, y), (x1, y)], &GRID_COLOR))?;
    }
    chart.draw_series(LineSeries::new([(x0, y0), (x1, y0)], &AXIS_COLOR))?;
    chart.draw_series(LineSeries::new([(x0, y0), (x0, y1)], &AXIS_COLOR))?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, MARKER_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiameterRange, EstimatedDiameter, NearEarthObject};
    use chrono::NaiveDate;

    fn dataset(diameters: &[f64]) -> Dataset {
        let objects = diameters
            .iter()
            .enumerate()
            .map(|(i, &d)| NearEarthObject {
                name: format!("neo-{i}"),
                is_potentially_hazardous_asteroid: true,
                estimated_diameter: EstimatedDiameter {
                    kilometers: DiameterRange {
                        estimated_diameter_min: d / 2.0,
                        estimated_diameter_max: d,
                    },
                    ..EstimatedDiameter::default()
                },
                ..NearEarthObject::default()
            })
            .collect();
        Dataset::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), objects)
    }

    fn marker_pixels(png: &[u8]) -> usize {
        let img = image::load_from_memory(png).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
        img.pixels()
            .filter(|p| p.0 == [MARKER_COLOR.0, MARKER_COLOR.1, MARKER_COLOR.2])
            .count()
    }

    #[test]
    fn points_use_index_and_max_diameter() {
        let points = scatter_points(&dataset(&[1.2, 3.4, 0.5]));
        assert_eq!(points, vec![(0.0, 1.2), (1.0, 3.4), (2.0, 0.5)]);
    }

    #[test]
    fn x_coordinates_are_consecutive_indices() {
        let n = 17;
        let diameters: Vec<f64> = (0..n).map(|i| (i % 5) as f64 + 0.1).collect();
        let points = scatter_points(&dataset(&diameters));
        assert_eq!(points.len(), n);
        for (i, &(x, _)) in points.iter().enumerate() {
            assert_eq!(x, i as f64);
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = scatter_points(&dataset(&[1.2, 3.4, 0.5]));
        let ([x0, x1], [y0, y1]) = axis_bounds(&points);
        assert!(x0 < 0.0 && x1 > 2.0);
        assert_eq!(y0, 0.0);
        assert!((y1 - 3.74).abs() < 1e-9);

        assert_eq!(axis_bounds(&[]), ([0.0, 1.0], [0.0, 1.0]));
        assert_eq!(axis_bounds(&[(0.0, 0.0)]).1, [0.0, 1.0]);
    }

    #[test]
    fn empty_dataset_renders_blank_png() {
        let png = render_png(&Dataset::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(marker_pixels(&png), 0);
    }

    #[test]
    fn populated_dataset_draws_markers() {
        let png = render_png(&dataset(&[1.2, 3.4, 0.5])).unwrap();
        assert!(marker_pixels(&png) > 0);
    }
}
