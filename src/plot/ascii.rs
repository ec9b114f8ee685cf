//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - sample points: `o`
//! - fitted curve / interpolant: `-` line
//! - optional highlighted point (interpolation query): `X`

use crate::domain::{FitResult, Point};
use crate::models::predict;

/// Render sample points and a fitted regression curve.
pub fn render_fit_plot(points: &[Point], fit: &FitResult, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(points).unwrap_or((0.0, 1.0));
    let curve = sample_curve(x_min, x_max, width.max(2), |x| predict(fit.kind, &fit.coefficients, x));
    render_plot(points, &curve, None, x_min, x_max, width, height)
}

/// Render sample points, an already-sampled curve, and an optional highlighted point.
pub fn render_curve_plot(
    points: &[Point],
    curve: &[(f64, f64)],
    highlight: Option<(f64, f64)>,
    width: usize,
    height: usize,
) -> String {
    let (mut x_min, mut x_max) = x_range(points).unwrap_or((0.0, 1.0));
    if let Some((hx, _)) = highlight {
        x_min = x_min.min(hx);
        x_max = x_max.max(hx);
    }
    render_plot(points, curve, highlight, x_min, x_max, width, height)
}

/// `n` equally spaced abscissas covering `[x_min, x_max]`.
pub fn grid_xs(x_min: f64, x_max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| x_min + (i as f64 / (n as f64 - 1.0)) * (x_max - x_min))
        .collect()
}

fn render_plot(
    points: &[Point],
    curve: &[(f64, f64)],
    highlight: Option<(f64, f64)>,
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, curve, highlight).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    for p in points {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }
    if let Some((hx, hy)) = highlight.filter(|(_, hy)| hy.is_finite()) {
        grid[map_y(hy, y_min, y_max, height)][map_x(hx, x_min, x_max, width)] = 'X';
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(points: &[Point]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_curve(x_min: f64, x_max: f64, n: usize, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    grid_xs(x_min, x_max, n).into_iter().map(|x| (x, f(x))).collect()
}

fn y_range(points: &[Point], curve: &[(f64, f64)], highlight: Option<(f64, f64)>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let ys = points
        .iter()
        .map(|p| p.y)
        .chain(curve.iter().map(|&(_, y)| y))
        .chain(highlight.map(|(_, y)| y))
        .filter(|y| y.is_finite());
    for y in ys {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, '-');
        } else {
            grid[yy][xx] = '-';
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

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
