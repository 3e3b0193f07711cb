use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw connected segments; `closed` joins the last point back to the first
pub fn draw_path(canvas: &mut BrailleCanvas, points: &[(f64, f64)], closed: bool) {
    if points.len() < 2 {
        return;
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(canvas, x0.round() as i32, y0.round() as i32, x1.round() as i32, y1.round() as i32);
    }

    if closed {
        let (x0, y0) = points[points.len() - 1];
        let (x1, y1) = points[0];
        draw_line(canvas, x0.round() as i32, y0.round() as i32, x1.round() as i32, y1.round() as i32);
    }
}

/// Scanline fill with the even-odd rule. Each pixel row is sampled at its
/// vertical center; spans cover pixels whose centers lie inside.
pub fn fill_polygon(canvas: &mut BrailleCanvas, points: &[(f64, f64)]) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let first_row = min_y.floor().max(0.0) as i32;
    let last_row = max_y.ceil().min(canvas.pixel_height() as f64) as i32;

    let max_x = canvas.pixel_width() as i32 - 1;

    let mut crossings: Vec<f64> = Vec::with_capacity(16);
    for row in first_row..last_row {
        let sample_y = row as f64 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            // Half-open test so shared vertices count once
            if (y0 <= sample_y && sample_y < y1) || (y1 <= sample_y && sample_y < y0) {
                let t = (sample_y - y0) / (y1 - y0);
                crossings.push(x0 + t * (x1 - x0));
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let start = ((span[0] - 0.5).ceil() as i32).max(0);
            let end = ((span[1] - 0.5).floor() as i32).min(max_x);
            for x in start..=end {
                canvas.set_pixel_signed(x, row);
            }
        }
    }
}

/// Fill an axis-aligned rectangle (corners in view pixels)
pub fn fill_rect(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let max_x = canvas.pixel_width() as i32 - 1;
    let max_y = canvas.pixel_height() as i32 - 1;
    for y in y0.min(y1).max(0)..=y0.max(y1).min(max_y) {
        for x in x0.min(x1).max(0)..=x0.max(x1).min(max_x) {
            canvas.set_pixel_signed(x, y);
        }
    }
}

/// Outline an axis-aligned rectangle (corners in view pixels)
pub fn draw_rect(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_line(canvas, x0, y0, x1, y0);
    draw_line(canvas, x1, y0, x1, y1);
    draw_line(canvas, x1, y1, x0, y1);
    draw_line(canvas, x0, y1, x0, y0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Top dots of every cell
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_fill_square_covers_cell() {
        let mut canvas = BrailleCanvas::new(2, 2);
        fill_polygon(&mut canvas, &[(0.0, 0.0), (2.0, 0.0), (2.0, 4.0), (0.0, 4.0)]);
        assert_eq!(canvas.to_string(), "⣿⠀\n⠀⠀");
    }

    #[test]
    fn test_fill_even_odd_leaves_hole() {
        // Outer ring and inner ring traced as one path
        let mut canvas = BrailleCanvas::new(3, 3);
        let ring = [
            (0.0, 0.0), (6.0, 0.0), (6.0, 12.0), (0.0, 12.0), (0.0, 0.0),
            (2.0, 4.0), (2.0, 8.0), (4.0, 8.0), (4.0, 4.0), (2.0, 4.0),
        ];
        fill_polygon(&mut canvas, &ring);
        assert_eq!(canvas.cell(0, 0), 0xFF);
        assert_eq!(canvas.cell(1, 1), 0);
    }

    #[test]
    fn test_closed_path_returns_to_start() {
        let mut open = BrailleCanvas::new(3, 1);
        let mut closed = BrailleCanvas::new(3, 1);
        let pts = [(0.0, 0.0), (5.0, 0.0), (5.0, 3.0)];
        draw_path(&mut open, &pts, false);
        draw_path(&mut closed, &pts, true);
        // Pixel (1, 1) lies on the closing diagonal only
        assert_eq!(open.cell(0, 0) & 0x10, 0);
        assert_ne!(closed.cell(0, 0) & 0x10, 0);
    }

    #[test]
    fn test_rect_outline_and_fill() {
        let mut outline = BrailleCanvas::new(2, 2);
        let mut filled = BrailleCanvas::new(2, 2);
        draw_rect(&mut outline, 0, 0, 3, 7);
        fill_rect(&mut filled, 0, 0, 3, 7);
        assert_eq!(filled.to_string(), "⣿⣿\n⣿⣿");
        // Interior dots stay clear on the outline
        assert_eq!(outline.cell(0, 0) & 0x10, 0);
    }
}
