use dioxus::html::geometry::WheelDelta;
use eot_shared::geometry::Point;

/// Pure function: convert client coordinates to SVG view-box coordinates.
///
/// The SVG renders with `width:100%; height:auto`, so both axes share the
/// scale factor `view_width / rect_width`.
pub fn client_to_view(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    view_width: f64,
) -> Option<Point> {
    if rect_width <= 0.0 {
        return None;
    }
    let scale = view_width / rect_width;
    Some(Point::new(
        (client_x - rect_left) * scale,
        (client_y - rect_top) * scale,
    ))
}

/// Client-pixel distance expressed in view-box units.
pub fn client_delta_to_view(dx: f64, dy: f64, rect_width: f64, view_width: f64) -> (f64, f64) {
    if rect_width <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = view_width / rect_width;
    (dx * scale, dy * scale)
}

/// Bounding rect of an element by id.
pub fn element_rect(id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    Some(element.get_bounding_client_rect())
}

/// Get view-box coordinates of a client point over the element `svg_id`.
pub fn client_to_view_in(client_x: f64, client_y: f64, svg_id: &str, view_width: f64) -> Option<Point> {
    let rect = element_rect(svg_id)?;
    client_to_view(client_x, client_y, rect.left(), rect.top(), rect.width(), view_width)
}

/// Base-2 exponent a wheel event applies to the zoom scale.
/// Scrolling up (negative delta) zooms in.
pub fn wheel_scale_exponent(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => -d.y * 0.002,
        WheelDelta::Lines(d) => -d.y * 0.05,
        WheelDelta::Pages(d) => -d.y,
    }
}

/// New zoom scale after a wheel step, clamped to the zoom extent.
pub fn wheel_zoom(k: f64, exponent: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    (k * exponent.exp2()).clamp(min_zoom, max_zoom)
}

/// Inner width of the browser window, used to place tooltips.
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Distance between two client-coordinate points (touch thresholds, pinch).
pub fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_view_origin() {
        let p = client_to_view(100.0, 200.0, 100.0, 200.0, 520.0, 520.0).unwrap();
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_view_scaled_down_svg() {
        // SVG rendered at half size: 260px wide for a 520-unit view box.
        let p = client_to_view(140.0, 160.0, 10.0, 10.0, 260.0, 520.0).unwrap();
        assert!((p.x - 260.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_view_invalid_rect() {
        assert!(client_to_view(1.0, 1.0, 0.0, 0.0, 0.0, 520.0).is_none());
    }

    #[test]
    fn test_client_delta_to_view() {
        let (dx, dy) = client_delta_to_view(10.0, -4.0, 1040.0, 520.0);
        assert!((dx - 5.0).abs() < 1e-9);
        assert!((dy + 2.0).abs() < 1e-9);
        assert_eq!(client_delta_to_view(10.0, 10.0, 0.0, 520.0), (0.0, 0.0));
    }

    #[test]
    fn test_wheel_zoom_doubles_per_unit_exponent() {
        assert!((wheel_zoom(2.0, 1.0, 1.0, 8.0) - 4.0).abs() < 1e-9);
        assert!((wheel_zoom(2.0, -1.0, 1.0, 8.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_clamps() {
        assert_eq!(wheel_zoom(7.0, 3.0, 1.0, 8.0), 8.0);
        assert_eq!(wheel_zoom(1.0, -0.5, 1.0, 8.0), 1.0);
    }

    #[test]
    fn test_point_distance() {
        assert!((point_distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
