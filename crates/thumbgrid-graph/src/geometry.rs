use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in widget-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a new rectangle from min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a new rectangle from position and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: Vec2::new(pos.x + size.x, pos.y + size.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.min.x + self.width() * 0.5,
            self.min.y + self.height() * 0.5,
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Return a new rectangle shrunk by `amount` on all sides
    pub fn shrink(&self, amount: f32) -> Rect {
        Rect {
            min: Vec2::new(self.min.x + amount, self.min.y + amount),
            max: Vec2::new(self.max.x - amount, self.max.y - amount),
        }
    }

    /// Largest rectangle with the aspect ratio `width:height` that fits
    /// inside `self`, centered.
    pub fn fit(&self, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }
        let scale = (self.width() / width as f32).min(self.height() / height as f32);
        let size = Vec2::new(width as f32 * scale, height as f32 * scale);
        let center = self.center();
        Some(Rect::from_pos_size(
            Vec2::new(center.x - size.x * 0.5, center.y - size.y * 0.5),
            size,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::from_pos_size(Vec2::new(10.0, 10.0), Vec2::new(16.0, 16.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(26.0, 26.0)));
        assert!(!rect.contains(Vec2::new(26.1, 20.0)));
    }

    #[test]
    fn test_fit_wide_image() {
        let cell = Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(76.0, 76.0));
        let fitted = cell.fit(200, 100).unwrap();
        assert!(approx(fitted.width(), 76.0));
        assert!(approx(fitted.height(), 38.0));
        assert!(approx(fitted.min.y, 19.0));
    }

    #[test]
    fn test_fit_tall_image() {
        let cell = Rect::from_pos_size(Vec2::new(4.0, 4.0), Vec2::new(76.0, 76.0));
        let fitted = cell.fit(50, 100).unwrap();
        assert!(approx(fitted.height(), 76.0));
        assert!(approx(fitted.width(), 38.0));
        assert!(approx(fitted.center().x, cell.center().x));
    }

    #[test]
    fn test_fit_rejects_empty_image() {
        let cell = Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(76.0, 76.0));
        assert_eq!(cell.fit(0, 10), None);
    }
}
