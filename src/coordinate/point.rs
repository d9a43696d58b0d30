//! Point structure for pixel coordinates

/// Offsets of the eight neighbours of a pixel
#[rustfmt::skip]
static NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// A pixel position, (0,0) being the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }

    /// The 8-connected neighbours of this point that lie inside a
    /// `width` x `height` grid
    pub fn neighbors(self, width: u32, height: u32) -> impl Iterator<Item = Point> {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = self.x as i64 + dx;
            let ny = self.y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                None
            } else {
                Some(Point::new(nx as u32, ny as u32))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_point_has_eight_neighbors() {
        assert_eq!(Point::new(5, 5).neighbors(10, 10).count(), 8);
    }

    #[test]
    fn test_corner_neighbors_are_clipped() {
        let neighbors: Vec<Point> = Point::new(0, 0).neighbors(10, 10).collect();
        assert_eq!(neighbors, vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]);

        assert_eq!(Point::new(9, 9).neighbors(10, 10).count(), 3);
        assert_eq!(Point::new(0, 0).neighbors(1, 1).count(), 0);
    }
}
