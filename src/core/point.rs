use std::fmt;

/// A point in craps. Only the box numbers 4, 5, 6, 8, 9, and 10 can
/// ever become a point; everything else is decided on the come-out roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Point(u8);

impl Point {
    pub const FOUR: Point = Point(4);
    pub const FIVE: Point = Point(5);
    pub const SIX: Point = Point(6);
    pub const EIGHT: Point = Point(8);
    pub const NINE: Point = Point(9);
    pub const TEN: Point = Point(10);

    /// Every possible point in ascending order.
    pub const ALL: [Point; 6] = [
        Point::FOUR,
        Point::FIVE,
        Point::SIX,
        Point::EIGHT,
        Point::NINE,
        Point::TEN,
    ];

    /// Returns the point for a dice total, or `None` if the total
    /// can't be a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use craps_sim::core::Point;
    ///
    /// assert_eq!(Some(Point::SIX), Point::from_total(6));
    /// assert_eq!(None, Point::from_total(7));
    /// ```
    pub fn from_total(total: u8) -> Option<Self> {
        match total {
            4 | 5 | 6 | 8 | 9 | 10 => Some(Point(total)),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Does this dice total hit the point.
    pub fn is_hit(&self, total: u8) -> bool {
        self.0 == total
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl TryFrom<u8> for Point {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Point::from_total(value).ok_or_else(|| format!("{value} is not a craps point"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_box_numbers_are_points() {
        let points: Vec<u8> = (2..=12)
            .filter_map(Point::from_total)
            .map(|p| p.value())
            .collect();
        assert_eq!(vec![4, 5, 6, 8, 9, 10], points);
    }

    #[test]
    fn test_all_is_sorted() {
        let mut sorted = Point::ALL;
        sorted.sort();
        assert_eq!(Point::ALL, sorted);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Ok(Point::NINE), Point::try_from(9));
        assert!(Point::try_from(11).is_err());
        assert!(Point::try_from(0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("10", Point::TEN.to_string());
    }
}
