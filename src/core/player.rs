//! Side identification and per-side data storage.
//!
//! ## Color
//!
//! The two competing sides of a match, conventionally red and blue.
//!
//! ## ColorMap
//!
//! Fixed two-slot storage indexed by `Color` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Owning side of a board card or a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The red side.
    Red,
    /// The blue side.
    Blue,
}

impl Color {
    /// Both colors, red first.
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    /// Get the opposing color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Get the slot index (red = 0, blue = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_triad::core::{Color, ColorMap};
///
/// let mut scores: ColorMap<u32> = ColorMap::with_value(0);
/// scores[Color::Blue] += 2;
///
/// assert_eq!(scores[Color::Red], 0);
/// assert_eq!(scores[Color::Blue], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: [factory(Color::Red), factory(Color::Blue)],
        }
    }

    /// Create a new ColorMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Borrow both entries mutably, the given color first.
    pub fn pair_mut(&mut self, first: Color) -> (&mut T, &mut T) {
        let [red, blue] = &mut self.data;
        match first {
            Color::Red => (red, blue),
            Color::Blue => (blue, red),
        }
    }

    /// Iterate over (Color, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Color, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Color::Red.opponent(), Color::Blue);
        assert_eq!(Color::Blue.opponent(), Color::Red);
        assert_eq!(format!("{}", Color::Red), "red");
    }

    #[test]
    fn test_color_map_new() {
        let map: ColorMap<usize> = ColorMap::new(|c| c.index() * 10);

        assert_eq!(map[Color::Red], 0);
        assert_eq!(map[Color::Blue], 10);
    }

    #[test]
    fn test_color_map_pair_mut() {
        let mut map: ColorMap<i32> = ColorMap::with_value(5);

        let (blue, red) = map.pair_mut(Color::Blue);
        *blue += 1;
        *red -= 1;

        assert_eq!(map[Color::Blue], 6);
        assert_eq!(map[Color::Red], 4);
    }

    #[test]
    fn test_color_map_iter() {
        let map: ColorMap<i32> = ColorMap::new(|c| c.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Color::Red, &0), (Color::Blue, &1)]);
    }

    #[test]
    fn test_color_serialization() {
        let json = serde_json::to_string(&Color::Blue).unwrap();
        assert_eq!(json, "\"blue\"");

        let map: ColorMap<u32> = ColorMap::new(|c| c.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: ColorMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
