//! Product image gallery: ordered images plus a viewing cursor.
//!
//! The first image is the product's primary image. The cursor follows the
//! image it points at when images are moved, so reordering never changes
//! what the viewer is looking at.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
}

impl Gallery {
    #[must_use]
    pub fn new(images: Vec<String>) -> Self {
        Self { images, current: 0 }
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn into_images(self) -> Vec<String> {
        self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (!self.images.is_empty()).then_some(self.current)
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Advance, wrapping from the last image to the first.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + 1) % self.images.len();
        }
    }

    /// Step back, wrapping from the first image to the last.
    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.current = self.current.checked_sub(1).unwrap_or(self.images.len() - 1);
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Move the image at `from` to position `to`. Returns false if either
    /// index is out of range.
    pub fn move_image(&mut self, from: usize, to: usize) -> bool {
        let len = self.images.len();
        if from >= len || to >= len {
            return false;
        }
        let image = self.images.remove(from);
        self.images.insert(to, image);

        self.current = if self.current == from {
            to
        } else if from < self.current && self.current <= to {
            self.current - 1
        } else if to <= self.current && self.current < from {
            self.current + 1
        } else {
            self.current
        };
        true
    }

    /// Make the image at `index` the primary (first) image.
    pub fn set_primary(&mut self, index: usize) -> bool {
        self.move_image(index, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()])
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut g = gallery();
        g.prev();
        assert_eq!(g.current(), Some("c.jpg"));
        g.next();
        assert_eq!(g.current(), Some("a.jpg"));
        g.next();
        assert_eq!(g.current_index(), Some(1));
    }

    #[test]
    fn empty_gallery_is_inert() {
        let mut g = Gallery::default();
        g.next();
        g.prev();
        assert_eq!(g.current(), None);
        assert_eq!(g.current_index(), None);
        assert!(!g.select(0));
        assert!(!g.set_primary(0));
    }

    #[test]
    fn move_keeps_cursor_on_same_image() {
        let mut g = gallery();
        assert!(g.select(1));
        assert!(g.move_image(0, 2));
        assert_eq!(g.images(), &["b.jpg", "c.jpg", "a.jpg"]);
        assert_eq!(g.current(), Some("b.jpg"));

        assert!(g.move_image(2, 0));
        assert_eq!(g.current(), Some("b.jpg"));
    }

    #[test]
    fn set_primary_moves_to_front() {
        let mut g = gallery();
        assert!(g.set_primary(2));
        assert_eq!(g.images(), &["c.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(g.current(), Some("a.jpg"));
        assert!(!g.set_primary(3));
    }
}
