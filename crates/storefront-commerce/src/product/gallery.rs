//! Product gallery selection.

/// Main images and thumbnails, aligned by position.
///
/// Until a thumbnail is chosen the page's own markup decides what is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gallery {
    main_len: usize,
    thumbs_len: usize,
    selected: Option<usize>,
}

impl Gallery {
    pub fn new(main_len: usize, thumbs_len: usize) -> Self {
        Self {
            main_len,
            thumbs_len,
            selected: None,
        }
    }

    /// Select thumbnail `index`. Returns `false` if there is no such
    /// thumbnail.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.thumbs_len {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// The chosen thumbnail, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether main image `index` is shown after a selection. When the
    /// selected thumbnail has no matching main image, none are shown.
    pub fn is_main_visible(&self, index: usize) -> bool {
        self.selected == Some(index) && index < self.main_len
    }

    pub fn is_thumb_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn main_len(&self) -> usize {
        self.main_len
    }

    pub fn thumbs_len(&self) -> usize {
        self.thumbs_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_shows_matching_main_image() {
        let mut gallery = Gallery::new(3, 3);
        assert!(gallery.select(2));
        assert!(gallery.is_main_visible(2));
        assert!(!gallery.is_main_visible(0));
        assert!(gallery.is_thumb_selected(2));
    }

    #[test]
    fn test_thumb_without_main_image_hides_all() {
        let mut gallery = Gallery::new(2, 4);
        assert!(gallery.select(3));
        assert!((0..2).all(|i| !gallery.is_main_visible(i)));
    }

    #[test]
    fn test_unknown_thumb_ignored() {
        let mut gallery = Gallery::new(2, 2);
        assert!(!gallery.select(5));
        assert_eq!(gallery.selected(), None);
    }
}
