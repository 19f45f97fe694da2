//! Rendered icon images.
//!
//! [`IconImage`] pairs a rasterized icon with the size it was drawn at;
//! [`IconSet`] groups the renders of one generator run.

use image::RgbaImage;

/// A single rendered icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The requested icon size in pixels.
    pub size: u32,

    /// The image data in straight-alpha RGBA format.
    pub data: RgbaImage,
}

impl IconImage {
    pub fn new(size: u32, data: RgbaImage) -> Self {
        Self { size, data }
    }

    /// Returns the pixel dimensions of the image as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }
}

/// The icons rendered for every configured size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    /// The individual icons, in generation order.
    pub images: Vec<IconImage>,
}

impl IconSet {
    /// Creates a new empty icon set.
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    pub fn from_images(images: Vec<IconImage>) -> Self {
        Self { images }
    }

    pub fn add_image(&mut self, image: IconImage) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns the icon rendered at exactly `size`, if any.
    pub fn get(&self, size: u32) -> Option<&IconImage> {
        self.images.iter().find(|img| img.size == size)
    }

    /// Finds the icon whose size is closest to `target_size`.
    ///
    /// Ties go to the icon listed first.
    pub fn find_closest(&self, target_size: u32) -> Option<&IconImage> {
        self.images
            .iter()
            .min_by_key(|img| img.size.abs_diff(target_size))
    }

    /// The sizes present in this set, in generation order.
    pub fn sizes(&self) -> Vec<u32> {
        self.images.iter().map(|img| img.size).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl IntoIterator for IconSet {
    type Item = IconImage;
    type IntoIter = std::vec::IntoIter<IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
