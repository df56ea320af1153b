use serde::{Deserialize, Serialize};

/// One photo of a home tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }
}

/// Cursor over a virtual tour. Navigation wraps at both ends.
///
/// An empty gallery has no current image and ignores navigation.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<GalleryImage>,
    current: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<GalleryImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub alt: String,
    pub selected: bool,
}

impl Gallery {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        Self { images, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.images.get(self.current)
    }

    pub fn next(&mut self) -> Option<&GalleryImage> {
        if !self.images.is_empty() {
            self.current = (self.current + 1) % self.images.len();
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&GalleryImage> {
        if !self.images.is_empty() {
            let len = self.images.len();
            self.current = (self.current + len - 1) % len;
        }
        self.current()
    }

    /// Jumps to a thumbnail. Out-of-range indexes leave the cursor alone.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// "Image i of n", or nothing for an empty gallery.
    pub fn position_label(&self) -> Option<String> {
        (!self.images.is_empty())
            .then(|| format!("Image {} of {}", self.current + 1, self.images.len()))
    }

    pub fn view(&self, home_name: &str) -> GalleryView {
        GalleryView {
            title: format!("{home_name} Virtual Tour"),
            image: self.current().cloned(),
            position: self.position_label(),
            thumbnails: self
                .images
                .iter()
                .enumerate()
                .map(|(index, image)| Thumbnail {
                    url: image.url.clone(),
                    alt: format!("Thumbnail {}", index + 1),
                    selected: index == self.current,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour() -> Gallery {
        Gallery::new(vec![
            GalleryImage::new("/homes/maple/porch.jpg", "Front porch"),
            GalleryImage::new("/homes/maple/kitchen.jpg", "Shared kitchen"),
            GalleryImage::new("/homes/maple/garden.jpg", "Garden"),
        ])
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let mut gallery = tour();
        assert_eq!(
            gallery.previous().map(|image| image.caption.as_str()),
            Some("Garden")
        );
        assert_eq!(gallery.index(), 2);
        assert_eq!(
            gallery.next().map(|image| image.caption.as_str()),
            Some("Front porch")
        );
        gallery.next();
        assert_eq!(gallery.position_label().as_deref(), Some("Image 2 of 3"));
    }

    #[test]
    fn select_ignores_out_of_range_thumbnails() {
        let mut gallery = tour();
        assert!(gallery.select(2));
        assert!(!gallery.select(3));
        assert_eq!(gallery.index(), 2);

        let view = gallery.view("Maple House");
        assert_eq!(view.title, "Maple House Virtual Tour");
        assert_eq!(view.thumbnails.len(), 3);
        assert!(view.thumbnails[2].selected);
        assert_eq!(view.thumbnails[0].alt, "Thumbnail 1");
    }

    #[test]
    fn empty_gallery_has_nothing_to_show() {
        let mut gallery = Gallery::new(Vec::new());
        assert_eq!(gallery.next(), None);
        assert_eq!(gallery.previous(), None);
        assert!(!gallery.select(0));
        assert_eq!(gallery.position_label(), None);

        let view = gallery.view("Cedar House");
        assert!(view.image.is_none());
        assert!(view.thumbnails.is_empty());
    }
}
