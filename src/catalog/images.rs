//! Product image resolution

use super::fallback::mock_image_url;

/// Remote storage every non-mock thumbnail is served from.
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://admin.refabry.com/storage/product/";

/// Rendering size of a product image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Grid cards and the detail page (300px).
    Card,
    /// Cart drawer line thumbnails (80px).
    Thumbnail,
}

impl ImageSize {
    fn pixels(self) -> u32 {
        match self {
            ImageSize::Card => 300,
            ImageSize::Thumbnail => 80,
        }
    }
}

/// Turns product thumbnails into displayable image URLs.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    storage_base_url: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_BASE_URL)
    }
}

impl ImageResolver {
    pub fn new(storage_base_url: impl Into<String>) -> Self {
        Self {
            storage_base_url: storage_base_url.into(),
        }
    }

    /// Resolves a thumbnail reference for the given size.
    ///
    /// * Known `mock-` thumbnails map to their placeholder image.
    /// * Any other thumbnail is appended to the storage base URL.
    /// * A missing or empty thumbnail yields the generic placeholder.
    pub fn resolve(&self, thumbnail: Option<&str>, size: ImageSize) -> String {
        let Some(thumbnail) = thumbnail.filter(|t| !t.is_empty()) else {
            let px = size.pixels();
            return format!("/placeholder.svg?height={px}&width={px}");
        };

        match mock_image_url(thumbnail) {
            Some(url) => url.replace("300", &size.pixels().to_string()),
            None => format!("{}{}", self.storage_base_url, thumbnail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_mock_thumbnail() {
        let resolver = ImageResolver::default();

        assert_eq!(
            resolver.resolve(Some("mock-tshirt.jpg"), ImageSize::Card),
            "/placeholder.svg?height=300&width=300&text=T-Shirt"
        );
        assert_eq!(
            resolver.resolve(Some("mock-tshirt.jpg"), ImageSize::Thumbnail),
            "/placeholder.svg?height=80&width=80&text=T-Shirt"
        );
    }

    #[test]
    fn test_resolve_remote_thumbnail() {
        let resolver = ImageResolver::new("https://cdn.example.com/p/");

        assert_eq!(
            resolver.resolve(Some("jacket-01.webp"), ImageSize::Card),
            "https://cdn.example.com/p/jacket-01.webp"
        );
        // Unknown mock names are treated as remote files.
        assert_eq!(
            resolver.resolve(Some("mock-missing.jpg"), ImageSize::Thumbnail),
            "https://cdn.example.com/p/mock-missing.jpg"
        );
    }

    #[test]
    fn test_resolve_missing_thumbnail() {
        let resolver = ImageResolver::default();

        assert_eq!(
            resolver.resolve(None, ImageSize::Card),
            "/placeholder.svg?height=300&width=300"
        );
        assert_eq!(
            resolver.resolve(Some(""), ImageSize::Thumbnail),
            "/placeholder.svg?height=80&width=80"
        );
    }
}
