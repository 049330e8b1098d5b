//! Gallery display rules: trim, drop unusable entries, newest first, and a
//! fixed local set when nothing usable remains.

use crate::models::{GalleryItem, Id};

/// Shown when an image fails to load. Also the first default item.
pub const FALLBACK_IMAGE_URL: &str = "/assets/generated/ncrl-gallery-01.dim_1600x1066.png";

const ALLOWED_PREFIXES: [&str; 4] = ["http://", "https://", "/", "data:image/"];

/// Trimmed copy of `item`.
pub fn normalize(item: &GalleryItem) -> GalleryItem {
    GalleryItem {
        id: item.id,
        title: item.title.trim().to_string(),
        description: item.description.trim().to_string(),
        image_url: item.image_url.trim().to_string(),
    }
}

/// Whether an image reference has a scheme the site can render.
pub fn is_allowed_image_url(url: &str) -> bool {
    let url = url.trim();
    ALLOWED_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

pub fn is_valid(item: &GalleryItem) -> bool {
    !item.title.trim().is_empty() && is_allowed_image_url(&item.image_url)
}

/// Normalize, keep the valid items, highest id first.
///
/// Items are trimmed before validation, so whitespace-only titles are dropped.
pub fn process(items: &[GalleryItem]) -> Vec<GalleryItem> {
    let mut processed: Vec<GalleryItem> = items
        .iter()
        .map(normalize)
        .filter(is_valid)
        .collect();
    processed.sort_by(|a, b| b.id.cmp(&a.id));
    processed
}

/// [`process`] the remote list, or the defaults when that leaves nothing.
pub fn with_fallback(items: Option<&[GalleryItem]>) -> Vec<GalleryItem> {
    let processed = items.map(process).unwrap_or_default();
    if processed.is_empty() {
        default_items()
    } else {
        processed
    }
}

pub fn default_items() -> Vec<GalleryItem> {
    const DEFAULTS: [(Id, &str, &str); 6] = [
        (1, "Community Garden", "A beautiful view of our community garden in full bloom."),
        (2, "Annual Picnic", "Family members enjoying games and food at the annual picnic."),
        (3, "Welfare Drive", "Volunteers organizing donated goods for local families."),
        (4, "Cultural Night", "A snapshot of performances during Cultural Night celebrations."),
        (5, "Clean-Up Day", "Residents participating in neighborhood clean-up efforts."),
        (6, "Community Gathering", "Neighbors coming together for a community event."),
    ];
    DEFAULTS
        .iter()
        .map(|(id, title, description)| GalleryItem {
            id: *id,
            title: title.to_string(),
            description: description.to_string(),
            image_url: format!("/assets/generated/ncrl-gallery-{id:02}.dim_1600x1066.png"),
        })
        .collect()
}

/// Source to swap to after `current` failed to load, at most once.
pub fn fallback_source(current: &str, already_swapped: bool) -> Option<&'static str> {
    if already_swapped || current == FALLBACK_IMAGE_URL {
        None
    } else {
        Some(FALLBACK_IMAGE_URL)
    }
}

/// Lightbox navigation, wrapping at both ends.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: Id, title: &str, url: &str) -> GalleryItem {
        GalleryItem {
            id,
            title: title.to_string(),
            description: "  caption  ".to_string(),
            image_url: url.to_string(),
        }
    }

    #[test]
    fn test_invalid_urls_are_excluded() {
        let items = vec![
            item(1, "ftp", "ftp://example.org/a.png"),
            item(2, "relative", "images/a.png"),
            item(3, "data", "data:image/png;base64,AAAA"),
            item(4, "site", "/assets/a.png"),
            item(5, "", "https://example.org/a.png"),
            item(6, "web", " https://example.org/b.png "),
        ];
        let ids: Vec<Id> = process(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, [6, 4, 3]);
    }

    #[test]
    fn test_sorted_by_id_descending() {
        let items = vec![
            item(2, "b", "/b.png"),
            item(9, "c", "/c.png"),
            item(5, "a", "/a.png"),
        ];
        let ids: Vec<Id> = process(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, [9, 5, 2]);
    }

    #[test]
    fn test_fallback_to_defaults() {
        assert_eq!(with_fallback(None).len(), 6);
        assert_eq!(with_fallback(Some(&[])).len(), 6);
        let junk = [item(1, "x", "javascript:alert(1)")];
        let defaults = with_fallback(Some(&junk));
        assert_eq!(defaults, default_items());
        assert_eq!(defaults[0].image_url, FALLBACK_IMAGE_URL);
        assert_eq!(defaults[5].title, "Community Gathering");

        let real = [item(7, "Holi", "https://example.org/holi.jpg")];
        assert_eq!(with_fallback(Some(&real)).len(), 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = item(1, "  Picnic  ", "  /p.png ");
        let once = normalize(&raw);
        assert_eq!(normalize(&once), once);
        assert_eq!(once.title, "Picnic");
        assert_eq!(once.description, "caption");
    }

    #[test]
    fn test_fallback_swaps_once() {
        assert_eq!(fallback_source("/broken.png", false), Some(FALLBACK_IMAGE_URL));
        assert_eq!(fallback_source("/broken.png", true), None);
        assert_eq!(fallback_source(FALLBACK_IMAGE_URL, false), None);
    }

    #[test]
    fn test_lightbox_wraps() {
        assert_eq!(next_index(5, 6), 0);
        assert_eq!(previous_index(0, 6), 5);
        assert_eq!(next_index(0, 0), 0);
    }
}
