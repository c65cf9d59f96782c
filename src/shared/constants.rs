/// Maximum accepted image upload size in bytes (10 MiB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Image extensions accepted for design submissions
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Display name recorded when a submitter leaves the username blank
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// Default number of designs returned by the top-designs query
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Category name shown when a design's category_id no longer resolves
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Categories seeded at first boot (insert-or-ignore, safe to re-run)
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "T-Shirts",
    "Hoodies",
    "Sticker",
    "Poster",
    "Tassen",
    "Sonstiges",
];
