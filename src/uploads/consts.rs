pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.jp/400x400.png?text=414";
pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const DEFAULT_BUCKET_NAME: &str = "lgtm-images";
