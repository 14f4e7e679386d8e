use crate::search::models::ImageItem;
use serde::Deserialize;

/// The subset of the Custom Search JSON API response we rely on.
#[derive(Debug, Deserialize)]
pub struct CustomSearchResponse {
    /// Absent when the query has no hits.
    #[serde(default)]
    pub items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct CustomSearchItem {
    pub link: String,
    #[serde(default)]
    pub mime: String,
    pub image: CustomSearchImage,
}

#[derive(Debug, Deserialize)]
pub struct CustomSearchImage {
    pub width: u32,
    pub height: u32,
}

impl From<CustomSearchItem> for ImageItem {
    fn from(item: CustomSearchItem) -> Self {
        ImageItem {
            link: item.link,
            mime: item.mime,
            width: item.image.width,
            height: item.image.height,
        }
    }
}
