use serde::{Deserialize, Serialize};

/// One candidate image returned by the search API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub link: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}
