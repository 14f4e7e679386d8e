pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
/// Restricts the search to documents written in a particular language.
pub const LANGUAGE_RESTRICTION: &str = "lang_ja";
/// Number of search results per page.
pub const PAGE_SIZE: u32 = 10;
pub const SAFE_SEARCH: &str = "active";
