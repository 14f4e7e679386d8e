pub mod caption;
pub mod consts;
pub mod img;
#[cfg(test)]
pub mod tests;
