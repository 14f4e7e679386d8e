pub mod client;
pub mod consts;
pub mod requests;
pub mod responses;
