pub mod consts;
pub mod dispatcher;
pub mod extractors;
pub mod handlers;
pub mod pipeline;
pub mod requests;
pub mod responses;
pub mod signature;
