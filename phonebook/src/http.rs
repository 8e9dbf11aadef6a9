pub const LINE_DELIMITER: &str = "\r\n";
pub const HEAD_DELIMITER: &[u8] = b"\r\n\r\n";

pub mod codec;
mod response;

pub type Request = http::Request<Option<bytes::Bytes>>;
pub use response::{ErrorBody, Html, IntoResponse, Json, Response};
