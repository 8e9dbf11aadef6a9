use std::{fmt, io, num::ParseIntError, str::Utf8Error};

use http::header::ToStrError;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request head is not valid utf-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    Http(#[from] http::Error),
    #[error("header value is not visible ascii: {0}")]
    HeaderValue(#[from] ToStrError),
    #[error("content-length is not a number: {0}")]
    ContentLength(#[from] ParseIntError),
    #[error("malformed request head")]
    InvalidFormat,
    #[error("unsupported http version")]
    UnsupportedVersion,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
    #[error("header value is not visible ascii: {0}")]
    HeaderValue(#[from] ToStrError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
