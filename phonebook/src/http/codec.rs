use std::{fmt::Write, str::from_utf8};

use bytes::{Buf, Bytes};
use http::{header::CONTENT_LENGTH, request::Builder, Error as HttpError, Method, Uri, Version};
use memchr::memmem;
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    error::{RequestError, ResponseError},
    http::{HEAD_DELIMITER, LINE_DELIMITER},
};

use super::{Request, Response};

/// One-request-per-connection HTTP/1.1 framing. The head is parsed as soon
/// as the blank line arrives; a partially received body is remembered in
/// `pending` until the announced content-length is buffered.
#[derive(Default)]
pub struct HttpCodec {
    pending: Option<(Builder, usize)>,
}

impl Decoder for HttpCodec {
    type Item = Request;

    type Error = RequestError;

    fn decode(&mut self, src: &mut bytes::BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let (builder, content_length) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let Some(head_end) = memmem::find(src, HEAD_DELIMITER) else {
                    return Ok(None);
                };

                let head = src.split_to(head_end);
                let builder = parse_head(&head)?;
                src.advance(HEAD_DELIMITER.len());

                let length = builder
                    .headers_ref()
                    .and_then(|headers| headers.get(CONTENT_LENGTH));
                let Some(length) = length else {
                    return builder.body(None).map(Some).map_err(RequestError::Http);
                };
                let length = length.to_str()?.parse::<usize>()?;

                (builder, length)
            }
        };

        if src.len() < content_length {
            src.reserve(content_length - src.len());
            self.pending = Some((builder, content_length));
            return Ok(None);
        }

        let body = src.split_to(content_length).freeze();
        builder.body(Some(body)).map(Some).map_err(RequestError::Http)
    }
}

fn parse_head(buf: &[u8]) -> Result<Builder, RequestError> {
    let head = from_utf8(buf)?;
    let mut lines = head.split(LINE_DELIMITER);

    // request line = "METHOD PATH HTTP/VERSION"
    let request_line = lines.next().ok_or(RequestError::InvalidFormat)?;
    let (method, rest) = request_line
        .split_once(' ')
        .ok_or(RequestError::InvalidFormat)?;
    let (path, version) = rest.split_once(' ').ok_or(RequestError::InvalidFormat)?;

    let mut builder = http::Request::builder()
        .method(Method::try_from(method).map_err(HttpError::from)?)
        .uri(Uri::try_from(path).map_err(HttpError::from)?)
        .version(match version {
            "HTTP/0.9" => Version::HTTP_09,
            "HTTP/1.0" => Version::HTTP_10,
            "HTTP/1.1" => Version::HTTP_11,
            _ => return Err(RequestError::UnsupportedVersion),
        });

    // header = "Name: Value"
    for line in lines {
        let (name, value) = line.split_once(':').ok_or(RequestError::InvalidFormat)?;
        builder = builder.header(name, value.trim_start());
    }

    Ok(builder)
}

impl Encoder<Response> for HttpCodec {
    type Error = ResponseError;

    fn encode(&mut self, response: Response, dst: &mut bytes::BytesMut) -> Result<(), Self::Error> {
        write!(
            dst,
            "{:?} {}\r\n",
            response.version(),
            response.status()
        )?;

        for (name, value) in response.headers() {
            write!(dst, "{}: {}\r\n", name, value.to_str()?)?;
        }

        if !response.headers().contains_key(CONTENT_LENGTH) {
            let length = response.body().as_ref().map(Bytes::len).unwrap_or_default();
            write!(dst, "{}: {}\r\n", CONTENT_LENGTH, length)?;
        }

        write!(dst, "\r\n")?;

        if let Some(body) = response.body() {
            dst.extend_from_slice(body);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use http::StatusCode;

    use crate::http::IntoResponse;

    use super::*;

    #[test]
    fn decodes_request_without_body() {
        let mut codec = HttpCodec::default();
        let mut buf = BytesMut::from("GET /api/persons HTTP/1.1\r\nHost: localhost\r\n\r\n");

        let request = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().path(), "/api/persons");
        assert!(request.body().is_none());
    }

    #[test]
    fn decodes_request_with_body_in_one_read() {
        let mut codec = HttpCodec::default();
        let mut buf = BytesMut::from(
            "PUT /api/persons/1 HTTP/1.1\r\nContent-Length: 19\r\n\r\n{\"number\":\"12-345\"}",
        );

        let request = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri().path(), "/api/persons/1");
        assert_eq!(request.body().as_deref(), Some(&b"{\"number\":\"12-345\"}"[..]));
        assert!(buf.is_empty());
    }

    #[test]
    fn decodes_body_arriving_after_the_head() {
        let mut codec = HttpCodec::default();
        let mut buf =
            BytesMut::from("POST /api/persons HTTP/1.1\r\nContent-Length: 11\r\n\r\n{\"a\"");

        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b":\"bcd\"}");
        let request = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(request.body().as_deref(), Some(&b"{\"a\":\"bcd\"}"[..]));
    }

    #[test]
    fn incomplete_head_is_not_a_frame() {
        let mut codec = HttpCodec::default();
        let mut buf = BytesMut::from("GET /api/persons HTTP/1.1\r\n");

        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn encodes_status_line_and_content_length() {
        let mut codec = HttpCodec::default();
        let mut buf = BytesMut::new();

        let response = (StatusCode::OK, crate::http::Html("<h1>hi</h1>")).into_response();
        codec.encode(response, &mut buf).unwrap();

        let text = from_utf8(&buf).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("content-length: 11\r\n"));
        assert!(text.ends_with("\r\n\r\n<h1>hi</h1>"));
    }
}
