use bytes::Bytes;
use http::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    HeaderValue, StatusCode,
};

pub type Response = http::Response<Option<Bytes>>;

pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let mut response = http::Response::new(None);
        *response.status_mut() = self;
        response.headers_mut().insert(CONTENT_LENGTH, 0.into());

        response
    }
}

pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        let json = serde_json::to_vec(&self.0).expect("failed to serialize response body");

        http::Response::builder()
            .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Some(json.into()))
            .expect("failed to create response")
    }
}

pub struct Html(pub &'static str);

impl IntoResponse for Html {
    fn into_response(self) -> Response {
        let mut response = http::Response::new(Some(Bytes::from(self.0)));
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(mime::TEXT_HTML_UTF_8.as_ref()),
        );

        response
    }
}

/// The `{"error": "..."}` body every client-visible failure carries.
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<B: IntoResponse> IntoResponse for (StatusCode, B) {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        *response.status_mut() = self.0;

        response
    }
}
