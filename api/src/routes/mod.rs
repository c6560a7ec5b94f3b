use axum::http::StatusCode;
use serde::Serialize;

pub mod auth;
pub mod boards;

#[derive(Serialize)]
pub struct HttpResponse<B> {
    ok: bool,
    status: u16,
    #[serde(rename = "statusText")]
    status_text: String,
    body: B,
}

impl<B> HttpResponse<B> {
    pub fn new(status: StatusCode, body: B) -> Self {
        Self {
            ok: status.is_success(),
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .expect("canonical reason must be defined")
                .to_string(),
            body,
        }
    }
}

impl<B> From<B> for HttpResponse<B> {
    fn from(body: B) -> Self {
        Self::new(StatusCode::OK, body)
    }
}
