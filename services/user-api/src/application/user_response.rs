// 送信レスポンスの抽象表現
//
// ステータスコード・ボディ・Content-Typeだけを保持し、
// Lambdaエントリポイントでlambda_httpのレスポンスに変換する。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, PartialEq)]
pub struct UserResponse {
    status: StatusCode,
    body: String,
    content_type: &'static str,
}

impl UserResponse {
    /// JSONボディのレスポンスを作成
    pub fn json(status: StatusCode, body: String) -> Self {
        Self {
            status,
            body,
            content_type: CONTENT_TYPE_JSON,
        }
    }

    /// プレーンテキストのレスポンスを作成
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: CONTENT_TYPE_TEXT,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    /// lambda_httpのレスポンスに変換
    pub fn into_http_response(self) -> Result<Response<Body>, lambda_http::http::Error> {
        Response::builder()
            .status(self.status)
            .header(CONTENT_TYPE, HeaderValue::from_static(self.content_type))
            .body(Body::Text(self.body))
    }
}
