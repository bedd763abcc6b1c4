/// 受信リクエストの抽象表現
///
/// API Gatewayプロキシイベントから、ルーティングに必要な
/// メソッド・パスパラメーター・ボディだけを取り出す。
use lambda_http::http::Method;
use lambda_http::{Request, RequestExt};

/// 識別キーを運ぶパスパラメーター名
pub const PATH_PARAM_EMAIL: &str = "email";

#[derive(Debug, Clone, PartialEq)]
pub struct UserRequest {
    /// HTTPメソッド
    pub method: Method,
    /// パスパラメーターの識別キー（空文字は未指定として扱う）
    pub email: Option<String>,
    /// リクエストボディ（UTF-8 JSON）
    pub body: Vec<u8>,
}

impl UserRequest {
    pub fn new(method: Method, email: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            email: email.filter(|e| !e.is_empty()).map(str::to_string),
            body: body.into(),
        }
    }

    /// lambda_httpのリクエストから変換
    pub fn from_http(request: &Request) -> Self {
        let path_parameters = request.path_parameters();
        Self::new(
            request.method().clone(),
            path_parameters.first(PATH_PARAM_EMAIL),
            request.body().to_vec(),
        )
    }
}
