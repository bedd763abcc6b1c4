/// ユーザーリクエストハンドラー
///
/// HTTPメソッドとパスキーの組み合わせから対応するリポジトリ操作を呼び出し、
/// 結果をステータスコードとボディに変換する。
use lambda_http::http::{Method, StatusCode};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::{UserRequest, UserResponse};
use crate::domain::User;
use crate::infrastructure::{UserRepository, UserRepositoryError};

/// パスキー無しのGETに返す固定レスポンス（一覧取得は未実装）
pub const LIST_PLACEHOLDER: &str = "List of users";

/// 削除成功時のレスポンス
pub const DELETED_MESSAGE: &str = "User deleted successfully";

/// ルーティング先の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    Create,
    Get,
    Update,
    Delete,
}

impl UserOperation {
    /// ストア操作失敗時に返す汎用メッセージ
    pub fn failure_message(self) -> &'static str {
        match self {
            UserOperation::Create => "Error creating user",
            UserOperation::Get => "Error getting user",
            UserOperation::Update => "Error updating user",
            UserOperation::Delete => "Error deleting user",
        }
    }
}

/// ハンドラーのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserHandlerError {
    /// ボディをUserとしてデコードできない
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// パスキーが必要な操作でキーが無い
    #[error("Missing path key for {0}")]
    MissingKey(Method),

    /// ルーティング表に無いメソッド
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(Method),

    /// リポジトリ操作の失敗
    #[error("{operation:?} failed: {source}")]
    Repository {
        operation: UserOperation,
        source: UserRepositoryError,
    },

    /// レスポンスのエンコードに失敗
    #[error("{operation:?} response encoding failed: {message}")]
    ResponseEncoding {
        operation: UserOperation,
        message: String,
    },
}

impl UserHandlerError {
    /// エラー種別に対応するHTTPステータス
    pub fn status(&self) -> StatusCode {
        match self {
            UserHandlerError::MalformedInput(_)
            | UserHandlerError::MissingKey(_)
            | UserHandlerError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
            UserHandlerError::Repository {
                source: UserRepositoryError::NotFound(_),
                ..
            } => StatusCode::NOT_FOUND,
            UserHandlerError::Repository { .. } | UserHandlerError::ResponseEncoding { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 呼び出し元に返すメッセージ（内部エラーの詳細は含めない）
    pub fn public_message(&self) -> &'static str {
        match self {
            UserHandlerError::MalformedInput(_) => "Invalid JSON input",
            UserHandlerError::MissingKey(_) | UserHandlerError::UnsupportedOperation(_) => {
                "Bad Request"
            }
            UserHandlerError::Repository {
                source: UserRepositoryError::NotFound(_),
                ..
            } => "User not found",
            UserHandlerError::Repository { operation, .. }
            | UserHandlerError::ResponseEncoding { operation, .. } => operation.failure_message(),
        }
    }

    /// ログを出力してレスポンスに変換
    pub fn into_response(self) -> UserResponse {
        match &self {
            UserHandlerError::Repository {
                operation,
                source: UserRepositoryError::NotFound(email),
            } => {
                info!(operation = ?operation, email = %email, "ユーザーが存在しない");
            }
            UserHandlerError::Repository {
                operation,
                source: UserRepositoryError::DataCorruption { attribute, value },
            } => {
                error!(
                    operation = ?operation,
                    attribute = %attribute,
                    value = %value,
                    "保存済み属性の型変換に失敗"
                );
            }
            UserHandlerError::Repository { operation, source } => {
                error!(operation = ?operation, error = %source, "DynamoDB操作に失敗");
            }
            UserHandlerError::ResponseEncoding { .. } => {
                error!(error = %self, "レスポンスのエンコードに失敗");
            }
            _ => {
                warn!(error = %self, "不正なリクエスト");
            }
        }

        UserResponse::text(self.status(), self.public_message())
    }
}

/// ユーザーCRUDリクエストを処理するハンドラー
///
/// リポジトリはプロセス起動時に一度だけ作成され、
/// 呼び出し間で読み取り専用として共有される。
pub struct UserHandler<R>
where
    R: UserRepository,
{
    /// ユーザーリポジトリ
    user_repo: R,
}

impl<R> UserHandler<R>
where
    R: UserRepository,
{
    /// 新しいUserHandlerを作成
    pub fn new(user_repo: R) -> Self {
        Self { user_repo }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// | メソッド | パスキー | 処理 |
    /// |---|---|---|
    /// | POST | - | ボディをデコードして作成 |
    /// | GET | あり | 取得 |
    /// | GET | なし | 固定の一覧プレースホルダー |
    /// | PUT | - | ボディをデコードして氏名を更新 |
    /// | DELETE | あり | 削除 |
    /// | DELETE | なし | 400 |
    /// | その他 | - | 400 |
    pub async fn handle(&self, request: &UserRequest) -> UserResponse {
        info!(
            method = %request.method,
            email = request.email.as_deref().unwrap_or("-"),
            "ユーザーリクエスト受信"
        );

        let result = match (&request.method, request.email.as_deref()) {
            (&Method::POST, _) => self.create(&request.body).await,
            (&Method::GET, Some(email)) => self.get(email).await,
            (&Method::GET, None) => Ok(UserResponse::text(StatusCode::OK, LIST_PLACEHOLDER)),
            (&Method::PUT, _) => self.update(&request.body).await,
            (&Method::DELETE, Some(email)) => self.delete(email).await,
            (&Method::DELETE, None) => Err(UserHandlerError::MissingKey(Method::DELETE)),
            (method, _) => Err(UserHandlerError::UnsupportedOperation(method.clone())),
        };

        result.unwrap_or_else(UserHandlerError::into_response)
    }

    async fn create(&self, body: &[u8]) -> Result<UserResponse, UserHandlerError> {
        let user = decode_user(body)?;
        let created = self
            .user_repo
            .create(&user)
            .await
            .map_err(|source| UserHandlerError::Repository {
                operation: UserOperation::Create,
                source,
            })?;

        info!(email = %created.email, "ユーザー作成完了");
        user_json_response(UserOperation::Create, &created)
    }

    async fn get(&self, email: &str) -> Result<UserResponse, UserHandlerError> {
        let user = self
            .user_repo
            .get(email)
            .await
            .map_err(|source| UserHandlerError::Repository {
                operation: UserOperation::Get,
                source,
            })?;

        user_json_response(UserOperation::Get, &user)
    }

    async fn update(&self, body: &[u8]) -> Result<UserResponse, UserHandlerError> {
        let user = decode_user(body)?;
        let updated = self
            .user_repo
            .update(&user)
            .await
            .map_err(|source| UserHandlerError::Repository {
                operation: UserOperation::Update,
                source,
            })?;

        info!(email = %updated.email, "ユーザー更新完了");
        user_json_response(UserOperation::Update, &updated)
    }

    async fn delete(&self, email: &str) -> Result<UserResponse, UserHandlerError> {
        self.user_repo
            .delete(email)
            .await
            .map_err(|source| UserHandlerError::Repository {
                operation: UserOperation::Delete,
                source,
            })?;

        info!(email = %email, "ユーザー削除完了");
        Ok(UserResponse::text(StatusCode::OK, DELETED_MESSAGE))
    }
}

/// ボディをUserにデコードする
///
/// 空または空白だけのemailはDynamoDBがキーとして受け付けないため、
/// ストアに渡す前に不正入力として扱う。
fn decode_user(body: &[u8]) -> Result<User, UserHandlerError> {
    let user = User::from_json(body).map_err(|e| UserHandlerError::MalformedInput(e.to_string()))?;
    if user.email.trim().is_empty() {
        return Err(UserHandlerError::MalformedInput("email must not be empty".to_string()));
    }
    Ok(user)
}

fn user_json_response(operation: UserOperation, user: &User) -> Result<UserResponse, UserHandlerError> {
    let json = user
        .to_json()
        .map_err(|e| UserHandlerError::ResponseEncoding {
            operation,
            message: e.to_string(),
        })?;
    Ok(UserResponse::json(StatusCode::OK, json))
}
