/// ユーザーCRUD HTTP Lambdaエントリポイント
///
/// API Gatewayプロキシイベントを受け取り、UserHandlerに委譲して
/// DynamoDBのユーザーテーブルを操作する。
use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::info;
use user_api::application::{UserHandler, UserRequest};
use user_api::infrastructure::{
    init_logging, DynamoDbConfig, DynamoUserRepository, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントはコールドスタート時に一度だけ作成し、全呼び出しで共有する
    let config = DynamoDbConfig::from_env().await?;
    info!(users_table = config.users_table(), "ユーザーAPI Lambda関数を初期化");

    let user_repo = DynamoUserRepository::new(
        config.client().clone(),
        config.users_table().to_string(),
    );
    let user_handler = Arc::new(UserHandler::new(user_repo));

    run(service_fn(move |request: Request| {
        let user_handler = Arc::clone(&user_handler);
        async move { handler(&user_handler, request).await }
    }))
    .await
}

/// HTTPリクエストハンドラー
///
/// lambda_httpのリクエストを抽象リクエストに変換して処理し、
/// 結果をHTTPレスポンスに戻す。ストア由来のエラーはレスポンスに変換済みなので、
/// ここで返すErrはレスポンス構築の失敗のみ。
async fn handler<R>(user_handler: &UserHandler<R>, request: Request) -> Result<Response<Body>, Error>
where
    R: UserRepository,
{
    let user_request = UserRequest::from_http(&request);
    let response = user_handler.handle(&user_request).await;

    Ok(response.into_http_response()?)
}
