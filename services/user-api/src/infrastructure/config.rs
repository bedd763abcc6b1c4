/// DynamoDB接続設定
///
/// コールドスタート時に一度だけ環境変数を読み込み、
/// 以降の呼び出しでは同じクライアントとテーブル名を使い回す。
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::info;

/// 環境変数名: ユーザーテーブル名
pub const ENV_USERS_TABLE: &str = "USERS_TABLE";

/// 環境変数名: DynamoDBエンドポイントの上書き（DynamoDB Local等）
pub const ENV_DYNAMODB_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";

/// USERS_TABLE未設定時のテーブル名
pub const DEFAULT_USERS_TABLE: &str = "UserTable";

/// リージョンが環境から解決できない場合のリージョン
pub const DEFAULT_REGION: &str = "ap-south-1";

/// 設定のエラー型
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Empty environment variable: {0}")]
    EmptyEnvVar(String),
}

/// 環境変数から読み込んだ設定値
#[derive(Debug, Clone, PartialEq)]
pub struct UserApiSettings {
    /// ユーザーテーブル名
    users_table: String,
    /// DynamoDBエンドポイントURL（未指定ならAWSのデフォルト）
    endpoint_url: Option<String>,
}

impl UserApiSettings {
    pub fn new(users_table: impl Into<String>, endpoint_url: Option<String>) -> Self {
        Self {
            users_table: users_table.into(),
            endpoint_url,
        }
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `USERS_TABLE`: テーブル名（未設定なら`UserTable`、空文字はエラー）
    /// - `DYNAMODB_ENDPOINT_URL`: エンドポイントの上書き（任意、空文字は未設定扱い）
    pub fn from_env() -> Result<Self, ConfigError> {
        let users_table = match std::env::var(ENV_USERS_TABLE) {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyEnvVar(ENV_USERS_TABLE.to_string()));
            }
            Ok(value) => value,
            Err(_) => DEFAULT_USERS_TABLE.to_string(),
        };

        let endpoint_url = std::env::var(ENV_DYNAMODB_ENDPOINT_URL)
            .ok()
            .filter(|url| !url.trim().is_empty());

        info!(
            users_table = %users_table,
            endpoint_url = endpoint_url.as_deref().unwrap_or("default"),
            "UserApiSettings loaded"
        );

        Ok(Self {
            users_table,
            endpoint_url,
        })
    }

    /// テーブル名を取得
    pub fn users_table(&self) -> &str {
        &self.users_table
    }

    /// エンドポイントURLを取得
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

/// テーブル名とクライアントを持つDynamoDB設定
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// ユーザーテーブル名
    users_table: String,
}

impl DynamoDbConfig {
    /// 環境変数から設定を読み込み、DynamoDBクライアントを作成
    pub async fn from_env() -> Result<Self, ConfigError> {
        let settings = UserApiSettings::from_env()?;
        Ok(Self::from_settings(&settings).await)
    }

    /// 設定値からDynamoDBクライアントを作成
    ///
    /// 認証情報とリージョンはaws-configのデフォルトチェーンから解決し、
    /// リージョンが見つからなければ`ap-south-1`を使う。
    pub async fn from_settings(settings: &UserApiSettings) -> Self {
        let region = RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_REGION));
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&aws_config);
        if let Some(endpoint_url) = settings.endpoint_url() {
            builder = builder.endpoint_url(endpoint_url);
        }

        Self {
            client: DynamoDbClient::from_conf(builder.build()),
            users_table: settings.users_table().to_string(),
        }
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, users_table: String) -> Self {
        Self {
            client,
            users_table,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// ユーザーテーブル名を取得
    pub fn users_table(&self) -> &str {
        &self.users_table
    }
}
