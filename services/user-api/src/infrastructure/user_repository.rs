/// DynamoDBでユーザーレコードを管理するためのユーザーリポジトリ
///
/// 1つのテーブル（パーティションキー: email）に対して
/// put / get / update / delete の4操作を発行する。
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::User;
use crate::infrastructure::user_item::{self, ATTR_NAME};

/// 氏名更新に使う固定の更新式
///
/// `name`はDynamoDBの予約語なので属性名プレースホルダー経由で参照する。
pub const UPDATE_NAME_EXPRESSION: &str = "SET #name = :n";

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserRepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// 指定キーのアイテムが存在しない
    #[error("User not found: {0}")]
    NotFound(String),

    /// 保存済み属性を期待する型に変換できない
    #[error("Data corruption in attribute '{attribute}': {value}")]
    DataCorruption { attribute: String, value: String },
}

/// ユーザー永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替え可能にする。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを書き込む（同じキーが存在すれば無条件に上書き）
    ///
    /// # 戻り値
    /// * 成功時は書き込んだユーザー
    /// * 失敗時は`Err(UserRepositoryError::WriteError)`
    async fn create(&self, user: &User) -> Result<User, UserRepositoryError>;

    /// emailでユーザーを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(User)`
    /// * 見つからなかった場合は`Err(UserRepositoryError::NotFound)`
    /// * 属性が壊れている場合は`Err(UserRepositoryError::DataCorruption)`
    async fn get(&self, email: &str) -> Result<User, UserRepositoryError>;

    /// 氏名のみを更新し、更新後のユーザーを返す
    ///
    /// 事前の存在確認は行わない。キーが存在しなければ
    /// emailと氏名だけを持つアイテムが作成される。
    async fn update(&self, user: &User) -> Result<User, UserRepositoryError>;

    /// ユーザーを削除
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`（ユーザーが存在しなかった場合も含む）
    /// * 失敗時は`Err(UserRepositoryError::WriteError)`
    async fn delete(&self, email: &str) -> Result<(), UserRepositoryError>;
}

/// UserRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoUserRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// ユーザーテーブル名
    table_name: String,
}

impl DynamoUserRepository {
    /// 新しいDynamoUserRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント（プロセス内で共有される）
    /// * `table_name` - ユーザーテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl UserRepository for DynamoUserRepository {
    async fn create(&self, user: &User) -> Result<User, UserRepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_item::to_item(user)))
            .send()
            .await
            .map_err(|e| UserRepositoryError::WriteError(e.to_string()))?;

        debug!(email = %user.email, table = %self.table_name, "PutItem完了");

        Ok(user.clone())
    }

    async fn get(&self, email: &str) -> Result<User, UserRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(user_item::key(email)))
            .send()
            .await
            .map_err(|e| UserRepositoryError::ReadError(e.to_string()))?;

        match result.item {
            Some(item) => user_item::from_item(&item),
            None => Err(UserRepositoryError::NotFound(email.to_string())),
        }
    }

    async fn update(&self, user: &User) -> Result<User, UserRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(user_item::key(&user.email)))
            .update_expression(UPDATE_NAME_EXPRESSION)
            .expression_attribute_names("#name", ATTR_NAME)
            .expression_attribute_values(":n", AttributeValue::S(user.name.clone()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| UserRepositoryError::WriteError(e.to_string()))?;

        match result.attributes {
            Some(attributes) => user_item::from_item(&attributes),
            None => {
                // ALL_NEW指定時は常に返るはずだが、無ければ入力をそのまま返す
                warn!(email = %user.email, "UpdateItemが属性を返さなかった");
                Ok(user.clone())
            }
        }
    }

    async fn delete(&self, email: &str) -> Result<(), UserRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(user_item::key(email)))
            .send()
            .await
            .map_err(|e| UserRepositoryError::WriteError(e.to_string()))?;

        Ok(())
    }
}
