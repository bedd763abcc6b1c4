/// UserとDynamoDBアイテム（属性マップ）の相互変換
use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::User;
use crate::infrastructure::user_repository::UserRepositoryError;

/// DynamoDBアイテムの型
pub type Item = HashMap<String, AttributeValue>;

/// パーティションキー属性名
pub const ATTR_EMAIL: &str = "email";
pub const ATTR_NAME: &str = "name";
pub const ATTR_PHONE: &str = "phone";
pub const ATTR_GENDER: &str = "gender";
pub const ATTR_ADDRESS: &str = "address";
pub const ATTR_STATE: &str = "state";
pub const ATTR_COUNTRY: &str = "country";

/// キー属性のみを持つマップを作成（GetItem/UpdateItem/DeleteItem用）
pub fn key(email: &str) -> Item {
    HashMap::from([(ATTR_EMAIL.to_string(), AttributeValue::S(email.to_string()))])
}

/// UserをPutItem用のアイテムに変換
///
/// phoneは10進文字列の数値型（N）として書き込む。
pub fn to_item(user: &User) -> Item {
    HashMap::from([
        (ATTR_EMAIL.to_string(), AttributeValue::S(user.email.clone())),
        (ATTR_NAME.to_string(), AttributeValue::S(user.name.clone())),
        (ATTR_PHONE.to_string(), AttributeValue::N(user.phone.to_string())),
        (ATTR_GENDER.to_string(), AttributeValue::S(user.gender.clone())),
        (ATTR_ADDRESS.to_string(), AttributeValue::S(user.address.clone())),
        (ATTR_STATE.to_string(), AttributeValue::S(user.state.clone())),
        (ATTR_COUNTRY.to_string(), AttributeValue::S(user.country.clone())),
    ])
}

/// DynamoDBアイテムからUserを復元
///
/// テーブルはスキーマレスなので、存在しない属性はゼロ値として扱う。
/// 属性が存在するのに期待した型へ変換できない場合は`DataCorruption`を返す。
pub fn from_item(item: &Item) -> Result<User, UserRepositoryError> {
    Ok(User {
        email: string_attr(item, ATTR_EMAIL)?,
        name: string_attr(item, ATTR_NAME)?,
        phone: number_attr(item, ATTR_PHONE)?,
        gender: string_attr(item, ATTR_GENDER)?,
        address: string_attr(item, ATTR_ADDRESS)?,
        state: string_attr(item, ATTR_STATE)?,
        country: string_attr(item, ATTR_COUNTRY)?,
    })
}

fn string_attr(item: &Item, attribute: &str) -> Result<String, UserRepositoryError> {
    match item.get(attribute) {
        None | Some(AttributeValue::Null(_)) => Ok(String::new()),
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(other) => Err(corrupted(attribute, format!("{:?}", other))),
    }
}

fn number_attr(item: &Item, attribute: &str) -> Result<i64, UserRepositoryError> {
    match item.get(attribute) {
        None | Some(AttributeValue::Null(_)) => Ok(0),
        Some(AttributeValue::N(value)) => value
            .parse::<i64>()
            .map_err(|_| corrupted(attribute, value.clone())),
        Some(other) => Err(corrupted(attribute, format!("{:?}", other))),
    }
}

fn corrupted(attribute: &str, value: String) -> UserRepositoryError {
    UserRepositoryError::DataCorruption {
        attribute: attribute.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User {
            email: "a@x.com".to_string(),
            name: "Ann".to_string(),
            phone: 555,
            gender: "female".to_string(),
            address: "1 Main St".to_string(),
            state: "Karnataka".to_string(),
            country: "India".to_string(),
        }
    }

    #[test]
    fn test_key_contains_only_email() {
        let key = key("a@x.com");
        assert_eq!(key.len(), 1);
        assert_eq!(key.get("email"), Some(&AttributeValue::S("a@x.com".to_string())));
    }

    /// 全属性が書き込まれ、phoneは数値型になる
    #[test]
    fn test_to_item_writes_all_attributes() {
        let item = to_item(&ann());

        assert_eq!(item.len(), 7);
        assert_eq!(item.get("email"), Some(&AttributeValue::S("a@x.com".to_string())));
        assert_eq!(item.get("name"), Some(&AttributeValue::S("Ann".to_string())));
        assert_eq!(item.get("phone"), Some(&AttributeValue::N("555".to_string())));
        assert_eq!(item.get("country"), Some(&AttributeValue::S("India".to_string())));
    }

    /// phoneが0でも数値として書き込まれ、読み戻せる
    #[test]
    fn test_zero_phone_survives_conversion() {
        let user = User::new("z@x.com", "Zed");
        let item = to_item(&user);

        assert_eq!(item.get("phone"), Some(&AttributeValue::N("0".to_string())));
        assert_eq!(from_item(&item).unwrap(), user);
    }

    #[test]
    fn test_from_item_restores_every_field() {
        let restored = from_item(&to_item(&ann())).unwrap();
        assert_eq!(restored, ann());
    }

    /// phone属性が存在しない場合は0として扱う
    #[test]
    fn test_from_item_tolerates_missing_phone() {
        let mut item = to_item(&ann());
        item.remove("phone");

        let user = from_item(&item).unwrap();
        assert_eq!(user.phone, 0);
        assert_eq!(user.name, "Ann");
    }

    #[test]
    fn test_from_item_treats_null_phone_as_zero() {
        let mut item = to_item(&ann());
        item.insert("phone".to_string(), AttributeValue::Null(true));

        assert_eq!(from_item(&item).unwrap().phone, 0);
    }

    /// 更新で作られたキーと氏名だけのアイテムも読める
    #[test]
    fn test_from_item_tolerates_sparse_item() {
        let mut item = key("new@x.com");
        item.insert("name".to_string(), AttributeValue::S("New".to_string()));

        let user = from_item(&item).unwrap();
        assert_eq!(user, User::new("new@x.com", "New"));
    }

    /// 数値として解釈できないphoneはDataCorruption
    #[test]
    fn test_from_item_non_numeric_phone_is_corruption() {
        let mut item = to_item(&ann());
        item.insert("phone".to_string(), AttributeValue::N("55x".to_string()));

        let err = from_item(&item).unwrap_err();
        assert_eq!(
            err,
            UserRepositoryError::DataCorruption {
                attribute: "phone".to_string(),
                value: "55x".to_string(),
            }
        );
    }

    #[test]
    fn test_from_item_fractional_phone_is_corruption() {
        let mut item = to_item(&ann());
        item.insert("phone".to_string(), AttributeValue::N("555.5".to_string()));

        match from_item(&item).unwrap_err() {
            UserRepositoryError::DataCorruption { attribute, .. } => assert_eq!(attribute, "phone"),
            other => panic!("Expected DataCorruption, got {:?}", other),
        }
    }

    /// 文字列型で保存されたphoneもDataCorruption
    #[test]
    fn test_from_item_phone_with_wrong_type_is_corruption() {
        let mut item = to_item(&ann());
        item.insert("phone".to_string(), AttributeValue::S("555".to_string()));

        match from_item(&item).unwrap_err() {
            UserRepositoryError::DataCorruption { attribute, .. } => assert_eq!(attribute, "phone"),
            other => panic!("Expected DataCorruption, got {:?}", other),
        }
    }

    #[test]
    fn test_from_item_string_attribute_with_wrong_type_is_corruption() {
        let mut item = to_item(&ann());
        item.insert("name".to_string(), AttributeValue::N("42".to_string()));

        match from_item(&item).unwrap_err() {
            UserRepositoryError::DataCorruption { attribute, .. } => assert_eq!(attribute, "name"),
            other => panic!("Expected DataCorruption, got {:?}", other),
        }
    }
}
