/// ユーザーレコード
///
/// API Gatewayから受け取るJSONと、DynamoDBに保存するアイテムの
/// 双方が表現する唯一のエンティティ型。
use serde::{Deserialize, Serialize};

/// ユーザー
///
/// `email`がパーティションキーであり、作成後は変更されない。
/// `email`以外のフィールドはJSONに存在しない場合ゼロ値になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 識別キー（必須）
    pub email: String,
    /// 氏名（更新操作で変更される唯一のフィールド）
    #[serde(default)]
    pub name: String,
    /// 電話番号（DynamoDBでは数値型として保存）
    #[serde(default)]
    pub phone: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

impl User {
    /// 識別キーと氏名のみを持つユーザーを作成
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// JSONバイト列からユーザーをデコード
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// ユーザーをJSON文字列にエンコード
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_user() -> User {
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

    /// 全フィールドを含むJSONをデコードできる
    #[test]
    fn test_from_json_full() {
        let body = json!({
            "email": "a@x.com",
            "name": "Ann",
            "phone": 555,
            "gender": "female",
            "address": "1 Main St",
            "state": "Karnataka",
            "country": "India"
        })
        .to_string();

        let user = User::from_json(body.as_bytes()).unwrap();
        assert_eq!(user, full_user());
    }

    /// 省略されたフィールドはゼロ値になる
    #[test]
    fn test_from_json_missing_fields_default_to_zero_values() {
        let user = User::from_json(br#"{"email":"a@x.com","name":"Annie"}"#).unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "Annie");
        assert_eq!(user.phone, 0);
        assert!(user.gender.is_empty());
        assert!(user.address.is_empty());
        assert!(user.state.is_empty());
        assert!(user.country.is_empty());
    }

    /// emailが無いJSONはデコードエラー
    #[test]
    fn test_from_json_requires_email() {
        let result = User::from_json(br#"{"name":"Ann","phone":555}"#);
        assert!(result.is_err());
    }

    /// phoneが文字列の場合はデコードエラー
    #[test]
    fn test_from_json_rejects_string_phone() {
        let result = User::from_json(br#"{"email":"a@x.com","phone":"555"}"#);
        assert!(result.is_err());
    }

    /// 不正なJSONはデコードエラー
    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(User::from_json(b"{not json").is_err());
        assert!(User::from_json(b"").is_err());
        assert!(User::from_json(b"[]").is_err());
    }

    /// 未知のフィールドは無視される
    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let user = User::from_json(br#"{"email":"a@x.com","nickname":"A"}"#).unwrap();
        assert_eq!(user, User::new("a@x.com", ""));
    }

    /// JSONのフィールド名がスキーマと一致する
    #[test]
    fn test_to_json_field_names() {
        let json = full_user().to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["email"], "a@x.com");
        assert_eq!(parsed["name"], "Ann");
        assert_eq!(parsed["phone"], 555);
        assert_eq!(parsed["gender"], "female");
        assert_eq!(parsed["address"], "1 Main St");
        assert_eq!(parsed["state"], "Karnataka");
        assert_eq!(parsed["country"], "India");
        assert_eq!(parsed.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_new_sets_key_and_name_only() {
        let user = User::new("b@x.com", "Bob");
        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.name, "Bob");
        assert_eq!(user.phone, 0);
        assert!(user.country.is_empty());
    }
}
