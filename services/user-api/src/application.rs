// アプリケーション層モジュール
pub mod user_handler;
pub mod user_request;
pub mod user_response;

// 再エクスポート
pub use user_handler::{UserHandler, UserHandlerError, UserOperation};
pub use user_request::UserRequest;
pub use user_response::UserResponse;
