/// ログ基盤モジュール
///
/// Lambda環境向けにJSON形式の構造化ログを設定する。
use std::sync::Once;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// CloudWatch向けのJSONレイヤー
///
/// イベントのフィールドはトップレベルに展開される。
fn json_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(make_writer)
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// `RUST_LOG`（未設定ならinfo）でフィルタリングし、CloudWatch向けに
/// JSONで出力する。複数回呼び出しても初期化は最初の一度だけ。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // テスト等で既にグローバルサブスクライバーがある場合は何もしない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer(std::io::stdout))
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
