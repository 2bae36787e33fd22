//! Concrete probers and the Telegram notifier against local backends.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use endpoint_monitor::config::TelegramConfig;
use endpoint_monitor::notify::{Notifier, NotifyError, TelegramApi, TelegramNotifier};
use endpoint_monitor::probe::{Prober, ProberFactory};
use endpoint_monitor::targets::ProbeSpec;

mod common;

fn factory() -> ProberFactory {
    ProberFactory::new(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_http_expected_status() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let addr = common::start_programmable_backend(move || {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                (503, "unavailable".into())
            } else {
                (200, "ok".into())
            }
        }
    })
    .await;

    let prober = factory().build(&ProbeSpec::Http {
        url: format!("http://{}/", addr),
        expected_status: 200,
    });

    let first = prober.probe().await;
    assert!(!first.ok);
    assert_eq!(first.error, "HTTP 503");

    let second = prober.probe().await;
    assert!(second.ok, "unexpected failure: {}", second.error);
    assert!(second.error.is_empty());
}

#[tokio::test]
async fn test_http_custom_expected_status() {
    let addr = common::start_programmable_backend(|| async { (404, "missing".into()) }).await;
    let prober = factory().build(&ProbeSpec::Http {
        url: format!("http://{}/gone", addr),
        expected_status: 404,
    });
    assert!(prober.probe().await.ok);
}

#[tokio::test]
async fn test_http_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = factory().build(&ProbeSpec::Http {
        url: format!("http://{}/", addr),
        expected_status: 200,
    });
    let result = prober.probe().await;
    assert!(!result.ok);
    assert!(result.error.starts_with("HTTP error"), "got {}", result.error);
}

#[tokio::test]
async fn test_tcp_prober_via_factory() {
    let addr = common::start_programmable_backend(|| async { (200, String::new()) }).await;
    let prober = factory().build(&ProbeSpec::Tcp {
        host: addr.ip().to_string(),
        port: addr.port(),
    });
    assert!(prober.probe().await.ok);
}

fn telegram(addr: std::net::SocketAddr) -> TelegramNotifier {
    let config = TelegramConfig {
        bot_token: "123:abc".into(),
        chat_id: "42".into(),
        api_base: format!("http://{}", addr),
        ..Default::default()
    };
    TelegramNotifier::new(TelegramApi::new(&config).unwrap())
}

#[tokio::test]
async fn test_telegram_delivery() {
    let addr = common::start_programmable_backend(|| async {
        (200, r#"{"ok":true,"result":{"message_id":1}}"#.into())
    })
    .await;
    telegram(addr).deliver("hello").await.unwrap();
}

#[tokio::test]
async fn test_telegram_api_rejection() {
    let addr = common::start_programmable_backend(|| async {
        (200, r#"{"ok":false,"description":"chat not found"}"#.into())
    })
    .await;
    let err = telegram(addr).deliver("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected(ref d) if d == "chat not found"));
}

#[tokio::test]
async fn test_telegram_http_error() {
    let addr = common::start_programmable_backend(|| async {
        (400, r#"{"ok":false,"description":"Bad Request"}"#.into())
    })
    .await;
    let err = telegram(addr).deliver("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Status { status: 400, .. }));
}
