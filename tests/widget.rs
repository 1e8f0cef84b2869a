mod common;

use common::{TEST_LOCK, pick_free_port, shared_server};
use reva::ClientConfig;
use reva::client::{AssistantWidget, LocalStore, ReplySource, Site};
use reva::intent;

#[tokio::test]
async fn widget_prefers_the_live_backend() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let config = ClientConfig::new(&server.base_url).without_delays();
    let widget = AssistantWidget::from_config(&config, LocalStore::in_memory());

    let turn = widget.send("How do I help my baby sleep?").await.unwrap();
    assert_eq!(turn.source, ReplySource::Remote);
    assert_eq!(turn.reply.suggestions, intent::Intent::Sleep.suggestions());
}

#[tokio::test]
async fn widget_falls_back_with_matching_suggestions() {
    let port = pick_free_port();
    let config = ClientConfig::new(format!("http://127.0.0.1:{port}")).without_delays();
    let widget = AssistantWidget::from_config(&config, LocalStore::in_memory());

    for (text, expected) in [
        ("My latch hurts", intent::Intent::Breastfeeding),
        ("I can't sleep and need to track my mood", intent::Intent::Track),
        ("anything else", intent::Intent::Fallback),
    ] {
        let turn = widget.send(text).await.unwrap();
        assert_eq!(turn.source, ReplySource::Local);
        assert_eq!(turn.reply.suggestions, expected.suggestions());
    }
    assert_eq!(widget.history().len(), 6);
}

#[tokio::test]
async fn site_without_catalog_uses_placeholder_product() {
    let port = pick_free_port();
    let config = ClientConfig::new(format!("http://127.0.0.1:{port}")).without_delays();
    let site = Site::new(config, LocalStore::in_memory());

    let products = site.init().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "p-demo");

    site.cart().add("p-demo", 1);
    site.cart().increment("p-demo");
    assert_eq!(site.cart().quantity("p-demo"), Some(2));
}
