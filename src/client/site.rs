use super::assistant::{AssistantWidget, HttpAssistant};
use super::exercises::Exercises;
use super::forms::Forms;
use super::shop::{Cart, CatalogSource, HttpCatalog, Shop, Wishlist};
use super::Feature;
use super::store::{CHAT_HISTORY_KEY, KeyValueBackend, LocalStore};
use super::tracker::Tracker;
use crate::config::ClientConfig;
use crate::models::{ChatMessage, Product};
use crate::ui;
use tokio::sync::OnceCell;
use tracing::info;

/// Every client feature wired to one store.
///
/// [`Site::init`] runs once; later calls return the catalog loaded the first time.
pub struct Site<B> {
    config: ClientConfig,
    store: LocalStore<B>,
    catalog: OnceCell<Vec<Product>>,
}

impl<B: KeyValueBackend> Site<B> {
    pub fn new(config: ClientConfig, store: LocalStore<B>) -> Self {
        Self {
            config,
            store,
            catalog: OnceCell::new(),
        }
    }

    pub async fn init(&self) -> &[Product] {
        self.init_with(&HttpCatalog::new(&self.config.catalog_url)).await
    }

    pub async fn init_with<S: CatalogSource>(&self, source: &S) -> &[Product] {
        self.catalog
            .get_or_init(|| async {
                let products = self.shop().load_catalog(source).await;
                info!(products = products.len(), "site initialized");
                products
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.initialized()
    }

    pub fn store(&self) -> &LocalStore<B> {
        &self.store
    }

    pub fn exercises(&self) -> Exercises<B> {
        Exercises::new(self.store.clone())
    }

    pub fn tracker(&self) -> Tracker<B> {
        Tracker::new(self.store.clone())
    }

    pub fn shop(&self) -> Shop<B> {
        Shop::new(self.store.clone())
    }

    pub fn cart(&self) -> Cart<B> {
        Cart::new(self.store.clone())
    }

    pub fn wishlist(&self) -> Wishlist<B> {
        Wishlist::new(self.store.clone())
    }

    pub fn forms(&self) -> Forms<B> {
        Forms::new(self.store.clone())
    }

    pub fn assistant(&self) -> AssistantWidget<HttpAssistant, B> {
        AssistantWidget::from_config(&self.config, self.store.clone())
    }

    pub fn exercises_html(&self) -> String {
        ui::render_exercises(&self.exercises().render())
    }

    pub fn dashboard_html(&self) -> String {
        ui::render_dashboard(&self.tracker().render())
    }

    pub fn products_html(&self) -> String {
        ui::render_products(&self.shop().render())
    }

    pub fn cart_html(&self) -> String {
        ui::render_cart(&self.cart().render())
    }

    pub fn wishlist_html(&self) -> String {
        ui::render_wishlist(&self.wishlist().render())
    }

    /// Reads the persisted history so it also works before any widget exists.
    pub fn chat_html(&self) -> String {
        let history: Vec<ChatMessage> = self.store.get(CHAT_HISTORY_KEY, Vec::new());
        ui::render_chat(&history)
    }
}
