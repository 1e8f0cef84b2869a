use super::Feature;
use super::store::{CART_KEY, KeyValueBackend, LocalStore, PRODUCTS_KEY, WISHLIST_KEY};
use crate::errors::RemoteError;
use crate::models::{CartItem, Product, clamp_quantity};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{info, warn};

pub use crate::models::{MAX_QUANTITY, MIN_QUANTITY};

/// Where the product catalog comes from.
pub trait CatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, RemoteError>> + Send;
}

/// Fetches the catalog file over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

impl CatalogSource for HttpCatalog {
    async fn fetch(&self) -> Result<Vec<Product>, RemoteError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        parse_catalog(&body)
    }
}

pub fn parse_catalog(body: &[u8]) -> Result<Vec<Product>, RemoteError> {
    let document: CatalogDocument =
        serde_json::from_slice(body).map_err(|err| RemoteError::Malformed(err.to_string()))?;
    let products = match document {
        CatalogDocument::Wrapped { products } => products,
        CatalogDocument::Bare(products) => products,
    };

    Ok(products
        .into_iter()
        .filter(|product| {
            let valid = product.price.is_finite() && product.price >= 0.0;
            if !valid {
                warn!(id = %product.id, price = product.price, "dropping product with invalid price");
            }
            valid
        })
        .collect())
}

pub fn placeholder_catalog() -> Vec<Product> {
    vec![Product {
        id: "p-demo".to_string(),
        name: "REVA Cozy Blanket".to_string(),
        price: 49.99,
        image: String::new(),
        description: "Soft blanket for nurturing moments.".to_string(),
    }]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: String,
}

pub struct Shop<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Shop<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    /// Fresh catalog if the source answers, else the cached one, else the placeholder.
    pub async fn load_catalog<S: CatalogSource>(&self, source: &S) -> Vec<Product> {
        match source.fetch().await {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                self.store.set(PRODUCTS_KEY, &products);
                products
            }
            Err(err) => {
                warn!("catalog unavailable, using fallback: {err}");
                if let Some(cached) = self.store.get::<Option<Vec<Product>>>(PRODUCTS_KEY, None) {
                    return cached;
                }
                let inline = placeholder_catalog();
                self.store.set(PRODUCTS_KEY, &inline);
                inline
            }
        }
    }

    pub fn cached_catalog(&self) -> Vec<Product> {
        self.store.get(PRODUCTS_KEY, Vec::new())
    }

    pub fn cart(&self) -> Cart<B> {
        Cart::new(self.store.clone())
    }

    pub fn wishlist(&self) -> Wishlist<B> {
        Wishlist::new(self.store.clone())
    }
}

impl<B: KeyValueBackend> Feature for Shop<B> {
    type Item = Product;
    type View = Vec<ProductCard>;

    const KEY: &'static str = PRODUCTS_KEY;

    fn list(&self) -> Vec<Product> {
        self.cached_catalog()
    }

    fn render(&self) -> Vec<ProductCard> {
        self.list()
            .into_iter()
            .map(|product| ProductCard {
                price: format_price(product.price),
                id: product.id,
                name: product.name,
                image: product.image,
                description: product.description,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    pub product_id: String,
    pub name: String,
    pub quantity: u8,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CartView {
    Empty { message: &'static str },
    Items { rows: Vec<CartRow>, total: String },
}

pub struct Cart<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Cart<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    pub fn quantity(&self, product_id: &str) -> Option<u8> {
        self.list()
            .into_iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }

    /// Adds `quantity` of a product, merging with an existing line.
    pub fn add(&self, product_id: &str, quantity: u8) {
        let mut cart = self.list();
        match cart.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = clamp_quantity(u32::from(item.quantity) + u32::from(quantity)),
            None => cart.push(CartItem {
                product_id: product_id.to_string(),
                quantity: clamp_quantity(u32::from(quantity)),
            }),
        }
        self.save(&cart);
        info!(product_id, "added to cart");
    }

    pub fn increment(&self, product_id: &str) {
        self.adjust(product_id, |quantity| u32::from(quantity) + 1);
    }

    pub fn decrement(&self, product_id: &str) {
        self.adjust(product_id, |quantity| u32::from(quantity).saturating_sub(1));
    }

    pub fn set_quantity(&self, product_id: &str, quantity: u32) {
        self.adjust(product_id, |_| quantity);
    }

    pub fn remove(&self, product_id: &str) {
        let mut cart = self.list();
        cart.retain(|item| item.product_id != product_id);
        self.save(&cart);
    }

    /// Unknown ids are ignored.
    fn adjust(&self, product_id: &str, change: impl FnOnce(u8) -> u32) {
        let mut cart = self.list();
        let Some(item) = cart.iter_mut().find(|item| item.product_id == product_id) else {
            return;
        };
        item.quantity = clamp_quantity(change(item.quantity));
        self.save(&cart);
    }

    fn save(&self, cart: &[CartItem]) {
        self.store.set(Self::KEY, cart);
    }
}

impl<B: KeyValueBackend> Feature for Cart<B> {
    type Item = CartItem;
    type View = CartView;

    const KEY: &'static str = CART_KEY;

    fn list(&self) -> Vec<CartItem> {
        let mut cart: Vec<CartItem> = self.store.get(Self::KEY, Vec::new());
        for item in &mut cart {
            item.quantity = clamp_quantity(u32::from(item.quantity));
        }
        cart
    }

    fn render(&self) -> CartView {
        let cart = self.list();
        if cart.is_empty() {
            return CartView::Empty {
                message: "Your cart is empty",
            };
        }

        let products: Vec<Product> = self.store.get(PRODUCTS_KEY, Vec::new());
        let mut total = 0.0;
        let rows = cart
            .into_iter()
            .map(|item| {
                let (name, price) = products
                    .iter()
                    .find(|product| product.id == item.product_id)
                    .map(|product| (product.name.clone(), product.price))
                    .unwrap_or_else(|| (item.product_id.clone(), 0.0));
                let line = price * f64::from(item.quantity);
                total += line;
                CartRow {
                    name,
                    line_total: format_price(line),
                    product_id: item.product_id,
                    quantity: item.quantity,
                }
            })
            .collect();

        CartView::Items {
            rows,
            total: format_price(total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum WishlistView {
    Empty { message: &'static str },
    Items { names: Vec<String> },
}

pub struct Wishlist<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Wishlist<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.list().iter().any(|id| id == product_id)
    }

    /// Returns `false` when the product was already wished for.
    pub fn add(&self, product_id: &str) -> bool {
        let mut wishlist = self.list();
        if wishlist.iter().any(|id| id == product_id) {
            return false;
        }
        wishlist.push(product_id.to_string());
        self.store.set(Self::KEY, &wishlist);
        info!(product_id, "added to wishlist");
        true
    }

    pub fn remove(&self, product_id: &str) -> bool {
        let mut wishlist = self.list();
        let before = wishlist.len();
        wishlist.retain(|id| id != product_id);
        if wishlist.len() == before {
            return false;
        }
        self.store.set(Self::KEY, &wishlist);
        true
    }

    /// Returns whether the product is wished for afterwards.
    pub fn toggle(&self, product_id: &str) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.add(product_id)
        }
    }
}

impl<B: KeyValueBackend> Feature for Wishlist<B> {
    type Item = String;
    type View = WishlistView;

    const KEY: &'static str = WISHLIST_KEY;

    fn list(&self) -> Vec<String> {
        self.store.get(Self::KEY, Vec::new())
    }

    fn render(&self) -> WishlistView {
        let wishlist = self.list();
        if wishlist.is_empty() {
            return WishlistView::Empty {
                message: "No items in wishlist",
            };
        }

        let products: Vec<Product> = self.store.get(PRODUCTS_KEY, Vec::new());
        let names = wishlist
            .into_iter()
            .map(|id| {
                products
                    .iter()
                    .find(|product| product.id == id)
                    .map(|product| product.name.clone())
                    .unwrap_or(id)
            })
            .collect();

        WishlistView::Items { names }
    }
}

fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl CatalogSource for Offline {
        async fn fetch(&self) -> Result<Vec<Product>, RemoteError> {
            Err(RemoteError::Status(404))
        }
    }

    struct Fixed(Vec<Product>);

    impl CatalogSource for Fixed {
        async fn fetch(&self) -> Result<Vec<Product>, RemoteError> {
            Ok(self.0.clone())
        }
    }

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn quantity_stays_in_range() {
        let cart = Cart::new(LocalStore::in_memory());
        cart.add("p1", 1);
        cart.decrement("p1");
        cart.decrement("p1");
        assert_eq!(cart.quantity("p1"), Some(1));

        for _ in 0..150 {
            cart.increment("p1");
        }
        assert_eq!(cart.quantity("p1"), Some(99));

        cart.set_quantity("p1", 0);
        assert_eq!(cart.quantity("p1"), Some(1));
        cart.set_quantity("p1", 1_000);
        assert_eq!(cart.quantity("p1"), Some(99));
    }

    #[test]
    fn add_merges_existing_lines() {
        let cart = Cart::new(LocalStore::in_memory());
        cart.add("p1", 2);
        cart.add("p1", 3);
        cart.add("p2", 0);
        cart.add("p3", 250);
        assert_eq!(cart.list().len(), 3);
        assert_eq!(cart.quantity("p1"), Some(5));
        assert_eq!(cart.quantity("p2"), Some(1));
        assert_eq!(cart.quantity("p3"), Some(99));

        cart.remove("p1");
        assert_eq!(cart.quantity("p1"), None);
        cart.increment("missing");
        assert_eq!(cart.list().len(), 2);
    }

    #[test]
    fn cart_render_prices_known_and_unknown_products() {
        let store = LocalStore::in_memory();
        store.set(PRODUCTS_KEY, &vec![product("p1", 10.5)]);
        let cart = Cart::new(store);
        assert_eq!(
            cart.render(),
            CartView::Empty {
                message: "Your cart is empty"
            }
        );

        cart.add("p1", 2);
        cart.add("ghost", 1);
        let CartView::Items { rows, total } = cart.render() else {
            panic!("expected items");
        };
        assert_eq!(rows[0].name, "Product p1");
        assert_eq!(rows[0].line_total, "$21.00");
        assert_eq!(rows[1].name, "ghost");
        assert_eq!(rows[1].line_total, "$0.00");
        assert_eq!(total, "$21.00");
    }

    #[test]
    fn wishlist_has_set_semantics() {
        let wishlist = Wishlist::new(LocalStore::in_memory());
        assert!(wishlist.add("p1"));
        assert!(!wishlist.add("p1"));
        assert_eq!(wishlist.list(), vec!["p1".to_string()]);

        assert!(!wishlist.toggle("p1"));
        assert!(!wishlist.contains("p1"));
        assert!(wishlist.toggle("p1"));
        assert!(wishlist.contains("p1"));
    }

    #[test]
    fn wishlist_render_uses_catalog_names() {
        let store = LocalStore::in_memory();
        store.set(PRODUCTS_KEY, &vec![product("p1", 3.0)]);
        let wishlist = Wishlist::new(store);
        wishlist.add("p1");
        wishlist.add("p9");
        assert_eq!(
            wishlist.render(),
            WishlistView::Items {
                names: vec!["Product p1".to_string(), "p9".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn catalog_falls_back_to_cache_then_placeholder() {
        let shop = Shop::new(LocalStore::in_memory());
        assert_eq!(shop.load_catalog(&Offline).await, placeholder_catalog());

        let fresh = vec![product("p1", 4.0)];
        assert_eq!(shop.load_catalog(&Fixed(fresh.clone())).await, fresh);
        assert_eq!(shop.load_catalog(&Offline).await, fresh);
        assert_eq!(shop.render()[0].price, "$4.00");
    }

    #[test]
    fn parse_catalog_accepts_both_shapes() {
        let wrapped = br#"{"products":[{"id":"a","name":"A","price":1}]}"#;
        let bare = br#"[{"id":"b","name":"B","price":2,"desc":"soft"},{"id":"c","name":"C","price":-1}]"#;
        assert_eq!(parse_catalog(wrapped).unwrap()[0].id, "a");

        let products = parse_catalog(bare).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].description, "soft");
        assert!(matches!(parse_catalog(b"nope"), Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn out_of_range_stored_quantities_are_repaired() {
        let store = LocalStore::in_memory();
        let raw = r#"[{"id":"p1","qty":3},{"id":"p2","qty":300},{"id":"p0","qty":0}]"#;
        store.backend().set_raw(CART_KEY, raw.to_string());
        let cart = Cart::new(store);

        assert_eq!(cart.quantity("p0"), Some(1));
        assert_eq!(cart.quantity("p2"), Some(99));

        cart.add("p3", 1);
        let ids: Vec<_> = cart.list().into_iter().map(|item| item.product_id).collect();
        assert_eq!(ids, vec!["p1", "p2", "p0", "p3"]);
        assert_eq!(cart.quantity("p1"), Some(3));
    }
}
