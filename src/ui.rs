//! HTML fragments for the client feature views.

use crate::client::exercises::ExerciseView;
use crate::client::shop::{CartView, ProductCard, WishlistView};
use crate::client::tracker::Dashboard;
use crate::models::{ChatMessage, Speaker};

const EXERCISE_ITEM: &str = r#"<div class="exercise-item">
  <h4>{{TITLE}}</h4>
  <p>{{DESC}}</p>
  <div class="exercise-actions"><button class="btn-feature" data-id="{{ID}}">{{LABEL}}</button></div>
</div>"#;

const TRACK_ENTRY: &str = r#"<div class="track-entry">
  <div class="track-meta">{{WHEN}}</div>
  <div class="track-main">{{SUMMARY}}</div>
  <div class="track-notes">{{NOTES}}</div>
</div>"#;

const PRODUCT_CARD: &str = r#"<div class="product-card">
  <img src="{{IMAGE}}" alt="{{NAME}}" />
  <h4>{{NAME}}</h4>
  <p class="muted">{{DESC}}</p>
  <div class="product-meta">{{PRICE}}</div>
  <div class="product-actions">
    <button class="btn-feature" data-id="{{ID}}" data-action="cart">Add to Cart</button>
    <button class="btn-ghost" data-id="{{ID}}" data-action="wishlist">Wishlist</button>
  </div>
</div>"#;

const CART_ROW: &str = r#"<div class="cart-row">
  <div class="cart-title">{{NAME}}</div>
  <div class="cart-qty">
    <button class="qty-minus" data-id="{{ID}}">−</button>
    <span class="qty-num">{{QTY}}</span>
    <button class="qty-plus" data-id="{{ID}}">+</button>
  </div>
  <div class="cart-price">{{PRICE}}</div>
  <button class="btn-ghost remove-item" data-id="{{ID}}">Remove</button>
</div>"#;

pub fn render_exercises(items: &[ExerciseView]) -> String {
    let body: String = items
        .iter()
        .map(|item| {
            EXERCISE_ITEM
                .replace("{{TITLE}}", &escape(&item.title))
                .replace("{{DESC}}", &escape(&item.description))
                .replace("{{ID}}", &escape(&item.id))
                .replace("{{LABEL}}", item.action_label)
        })
        .collect();
    format!(r#"<div class="exercise-list">{body}</div>"#)
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    match dashboard {
        Dashboard::Empty { message } => muted(message),
        Dashboard::Entries { rows } => rows
            .iter()
            .map(|row| {
                TRACK_ENTRY
                    .replace("{{WHEN}}", &escape(&row.when))
                    .replace("{{SUMMARY}}", &escape(&row.summary))
                    .replace("{{NOTES}}", &escape(&row.notes))
            })
            .collect(),
    }
}

pub fn render_products(cards: &[ProductCard]) -> String {
    cards
        .iter()
        .map(|card| {
            PRODUCT_CARD
                .replace("{{IMAGE}}", &escape(&card.image))
                .replace("{{NAME}}", &escape(&card.name))
                .replace("{{DESC}}", &escape(&card.description))
                .replace("{{PRICE}}", &escape(&card.price))
                .replace("{{ID}}", &escape(&card.id))
        })
        .collect()
}

pub fn render_cart(cart: &CartView) -> String {
    match cart {
        CartView::Empty { message } => muted(message),
        CartView::Items { rows, total } => {
            let rows: String = rows
                .iter()
                .map(|row| {
                    CART_ROW
                        .replace("{{NAME}}", &escape(&row.name))
                        .replace("{{ID}}", &escape(&row.product_id))
                        .replace("{{QTY}}", &row.quantity.to_string())
                        .replace("{{PRICE}}", &escape(&row.line_total))
                })
                .collect();
            format!(r#"{rows}<div class="cart-total">Total: {}</div>"#, escape(total))
        }
    }
}

pub fn render_wishlist(wishlist: &WishlistView) -> String {
    match wishlist {
        WishlistView::Empty { message } => muted(message),
        WishlistView::Items { names } => names
            .iter()
            .map(|name| format!("<div>{}</div>", escape(name)))
            .collect(),
    }
}

pub fn render_chat(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|message| {
            let who = match message.who {
                Speaker::User => "user",
                Speaker::Bot => "bot",
            };
            format!(
                r#"<div class="reva-chat-message {who}">{}</div>"#,
                escape(&message.text)
            )
        })
        .collect()
}

fn muted(message: &str) -> String {
    format!(r#"<div class="muted">{}</div>"#, escape(message))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
