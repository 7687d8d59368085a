//! HTTP tests for the site.
//!
//! Each test starts the full router (middleware and sessions included) on an
//! ephemeral port and talks to it with a cookie-keeping client, so a test's
//! client behaves like one browser with its own saved cart.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use baobab_storefront::{app::build_router, config::SiteConfig, state::AppState};
use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;

/// Start the site and return its base URL.
async fn spawn_site() -> String {
    let state = AppState::new(SiteConfig::local(0).unwrap()).unwrap();
    let app = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    format!("http://{addr}")
}

/// A client that keeps the session cookie, like a browser.
fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn add(client: &Client, base: &str, name: &str) -> reqwest::Response {
    client
        .post(format!("{base}/cart/add"))
        .form(&[("name", name)])
        .send()
        .await
        .unwrap()
}

async fn badge(client: &Client, base: &str) -> String {
    client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

async fn post_form(client: &Client, url: String, form: &[(&str, &str)]) -> (StatusCode, String) {
    let resp = client.post(url).form(form).send().await.unwrap();
    let status = resp.status();
    (status, resp.text().await.unwrap())
}

// ============================================================================
// Page & middleware
// ============================================================================

#[tokio::test]
async fn test_health() {
    let base = spawn_site().await;
    let resp = browser().get(format!("{base}/health")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let base = spawn_site().await;
    let resp = browser()
        .get(format!("{base}/health"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();

    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("abc-123")
    );
}

#[tokio::test]
async fn test_home_page_renders_all_sections() {
    let base = spawn_site().await;
    let resp = browser().get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let csp = resp
        .headers()
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .unwrap();
    let body = resp.text().await.unwrap();

    for section in ["id=\"home\"", "id=\"menu\"", "id=\"gallery\"", "id=\"about\"", "id=\"contact\""] {
        assert!(body.contains(section), "missing {section}");
    }
    assert!(body.contains("Thieboudienne"));
    assert!(body.contains("$18.99"));
    assert!(body.contains("id=\"toast\""));
    assert!(body.contains("id=\"cart-drawer\""));
    assert!(body.contains("rel=\"stylesheet\" href=\"/static/css/"));

    // The script nonce in the page is the one the policy allows
    let nonce = body
        .split("nonce=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    assert!(csp.contains(&format!("'nonce-{nonce}'")));
}

// ============================================================================
// Menu & gallery
// ============================================================================

#[tokio::test]
async fn test_menu_filters_by_category() {
    let base = spawn_site().await;
    let body = browser()
        .get(format!("{base}/menu?category=drinks"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Bissap"));
    assert!(body.contains("Ginger Juice"));
    assert!(!body.contains("Mafe"));
}

#[tokio::test]
async fn test_menu_all_shows_every_dish() {
    let base = spawn_site().await;
    let body = browser()
        .get(format!("{base}/menu?category=all"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    for dish in ["Accara", "Fataya", "Yassa Poulet", "Thiakry", "Bissap"] {
        assert!(body.contains(dish), "missing {dish}");
    }
}

#[tokio::test]
async fn test_menu_unknown_category_is_bad_request() {
    let base = spawn_site().await;
    let resp = browser()
        .get(format!("{base}/menu?category=brunch"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gallery_index_wraps() {
    let base = spawn_site().await;
    let body = browser()
        .get(format!("{base}/gallery/5"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // Four slides: index 5 is slide 1, so it links back to 0 and on to 2
    assert!(body.contains("hx-get=\"/gallery/0\""));
    assert!(body.contains("hx-get=\"/gallery/2\""));
    assert!(body.contains("every 5s"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_add_same_dish_twice_counts_two() {
    let base = spawn_site().await;
    let client = browser();

    let resp = add(&client, &base, "Bissap").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("hx-trigger").and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let body = resp.text().await.unwrap();
    assert!(body.contains("Bissap added to cart!"));
    assert!(body.contains("hx-swap-oob=\"true\""));

    add(&client, &base, "Bissap").await;
    assert!(badge(&client, &base).await.contains(">2</span>"));

    let drawer = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    // One line at the catalog price, total 2 × 4.99
    assert_eq!(drawer.matches("class=\"cart-item\"").count(), 1);
    assert!(drawer.contains("$4.99"));
    assert!(drawer.contains("$9.98"));
}

#[tokio::test]
async fn test_unknown_dish_is_not_found() {
    let base = spawn_site().await;
    let client = browser();

    let resp = add(&client, &base, "Pizza").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(badge(&client, &base).await.contains("empty"));
}

#[tokio::test]
async fn test_update_sets_and_removes() {
    let base = spawn_site().await;
    let client = browser();
    add(&client, &base, "Mafe").await;

    let (status, drawer) = post_form(
        &client,
        format!("{base}/cart/update"),
        &[("name", "Mafe"), ("quantity", "3")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(drawer.contains("$53.97"));
    assert!(badge(&client, &base).await.contains(">3</span>"));

    let (_, drawer) = post_form(
        &client,
        format!("{base}/cart/update"),
        &[("name", "Mafe"), ("quantity", "0")],
    )
    .await;
    assert!(drawer.contains("Your cart is empty"));
    assert!(badge(&client, &base).await.contains("empty"));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let base = spawn_site().await;
    let client = browser();
    add(&client, &base, "Accara").await;
    add(&client, &base, "Fataya").await;
    add(&client, &base, "Thiakry").await;

    let (_, drawer) = post_form(&client, format!("{base}/cart/remove"), &[("name", "Fataya")]).await;
    assert!(!drawer.contains("Fataya"));
    assert!(drawer.contains("Accara"));
    assert!(badge(&client, &base).await.contains(">2</span>"));

    let resp = client.post(format!("{base}/cart/clear")).send().await.unwrap();
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
    assert!(badge(&client, &base).await.contains("empty"));
}

#[tokio::test]
async fn test_checkout_empty_cart_prompts() {
    let base = spawn_site().await;
    let client = browser();

    let resp = client.post(format!("{base}/cart/checkout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let base = spawn_site().await;
    let client = browser();
    add(&client, &base, "Yassa Poulet").await;

    let resp = client.post(format!("{base}/cart/checkout")).send().await.unwrap();
    let body = resp.text().await.unwrap();
    assert!(body.contains("Thank you for your order! Your food will be prepared shortly."));
    assert!(badge(&client, &base).await.contains("empty"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let base = spawn_site().await;
    let alice = browser();
    let bob = browser();

    add(&alice, &base, "Bissap").await;

    assert!(badge(&alice, &base).await.contains(">1</span>"));
    assert!(badge(&bob, &base).await.contains("empty"));
}

#[tokio::test]
async fn test_saved_cart_restores_badge_on_reload() {
    let base = spawn_site().await;
    let client = browser();
    add(&client, &base, "Bissap").await;
    add(&client, &base, "Ginger Juice").await;

    let page = client
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(">2</span>"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_from_one_visitor_all_count() {
    let base = spawn_site().await;
    let client = browser();
    // The first request assigns the visitor cookie
    add(&client, &base, "Accara").await;

    let dishes = [
        "Fataya",
        "Thieboudienne",
        "Yassa Poulet",
        "Mafe",
        "Thiakry",
        "Bissap",
        "Ginger Juice",
    ];
    let mut adds = tokio::task::JoinSet::new();
    for dish in dishes {
        let client = client.clone();
        let base = base.clone();
        adds.spawn(async move { add(&client, &base, dish).await.status() });
    }
    while let Some(status) = adds.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    assert!(badge(&client, &base).await.contains(">8</span>"));
    let drawer = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(drawer.matches("class=\"cart-item\"").count(), 8);
}

// ============================================================================
// Contact & toast
// ============================================================================

#[tokio::test]
async fn test_contact_bad_email_is_bad_request() {
    let base = spawn_site().await;
    let (status, body) = post_form(
        &browser(),
        format!("{base}/contact"),
        &[("name", "Awa"), ("email", "not-an-email"), ("message", "Hello")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Please enter a valid email address."));
    assert!(body.contains("value=\"Awa\""));
}

#[tokio::test]
async fn test_contact_missing_message_is_bad_request() {
    let base = spawn_site().await;
    let (status, _) = post_form(
        &browser(),
        format!("{base}/contact"),
        &[("name", "Awa"), ("email", "awa@example.com")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_valid_is_acknowledged() {
    let base = spawn_site().await;
    let (status, body) = post_form(
        &browser(),
        format!("{base}/contact"),
        &[
            ("name", "Awa"),
            ("email", "awa@example.com"),
            ("message", "Do you cater?"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your message! We will get back to you soon."));
}

#[tokio::test]
async fn test_toast_dismiss_empties_slot() {
    let base = spawn_site().await;
    let body = browser()
        .get(format!("{base}/toast/dismiss"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("id=\"toast\""));
    assert!(!body.contains("class=\"toast\""));
    assert!(!body.contains("hx-swap-oob"));
}
