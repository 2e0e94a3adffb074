//! End-to-end session tests against an in-memory storefront service.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;
use kiosk_commerce::catalog::Product;
use kiosk_commerce::checkout::{CheckoutStep, PurchaseItem, PurchaseRequest, PurchaseResponse};
use kiosk_commerce::{Money, ProductId};
use kiosk_data::{FetchError, StorefrontApi};
use kiosk_session::{
    CatalogView, Storefront, CATALOG_ERROR_TEXT, TRANSPORT_FAILURE_MESSAGE, UNKNOWN_ZONE,
};

#[derive(Default)]
struct MockApi {
    catalog: RefCell<Option<Vec<Product>>>,
    catalog_calls: Cell<usize>,
    purchases: RefCell<Vec<PurchaseRequest>>,
    purchase_replies: RefCell<VecDeque<Result<PurchaseResponse, FetchError>>>,
    zone: RefCell<Option<String>>,
    /// Holds catalog reloads (second call onwards) until released.
    reload_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockApi {
    fn with_catalog(products: Vec<Product>) -> Self {
        let api = Self::default();
        *api.catalog.borrow_mut() = Some(products);
        api
    }

    fn reply(self, reply: Result<PurchaseResponse, FetchError>) -> Self {
        self.purchase_replies.borrow_mut().push_back(reply);
        self
    }
}

#[async_trait(?Send)]
impl StorefrontApi for MockApi {
    async fn products(&self) -> Result<Vec<Product>, FetchError> {
        let call = self.catalog_calls.get() + 1;
        self.catalog_calls.set(call);
        let gate = if call > 1 {
            self.reload_gate.borrow_mut().take()
        } else {
            None
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.catalog
            .borrow()
            .clone()
            .ok_or_else(|| FetchError::RequestError("connection refused".to_string()))
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, FetchError> {
        self.purchases.borrow_mut().push(request.clone());
        self.purchase_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(PurchaseResponse::accepted()))
    }

    async fn zone(&self) -> Result<String, FetchError> {
        self.zone.borrow().clone().ok_or(FetchError::HttpError {
            status: 404,
            message: "Not Found".to_string(),
        })
    }
}

#[derive(Clone, Default)]
struct Alerts(Rc<RefCell<Vec<String>>>);

impl Alerts {
    fn seen(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl kiosk_session::Notifier for Alerts {
    fn notify(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

fn lamp() -> Product {
    Product::new(ProductId::new(1), "Lamp", Money::from_cents(1000), 5)
}

fn mug() -> Product {
    Product::new(ProductId::new(2), "Mug", Money::from_cents(450), 10)
}

fn storefront(api: MockApi) -> (Storefront<MockApi, Alerts>, Alerts) {
    let alerts = Alerts::default();
    (Storefront::new(api, alerts.clone()), alerts)
}

#[test]
fn test_walkthrough_add_clamp_decrement_checkout() {
    let (shop, alerts) = storefront(MockApi::with_catalog(vec![lamp()]));
    block_on(shop.load_catalog());

    assert!(shop.add_to_cart(&lamp(), "3"));
    let cart = shop.snapshot().cart;
    assert_eq!(cart.rows.len(), 1);
    assert_eq!(cart.rows[0].quantity, 3);
    assert_eq!(cart.rows[0].line_total, "$30.00");
    assert!(cart.checkout_enabled);

    assert!(shop.add_to_cart(&lamp(), "4"));
    let cart = shop.snapshot().cart;
    assert_eq!(cart.rows[0].quantity, 5);
    assert_eq!(cart.rows[0].line_total, "$50.00");

    assert!(shop.decrement_line(0));
    assert!(shop.decrement_line(0));
    assert_eq!(shop.snapshot().cart.rows[0].quantity, 3);

    assert!(shop.begin_checkout());
    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(outcome, CheckoutStep::Succeeded);

    let purchases = shop.api().purchases.borrow();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].buyer_name, "Ada");
    assert_eq!(purchases[0].buyer_email, "ada@example.com");
    assert_eq!(
        purchases[0].items,
        vec![PurchaseItem {
            product_id: ProductId::new(1),
            quantity: 3
        }]
    );

    let snapshot = shop.snapshot();
    assert!(snapshot.cart.is_empty());
    assert!(!snapshot.cart.checkout_enabled);
    assert_eq!(snapshot.checkout, CheckoutStep::Idle);
    assert_eq!(shop.api().catalog_calls.get(), 2);
    assert_eq!(alerts.seen(), vec!["Purchase successful!".to_string()]);
}

#[test]
fn test_checkout_reopens_while_catalog_reload_is_pending() {
    let (release, gate) = oneshot::channel();
    let api = MockApi::with_catalog(vec![lamp(), mug()]);
    *api.reload_gate.borrow_mut() = Some(gate);
    let (shop, alerts) = storefront(api);
    block_on(shop.load_catalog());

    shop.add_to_cart(&lamp(), "1");
    assert!(shop.begin_checkout());

    block_on(async {
        let submit = shop.submit_checkout("Ada", "ada@example.com");
        let shopper = async {
            // Purchase acknowledged, catalog reload still outstanding.
            assert_eq!(shop.api().catalog_calls.get(), 2);
            let snapshot = shop.snapshot();
            assert_eq!(snapshot.checkout, CheckoutStep::Idle);
            assert!(snapshot.cart.is_empty());

            assert!(shop.add_to_cart(&mug(), "2"));
            assert!(shop.snapshot().cart.checkout_enabled);
            assert!(shop.begin_checkout());
            let _ = release.send(());
        };
        let (outcome, ()) = futures::join!(submit, shopper);
        assert_eq!(outcome, CheckoutStep::Succeeded);
    });

    let snapshot = shop.snapshot();
    assert_eq!(snapshot.checkout, CheckoutStep::CollectingIdentity);
    assert_eq!(snapshot.cart.rows.len(), 1);
    assert_eq!(snapshot.catalog.products().map(<[Product]>::len), Some(2));
    assert_eq!(alerts.seen(), vec!["Purchase successful!".to_string()]);
}

#[test]
fn test_empty_cart_checkout_sends_nothing() {
    let (shop, alerts) = storefront(MockApi::with_catalog(vec![lamp()]));

    assert!(!shop.begin_checkout());
    assert_eq!(shop.snapshot().checkout, CheckoutStep::Idle);

    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(outcome, CheckoutStep::Idle);

    assert!(shop.api().purchases.borrow().is_empty());
    assert_eq!(alerts.seen(), vec!["Cart is empty".to_string()]);
}

#[test]
fn test_cart_emptied_while_form_open() {
    let (shop, alerts) = storefront(MockApi::default());
    shop.add_to_cart(&lamp(), "1");
    assert!(shop.begin_checkout());
    shop.clear_cart();

    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(outcome, CheckoutStep::Idle);
    assert!(shop.api().purchases.borrow().is_empty());
    assert_eq!(alerts.seen(), vec!["Cart is empty".to_string()]);
}

#[test]
fn test_missing_identity_is_not_submitted() {
    let (shop, alerts) = storefront(MockApi::default());
    shop.add_to_cart(&lamp(), "2");

    assert!(shop.begin_checkout());
    assert_eq!(shop.snapshot().checkout, CheckoutStep::CollectingIdentity);

    let outcome = block_on(shop.submit_checkout("Ada", "   "));
    assert_eq!(outcome, CheckoutStep::Idle);
    assert!(shop.api().purchases.borrow().is_empty());
    assert_eq!(shop.snapshot().cart.rows[0].quantity, 2);
    assert_eq!(alerts.seen(), vec!["Name and email required".to_string()]);
}

#[test]
fn test_cancelled_checkout_returns_to_idle() {
    let (shop, alerts) = storefront(MockApi::default());
    shop.add_to_cart(&lamp(), "1");

    assert!(shop.begin_checkout());
    shop.cancel_checkout();
    assert_eq!(shop.snapshot().checkout, CheckoutStep::Idle);
    assert!(alerts.seen().is_empty());
}

#[test]
fn test_business_failure_keeps_cart() {
    let api = MockApi::with_catalog(vec![lamp(), mug()])
        .reply(Ok(PurchaseResponse::rejected(Some("Insufficient stock for Lamp"))));
    let (shop, alerts) = storefront(api);
    block_on(shop.load_catalog());

    shop.add_to_cart(&lamp(), "2");
    shop.add_to_cart(&mug(), "1");
    let before = shop.snapshot().cart;

    shop.begin_checkout();
    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));

    assert_eq!(outcome, CheckoutStep::Failed);
    assert_eq!(shop.snapshot().cart, before);
    assert_eq!(shop.snapshot().checkout, CheckoutStep::Idle);
    assert_eq!(shop.api().catalog_calls.get(), 1);
    assert_eq!(alerts.seen(), vec!["Insufficient stock for Lamp".to_string()]);
}

#[test]
fn test_business_failure_without_message() {
    let api = MockApi::default().reply(Ok(PurchaseResponse::rejected(None)));
    let (shop, alerts) = storefront(api);
    shop.add_to_cart(&lamp(), "1");

    shop.begin_checkout();
    block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(alerts.seen(), vec!["Purchase failed".to_string()]);
}

#[test]
fn test_transport_failure_keeps_cart_and_allows_retry() {
    let api = MockApi::default().reply(Err(FetchError::RequestError("offline".to_string())));
    let (shop, alerts) = storefront(api);
    shop.add_to_cart(&lamp(), "2");

    shop.begin_checkout();
    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(outcome, CheckoutStep::Failed);
    assert_eq!(shop.snapshot().cart.rows[0].quantity, 2);
    assert_eq!(alerts.seen(), vec![TRANSPORT_FAILURE_MESSAGE.to_string()]);

    // Second attempt goes through.
    assert!(shop.begin_checkout());
    let outcome = block_on(shop.submit_checkout("Ada", "ada@example.com"));
    assert_eq!(outcome, CheckoutStep::Succeeded);
    assert!(shop.snapshot().cart.is_empty());
    assert_eq!(shop.api().purchases.borrow().len(), 2);
}

#[test]
fn test_invalid_quantities_notify_without_mutation() {
    let (shop, alerts) = storefront(MockApi::default());
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    shop.on_render(move |_| counter.set(counter.get() + 1));
    let initial = renders.get();

    assert!(!shop.add_to_cart(&lamp(), "0"));
    assert!(!shop.add_to_cart(&lamp(), "abc"));
    assert!(!shop.add_to_cart(&lamp(), "6"));

    assert!(shop.snapshot().cart.is_empty());
    assert_eq!(renders.get(), initial);
    assert_eq!(
        alerts.seen(),
        vec![
            "Enter a valid quantity".to_string(),
            "Enter a valid quantity".to_string(),
            "Not enough stock".to_string(),
        ]
    );
}

#[test]
fn test_dead_index_is_a_no_op() {
    let (shop, _alerts) = storefront(MockApi::default());
    shop.add_to_cart(&lamp(), "1");

    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    shop.on_render(move |_| counter.set(counter.get() + 1));
    let initial = renders.get();

    assert!(!shop.remove_line(3));
    assert!(!shop.increment_line(1));
    assert!(!shop.decrement_line(7));
    assert_eq!(renders.get(), initial);
    assert_eq!(shop.snapshot().cart.rows.len(), 1);
}

#[test]
fn test_remove_shifts_following_lines() {
    let (shop, _alerts) = storefront(MockApi::default());
    shop.add_to_cart(&lamp(), "1");
    shop.add_to_cart(&mug(), "2");

    assert!(shop.remove_line(0));
    let cart = shop.snapshot().cart;
    assert_eq!(cart.rows.len(), 1);
    assert_eq!(cart.rows[0].index, 0);
    assert_eq!(cart.rows[0].product_id, ProductId::new(2));
}

#[test]
fn test_render_callback_sees_each_change() {
    let (shop, _alerts) = storefront(MockApi::default());
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    shop.on_render(move |snapshot| sink.borrow_mut().push(snapshot.cart.item_count));

    shop.add_to_cart(&mug(), "2");
    shop.increment_line(0);
    shop.clear_cart();

    assert_eq!(*counts.borrow(), vec![0, 2, 3, 0]);
}

#[test]
fn test_catalog_failure_shows_error_text() {
    let (shop, alerts) = storefront(MockApi::default());
    assert_eq!(shop.snapshot().catalog, CatalogView::Loading);

    assert!(!block_on(shop.load_catalog()));
    assert_eq!(
        shop.snapshot().catalog,
        CatalogView::Failed(CATALOG_ERROR_TEXT.to_string())
    );
    assert!(alerts.seen().is_empty());
}

#[test]
fn test_zone_label() {
    let api = MockApi::default();
    *api.zone.borrow_mut() = Some("us-east-1a\n".to_string());
    let (shop, _alerts) = storefront(api);

    assert_eq!(shop.snapshot().zone_label(), "\u{2026}");
    block_on(shop.load_zone());
    assert_eq!(shop.snapshot().zone_label(), "us-east-1a");
}

#[test]
fn test_zone_falls_back_to_unknown() {
    let (shop, _alerts) = storefront(MockApi::default());
    block_on(shop.load_zone());
    assert_eq!(shop.snapshot().zone_label(), UNKNOWN_ZONE);

    let api = MockApi::default();
    *api.zone.borrow_mut() = Some("  ".to_string());
    let (shop, _alerts) = storefront(api);
    block_on(shop.load_zone());
    assert_eq!(shop.snapshot().zone_label(), UNKNOWN_ZONE);
}

#[test]
fn test_start_loads_zone_and_catalog() {
    let api = MockApi::with_catalog(vec![lamp(), mug()]);
    *api.zone.borrow_mut() = Some("eu-west-2b".to_string());
    let (shop, _alerts) = storefront(api);

    block_on(shop.start());
    let snapshot = shop.snapshot();
    assert_eq!(snapshot.zone.as_deref(), Some("eu-west-2b"));
    assert_eq!(snapshot.catalog.products().map(<[Product]>::len), Some(2));
}

#[test]
fn test_hostile_product_name_is_escaped() {
    let (shop, _alerts) = storefront(MockApi::default());
    let product = Product::new(
        ProductId::new(9),
        "<script>alert('x')</script> & \"co\"",
        Money::from_cents(100),
        3,
    );
    shop.add_to_cart(&product, "1");

    let html = shop.snapshot().cart.rows[0].summary_html();
    let name_part = html.split(" \u{2014} ").next().unwrap_or_default();
    assert!(!name_part.contains('<'));
    assert!(!name_part.contains('"'));
    assert!(!name_part.contains('\''));
    assert!(name_part.starts_with("&lt;script>alert(&#039;x&#039;)"));
    assert!(name_part.contains("&amp; &quot;co&quot;"));
}
