//! Application components.

use kiosk_commerce::cart::CartRow;
use kiosk_commerce::catalog::Product;
use kiosk_commerce::checkout::CheckoutStep;
use kiosk_data::{FetchClient, HttpStorefrontApi, StorefrontConfig};
use kiosk_session::{CatalogView, Storefront, StorefrontSnapshot};
use leptos::prelude::*;

use crate::browser::{self, AlertNotifier};

type Shop = Storefront<HttpStorefrontApi, AlertNotifier>;

/// The controller, kept on the page thread.
type ShopHandle = StoredValue<Shop, LocalStorage>;

/// Latest snapshot pushed by the controller.
type ShopState = RwSignal<StorefrontSnapshot>;

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App(config: StorefrontConfig) -> impl IntoView {
    let client = match browser::page_origin() {
        Some(origin) => FetchClient::new().with_base_url(origin),
        None => FetchClient::new(),
    };
    let shop = Storefront::new(HttpStorefrontApi::new(client, config.api), AlertNotifier);

    let state: ShopState = RwSignal::new(shop.snapshot());
    shop.on_render(move |snapshot| state.set(snapshot.clone()));

    let handle: ShopHandle = StoredValue::new_local(shop.clone());
    leptos::task::spawn_local(async move {
        shop.start().await;
    });

    view! {
        <Header state=state/>
        <main>
            <CatalogPanel shop=handle state=state/>
            <CartPanel shop=handle state=state/>
            <CheckoutForm shop=handle state=state/>
        </main>
        <Footer/>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header(state: ShopState) -> impl IntoView {
    let zone = move || state.with(|s| s.zone_label().to_string());

    view! {
        <header>
            <h1>"Kiosk"</h1>
            <p class="zone">"Availability zone: " <span id="az">{zone}</span></p>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Kiosk storefront, Rust + WASM"</p>
        </footer>
    }
}

// ============================================================================
// Catalog Components
// ============================================================================

#[component]
fn CatalogPanel(shop: ShopHandle, state: ShopState) -> impl IntoView {
    // Only redraw cards when the catalog itself changes, so typed quantities
    // survive cart updates.
    let catalog = Memo::new(move |_| state.with(|s| s.catalog.clone()));

    view! {
        <section id="catalog">
            <h2>"Products"</h2>
            {move || match catalog.get() {
                CatalogView::Loading => view! { <ProductGridSkeleton/> }.into_any(),
                CatalogView::Failed(text) => view! {
                    <p id="product-grid" class="error">{text}</p>
                }.into_any(),
                CatalogView::Ready(products) => view! {
                    <div id="product-grid" class="products">
                        {products.into_iter().map(|product| {
                            view! { <ProductCard shop=shop product=product/> }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn ProductCard(shop: ShopHandle, product: Product) -> impl IntoView {
    let quantity = RwSignal::new("1".to_string());

    let image = (!product.image_key.is_empty())
        .then(|| shop.with_value(|s| s.api().endpoints().image_url(&product.image_key)));
    let name = product.name.clone();
    let alt = product.name.clone();
    let description = product.description.clone();
    let price = product.price_display();
    let stock = product.stock.to_string();
    let max = product.max_quantity().to_string();

    let add = move |_| {
        let raw = quantity.get_untracked();
        shop.with_value(|s| {
            s.add_to_cart(&product, &raw);
        });
    };

    view! {
        <div class="product">
            {image.map(|src| view! { <img src=src alt=alt/> })}
            <b>{name}</b>
            <p>{description}</p>
            <p class="price">"Price: " {price}</p>
            <p>"In stock: " {stock}</p>
            <label>
                "Quantity: "
                <input
                    type="number"
                    min="1"
                    max=max
                    prop:value=move || quantity.get()
                    on:input=move |ev| quantity.set(event_target_value(&ev))
                />
            </label>
            <button class="btn" on:click=add>"Add to Cart"</button>
        </div>
    }
}

// ============================================================================
// Cart Components
// ============================================================================

#[component]
fn CartPanel(shop: ShopHandle, state: ShopState) -> impl IntoView {
    let cart = Memo::new(move |_| state.with(|s| s.cart.clone()));
    let step = Memo::new(move |_| state.with(|s| s.checkout));
    let checkout_disabled =
        move || !cart.with(|c| c.checkout_enabled) || step.get() != CheckoutStep::Idle;

    view! {
        <section id="cart-section">
            <h2>"Your Cart"</h2>
            <ul id="cart-list">
                {move || {
                    let current = cart.get();
                    match current.placeholder() {
                        Some(text) => text.into_any(),
                        None => current.rows.into_iter().map(|row| {
                            view! { <CartLineItem shop=shop row=row/> }
                        }).collect::<Vec<_>>().into_any(),
                    }
                }}
            </ul>
            <p class="total">"Total: " {move || cart.with(|c| c.total.clone())}</p>
            <div class="cart-actions">
                <button
                    id="checkout-btn"
                    class="btn"
                    disabled=checkout_disabled
                    on:click=move |_| shop.with_value(|s| {
                        s.begin_checkout();
                    })
                >
                    "Checkout"
                </button>
                <button
                    id="clear-cart-btn"
                    class="btn btn-secondary"
                    on:click=move |_| shop.with_value(|s| s.clear_cart())
                >
                    "Clear Cart"
                </button>
            </div>
        </section>
    }
}

#[component]
fn CartLineItem(shop: ShopHandle, row: CartRow) -> impl IntoView {
    let index = row.index;

    view! {
        <li class="cart-line">
            // Name is escaped when the row is projected.
            <span inner_html=row.summary_html()></span>
            <button
                disabled=!row.can_decrement
                on:click=move |_| shop.with_value(|s| {
                    s.decrement_line(index);
                })
            >
                "-"
            </button>
            <button
                disabled=!row.can_increment
                on:click=move |_| shop.with_value(|s| {
                    s.increment_line(index);
                })
            >
                "+"
            </button>
            <button
                class="remove"
                on:click=move |_| shop.with_value(|s| {
                    s.remove_line(index);
                })
            >
                "Remove"
            </button>
        </li>
    }
}

// ============================================================================
// Checkout Components
// ============================================================================

#[component]
fn CheckoutForm(shop: ShopHandle, state: ShopState) -> impl IntoView {
    let step = Memo::new(move |_| state.with(|s| s.checkout));
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let submitting = move || step.get() == CheckoutStep::Submitting;

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let shop = shop.get_value();
        let buyer_name = name.get_untracked();
        let buyer_email = email.get_untracked();
        leptos::task::spawn_local(async move {
            if shop.submit_checkout(&buyer_name, &buyer_email).await == CheckoutStep::Succeeded {
                name.set(String::new());
                email.set(String::new());
            }
        });
    };

    view! {
        <Show when=move || step.get().shows_identity_form()>
            <form id="checkout-form" class="checkout" on:submit=submit>
                <h2>"Checkout"</h2>
                <label>
                    "Name: "
                    <input
                        type="text"
                        autocomplete="name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        disabled=submitting
                    />
                </label>
                <label>
                    "Email: "
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=submitting
                    />
                </label>
                <div class="cart-actions">
                    <button type="submit" class="btn" disabled=submitting>
                        {move || if submitting() { "Submitting..." } else { "Place Order" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        disabled=submitting
                        on:click=move |_| shop.with_value(|s| s.cancel_checkout())
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </Show>
    }
}

// ============================================================================
// Skeleton Components (Loading States)
// ============================================================================

#[component]
fn ProductGridSkeleton() -> impl IntoView {
    view! {
        <div class="products">
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
        </div>
    }
}

#[component]
fn ProductCardSkeleton() -> impl IntoView {
    view! {
        <div class="product">
            <div class="skeleton" style="width: 100%; height: 160px;"></div>
            <div class="skeleton" style="width: 80%; height: 1.25rem; margin-top: 0.5rem;"></div>
            <div class="skeleton" style="width: 40%; height: 1rem; margin-top: 0.5rem;"></div>
        </div>
    }
}
