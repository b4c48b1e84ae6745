//! PRIMERSTORE demo driver: runs one scripted storefront session end to end.

use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use primerstore::{
    Category, ChatAssistant, ChatConfig, CompletionClient, ContactInfo, Money, OrderStatus,
    ProductDraft, SignInProfile, Storefront, TicketDraft, Urgency, View,
};

fn draft(name: &str, price: i64, category: Category, stock: u32, blurb: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: Money::usd(Decimal::new(price, 0)),
        description: blurb.to_string(),
        image: format!("img/{}.webp", name.to_lowercase().replace(' ', "-")),
        category,
        stock,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut store = Storefront::new();

    // Back office seeds the catalog.
    store.sign_in_admin(SignInProfile {
        name: "Morgan".into(),
        email: "morgan@primerstore.test".into(),
        ..Default::default()
    });
    let speaker = store.create_product(draft(
        "Prism Speaker",
        129,
        Category::Audio,
        12,
        "Room-filling sound in a pocketable shell",
    ))?;
    store.add_variant(&speaker, "Color")?;
    store.add_option(&speaker, 0, "Graphite")?;
    store.add_option(&speaker, 0, "Snow")?;
    let watch = store.create_product(draft(
        "Pulse Watch",
        249,
        Category::Wearables,
        8,
        "Week-long battery, always-on display",
    ))?;
    store.create_product(draft(
        "Halo Lamp",
        59,
        Category::Home,
        20,
        "Warm ambient light with a touch dimmer",
    ))?;
    store.sign_out();

    // A shopper browses, fills the cart and checks out.
    store.sign_in(SignInProfile {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
        address: "1 Loop Road".into(),
    });
    store.navigate(View::Shop)?;
    store.toggle_wishlist(&watch);

    let mut selections = BTreeMap::new();
    selections.insert("Color".to_string(), "Graphite".to_string());
    store.add_to_cart(&speaker, 1, selections)?;
    store.add_to_cart(&watch, 1, BTreeMap::new())?;
    store.navigate(View::Cart)?;
    store.navigate(View::Checkout)?;
    let order_id = store.place_order(ContactInfo {
        name: "Ada Lovelace".into(),
        address: "1 Loop Road".into(),
        phone: "555-0100".into(),
    })?;
    tracing::info!(
        order = %order_id,
        view = %store.view(),
        tier = ?store.loyalty_tier(),
        "checkout complete"
    );

    let ticket_id = store.submit_ticket(TicketDraft {
        customer: "Ada".into(),
        subject: "Speaker arrived without its charging cable".into(),
        description: "The box only contained the speaker itself.".into(),
        category: "Shipping".into(),
        urgency: Urgency::Standard,
    })?;
    store.sign_out();

    // Back office works the ledgers.
    store.sign_in_admin(SignInProfile { name: "Morgan".into(), ..Default::default() });
    store.navigate(View::Admin)?;
    store.update_order_status(&order_id, OrderStatus::Processing)?;
    store.assign_ticket(&ticket_id)?;
    tracing::info!(
        orders = store.orders().len(),
        tickets = store.tickets().len(),
        "back office pass done"
    );

    // Chat widget, when a provider is configured.
    match ChatConfig::from_env() {
        Ok(config) => {
            let assistant = CompletionClient::new(&config)?;
            let reply = assistant
                .reply("Which speaker should I buy?", &store.catalog_context())
                .await;
            tracing::info!(%reply, "assistant replied");
        }
        Err(err) => {
            tracing::info!(%err, "chat provider not configured, skipping the chat demo");
        }
    }

    Ok(())
}
