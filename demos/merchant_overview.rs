//! Example creating checkout links and summarizing account activity
//!
//! Usage: SNAILPAY_API_KEY=... cargo run --example merchant_overview

use rust_decimal::Decimal;
use snailpay::{LinkRequest, SnailPayClient, SnailPayError};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = SnailPayClient::from_env()?;

    println!("🔗 Creating checkout links...");
    let widget = LinkRequest::new("Widget", Decimal::new(500, 2));
    println!("  one-time:  {}", client.create_payment_link(&widget).await?);

    let membership = LinkRequest::new("Monthly membership", Decimal::new(1500, 2));
    println!(
        "  recurring: {}",
        client.create_subscription_link(&membership).await?
    );

    // Incomplete requests never leave the process
    match client.create_payment_link(&LinkRequest::default()).await {
        Err(SnailPayError::Validation { field }) => println!("  skipped: missing {field}"),
        other => println!("  unexpected: {:?}", other),
    }

    let (payments, subscriptions, payment_links, subscription_links, payouts) = tokio::join!(
        client.list_payments(),
        client.list_subscriptions(),
        client.list_payment_links(),
        client.list_subscription_links(),
        client.list_payouts(),
    );

    println!("\n📊 Account overview");
    println!("  payments:           {}", payments?.len());
    println!("  subscriptions:      {}", subscriptions?.len());
    println!("  payment links:      {}", payment_links?.len());
    println!("  subscription links: {}", subscription_links?.len());
    println!("  payouts:            {}", payouts?.len());

    Ok(())
}
