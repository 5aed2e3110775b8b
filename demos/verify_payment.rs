//! Example verifying a customer's payment code
//!
//! Usage: SNAILPAY_API_KEY=... cargo run --example verify_payment -- AB12CD34EF

use snailpay::SnailPayClient;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let code = std::env::args().nth(1).unwrap_or_default();
    let client = SnailPayClient::from_env()?;

    println!("🔍 Verifying code {:?}...", code);
    match client.verify_payment(&code).await? {
        Some(payment) => {
            println!("✅ Payment verified:");
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }
        None => println!("❌ Code not verified (malformed, unknown, or not yet paid)"),
    }

    Ok(())
}
