//! Calendarific lookup without a model
//!
//! Run with: cargo run --example direct_lookup -- TW,2024

use holiday::tools::{CalendarificClient, HolidayLookup};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("CALENDARIFIC_API_KEY")
        .expect("CALENDARIFIC_API_KEY environment variable required");
    let query = std::env::args().nth(1).unwrap_or_else(|| "TW".to_string());

    let lookup = HolidayLookup::new(Arc::new(CalendarificClient::new(api_key)?));

    // Structured result
    match lookup.listing(&query).await {
        Ok(listing) => {
            println!("{} holidays in {} {}", listing.len(), listing.country, listing.year);
            for holiday in &listing.holidays {
                println!("  {}  {}", holiday.iso_date, holiday.name);
            }
        }
        Err(e) => println!("Lookup failed: {}", e),
    }

    // Same thing as the tool reports it to the model
    println!("\n{}", lookup.lookup(&query).await);

    Ok(())
}
