use market_history_sdk::{MarketDataClient, TimeRange};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = MarketDataClient::new()?;

    println!("Bitcoin detail");
    println!("--------------");
    let detail = client.get_detail(1).await?;
    match detail.get("data").and_then(|d| d.get("name")) {
        Some(name) => println!("name: {}", name),
        None => println!("(no detail available)"),
    }
    println!();

    println!("Bitcoin daily history");
    println!("---------------------");
    match client
        .get_historical_data(1, TimeRange::between("2022-12-01", "2022-12-03"))
        .await?
    {
        Some(table) => print!("{}", table),
        None => println!("(no data for the requested window)"),
    }

    Ok(())
}
