use market_history_sdk::PriceStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("CoinMarketCap price stream");
    println!("==========================");

    let stream = PriceStream::new();
    let mut rx = stream.subscribe();

    // Print a handful of raw frames, then stop
    for _ in 0..10 {
        let frame = rx.recv().await?;
        println!("{}", frame);
    }

    Ok(())
}
