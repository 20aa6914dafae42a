//! Client behavior against a local canned-response HTTP server

use market_history_sdk::{ClientConfig, ClientError, MarketDataClient, TimeRange};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const HISTORICAL_BODY: &str = r#"{
    "data": {
        "id": 1,
        "name": "Bitcoin",
        "symbol": "BTC",
        "quotes": [
            {
                "timeOpen": "2022-12-01T00:00:00.000Z",
                "quote": {
                    "open": 17165.53, "high": 17197.49, "low": 16888.38,
                    "close": 16978.26, "volume": 21110935674.12,
                    "marketCap": 326409508203.45,
                    "timestamp": "2022-12-01T23:59:59.999Z"
                }
            },
            {
                "timeOpen": "2022-12-02T00:00:00.000Z",
                "quote": {
                    "open": 16968.68, "high": 17088.66, "low": 16877.88,
                    "close": 17088.66, "volume": 19539705127.46,
                    "marketCap": 328491679165.28,
                    "timestamp": "2022-12-02T23:59:59.999Z"
                }
            },
            {
                "timeOpen": "2022-12-03T00:00:00.000Z",
                "quote": {
                    "open": 17088.96, "high": 17116.04, "low": 16939.13,
                    "close": 16982.81, "volume": 15347635273.18,
                    "marketCap": 326468934130.51,
                    "timestamp": "2022-12-03T23:59:59.999Z"
                }
            }
        ]
    },
    "status": {"error_code": "0", "error_message": "SUCCESS"}
}"#;

/// Serves a single HTTP request with a canned status line and body
async fn spawn_one_shot(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            // Drain the request head; the client never sends a body
            let mut buf = [0u8; 4096];
            loop {
                match socket.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => {
                        if buf[..n].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/", addr)
}

fn client_for(base_url: String) -> MarketDataClient {
    MarketDataClient::with_config(ClientConfig {
        base_url,
        cash_id: 2781,
    })
    .unwrap()
}

#[tokio::test]
async fn historical_body_reshapes_into_a_table() {
    let base = spawn_one_shot("200 OK", HISTORICAL_BODY).await;

    let table = client_for(base)
        .get_historical_data(1, TimeRange::between("2022-12-01", "2022-12-04"))
        .await
        .unwrap()
        .expect("three quotes should produce a table");

    assert_eq!(table.len(), 3);
    assert_eq!(table.symbol(), "BTC");

    let dates: Vec<String> = table.dates().iter().map(|d| d.to_string()).collect();
    assert_eq!(dates, ["2022-12-01", "2022-12-02", "2022-12-03"]);
    assert_eq!(table.first().open, 17165.53);
    assert_eq!(table.last().close, 16982.81);
}

#[tokio::test]
async fn detail_body_passes_through() {
    let base = spawn_one_shot("200 OK", r#"{"data": {"id": 1, "symbol": "BTC"}}"#).await;

    let detail = client_for(base).get_detail(1).await.unwrap();
    assert_eq!(detail["data"]["symbol"], "BTC");
}

#[tokio::test]
async fn non_success_status_degrades_to_an_empty_detail() {
    let base = spawn_one_shot("503 Service Unavailable", "upstream down").await;

    let detail = client_for(base).get_detail(1).await.unwrap();
    assert!(detail.is_empty());
}

#[tokio::test]
async fn non_success_status_degrades_to_absent_history() {
    let base = spawn_one_shot("404 Not Found", "no such currency").await;

    let table = client_for(base)
        .get_historical_data(1, TimeRange::last_two_days())
        .await
        .unwrap();
    assert!(table.is_none());
}

#[tokio::test]
async fn rate_limit_status_degrades_to_absent_history() {
    let base = spawn_one_shot("429 Too Many Requests", "slow down").await;

    let table = client_for(base)
        .get_historical_data(1, TimeRange::last_two_days())
        .await
        .unwrap();
    assert!(table.is_none());
}

#[tokio::test]
async fn connection_refused_degrades_the_same_way() {
    // Bind and immediately drop a listener so nothing serves the port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/", addr));
    assert!(client.get_detail(1).await.unwrap().is_empty());
    assert!(client
        .get_historical_data(1, TimeRange::last_two_days())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn empty_quotes_resolve_to_absent_history() {
    let base = spawn_one_shot("200 OK", r#"{"data": {"id": 1, "symbol": "BTC", "quotes": []}}"#).await;

    let table = client_for(base)
        .get_historical_data(1, TimeRange::last_two_days())
        .await
        .unwrap();
    assert!(table.is_none());
}

#[tokio::test]
async fn undecodable_body_surfaces_an_error() {
    let base = spawn_one_shot("200 OK", "<html>not json</html>").await;

    let err = client_for(base)
        .get_historical_data(1, TimeRange::last_two_days())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn bad_date_input_propagates_without_a_request() {
    // Unroutable base: if the client tried the network the error kind would differ
    let client = client_for("http://127.0.0.1:1/".to_string());

    let err = client
        .get_historical_data(1, TimeRange::since("yesterday-ish"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::TimeRange(_)));
}
