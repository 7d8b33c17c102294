use catbox_client::{CatboxClient, RetentionPeriod};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let file_path = args
        .next()
        .expect("usage: cargo run --example litterbox -- <path> [1h|12h|24h|72h|1w]");
    let retention = args
        .next()
        .map(RetentionPeriod::from)
        .unwrap_or_default();

    let client = CatboxClient::new()?;
    let url = client.upload_to_litterbox(file_path.as_str(), retention.clone())?;

    println!("Uploaded {file_path} for {retention}: {url}");
    Ok(())
}
