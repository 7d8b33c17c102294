use catbox_client::CatboxClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let file_path = std::env::args()
        .nth(1)
        .expect("usage: cargo run --example upload_file -- <path>");

    // Anonymous upload unless a userhash is provided.
    let mut builder = CatboxClient::builder();
    if let Ok(userhash) = std::env::var("CATBOX_USERHASH") {
        builder = builder.auth_token(userhash);
    }
    let client = builder.build()?;

    let url = client.upload_file(file_path.as_str())?;
    println!("Uploaded {file_path} to {url}");
    Ok(())
}
