use catbox_client::CatboxClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let userhash = std::env::var("CATBOX_USERHASH").expect("CATBOX_USERHASH env var not set");
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: cargo run --example create_album -- <path>...");
        std::process::exit(2);
    }

    let client = CatboxClient::builder().auth_token(userhash).build()?;

    let urls = match client.upload_album(paths.iter().map(String::as_str)) {
        Ok(urls) => urls,
        Err(err) => {
            if let Some(uploaded) = err.partial_uploads() {
                eprintln!("Uploaded before failure: {uploaded:?}");
            }
            return Err(err.into());
        }
    };

    let names: Vec<&str> = urls
        .iter()
        .filter_map(|url| url.rsplit('/').next())
        .collect();
    let shortcode = client.create_album(&names, "test", "test description")?;

    println!("Created album {shortcode} with {} files", names.len());
    Ok(())
}
