use catbox_client::CatboxClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let userhash = std::env::var("CATBOX_USERHASH").expect("CATBOX_USERHASH env var not set");

    let mut args = std::env::args().skip(1);
    let shortcode = args
        .next()
        .expect("usage: cargo run --example edit_album -- <shortcode> <title> [file...]");
    let title = args.next().unwrap_or_else(|| "untitled".to_string());
    let files: Vec<String> = args.collect();

    let client = CatboxClient::builder().auth_token(userhash).build()?;
    client.edit_album(&shortcode, &files, &title, "")?;

    println!("Updated album {shortcode}: {title} ({} files)", files.len());
    Ok(())
}
