use anyhow::Result;
use schedsync_core::remote::provider::Provider;

pub async fn run(provider_name: &str) -> Result<()> {
    let provider = Provider::from_name(provider_name);

    println!("Authenticating with {provider_name}...");

    // Provider handles the full OAuth flow and stores credentials/tokens
    let account = provider.authenticate().await?;

    println!("Authenticated as: {}\n", account);
    println!("Add the destination to your config:\n");
    println!("[destination]");
    println!("provider = \"{}\"", provider.name());
    println!("{}_account = \"{}\"", provider.name(), account);
    println!("\nRun `schedsync status` to preview the first sync.");

    Ok(())
}
