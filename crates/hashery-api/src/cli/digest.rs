//! One-shot commands that do not start the server.

use hashery_core::digest::SecretDigest;
use hashery_infra::crypto::hash::Sha512Base64Digest;
use hashery_types::config::ServiceConfig;

/// `hashd digest <SECRET>`: print the digest the server would publish.
pub fn print_digest(secret: &str, json: bool) -> anyhow::Result<()> {
    if secret.is_empty() {
        anyhow::bail!("secret must not be empty");
    }

    let digest = Sha512Base64Digest::new().digest(secret);
    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "digest": digest }))?);
    } else {
        println!("{digest}");
    }
    Ok(())
}

/// `hashd config`: print the effective configuration.
pub fn print_config(config: &ServiceConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}
