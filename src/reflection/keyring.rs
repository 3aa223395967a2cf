use std::collections::HashMap;

pub(crate) const SERVICE_NAME: &str = "basket";
const KEYRING_SERVER: &str = "reflection-api";

/// Environment variable checked before the keyring.
pub const API_KEY_ENV: &str = "BASKET_API_KEY";

/// Find the reflection API key: environment first, then the system keyring.
/// A missing key is `Ok(None)`.
pub async fn load_api_key() -> Result<Option<String>, String> {
    if let Some(key) = clean_key(std::env::var(API_KEY_ENV).ok()) {
        return Ok(Some(key));
    }
    load_keyring_api_key().await
}

fn clean_key(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn attributes() -> HashMap<&'static str, &'static str> {
    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", KEYRING_SERVER);
    attrs
}

async fn load_keyring_api_key() -> Result<Option<String>, String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let items = keyring
        .search_items(&attributes())
        .await
        .map_err(|e| format!("Failed to search keyring: {}", e))?;

    if let Some(item) = items.first() {
        let secret_bytes = item
            .secret()
            .await
            .map_err(|e| format!("Failed to read secret: {}", e))?;
        let key = String::from_utf8(secret_bytes.to_vec())
            .map_err(|e| format!("Invalid UTF-8 in secret: {}", e))?;
        if !key.is_empty() {
            return Ok(Some(key));
        }
    }

    Ok(None)
}

/// Store the reflection API key in the system keyring, replacing any old one.
/// Blank keys are refused.
pub async fn store_api_key(key: &str) -> Result<(), String> {
    let key = clean_key(Some(key.to_string())).ok_or("API key is empty")?;
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    keyring
        .create_item("Basket Reflection API Key", &attributes(), key.as_bytes(), true)
        .await
        .map_err(|e| format!("Failed to store API key: {}", e))?;

    Ok(())
}
