pub mod bag;
pub mod board;
pub mod column;
pub mod drag;
pub mod page;
pub mod task;
pub mod todo;

use anyhow::Context;
use boardkit_domain::Bag;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse_json<T: DeserializeOwned>(raw: &str, what: &str) -> anyhow::Result<T> {
    serde_json::from_str(raw).with_context(|| format!("Invalid {} JSON", what))
}

/// Parse a JSON object argument into a bag.
fn parse_bag(raw: &str, what: &str) -> anyhow::Result<Bag> {
    match parse_json::<Value>(raw, what)? {
        Value::Object(bag) => Ok(bag),
        other => anyhow::bail!("{} must be a JSON object, got {}", what, other),
    }
}
