use serde::{Deserialize, Deserializer};

use crate::pagination::Page;

// `?page=` is best effort, anything that is not an integer means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<Page, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Page::new)
        .unwrap_or_default())
}
