//! # Case variables
//!
//! Case files may use `{{variable}}` placeholders in URLs. Today the only
//! variable a run defines is `base_url`.

use std::collections::HashMap;

pub const BASE_URL_VAR: &str = "base_url";

/// Variables for a run rooted at `base_url`.
pub fn variables_for(base_url: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert(BASE_URL_VAR.to_string(), base_url.trim_end_matches('/').to_string());
    vars
}

/// Interpolate `{{variable}}` placeholders in the given text. Unknown
/// placeholders are left as they are.
pub fn interpolate(text: &str, variables: &HashMap<String, String>) -> String {
    let mut result = text.to_string();
    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
