// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::ValidataConfig;

/// Get the default configuration.
pub fn default_config() -> ValidataConfig {
    ValidataConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# validata configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

[validator]
group = "create"
default_error_code = 412

# Rules per group. Placeholders like {:limits.name} are filled from the data.
[rules.create]
email = "required|email"
username = ["required", "username", "max:{:limits.username}"]
iban = "nullable|iban"
isbn = "sometimes|isbn"
color = "hexcolor"
password = "required|min:8|confirmed"

[rules.update]
email = "sometimes|email"
username = "sometimes|username"

[messages]
"email.required" = "We need your :attribute."
"username.username" = "The :attribute may only contain letters, numbers, dots, dashes and underscores."

[attributes]
iban = "IBAN"
isbn = "ISBN"

[error_codes]
"email.required" = 4001
"email.email" = 4002
"username.username" = "invalid-username"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.validator.group, "create");
        assert!(config.messages.is_empty());
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: ValidataConfig = toml::from_str(example).expect("Example config should parse");
        assert!(config.rules.contains_group("create"));
        assert!(config.rules.contains_group("update"));
        assert_eq!(config.error_codes.len(), 3);
    }
}
