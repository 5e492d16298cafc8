//! Keys CLI command.
//!
//! Shows the canonical comparison keys derived from a lead, for debugging
//! why two records did or did not match.

use crate::models::Lead;
use crate::services::deduplication::NormalizedKeySet;

/// Keys command handler.
pub struct KeysCommand;

impl KeysCommand {
    /// Creates a new keys command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the key set of a lead.
    #[must_use]
    pub fn run(&self, lead: &Lead) -> NormalizedKeySet {
        NormalizedKeySet::from_lead(lead)
    }
}

impl Default for KeysCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a key set, one `name: value` line per key.
#[must_use]
pub fn format_keys(keys: &NormalizedKeySet) -> String {
    let show = |value: Option<&str>| value.unwrap_or("-").to_string();
    let pair = keys
        .firm_attorney()
        .map_or_else(|| "-".to_string(), |p| format!("{} / {}", p.firm, p.attorney));

    [
        format!("email:          {}", show(keys.email.as_deref())),
        format!("phone:          {}", show(keys.phone.as_deref())),
        format!("website:        {}", show(keys.website.as_deref())),
        format!("firm:           {}", show(keys.firm.as_deref())),
        format!("attorney:       {}", show(keys.attorney.as_deref())),
        format!("firm+attorney:  {pair}"),
        format!("has signal:     {}", keys.has_signal()),
    ]
    .join("\n")
}
