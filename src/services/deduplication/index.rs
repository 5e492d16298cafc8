//! In-memory match index.
//!
//! Lookup tables keyed by normalized signals. The index owns no decision
//! logic; it only answers "which known leads carry this key".

use crate::models::Lead;
use std::collections::HashMap;
use std::sync::Arc;

use super::normalizer::{FirmAttorneyKey, NormalizedKeySet};

/// Lookup structures over the known leads.
///
/// Email, phone and the firm + attorney pair are unique keys: inserting a
/// second lead with the same key replaces the first. Websites map to every
/// lead published under them, in insertion order.
///
/// A lead with no usable signal is accepted by [`MatchIndex::insert`] but is
/// reachable through no lookup.
///
/// Every `lookup_*` and [`MatchIndex::firm_members`] is a single hash lookup.
/// [`MatchIndex::firms`] is the exception: the engine's fuzzy firm check walks
/// it and scores every distinct firm, so that path costs O(firms) per check.
///
/// # Example
///
/// ```rust
/// use leadmatch::{Lead, MatchIndex};
/// use std::sync::Arc;
///
/// let mut index = MatchIndex::new();
/// index.insert(Arc::new(Lead::new().with_phone("(202) 555-0100")));
///
/// assert!(index.lookup_phone("2025550100").is_some());
/// assert!(index.lookup_email("john@testfirm.com").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MatchIndex {
    by_email: HashMap<String, Arc<Lead>>,
    by_phone: HashMap<String, Arc<Lead>>,
    by_firm_attorney: HashMap<FirmAttorneyKey, Arc<Lead>>,
    by_website: HashMap<String, Vec<Arc<Lead>>>,
    /// Leads carrying a firm + attorney pair, grouped by normalized firm.
    by_firm: HashMap<String, Vec<Arc<Lead>>>,
    /// Distinct normalized firms in first-insertion order.
    firm_order: Vec<String>,
}

impl MatchIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a lead under every signal it carries.
    ///
    /// Returns the key set that was computed for the lead.
    pub fn insert(&mut self, lead: Arc<Lead>) -> NormalizedKeySet {
        let keys = NormalizedKeySet::from_lead(&lead);

        if let Some(email) = &keys.email {
            self.by_email.insert(email.clone(), Arc::clone(&lead));
        }
        if let Some(phone) = &keys.phone {
            self.by_phone.insert(phone.clone(), Arc::clone(&lead));
        }
        if let Some(website) = &keys.website {
            self.by_website
                .entry(website.clone())
                .or_default()
                .push(Arc::clone(&lead));
        }
        if let Some(pair) = keys.firm_attorney() {
            let members = self.by_firm.entry(pair.firm.clone()).or_default();
            if members.is_empty() {
                self.firm_order.push(pair.firm.clone());
            }
            members.push(Arc::clone(&lead));
            self.by_firm_attorney.insert(pair, lead);
        }

        keys
    }

    /// Returns the lead registered under a normalized email.
    #[must_use]
    pub fn lookup_email(&self, email: &str) -> Option<&Arc<Lead>> {
        self.by_email.get(email)
    }

    /// Returns the lead registered under a normalized phone.
    #[must_use]
    pub fn lookup_phone(&self, phone: &str) -> Option<&Arc<Lead>> {
        self.by_phone.get(phone)
    }

    /// Returns the lead registered under a normalized firm + attorney pair.
    #[must_use]
    pub fn lookup_firm_attorney(&self, key: &FirmAttorneyKey) -> Option<&Arc<Lead>> {
        self.by_firm_attorney.get(key)
    }

    /// Returns every lead published under a normalized website.
    #[must_use]
    pub fn lookup_website(&self, website: &str) -> &[Arc<Lead>] {
        self.by_website.get(website).map_or(&[], Vec::as_slice)
    }

    /// Returns the leads with an attorney under a normalized firm name.
    #[must_use]
    pub fn firm_members(&self, firm: &str) -> &[Arc<Lead>] {
        self.by_firm.get(firm).map_or(&[], Vec::as_slice)
    }

    /// Iterates the distinct normalized firm names in first-insertion order.
    pub fn firms(&self) -> impl Iterator<Item = &str> {
        self.firm_order.iter().map(String::as_str)
    }

    /// Number of distinct emails indexed.
    #[must_use]
    pub fn email_count(&self) -> usize {
        self.by_email.len()
    }

    /// Number of distinct phones indexed.
    #[must_use]
    pub fn phone_count(&self) -> usize {
        self.by_phone.len()
    }

    /// Number of distinct firm + attorney pairs indexed.
    #[must_use]
    pub fn firm_attorney_count(&self) -> usize {
        self.by_firm_attorney.len()
    }

    /// Number of distinct websites indexed.
    #[must_use]
    pub fn website_count(&self) -> usize {
        self.by_website.len()
    }

    /// Number of distinct firms indexed.
    #[must_use]
    pub fn firm_count(&self) -> usize {
        self.firm_order.len()
    }
}
