//! Exclusion of aggregator and bank domains.
//!
//! Matching is a plain substring test against the lowercased domain, so
//! an entry such as `"bank"` removes every domain containing those
//! characters anywhere (`sberbank.ru`, `bankstoday.net`, `mybank.example`
//! and also `banking-news.example`). Subdomain, prefix and ccTLD variants
//! of a listed brand are caught without enumerating them.

use std::collections::HashSet;

use crate::types::SiteRecord;

/// Built-in aggregator and bank entries.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    // Aggregators and financial media
    "banki.ru",
    "sravni.ru",
    "bankiros.ru",
    "vbr.ru",
    "sreavu.ru",
    "13min.ru",
    "brobank.ru",
    "viberu.ru",
    "calculator-credit.ru",
    "kredity.ru",
    "consultant.ru",
    "rbc.ru",
    "financer.com",
    "bankstoday.net",
    "vsetarify.com",
    "mainfin.ru",
    "rfinansist.ru",
    // Banks
    "sberbank.ru",
    "vtb.ru",
    "alfabank.ru",
    "gazprombank.ru",
    "raiffeisen.ru",
    "rshb.ru",
    "tinkoff.ru",
    "open.ru",
    "otpbank.ru",
    "psbank.ru",
    "mkb.ru",
    "sovcombank.ru",
    "unicredit.ru",
    "citibank.ru",
    "pochtabank.ru",
    "uralsib.ru",
    "rosbank.ru",
    "roscap.ru",
    "homecredit.ru",
    "bancaintesa.ru",
    "bspb.ru",
    "absolutbank.ru",
    "mtsbank.ru",
    "ing.ru",
    "zenit.ru",
    "bank-hlynov.ru",
    "credit-suisse.com",
    "tkbbank.ru",
    "tbank.ru",
    "belgazzprombank.by",
    "belgazprombank.by",
    "myfin.by",
    "mtbank.by",
    "rsb.ru",
    "dtb1.ru",
    "nskbl.ru",
    "norvikbank.ru",
    "tatsotsbank.ru",
    "abank.ru",
    "ingobank.ru",
    "svoi.ru",
    "ubrir.ru",
    "creditural.ru",
    "samolet.ru",
    "ubrr.ru",
    "tochka.com",
    "business.yandex",
    "blog.domclick.ru",
    "bki-okb.ru",
    "kontur.ru",
    "finlab.ru",
    "ogrz.ru",
    "akbars.ru",
    "touchka.com",
    "royalfinance.ru",
    "finuslugi.ru",
    "vsezaimyonline.ru",
    // Brand tokens
    "bank",
    ".bank",
    "vtbbiz",
    "sberbank",
    "vtb",
    "alfabank",
    "tinkoff",
    "royal finance",
];

/// Immutable, ordered set of lowercase domain fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl Default for ExclusionList {
    /// The built-in [`DEFAULT_EXCLUSIONS`].
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

impl ExclusionList {
    /// Build a list from arbitrary entries.
    ///
    /// Entries are trimmed and lowercased; blank entries are dropped
    /// (an empty fragment would match every domain) and repeats keep
    /// their first position.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self { entries }
    }

    /// A new list with `extra` appended after the current entries.
    #[must_use]
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let combined: Vec<String> = self
            .entries
            .iter()
            .cloned()
            .chain(extra.into_iter().map(|e| e.as_ref().to_owned()))
            .collect();
        Self::new(combined)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `domain` contains any entry.
    pub fn matches(&self, domain: &str) -> bool {
        self.entries.iter().any(|entry| domain.contains(entry.as_str()))
    }

    /// Whether a record survives the filter. Records without a domain
    /// never do.
    pub fn keeps(&self, record: &SiteRecord) -> bool {
        !record.domain.is_empty() && !self.matches(&record.domain)
    }

    /// Keep the records that survive the filter, in their original order.
    pub fn filter(&self, records: Vec<SiteRecord>) -> Vec<SiteRecord> {
        records.into_iter().filter(|r| self.keeps(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str) -> SiteRecord {
        SiteRecord {
            title: format!("Title of {domain}"),
            url: format!("https://{domain}/"),
            domain: domain.to_string(),
            snippet: String::new(),
            position: 1,
            source: "google".into(),
            query: "кредит".into(),
        }
    }

    fn domains(records: &[SiteRecord]) -> Vec<&str> {
        records.iter().map(|r| r.domain.as_str()).collect()
    }

    #[test]
    fn default_list_keeps_every_builtin_entry() {
        let list = ExclusionList::default();
        let unique: HashSet<_> = list.entries().iter().collect();
        assert_eq!(unique.len(), list.len());
        assert_eq!(list.len(), DEFAULT_EXCLUSIONS.len());
    }

    #[test]
    fn sberbank_removed_example_kept() {
        let list = ExclusionList::default();
        let kept = list.filter(vec![record("sberbank.ru"), record("example.com")]);
        assert_eq!(domains(&kept), ["example.com"]);
    }

    #[test]
    fn substring_match_catches_variants() {
        let list = ExclusionList::default();
        assert!(list.matches("online.sberbank.ru"));
        assert!(list.matches("vtb.com"));
        assert!(list.matches("www.tinkoff.kz"));
        assert!(list.matches("banking-news.example"));
        assert!(!list.matches("example.com"));
    }

    #[test]
    fn final_pass_entries_are_excluded() {
        let list = ExclusionList::default();
        for domain in [
            "www.akbars.ru",
            "finuslugi.ru",
            "vsezaimyonline.ru",
            "ogrz.ru",
            "royalfinance.ru",
            "touchka.com",
            "vtbbizcredit.ru",
        ] {
            assert!(list.matches(domain), "{domain} should be excluded");
        }
    }

    #[test]
    fn entries_are_ascii() {
        assert!(DEFAULT_EXCLUSIONS.iter().all(|e| e.is_ascii()));
    }

    #[test]
    fn empty_domain_always_excluded() {
        let list = ExclusionList::new(Vec::<String>::new());
        let kept = list.filter(vec![record(""), record("a.ru")]);
        assert_eq!(domains(&kept), ["a.ru"]);
    }

    #[test]
    fn unknown_domain_survives_default_list() {
        let list = ExclusionList::default();
        assert!(list.keeps(&record("unknown")));
    }

    #[test]
    fn filter_is_stable_and_monotone() {
        let list = ExclusionList::new(["bad"]);
        let input = vec![
            record("c.ru"),
            record("bad.ru"),
            record("a.ru"),
            record("notbad.com"),
            record("b.ru"),
        ];
        let kept = list.filter(input.clone());
        assert!(kept.len() <= input.len());
        assert!(kept.iter().all(|r| input.contains(r)));
        assert_eq!(domains(&kept), ["c.ru", "a.ru", "b.ru"]);
    }

    #[test]
    fn new_normalises_entries() {
        let list = ExclusionList::new(["  Foo.RU ", "", "   ", "foo.ru", "bar"]);
        assert_eq!(list.entries(), ["foo.ru", "bar"]);
    }

    #[test]
    fn with_extra_appends_without_mutating() {
        let base = ExclusionList::new(["a"]);
        let extended = base.with_extra(["B", "a"]);
        assert_eq!(base.entries(), ["a"]);
        assert_eq!(extended.entries(), ["a", "b"]);
    }

    #[test]
    fn matching_is_case_sensitive_on_lowercased_domain() {
        let list = ExclusionList::new(["bank"]);
        // Domains are lowercased at normalisation time.
        assert!(!list.matches("BANK.example"));
        assert!(list.matches("bank.example"));
    }
}
