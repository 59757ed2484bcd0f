//! Business domain detection from column names.
//!
//! Column names are split into lowercase tokens and compared against each
//! domain's keyword list. A token matches a keyword when it is equal to it
//! or, for tokens of four characters or more, when the Jaro-Winkler
//! similarity reaches the configured threshold.

use datasight_model::{BusinessDomain, BusinessOptions, ColumnProfile, DomainScore};
use rapidfuzz::distance::jaro_winkler;

/// Shortest token compared fuzzily; shorter tokens must match exactly.
const MIN_FUZZY_LEN: usize = 4;

pub const SALES_KEYWORDS: &[&str] = &["revenue", "sales", "price", "amount", "total", "order"];
pub const FINANCE_KEYWORDS: &[&str] = &[
    "cost", "expense", "profit", "budget", "account", "balance", "margin", "income", "tax",
];
pub const MARKETING_KEYWORDS: &[&str] = &[
    "campaign",
    "click",
    "impression",
    "conversion",
    "ctr",
    "lead",
    "channel",
    "visit",
    "session",
    "spend",
];
pub const OPERATIONS_KEYWORDS: &[&str] = &[
    "quantity",
    "inventory",
    "stock",
    "production",
    "shipment",
    "delivery",
    "warehouse",
    "downtime",
    "throughput",
    "efficiency",
    "duration",
];

pub fn keywords(domain: BusinessDomain) -> &'static [&'static str] {
    match domain {
        BusinessDomain::Sales => SALES_KEYWORDS,
        BusinessDomain::Finance => FINANCE_KEYWORDS,
        BusinessDomain::Marketing => MARKETING_KEYWORDS,
        BusinessDomain::Operations => OPERATIONS_KEYWORDS,
        BusinessDomain::Generic => &[],
    }
}

/// Split a column name on non-alphanumerics and camelCase boundaries.
pub fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

pub fn token_matches(token: &str, keyword: &str, threshold: f64) -> bool {
    if token == keyword {
        return true;
    }
    if token.chars().count() < MIN_FUZZY_LEN || keyword.chars().count() < MIN_FUZZY_LEN {
        return false;
    }
    jaro_winkler::similarity(token.chars(), keyword.chars()) >= threshold
}

/// True when any token of `name` matches any of `keywords`.
pub fn name_matches(name: &str, keywords: &[&str], threshold: f64) -> bool {
    tokenize(name).iter().any(|token| {
        keywords
            .iter()
            .any(|keyword| token_matches(token, keyword, threshold))
    })
}

/// Score every detectable domain and pick the winner.
///
/// The highest score wins when it reaches `domain_min_matches`; ties go to
/// the earlier domain in sales, finance, marketing, operations order.
pub fn detect_domain(
    profiles: &[ColumnProfile],
    options: &BusinessOptions,
) -> (BusinessDomain, Vec<DomainScore>) {
    let scores: Vec<DomainScore> = BusinessDomain::DETECTABLE
        .iter()
        .map(|domain| {
            let matched_columns: Vec<String> = profiles
                .iter()
                .filter(|profile| {
                    name_matches(&profile.name, keywords(*domain), options.fuzzy_match_threshold)
                })
                .map(|profile| profile.name.clone())
                .collect();
            DomainScore {
                domain: *domain,
                score: matched_columns.len(),
                matched_columns,
            }
        })
        .collect();

    let mut winner: Option<&DomainScore> = None;
    for score in &scores {
        if score.score >= options.domain_min_matches
            && winner.is_none_or(|best| score.score > best.score)
        {
            winner = Some(score);
        }
    }
    let domain = winner.map_or(BusinessDomain::Generic, |score| score.domain);
    (domain, scores)
}
