//! Marketing/tracking query parameter policy.
//!
//! A page reached through a campaign link (`?utm_source=...`, `?gclid=...`)
//! must not advertise its own URL as an hreflang alternate.

/// Exact tracking parameter names. Every `utm_`-prefixed name also counts.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "fbclid",
    "msclkid",
    "ref",
    "source",
    "campaign",
];

const UTM_PREFIX: &str = "utm_";

/// Whether a query parameter name is a tracking parameter.
pub fn is_tracking_param(name: &str) -> bool {
    name.starts_with(UTM_PREFIX) || TRACKING_PARAMS.contains(&name)
}

/// `false` when any query parameter name is a tracking parameter.
///
/// An empty query yields `true`.
pub fn should_include_self_referencing_hreflang<I, S>(param_names: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    !param_names
        .into_iter()
        .any(|name| is_tracking_param(name.as_ref()))
}
