//! Media-type matching against an `Accept` header.
//!
//! Deliberately simple: media-range parameters are discarded and q-values
//! carry no weight, so "acceptable" is a plain yes/no per offer. Exact
//! match, `*/*`, and `type/*` ranges are recognized, nothing else.

/// True when `offer` (a concrete media type such as `application/json`)
/// is acceptable under `accept` (a comma-separated media-range list).
pub fn acceptable(offer: &str, accept: &str) -> bool {
    accept.split(',').any(|entry| range_matches(entry, offer))
}

fn range_matches(entry: &str, offer: &str) -> bool {
    let range = entry.split_once(';').map_or(entry, |(range, _params)| range).trim();
    if range == "*/*" {
        return true;
    }
    if let Some(main_type) = range.strip_suffix("/*") {
        return offer
            .split_once('/')
            .is_some_and(|(offer_type, _)| offer_type == main_type);
    }
    range == offer
}
