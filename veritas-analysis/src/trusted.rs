//! Allow-list of source URLs that may be returned to callers unmodified.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

pub struct TrustedPattern {
    pub label: &'static str,
    pub pattern: Regex,
}

const PATTERNS: [(&str, &str); 6] = [
    (
        "congress.gov bill",
        r"^https://www\.congress\.gov/bill/\d+th-congress/(house|senate)-bill/\d+",
    ),
    (
        "senate.gov roll call",
        r"^https://www\.senate\.gov/legislative/LIS/roll_call_votes/",
    ),
    ("house clerk votes", r"^https://clerk\.house\.gov/Votes/"),
    (
        "opensecrets member",
        r"^https://www\.opensecrets\.org/members-of-congress/",
    ),
    ("fec.gov", r"^https://www\.fec\.gov/"),
    ("ballotpedia", r"^https://ballotpedia\.org/"),
];

/// Ordered; the first match names the source.
pub static TRUSTED_URL_PATTERNS: LazyLock<Vec<TrustedPattern>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .filter_map(|&(label, re)| match Regex::new(re) {
            Ok(pattern) => Some(TrustedPattern { label, pattern }),
            Err(e) => {
                tracing::error!(label, error = %e, "trusted.pattern.invalid");
                None
            }
        })
        .collect()
});

/// Label of the first trusted pattern `url` matches, if it is a valid URL at all.
pub fn matching_pattern(url: &str) -> Option<&'static str> {
    if url.is_empty() || Url::parse(url).is_err() {
        return None;
    }
    TRUSTED_URL_PATTERNS
        .iter()
        .find(|p| p.pattern.is_match(url))
        .map(|p| p.label)
}

pub fn is_trusted_url(url: &str) -> bool {
    matching_pattern(url).is_some()
}

/// Keep `url` only when it is trusted.
pub fn sanitize_url(url: Option<String>) -> Option<String> {
    url.filter(|u| is_trusted_url(u))
}

/// Null every untrusted `supportingEvidence[].url`; nothing else changes.
///
/// Entries without a `url` get an explicit `null`; a non-string `url` is
/// untrusted. A missing or non-list `supportingEvidence` is left alone.
pub fn sanitize_evidence_urls(result: &mut Value) {
    let Some(entries) = result
        .get_mut("supportingEvidence")
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    for evidence in entries.iter_mut().filter_map(Value::as_object_mut) {
        let url = match evidence.remove("url") {
            Some(Value::String(url)) => Some(url),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::debug!(url = %other, "trusted.url.nulled");
                None
            }
        };
        if let Some(dropped) = url.as_deref().filter(|u| !is_trusted_url(u)) {
            tracing::debug!(url = %dropped, "trusted.url.nulled");
        }
        let kept = sanitize_url(url).map_or(Value::Null, Value::String);
        evidence.insert("url".to_string(), kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(TRUSTED_URL_PATTERNS.len(), PATTERNS.len());
    }

    #[test]
    fn congress_bill_is_preserved() {
        let url = "https://www.congress.gov/bill/118th-congress/house-bill/2640";
        assert_eq!(matching_pattern(url), Some("congress.gov bill"));
        assert_eq!(sanitize_url(Some(url.into())).as_deref(), Some(url));
    }

    #[test]
    fn untrusted_host_is_nulled() {
        let url = "https://example-townhall-transcript.com/2021/immigration-forum";
        assert!(!is_trusted_url(url));
        assert_eq!(sanitize_url(Some(url.into())), None);
    }

    #[test]
    fn each_source_is_recognised() {
        let cases = [
            (
                "https://www.senate.gov/legislative/LIS/roll_call_votes/vote1181/vote_118_1_00012.htm",
                "senate.gov roll call",
            ),
            ("https://clerk.house.gov/Votes/2023123", "house clerk votes"),
            (
                "https://www.opensecrets.org/members-of-congress/rick-scott/summary?cid=N00043290",
                "opensecrets member",
            ),
            ("https://www.fec.gov/data/candidate/S8FL00273/", "fec.gov"),
            ("https://ballotpedia.org/Rick_Scott", "ballotpedia"),
        ];
        for (url, label) in cases {
            assert_eq!(matching_pattern(url), Some(label), "{url}");
        }
    }

    #[test]
    fn near_misses_are_rejected() {
        for url in [
            "http://www.fec.gov/data",
            "https://fec.gov/data",
            "https://www.congress.gov/bill/118th-congress/house-resolution/12",
            "https://www.congress.gov/bill/house-bill/2640",
            "https://ballotpedia.org.evil.com/x",
            "https://clerk.house.gov/votes/2023123",
            "",
            "not a url",
        ] {
            assert!(!is_trusted_url(url), "{url} should not be trusted");
        }
    }

    #[test]
    fn evidence_entries_keep_every_other_key() {
        let mut result = json!({
            "intentSummary": "x",
            "supportingEvidence": [
                { "title": "FEC", "url": "https://www.fec.gov/data/", "note": "kept" },
                { "title": "Blog", "url": "https://example.com/post", "rank": 2 },
                { "title": "No link" },
                { "title": "Odd", "url": 17 },
                "stray text"
            ]
        });
        sanitize_evidence_urls(&mut result);
        assert_eq!(
            result,
            json!({
                "intentSummary": "x",
                "supportingEvidence": [
                    { "title": "FEC", "url": "https://www.fec.gov/data/", "note": "kept" },
                    { "title": "Blog", "url": null, "rank": 2 },
                    { "title": "No link", "url": null },
                    { "title": "Odd", "url": null },
                    "stray text"
                ]
            })
        );
    }

    #[test]
    fn results_without_evidence_are_untouched() {
        let mut result = json!({ "intentSummary": "x", "methodology": "y" });
        let before = result.clone();
        sanitize_evidence_urls(&mut result);
        assert_eq!(result, before);

        let mut not_a_list = json!({ "supportingEvidence": "none found" });
        sanitize_evidence_urls(&mut not_a_list);
        assert_eq!(not_a_list, json!({ "supportingEvidence": "none found" }));
    }

    #[test]
    fn sanitizing_is_idempotent() {
        assert_eq!(sanitize_url(None), None);
        assert_eq!(sanitize_url(sanitize_url(None)), None);

        let url = Some("https://www.fec.gov/data/".to_string());
        let once = sanitize_url(url.clone());
        let twice = sanitize_url(once.clone());
        assert_eq!(once, url);
        assert_eq!(twice, once);
    }
}
