//! Sharing-link normalization for embeddable display.
//!
//! Administrators paste whatever sharing link their content host hands them;
//! browsing surfaces need a URL that works as an iframe `src` or `<img>`
//! source. The functions here rewrite the known link shapes and pass
//! everything else through untouched. They are pure string transforms:
//! no network requests, no validation of whether the referenced content
//! actually exists (a broken identifier surfaces later as a failed embed,
//! which the presentation layer handles).
//!
//! Recognized shapes, first match wins:
//!
//! | Input | Output |
//! |-------|--------|
//! | `…drive.google.com/file/d/<ID>…` | `https://drive.google.com/file/d/<ID>/preview` |
//! | `…docs.google.com/document/d/<ID>…` | `https://docs.google.com/document/d/<ID>/preview` |
//! | `youtu.be/<ID>` or `youtube.com/watch?v=<ID>` | `https://www.youtube.com/embed/<ID>` |
//! | anything else | unchanged |

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// One rewrite rule: pattern with a single identifier capture, plus the
/// output template the identifier is interpolated into.
struct RewriteRule {
    pattern: &'static str,
    template: &'static str,
}

/// Document-host rules, in match order. Identifiers are opaque tokens
/// (alphanumeric plus hyphen/underscore); no length or checksum checks.
const REWRITE_RULES: [RewriteRule; 2] = [
    // Drive file share links: /file/d/FILE_ID/view -> /file/d/FILE_ID/preview
    RewriteRule {
        pattern: r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)",
        template: "https://drive.google.com/file/d/{id}/preview",
    },
    // Docs edit links: /document/d/DOC_ID/edit -> /document/d/DOC_ID/preview
    RewriteRule {
        pattern: r"docs\.google\.com/document/d/([A-Za-z0-9_-]+)",
        template: "https://docs.google.com/document/d/{id}/preview",
    },
];

static COMPILED_RULES: OnceLock<Vec<Regex>> = OnceLock::new();

fn compiled_rules() -> &'static [Regex] {
    COMPILED_RULES.get_or_init(|| {
        REWRITE_RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).expect("rewrite pattern should compile"))
            .collect()
    })
}

/// Convert a sharing link into an embeddable preview link.
///
/// Unrecognized or malformed input is returned unchanged, so direct links
/// to self-hosted content keep working without special-casing. Applying
/// this to an already-normalized link is a no-op.
pub fn to_embeddable(url: &str) -> String {
    for (regex, rule) in compiled_rules().iter().zip(REWRITE_RULES.iter()) {
        if let Some(caps) = regex.captures(url) {
            return rule.template.replace("{id}", &caps[1]);
        }
    }

    let id = video_id(url);
    if !id.is_empty() {
        return format!("https://www.youtube.com/embed/{}", id);
    }

    url.to_string()
}

/// Extract the video identifier from a watch link.
///
/// Handles the short-host form (`youtu.be/<ID>`, identifier in the path)
/// and the long-host form (`youtube.com/watch?v=<ID>`, identifier in the
/// `v` query parameter). Anything unparseable as a URL, or on an
/// unrecognized host, yields an empty string; callers treat that as
/// "cannot embed".
pub fn video_id(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    match parsed.host_str() {
        Some("youtu.be") => parsed.path().trim_start_matches('/').to_string(),
        Some("www.youtube.com") | Some("youtube.com") => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Convert a document-share link into a direct image URL.
///
/// Mind maps are stored as shared image files; the share link renders a
/// viewer page, not the image itself. This rewrites it to the host's
/// direct-content endpoint. Non-matching input passes through, which lets
/// admins use plain image URLs as well.
pub fn image_url(url: &str) -> String {
    if let Some(caps) = compiled_rules()[0].captures(url) {
        return format!("https://drive.google.com/uc?export=view&id={}", &caps[1]);
    }
    url.to_string()
}
