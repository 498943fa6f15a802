//! Property-based tests for the idempotent passes
//!
//! Payloads are assembled from fragments the generative service is known to produce
//! (sentinels, fences, forbidden directives, escaped line endings) mixed with free text.

use proptest::prelude::*;
use sheetcheat_core::latex::{complete, sanitize, slugify};

fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("COOR-BO-ZY\n".to_string()),
        Just("COOR-BO-ZY".to_string()),
        Just("```latex\n".to_string()),
        Just("```\n".to_string()),
        Just("% !TEX program = xelatex\n".to_string()),
        Just("\\usepackage{titlesec}\n".to_string()),
        Just("\\usepackage[compact]{amsmath, titlesec}\n".to_string()),
        Just("\\titleformat{\\section}{\\large}{}{0pt}{}\n".to_string()),
        Just("\\titlespacing*{\\section}{0pt}{1ex}{1ex}".to_string()),
        Just("\\section{Intro}\n".to_string()),
        Just("$a \\neq b$".to_string()),
        Just("\\n".to_string()),
        Just("\r\n".to_string()),
        Just("\u{feff}".to_string()),
        "[a-zA-Z0-9 {}]{0,12}",
    ]
}

fn payload_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in payload_strategy()) {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitize_never_leaves_leading_sentinel(raw in payload_strategy()) {
        let out = sanitize(&raw);
        prop_assert!(out.lines().next().map_or(true, |first| first.trim_end() != "COOR-BO-ZY"));
        prop_assert!(!out.contains("titlesec"));
    }

    #[test]
    fn complete_is_idempotent(raw in payload_strategy()) {
        let once = complete(&sanitize(&raw));
        prop_assert!(once.contains("\\begin{document}"), "no document root in {:?}", once);
        prop_assert_eq!(complete(&once), once);
    }

    #[test]
    fn slug_is_safe_and_stable(topic in "\\PC{0,24}") {
        let slug = slugify(&topic);
        prop_assert!(!slug.as_str().is_empty());
        prop_assert!(slug
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert_eq!(slugify(slug.as_str()), slug);
    }
}
