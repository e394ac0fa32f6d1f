//! Property-based tests for the guidance engine
//!
//! - Every call counts exactly one consultation
//! - Any casing of an emergency keyword triggers the alert, quoting the input
//! - Inputs without emergency keywords never touch the emergency counter
//! - A failing collaborator is indistinguishable from offline mode

use super::testing::ScriptedCollaborator;
use super::emergency::EMERGENCY_KEYWORDS;
use super::*;
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn contains_emergency(text: &str) -> bool {
    let lowered = text.to_lowercase();
    EMERGENCY_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// An emergency keyword with randomized letter casing
fn arb_cased_keyword() -> impl Strategy<Value = String> {
    (
        prop::sample::select(EMERGENCY_KEYWORDS),
        prop::collection::vec(any::<bool>(), 32),
    )
        .prop_map(|(keyword, upper)| {
            keyword
                .chars()
                .zip(upper.into_iter().cycle())
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

fn arb_filler() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.]{0,30}"
}

/// Free text with no emergency keyword in it
fn arb_calm_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.']{0,60}".prop_filter("contains emergency keyword", |s| !contains_emergency(s))
}

fn arb_failure() -> impl Strategy<Value = LlmError> {
    prop_oneof![
        Just(LlmError::network("connection reset")),
        Just(LlmError::timeout("deadline")),
        Just(LlmError::rate_limit("quota exceeded")),
        Just(LlmError::server_error("502")),
        Just(LlmError::auth("bad key")),
        Just(LlmError::invalid_request("bad body")),
        Just(LlmError::malformed("not json")),
        Just(LlmError::unknown("???")),
    ]
}

proptest! {
    #[test]
    fn prop_every_call_counts_once(inputs in prop::collection::vec("[a-zA-Z ']{0,40}", 1..10)) {
        let engine = ResponseEngine::offline();
        let stats = ConsultationStats::new();
        block_on(async {
            for (i, input) in inputs.iter().enumerate() {
                engine.generate_response(input, &stats).await;
                prop_assert_eq!(stats.consultations(), i as u64 + 1);
            }
            Ok::<(), TestCaseError>(())
        })?;
        prop_assert_eq!(engine.community_stats().consultations(), inputs.len() as u64);
    }

    #[test]
    fn prop_emergency_keyword_any_case(
        prefix in arb_filler(),
        keyword in arb_cased_keyword(),
        suffix in arb_filler(),
    ) {
        let input = format!("{prefix}{keyword}{suffix}");
        let engine = ResponseEngine::offline();
        let stats = ConsultationStats::new();

        let guidance = block_on(engine.generate_response(&input, &stats));

        prop_assert_eq!(guidance.source, GuidanceSource::Emergency);
        prop_assert!(guidance.text.contains("EMERGENCY ALERT"));
        prop_assert!(guidance.text.contains(&input));
        prop_assert_eq!(stats.consultations(), 1);
        prop_assert_eq!(stats.emergencies(), 1);
    }

    #[test]
    fn prop_calm_text_never_counts_emergency(input in arb_calm_text()) {
        let engine = ResponseEngine::offline();
        let stats = ConsultationStats::new();

        let guidance = block_on(engine.generate_response(&input, &stats));

        prop_assert_ne!(guidance.source, GuidanceSource::Emergency);
        prop_assert_eq!(stats.emergencies(), 0);
        prop_assert_eq!(stats.consultations(), 1);
    }

    #[test]
    fn prop_degraded_matches_offline(input in arb_calm_text(), failure in arb_failure()) {
        let kind = failure.kind;
        let collaborator = Arc::new(ScriptedCollaborator::new());
        collaborator.fail(failure);
        let degraded_engine = ResponseEngine::with_collaborator(collaborator);

        let degraded = block_on(degraded_engine.generate_response(&input, &ConsultationStats::new()));
        let offline = block_on(ResponseEngine::offline().generate_response(&input, &ConsultationStats::new()));

        prop_assert_eq!(degraded.text, offline.text);
        prop_assert_eq!(degraded.source, offline.source);
        prop_assert_eq!(degraded.fallback_reason, Some(kind));
    }

    #[test]
    fn prop_offline_source_follows_rule_table(input in arb_calm_text()) {
        let guidance = block_on(ResponseEngine::offline().generate_response(&input, &ConsultationStats::new()));
        let expected = rules::find(&input.to_lowercase())
            .map_or(GuidanceSource::General, |rule| GuidanceSource::Condition(rule.name.to_string()));
        prop_assert_eq!(guidance.source, expected);
    }
}
