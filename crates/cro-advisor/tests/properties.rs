//! Property-based checks for the evaluator, aggregate and synthesizer.

use cro_advisor::optimizer::{
    combine_impacts, evaluate, synthesize, AggregatePolicy, PageProfile, ReportBuilder,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_flag() -> impl Strategy<Value = Option<bool>> {
    prop::option::of(any::<bool>())
}

fn arb_profile() -> impl Strategy<Value = PageProfile> {
    (
        (
            prop::option::of(1.0f64..2_000.0),
            prop::option::of(1.0f64..2_500.0),
            arb_flag(),
            arb_flag(),
            prop::option::of(0u32..10),
            arb_flag(),
            prop::option::of(prop::collection::vec("[a-z ]{3,20}", 0..8)),
        ),
        (
            arb_flag(),
            arb_flag(),
            arb_flag(),
            prop::option::of(0u32..5),
            arb_flag(),
            arb_flag(),
            arb_flag(),
            prop::option::of(0.2f64..9.0),
        ),
    )
        .prop_map(
            |(
                (current, original, warranty, trust, images, video, benefits),
                (reviews, urgency, action_cta, ctas, specs, faq, mobile, load),
            )| PageProfile {
                url: None,
                title: Some("Generated product".to_string()),
                current_price: current,
                original_price: original,
                has_warranty_badge: warranty,
                has_trust_badges: trust,
                image_count: images,
                has_video: video,
                benefits,
                has_reviews: reviews,
                has_urgency: urgency,
                has_action_oriented_cta: action_cta,
                cta_count: ctas,
                has_spec_table: specs,
                has_faq: faq,
                mobile_optimized: mobile,
                load_time_seconds: load,
            },
        )
}

fn rule_ids(profile: &PageProfile) -> HashSet<&'static str> {
    evaluate(profile)
        .iter()
        .map(|finding| finding.rule_id)
        .collect()
}

const FIXABLE_ASPECTS: usize = 14;

/// Brings each aspect selected in `fixes` up to a passing value.
fn apply_fixes(mut profile: PageProfile, fixes: &[bool]) -> PageProfile {
    let on = |index: usize| fixes.get(index).copied().unwrap_or(false);
    let set = |flag: &mut Option<bool>, index: usize| {
        if on(index) {
            *flag = Some(true);
        }
    };

    set(&mut profile.has_warranty_badge, 0);
    set(&mut profile.has_trust_badges, 1);
    if on(2) {
        profile.image_count = Some(profile.image_count.unwrap_or(0).max(4));
    }
    set(&mut profile.has_video, 3);
    if on(4) {
        let current = profile.current_price.unwrap_or(100.0);
        profile.current_price = Some(current);
        let original = profile.original_price.unwrap_or(0.0).max(current + 1.0);
        profile.original_price = Some(original);
    }
    if on(5) {
        let mut benefits = profile.benefits.take().unwrap_or_default();
        while benefits.len() < 5 {
            benefits.push(format!("benefit {}", benefits.len()));
        }
        profile.benefits = Some(benefits);
    }
    set(&mut profile.has_reviews, 6);
    set(&mut profile.has_urgency, 7);
    set(&mut profile.has_action_oriented_cta, 8);
    if on(9) {
        profile.cta_count = Some(profile.cta_count.unwrap_or(0).max(2));
    }
    set(&mut profile.has_spec_table, 10);
    set(&mut profile.has_faq, 11);
    set(&mut profile.mobile_optimized, 12);
    if on(13) {
        profile.load_time_seconds = Some(profile.load_time_seconds.unwrap_or(9.0).min(2.0));
    }
    profile
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(profile in arb_profile()) {
        prop_assert_eq!(evaluate(&profile), evaluate(&profile));
    }

    /// Fixing any subset of aspects never adds a finding.
    #[test]
    fn fixing_aspects_never_adds_findings(
        profile in arb_profile(),
        fixes in prop::collection::vec(any::<bool>(), FIXABLE_ASPECTS),
    ) {
        let before = rule_ids(&profile);
        let fixed = apply_fixes(profile, &fixes);
        let after = rule_ids(&fixed);
        prop_assert!(after.is_subset(&before), "{:?} not within {:?}", after, before);
    }

    #[test]
    fn fixing_every_aspect_clears_every_finding(profile in arb_profile()) {
        let fixed = apply_fixes(profile, &[true; FIXABLE_ASPECTS]);
        prop_assert!(evaluate(&fixed).is_empty());
    }

    #[test]
    fn aggregate_is_bounded_and_ordered(profile in arb_profile(), ceiling in 1.0f64..=100.0) {
        let findings = evaluate(&profile);
        let aggregate = combine_impacts(&findings, &AggregatePolicy { ceiling_pct: ceiling });
        prop_assert!(aggregate.low >= 0.0);
        prop_assert!(aggregate.low <= aggregate.high);
        prop_assert!(aggregate.high <= ceiling);
    }

    /// Adding findings never lowers either aggregate bound.
    #[test]
    fn aggregate_is_monotonic(take in 0usize..14, extra in 1usize..14) {
        let all = evaluate(&PageProfile::default());
        let smaller = &all[..take.min(all.len())];
        let larger = &all[..(take + extra).min(all.len())];
        let policy = AggregatePolicy::default();

        let small = combine_impacts(smaller, &policy);
        let large = combine_impacts(larger, &policy);
        prop_assert!(large.low >= small.low);
        prop_assert!(large.high >= small.high);
    }

    #[test]
    fn synthesis_resolves_injected_findings(profile in arb_profile()) {
        let findings = evaluate(&profile);
        let page = synthesize(&profile, &findings);
        let refired = rule_ids(page.resulting_profile());

        for rule_id in page.injected_rule_ids() {
            prop_assert!(!refired.contains(rule_id), "{} fired again", rule_id);
        }
        let again = synthesize(page.resulting_profile(), &evaluate(page.resulting_profile()));
        prop_assert!(again
            .injected_rule_ids()
            .iter()
            .all(|rule_id| !page.injected_rule_ids().contains(rule_id)));
    }

    #[test]
    fn report_totals_match_findings(profile in arb_profile()) {
        let findings = evaluate(&profile);
        let report = ReportBuilder::default().build(&findings, &profile);
        let distributed: usize = report
            .priority_distribution
            .iter()
            .map(|entry| entry.count)
            .sum();
        prop_assert_eq!(report.total_findings, findings.len());
        prop_assert_eq!(distributed, findings.len());
        prop_assert!(report.quick_wins.len() <= 3);
    }
}
