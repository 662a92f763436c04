use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use swapx_cli::core::processor::ContentProcessor;
use swapx_cli::core::rules::matcher::find_and_replace;
use swapx_cli::core::rules::{MatchDefaults, RuleSet, RuleSpec};

fn sample_content(repeats: usize) -> String {
    "function getUserData(userId) { return cache.getUserData(userId) || fetch(userId); }\n"
        .repeat(repeats)
}

fn rule(from: &str, to: &str, tweak: impl FnOnce(&mut RuleSpec)) -> RuleSet {
    let mut spec = RuleSpec::new(from, to);
    tweak(&mut spec);
    RuleSet::validate(vec![spec], &MatchDefaults::default()).unwrap()
}

fn bench_matcher(c: &mut Criterion) {
    let content = sample_content(1000);

    let sensitive = rule("getUserData", "fetchUserProfile", |_| {});
    c.bench_function("matcher_case_sensitive_1k_lines", |b| {
        let rule = sensitive.iter().next().unwrap();
        b.iter(|| find_and_replace(black_box(&content), black_box(rule)))
    });

    let insensitive = rule("GETUSERDATA", "fetchUserProfile", |s| {
        s.case_sensitive = Some(false);
    });
    c.bench_function("matcher_case_insensitive_1k_lines", |b| {
        let rule = insensitive.iter().next().unwrap();
        b.iter(|| find_and_replace(black_box(&content), black_box(rule)))
    });

    let whole_word = rule("userId", "accountId", |s| {
        s.whole_word = Some(true);
    });
    c.bench_function("matcher_whole_word_1k_lines", |b| {
        let rule = whole_word.iter().next().unwrap();
        b.iter(|| find_and_replace(black_box(&content), black_box(rule)))
    });
}

fn bench_processor(c: &mut Criterion) {
    let content = sample_content(1000);
    let rules = Arc::new(
        RuleSet::validate(
            vec![
                RuleSpec::new("getUserData", "fetchUserProfile"),
                RuleSpec::new("cache", "store"),
                RuleSpec::new("fetch", "load"),
            ],
            &MatchDefaults::default(),
        )
        .unwrap(),
    );
    let processor = ContentProcessor::new(rules);

    c.bench_function("processor_three_rules_1k_lines", |b| {
        b.iter(|| processor.apply(black_box(&content)))
    });
}

criterion_group!(benches, bench_matcher, bench_processor);
criterion_main!(benches);
