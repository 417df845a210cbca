//! Integration tests for sanoma-engine
//!
//! These tests run the analyses end to end over small datasets loaded from
//! JSON rows, the way the CLI feeds the engine.

use sanoma_engine::{
    analyze_domains, apply_filters, load_records, query, rank_domains, summarize, BucketCounts,
    EngineError, Filter, FilterPipeline, Granularity, Operation, Timeline,
};
use serde_json::{json, Value};

fn scenario_rows() -> Vec<Value> {
    vec![
        json!({"from_domain": "a.edu", "date": "2020-01-01 10:00:00", "has_body": true,
               "subject": "", "body": ""}),
        json!({"from_domain": "a.edu", "date": "2020-02-01 10:00:00", "has_body": false,
               "subject": "", "body": ""}),
        json!({"from_domain": "b.com", "date": "2021-01-01 10:00:00", "has_body": true,
               "subject": "", "body": ""}),
    ]
}

#[test]
fn test_end_to_end_scenario() {
    let records = load_records(scenario_rows(), Operation::Timeline.required_fields()).unwrap();

    let years = Timeline::new(&records).by_year();
    assert_eq!(years.len(), 2);
    assert_eq!(years[&2020], BucketCounts { total: 2, with_body: 1 });
    assert_eq!(years[&2021], BucketCounts { total: 1, with_body: 1 });

    let report = rank_domains(&records, 0.6);
    assert_eq!(report.ranked.len(), 1);
    let top = &report.ranked[0];
    assert_eq!(top.domain, "a.edu");
    assert_eq!(top.count, 2);
    assert!((top.percentage - 66.67).abs() < 0.01);
    assert!((top.cumulative_percentage - 0.667).abs() < 0.001);
    assert!((report.achieved_coverage - 0.667).abs() < 0.001);
}

#[test]
fn test_schema_error_lists_all_fields() {
    let rows = vec![json!({"subject": "hello"})];
    let err = load_records(rows, Operation::Domains.required_fields()).unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: body, from_domain");
}

fn mixed_records() -> Vec<sanoma_engine::EmailRecord> {
    let rows = vec![
        json!({"from_domain": "cs.wsu.edu", "date": "2020-01-01 09:00:00", "subject": "Talk",
               "body": "abstract", "has_body": true}),
        json!({"from_domain": "shop.com", "date": "2020-01-02 09:00:00", "subject": "Deal",
               "body": "unsubscribe", "has_body": true}),
        json!({"from_domain": "wsu.edu", "date": "2020-01-03 09:00:00", "subject": "Memo",
               "body": "", "has_body": false}),
        json!({"from_domain": "news.org", "date": "2020-01-04 09:00:00", "subject": "Daily",
               "body": "unsubscribe", "has_body": false}),
        json!({"from_domain": "mail.uw.edu", "date": "2020-01-05 09:00:00", "subject": "Grant",
               "body": "text", "has_body": true}),
        json!({"from_domain": "shop.com", "date": "2020-01-06 09:00:00", "subject": "Deal 2",
               "body": "", "has_body": true}),
    ];
    load_records(rows, Operation::Filter.required_fields()).unwrap()
}

#[test]
fn test_predicate_filters_commute() {
    let records = mixed_records();
    let body_then_domain = apply_filters(
        &records,
        &[Filter::HasBody(true), Filter::Domain("*.edu".to_string())],
    );
    let domain_then_body = apply_filters(
        &records,
        &[Filter::Domain("*.edu".to_string()), Filter::HasBody(true)],
    );
    assert_eq!(body_then_domain, domain_then_body);
    assert_eq!(body_then_domain.len(), 2);
}

#[test]
fn test_limit_does_not_commute_with_predicates() {
    let records = mixed_records();
    let before = apply_filters(
        &records,
        &[Filter::Limit(2), Filter::Domain("*.edu".to_string())],
    );
    let after = apply_filters(
        &records,
        &[Filter::Domain("*.edu".to_string()), Filter::Limit(2)],
    );
    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
    assert_ne!(before, after);
}

#[test]
fn test_pipeline_from_named_entries() {
    let records = mixed_records();
    let pipeline = FilterPipeline::from_entries([
        ("domain", json!("shop")),
        ("year", json!("2020-01")),
        ("subject_contains", json!("deal")),
        ("has_body", json!(true)),
        ("limit", json!(1)),
    ]);
    let hits = pipeline.apply(&records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].subject, "Deal");
}

#[test]
fn test_query_never_searches_uncaptured_body() {
    let records = mixed_records();
    let hits = query(&records, Some("unsubscribe"), false).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].from_domain, "shop.com");
}

#[test]
fn test_domain_analysis_end_to_end() {
    let records = mixed_records();
    let analysis = analyze_domains(&records, "unsubscribe", "*.edu", 0.95).unwrap();

    // Pattern coverage searches bodies regardless of has_body
    assert_eq!(analysis.pattern_analysis.total_emails, 2);
    assert!((analysis.pattern_analysis.actual_coverage - 1.0).abs() < 1e-9);
    assert_eq!(analysis.comparison.total_emails, 3);
    assert!(analysis.overlap.is_empty());

    assert!(matches!(
        analyze_domains(&records, "unsubscribe", "[", 0.95),
        Err(EngineError::InvalidPattern { .. })
    ));
}

#[test]
fn test_stats_and_timeline_disagree_on_bad_dates() {
    let rows = vec![
        json!({"from_domain": "a.com", "date": "2020-99-99 99:99:99", "has_body": true}),
        json!({"from_domain": "a.com", "date": "2020-01-01 00:00:00", "has_body": true}),
    ];
    let records = load_records(rows, Operation::Stats.required_fields()).unwrap();

    assert_eq!(summarize(&records).year_histogram["2020"], 2);

    let timeline = Timeline::new(&records);
    assert_eq!(timeline.len(), 1);
    let rows = timeline.rows(Granularity::Year, None);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].period, "2020");
    assert_eq!(rows[0].total_emails, 1);
}

#[test]
fn test_transformations_leave_input_untouched() {
    let records = mixed_records();
    let snapshot = records.clone();

    let _ = apply_filters(&records, &[Filter::Limit(1)]);
    let _ = query(&records, Some("deal"), false).unwrap();
    let _ = rank_domains(&records, 0.5);
    let _ = Timeline::new(&records).summary();
    let _ = summarize(&records);

    assert_eq!(records, snapshot);
}

#[test]
fn test_null_domain_and_body_flag_load_as_sentinels() {
    let rows = vec![
        json!({"from_domain": null, "date": "2020-01-01 00:00:00", "has_body": true}),
        json!({"from_domain": "b.com", "date": "2020-01-02 00:00:00", "has_body": null}),
    ];
    let records = load_records(rows, Operation::Stats.required_fields()).unwrap();
    assert_eq!(records[0].from_domain, "unknown");
    assert!(!records[1].has_body);

    let stats = summarize(&records);
    assert_eq!(stats.domain_histogram["unknown"], 1);
    assert!(!stats.domain_histogram.contains_key(""));
    assert_eq!(stats.with_body, 1);
}
