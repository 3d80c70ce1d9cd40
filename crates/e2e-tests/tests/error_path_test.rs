//! End-to-end error path tests.
//!
//! Malformed entries are skipped without stopping the scan; load failures
//! and bad exports surface as errors.

use pretty_assertions::assert_eq;

use e2e_tests::{
    bad_timestamp_entry_html, no_content_cell_html, one_link_entry_html, takeout_document,
    EntryFixture, TestHarness,
};
use watch_extract::{ExtractError, HistoryParser, RejectReason};
use watch_history::{read_table, run_classify, run_parse, OutputFormat, Settings};
use watch_topics::TopicClassifier;
use watch_topics::TopicsConfig;
use watch_types::{CategoryLabel, BASE_COLUMNS};

fn good(id: usize, title: &str) -> String {
    EntryFixture::new(id, title, "Channel", "Feb 23, 2024, 7:36:45 PM EST").to_html()
}

#[test]
fn test_malformed_entries_are_skipped() {
    let harness = TestHarness::new();
    let html = takeout_document(&[
        good(0, "First"),
        one_link_entry_html("Deleted video"),
        bad_timestamp_entry_html("Odd date", "23 Feb 2024 19:36"),
        no_content_cell_html(),
        good(1, "Last"),
    ]);
    let input = harness.write_export("watch-history.html", &html);

    let report = HistoryParser::new(&input).unwrap().parse_history().unwrap();

    assert_eq!(report.candidates, 5);
    assert_eq!(report.table.titles(), vec!["First", "Last"]);

    let rejected: Vec<usize> = report.rejections.iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![1, 2, 3]);
    assert!(matches!(
        report.rejections[0].reason,
        RejectReason::TooFewLinks { found: 1, required: 2 }
    ));
    assert!(matches!(
        report.rejections[1].reason,
        RejectReason::UnparseableTimestamp { .. }
    ));
    assert!(matches!(
        report.rejections[2].reason,
        RejectReason::MissingContentCell
    ));
}

#[test]
fn test_document_without_entries() {
    let harness = TestHarness::new();
    let input = harness.write_export(
        "watch-history.html",
        "<html><body><p>Nothing here</p></body></html>",
    );
    let output = harness.path("empty.csv");

    let report = run_parse(&Settings::default(), &input, &output, None).unwrap();
    assert_eq!(report.candidates, 0);
    assert!(report.table.is_empty());

    let reread = read_table(&output, OutputFormat::Csv).unwrap();
    assert!(reread.is_empty());
    assert_eq!(reread.columns(), BASE_COLUMNS);
}

#[test]
fn test_missing_export_is_load_error() {
    let harness = TestHarness::new();
    let parser = HistoryParser::new(harness.path("absent.html")).unwrap();
    assert!(matches!(
        parser.parse_history(),
        Err(ExtractError::Load { .. })
    ));
}

#[test]
fn test_non_utf8_export_is_encoding_error() {
    let harness = TestHarness::new();
    let path = harness.path("latin1.html");
    std::fs::write(&path, [0x3c, 0x70, 0x3e, 0xe9, 0xff, 0x3c]).unwrap();

    let parser = HistoryParser::new(&path).unwrap();
    assert!(matches!(
        parser.parse_history(),
        Err(ExtractError::Encoding { .. })
    ));
}

#[test]
fn test_single_entry_is_uncategorized() {
    let harness = TestHarness::new();
    let input = harness.write_export("watch-history.html", &takeout_document(&[good(0, "Solo")]));
    let output = harness.path("single.csv");

    let table = run_classify(&Settings::default(), &input, &output, Some(5), None, None).unwrap();
    let categories: Vec<_> = table.iter().map(|r| r.category).collect();
    assert_eq!(categories, vec![Some(CategoryLabel::Uncategorized)]);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.lines().nth(1).unwrap().ends_with(",Uncategorized"));
}

#[test]
fn test_stop_word_only_titles_fail_classification() {
    let mut classifier = TopicClassifier::new(TopicsConfig::with_num_topics(2)).unwrap();
    let result = classifier.classify(&["the", "and of", "2024"]);
    assert!(result.is_err());
    assert!(classifier.last_fit().is_none());
}

#[test]
fn test_invalid_topic_count_is_rejected() {
    let harness = TestHarness::new();
    let input = harness.write_export(
        "watch-history.html",
        &takeout_document(&[good(0, "One"), good(1, "Two")]),
    );
    let result = run_classify(
        &Settings::default(),
        &input,
        &harness.path("out.csv"),
        Some(0),
        None,
        None,
    );
    assert!(result.is_err());
    assert!(!harness.path("out.csv").exists());
}

#[test]
fn test_blank_href_entry_is_skipped_and_export_reads_back() {
    let harness = TestHarness::new();
    let mut blank = EntryFixture::new(1, "No link", "Channel", "Feb 23, 2024, 7:36:45 PM EST");
    blank.video_url = "   ".to_string();
    let html = takeout_document(&[good(0, "First"), blank.to_html(), good(2, "Last")]);
    let input = harness.write_export("watch-history.html", &html);
    let output = harness.path("history.csv");

    let report = run_parse(&Settings::default(), &input, &output, None).unwrap();
    assert_eq!(report.table.titles(), vec!["First", "Last"]);
    assert!(matches!(
        report.rejections[0].reason,
        RejectReason::EmptyField("video_url")
    ));

    let reread = read_table(&output, OutputFormat::Csv).unwrap();
    assert_eq!(reread, report.table);
}
