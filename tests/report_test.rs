use sp2yt::report::{MatchOutcome, MatchReport};
use sp2yt::types::Track;

fn track(name: &str, artists: &[&str]) -> Track {
    Track {
        id: format!("{name}_id"),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

fn mixed_report() -> MatchReport {
    let mut report = MatchReport::new();
    report.push(track("One", &["A"]), MatchOutcome::Matched("v1".to_string()));
    report.push(track("Two", &["B", "C"]), MatchOutcome::NoMatch);
    report.push(
        track("Three", &["D"]),
        MatchOutcome::Failed("quota exceeded".to_string()),
    );
    report.push(track("Four", &["E"]), MatchOutcome::Matched("v4".to_string()));
    report
}

#[test]
fn test_report_keeps_track_order() {
    let report = mixed_report();

    let names: Vec<&str> = report
        .entries()
        .iter()
        .map(|m| m.track.name.as_str())
        .collect();
    assert_eq!(names, vec!["One", "Two", "Three", "Four"]);
    assert_eq!(report.len(), 4);
    assert!(!report.is_empty());
}

#[test]
fn test_report_video_ids_only_matched() {
    assert_eq!(mixed_report().video_ids(), vec!["v1", "v4"]);
}

#[test]
fn test_report_counts() {
    let report = mixed_report();

    assert_eq!(report.matched_count(), 2);
    assert_eq!(report.no_match_count(), 1);
    assert_eq!(report.failed_count(), 1);
}

#[test]
fn test_report_unmatched_rows() {
    let rows = mixed_report().unmatched_rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].track, "Two");
    assert_eq!(rows[0].artists, "B, C");
    assert_eq!(rows[0].result, "no match");
    assert_eq!(rows[1].track, "Three");
    assert_eq!(rows[1].result, "failed: quota exceeded");
}

#[test]
fn test_empty_report() {
    let report = MatchReport::new();

    assert!(report.is_empty());
    assert!(report.video_ids().is_empty());
    assert!(report.unmatched_rows().is_empty());
    assert!(report.outcomes().is_empty());
}
