use super::{SCENARIO, access_line};
use crate::analysis::{AggregateState, ErrorSample, FieldExtractor, LogLineFields};
use pretty_assertions::assert_eq;

fn apply_all(state: &mut AggregateState, lines: &[&str]) {
    let extractor = FieldExtractor::new();
    for line in lines {
        state.apply(extractor.extract(line), line);
    }
}

#[test]
fn scenario_counts_match() {
    // Arrange
    let mut state = AggregateState::new();

    // Act
    apply_all(&mut state, &SCENARIO);

    // Assert
    assert_eq!(state.total_requests(), 3);
    assert_eq!(state.client_counts().get("1.2.3.4"), 2);
    assert_eq!(state.client_counts().get("5.6.7.8"), 1);
    assert_eq!(state.client_counts().len(), 2);
    assert_eq!(state.status_counts().get("200"), 1);
    assert_eq!(state.status_counts().get("404"), 1);
    assert_eq!(state.status_counts().get("500"), 1);
    assert_eq!(state.hourly_traffic().get("13"), 2);
    assert_eq!(state.hourly_traffic().get("14"), 1);
    assert_eq!(
        state.recent_errors(),
        &[ErrorSample {
            position: 2,
            line: SCENARIO[1].to_string(),
        }]
    );
}

#[test]
fn empty_fields_still_count_as_a_request() {
    let mut state = AggregateState::new();

    state.apply(LogLineFields::default(), "garbage");

    assert_eq!(state.total_requests(), 1);
    assert!(state.client_counts().is_empty());
    assert!(state.status_counts().is_empty());
    assert!(state.recent_errors().is_empty());
}

#[test]
fn valid_client_with_malformed_timestamp_counts_client_only() {
    // Arrange
    let mut state = AggregateState::new();
    let line = r#"9.9.9.9 - - [99/Oct/2023:13:55:36] "GET /x" 200"#;

    // Act
    apply_all(&mut state, &[line]);

    // Assert
    assert_eq!(state.client_counts().get("9.9.9.9"), 1);
    assert!(state.hourly_traffic().is_empty());
}

#[test]
fn every_404_is_captured_in_order() {
    // Arrange
    let mut state = AggregateState::new();
    let lines: Vec<String> = (0..25)
        .map(|i| access_line("1.1.1.1", 10, &format!("/p{i}"), if i % 2 == 0 { 404 } else { 200 }))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    // Act
    apply_all(&mut state, &refs);

    // Assert
    let captured: Vec<&str> = state.recent_errors().iter().map(|s| s.line.as_str()).collect();
    let expected: Vec<&str> = refs.iter().step_by(2).copied().collect();
    assert_eq!(captured, expected);
    assert_eq!(state.total_404_errors(), 13);
}

#[test]
fn invariants_hold_for_mixed_input() {
    let mut state = AggregateState::new();
    let line = access_line("2.2.2.2", 1, "/a", 301);
    apply_all(
        &mut state,
        &[&line, "noise", r#""DELETE /b" 204"#, "3.3.3.3 only a client"],
    );

    assert_eq!(state.total_requests(), 4);
    assert!(state.total_requests() >= state.status_counts().total());
    assert!(state.client_counts().total() <= state.total_requests());
}

#[test]
fn offset_shifts_sample_positions() {
    let mut state = AggregateState::with_offset(100);

    apply_all(&mut state, &[SCENARIO[0], SCENARIO[1]]);

    assert_eq!(state.recent_errors()[0].position, 102);
}

#[test]
fn merge_of_shards_matches_single_state() {
    // Arrange
    let lines: Vec<String> = (0..9)
        .map(|i| access_line(&format!("10.0.0.{}", i % 4), i, "/x", if i % 3 == 0 { 404 } else { 200 }))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let mut whole = AggregateState::new();
    apply_all(&mut whole, &refs);

    let mut first = AggregateState::new();
    apply_all(&mut first, &refs[..4]);
    let mut second = AggregateState::with_offset(4);
    apply_all(&mut second, &refs[4..]);

    // Act
    first.merge(second);

    // Assert
    assert_eq!(first.total_requests(), whole.total_requests());
    assert_eq!(first.recent_errors(), whole.recent_errors());
    assert_eq!(first.client_counts().top(10), whole.client_counts().top(10));
    assert_eq!(
        first.hourly_traffic().sorted_by_key(),
        whole.hourly_traffic().sorted_by_key()
    );
}

#[test]
fn merge_restores_sample_order_regardless_of_merge_order() {
    let mut late = AggregateState::with_offset(1);
    apply_all(&mut late, &[SCENARIO[1]]);
    let mut early = AggregateState::new();
    apply_all(&mut early, &[SCENARIO[1]]);

    late.merge(early);

    let positions: Vec<u64> = late.recent_errors().iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2]);
}
