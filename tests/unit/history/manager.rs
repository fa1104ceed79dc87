use super::*;

fn snap(tag: &str) -> SceneState {
    SceneState {
        top_text: tag.to_string(),
        ..SceneState::default()
    }
}

fn tags(h: &History) -> Vec<&str> {
    h.snapshots().iter().map(|s| s.top_text.as_str()).collect()
}

fn assert_invariants(h: &History) {
    assert!(h.index() < h.len());
    assert_eq!(h.can_undo(), h.index() > 0);
    assert_eq!(h.can_redo(), h.index() < h.len() - 1);
}

#[test]
fn starts_with_single_snapshot() {
    let h = History::new(snap("s0"));
    assert_eq!(h.len(), 1);
    assert_eq!(h.index(), 0);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(!h.is_empty());
    assert_eq!(h.current().top_text, "s0");
}

#[test]
fn undo_redo_at_bounds_are_noops() {
    let mut h = History::new(snap("s0"));
    assert!(h.undo().is_none());
    assert!(h.redo().is_none());
    assert_eq!(h.index(), 0);

    h.record(snap("s1"));
    assert!(h.redo().is_none());
    assert_eq!(h.index(), 1);
}

#[test]
fn undo_then_record_truncates_redo_branch() {
    let mut h = History::new(snap("s0"));
    h.record(snap("s1"));
    h.record(snap("s2"));
    assert_eq!(h.index(), 2);

    assert_eq!(h.undo().map(|s| s.top_text.clone()), Some("s1".into()));
    h.record(snap("s3"));

    assert_eq!(tags(&h), ["s0", "s1", "s3"]);
    assert_eq!(h.index(), 2);
    assert!(h.redo().is_none());
}

#[test]
fn undo_and_redo_walk_the_sequence() {
    let mut h = History::new(snap("s0"));
    h.record(snap("s1"));
    h.record(snap("s2"));

    assert_eq!(h.undo().unwrap().top_text, "s1");
    assert_eq!(h.undo().unwrap().top_text, "s0");
    assert!(h.undo().is_none());
    assert_eq!(h.redo().unwrap().top_text, "s1");
    assert_eq!(h.redo().unwrap().top_text, "s2");
    assert!(h.redo().is_none());
}

#[test]
fn invariants_hold_for_mixed_operation_sequences() {
    // Deterministic pseudo-random walk over record/undo/redo.
    let mut h = History::default();
    let mut state = 0x2545_f491_4f6c_dd1du64;
    for step in 0..500 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        match state % 3 {
            0 => {
                let _ = h.record(snap(&format!("r{step}")));
            }
            1 => {
                let _ = h.undo();
            }
            _ => {
                let _ = h.redo();
            }
        }
        assert_invariants(&h);
    }
}

#[test]
fn record_reports_discarded_redo_entries() {
    let mut h = History::new(snap("s0"));
    assert_eq!(h.record(snap("s1")), 0);
    assert_eq!(h.record(snap("s2")), 0);
    h.undo();
    h.undo();
    assert_eq!(h.record(snap("b1")), 2);
    assert_eq!(tags(&h), ["s0", "b1"]);
    assert_eq!(h.record(snap("b2")), 0);
}
