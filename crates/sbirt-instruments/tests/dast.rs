use sbirt_core::models::risk::DastRiskLevel;
use sbirt_instruments::error::InstrumentError;
use sbirt_instruments::instruments::dast10::{self, Dast10};
use sbirt_instruments::scoring::{dast_risk_level, DAST_MAX_SCORE};
use sbirt_instruments::session::ScreeningSession;
use sbirt_instruments::Instrument;

fn item_ids() -> Vec<String> {
    Dast10.items().iter().map(|item| item.id.clone()).collect()
}

fn expected_level(score: usize) -> DastRiskLevel {
    match score {
        0 => DastRiskLevel::Low,
        1 | 2 => DastRiskLevel::LowModerate,
        3..=5 => DastRiskLevel::Moderate,
        _ => DastRiskLevel::Substantial,
    }
}

#[test]
fn ten_items_in_canonical_order() {
    let ids = item_ids();
    let expected: Vec<String> = (1..=10).map(|n| format!("d{n}")).collect();
    assert_eq!(ids, expected);
    assert!(Dast10.items().iter().all(|item| !item.is_affirmative));
}

#[test]
fn prompts_are_verbatim() {
    let items = Dast10.items();
    assert_eq!(
        items[0].prompt_text,
        "Have you used drugs other than those required for medical reasons?"
    );
    assert_eq!(items[1].prompt_text, "Do you use more than one drug at a time?");
    assert_eq!(
        items[9].prompt_text,
        "Have you had medical problems as a result of your drug use (e.g., memory loss, hepatitis, convulsions, bleeding)?"
    );
}

#[test]
fn risk_level_boundaries() {
    let cases = [
        (0, DastRiskLevel::Low),
        (1, DastRiskLevel::LowModerate),
        (2, DastRiskLevel::LowModerate),
        (3, DastRiskLevel::Moderate),
        (5, DastRiskLevel::Moderate),
        (6, DastRiskLevel::Substantial),
        (10, DastRiskLevel::Substantial),
    ];
    for (score, level) in cases {
        assert_eq!(dast_risk_level(score).unwrap(), level, "score {score}");
    }
}

#[test]
fn score_above_range_is_an_invariant_violation() {
    let err = dast_risk_level(DAST_MAX_SCORE + 1).unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::InvariantViolation { score: 11, max: 10, .. }
    ));
    assert!(!err.is_unknown_identifier());
}

#[test]
fn every_subset_scores_its_size() {
    let ids = item_ids();
    for mask in 0u32..(1 << ids.len()) {
        let mut session = ScreeningSession::new();
        for (bit, id) in ids.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                session.set_affirmative(dast10::ID, id, true).unwrap();
            }
        }
        let size = mask.count_ones() as usize;
        assert_eq!(session.dast_score().unwrap(), size);
        assert_eq!(session.dast_risk_level().unwrap(), expected_level(size));
    }
}

#[test]
fn toggling_is_monotonic() {
    let ids = item_ids();
    let read = |s: &ScreeningSession| (s.dast_score().unwrap(), s.dast_risk_level().unwrap());
    let mut session = ScreeningSession::new();
    let mut previous = read(&session);
    for id in &ids {
        session.set_affirmative(dast10::ID, id, true).unwrap();
        let current = read(&session);
        assert!(current.0 > previous.0);
        assert!(current.1 >= previous.1);
        previous = current;
    }
    for id in &ids {
        session.set_affirmative(dast10::ID, id, false).unwrap();
        let current = read(&session);
        assert!(current.0 < previous.0);
        assert!(current.1 <= previous.1);
        previous = current;
    }
}

#[test]
fn d1_d3_d7_is_moderate() {
    let mut session = ScreeningSession::new();
    for id in ["d1", "d3", "d7"] {
        session.set_affirmative(dast10::ID, id, true).unwrap();
    }
    assert_eq!(session.dast_score().unwrap(), 3);
    assert_eq!(session.dast_risk_level().unwrap().to_string(), "Moderate Risk");
}

#[test]
fn setting_the_same_answer_twice_is_stable() {
    let mut session = ScreeningSession::new();
    session.set_affirmative(dast10::ID, "d4", true).unwrap();
    session.set_affirmative(dast10::ID, "d4", true).unwrap();
    assert_eq!(session.dast_score().unwrap(), 1);
}

#[test]
fn summary_lists_affirmative_items() {
    let mut session = ScreeningSession::new();
    session.set_affirmative(dast10::ID, "d2", true).unwrap();
    session.set_affirmative(dast10::ID, "d9", true).unwrap();
    let summary = Dast10.summarize(&session).unwrap();
    assert!(summary.starts_with("## DAST-10"));
    assert!(summary.contains("- Score: 2/10"));
    assert!(summary.contains("- Risk level: Low/Moderate Risk"));
    assert!(summary.contains("- Affirmative items: d2, d9"));
}
