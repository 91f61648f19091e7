use sbirt_core::error::CoreError;
use sbirt_core::models::risk::{AssistRiskCategory, DastRiskLevel};
use sbirt_core::models::substance::{SubstanceFamily, SubstanceFlag};
use sbirt_instruments::error::InstrumentError;
use sbirt_instruments::instruments::{assist, dast10};
use sbirt_instruments::session::ScreeningSession;
use sbirt_instruments::{all_instruments, get_instrument};
use tracing_subscriber::EnvFilter;

/// Route events to the test harness; `RUST_LOG=warn` shows rejected ids.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn registry_lists_both_instruments() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, ["dast10", "assist"]);
    assert_eq!(get_instrument("assist").unwrap().name(), "ASSIST");
    assert!(get_instrument("audit_c").is_none());
}

#[test]
fn new_session_is_unanswered() {
    let session = ScreeningSession::new();
    assert_eq!(session.items(dast10::ID).unwrap().len(), 10);
    assert_eq!(session.dast_score().unwrap(), 0);
    assert_eq!(session.dast_risk_level().unwrap(), DastRiskLevel::Low);

    let families: Vec<_> = session.substances().iter().map(|s| s.family).collect();
    assert_eq!(families, SubstanceFamily::ALL);
    for family in SubstanceFamily::ALL {
        assert_eq!(session.risk_category(family), AssistRiskCategory::Low);
    }
}

#[test]
fn items_for_unknown_or_non_item_instrument() {
    let session = ScreeningSession::new();
    assert!(matches!(
        session.items("audit_c"),
        Err(InstrumentError::UnknownInstrument(_))
    ));
    assert!(matches!(
        session.items(assist::ID),
        Err(InstrumentError::NoItemRegistry(_))
    ));
}

#[test]
fn unknown_item_is_rejected_without_mutation() {
    init_tracing();
    let mut session = ScreeningSession::new();
    session.set_affirmative(dast10::ID, "d1", true).unwrap();
    let before = session.clone();

    let err = session.set_affirmative(dast10::ID, "d11", true).unwrap_err();
    assert!(err.is_unknown_identifier());
    assert!(matches!(
        err,
        InstrumentError::UnknownItem { ref item_id, .. } if item_id == "d11"
    ));

    let err = session.set_affirmative("audit_c", "d1", true).unwrap_err();
    assert!(err.is_unknown_identifier());
    assert_eq!(session, before);
}

#[test]
fn substance_flags_by_name() {
    let mut session = ScreeningSession::new();
    session.set_substance_flag("alcohol", "used_in_past_3_months", true).unwrap();
    session.set_substance_flag("alcohol", "q1", true).unwrap();

    let alcohol = session.substance(SubstanceFamily::Alcohol);
    assert!(alcohol.answers.used_in_past_3_months);
    assert!(alcohol.answers.frequency_flag);
    assert!(!alcohol.answers.concern_flag);
    assert!(!alcohol.answers.extra_flag);
    assert_eq!(
        session.substance_risk_category("alcohol").unwrap(),
        AssistRiskCategory::Moderate
    );
}

#[test]
fn unknown_substance_or_flag_is_rejected_without_mutation() {
    init_tracing();
    let mut session = ScreeningSession::new();
    let before = session.clone();

    let err = session.set_substance_flag("kratom", "frequency", true).unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::Core(CoreError::UnknownSubstance(_))
    ));
    let err = session.set_substance_flag("tobacco", "q4", true).unwrap_err();
    assert!(matches!(err, InstrumentError::Core(CoreError::UnknownFlag(_))));
    assert!(err.is_unknown_identifier());
    assert_eq!(session, before);

    assert!(session.substance_risk_category("kratom").is_err());
}

#[test]
fn instruments_are_independent() {
    let mut session = ScreeningSession::new();
    for flag in SubstanceFlag::ALL {
        session.set_flag(SubstanceFamily::Opioids, flag, true);
    }
    assert_eq!(session.dast_score().unwrap(), 0);

    session.set_affirmative(dast10::ID, "d5", true).unwrap();
    assert_eq!(session.risk_category(SubstanceFamily::Cannabis), AssistRiskCategory::Low);
    assert_eq!(session.risk_category(SubstanceFamily::Opioids), AssistRiskCategory::High);
}

#[test]
fn derived_reads_are_idempotent() {
    let mut session = ScreeningSession::new();
    session.set_affirmative(dast10::ID, "d6", true).unwrap();
    session.set_flag(SubstanceFamily::Tobacco, SubstanceFlag::Extra, true);

    assert_eq!(session.dast_score().unwrap(), session.dast_score().unwrap());
    assert_eq!(
        session.dast_risk_level().unwrap(),
        session.dast_risk_level().unwrap()
    );
    assert_eq!(
        session.substance_risk_category("tobacco").unwrap(),
        session.substance_risk_category("tobacco").unwrap()
    );
    assert_eq!(session.summary().unwrap(), session.summary().unwrap());
}

#[test]
fn derived_reads_follow_mutations() {
    let mut session = ScreeningSession::new();
    session.set_flag(SubstanceFamily::Sedatives, SubstanceFlag::Concern, true);
    assert_eq!(
        session.risk_category(SubstanceFamily::Sedatives),
        AssistRiskCategory::Moderate
    );
    session.set_flag(SubstanceFamily::Sedatives, SubstanceFlag::Concern, false);
    assert_eq!(session.risk_category(SubstanceFamily::Sedatives), AssistRiskCategory::Low);
}

#[test]
fn reset_clears_everything() {
    let mut session = ScreeningSession::new();
    session.set_affirmative(dast10::ID, "d1", true).unwrap();
    session.set_flag(SubstanceFamily::Alcohol, SubstanceFlag::Concern, true);
    session.reset();
    assert_eq!(session, ScreeningSession::new());
}

#[test]
fn summary_covers_both_instruments() {
    let summary = ScreeningSession::new().summary().unwrap();
    assert!(summary.contains("## DAST-10"));
    assert!(summary.contains("## ASSIST"));
    assert!(summary.contains("- Affirmative items: none"));
}
