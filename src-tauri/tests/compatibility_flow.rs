use cathcheck_lib::compat::{DualMicroClearance, OverallVerdict};
use cathcheck_lib::config::CheckerConfig;
use cathcheck_lib::error::IngestError;
use cathcheck_lib::models::{Device, DeviceCategory, SelectionRole};
use cathcheck_lib::parsers::parse_device_text;
use cathcheck_lib::{merge_devices, CheckerSession};
use pretty_assertions::assert_eq;

const DEVICES_CSV: &str = "\u{FEFF}製品名,カテゴリー,メーカー,内径_mm,外径_mm,長さ_cm,内径_inch,外径_fr,備考\r\n\
Guide 8F,ガイディング,Acme,2.29,,90,,8,\r\n\
DAC 6F,Intermediate,Acme,,1.82,115,0.070,,\"wide, soft tip\"\r\n\
Micro 21,Micro,Acme,0.53,0.90,150,,,\r\n\
Micro 17,Micro,Acme,0.43,0.80,150,,,\r\n\
,Micro,Acme,0.40,0.70,150,,,no name\r\n";

fn session_with(config: CheckerConfig) -> CheckerSession {
    let mut session = CheckerSession::new(config);
    session
        .apply_remote(Ok(DEVICES_CSV.to_string()))
        .expect("remote csv");
    session
}

fn key(name: &str, category: DeviceCategory) -> Option<String> {
    Some(format!("{}::{}", category.as_key(), name))
}

#[test]
fn full_selection_with_two_microcatheters() {
    let mut session = session_with(CheckerConfig::default());
    assert_eq!(session.store().len(), 4);

    let lists = session.lists();
    assert_eq!(lists.guiding.len(), 1);
    assert_eq!(lists.intermediate.len(), 1);
    assert_eq!(lists.micro.len(), 2);

    let dac = &lists.intermediate[0];
    assert!((dac.id_mm.unwrap() - 1.778).abs() < 1e-9);
    assert_eq!(dac.notes.as_deref(), Some("wide, soft tip"));

    session.select(SelectionRole::Guiding, key("Guide 8F", DeviceCategory::Guiding));
    session.select(SelectionRole::Intermediate, key("DAC 6F", DeviceCategory::Intermediate));
    session.select(SelectionRole::MicroA, key("Micro 21", DeviceCategory::Micro));
    session.select(SelectionRole::MicroB, key("Micro 17", DeviceCategory::Micro));

    let result = session.evaluate();
    // 1.82 + 0.10 <= 2.29
    assert_eq!(result.intermediate_in_guiding.fits, Some(true));
    // 0.90 + 0.10 <= 1.778
    assert_eq!(result.micro_a_in_intermediate.fits, Some(true));
    assert_eq!(result.micro_b_in_intermediate.fits, Some(true));
    // 0.90 + 0.80 + 2 * 0.10 > 1.778
    assert_eq!(result.both_micros_in_intermediate.fits, Some(false));
    assert_eq!(result.guiding_intermediate_length.delta_cm, Some(25.0));
    assert_eq!(result.intermediate_micro_a_length.meets_margin, Some(true));
    assert_eq!(result.overall(), OverallVerdict::Issue);
}

#[test]
fn zero_clearance_single_policy_changes_dual_verdict() {
    let mut config = CheckerConfig::default();
    config.eval.clearance_mm = 0.0;
    config.eval.dual_micro_clearance = DualMicroClearance::Single;
    let mut session = session_with(config);

    session.select(SelectionRole::Intermediate, key("DAC 6F", DeviceCategory::Intermediate));
    session.select(SelectionRole::MicroA, key("Micro 21", DeviceCategory::Micro));
    session.select(SelectionRole::MicroB, key("Micro 17", DeviceCategory::Micro));

    // 0.90 + 0.80 <= 1.778
    let result = session.evaluate();
    assert_eq!(result.both_micros_in_intermediate.fits, Some(true));
    assert_eq!(result.intermediate_micro_a_length.meets_margin, Some(true));
    assert_eq!(result.intermediate_in_guiding.fits, None);
    assert_eq!(result.overall(), OverallVerdict::AllGood);
}

#[test]
fn header_only_csv_is_a_hard_failure() {
    assert!(matches!(
        parse_device_text("name,category,id_mm\r\n"),
        Err(IngestError::EmptyData)
    ));
}

#[test]
fn merge_is_idempotent_for_parsed_devices() {
    let devices: Vec<Device> = parse_device_text(DEVICES_CSV).unwrap().devices;
    let mut once = merge_devices(Vec::new(), devices.clone());
    let mut twice = merge_devices(once.clone(), devices);
    once.sort_by(|a, b| a.id.cmp(&b.id));
    twice.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(once, twice);
}
