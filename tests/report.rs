mod support;

use anyhow::{Result, bail};
use codecap::{
    DecodeError, ErrorReporter, Format, JsonDecodable, JsonDecoder, JsonDecoders,
    MultiJsonDecodable, MultiPlistDecodable, PlistDecodable, PlistDecoder, PlistDecoders,
    TryErrorReporter, decode_or_else, try_decode_or_else,
};
use serde::Deserialize;
use std::cell::RefCell;
use support::{
    INVALID_JSON, INVALID_PLIST, TestModel, VALID_JSON, VALID_JSON_ARRAY, VALID_JSON5, VALID_PLIST,
};

thread_local! {
    static REPORTS: RefCell<Vec<(Format, usize)>> = const { RefCell::new(Vec::new()) };
}

/// Records failures instead of logging them.
#[derive(Debug, PartialEq, Deserialize)]
struct Audited {
    name: String,
}

impl JsonDecodable for Audited {}
impl PlistDecodable for Audited {}

impl MultiJsonDecodable for Audited {
    type JsonDecoders = JsonDecoders;
}

impl ErrorReporter for Audited {
    fn report(error: &DecodeError, input: &[u8]) {
        let entry = (error.format(), input.len());
        REPORTS.with(|reports| reports.borrow_mut().push(entry));
    }
}

fn take_reports() -> Vec<(Format, usize)> {
    REPORTS.with(|reports| reports.borrow_mut().drain(..).collect())
}

/// Accepts failures on empty input and escalates everything else.
#[derive(Debug, PartialEq, Deserialize)]
struct Escalated {
    name: String,
}

impl JsonDecodable for Escalated {}
impl PlistDecodable for Escalated {}

impl MultiJsonDecodable for Escalated {
    type JsonDecoders = JsonDecoders;
}

impl MultiPlistDecodable for Escalated {
    type PlistDecoders = PlistDecoders;
}

impl TryErrorReporter for Escalated {
    type Error = DecodeError;

    fn try_report(error: DecodeError, input: &[u8]) -> Result<(), DecodeError> {
        if !input.is_empty() {
            return Err(error);
        }
        Ok(())
    }
}

fn escalated() -> Escalated {
    Escalated {
        name: "ny :3".to_string(),
    }
}

#[test]
fn reported_decode_returns_value_on_success() {
    assert_eq!(
        TestModel::from_json_reported(VALID_JSON.as_bytes()),
        Some(TestModel::single())
    );
    assert_eq!(
        TestModel::from_plist_reported(VALID_PLIST.as_bytes()),
        Some(TestModel::single())
    );
}

#[test]
fn default_reporter_swallows_into_none() {
    assert_eq!(TestModel::from_json_reported(INVALID_JSON.as_bytes()), None);
    let model = TestModel::from_plist_reported(INVALID_PLIST.as_bytes());
    assert_eq!(model, None);
}

#[test]
fn custom_reporter_sees_every_failure() {
    take_reports();

    assert_eq!(
        Audited::from_json_reported(VALID_JSON.as_bytes()),
        Some(Audited {
            name: "ny :3".to_string()
        })
    );
    assert!(take_reports().is_empty());

    assert_eq!(Audited::from_json_reported(INVALID_JSON.as_bytes()), None);
    assert_eq!(Audited::from_plist_reported(VALID_JSON.as_bytes()), None);
    assert_eq!(
        take_reports(),
        vec![
            (Format::Json, INVALID_JSON.len()),
            (Format::Plist, VALID_JSON.len()),
        ]
    );
}

#[test]
fn selected_variant_reports_through_the_type() {
    let json5 = VALID_JSON5.as_bytes();
    assert_eq!(
        TestModel::from_json_using_reported(json5, JsonDecoders::Json5),
        Some(TestModel::single())
    );
    assert_eq!(
        TestModel::from_json_using_reported(json5, JsonDecoders::Base),
        None
    );

    take_reports();
    let model = Audited::from_json_using_reported(json5, JsonDecoders::Base);
    assert!(model.is_none());
    assert_eq!(take_reports(), vec![(Format::Json, json5.len())]);
}

#[test]
fn fallible_reporter_escalates_or_accepts() -> Result<()> {
    let model = Escalated::try_from_json_reported(VALID_JSON.as_bytes())?;
    assert_eq!(model, Some(escalated()));

    let err = Escalated::try_from_json_reported(INVALID_JSON.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "{err}");

    let err = Escalated::try_from_plist_reported(INVALID_PLIST.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::Plist(_)), "{err}");

    assert_eq!(Escalated::try_from_json_reported(b"")?, None);
    assert_eq!(Escalated::try_from_plist_reported(b"")?, None);
    Ok(())
}

#[test]
fn fallible_reporter_works_with_selected_variants() -> Result<()> {
    let json5 = VALID_JSON5.as_bytes();
    let model = Escalated::try_from_json_using_reported(json5, JsonDecoders::Json5)?;
    assert_eq!(model, Some(escalated()));

    let err = Escalated::try_from_json_using_reported(json5, JsonDecoders::Base).unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "{err}");

    let plist = VALID_PLIST.as_bytes();
    let model = Escalated::try_from_plist_using_reported(plist, PlistDecoders::Base)?;
    assert_eq!(model, Some(escalated()));
    Ok(())
}

#[test]
fn handlers_work_with_any_provider() {
    let mut seen = Vec::new();
    let mut record = |err: &DecodeError, _: &[u8]| seen.push(err.to_string());

    let plist = PlistDecoder::new();
    let model: Option<TestModel> = decode_or_else(&plist, VALID_PLIST.as_bytes(), &mut record);
    assert_eq!(model, Some(TestModel::single()));

    let relaxed = TestModel::json_decoder().allow_json5(true);
    let model: Option<TestModel> = decode_or_else(&relaxed, b"{name: 1}", &mut record);
    assert!(model.is_none());
    assert_eq!(seen.len(), 1);
}

#[test]
fn escalating_handler_turns_failure_into_error() -> Result<()> {
    let decoder = JsonDecoder::new();
    let bytes = INVALID_JSON.as_bytes();

    let outcome: Result<Option<TestModel>> = try_decode_or_else(&decoder, bytes, |err, input| {
        bail!("rejected {} bytes: {err}", input.len())
    });
    let message = outcome.unwrap_err().to_string();
    let prefix = format!("rejected {} bytes", INVALID_JSON.len());
    assert!(message.starts_with(&prefix), "{message}");

    let tolerated: Option<TestModel> =
        try_decode_or_else(&decoder, bytes, |_, _| Ok::<(), anyhow::Error>(()))?;
    assert!(tolerated.is_none());

    let array = VALID_JSON_ARRAY.as_bytes();
    let decoded: Option<Vec<TestModel>> =
        try_decode_or_else(&decoder, array, |err, _| bail!("unexpected: {err}"))?;
    assert_eq!(decoded, Some(TestModel::multiple()));
    Ok(())
}
