use homework_core::{
    check_response, format_status, parse_status, FormatError, HomeworkStatus, ShapeError,
};
use serde_json::json;

#[test]
fn approved_record_renders_fixed_template() {
    let record = json!({"homework_name": "hw05_final", "status": "approved"});
    assert_eq!(
        format_status(&record).unwrap(),
        "Изменился статус проверки работы \"hw05_final\". Работа проверена: ревьюеру всё понравилось. Ура!"
    );
}

#[test]
fn every_known_status_maps_to_its_verdict() {
    for status in HomeworkStatus::ALL {
        let record = json!({"homework_name": "hw", "status": status.as_str()});
        let update = parse_status(&record).unwrap();
        assert_eq!(update.status, status);
        assert!(update.message().ends_with(status.verdict()));
    }
}

#[test]
fn unknown_status_is_rejected() {
    let record = json!({"homework_name": "hw", "status": "in_progress"});
    assert_eq!(
        parse_status(&record),
        Err(FormatError::UnknownStatus("in_progress".to_string()))
    );
}

#[test]
fn missing_status_is_an_unknown_status() {
    let record = json!({"homework_name": "hw"});
    assert!(matches!(
        parse_status(&record),
        Err(FormatError::UnknownStatus(_))
    ));
}

#[test]
fn missing_or_non_string_name_is_a_missing_field() {
    for record in [
        json!({"status": "approved"}),
        json!({"homework_name": null, "status": "approved"}),
        json!({"homework_name": 42, "status": "approved"}),
    ] {
        assert_eq!(
            parse_status(&record),
            Err(FormatError::MissingField("homework_name"))
        );
    }
}

#[test]
fn check_response_returns_records_in_order() {
    let payload = json!({
        "homeworks": [
            {"homework_name": "a", "status": "reviewing"},
            {"homework_name": "b", "status": "approved"}
        ],
        "current_date": 1_700_000_000
    });
    let records = check_response(&payload).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["homework_name"], "a");
    assert_eq!(records[1]["homework_name"], "b");
}

#[test]
fn check_response_accepts_empty_list() {
    assert!(check_response(&json!({"homeworks": []})).unwrap().is_empty());
}

#[test]
fn check_response_rejects_bad_shapes() {
    assert_eq!(
        check_response(&json!([{"homeworks": []}])),
        Err(ShapeError::NotAMapping)
    );
    assert_eq!(
        check_response(&json!({"current_date": 1})),
        Err(ShapeError::MissingHomeworks)
    );
    assert_eq!(
        check_response(&json!({"homeworks": {"homework_name": "a"}})),
        Err(ShapeError::HomeworksNotAList)
    );
}
