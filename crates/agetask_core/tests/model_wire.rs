use agetask_core::{Frequency, Task};
use chrono::NaiveDate;
use uuid::Uuid;

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let user = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::new(
        user,
        "journal",
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    );
    task.end_date = NaiveDate::from_ymd_opt(2024, 12, 31);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["user_id"], user.to_string());
    assert_eq!(json["frequency"], "monthly");
    assert_eq!(json["start_date"], "2024-01-31");
    assert_eq!(json["end_date"], "2024-12-31");
    assert_eq!(json["description"], serde_json::Value::Null);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn unrecognized_wire_frequency_decodes_as_unknown() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "user_id": "11111111-2222-4333-8444-666666666666",
        "title": "legacy",
        "description": null,
        "frequency": "biweekly",
        "start_date": "2024-01-01",
        "end_date": null
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.frequency, Frequency::Unknown);
}
