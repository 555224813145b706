use billsplitlib::{
    config::SplitPolicy,
    error::{FormError, ValidationError},
    expense::{ExpenseDraft, FormValue},
    model::{ExpenseCategory, Group, SplitPayload, SplitType},
};
use rust_decimal::Decimal;
use serde_json::json;

fn group() -> Group {
    serde_json::from_value(json!({
        "id": 7,
        "name": "Flat",
        "currency": "EUR",
        "members": [
            "alice",
            { "userId": "bob", "name": "Bob", "role": "ADMIN" },
            { "userId": "carol" }
        ]
    }))
    .expect("group json")
}

fn draft() -> ExpenseDraft {
    ExpenseDraft {
        group_id: Some(7),
        description: "  Groceries ".into(),
        amount: Some(FormValue::from("60.00")),
        paid_by: Some("alice".into()),
        participants: vec!["alice".into(), "bob".into(), "carol".into()],
        ..Default::default()
    }
}

#[test]
fn equal_request_from_group() {
    let req = draft()
        .to_request(Some(&group()), &SplitPolicy::default())
        .expect("valid draft");
    assert_eq!(req.description, "Groceries");
    assert_eq!(req.currency, "EUR");
    assert_eq!(req.category, ExpenseCategory::Food);
    assert_eq!(req.split_type, SplitType::Equal);
    assert_eq!(
        req.split,
        SplitPayload::Equal { participant_ids: vec!["alice".into(), "bob".into(), "carol".into()] }
    );
    assert_eq!(req.notes, None);
}

#[test]
fn request_json_shape() {
    let mut d = draft();
    d.split_type = SplitType::Exact;
    d.notes = Some("weekly".into());
    d.receipt_url = Some("   ".into());
    d.exact_amounts.insert("alice".into(), FormValue::from("10"));
    d.exact_amounts.insert("bob".into(), serde_json::from_value(json!(20.5)).expect("number"));
    d.exact_amounts.insert("carol".into(), FormValue::from("29.50"));

    let req = d.to_request(Some(&group()), &SplitPolicy::default()).expect("valid draft");
    let v = serde_json::to_value(&req).expect("serialize");
    assert_eq!(
        v,
        json!({
            "description": "Groceries",
            "amount": 60.0,
            "currency": "EUR",
            "groupId": 7,
            "paidBy": "alice",
            "category": "FOOD",
            "splitType": "EXACT",
            "exactAmounts": { "alice": 10.0, "bob": 20.5, "carol": 29.5 },
            "notes": "weekly"
        })
    );
}

#[test]
fn percentage_request_shape() {
    let mut d = draft();
    d.split_type = SplitType::Percentage;
    d.percentages.insert("alice".into(), FormValue::from("50"));
    d.percentages.insert("bob".into(), FormValue::from("25"));
    d.percentages.insert("carol".into(), FormValue::from("25"));

    let req = d.to_request(None, &SplitPolicy::default()).expect("valid draft");
    let v = serde_json::to_value(&req).expect("serialize");
    assert_eq!(v["percentages"], json!({ "alice": 50.0, "bob": 25.0, "carol": 25.0 }));
    assert!(v.get("participantIds").is_none());
    // no group supplied: policy default currency
    assert_eq!(req.currency, "USD");
}

#[test]
fn draft_deserializes_from_form_json() {
    let d: ExpenseDraft = serde_json::from_value(json!({
        "groupId": 7,
        "description": "Taxi",
        "amount": "12.40",
        "currency": "GBP",
        "category": "TRANSPORT",
        "paidBy": "bob",
        "splitType": "PERCENTAGE",
        "participants": ["alice", "bob"],
        "percentages": { "alice": 60, "bob": "40" }
    }))
    .expect("draft json");
    let req = d.to_request(Some(&group()), &SplitPolicy::default()).expect("valid draft");
    assert_eq!(req.currency, "GBP");
    assert_eq!(req.amount, Decimal::new(1240, 2));
    assert_eq!(req.category, ExpenseCategory::Transport);
}

#[test]
fn missing_group() {
    let mut d = draft();
    d.group_id = None;
    let err = d.to_request(None, &SplitPolicy::default()).expect_err("no group");
    assert_eq!(err, FormError::MissingGroup);
}

#[test]
fn mismatched_group() {
    let mut d = draft();
    d.group_id = Some(8);
    let err = d.to_request(Some(&group()), &SplitPolicy::default()).expect_err("other group");
    assert_eq!(err, FormError::GroupMismatch { draft: 8, group: 7 });
}

#[test]
fn short_description() {
    let mut d = draft();
    d.description = " ab ".into();
    let err = d.to_request(None, &SplitPolicy::default()).expect_err("too short");
    assert_eq!(err, FormError::DescriptionTooShort { min: 3 });
}

#[test]
fn amount_checks() {
    let policy = SplitPolicy::default();

    let mut d = draft();
    d.amount = Some(FormValue::from(""));
    assert_eq!(d.to_request(None, &policy).expect_err("blank"), FormError::MissingAmount);

    d.amount = None;
    assert_eq!(d.to_request(None, &policy).expect_err("absent"), FormError::MissingAmount);

    d.amount = Some(FormValue::from("0.001"));
    assert!(matches!(
        d.to_request(None, &policy).expect_err("tiny"),
        FormError::AmountTooSmall { .. }
    ));

    d.amount = Some(FormValue::from("twelve"));
    assert_eq!(
        d.to_request(None, &policy).expect_err("garbage"),
        FormError::InvalidNumber { field: "amount".into(), value: "twelve".into() }
    );
}

#[test]
fn zero_amount_rejected_even_with_permissive_policy() {
    // собрана напрямую, в обход SplitPolicy::validate
    let policy = SplitPolicy { min_amount: Decimal::ZERO, ..SplitPolicy::default() };
    let mut d = draft();
    d.amount = Some(FormValue::from("0"));
    d.split_type = SplitType::Exact;
    d.participants.clear();
    let err = d.to_request(None, &policy).expect_err("zero expense");
    assert!(matches!(err, FormError::AmountTooSmall { .. }));
}

#[test]
fn missing_payer() {
    let mut d = draft();
    d.paid_by = Some(" ".into());
    let err = d.to_request(None, &SplitPolicy::default()).expect_err("no payer");
    assert_eq!(err, FormError::MissingPayer);
}

#[test]
fn outsiders_rejected() {
    let mut d = draft();
    d.participants.push("mallory".into());
    let err = d.to_request(Some(&group()), &SplitPolicy::default()).expect_err("outsider");
    assert_eq!(err, FormError::NotAGroupMember("mallory".into()));

    let mut d = draft();
    d.paid_by = Some("trent".into());
    let err = d.to_request(Some(&group()), &SplitPolicy::default()).expect_err("outsider payer");
    assert_eq!(err, FormError::NotAGroupMember("trent".into()));
}

#[test]
fn split_errors_surface() {
    let mut d = draft();
    d.split_type = SplitType::Exact;
    d.exact_amounts.insert("alice".into(), FormValue::from("10"));
    let err = d.to_request(Some(&group()), &SplitPolicy::default()).expect_err("mismatch");
    assert!(matches!(err, FormError::Split(ValidationError::ExactAmountMismatch { .. })));

    let mut d = draft();
    d.participants.clear();
    let err = d.to_request(Some(&group()), &SplitPolicy::default()).expect_err("empty");
    assert_eq!(err, FormError::Split(ValidationError::EmptyParticipantSet));
}

#[test]
fn values_of_other_strategies_are_ignored() {
    let mut d = draft();
    d.exact_amounts.insert("alice".into(), FormValue::from("not a number"));
    d.to_request(None, &SplitPolicy::default()).expect("equal split ignores exact inputs");
}

#[test]
fn bad_value_names_its_field() {
    let mut d = draft();
    d.split_type = SplitType::Percentage;
    d.percentages.insert("bob".into(), FormValue::from("ten"));
    let err = d.to_request(None, &SplitPolicy::default()).expect_err("garbage");
    assert_eq!(
        err,
        FormError::InvalidNumber { field: "percentages.bob".into(), value: "ten".into() }
    );
}

#[test]
fn zero_min_amount_policy_rejected() {
    let err = SplitPolicy::from_lookup(|key| (key == "BILLSPLIT_MIN_AMOUNT").then(|| "0".to_string()))
        .expect_err("zero minimum");
    assert!(matches!(err, billsplitlib::BillsplitError::Config(_)));
}
