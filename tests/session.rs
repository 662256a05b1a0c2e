use form_forge::{
    CodeGenerator, Draft, FieldType, FormError, FormEvent, FormSession, GenerateError, IndexError,
    Outcome, ValidationError,
};
use std::cell::RefCell;
use std::rc::Rc;

fn submit(session: &mut FormSession, field_type: FieldType, label: &str) {
    session
        .dispatch(FormEvent::SetFieldType { field_type })
        .unwrap();
    session
        .dispatch(FormEvent::SetLabel { label: label.into() })
        .unwrap();
    let outcome = session
        .dispatch(FormEvent::SubmitAddField { draft: None })
        .unwrap();
    assert!(matches!(outcome, Outcome::ListChanged(_)));
}

fn labels(session: &FormSession) -> Vec<String> {
    session.fields().iter().map(|f| f.label.clone()).collect()
}

#[test]
fn builds_a_select_field_through_events() {
    let mut session = FormSession::default();
    session
        .dispatch(FormEvent::SetFieldType { field_type: FieldType::Select })
        .unwrap();
    session
        .dispatch(FormEvent::SetLabel { label: "Colour".into() })
        .unwrap();
    session
        .dispatch(FormEvent::SetRequired { required: true })
        .unwrap();
    session
        .dispatch(FormEvent::SetPendingOption { text: "Red".into() })
        .unwrap();
    assert_eq!(
        session.dispatch(FormEvent::CommitPendingOption).unwrap(),
        Outcome::DraftChanged
    );
    assert_eq!(
        session.dispatch(FormEvent::CommitPendingOption).unwrap(),
        Outcome::Unchanged
    );
    session
        .dispatch(FormEvent::AddOption { text: "Blue".into() })
        .unwrap();
    session
        .dispatch(FormEvent::AddOption { text: "Green".into() })
        .unwrap();
    session
        .dispatch(FormEvent::RemoveOptionAt { index: 2 })
        .unwrap();
    session
        .dispatch(FormEvent::SubmitAddField { draft: None })
        .unwrap();

    let fields = session.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].options, ["Red", "Blue"]);
    assert!(fields[0].is_required);
}

#[test]
fn submit_with_explicit_draft() {
    let mut session = FormSession::default();
    let draft = Draft {
        field_type: FieldType::Email,
        label: "Contact".into(),
        ..Draft::default()
    };
    session
        .dispatch(FormEvent::SubmitAddField { draft: Some(draft) })
        .unwrap();
    assert_eq!(session.fields()[0].field_type, FieldType::Email);
}

#[test]
fn rejected_submitted_draft_keeps_the_one_being_edited() {
    let mut session = FormSession::default();
    session
        .dispatch(FormEvent::SetFieldType { field_type: FieldType::Select })
        .unwrap();
    session
        .dispatch(FormEvent::SetLabel { label: "Colour".into() })
        .unwrap();
    session
        .dispatch(FormEvent::AddOption { text: "Red".into() })
        .unwrap();
    session
        .dispatch(FormEvent::SetPendingOption { text: "Gre".into() })
        .unwrap();
    let before = session.store().draft().clone();

    let blank = Draft {
        label: "  ".into(),
        ..Draft::default()
    };
    let err = session
        .dispatch(FormEvent::SubmitAddField { draft: Some(blank) })
        .unwrap_err();

    assert_eq!(err, FormError::Validation(ValidationError::EmptyLabel));
    assert_eq!(session.store().draft(), &before);
    assert!(session.fields().is_empty());
    assert_eq!(session.store().revision(), 0);
}

#[test]
fn session_subscribers_follow_list_changes() {
    let mut session = FormSession::default();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let id = session.subscribe(move |fields| sink.borrow_mut().push(fields.len()));

    submit(&mut session, FieldType::Text, "A");
    submit(&mut session, FieldType::Text, "B");
    session.dispatch(FormEvent::BeginDrag { index: 1 }).unwrap();
    session.dispatch(FormEvent::Hover { index: 0 }).unwrap();
    session
        .dispatch(FormEvent::RemoveFieldAt { index: 0 })
        .unwrap();
    assert_eq!(*seen.borrow(), [1, 2, 2, 1]);
    assert!(!session.drag().is_dragging());

    assert!(session.unsubscribe(id));
    submit(&mut session, FieldType::Text, "C");
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn errors_surface_as_notifications() {
    let mut session = FormSession::default();

    let err = session.dispatch(FormEvent::RequestGenerate).unwrap_err();
    assert_eq!(err, FormError::Generate(GenerateError::EmptyFieldList));
    assert_eq!(
        err.notification(),
        "No fields selected. Please add at least one field."
    );

    let err = session
        .dispatch(FormEvent::SubmitAddField { draft: None })
        .unwrap_err();
    assert_eq!(err, FormError::Validation(ValidationError::EmptyLabel));
    assert_eq!(err.notification(), "Label field required. Please enter label.");

    let err = session
        .dispatch(FormEvent::RemoveFieldAt { index: 0 })
        .unwrap_err();
    assert_eq!(
        err,
        FormError::Index(IndexError::OutOfRange { index: 0, len: 0 })
    );
    assert!(session.fields().is_empty());
}

#[test]
fn drag_events_reorder_continuously() {
    let mut session = FormSession::default();
    for label in ["A", "B", "C", "D"] {
        submit(&mut session, FieldType::Text, label);
    }

    session.dispatch(FormEvent::BeginDrag { index: 0 }).unwrap();
    assert!(session.is_drag_source(0));
    assert_eq!(
        session.dispatch(FormEvent::Hover { index: 2 }).unwrap(),
        Outcome::Moved { from: 0, to: 2 }
    );
    assert_eq!(labels(&session), ["B", "C", "A", "D"]);
    assert_eq!(
        session.dispatch(FormEvent::Hover { index: 2 }).unwrap(),
        Outcome::Unchanged
    );

    let Outcome::DragEnded(Some(summary)) = session.dispatch(FormEvent::EndDrag).unwrap() else {
        panic!("expected a drag summary");
    };
    assert_eq!(summary.moves, 1);
    assert!(!session.is_drag_source(2));
    assert_eq!(labels(&session), ["B", "C", "A", "D"]);
}

#[test]
fn removing_during_drag_ends_it() {
    let mut session = FormSession::default();
    for label in ["A", "B", "C"] {
        submit(&mut session, FieldType::Text, label);
    }
    session.dispatch(FormEvent::BeginDrag { index: 2 }).unwrap();
    session
        .dispatch(FormEvent::RemoveFieldAt { index: 0 })
        .unwrap();

    assert!(!session.drag().is_dragging());
    assert_eq!(
        session.dispatch(FormEvent::Hover { index: 0 }).unwrap(),
        Outcome::Unchanged
    );
    assert_eq!(labels(&session), ["B", "C"]);
}

#[test]
fn generated_code_is_cached_until_the_list_changes() {
    let mut session = FormSession::new(CodeGenerator::new(2));
    submit(&mut session, FieldType::Text, "Name");
    assert_eq!(session.generated_code(), None);

    let first = session.generate().unwrap();
    assert_eq!(session.generated_code(), Some(first.as_str()));

    // Draft edits leave the list alone.
    session
        .dispatch(FormEvent::SetLabel { label: "Age".into() })
        .unwrap();
    assert_eq!(session.generated_code(), Some(first.as_str()));

    session
        .dispatch(FormEvent::SubmitAddField { draft: None })
        .unwrap();
    assert_eq!(session.generated_code(), None);

    let Outcome::Generated(second) = session.dispatch(FormEvent::RequestGenerate).unwrap() else {
        panic!("expected generated code");
    };
    assert!(second.contains(r#"<label for="field-1">Age:</label>"#));
    assert_eq!(session.generated_code(), Some(second.as_str()));
}

#[test]
fn events_round_trip_through_json() {
    let event: FormEvent =
        serde_json::from_str(r#"{"event":"set_field_type","field_type":"password"}"#).unwrap();
    assert_eq!(
        event,
        FormEvent::SetFieldType { field_type: FieldType::Password }
    );

    let json = serde_json::to_string(&FormEvent::EndDrag).unwrap();
    assert_eq!(json, r#"{"event":"end_drag"}"#);

    let event: FormEvent = serde_json::from_str(
        r#"{"event":"submit_add_field","draft":{"type":"select","label":"Size","options":["S","M"]}}"#,
    )
    .unwrap();
    let FormEvent::SubmitAddField { draft: Some(draft) } = event else {
        panic!("expected a draft");
    };
    assert_eq!(draft.options, ["S", "M"]);
    assert!(!draft.is_required);
}
