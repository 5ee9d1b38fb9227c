mod common;

use std::rc::Rc;

use common::*;
use oxide_dom::{Event, EventKind};
use oxide_judge::{FieldState, FormValidation, LiveOptions, ValidatorOptions};

fn fire(validation: &FormValidation, fx: &mut Fixture, kind: EventKind, i: usize) {
    let mut event = Event::new(kind, fx.fields[i]);
    validation.dispatch(&mut fx.doc, &mut event).unwrap();
}

fn attach(fx: &mut Fixture, engine: Rc<Counting>, options: ValidatorOptions) -> FormValidation {
    let mut validation = FormValidation::new(engine);
    validation
        .attach(&mut fx.doc, &[fx.form], options)
        .unwrap();
    validation
}

#[test]
fn test_default_options_revalidate_on_every_input() {
    let mut fx = form_with(&["name"]);
    let engine = Rc::new(Counting::default());
    let validation = attach(&mut fx, engine.clone(), ValidatorOptions::default());

    fire(&validation, &mut fx, EventKind::Input, 0);
    fire(&validation, &mut fx, EventKind::Input, 0);
    assert_eq!(engine.calls.borrow().len(), 2);
    assert_eq!(FieldState::of(&fx.doc, fx.fields[0]), FieldState::Valid);
}

#[test]
fn test_only_not_validated_fields_are_live() {
    let mut fx = form_with(&["name"]);
    let engine = Rc::new(Counting::default());
    let options = ValidatorOptions::from_json(
        r#"{"live": {"not_validated": true, "valid": false, "invalid": false}}"#,
    )
    .unwrap();
    let validation = attach(&mut fx, engine.clone(), options);

    // First input validates; the field is now valid and leaves the selector.
    fire(&validation, &mut fx, EventKind::Input, 0);
    fire(&validation, &mut fx, EventKind::Input, 0);
    assert_eq!(engine.calls.borrow().len(), 1);

    // Blur always validates.
    fire(&validation, &mut fx, EventKind::Blur, 0);
    assert_eq!(engine.calls.borrow().len(), 2);
}

#[test]
fn test_partial_live_object_disables_missing_states() {
    let mut fx = form_with(&["name"]);
    let engine = Rc::new(Counting::default());
    let options = ValidatorOptions::from_json(r#"{"live": {"valid": true}}"#).unwrap();
    assert_eq!(
        options.live,
        Some(LiveOptions {
            not_validated: false,
            valid: true,
            invalid: false
        })
    );
    let validation = attach(&mut fx, engine.clone(), options);

    fire(&validation, &mut fx, EventKind::Input, 0);
    assert!(engine.calls.borrow().is_empty());

    fire(&validation, &mut fx, EventKind::Blur, 0);
    fire(&validation, &mut fx, EventKind::Input, 0);
    assert_eq!(engine.calls.borrow().len(), 2);
}

#[test]
fn test_disabled_live_only_validates_on_blur_and_submit() {
    let mut fx = form_with(&["name"]);
    let engine = Rc::new(Counting::default());
    let validation = attach(&mut fx, engine.clone(), ValidatorOptions::new().without_live());

    fire(&validation, &mut fx, EventKind::Input, 0);
    fire(&validation, &mut fx, EventKind::Change, 0);
    assert!(engine.calls.borrow().is_empty());

    fire(&validation, &mut fx, EventKind::Blur, 0);
    assert_eq!(engine.calls.borrow().len(), 1);

    let mut submit = Event::new(EventKind::Submit, fx.form);
    validation.dispatch(&mut fx.doc, &mut submit).unwrap();
    assert_eq!(engine.calls.borrow().len(), 2);
}

#[test]
fn test_change_event_on_select() {
    let mut fx = form_with(&[]);
    let group = fx.doc.build("div").append_to(fx.form).unwrap();
    let select = fx
        .doc
        .build("select")
        .id("role")
        .attr(oxide_judge::classes::FIELD_ATTR, "")
        .append_to(group)
        .unwrap();
    let engine = Rc::new(Counting::default());
    let validation = attach(&mut fx, engine.clone(), ValidatorOptions::default());

    let mut event = Event::new(EventKind::Change, select);
    validation.dispatch(&mut fx.doc, &mut event).unwrap();
    assert_eq!(engine.calls.borrow().as_slice(), &[select]);
}

#[test]
fn test_rebinding_after_set_options() {
    let mut fx = form_with(&["name"]);
    let engine = Rc::new(Counting::default());
    let mut validation = attach(&mut fx, engine.clone(), ValidatorOptions::default());

    validation
        .validator_mut(fx.form)
        .unwrap()
        .set_options(ValidatorOptions::new().live(LiveOptions::none()));
    fire(&validation, &mut fx, EventKind::Input, 0);
    assert!(engine.calls.borrow().is_empty());
}
