use super::*;
use crate::test_support::{block_on, ScriptedLoader};
use std::cell::RefCell;
use std::rc::Rc;

fn echo_keyboard(message: &Message) -> Vec<Effect> {
    let Message::HtmlChanged(html) = message;
    vec![Effect::set_keyboard_handler(html.clone())]
}

fn collect_effects(handle: &mut CoreHandle) -> Rc<RefCell<Vec<Effect>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    handle.on_effect(move |effect| sink.borrow_mut().push(effect));
    seen
}

#[test]
fn test_load_then_initialize_passes_geometry() {
    let loader = ScriptedLoader::silent();
    let log = loader.log();

    let ready = block_on(CoreHandle::load(&loader, "core.bin", None)).unwrap();
    assert_eq!(ready.location(), "core.bin");
    assert!(log.borrow().initialized.is_empty());

    let handle = ready.initialize(Geometry::new(1024, 768)).unwrap();
    assert_eq!(handle.location(), "core.bin");
    assert_eq!(log.borrow().loads, vec!["core.bin".to_string()]);
    assert_eq!(log.borrow().initialized, vec![Geometry::new(1024, 768)]);
}

#[test]
fn test_effects_follow_send_in_emission_order() {
    let loader = ScriptedLoader::new(|message| {
        let Message::HtmlChanged(html) = message;
        vec![
            Effect::set_keyboard_handler(format!("{html}-1")),
            Effect::set_keyboard_handler(format!("{html}-2")),
        ]
    });
    let mut handle = block_on(CoreHandle::load(&loader, "core", None))
        .unwrap()
        .initialize(Geometry::new(1, 1))
        .unwrap();
    let seen = collect_effects(&mut handle);

    handle.send(Message::HtmlChanged("a".to_string())).unwrap();
    handle.send(Message::HtmlChanged("b".to_string())).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            Effect::set_keyboard_handler("a-1"),
            Effect::set_keyboard_handler("a-2"),
            Effect::set_keyboard_handler("b-1"),
            Effect::set_keyboard_handler("b-2"),
        ]
    );
    assert_eq!(handle.messages_sent(), 2);
}

#[test]
fn test_second_effect_registration_replaces_first() {
    let loader = ScriptedLoader::new(echo_keyboard);
    let mut handle = block_on(CoreHandle::load(&loader, "core", None))
        .unwrap()
        .initialize(Geometry::new(1, 1))
        .unwrap();

    let first = collect_effects(&mut handle);
    let second = collect_effects(&mut handle);

    handle.send(Message::HtmlChanged("vim".to_string())).unwrap();

    assert!(first.borrow().is_empty());
    assert_eq!(*second.borrow(), vec![Effect::set_keyboard_handler("vim")]);
}

#[test]
fn test_initialize_effects_wait_for_callback() {
    let loader = ScriptedLoader::silent()
        .with_init_effects(vec![Effect::set_keyboard_handler("ace/keyboard/emacs")]);
    let mut handle = block_on(CoreHandle::load(&loader, "core", None))
        .unwrap()
        .initialize(Geometry::new(1, 1))
        .unwrap();

    let seen = collect_effects(&mut handle);
    assert_eq!(
        *seen.borrow(),
        vec![Effect::set_keyboard_handler("ace/keyboard/emacs")]
    );

    // Flushed once; a later registration does not see them again.
    let later = collect_effects(&mut handle);
    assert!(later.borrow().is_empty());
}

#[test]
fn test_load_failure_never_initializes() {
    let loader = ScriptedLoader::failing();
    let log = loader.log();

    let err = block_on(CoreHandle::load(&loader, "missing.bin", None))
        .err()
        .expect("load should fail");
    assert!(matches!(err, LoadError::Unreachable { ref location, .. } if location == "missing.bin"));
    assert!(log.borrow().initialized.is_empty());
    assert!(log.borrow().received.is_empty());
}

#[test]
fn test_load_timeout() {
    let loader = ScriptedLoader::hanging();

    let err = block_on(CoreHandle::load(
        &loader,
        "slow.bin",
        Some(Duration::from_millis(20)),
    ))
    .err()
    .expect("load should time out");

    match err {
        LoadError::Timeout { location, after } => {
            assert_eq!(location, "slow.bin");
            assert_eq!(after, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}
