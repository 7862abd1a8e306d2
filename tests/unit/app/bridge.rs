use super::*;
use crate::app::Launcher;
use crate::kernel::services::adapters::WidgetRegistry;
use crate::kernel::services::ports::config::DEFAULT_WIDGET;
use crate::kernel::services::ports::BridgeConfig;
use crate::kernel::Geometry;
use crate::test_support::{
    block_on, keyboard_handlers, CallLog, MemoryHost, RecordingWidget, ScriptedLoader, WidgetCall,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn launch(loader: &ScriptedLoader, mode: DispatchMode) -> (Bridge, CallLog) {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let mut registry = WidgetRegistry::new();
    registry.register(DEFAULT_WIDGET, RecordingWidget::factory(Rc::clone(&calls)));
    let host = MemoryHost::new(Geometry::new(1024, 768), &["html-input"]);
    let mut config = BridgeConfig::new("core.bin");
    config.mode = mode;

    let mut launcher = Launcher::new(config);
    let bridge = block_on(launcher.launch(&host, loader, &registry)).unwrap();
    (bridge, calls)
}

fn html(content: &str) -> Message {
    Message::HtmlChanged(content.to_string())
}

#[test]
fn test_each_change_sends_content_at_its_event() {
    let loader = ScriptedLoader::silent();
    let log = loader.log();
    let (mut bridge, _calls) = launch(&loader, DispatchMode::Push);

    bridge.edit(TextEdit::Append("<p>".to_string()));
    bridge.edit(TextEdit::Append("hi".to_string()));
    bridge.edit(TextEdit::Replace("<p>hi</p>".to_string()));

    assert_eq!(
        log.borrow().received,
        vec![html("<p>"), html("<p>hi"), html("<p>hi</p>")]
    );
    assert_eq!(bridge.stats().messages_sent, 3);
    assert_eq!(bridge.core().messages_sent(), 3);
}

#[test]
fn test_noop_edit_sends_nothing() {
    let loader = ScriptedLoader::silent();
    let log = loader.log();
    let (mut bridge, _calls) = launch(&loader, DispatchMode::Push);

    assert_eq!(bridge.edit(TextEdit::Delete { start: 0, end: 3 }), 0);
    assert!(log.borrow().received.is_empty());
}

#[test]
fn test_effects_reach_widget_in_emission_order() {
    let first = json!({"keymap": "vim", "bindings": [{"key": "jj", "command": "escape"}]});
    let second = json!("emacs");
    let (a, b) = (first.clone(), second.clone());
    let loader = ScriptedLoader::new(move |_| {
        vec![
            Effect::set_keyboard_handler(a.clone()),
            Effect::set_keyboard_handler(b.clone()),
        ]
    });
    let (mut bridge, calls) = launch(&loader, DispatchMode::Push);

    bridge.edit(TextEdit::Append("x".to_string()));

    assert_eq!(keyboard_handlers(&calls), vec![first, second]);
    assert_eq!(bridge.stats().effects_applied, 2);
}

#[test]
fn test_unknown_effect_touches_no_widget_method() {
    let bogus: Effect = serde_json::from_value(json!({"type": "bogus"})).unwrap();
    let loader = ScriptedLoader::new(move |_| vec![bogus.clone()]);
    let (mut bridge, calls) = launch(&loader, DispatchMode::Push);
    calls.borrow_mut().clear();

    bridge.edit(TextEdit::Append("x".to_string()));

    assert_eq!(
        *calls.borrow(),
        vec![
            WidgetCall::ApplyEdit(TextEdit::Append("x".to_string())),
            WidgetCall::Value,
        ]
    );
    assert_eq!(bridge.stats().effects_ignored, 1);
    assert_eq!(bridge.stats().effects_applied, 0);
}

#[test]
fn test_initialization_effects_applied_once_wired() {
    let loader =
        ScriptedLoader::silent().with_init_effects(vec![Effect::set_keyboard_handler("emacs")]);
    let (mut bridge, calls) = launch(&loader, DispatchMode::Push);

    assert_eq!(keyboard_handlers(&calls), vec![json!("emacs")]);
    assert_eq!(bridge.pump(), 0);
    assert_eq!(keyboard_handlers(&calls), vec![json!("emacs")]);
}

#[test]
fn test_passive_mode_only_sends_on_sync() {
    let loader = ScriptedLoader::new(|_| vec![Effect::set_keyboard_handler("vim")]);
    let log = loader.log();
    let (mut bridge, calls) = launch(&loader, DispatchMode::Passive);
    assert!(!calls.borrow().contains(&WidgetCall::OnChange));

    bridge.edit(TextEdit::Append("<b>x</b>".to_string()));
    assert!(log.borrow().received.is_empty());

    bridge.sync_content().unwrap();
    assert_eq!(log.borrow().received, vec![html("<b>x</b>")]);
    assert_eq!(keyboard_handlers(&calls), vec![json!("vim")]);
    assert_eq!(bridge.mode(), DispatchMode::Passive);
}

#[test]
fn test_send_failures_counted_on_both_paths() {
    let loader = ScriptedLoader::rejecting();
    let (mut bridge, _calls) = launch(&loader, DispatchMode::Push);

    bridge.edit(TextEdit::Append("<p>".to_string()));
    assert_eq!(bridge.stats().send_failures, 1);

    let err = bridge.sync_content().unwrap_err();
    assert!(matches!(err, CoreError::Rejected(_)), "{err:?}");
    assert_eq!(bridge.stats().send_failures, 2);
    assert_eq!(bridge.stats().messages_sent, 0);
}
