// Keyshortcut Dispatch Scenarios
//
// These tests drive the dispatcher the way a host application does:
// mount shortcuts, deliver keydowns, observe what fired and what was logged.
//
// Run with: cargo test -p keyshortcut-core --test dispatch_scenarios

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keyshortcut_core::{
    Binding, Dispatcher, KeyEvent, KeyShortcut, MemorySink, Modifier, Modifiers, ShortcutAction,
};

// =========================================================================
// Test Helpers
// =========================================================================

/// Action that counts its invocations
fn counter() -> (Arc<AtomicUsize>, ShortcutAction) {
    let calls = Arc::new(AtomicUsize::new(0));
    let handle = calls.clone();
    let action = ShortcutAction::new(move |_: &KeyEvent| {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (calls, action)
}

fn mods(list: &[Modifier]) -> Modifiers {
    list.iter().copied().collect()
}

fn press(dispatcher: &Dispatcher, key: &str, modifiers: &[Modifier]) {
    dispatcher.handle_event(&mut KeyEvent::new(key, mods(modifiers)));
}

fn logging_dispatcher() -> (Arc<MemorySink>, Dispatcher) {
    let sink = Arc::new(MemorySink::new());
    let dispatcher = Dispatcher::new().with_sink(sink.clone());
    (sink, dispatcher)
}

fn test_func(_event: &KeyEvent) {}

// =========================================================================
// Firing
// =========================================================================

#[test]
fn test_plain_key_fires_once() {
    let dispatcher = Dispatcher::new();
    let (calls, action) = counter();
    let _shortcut =
        KeyShortcut::attach(&dispatcher, Binding::new("p").with_shortcut_action(action)).unwrap();

    press(&dispatcher, "p", &[]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    press(&dispatcher, "p", &[Modifier::Ctrl]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_each_single_modifier_is_required() {
    for modifier in [Modifier::Alt, Modifier::Shift, Modifier::Ctrl, Modifier::Meta] {
        let dispatcher = Dispatcher::new();
        let (calls, action) = counter();
        dispatcher
            .register(
                Binding::new("p")
                    .with_modifier(modifier)
                    .with_shortcut_action(action),
            )
            .unwrap();

        press(&dispatcher, "p", &[]);
        assert_eq!(calls.load(Ordering::SeqCst), 0, "{} should be required", modifier);

        press(&dispatcher, "p", &[modifier]);
        assert_eq!(calls.load(Ordering::SeqCst), 1, "{} should match", modifier);
    }
}

#[test]
fn test_multiple_modifiers_match_exactly() {
    let dispatcher = Dispatcher::new();
    let (calls, action) = counter();
    dispatcher
        .register(
            Binding::new("p")
                .with_modifier(Modifier::Alt)
                .with_modifier(Modifier::Ctrl)
                .with_shortcut_action(action),
        )
        .unwrap();

    press(&dispatcher, "p", &[Modifier::Alt]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    press(&dispatcher, "p", &[Modifier::Alt, Modifier::Shift]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    press(&dispatcher, "p", &[Modifier::Ctrl, Modifier::Alt]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    press(&dispatcher, "p", &[Modifier::Alt, Modifier::Ctrl, Modifier::Shift]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_superset_bindings_do_not_interfere() {
    let dispatcher = Dispatcher::new();
    let (ctrl_calls, ctrl_action) = counter();
    let (ctrl_alt_calls, ctrl_alt_action) = counter();
    dispatcher
        .register(Binding::parse("Ctrl-x").unwrap().with_shortcut_action(ctrl_action))
        .unwrap();
    dispatcher
        .register(Binding::parse("Ctrl-Alt-x").unwrap().with_shortcut_action(ctrl_alt_action))
        .unwrap();

    press(&dispatcher, "x", &[Modifier::Ctrl]);
    press(&dispatcher, "x", &[Modifier::Ctrl, Modifier::Alt]);
    press(&dispatcher, "x", &[Modifier::Ctrl, Modifier::Alt]);

    assert_eq!(ctrl_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctrl_alt_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_stop_propagation_hides_older_shortcut() {
    let dispatcher = Dispatcher::new();
    let (old_calls, old_action) = counter();
    let (new_calls, new_action) = counter();

    let _old =
        KeyShortcut::attach(&dispatcher, Binding::new("p").with_shortcut_action(old_action))
            .unwrap();
    let newer = KeyShortcut::attach(
        &dispatcher,
        Binding::new("p")
            .with_shortcut_action(new_action)
            .with_stop_propagation(),
    )
    .unwrap();

    press(&dispatcher, "p", &[]);
    assert_eq!(new_calls.load(Ordering::SeqCst), 1);
    assert_eq!(old_calls.load(Ordering::SeqCst), 0);

    // once the newer shortcut is gone the older one fires again
    newer.detach();
    press(&dispatcher, "p", &[]);
    assert_eq!(old_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_removed_shortcut_never_fires() {
    let dispatcher = Dispatcher::new();
    let (calls, action) = counter();
    let shortcut =
        KeyShortcut::attach(&dispatcher, Binding::new("p").with_shortcut_action(action)).unwrap();
    drop(shortcut);

    press(&dispatcher, "p", &[]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unregistered_key_is_a_noop() {
    let dispatcher = Dispatcher::new();
    dispatcher.register(Binding::new("p")).unwrap();
    let dispatch = dispatcher.handle_event(&mut KeyEvent::key_down("Escape")).unwrap();
    assert!(dispatch.fired().is_empty());
    assert!(dispatch.log().is_none());
}

#[test]
fn test_dispatchers_are_independent() {
    let first = Dispatcher::new();
    let second = Dispatcher::new();
    let (calls, action) = counter();
    first.register(Binding::new("p").with_shortcut_action(action)).unwrap();
    let id = second.register(Binding::new("p")).unwrap();

    assert_eq!(id.get(), 1);
    press(&second, "p", &[]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    press(&first, "p", &[]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "action failed")]
fn test_panicking_action_is_not_caught() {
    let dispatcher = Dispatcher::new();
    dispatcher.register(Binding::new("p")).unwrap();
    dispatcher
        .register(Binding::new("p").with_action(|_: &KeyEvent| panic!("action failed")))
        .unwrap();
    press(&dispatcher, "p", &[]);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_ids_distinct_and_increasing() {
    let dispatcher = Dispatcher::new();
    let keys = ["p", "q", "p", "Escape", "p", "q"];
    let ids: Vec<_> = keys
        .iter()
        .map(|key| dispatcher.register(Binding::new(*key)).unwrap())
        .collect();

    for (i, pair) in ids.windows(2).enumerate() {
        assert!(pair[0] < pair[1], "id {} not below id {}", i, i + 1);
    }
    assert_eq!(dispatcher.count(), keys.len() as u64);
}

#[test]
fn test_deregister_removes_exactly_one_record() {
    let dispatcher = Dispatcher::new();
    let a = dispatcher.register(Binding::new("p")).unwrap();
    let b = dispatcher.register(Binding::new("p")).unwrap();
    let c = dispatcher.register(Binding::new("q")).unwrap();

    dispatcher.deregister(b);
    dispatcher.deregister(b);

    let snapshot = dispatcher.snapshot();
    let p_ids: Vec<_> = snapshot["p"].iter().map(|r| r.id()).collect();
    let q_ids: Vec<_> = snapshot["q"].iter().map(|r| r.id()).collect();
    assert_eq!(p_ids, vec![a]);
    assert_eq!(q_ids, vec![c]);
}

#[test]
fn test_deregister_collection() {
    let dispatcher = Dispatcher::new();
    let ids: Vec<_> = (0..3)
        .map(|_| dispatcher.register(Binding::new("p")).unwrap())
        .collect();
    assert_eq!(dispatcher.deregister(ids.clone()), 3);
    assert_eq!(dispatcher.deregister(ids), 0);
    assert_eq!(dispatcher.active_count(), 0);
    assert_eq!(dispatcher.count(), 3);
}

// =========================================================================
// Logging gate
// =========================================================================

#[test]
fn test_log_uses_label() {
    let (sink, dispatcher) = logging_dispatcher();
    let _r1 = KeyShortcut::attach(
        &dispatcher,
        Binding::new("c").with_label("test").with_log().with_action(test_func),
    )
    .unwrap();

    press(&dispatcher, "c", &[]);
    assert_eq!(sink.labels(), vec!["test"]);
}

#[test]
fn test_log_falls_back_to_action_name() {
    let (sink, dispatcher) = logging_dispatcher();
    let _r2 =
        KeyShortcut::attach(&dispatcher, Binding::new("c").with_log().with_action(test_func))
            .unwrap();

    press(&dispatcher, "c", &[]);
    assert_eq!(sink.labels(), vec!["test_func"]);
}

#[test]
fn test_log_once_per_keypress_for_any_key() {
    let (sink, dispatcher) = logging_dispatcher();
    dispatcher.register(Binding::new("c").with_log().with_label("c")).unwrap();
    dispatcher.register(Binding::new("d").with_log().with_label("d")).unwrap();
    dispatcher.register(Binding::new("c").with_log().with_label("c2")).unwrap();

    press(&dispatcher, "c", &[]);
    press(&dispatcher, "z", &[Modifier::Ctrl, Modifier::Alt]);
    press(&dispatcher, "d", &[Modifier::Shift]);

    let entries = sink.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].label, "c2  c");
    assert_eq!(entries[1].label, "KEY");
    assert_eq!(entries[1].modifiers, "alt ctrl");
    assert_eq!(entries[1].key, "z");
    assert_eq!(entries[2].label, "KEY");
}

#[test]
fn test_bare_modifiers_never_log() {
    let (sink, dispatcher) = logging_dispatcher();
    dispatcher.register(Binding::new("c").with_log()).unwrap();

    for key in ["Control", "Meta", "Alt", "Shift"] {
        press(&dispatcher, key, &[]);
    }
    dispatcher.handle_event(&mut KeyEvent::modifier_down(Modifier::Ctrl));
    assert!(sink.is_empty());

    press(&dispatcher, "c", &[Modifier::Ctrl]);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_logging_stops_when_last_logged_shortcut_detaches() {
    let (sink, dispatcher) = logging_dispatcher();
    let logged = KeyShortcut::attach(&dispatcher, Binding::new("c").with_log()).unwrap();
    let _quiet = KeyShortcut::attach(&dispatcher, Binding::new("q")).unwrap();

    press(&dispatcher, "q", &[]);
    assert_eq!(sink.len(), 1);

    logged.detach();
    assert!(!dispatcher.logging_enabled());
    press(&dispatcher, "q", &[]);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_stopped_dispatch_logs_fired_set_only() {
    let (sink, dispatcher) = logging_dispatcher();
    dispatcher.register(Binding::new("c").with_label("older").with_log()).unwrap();
    dispatcher
        .register(Binding::new("c").with_label("newer").with_stop_propagation())
        .unwrap();

    press(&dispatcher, "c", &[]);
    assert_eq!(sink.labels(), vec!["newer"]);
}
