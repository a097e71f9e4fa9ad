//! Benchmarks for key sequence resolution hot paths
//!
//! Resolution runs once per keystroke, so it should stay flat as views
//! accumulate bindings.
//!
//! Run with: cargo bench resolve

use viewkeys::keymap::{
    Action, Binding, BindingStore, KeyBindingManager, KeySequenceReader, ViewId,
};

fn main() {
    divan::main();
}

const HIERARCHY: [ViewId; 2] = [ViewId::History, ViewId::Main];

/// Manager with defaults plus `extra` generated bindings in every view
fn populated_manager(extra: usize) -> KeyBindingManager {
    let mut manager = KeyBindingManager::with_builtin_defaults();
    for view in ViewId::ALL {
        for i in 0..extra {
            manager.set_action_binding(view, &format!("<C-x>{}", i), Action::Select);
        }
    }
    manager
}

#[divan::bench(args = [0, 100, 1000])]
fn resolve_exact(bencher: divan::Bencher, extra: usize) {
    let manager = populated_manager(extra);
    bencher.bench_local(|| {
        manager.resolve(divan::black_box(&HIERARCHY), divan::black_box("gg"))
    });
}

#[divan::bench(args = [0, 100, 1000])]
fn resolve_prefix(bencher: divan::Bencher, extra: usize) {
    let manager = populated_manager(extra);
    bencher.bench_local(|| {
        manager.resolve(divan::black_box(&HIERARCHY), divan::black_box("<C-x>"))
    });
}

#[divan::bench]
fn resolve_miss(bencher: divan::Bencher) {
    let manager = KeyBindingManager::with_builtin_defaults();
    let empty: &[ViewId] = &[];
    bencher.bench_local(|| manager.resolve(divan::black_box(empty), divan::black_box("zzz")));
}

#[divan::bench]
fn reader_chord(bencher: divan::Bencher) {
    let manager = KeyBindingManager::with_builtin_defaults();
    bencher.bench_local(|| {
        let mut reader = KeySequenceReader::new();
        reader.feed(&manager, &HIERARCHY, "<C-w>");
        reader.feed(&manager, &HIERARCHY, "w")
    });
}

#[divan::bench(args = [10, 100, 1000])]
fn store_insert(n: usize) -> BindingStore {
    let mut store = BindingStore::new();
    for i in 0..n {
        store.insert(&format!("<C-x>{}", i), Binding::Action(Action::Select));
    }
    store
}
