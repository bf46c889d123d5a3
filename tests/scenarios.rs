//! End-to-end scenarios through the public API.

use hsm_engine::engine::{LogReporter, TransitionPlan};
use hsm_engine::{Fault, Machine, StateId, StateTree, StateTreeBuilder, Verdict};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ev {
    ToB1,
    Up,
    Noise,
}

type Log = Vec<String>;
type Tree = StateTree<Log, Ev>;

fn record_calls(builder: &mut StateTreeBuilder<Log, Ev>, id: StateId, name: &'static str) {
    builder
        .on_entry(id, move |_, log: &mut Log| log.push(format!("{name}.onEntry")))
        .on_exit(id, move |_, log: &mut Log| log.push(format!("{name}.onExit")));
}

struct TwoBranches {
    tree: Tree,
    root: StateId,
    a: StateId,
    a1: StateId,
    a2: StateId,
    b1: StateId,
}

// Root > A > {A1, A2}, Root > B > B1. A defaults to A2.
fn two_branches() -> TwoBranches {
    let mut builder = Tree::builder();
    let root = builder.add_root("Root");
    let a = builder.add_child(root, "A");
    let a1 = builder.add_child(a, "A1");
    let a2 = builder.add_child(a, "A2");
    let b = builder.add_child(root, "B");
    let b1 = builder.add_child(b, "B1");
    builder.default_child(root, a).default_child(a, a2);
    for (id, name) in [
        (root, "Root"),
        (a, "A"),
        (a1, "A1"),
        (a2, "A2"),
        (b, "B"),
        (b1, "B1"),
    ] {
        record_calls(&mut builder, id, name);
    }
    builder.on_event(a1, move |m, log: &mut Log, ev: &Ev| match ev {
        Ev::ToB1 => {
            m.transition(log, b1)?;
            Ok(Verdict::Handled)
        }
        Ev::Up => {
            m.transition(log, root)?;
            Ok(Verdict::Handled)
        }
        Ev::Noise => Ok(Verdict::Unhandled),
    });
    TwoBranches {
        tree: builder.build().unwrap(),
        root,
        a,
        a1,
        a2,
        b1,
    }
}

#[test]
fn cross_branch_transition_touches_only_differing_states() {
    let fx = two_branches();
    let mut machine = Machine::new(&fx.tree);
    let mut log = Log::new();
    machine.init(&mut log, fx.a1).unwrap();
    log.clear();

    machine.dispatch(&mut log, &Ev::ToB1).unwrap();

    assert_eq!(log, ["A1.onExit", "A.onExit", "B.onEntry", "B1.onEntry"]);
    assert_eq!(machine.current(), Some(fx.b1));
}

#[test]
fn transition_two_levels_up_redescends_through_defaults() {
    let fx = two_branches();
    let mut machine = Machine::new(&fx.tree);
    let mut log = Log::new();
    machine.init(&mut log, fx.a1).unwrap();
    log.clear();

    machine.dispatch(&mut log, &Ev::Up).unwrap();

    // Lands on A2, a different leaf than the one it left.
    assert_eq!(log, ["A1.onExit", "A.onExit", "A.onEntry", "A2.onEntry"]);
    assert_eq!(machine.current(), Some(fx.a2));
    assert!(!log.iter().any(|call| call.starts_with("Root")));
}

#[test]
fn unhandled_events_change_nothing() {
    let fx = two_branches();
    let mut machine = Machine::new(&fx.tree);
    let mut log = Log::new();
    machine.init(&mut log, fx.a1).unwrap();
    log.clear();

    for _ in 0..5 {
        machine.dispatch(&mut log, &Ev::Noise).unwrap();
    }

    assert!(log.is_empty());
    assert_eq!(machine.current(), Some(fx.a1));
}

#[test]
fn plan_matches_executed_sequence() {
    let fx = two_branches();
    let plan = TransitionPlan::<5>::compute(&fx.tree, Some(fx.a1), Some(fx.root)).unwrap();

    assert_eq!(plan.exits(), &[fx.a1, fx.a]);
    assert!(plan.entries().is_empty());
    assert_eq!(plan.descent(), &[fx.a, fx.a2]);
    assert_eq!(plan.lca(), Some(fx.root));
}

#[test]
fn one_tree_drives_several_machines() {
    let fx = two_branches();
    let mut first = Machine::new(&fx.tree);
    let mut second = Machine::new(&fx.tree);
    let (mut log1, mut log2) = (Log::new(), Log::new());

    first.init(&mut log1, fx.a1).unwrap();
    second.init(&mut log2, fx.b1).unwrap();
    first.dispatch(&mut log1, &Ev::ToB1).unwrap();

    assert_eq!(first.current(), Some(fx.b1));
    assert_eq!(second.current(), Some(fx.b1));
    assert_eq!(log2, ["Root.onEntry", "B.onEntry", "B1.onEntry"]);
}

// L0 > L1 > ... > L6: seven levels against the default limit of five.
fn deep_chain() -> (Tree, Vec<StateId>) {
    let mut builder = Tree::builder();
    let mut ids = vec![builder.add_root("L0")];
    for level in 1..7 {
        let id = builder.add_child(ids[level - 1], format!("L{level}"));
        ids.push(id);
    }
    for (level, id) in ids.iter().enumerate() {
        let name = format!("L{level}");
        let exit_name = name.clone();
        builder
            .on_entry(*id, move |_, log: &mut Log| log.push(format!("{name}.onEntry")))
            .on_exit(*id, move |_, log: &mut Log| {
                log.push(format!("{exit_name}.onExit"))
            });
    }
    (builder.build().unwrap(), ids)
}

fn recording_machine(tree: &Tree) -> (Machine<'_, Log, Ev>, Arc<Mutex<Vec<Fault>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let machine = Machine::builder(tree)
        .reporter(move |fault: &Fault| sink.lock().unwrap().push(*fault))
        .build();
    (machine, seen)
}

#[test]
fn init_beyond_depth_limit_faults_before_any_callback() {
    let (tree, ids) = deep_chain();
    assert_eq!(tree.max_depth(), 7);
    let (mut machine, seen) = recording_machine(&tree);
    let mut log = Log::new();

    let result = machine.init(&mut log, ids[6]);

    let fault = Fault::DepthExceeded {
        from: ids[6],
        limit: 5,
    };
    assert_eq!(result, Err(fault));
    assert!(log.is_empty());
    assert!(!machine.is_initialized());
    assert_eq!(*seen.lock().unwrap(), vec![fault]);
}

#[test]
fn transition_beyond_depth_limit_exits_nothing() {
    let (tree, ids) = deep_chain();
    let (mut machine, _) = recording_machine(&tree);
    let mut log = Log::new();
    machine.init(&mut log, ids[4]).unwrap();
    log.clear();

    let result = machine.transition(&mut log, ids[5]);

    assert_eq!(
        result,
        Err(Fault::DepthExceeded {
            from: ids[5],
            limit: 5
        })
    );
    assert!(log.is_empty());
    assert_eq!(machine.current(), Some(ids[4]));

    // The machine is halted from here on.
    assert_eq!(machine.transition(&mut log, ids[0]), result);
    assert!(log.is_empty());
}

#[test]
fn deeper_limit_accepts_the_same_shape() {
    let mut builder = StateTree::<Vec<usize>, (), 8>::builder();
    let mut ids = vec![builder.add_root("L0")];
    for level in 1..7 {
        let id = builder.add_child(ids[level - 1], format!("L{level}"));
        builder.on_entry(id, move |_, log: &mut Vec<usize>| log.push(level));
        ids.push(id);
    }
    let tree = builder.build().unwrap();
    let mut machine = Machine::builder(&tree).reporter(LogReporter).build();
    let mut log = Vec::new();

    machine.init(&mut log, ids[6]).unwrap();

    assert_eq!(log, [1, 2, 3, 4, 5, 6]);
    assert_eq!(machine.current(), Some(ids[6]));
}

#[test]
fn transition_info_serializes_for_diagnostics() {
    let mut builder = Tree::builder();
    let root = builder.add_root("Root");
    let child = builder.add_child(root, "Child");
    builder.on_entry(child, |m, log: &mut Log| {
        let info = m.transition_info().unwrap();
        log.push(serde_json::to_string(info).unwrap());
    });
    let tree = builder.build().unwrap();
    let mut machine = Machine::new(&tree);
    let mut log = Log::new();

    machine.init(&mut log, child).unwrap();

    assert_eq!(
        log,
        [r#"{"source":null,"target":1,"last_exited":null,"last_entered":0}"#]
    );
}
