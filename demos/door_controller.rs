//! Door Controller
//!
//! This example drives a small hierarchical machine for a motorised door.
//!
//! Key concepts:
//! - Composite states with default children (Operational defaults to Closed)
//! - Events bubbling from a leaf to its ancestors
//! - Guards expressed as `Verdict::Discard`
//! - Transition actions running between exits and entries
//!
//! Run with: RUST_LOG=hsm_engine=trace cargo run --example door_controller

use hsm_engine::{Machine, StateTree, Verdict};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum DoorEvent {
    Open,
    Close,
    Obstacle,
    Fault,
    Repair,
}

#[derive(Debug, Default)]
struct Door {
    motor_runs: u32,
    locked_out: bool,
    journal: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Door Controller ===\n");

    // Door
    // ├── Operational (default: Closed)
    // │   ├── Closed
    // │   └── Open
    // └── Broken
    let mut builder = StateTree::builder();
    let door = builder.add_root("Door");
    let operational = builder.add_child(door, "Operational");
    let closed = builder.add_child(operational, "Closed");
    let open = builder.add_child(operational, "Open");
    let broken = builder.add_child(door, "Broken");

    builder
        .default_child(door, operational)
        .default_child(operational, closed)
        .on_entry(open, |_, d: &mut Door| {
            d.motor_runs += 1;
            d.journal.push("door opened".to_string());
        })
        .on_entry(closed, |_, d: &mut Door| {
            d.journal.push("door closed".to_string());
        })
        .on_entry(broken, |_, d: &mut Door| d.locked_out = true)
        .on_exit(broken, |_, d: &mut Door| d.locked_out = false)
        .on_event(closed, move |m, d: &mut Door, ev: &DoorEvent| match ev {
            DoorEvent::Open => {
                m.transition(d, open)?;
                Ok(Verdict::Handled)
            }
            _ => Ok(Verdict::Unhandled),
        })
        .on_event(open, move |m, d: &mut Door, ev: &DoorEvent| match ev {
            DoorEvent::Close => {
                m.transition(d, closed)?;
                Ok(Verdict::Handled)
            }
            // Stay open and keep the obstacle away from the Door handler.
            DoorEvent::Obstacle => Ok(Verdict::Discard),
            _ => Ok(Verdict::Unhandled),
        })
        .on_event(operational, move |m, d: &mut Door, ev: &DoorEvent| match ev {
            DoorEvent::Fault => {
                m.transition_with(
                    d,
                    broken,
                    Some(|_: &mut Machine<'_, Door, DoorEvent>, d: &mut Door| {
                        d.journal.push("motor cut".to_string())
                    }),
                )?;
                Ok(Verdict::Handled)
            }
            _ => Ok(Verdict::Forward),
        })
        .on_event(broken, move |m, d: &mut Door, ev: &DoorEvent| match ev {
            DoorEvent::Repair => {
                m.transition(d, operational)?;
                Ok(Verdict::Handled)
            }
            _ => Ok(Verdict::Discard),
        })
        .on_event(door, |_, d: &mut Door, ev: &DoorEvent| {
            d.journal.push(format!("door saw {ev:?}"));
            Ok(Verdict::Handled)
        });

    let tree: StateTree<Door, DoorEvent> = match builder.build() {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("invalid door tree: {err}");
            return;
        }
    };

    let mut data = Door::default();
    let mut machine = Machine::new(&tree);

    let steps = [
        DoorEvent::Open,
        DoorEvent::Obstacle,
        DoorEvent::Close,
        DoorEvent::Fault,
        DoorEvent::Open,
        DoorEvent::Repair,
        DoorEvent::Open,
    ];

    if let Err(fault) = machine.init(&mut data, door) {
        eprintln!("init failed: {fault}");
        return;
    }
    println!("Initial state: {}", state_name(&machine));

    for event in &steps {
        if let Err(fault) = machine.dispatch(&mut data, event) {
            eprintln!("machine halted: {fault}");
            return;
        }
        println!(
            "{event:?} -> {} (locked out: {})",
            state_name(&machine),
            data.locked_out
        );
    }

    println!("\nJournal:");
    for line in &data.journal {
        println!("  {line}");
    }
    println!("\nMotor runs: {}", data.motor_runs);

    println!("\n=== Example Complete ===");
}

fn state_name<'t>(machine: &Machine<'t, Door, DoorEvent>) -> &'t str {
    machine.current_state().map_or("?", |state| state.name())
}
