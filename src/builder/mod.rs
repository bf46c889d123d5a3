//! Builder API for state trees and machines.
//!
//! Trees are assembled once, validated, and frozen; machines are then
//! configured against a borrowed tree.
//!
//! # Example
//!
//! ```
//! use hsm_engine::builder::StateTreeBuilder;
//! use hsm_engine::core::{StateTree, Verdict};
//! use hsm_engine::engine::Machine;
//!
//! enum Button {
//!     Press,
//! }
//!
//! let mut builder = StateTreeBuilder::new();
//! let power = builder.add_root("Power");
//! let off = builder.add_child(power, "Off");
//! let on = builder.add_child(power, "On");
//! builder
//!     .default_child(power, off)
//!     .on_entry(on, |_, presses: &mut u32| *presses += 1)
//!     .on_event(off, move |m, presses: &mut u32, _: &Button| {
//!         m.transition(presses, on)?;
//!         Ok(Verdict::Discard)
//!     });
//! let tree: StateTree<u32, Button> = builder.build().unwrap();
//!
//! let mut presses = 0;
//! let mut machine = Machine::new(&tree);
//! machine.init(&mut presses, power).unwrap();
//! machine.dispatch(&mut presses, &Button::Press).unwrap();
//!
//! assert_eq!(machine.current(), Some(on));
//! assert_eq!(presses, 1);
//! ```

pub mod error;
pub mod machine;
pub mod tree;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use tree::StateTreeBuilder;
