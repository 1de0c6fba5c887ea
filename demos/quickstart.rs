//! Quickstart
//!
//! This example declares a state domain, an entity and one guarded method.
//!
//! Key concepts:
//! - `state_enum!` declares the closed set of states
//! - The entity declares its initial state once, on the type
//! - The guard is built once and shared by every instance
//! - Rejected calls report the expected and actual states
//!
//! Run with: cargo run --example quickstart

use std::convert::Infallible;
use std::sync::LazyLock;
use transition_guard::core::{NameCase, StateCell, StateDomain};
use transition_guard::{
    state_enum, ErrorStyle, GuardConfig, GuardError, Stateful, TransitionGuard,
};

state_enum! {
    enum MachineState {
        Initial,
        Final,
    }
}

struct AFiniteStateMachine {
    cell: StateCell<MachineState>,
}

impl AFiniteStateMachine {
    fn new() -> Self {
        Self {
            cell: StateCell::initial_for::<Self>(),
        }
    }

    fn to_final_state(&mut self) -> Result<Option<()>, GuardError<MachineState, Infallible>> {
        type Guard = TransitionGuard<AFiniteStateMachine, (), (), Infallible>;

        static GUARD: LazyLock<Guard> = LazyLock::new(|| {
            Guard::builder("to_final_state")
                .from(MachineState::Initial)
                .to(MachineState::Final)
                .config(
                    &GuardConfig::default()
                        .with_error_style(ErrorStyle::Entity)
                        .with_name_case(NameCase::Upper),
                )
                .operation(|_machine, ()| {
                    println!("Transitioning to final state");
                    Ok(())
                })
                .build()
                .expect("guard has an operation")
        });

        GUARD.call(self, ())
    }
}

impl Stateful for AFiniteStateMachine {
    type State = MachineState;
    const INITIAL_STATE: Option<MachineState> = Some(MachineState::Initial);

    fn state_cell(&self) -> &StateCell<MachineState> {
        &self.cell
    }

    fn state_cell_mut(&mut self) -> &mut StateCell<MachineState> {
        &mut self.cell
    }
}

fn main() {
    println!("=== Quickstart ===\n");

    match StateDomain::<MachineState>::new() {
        Ok(domain) => println!("Domain has {} states", domain.len()),
        Err(error) => {
            println!("Invalid domain: {error}");
            return;
        }
    }

    let mut machine = AFiniteStateMachine::new();
    println!("Initial state: {:?}\n", machine.current_state());

    if let Err(error) = machine.to_final_state() {
        println!("Unexpected error: {error}");
        return;
    }
    println!("State: {:?}\n", machine.current_state());

    match machine.to_final_state() {
        Ok(_) => println!("Second call unexpectedly succeeded"),
        Err(error) => println!("Second call rejected:\n{error}"),
    }

    println!("\n=== Example Complete ===");
}
