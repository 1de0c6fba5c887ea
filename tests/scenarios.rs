//! End-to-end walkthroughs of the guarded-call protocol.

use std::sync::{LazyLock, Once};
use thiserror::Error;
use transition_guard::core::{State, StateCell};
use transition_guard::core::DomainError;
use transition_guard::{state_enum, BuildError, GuardError, Stateful, TransitionGuard};

state_enum! {
    enum MachineState {
        Initial,
        Next,
        Final,
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
struct ValueError(String);

/// Entity whose business data is a log of what its operations saw.
struct Afsm {
    log: Vec<String>,
    cell: StateCell<MachineState>,
}

impl Afsm {
    fn new() -> Self {
        Self {
            log: Vec::new(),
            cell: StateCell::initial_for::<Self>(),
        }
    }

    fn to_next_state(&mut self, value: &str) -> Result<Option<String>, GuardError<MachineState, ValueError>> {
        TO_NEXT.call(self, value.to_string())
    }

    fn to_final_state(&mut self, value: &str) -> Result<Option<String>, GuardError<MachineState, ValueError>> {
        TO_FINAL.call(self, value.to_string())
    }
}

impl Stateful for Afsm {
    type State = MachineState;
    const INITIAL_STATE: Option<MachineState> = Some(MachineState::Initial);

    fn state_cell(&self) -> &StateCell<MachineState> {
        &self.cell
    }

    fn state_cell_mut(&mut self) -> &mut StateCell<MachineState> {
        &mut self.cell
    }
}

type Guard = TransitionGuard<Afsm, String, String, ValueError>;

fn identity(afsm: &mut Afsm, value: String) -> Result<String, ValueError> {
    afsm.log.push(value.clone());
    Ok(value)
}

static TO_NEXT: LazyLock<Guard> = LazyLock::new(|| {
    Guard::builder("to_next_state")
        .from(MachineState::Initial)
        .to(MachineState::Next)
        .operation(identity)
        .build()
        .expect("guard has an operation")
});

static TO_FINAL: LazyLock<Guard> = LazyLock::new(|| {
    Guard::builder("to_final_state")
        .from(MachineState::Initial)
        .to(MachineState::Final)
        .operation(identity)
        .build()
        .expect("guard has an operation")
});

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[test]
fn transition_then_rejected_transition() {
    init_tracing();
    let mut afsm = Afsm::new();

    let result = afsm.to_next_state("blue").unwrap();
    assert_eq!(result.as_deref(), Some("blue"));
    assert_eq!(afsm.current_state(), Some(&MachineState::Next));

    let error = afsm.to_final_state("orange").unwrap_err();
    let state_error = error.as_state_error().unwrap();
    assert_eq!(state_error.actual(), Some(&MachineState::Next));
    assert_eq!(state_error.expected(), &[MachineState::Initial]);
    assert_eq!(
        error.to_string(),
        "Current state for 'Afsm.to_final_state()' does not match expected state(s): \n\
         Expected state in:\n[\"initial\"]\nActual state:\nnext"
    );

    // Only the first call reached the operation.
    assert_eq!(afsm.log, vec!["blue".to_string()]);
    assert_eq!(afsm.current_state(), Some(&MachineState::Next));
}

#[test]
fn idempotent_transition_replays_first_result() {
    init_tracing();
    let to_next = Guard::builder("to_next_state")
        .from(MachineState::Initial)
        .to(MachineState::Next)
        .idempotent()
        .operation(identity)
        .build()
        .unwrap();
    let mut afsm = Afsm::new();

    let first = to_next.call(&mut afsm, "blue".to_string()).unwrap();
    let second = to_next.call(&mut afsm, "orange".to_string()).unwrap();

    assert_eq!(first.as_deref(), Some("blue"));
    assert_eq!(second.as_deref(), Some("blue"));
    assert_eq!(afsm.current_state(), Some(&MachineState::Next));
    assert_eq!(afsm.log, vec!["blue".to_string()]);
}

#[test]
fn handled_failure_transitions_like_success() {
    init_tracing();
    let to_next = Guard::builder("to_next_state")
        .from(MachineState::Initial)
        .to(MachineState::Next)
        .operation(|_afsm: &mut Afsm, value: String| Err(ValueError(value)))
        .on_error(|afsm: &mut Afsm, error: ValueError, value: String| {
            afsm.log.push(format!("{error}:{value}"));
            Ok("orange".to_string())
        })
        .build()
        .unwrap();
    let mut afsm = Afsm::new();

    let result = to_next.call(&mut afsm, "red".to_string()).unwrap();

    assert_eq!(result.as_deref(), Some("orange"));
    assert_eq!(afsm.log, vec!["red:red".to_string()]);
    assert_eq!(afsm.current_state(), Some(&MachineState::Next));
}

#[test]
fn unhandled_failure_propagates() {
    init_tracing();
    let to_next = Guard::builder("to_next_state")
        .from(MachineState::Initial)
        .to(MachineState::Next)
        .operation(|_afsm: &mut Afsm, value: String| Err(ValueError(value)))
        .build()
        .unwrap();
    let mut afsm = Afsm::new();

    let error = to_next.call(&mut afsm, "red".to_string()).unwrap_err();

    assert_eq!(error.to_string(), "red");
    assert_eq!(error.into_operation(), Some(ValueError("red".to_string())));
    assert_eq!(afsm.current_state(), Some(&MachineState::Initial));
    assert_eq!(afsm.state_cell().cached_len(), 0);
}

#[test]
fn unconstrained_guard_never_moves_state() {
    init_tracing();
    let audit = Guard::builder("audit").operation(identity).build().unwrap();
    let mut afsm = Afsm::new();

    for state in MachineState::members() {
        afsm.state_cell_mut().reset(Some(*state));

        let result = audit.call(&mut afsm, state.to_string()).unwrap();

        assert_eq!(result, Some(state.to_string()));
        assert_eq!(afsm.current_state(), Some(state));
    }
    assert_eq!(afsm.log, vec!["initial", "next", "final"]);
}

#[test]
fn chained_transitions_reach_final_state() {
    init_tracing();
    let to_next = Guard::builder("to_next_state")
        .from(MachineState::Initial)
        .to(MachineState::Next)
        .operation(|_afsm: &mut Afsm, _value: String| Ok(String::new()))
        .build()
        .unwrap();
    let to_final = Guard::builder("to_final_state")
        .from(MachineState::Next)
        .to(MachineState::Final)
        .operation(identity)
        .build()
        .unwrap();
    let mut afsm = Afsm::new();

    to_next.call(&mut afsm, String::new()).unwrap();
    let result = to_final.call(&mut afsm, "blue".to_string()).unwrap();

    assert_eq!(result.as_deref(), Some("blue"));
    assert_eq!(afsm.current_state(), Some(&MachineState::Final));
    assert_eq!(afsm.log, vec!["blue".to_string()]);
}

#[test]
fn entity_without_initial_state_starts_empty() {
    struct Blank {
        cell: StateCell<MachineState>,
    }

    impl Stateful for Blank {
        type State = MachineState;

        fn state_cell(&self) -> &StateCell<MachineState> {
            &self.cell
        }

        fn state_cell_mut(&mut self) -> &mut StateCell<MachineState> {
            &mut self.cell
        }
    }

    let start = TransitionGuard::<Blank, (), (), ValueError>::builder("start")
        .to(MachineState::Initial)
        .operation(|_blank, ()| Ok(()))
        .build()
        .unwrap();
    let mut blank = Blank {
        cell: StateCell::initial_for::<Blank>(),
    };

    assert!(blank.current_state().is_none());
    start.call(&mut blank, ()).unwrap();
    assert_eq!(blank.current_state(), Some(&MachineState::Initial));
}

#[test]
fn clashing_state_values_are_rejected_at_build() {
    state_enum! {
        enum Clashing {
            First = "same",
            Second = "same",
        }
    }

    struct Gizmo {
        cell: StateCell<Clashing>,
    }

    impl Stateful for Gizmo {
        type State = Clashing;

        fn state_cell(&self) -> &StateCell<Clashing> {
            &self.cell
        }

        fn state_cell_mut(&mut self) -> &mut StateCell<Clashing> {
            &mut self.cell
        }
    }

    let result = TransitionGuard::<Gizmo, (), (), ValueError>::builder("spin")
        .from(Clashing::Second)
        .to(Clashing::Second)
        .operation(|_gizmo, ()| Ok(()))
        .build();

    match result {
        Err(BuildError::Domain(DomainError::DuplicateValue { value, .. })) => {
            assert_eq!(value, "same")
        }
        _ => panic!("Expected duplicate value error"),
    }
}
