//! E-commerce Order Processing
//!
//! This example walks an order through its lifecycle with guarded operations.
//!
//! Key concepts:
//! - Order states (Draft -> Paid -> Shipped -> Delivered, or Cancelled)
//! - Idempotent payment: paying twice replays the first transaction id
//! - A failure handler that turns a carrier outage into a manual shipment
//! - A guard table listing what the current state allows
//!
//! Run with: cargo run --example order_processing
//! Set RUST_LOG=transition_guard=debug to see the guard's decisions.

use std::sync::LazyLock;
use thiserror::Error;
use transition_guard::core::StateCell;
use transition_guard::{state_enum, GuardTable, GuardTableBuilder, Stateful, TransitionGuardBuilder};

state_enum! {
    enum OrderState {
        Draft,
        Paid,
        Shipped,
        Delivered,
        Cancelled,
    }
    case: Upper
}

#[derive(Debug, Error)]
enum OrderError {
    #[error("Order {0} has nothing to pay for")]
    Empty(u64),

    #[error("Carrier unavailable for {0}")]
    CarrierDown(String),
}

// Business fields never change; only the state cell does.
struct Order {
    id: u64,
    total: f64,
    items: Vec<String>,
    shipping_address: String,
    cell: StateCell<OrderState>,
}

impl Stateful for Order {
    type State = OrderState;
    const INITIAL_STATE: Option<OrderState> = Some(OrderState::Draft);

    fn state_cell(&self) -> &StateCell<OrderState> {
        &self.cell
    }

    fn state_cell_mut(&mut self) -> &mut StateCell<OrderState> {
        &mut self.cell
    }
}

type Step = TransitionGuardBuilder<Order, (), String, OrderError>;

static ORDER_GUARDS: LazyLock<GuardTable<Order, (), String, OrderError>> = LazyLock::new(|| {
    GuardTableBuilder::new()
        .guard(
            Step::new("pay")
                .from(OrderState::Draft)
                .to(OrderState::Paid)
                .idempotent()
                .operation(|order, ()| {
                    if order.items.is_empty() || order.total <= 0.0 {
                        return Err(OrderError::Empty(order.id));
                    }
                    println!("  [Payment] Charging ${:.2}", order.total);
                    Ok(format!("TXN-{}", order.id * 100))
                }),
        )
        .and_then(|table| {
            table.guard(
                Step::new("ship")
                    .from(OrderState::Paid)
                    .to(OrderState::Shipped)
                    .operation(|order, ()| Err(OrderError::CarrierDown(order.shipping_address.clone())))
                    .on_error(|order, error, ()| {
                        println!("  [Shipping] {error}, booking manual courier");
                        Ok(format!("MANUAL-{}", order.id))
                    }),
            )
        })
        .and_then(|table| {
            table.guard(
                Step::new("deliver")
                    .from(OrderState::Shipped)
                    .to(OrderState::Delivered)
                    .operation(|order, ()| Ok(format!("Order {} delivered", order.id))),
            )
        })
        .and_then(|table| {
            table.guard(
                Step::new("cancel")
                    .from_any([OrderState::Draft, OrderState::Paid])
                    .to(OrderState::Cancelled)
                    .operation(|order, ()| Ok(format!("Order {} cancelled", order.id))),
            )
        })
        .and_then(|table| table.build())
        .expect("order guards are well formed")
});

fn run(order: &mut Order, operation: &str) {
    let Some(guard) = ORDER_GUARDS.get(operation) else {
        println!("  No operation named '{operation}'");
        return;
    };

    match guard.call(order, ()) {
        Ok(Some(result)) => println!("  {operation}: {result}"),
        Ok(None) => println!("  {operation}: nothing to replay"),
        Err(error) => println!("  {operation} failed: {error}"),
    }
}

fn available(order: &Order) -> String {
    ORDER_GUARDS
        .available_from(order.current_state())
        .map(|guard| guard.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    println!("=== E-commerce Order Processing ===\n");

    let mut order = Order {
        id: 12345,
        total: 149.99,
        items: vec!["Book".to_string(), "Pen".to_string()],
        shipping_address: "123 Main St, City, State 12345".to_string(),
        cell: StateCell::initial_for::<Order>(),
    };

    println!("Processing order {}:", order.id);
    println!("  Total: ${:.2}", order.total);
    println!("  Items: {}", order.items.join(", "));
    println!();

    for step in ["pay", "pay", "ship", "cancel", "deliver", "restart"] {
        println!("Step: {step}");
        run(&mut order, step);
        if let Some(state) = order.current_state() {
            println!("  State: {state} (available: {})", available(&order));
        }
        println!();
    }

    println!("Key Takeaways:");
    println!("- Repeating an idempotent step replays its first result");
    println!("- Handled failures still move the order forward");
    println!("- Steps from the wrong state are rejected without side effects");

    println!("\n=== Example Complete ===");
}
