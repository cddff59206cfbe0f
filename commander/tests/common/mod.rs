#![allow(dead_code)]

use commander::{CancellationToken, Command, CommandError, CommandResult, Handler};
use commander::decorators::Validate;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Test Commands
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceOrder {
    pub sku: String,
    pub quantity: u32,
}

impl Command for PlaceOrder {
    type Output = u64;
}

impl PlaceOrder {
    pub fn new(sku: &str, quantity: u32) -> Self {
        Self {
            sku: sku.to_string(),
            quantity,
        }
    }
}

impl Validate for PlaceOrder {
    fn validate(&self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err("quantity must be positive".into());
        }
        if self.sku.is_empty() {
            return Err("sku must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CancelOrder {
    pub order_id: u64,
}

impl Command for CancelOrder {
    type Output = u64;
}

#[derive(Debug)]
pub struct Ping;

impl Command for Ping {
    type Output = ();
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Prices an order at 100 per unit and counts invocations.
#[derive(Clone, Default)]
pub struct OrderHandler {
    pub calls: Arc<AtomicUsize>,
}

impl OrderHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Handler<PlaceOrder> for OrderHandler {
    async fn handle(&self, command: PlaceOrder, cancel: &CancellationToken) -> CommandResult<u64> {
        cancel.check()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(u64::from(command.quantity) * 100)
    }
}

impl Handler<CancelOrder> for OrderHandler {
    async fn handle(&self, command: CancelOrder, cancel: &CancellationToken) -> CommandResult<u64> {
        cancel.check()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if command.order_id == 0 {
            return Err(CommandError::custom("unknown order"));
        }
        Ok(command.order_id)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
