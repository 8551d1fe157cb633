//! In-memory [`MerakiApi`] used by tests

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::client::MerakiApi;
use super::operations::{Operation, OperationResult};

type Responder = dyn Fn(&Operation) -> Result<(u16, String)> + Send + Sync;

/// Answers every request through a closure and records what was sent
pub struct FakeApi {
    responder: Box<Responder>,
    calls: Mutex<Vec<Operation>>,
}

impl FakeApi {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Operation) -> Result<(u16, String)> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every operation executed so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, operation_type: &str) -> Vec<Operation> {
        self.calls()
            .into_iter()
            .filter(|op| op.operation_type() == operation_type)
            .collect()
    }
}

#[async_trait]
impl MerakiApi for FakeApi {
    async fn execute(&self, operation: &Operation) -> Result<OperationResult> {
        self.calls.lock().unwrap().push(operation.clone());
        let (status, body) = (self.responder)(operation)?;
        Ok(OperationResult::new(operation.clone(), status, body))
    }
}
