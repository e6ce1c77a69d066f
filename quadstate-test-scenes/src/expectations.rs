use quadstate::{FilterOperation, QuadOperation, ShaderOwner};

/// A single closed-batch expectation to validate after a frame finished.
#[derive(Debug, Clone)]
pub struct BatchExpectation {
    pub start: usize,
    pub length: usize,
    /// Owner the batch must carry; `None` skips the check.
    pub owner: Option<ShaderOwner>,
    /// Human-readable label for failure messages.
    pub label: &'static str,
}

impl BatchExpectation {
    pub fn new(start: usize, length: usize, label: &'static str) -> Self {
        Self {
            start,
            length,
            owner: None,
            label,
        }
    }

    pub fn owned_by(mut self, owner: ShaderOwner) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Expected insertion point of a filter operation.
#[derive(Debug, Clone)]
pub struct FilterExpectation {
    pub before_quad_operation: usize,
    pub label: &'static str,
}

impl FilterExpectation {
    pub fn new(before_quad_operation: usize, label: &'static str) -> Self {
        Self {
            before_quad_operation,
            label,
        }
    }
}

/// Validates closed quad operations against expectations, in order.
///
/// Returns a list of human-readable failure descriptions. An empty list means all
/// expectations passed.
pub fn check_batches(
    operations: &[QuadOperation],
    expectations: &[BatchExpectation],
) -> Vec<String> {
    let mut failures = Vec::new();

    if operations.len() != expectations.len() {
        failures.push(format!(
            "expected {} quad operation(s) but got {}: {:?}",
            expectations.len(),
            operations.len(),
            operations
                .iter()
                .map(QuadOperation::range)
                .collect::<Vec<_>>(),
        ));
    }

    for (operation, expectation) in operations.iter().zip(expectations) {
        if operation.index() != expectation.start || operation.length() != expectation.length {
            failures.push(format!(
                "[{}] expected quads {}..{} but got {:?}",
                expectation.label,
                expectation.start,
                expectation.start + expectation.length,
                operation.range(),
            ));
        }

        if let Some(owner) = expectation.owner {
            if operation.shader_owner() != Some(owner) {
                failures.push(format!(
                    "[{}] expected owner {} but got {:?}",
                    expectation.label,
                    owner,
                    operation.shader_owner(),
                ));
            }
        }
    }

    failures
}

/// Validates filter operations against expectations, in order.
pub fn check_filters(
    operations: &[FilterOperation],
    expectations: &[FilterExpectation],
) -> Vec<String> {
    let mut failures = Vec::new();

    if operations.len() != expectations.len() {
        failures.push(format!(
            "expected {} filter operation(s) but got {}",
            expectations.len(),
            operations.len(),
        ));
    }

    for (operation, expectation) in operations.iter().zip(expectations) {
        if operation.insertion_index() != expectation.before_quad_operation {
            failures.push(format!(
                "[{}] expected filter before quad operation {} but got {}",
                expectation.label,
                expectation.before_quad_operation,
                operation.insertion_index(),
            ));
        }
    }

    failures
}
