//! Single-assignment output slot of an evaluation node.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use super::value::ValueNode;
use crate::error::TensorError;

enum EvalState<V> {
    Unevaluated,
    Evaluating,
    Evaluated(Rc<V>),
}

/// Memoized output: `Unevaluated -> Evaluating -> Evaluated`.
///
/// A failed evaluation returns the slot to `Unevaluated` so nothing
/// partial is ever observable. Once `Evaluated`, the value is never
/// replaced.
pub(crate) struct Memo<V> {
    state: RefCell<EvalState<V>>,
}

impl<V: ValueNode> Memo<V> {
    pub(crate) fn new() -> Self {
        Self {
            state: RefCell::new(EvalState::Unevaluated),
        }
    }

    /// Return the cached value, or run `compute` exactly once to fill it.
    pub(crate) fn get_or_try_init<F>(&self, op: &'static str, compute: F) -> Result<Rc<V>, TensorError>
    where
        F: FnOnce() -> Result<V, TensorError>,
    {
        {
            let mut state = self.state.borrow_mut();
            if let EvalState::Evaluated(value) = &*state {
                trace!(op, "cache hit");
                return Ok(Rc::clone(value));
            }
            if matches!(*state, EvalState::Evaluating) {
                return Err(TensorError::EvaluationInProgress { op });
            }
            *state = EvalState::Evaluating;
        }

        match compute() {
            Ok(value) => {
                let value = Rc::new(value);
                debug!(op, size = value.size(), "node evaluated");
                *self.state.borrow_mut() = EvalState::Evaluated(Rc::clone(&value));
                Ok(value)
            }
            Err(err) => {
                debug!(op, error = %err, "node evaluation failed");
                *self.state.borrow_mut() = EvalState::Unevaluated;
                Err(err)
            }
        }
    }

    pub(crate) fn get(&self) -> Option<Rc<V>> {
        match &*self.state.borrow() {
            EvalState::Evaluated(value) => Some(Rc::clone(value)),
            _ => None,
        }
    }

    pub(crate) fn is_evaluated(&self) -> bool {
        matches!(*self.state.borrow(), EvalState::Evaluated(_))
    }
}

impl<V> fmt::Debug for Memo<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.try_borrow().as_deref() {
            Ok(EvalState::Unevaluated) => "unevaluated",
            Ok(EvalState::Evaluating) | Err(_) => "evaluating",
            Ok(EvalState::Evaluated(_)) => "evaluated",
        };
        f.debug_struct("Memo").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::value::ScalarNode;

    #[test]
    fn test_computes_once() {
        let memo = Memo::<ScalarNode<f64>>::new();
        let mut calls = 0;
        let a = memo
            .get_or_try_init("test", || {
                calls += 1;
                Ok(ScalarNode::new(2.0))
            })
            .unwrap();
        let b = memo.get_or_try_init("test", || unreachable!()).unwrap();
        assert_eq!(calls, 1);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(memo.is_evaluated());
    }

    #[test]
    fn test_failure_leaves_unevaluated() {
        let memo = Memo::<ScalarNode<i32>>::new();
        let err = memo
            .get_or_try_init("test", || Err(TensorError::DivisionByZero))
            .unwrap_err();
        assert_eq!(err, TensorError::DivisionByZero);
        assert!(!memo.is_evaluated());
        assert!(memo.get().is_none());

        let v = memo.get_or_try_init("test", || Ok(ScalarNode::new(3))).unwrap();
        assert_eq!(v.value(), 3);
    }

    #[test]
    fn test_reentrant_evaluation_is_reported() {
        let memo = Memo::<ScalarNode<f64>>::new();
        let err = memo
            .get_or_try_init("outer", || {
                memo.get_or_try_init("outer", || Ok(ScalarNode::new(1.0)))
                    .map(|v| *v)
            })
            .unwrap_err();
        assert_eq!(err, TensorError::EvaluationInProgress { op: "outer" });
    }
}
