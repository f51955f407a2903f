use std::fmt;
use std::rc::Rc;

use super::memo::Memo;
use super::{Node, ValueNode};
use crate::error::TensorError;
use crate::functional::BinaryFunction;

/// Evaluation node with two inputs.
///
/// The operand kinds are the value types of `L` and `R`, so the output
/// kind and the compute path are fixed by the descriptor's trait impl.
pub struct BinaryNode<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    func: F,
    left: L,
    right: R,
    output: Memo<F::Output>,
}

impl<L, R, F> BinaryNode<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    pub fn new(left: L, right: R, func: F) -> Self {
        Self {
            func,
            left,
            right,
            output: Memo::new(),
        }
    }

    pub fn func(&self) -> &F {
        &self.func
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    /// The cached output, if this node has been evaluated.
    pub fn output(&self) -> Option<Rc<F::Output>> {
        self.output.get()
    }
}

impl<L, R, F> Node for Rc<BinaryNode<L, R, F>>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    type Value = F::Output;

    fn evaluate(&self) -> Result<Rc<F::Output>, TensorError> {
        self.output.get_or_try_init(self.func.name(), || {
            // inputs are fully materialized before this node computes
            let left = self.left.evaluate()?;
            let right = self.right.evaluate()?;
            let layout = self.func.output_layout(&left, &right)?;
            let mut output = F::Output::allocate(&layout)?;
            self.func.call(&left, &right, &mut output)?;
            Ok(output)
        })
    }

    fn is_evaluated(&self) -> bool {
        self.output.is_evaluated()
    }
}

impl<L, R, F> fmt::Debug for BinaryNode<L, R, F>
where
    L: Node + fmt::Debug,
    R: Node + fmt::Debug,
    F: BinaryFunction<L::Value, R::Value>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryNode")
            .field("func", &self.func)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("output", &self.output)
            .finish()
    }
}
