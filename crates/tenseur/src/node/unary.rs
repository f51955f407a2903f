use std::fmt;
use std::rc::Rc;

use super::memo::Memo;
use super::{Node, ValueNode};
use crate::error::TensorError;
use crate::functional::UnaryFunction;

/// Evaluation node with one input.
///
/// The descriptor is stored by value. Non-parametric descriptors are
/// zero-sized, so only parametric ones (such as `Pow`) take up space.
pub struct UnaryNode<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    func: F,
    input: I,
    output: Memo<F::Output>,
}

impl<I, F> UnaryNode<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    pub fn new(input: I, func: F) -> Self {
        Self {
            func,
            input,
            output: Memo::new(),
        }
    }

    pub fn func(&self) -> &F {
        &self.func
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// The cached output, if this node has been evaluated.
    pub fn output(&self) -> Option<Rc<F::Output>> {
        self.output.get()
    }
}

impl<I, F> Node for Rc<UnaryNode<I, F>>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    type Value = F::Output;

    fn evaluate(&self) -> Result<Rc<F::Output>, TensorError> {
        self.output.get_or_try_init(self.func.name(), || {
            let input = self.input.evaluate()?;
            let layout = self.func.output_layout(&input)?;
            let mut output = F::Output::allocate(&layout)?;
            self.func.call(&input, &mut output)?;
            Ok(output)
        })
    }

    fn is_evaluated(&self) -> bool {
        self.output.is_evaluated()
    }
}

impl<I, F> fmt::Debug for UnaryNode<I, F>
where
    I: Node + fmt::Debug,
    F: UnaryFunction<I::Value>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryNode")
            .field("func", &self.func)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}
