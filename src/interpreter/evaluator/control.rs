use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Executes a block in its own scope.
    ///
    /// # Returns
    /// The value of the last statement, or the `Flow::Return` that stopped
    /// the block.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        self.in_scope(|ctx| ctx.exec_sequence(statements))
    }

    /// Executes an `if` statement. The condition must be a boolean.
    pub fn exec_if(&mut self,
                   condition: &Expr,
                   then_branch: &Statement,
                   else_branch: Option<&Statement>,
                   line: usize)
                   -> EvalResult<Flow> {
        if self.eval(condition)?.as_bool("if condition", line)? {
            self.exec(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.exec(else_branch)
        } else {
            Ok(Flow::Normal(Value::Void))
        }
    }

    /// Executes a `while` loop.
    ///
    /// A `return` inside the body stops the loop and propagates.
    pub fn exec_while(&mut self, condition: &Expr, body: &Statement, line: usize) -> EvalResult<Flow> {
        while self.eval(condition)?.as_bool("while condition", line)? {
            if let flow @ Flow::Return(_) = self.exec(body)? {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal(Value::Void))
    }

    /// Executes a `do ... while` loop. The body runs at least once.
    pub fn exec_do_while(&mut self, body: &Statement, condition: &Expr, line: usize) -> EvalResult<Flow> {
        loop {
            if let flow @ Flow::Return(_) = self.exec(body)? {
                return Ok(flow);
            }

            if !self.eval(condition)?.as_bool("do-while condition", line)? {
                return Ok(Flow::Normal(Value::Void));
            }
        }
    }

    /// Executes a C-style `for` loop.
    ///
    /// The initializer runs once in a scope that encloses the whole loop, so
    /// a variable it declares is gone once the loop ends. The update runs
    /// after every iteration of the body.
    ///
    /// # Example
    /// ```
    /// use tessel::{interpreter::{evaluator::core::Context, value::core::Value}, parse_source};
    ///
    /// let program = parse_source("int total = 0;
    ///                             for (int i = 0; i < 4; i++) { total = total + i; }
    ///                             total;").unwrap();
    ///
    /// let mut context = Context::new();
    /// assert_eq!(context.eval_program(&program).unwrap(), Some(Value::Number(6.0)));
    /// assert_eq!(context.scope_depth(), 1);
    /// ```
    pub fn exec_for(&mut self,
                    initializer: Option<&Statement>,
                    condition: &Expr,
                    update: Option<&Statement>,
                    body: &Statement,
                    line: usize)
                    -> EvalResult<Flow> {
        self.in_scope(|ctx| {
                if let Some(initializer) = initializer {
                    ctx.exec(initializer)?;
                }

                while ctx.eval(condition)?.as_bool("for condition", line)? {
                    if let flow @ Flow::Return(_) = ctx.exec(body)? {
                        return Ok(flow);
                    }

                    if let Some(update) = update {
                        ctx.exec(update)?;
                    }
                }

                Ok(Flow::Normal(Value::Void))
            })
    }
}
