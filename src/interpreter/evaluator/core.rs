use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{ClassDef, Expr, FunctionDef, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::function::builtin::install_prelude,
        value::{core::Value, object::ObjectRef, types::Slot},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A host callback callable from scripts by name.
///
/// Receives the evaluated arguments, the variable name of every argument that
/// was written as a bare variable reference (`None` otherwise), and the
/// context, through which it may read or write the caller's variables.
pub type NativeFunction = Rc<dyn Fn(&[Value], &[Option<String>], &mut Context) -> EvalResult<Value>>;

/// How a statement finished.
///
/// `Return` travels up through blocks, conditionals and loops until a
/// function, method or constructor call absorbs it. At the top level it stops
/// the program.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement completed and produced this value.
    Normal(Value),
    /// A `return` statement ran with this value.
    Return(Value),
}

impl Flow {
    /// Returns the carried value, whichever way the statement finished.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope stack (whose first
/// entry is the global table), the base of the current call frame, the
/// receiver of the running method or constructor, and the registries of
/// native functions, user functions and classes.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating any number of
/// programs; definitions and globals persist between them.
///
/// ```
/// use tessel::{interpreter::{evaluator::core::Context, value::core::Value}, parse_source};
///
/// let mut context = Context::new();
/// let program = parse_source("func int twice(int x) { return 2 * x; }").unwrap();
/// context.eval_program(&program).unwrap();
///
/// let result = context.evaluate_function("twice", vec![Value::Number(21.0)]).unwrap();
/// assert_eq!(result, Value::Number(42.0));
/// ```
pub struct Context {
    pub(crate) scope_stack: Vec<HashMap<String, Slot>>,
    pub(crate) frame_base:  usize,
    pub(crate) receiver:    Option<ObjectRef>,
    pub(crate) natives:     HashMap<String, NativeFunction>,
    pub(crate) functions:   HashMap<String, Rc<FunctionDef>>,
    pub(crate) classes:     HashMap<String, Rc<ClassDef>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with the native prelude (`print`, `len`, `push`,
    /// `pop`, `keys`, `contains`, `to_string`, `assert`) installed.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Self::bare();
        install_prelude(&mut context);
        context
    }

    /// Creates a context with an empty global table and no functions at all.
    #[must_use]
    pub fn bare() -> Self {
        Self { scope_stack: vec![HashMap::new()],
               frame_base:  0,
               receiver:    None,
               natives:     HashMap::new(),
               functions:   HashMap::new(),
               classes:     HashMap::new(), }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// always evaluated left to right.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.get_variable(name, *line),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Increment { name,
                              op,
                              prefix,
                              line, } => self.eval_increment(name, *op, *prefix, *line),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, *line),
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements),
            Expr::MapLiteral { entries, .. } => self.eval_map_literal(entries),
            Expr::Index { target, index, line } => self.eval_index(target, index, *line),
            Expr::MemberAccess { object, member, line } => {
                self.eval_member_access(object, member, *line)
            },
            Expr::MemberCall { object,
                               method,
                               arguments,
                               line, } => self.eval_member_call(object, method, arguments, *line),
            Expr::New { class,
                        arguments,
                        line, } => self.instantiate_object(class, arguments, *line),
        }
    }

    /// Executes a single statement.
    ///
    /// # Returns
    /// `Flow::Normal` with the statement's value, or `Flow::Return` when a
    /// `return` ran inside it.
    pub fn exec(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => Ok(Flow::Normal(self.eval(expr)?)),
            Statement::Declaration { name,
                                     ty,
                                     initializer,
                                     line, } => {
                self.exec_declaration(name, ty, initializer.as_ref(), *line)
                    .map(Flow::Normal)
            },
            Statement::Assignment { target, value, line } => {
                self.exec_assignment(target, value, *line).map(Flow::Normal)
            },
            Statement::Block { statements, .. } => self.exec_block(statements),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                self.exec_if(condition, then_branch, else_branch.as_deref(), *line)
            },
            Statement::While { condition, body, line } => self.exec_while(condition, body, *line),
            Statement::DoWhile { body, condition, line } => {
                self.exec_do_while(body, condition, *line)
            },
            Statement::For { initializer,
                             condition,
                             update,
                             body,
                             line, } => self.exec_for(initializer.as_deref(),
                                                      condition,
                                                      update.as_deref(),
                                                      body,
                                                      *line),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value))
            },
            Statement::Function(def) => {
                self.register_user_function(Rc::clone(def))?;
                Ok(Flow::Normal(Value::Void))
            },
            Statement::Class(def) => {
                self.register_class(Rc::clone(def))?;
                Ok(Flow::Normal(Value::Void))
            },
        }
    }

    /// Executes statements in order in the current scope.
    ///
    /// Stops at the first `Flow::Return`. Otherwise the value of the last
    /// statement is returned (`Void` for an empty sequence).
    pub fn exec_sequence(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        let mut last = Value::Void;

        for statement in statements {
            match self.exec(statement)? {
                Flow::Normal(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Runs a whole program in the global scope.
    ///
    /// A top-level `return` stops the program.
    ///
    /// # Returns
    /// The value of the last statement that produced one (the returned value
    /// for a top-level `return`), used by pipe mode to print the result.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        let mut last = None;

        for statement in &program.statements {
            match self.exec(statement)? {
                Flow::Normal(value) => {
                    if !value.is_void() {
                        last = Some(value);
                    }
                },
                Flow::Return(value) => {
                    trace!("top-level return");
                    if !value.is_void() {
                        last = Some(value);
                    }
                    break;
                },
            }
        }

        Ok(last)
    }
}
