use std::rc::Rc;

use crate::interpreter::value::types::DeclaredType;

/// A constant written directly in the source.
///
/// Arrays and maps are built at runtime from literal expressions and have no
/// variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A number literal. tessel has a single numeric representation.
    Number(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A double quoted string literal with its escapes already decoded.
    Str(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant owns its children exclusively. Each variant records the
/// source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Source line.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Source line.
        line: usize,
    },
    /// A unary operation such as `-x` or `!flag`.
    UnaryOp {
        /// The unary operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Source line.
        line: usize,
    },
    /// A binary operation such as `a + b` or `x < y`.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The binary operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Source line.
        line:  usize,
    },
    /// `++x`, `x++`, `--x` or `x--`.
    Increment {
        /// The variable being stepped.
        name:   String,
        /// Whether the variable is incremented or decremented.
        op:     IncrementOp,
        /// `true` for the prefix form, which yields the new value.
        prefix: bool,
        /// Source line.
        line:   usize,
    },
    /// A call of a native or user function by name.
    FunctionCall {
        /// The function name.
        name:      String,
        /// The arguments, in call order.
        arguments: Vec<CallArgument>,
        /// Source line.
        line:      usize,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// The element expressions.
        elements: Vec<Self>,
        /// Source line.
        line:     usize,
    },
    /// `{ key: value, "other key": value }`
    MapLiteral {
        /// Key and value expression pairs, in source order.
        entries: Vec<(String, Self)>,
        /// Source line.
        line:    usize,
    },
    /// Indexing into an array, map, object or string: `target[index]`.
    Index {
        /// The indexed expression.
        target: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
        /// Source line.
        line:   usize,
    },
    /// Reading a member of an object or map: `object.member`.
    MemberAccess {
        /// The expression producing the object or map.
        object: Box<Self>,
        /// The member name.
        member: String,
        /// Source line.
        line:   usize,
    },
    /// Calling a method: `object.method(args)`.
    MemberCall {
        /// The expression producing the receiver.
        object:    Box<Self>,
        /// The method name.
        method:    String,
        /// The arguments, in call order.
        arguments: Vec<Self>,
        /// Source line.
        line:      usize,
    },
    /// `new ClassName(args)`
    New {
        /// The class to instantiate.
        class:     String,
        /// Constructor arguments, evaluated in the caller's environment.
        arguments: Vec<Self>,
        /// Source line.
        line:      usize,
    },
}

impl Expr {
    /// Returns the source line associated with this expression.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Increment { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::MapLiteral { line, .. }
            | Self::Index { line, .. }
            | Self::MemberAccess { line, .. }
            | Self::MemberCall { line, .. }
            | Self::New { line, .. } => *line,
        }
    }
}

/// One argument of a function call.
///
/// When the argument is syntactically a bare variable reference, its name is
/// recorded so that native callbacks such as `push` can write back to the
/// caller's variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgument {
    /// The argument expression.
    pub expr:        Expr,
    /// The variable name when `expr` is a bare variable, `None` otherwise.
    pub source_name: Option<String>,
}

impl From<Expr> for CallArgument {
    fn from(expr: Expr) -> Self {
        let source_name = match &expr {
            Expr::Variable { name, .. } => Some(name.clone()),
            _ => None,
        };
        Self { expr, source_name }
    }
}

/// A typed parameter of a function, method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The declared type the argument is checked against.
    pub ty:   DeclaredType,
}

/// Represents a user-defined function, method or constructor.
///
/// Definitions are shared between the AST and the function registry (or the
/// objects they are attached to) through `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Name it is registered under.
    pub name:        String,
    /// The declared return type. Constructors are `void`.
    pub return_type: DeclaredType,
    /// The parameters, in declaration order.
    pub params:      Vec<Parameter>,
    /// The statements of the body, executed in the call's own frame scope.
    pub body:        Vec<Statement>,
    /// Source line.
    pub line:        usize,
}

/// A data member declaration inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// The member name.
    pub name:        String,
    /// The declared type of the member slot.
    pub ty:          DeclaredType,
    /// Optional initializer, evaluated with the new object as receiver.
    pub initializer: Option<Expr>,
    /// Source line.
    pub line:        usize,
}

/// A member of a class body, kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// A typed data member.
    Field(FieldDef),
    /// A method.
    Method(Rc<FunctionDef>),
}

/// Represents a class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// The class name.
    pub name:        String,
    /// Data members and methods in declaration order.
    pub members:     Vec<ClassMember>,
    /// The constructor, if the class declares one.
    pub constructor: Option<Rc<FunctionDef>>,
    /// Source line.
    pub line:        usize,
}

/// The left side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `name = value`
    Variable(String),
    /// `name[index] = value`
    Index {
        /// The variable holding the container.
        name:  String,
        /// The index expression.
        index: Expr,
    },
    /// `object.member = value`
    Member {
        /// The expression producing the object or map.
        object: Expr,
        /// The member name.
        member: String,
    },
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Source line.
        line: usize,
    },
    /// A typed variable declaration with an optional initializer.
    Declaration {
        /// The name of the variable.
        name:        String,
        /// The declared type of the new slot.
        ty:          DeclaredType,
        /// The initial value, if any.
        initializer: Option<Expr>,
        /// Source line.
        line:        usize,
    },
    /// An assignment to a variable, an indexed variable or a member.
    Assignment {
        /// What is being assigned to.
        target: AssignTarget,
        /// Right-hand side.
        value:  Expr,
        /// Source line.
        line:   usize,
    },
    /// `{ ... }`, evaluated in its own scope.
    Block {
        /// The statements of the block.
        statements: Vec<Self>,
        /// Source line.
        line:       usize,
    },
    /// `if (condition) then_branch else else_branch`
    If {
        /// The condition; must evaluate to a Boolean.
        condition:   Expr,
        /// Executed when the condition holds.
        then_branch: Box<Self>,
        /// Executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Source line.
        line:        usize,
    },
    /// `while (condition) body`
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Source line.
        line:      usize,
    },
    /// `do body while (condition);`
    DoWhile {
        /// The loop body, executed at least once.
        body:      Box<Self>,
        /// The loop condition.
        condition: Expr,
        /// Source line.
        line:      usize,
    },
    /// `for (initializer; condition; update) body`
    For {
        /// Runs once, in a scope that encloses the whole loop.
        initializer: Option<Box<Self>>,
        /// The loop condition.
        condition:   Expr,
        /// Runs after every iteration.
        update:      Option<Box<Self>>,
        /// The loop body.
        body:        Box<Self>,
        /// Source line.
        line:        usize,
    },
    /// `return expr;` or `return;`
    Return {
        /// The returned expression; `void` when absent.
        value: Option<Expr>,
        /// Source line.
        line:  usize,
    },
    /// A user-defined function definition.
    Function(Rc<FunctionDef>),
    /// A class definition.
    Class(Rc<ClassDef>),
}

/// A parsed source file with all imports spliced in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in execution order.
    pub statements: Vec<Statement>,
}

/// An infix operator. Precedence lives in the parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

/// Prefix operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

/// Direction of an increment expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IncrementOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}
