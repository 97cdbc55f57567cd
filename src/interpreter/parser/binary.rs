use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Loosest binding power; `parse_binary` starts here.
const LOWEST: u8 = 1;

/// Parses an infix expression by precedence climbing.
///
/// Every operator is left-associative. From loosest to tightest:
/// `||`, `&&`, `==`/`!=`, `<`/`<=`/`>`/`>=`, `+`/`-`, `*`/`/`. Prefix
/// operators and postfix chains bind tighter than all of them and are handled
/// by [`parse_unary`].
///
/// # Example
/// ```
/// use tessel::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::binary::parse_binary},
/// };
///
/// let tokens = tokenize("1 + 2 * 3 < 10").unwrap();
/// let expr = parse_binary(&mut tokens.iter().peekable()).unwrap();
///
/// assert!(matches!(expr, Expr::BinaryOp { op: BinaryOperator::Less, .. }));
/// ```
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_above(tokens, LOWEST)
}

/// Parses operands joined by operators whose binding power is at least
/// `min_power`.
fn parse_above<'a, I>(tokens: &mut Peekable<I>, min_power: u8) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;

    while let Some((token, line)) = tokens.peek() {
        let Some(op) = binary_operator(token) else { break };
        let power = binding_power(op);
        if power < min_power {
            break;
        }

        let line = *line;
        tokens.next();

        // left-assoc: the right side only takes strictly tighter operators
        let right = parse_above(tokens, power + 1)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }

    Ok(left)
}

/// Returns how tightly `op` binds; larger numbers bind tighter.
#[must_use]
pub const fn binding_power(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Equal | BinaryOperator::NotEqual => 3,
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => 4,
        BinaryOperator::Add | BinaryOperator::Sub => 5,
        BinaryOperator::Mul | BinaryOperator::Div => 6,
    }
}

/// The infix operator spelled by `token`, if any.
///
/// ```
/// use tessel::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::binary_operator},
/// };
///
/// assert_eq!(binary_operator(&Token::OrOr), Some(BinaryOperator::Or));
/// assert_eq!(binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    use BinaryOperator as B;

    let op = match token {
        Token::Plus => B::Add,
        Token::Minus => B::Sub,
        Token::Star => B::Mul,
        Token::Slash => B::Div,
        Token::Less => B::Less,
        Token::LessEqual => B::LessEqual,
        Token::Greater => B::Greater,
        Token::GreaterEqual => B::GreaterEqual,
        Token::EqualEqual => B::Equal,
        Token::BangEqual => B::NotEqual,
        Token::AndAnd => B::And,
        Token::OrOr => B::Or,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        parse_binary(&mut tokens.iter().peekable()).unwrap()
    }

    fn ops(expr: &Expr) -> String {
        match expr {
            Expr::BinaryOp { left, op, right, .. } => {
                format!("({} {op:?} {})", ops(left), ops(right))
            }
            Expr::Literal { .. } | Expr::Variable { .. } => "_".into(),
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn subtraction_groups_to_the_left() {
        assert_eq!(ops(&parse("a - b - c")), "((_ Sub _) Sub _)");
    }

    #[test]
    fn products_bind_tighter_than_sums() {
        assert_eq!(ops(&parse("a + b * c")), "(_ Add (_ Mul _))");
    }

    #[test]
    fn logic_is_loosest() {
        assert_eq!(ops(&parse("a < b && c == d || e")),
                   "(((_ Less _) And (_ Equal _)) Or _)");
    }

    #[test]
    fn operator_line_is_recorded() {
        let expr = parse("a\n+\nb");
        assert!(matches!(expr, Expr::BinaryOp { line: 2, .. }));
    }
}
