use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{AssignTarget, Expr, FunctionDef, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_block_body},
            class::parse_class_definition,
            control::{parse_do_while, parse_for, parse_if, parse_while},
            core::{ParseResult, parse_expression},
            utils::{
                current_line, expect, parse_comma_separated, parse_identifier, parse_type,
                starts_declaration,
            },
        },
        value::types::DeclaredType,
    },
};

/// Parses a single statement.
///
/// The leading token selects the construct:
/// - `func`, `class`: definitions,
/// - `return`, `if`, `while`, `do`, `for`: control flow,
/// - `{`: a block,
/// - `;`: an empty statement,
/// - anything else: a simple statement terminated by `;`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Func => {
            tokens.next();
            let def = parse_function_definition(tokens, line)?;
            Ok(Statement::Function(Rc::new(def)))
        },
        Token::Class => {
            tokens.next();
            let def = parse_class_definition(tokens, line)?;
            Ok(Statement::Class(Rc::new(def)))
        },
        Token::Return => {
            tokens.next();
            let value = if let Some((Token::Semicolon, _)) = tokens.peek() {
                None
            } else {
                Some(parse_expression(tokens)?)
            };
            expect(tokens, &Token::Semicolon, line)?;

            Ok(Statement::Return { value, line })
        },
        Token::If => {
            tokens.next();
            parse_if(tokens, line)
        },
        Token::While => {
            tokens.next();
            parse_while(tokens, line)
        },
        Token::Do => {
            tokens.next();
            parse_do_while(tokens, line)
        },
        Token::For => {
            tokens.next();
            parse_for(tokens, line)
        },
        Token::LBrace => {
            tokens.next();
            parse_block(tokens, line)
        },
        Token::Semicolon => {
            tokens.next();
            Ok(Statement::Block { statements: Vec::new(),
                                  line })
        },
        Token::Import(path) => {
            Err(ParseError::UnexpectedToken { token: format!("unresolved #import \"{path}\""),
                                              line })
        },
        _ => {
            let statement = parse_simple_statement(tokens)?;
            expect(tokens, &Token::Semicolon, line)?;
            Ok(statement)
        },
    }
}

/// Parses a statement that is not terminated by its own syntax.
///
/// Used for expression statements and for the initializer and update clauses
/// of `for` loops. A simple statement is one of:
/// - a declaration: `type name` or `type name = expression`,
/// - an assignment to a variable, an indexed variable or a member,
/// - an expression.
///
/// # Errors
/// Returns `InvalidAssignmentTarget` when the left side of `=` cannot be
/// assigned to.
pub(in crate::interpreter::parser) fn parse_simple_statement<'a, I>(tokens: &mut Peekable<I>)
                                                                    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = current_line(tokens, 0);

    if starts_declaration(tokens) {
        let ty = parse_type(tokens, line)?;
        let name = parse_identifier(tokens, line)?;

        let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
            tokens.next();
            Some(parse_expression(tokens)?)
        } else {
            None
        };

        return Ok(Statement::Declaration { name,
                                           ty,
                                           initializer,
                                           line });
    }

    let expr = parse_expression(tokens)?;

    if let Some((Token::Equals, eq_line)) = tokens.peek() {
        let eq_line = *eq_line;
        tokens.next();

        let target = assign_target(expr, eq_line)?;
        let value = parse_expression(tokens)?;

        return Ok(Statement::Assignment { target,
                                          value,
                                          line });
    }

    Ok(Statement::Expression { expr, line })
}

/// Converts the expression on the left of `=` into an assignment target.
fn assign_target(expr: Expr, line: usize) -> ParseResult<AssignTarget> {
    match expr {
        Expr::Variable { name, .. } => Ok(AssignTarget::Variable(name)),
        Expr::Index { target, index, .. } => match *target {
            Expr::Variable { name, .. } => Ok(AssignTarget::Index { name,
                                                                    index: *index }),
            _ => Err(ParseError::InvalidAssignmentTarget { line }),
        },
        Expr::MemberAccess { object, member, .. } => Ok(AssignTarget::Member { object: *object,
                                                                               member }),
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}

/// Parses a function definition after the `func` keyword.
///
/// Grammar: `"func" type IDENT "(" params? ")" block`
pub(in crate::interpreter::parser) fn parse_function_definition<'a, I>(
    tokens: &mut Peekable<I>,
    line: usize)
    -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let return_type = parse_type(tokens, line)?;
    let name = parse_identifier(tokens, line)?;

    parse_callable(tokens, name, return_type, line)
}

/// Parses the parameter list and body shared by functions, methods and
/// constructors.
///
/// Grammar: `"(" (type IDENT ("," type IDENT)*)? ")" block`
pub(in crate::interpreter::parser) fn parse_callable<'a, I>(tokens: &mut Peekable<I>,
                                                            name: String,
                                                            return_type: DeclaredType,
                                                            line: usize)
                                                            -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, line)?;
    let params = parse_comma_separated(tokens,
                                       |t| {
                                           let ty = parse_type(t, line)?;
                                           let name = parse_identifier(t, line)?;
                                           Ok(Parameter { name, ty })
                                       },
                                       &Token::RParen,
                                       line)?;

    let body_line = expect(tokens, &Token::LBrace, line)?;
    let body = parse_block_body(tokens, body_line)?;

    Ok(FunctionDef { name,
                     return_type,
                     params,
                     body,
                     line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse_program};

    fn parse_one(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source)?;
        let mut program = parse_program(&tokens)?;
        Ok(program.statements.remove(0))
    }

    #[test]
    fn parses_class_typed_declaration() {
        let statement = parse_one("Point p = new Point(1, 2);").unwrap();

        let Statement::Declaration { name, ty, initializer, .. } = statement else {
            panic!("expected a declaration");
        };
        assert_eq!(name, "p");
        assert_eq!(ty, DeclaredType::Class("Point".to_string()));
        assert!(matches!(initializer, Some(Expr::New { .. })));
    }

    #[test]
    fn parses_assignment_targets() {
        let statement = parse_one("xs[2] = 5;").unwrap();
        assert!(matches!(statement,
                         Statement::Assignment { target: AssignTarget::Index { .. }, .. }));

        let statement = parse_one("p.x = 5;").unwrap();
        assert!(matches!(statement,
                         Statement::Assignment { target: AssignTarget::Member { .. }, .. }));
    }

    #[test]
    fn rejects_literal_assignment() {
        let err = parse_one("1 = 2;").unwrap_err();
        assert_eq!(err, ParseError::InvalidAssignmentTarget { line: 1 });
    }

    #[test]
    fn parses_function_definition() {
        let statement = parse_one("func int add(int a, int b) { return a + b; }").unwrap();

        let Statement::Function(def) = statement else {
            panic!("expected a function");
        };
        assert_eq!(def.name, "add");
        assert_eq!(def.return_type, DeclaredType::Int);
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.body.len(), 1);
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let err = parse_one("int x = 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }
}
