use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ClassDef, ClassMember, FieldDef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            statement::{parse_callable, parse_function_definition},
            utils::{expect, parse_identifier, parse_type},
        },
        value::types::DeclaredType,
    },
};

/// Parses a class definition after the `class` keyword.
///
/// Grammar:
/// ```text
///     class  := "class" IDENT "{" member* "}"
///     member := type IDENT ("=" expression)? ";"
///             | "func" type IDENT "(" params? ")" block
///             | IDENT "(" params? ")" block        (constructor)
/// ```
/// A constructor is a member named after the class and directly followed by a
/// parameter list. At most one constructor is allowed.
///
/// # Errors
/// - `UnexpectedToken` for a second constructor or a malformed member.
/// - `UnexpectedEndOfInput` if the closing brace is missing.
pub fn parse_class_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<ClassDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, line)?;
    expect(tokens, &Token::LBrace, line)?;

    let mut members = Vec::new();
    let mut constructor = None;

    loop {
        match tokens.peek().copied() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Func, member_line)) => {
                tokens.next();
                let method = parse_function_definition(tokens, *member_line)?;
                members.push(ClassMember::Method(Rc::new(method)));
            },
            Some((Token::Identifier(id), member_line)) if *id == name && next_is_paren(tokens) => {
                tokens.next();

                if constructor.is_some() {
                    return Err(ParseError::UnexpectedToken { token: format!("second constructor for class '{name}'"),
                                                             line:  *member_line, });
                }

                let def = parse_callable(tokens, name.clone(), DeclaredType::Void, *member_line)?;
                constructor = Some(Rc::new(def));
            },
            Some((_, member_line)) => {
                members.push(ClassMember::Field(parse_field(tokens, *member_line)?));
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(ClassDef { name,
                  members,
                  constructor,
                  line })
}

/// Returns `true` if the token after the next one is `(`.
fn next_is_paren<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    matches!(lookahead.peek(), Some((Token::LParen, _)))
}

/// Parses a data member: `type name;` or `type name = initializer;`.
fn parse_field<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<FieldDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let ty = parse_type(tokens, line)?;
    let name = parse_identifier(tokens, line)?;

    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect(tokens, &Token::Semicolon, line)?;

    Ok(FieldDef { name,
                  ty,
                  initializer,
                  line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::Statement,
        interpreter::{lexer::tokenize, parser::core::parse_program},
    };

    fn parse_class(source: &str) -> ParseResult<Rc<ClassDef>> {
        let tokens = tokenize(source)?;
        match parse_program(&tokens)?.statements.remove(0) {
            Statement::Class(def) => Ok(def),
            other => panic!("expected a class, found {other:?}"),
        }
    }

    #[test]
    fn keeps_member_order_and_constructor() {
        let def = parse_class("class Counter {
                                   int count = 0;
                                   func void bump() { count = count + 1; }
                                   Counter(int start) { count = start; }
                                   string label;
                               }").unwrap();

        assert_eq!(def.name, "Counter");
        assert_eq!(def.members.len(), 3);
        assert!(matches!(&def.members[0], ClassMember::Field(f) if f.name == "count"));
        assert!(matches!(&def.members[1], ClassMember::Method(m) if m.name == "bump"));
        assert!(matches!(&def.members[2], ClassMember::Field(f) if f.name == "label"));

        let constructor = def.constructor.as_ref().unwrap();
        assert_eq!(constructor.params.len(), 1);
        assert_eq!(constructor.return_type, DeclaredType::Void);
    }

    #[test]
    fn member_of_own_class_type_is_a_field() {
        let def = parse_class("class Node { Node next; }").unwrap();

        assert!(def.constructor.is_none());
        assert!(matches!(&def.members[0],
                         ClassMember::Field(f) if f.ty == DeclaredType::Class("Node".to_string())));
    }

    #[test]
    fn rejects_second_constructor() {
        let err = parse_class("class A { A() {} A(int x) {} }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
