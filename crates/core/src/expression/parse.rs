use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
};

use super::{
    ExpressionError,
    node::{BinaryOp, Function, Node},
};

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Syntax tree before identifiers are resolved against the free variable.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ParseNode {
    Number(f64),
    Identifier(String),
    Neg(Box<ParseNode>),
    Binary(BinaryOp, Box<ParseNode>, Box<ParseNode>),
    Call(String, Box<ParseNode>),
}

impl ParseNode {
    fn binary(op: BinaryOp, lhs: ParseNode, rhs: ParseNode) -> Self {
        ParseNode::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Resolves identifiers and function names.
    ///
    /// The free variable shadows the built-in constants, so an expression in
    /// `e` treats `e` as the variable rather than Euler's number.
    pub(super) fn lower(self, variable: &str) -> Result<Node, ExpressionError> {
        Ok(match self {
            ParseNode::Number(value) => Node::Number(value),
            ParseNode::Identifier(name) if name == variable => Node::Variable,
            ParseNode::Identifier(name) => match constant(&name) {
                Some(value) => Node::Number(value),
                None => return Err(ExpressionError::UnknownVariable(name)),
            },
            ParseNode::Neg(inner) => Node::Neg(Box::new(inner.lower(variable)?)),
            ParseNode::Binary(op, lhs, rhs) => Node::Binary(
                op,
                Box::new(lhs.lower(variable)?),
                Box::new(rhs.lower(variable)?),
            ),
            ParseNode::Call(name, arg) => {
                let Some(function) = Function::from_name(&name) else {
                    return Err(ExpressionError::UnknownFunction(name));
                };
                Node::Call(function, Box::new(arg.lower(variable)?))
            }
        })
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Parses a complete expression, rejecting trailing input.
pub(super) fn parse(input: &str) -> Result<ParseNode, ExpressionError> {
    let (remaining, node) = expr(input).map_err(|e| ExpressionError::Syntax(e.to_string()))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ExpressionError::UnconsumedInput(remaining.to_owned()));
    }

    Ok(node)
}

// Sum: term (('+' | '-') term)*
fn expr(input: &str) -> ParseResult<'_, ParseNode> {
    let (input, init) = term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((char('+'), char('-')))), term),
        move || init.clone(),
        |acc, (op, rhs)| {
            let op = if op == '+' { BinaryOp::Add } else { BinaryOp::Sub };
            ParseNode::binary(op, acc, rhs)
        },
    )(input)
}

// Product: explicit `*` and `/`, plus implicit multiplication when a factor
// follows with no whitespace (`2x`, `4cos(x)`, `3(x+1)`).
fn term(input: &str) -> ParseResult<'_, ParseNode> {
    let (mut input, mut acc) = unary(input)?;
    loop {
        if let Ok((rest, op)) = product_operator(input) {
            let (rest, rhs) = unary(rest)?;
            acc = ParseNode::binary(op, acc, rhs);
            input = rest;
        } else if starts_factor(input) {
            let (rest, rhs) = power(input)?;
            acc = ParseNode::binary(BinaryOp::Mul, acc, rhs);
            input = rest;
        } else {
            return Ok((input, acc));
        }
    }
}

fn product_operator(input: &str) -> ParseResult<'_, BinaryOp> {
    preceded(
        multispace0,
        alt((
            map(char('*'), |_| BinaryOp::Mul),
            map(char('/'), |_| BinaryOp::Div),
        )),
    )(input)
}

fn starts_factor(input: &str) -> bool {
    input
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '(' || c == 'π')
}

// Unary sign binds looser than `^`, so `-x^2` is `-(x^2)`.
fn unary(input: &str) -> ParseResult<'_, ParseNode> {
    alt((
        map(preceded(preceded(multispace0, char('-')), unary), |node| {
            ParseNode::Neg(Box::new(node))
        }),
        preceded(preceded(multispace0, char('+')), unary),
        power,
    ))(input)
}

// Power is right associative and accepts a signed exponent: `2^-x`, `2^3^2`.
fn power(input: &str) -> ParseResult<'_, ParseNode> {
    let (input, base) = atom(input)?;
    match caret(input) {
        Ok((rest, _)) => {
            let (rest, exponent) = unary(rest)?;
            Ok((rest, ParseNode::binary(BinaryOp::Pow, base, exponent)))
        }
        Err(_) => Ok((input, base)),
    }
}

fn caret(input: &str) -> ParseResult<'_, char> {
    preceded(multispace0, char('^'))(input)
}

fn atom(input: &str) -> ParseResult<'_, ParseNode> {
    preceded(multispace0, alt((number, call, variable, parens)))(input)
}

// Decimal literals with an optional exponent: `12`, `1.5`, `3.`, `.25`,
// `1e-3`, `2.5E2`. An `e` not followed by digits is left for the constant.
fn number(input: &str) -> ParseResult<'_, ParseNode> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));

    map_res(recognize(pair(mantissa, opt(exponent))), |text: &str| {
        text.parse::<f64>().map(ParseNode::Number)
    })(input)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    alt((
        tag("π"),
        recognize(pair(
            take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
    ))(input)
}

// The opening parenthesis must follow the name directly.
fn call(input: &str) -> ParseResult<'_, ParseNode> {
    let (input, name) = identifier(input)?;
    let (input, arg) = delimited(char('('), expr, preceded(multispace0, char(')')))(input)?;
    Ok((input, ParseNode::Call(name.to_owned(), Box::new(arg))))
}

fn variable(input: &str) -> ParseResult<'_, ParseNode> {
    map(identifier, |name: &str| ParseNode::Identifier(name.to_owned()))(input)
}

fn parens(input: &str) -> ParseResult<'_, ParseNode> {
    delimited(char('('), expr, preceded(multispace0, char(')')))(input)
}
