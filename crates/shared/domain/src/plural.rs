//! Plural selection rules.
//!
//! Languages carry a gettext-style plural expression (a C expression over
//! `n`) that maps a count to the index of the plural form to use.
//! Accepted forms: a bare expression `(n != 1)`, `plural=(n != 1);`, or a
//! full header `nplurals=2; plural=(n != 1);`.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, cut, map, map_res, opt, value},
    error::{context, convert_error, VerboseError},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair},
    Finish, IResult,
};

use crate::constants::PLURAL_CHECK_UPPER_BOUND;
use crate::error::{DomainError, DomainResult};

/// Longest accepted expression, in bytes
const MAX_EXPRESSION_LEN: usize = 512;

/// Deepest accepted nesting of parentheses, `!` and `?:`
const MAX_NESTING: usize = 32;

type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    N,
    Number(i64),
    Not(Box<Expr>),
    Arith(ArithOp, Box<Expr>, Box<Expr>),
    Compare(CompareOp, Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

/// Parsed plural expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralExpression {
    source: String,
    expr: Expr,
}

impl PluralExpression {
    /// Parse a plural expression.
    ///
    /// # Errors
    /// Returns a plural error if the text is not a well-formed expression.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let body = strip_header(text);
        if body.is_empty() {
            return Err(DomainError::plural("empty plural expression"));
        }

        check_size(body)?;

        let (_, expr) = all_consuming(conditional)(body)
            .finish()
            .map_err(|e| {
                DomainError::plural(format!(
                    "malformed plural expression '{}':\n{}",
                    body,
                    convert_error(body, e)
                ))
            })?;

        Ok(Self {
            source: body.to_string(),
            expr,
        })
    }

    /// Plural form index for count `n`.
    ///
    /// # Errors
    /// Returns a plural error on division by zero, overflow or a negative result.
    pub fn evaluate(&self, n: u64) -> DomainResult<u64> {
        let n = i64::try_from(n).map_err(|_| DomainError::plural("count out of range"))?;
        let value = eval(&self.expr, n)?;
        u64::try_from(value).map_err(|_| {
            DomainError::plural(format!("'{}' gives negative index {}", self.source, value))
        })
    }

    /// Expression text without header decoration.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for PluralExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for PluralExpression {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check that a language's plural data is consistent.
///
/// An empty equation means "unknown" and is always accepted. Otherwise the
/// equation must parse and, when `nplurals` is known, select an index below
/// `nplurals` for every count up to the check bound.
pub fn validate_plural_rule(nplurals: u32, equation: &str) -> DomainResult<()> {
    if equation.trim().is_empty() {
        return Ok(());
    }

    let expression = PluralExpression::parse(equation)?;
    if nplurals == 0 {
        return Ok(());
    }

    for n in 0..=PLURAL_CHECK_UPPER_BOUND {
        let index = expression.evaluate(n)?;
        if index >= u64::from(nplurals) {
            return Err(DomainError::plural(format!(
                "'{}' selects form {} for n={} but nplurals={}",
                expression, index, n, nplurals
            )));
        }
    }

    Ok(())
}

fn strip_header(text: &str) -> &str {
    let text = text.trim();
    let text = match text.rfind("plural=") {
        Some(pos) => &text[pos + "plural=".len()..],
        None => text,
    };
    text.trim().trim_end_matches(';').trim()
}

/// Reject input whose size would make parsing or evaluation recurse too deep.
fn check_size(body: &str) -> DomainResult<()> {
    if body.len() > MAX_EXPRESSION_LEN {
        return Err(DomainError::plural(format!(
            "plural expression is {} bytes long, the limit is {}",
            body.len(),
            MAX_EXPRESSION_LEN
        )));
    }

    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut branches = 0usize;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            '?' => branches += 1,
            '!' if chars.peek() != Some(&'=') => branches += 1,
            _ => {}
        }
    }

    if deepest + branches > MAX_NESTING {
        return Err(DomainError::plural(format!(
            "plural expression nests {} levels deep, the limit is {}",
            deepest + branches,
            MAX_NESTING
        )));
    }
    Ok(())
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// `cond ? then : otherwise`, right-associative
fn conditional(input: &str) -> PResult<'_, Expr> {
    let (input, condition) = logical_or(input)?;
    let (input, branches) = opt(preceded(
        ws(char('?')),
        cut(context(
            "conditional",
            separated_pair(conditional, ws(char(':')), conditional),
        )),
    ))(input)?;

    let expr = match branches {
        Some((then, otherwise)) => {
            Expr::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise))
        }
        None => condition,
    };
    Ok((input, expr))
}

fn logical_or(input: &str) -> PResult<'_, Expr> {
    map(
        pair(logical_and, many0(preceded(ws(tag("||")), cut(logical_and)))),
        |(first, rest)| {
            rest.into_iter()
                .fold(first, |lhs, rhs| Expr::Or(Box::new(lhs), Box::new(rhs)))
        },
    )(input)
}

fn logical_and(input: &str) -> PResult<'_, Expr> {
    map(
        pair(equality, many0(preceded(ws(tag("&&")), cut(equality)))),
        |(first, rest)| {
            rest.into_iter()
                .fold(first, |lhs, rhs| Expr::And(Box::new(lhs), Box::new(rhs)))
        },
    )(input)
}

fn equality(input: &str) -> PResult<'_, Expr> {
    let op = ws(alt((
        value(CompareOp::Eq, tag("==")),
        value(CompareOp::Ne, tag("!=")),
    )));
    map(pair(relational, many0(pair(op, cut(relational)))), |(first, rest)| {
        fold_compare(first, rest)
    })(input)
}

fn relational(input: &str) -> PResult<'_, Expr> {
    let op = ws(alt((
        value(CompareOp::Le, tag("<=")),
        value(CompareOp::Ge, tag(">=")),
        value(CompareOp::Lt, char('<')),
        value(CompareOp::Gt, char('>')),
    )));
    map(pair(additive, many0(pair(op, cut(additive)))), |(first, rest)| {
        fold_compare(first, rest)
    })(input)
}

fn additive(input: &str) -> PResult<'_, Expr> {
    let op = ws(alt((
        value(ArithOp::Add, char('+')),
        value(ArithOp::Sub, char('-')),
    )));
    map(pair(multiplicative, many0(pair(op, cut(multiplicative)))), |(first, rest)| {
        fold_arith(first, rest)
    })(input)
}

fn multiplicative(input: &str) -> PResult<'_, Expr> {
    let op = ws(alt((
        value(ArithOp::Mul, char('*')),
        value(ArithOp::Div, char('/')),
        value(ArithOp::Rem, char('%')),
    )));
    map(pair(unary, many0(pair(op, cut(unary)))), |(first, rest)| {
        fold_arith(first, rest)
    })(input)
}

fn unary(input: &str) -> PResult<'_, Expr> {
    alt((
        map(preceded(ws(char('!')), cut(unary)), |inner| {
            Expr::Not(Box::new(inner))
        }),
        primary,
    ))(input)
}

fn primary(input: &str) -> PResult<'_, Expr> {
    context(
        "operand",
        ws(alt((
            value(Expr::N, char('n')),
            map(map_res(digit1, |digits: &str| digits.parse::<i64>()), Expr::Number),
            delimited(char('('), cut(conditional), cut(char(')'))),
        ))),
    )(input)
}

fn fold_arith(first: Expr, rest: Vec<(ArithOp, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        Expr::Arith(op, Box::new(lhs), Box::new(rhs))
    })
}

fn fold_compare(first: Expr, rest: Vec<(CompareOp, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        Expr::Compare(op, Box::new(lhs), Box::new(rhs))
    })
}

fn truth(value: bool) -> i64 {
    i64::from(value)
}

fn eval(expr: &Expr, n: i64) -> DomainResult<i64> {
    let value = match expr {
        Expr::N => n,
        Expr::Number(value) => *value,
        Expr::Not(inner) => truth(eval(inner, n)? == 0),
        Expr::Conditional(condition, then, otherwise) => {
            if eval(condition, n)? != 0 {
                eval(then, n)?
            } else {
                eval(otherwise, n)?
            }
        }
        Expr::And(lhs, rhs) => truth(eval(lhs, n)? != 0 && eval(rhs, n)? != 0),
        Expr::Or(lhs, rhs) => truth(eval(lhs, n)? != 0 || eval(rhs, n)? != 0),
        Expr::Compare(op, lhs, rhs) => {
            let (a, b) = (eval(lhs, n)?, eval(rhs, n)?);
            truth(match op {
                CompareOp::Lt => a < b,
                CompareOp::Le => a <= b,
                CompareOp::Gt => a > b,
                CompareOp::Ge => a >= b,
                CompareOp::Eq => a == b,
                CompareOp::Ne => a != b,
            })
        }
        Expr::Arith(op, lhs, rhs) => arith(*op, eval(lhs, n)?, eval(rhs, n)?).ok_or_else(|| {
            DomainError::plural(format!("arithmetic error evaluating {:?} at n={}", op, n))
        })?,
    };
    Ok(value)
}

/// Checked arithmetic; `None` on overflow or division by zero.
fn arith(op: ArithOp, a: i64, b: i64) -> Option<i64> {
    match op {
        ArithOp::Mul => a.checked_mul(b),
        ArithOp::Div => a.checked_div(b),
        ArithOp::Rem => a.checked_rem(b),
        ArithOp::Add => a.checked_add(b),
        ArithOp::Sub => a.checked_sub(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_rule() {
        let expr = PluralExpression::parse("(n != 1)").unwrap();
        assert_eq!(expr.evaluate(0).unwrap(), 1);
        assert_eq!(expr.evaluate(1).unwrap(), 0);
        assert_eq!(expr.evaluate(2).unwrap(), 1);
    }

    #[test]
    fn test_header_form_is_accepted() {
        let expr = PluralExpression::parse("nplurals=2; plural=(n > 1);").unwrap();
        assert_eq!(expr.as_str(), "(n > 1)");
        assert_eq!(expr.evaluate(1).unwrap(), 0);
        assert_eq!(expr.evaluate(2).unwrap(), 1);
    }

    #[test]
    fn test_russian_rule() {
        let expr = PluralExpression::parse(
            "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)",
        )
        .unwrap();
        assert_eq!(expr.evaluate(1).unwrap(), 0);
        assert_eq!(expr.evaluate(21).unwrap(), 0);
        assert_eq!(expr.evaluate(11).unwrap(), 2);
        assert_eq!(expr.evaluate(3).unwrap(), 1);
        assert_eq!(expr.evaluate(14).unwrap(), 2);
        assert_eq!(expr.evaluate(5).unwrap(), 2);
    }

    #[test]
    fn test_nested_conditional_is_right_associative() {
        let expr = PluralExpression::parse("n==0 ? 0 : n==1 ? 1 : 2").unwrap();
        assert_eq!(expr.evaluate(0).unwrap(), 0);
        assert_eq!(expr.evaluate(1).unwrap(), 1);
        assert_eq!(expr.evaluate(7).unwrap(), 2);
    }

    #[test]
    fn test_constant_and_negation() {
        assert_eq!(PluralExpression::parse("0").unwrap().evaluate(5).unwrap(), 0);
        let expr = PluralExpression::parse("!(n == 1)").unwrap();
        assert_eq!(expr.evaluate(1).unwrap(), 0);
        assert_eq!(expr.evaluate(4).unwrap(), 1);
    }

    #[test]
    fn test_malformed_expressions_are_rejected() {
        for bad in ["", "(n != 1", "n !=", "n ? 1", "x > 1", "n != 1)", "plural=;"] {
            assert!(PluralExpression::parse(bad).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_precedence_and_whitespace() {
        let expr = PluralExpression::parse("n%10 + 1*2 >= 3||n==0").unwrap();
        assert_eq!(expr.evaluate(0).unwrap(), 1);
        assert_eq!(expr.evaluate(1).unwrap(), 1);
        assert_eq!(expr.evaluate(10).unwrap(), 0);
        let expr = PluralExpression::parse(" 10 - n - 1 ").unwrap();
        assert_eq!(expr.evaluate(2).unwrap(), 7);
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let text = format!("{}n != 1{}", "(".repeat(10), ")".repeat(10));
        let expr = PluralExpression::parse(&text).unwrap();
        assert_eq!(expr.evaluate(2).unwrap(), 1);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let text = format!("{}n{}", "(".repeat(200_000), ")".repeat(200_000));
        assert!(matches!(
            PluralExpression::parse(&text),
            Err(DomainError::Plural(_))
        ));

        let text = format!("{}n{}", "(".repeat(40), ")".repeat(40));
        assert!(matches!(
            PluralExpression::parse(&text),
            Err(DomainError::Plural(_))
        ));

        let text = format!("{}n", "!".repeat(40));
        assert!(PluralExpression::parse(&text).is_err());
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        let text = format!("n{}", " + n".repeat(200));
        assert!(PluralExpression::parse(&text).is_err());
    }

    #[test]
    fn test_deep_nesting_fails_inside_a_small_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let text = format!("{}n{}", "(".repeat(200_000), ")".repeat(200_000));
                PluralExpression::parse(&text).is_err()
            })
            .unwrap();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let expr = PluralExpression::parse("n / 0").unwrap();
        assert!(expr.evaluate(1).is_err());
    }

    #[test]
    fn test_validate_rule_checks_range() {
        assert!(validate_plural_rule(2, "(n != 1)").is_ok());
        assert!(validate_plural_rule(0, "").is_ok());
        assert!(validate_plural_rule(1, "(n != 1)").is_err());
        assert!(validate_plural_rule(2, "n").is_err());
        assert!(validate_plural_rule(2, "(n != ").is_err());
    }
}
