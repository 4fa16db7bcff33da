//! Recursive-descent parser for ABI type strings.
//!
//! Grammar:
//!
//! ```text
//! type   := base suffix*
//! suffix := '[' INT? ']'
//! base   := 'map' '<' type ',' type '>'
//!         | 'tuple' '<' (elem (',' elem)*)? '>'
//!         | 'FixedHash' '<' INT '>'
//!         | IDENT
//! elem   := type IDENT?
//! ```
//!
//! Every parse function takes the remaining input by value and returns the
//! parsed piece together with the input left after it. Nothing is shared
//! between calls, so nested generics need no depth bookkeeping.

use std::ops::Range;

use logos::Logos;

use super::{INT_WIDTHS, TupleElem, TypeError, TypeNode, UnsupportedKind};

type Result<T> = std::result::Result<T, TypeError>;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r"[0-9]+", |lex| lex.slice())]
    Number(&'src str),
}

/// Unconsumed input, remembering the full source for offsets.
#[derive(Clone, Copy)]
struct Input<'src> {
    source: &'src str,
    rest: &'src str,
}

impl<'src> Input<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    fn offset(self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn next(self) -> Result<Option<(Token<'src>, Self)>> {
        let mut lexer = Token::lexer(self.rest);
        match lexer.next() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some((
                token,
                Self {
                    source: self.source,
                    rest: lexer.remainder(),
                },
            ))),
            Some(Err(_)) => {
                let span = lexer.span();
                Err(TypeError::UnexpectedChar {
                    text: self.rest[span.clone()].to_string(),
                    offset: self.offset() + span.start,
                })
            }
        }
    }

    fn peek(self) -> Result<Option<Token<'src>>> {
        Ok(self.next()?.map(|(token, _)| token))
    }

    fn expect(self, expected: Token<'src>, what: &'static str) -> Result<Self> {
        match self.next()? {
            Some((token, rest)) if token == expected => Ok(rest),
            _ => Err(self.expected(what)),
        }
    }

    fn expected(self, what: &'static str) -> TypeError {
        TypeError::Expected {
            expected: what,
            offset: self.offset(),
        }
    }
}

/// One top-level item of a generic argument list.
struct Item<'src> {
    name: Option<&'src str>,
    node: TypeNode,
    span: Range<usize>,
}

/// Parse a complete type string.
pub fn parse_type(input: &str) -> Result<TypeNode> {
    let start = Input::new(input);
    if start.peek()?.is_none() {
        return Err(TypeError::Empty);
    }

    let (node, rest) = parse_node(start)?;
    ensure_consumed(rest)?;
    Ok(node)
}

/// Split a `map<...>` or `tuple<...>` type into its top-level item strings.
///
/// Commas inside nested generics are not split points:
/// `map<map<int32,int32>,int>` yields `["map<int32,int32>", "int"]`.
pub fn split_top_level(input: &str) -> Result<Vec<&str>> {
    let start = Input::new(input);
    let rest = match start.next()? {
        Some((Token::Ident("map" | "tuple"), rest)) => rest,
        _ => return Err(start.expected("`map<...>` or `tuple<...>`")),
    };

    let (items, rest) = parse_items(rest, true)?;
    ensure_consumed(rest)?;
    Ok(items
        .into_iter()
        .map(|item| input[item.span].trim())
        .collect())
}

fn ensure_consumed(rest: Input<'_>) -> Result<()> {
    match rest.peek()? {
        None => Ok(()),
        Some(_) => Err(TypeError::TrailingInput(rest.rest.trim().to_string())),
    }
}

fn parse_node(input: Input<'_>) -> Result<(TypeNode, Input<'_>)> {
    let (mut node, mut rest) = parse_base(input)?;

    while let Some((Token::LBracket, after)) = rest.next()? {
        match after.next()? {
            Some((Token::RBracket, after)) => {
                node = TypeNode::slice_of(node);
                rest = after;
            }
            Some((Token::Number(text), after)) => {
                let size = text
                    .parse::<usize>()
                    .map_err(|_| TypeError::InvalidArraySize(text.to_string()))?;
                rest = after.expect(Token::RBracket, "`]`")?;
                node = TypeNode::FixedArray(Box::new(node), size);
            }
            Some((Token::Ident(text), _)) => {
                return Err(TypeError::InvalidArraySize(text.to_string()));
            }
            _ => return Err(after.expected("array size or `]`")),
        }
    }

    Ok((node, rest))
}

fn parse_base(input: Input<'_>) -> Result<(TypeNode, Input<'_>)> {
    let Some((Token::Ident(name), rest)) = input.next()? else {
        return Err(input.expected("type name"));
    };

    match name {
        "map" => parse_map(rest),
        "tuple" => parse_tuple(rest),
        "FixedHash" => parse_fixed_hash(rest),
        _ => Ok((primitive(name)?, rest)),
    }
}

fn parse_map(input: Input<'_>) -> Result<(TypeNode, Input<'_>)> {
    let (items, rest) = parse_items(input, false)?;
    let nodes: Vec<TypeNode> = items.into_iter().map(|item| item.node).collect();
    let [key, value] = <[TypeNode; 2]>::try_from(nodes)
        .map_err(|nodes| TypeError::MapArity(nodes.len()))?;

    Ok((TypeNode::Map(Box::new(key), Box::new(value)), rest))
}

fn parse_tuple(input: Input<'_>) -> Result<(TypeNode, Input<'_>)> {
    let (items, rest) = parse_items(input, true)?;

    let named = items.iter().filter(|item| item.name.is_some()).count();
    if named > 0 && named < items.len() {
        let index = items.iter().position(|item| item.name.is_none()).unwrap_or(0);
        return Err(TypeError::UnnamedTupleElement(index));
    }

    let elems = items
        .into_iter()
        .map(|item| TupleElem {
            name: item.name.map(str::to_string),
            ty: item.node,
        })
        .collect();
    Ok((TypeNode::Tuple(elems), rest))
}

fn parse_fixed_hash(input: Input<'_>) -> Result<(TypeNode, Input<'_>)> {
    let rest = input.expect(Token::LAngle, "`<`")?;
    let Some((Token::Number(text), rest)) = rest.next()? else {
        return Err(rest.expected("hash size"));
    };
    let rest = rest.expect(Token::RAngle, "`>`")?;

    let size = text
        .parse::<usize>()
        .map_err(|_| TypeError::UnsupportedHashSize(usize::MAX))?;
    let node = match size {
        20 => TypeNode::Address,
        1..=32 => TypeNode::FixedBytes(size as u8),
        _ => return Err(TypeError::UnsupportedHashSize(size)),
    };
    Ok((node, rest))
}

/// `'<' (item (',' item)*)? '>'`, keeping each item's source span.
fn parse_items(input: Input<'_>, allow_names: bool) -> Result<(Vec<Item<'_>>, Input<'_>)> {
    let mut rest = input.expect(Token::LAngle, "`<`")?;
    let mut items = Vec::new();

    if let Some((Token::RAngle, after)) = rest.next()? {
        return Ok((items, after));
    }

    loop {
        let start = rest.offset();
        let (node, after) = parse_node(rest)?;
        rest = after;

        let mut name = None;
        if allow_names && let Some((Token::Ident(ident), after)) = rest.next()? {
            name = Some(ident);
            rest = after;
        }

        items.push(Item {
            name,
            node,
            span: start..rest.offset(),
        });

        match rest.next()? {
            Some((Token::Comma, after)) => rest = after,
            Some((Token::RAngle, after)) => return Ok((items, after)),
            _ => return Err(rest.expected("`,` or `>`")),
        }
    }
}

fn primitive(name: &str) -> Result<TypeNode> {
    let node = match name {
        "bool" => TypeNode::Bool,
        "string" => TypeNode::String,
        "address" => TypeNode::Address,
        "bytes" => TypeNode::Bytes,
        "function" => TypeNode::Unsupported(UnsupportedKind::Function),
        _ if is_fixed_point(name) => TypeNode::Unsupported(UnsupportedKind::FixedPoint),
        _ => {
            if let Some(width) = name.strip_prefix("uint").filter(|w| is_digits_or_empty(w)) {
                TypeNode::UInt(int_width(name, width)?)
            } else if let Some(width) = name.strip_prefix("int").filter(|w| is_digits_or_empty(w)) {
                TypeNode::Int(int_width(name, width)?)
            } else if let Some(size) = name.strip_prefix("bytes").filter(|s| is_digits(s)) {
                let size = size.parse::<usize>().unwrap_or(usize::MAX);
                match size {
                    1..=32 => TypeNode::FixedBytes(size as u8),
                    _ => return Err(TypeError::UnsupportedHashSize(size)),
                }
            } else {
                TypeNode::Struct(name.to_string())
            }
        }
    };
    Ok(node)
}

/// Bare `int`/`uint` mean 256 bits.
fn int_width(name: &str, digits: &str) -> Result<u16> {
    if digits.is_empty() {
        return Ok(256);
    }
    digits
        .parse::<u16>()
        .ok()
        .filter(|w| INT_WIDTHS.contains(w))
        .ok_or_else(|| TypeError::UnsupportedWidth(name.to_string()))
}

fn is_fixed_point(name: &str) -> bool {
    if name == "fixedpoint" {
        return true;
    }
    let Some(rest) = name.strip_prefix('u').unwrap_or(name).strip_prefix("fixed") else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    match rest.split_once('x') {
        Some((bits, decimals)) => is_digits(bits) && is_digits(decimals),
        None => false,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_digits_or_empty(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
