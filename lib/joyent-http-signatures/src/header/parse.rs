use super::{SignatureHeader, SCHEME};
use crate::DATE_HEADER;
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// What went wrong while parsing the header
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Parameter appeared more than once
    #[error("Duplicate parameter")]
    DuplicateParameter,

    /// Scheme literal isn't `Signature`
    #[error("Expected the \"Signature\" scheme")]
    InvalidScheme,

    /// Required parameter is missing
    #[error("Missing parameter \"{0}\"")]
    MissingParameter(&'static str),

    /// No Base64 signature after the parameter list
    #[error("Missing signature")]
    MissingSignature,

    /// Token is out of place or couldn't be lexed
    #[error("Unexpected token")]
    UnexpectedToken,

    /// Parameter name isn't part of the grammar
    #[error("Unknown parameter")]
    UnknownParameter,
}

/// `Authorization` header parsing error
#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(joyent_http_signatures::header::parse))]
#[error("Malformed authorization header: {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,

    #[label("here")]
    span: SourceSpan,
}

impl ParseError {
    fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: span.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"[A-Za-z]+")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Value,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    /// Lex the parameter list, shifting every span by `offset` so they point into the full header
    pub fn parse(input: &str, offset: usize) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(move |(ty, span)| {
                let span = (span.start + offset)..(span.end + offset);
                ty.map(|ty| Token { ty, span: span.clone() })
                    .map_err(|()| span)
            })
    }
}

macro_rules! ensure {
    ($self:expr, $value:expr, $pattern:pat) => {{
        let value = match $value {
            Some(Ok(value)) => value,
            Some(Err(span)) => return Some(Err($self.fail(span))),
            None => {
                let end = $self.end;
                return Some(Err($self.fail(end..end)));
            }
        };

        if !matches!(value.ty, $pattern) {
            return Some(Err($self.fail(value.span)));
        }

        value
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the full header the spans point into
    input: &'a str,

    /// End of the parameter list, used as the location of "unexpected end of input" errors
    end: usize,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<I> ParseIter<'_, I> {
    fn fail(&mut self, span: Span) -> ParseError {
        self.is_broken = true;
        ParseError::new(ParseErrorKind::UnexpectedToken, span)
    }
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<(&'a str, &'a str, Span), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let key = match self.inner.next()? {
            Ok(token) if matches!(token.ty, TokenTy::Key) => token,
            Ok(token) => return Some(Err(self.fail(token.span))),
            Err(span) => return Some(Err(self.fail(span))),
        };
        ensure!(self, self.inner.next(), TokenTy::Equals);
        let value = ensure!(self, self.inner.next(), TokenTy::Value);

        if let Some(next) = self.inner.next() {
            ensure!(self, Some(next), TokenTy::Comma);
        }

        let span = key.span.start..value.span.end;
        let key = &self.input[key.span];
        let value = &self.input[(value.span.start + 1)..(value.span.end - 1)];

        Some(Ok((key, value, span)))
    }
}

/// Parse a Joyent `Authorization` header
///
/// Parameters are matched by name, so their order on the wire doesn't matter.
/// A missing `headers` parameter means the header list is `["date"]`.
#[inline]
pub fn parse(input: &str) -> Result<SignatureHeader<'_>, ParseError> {
    let Some((scheme, rest)) = input.split_once(' ') else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidScheme,
            0..input.len(),
        ));
    };

    if scheme != SCHEME {
        return Err(ParseError::new(
            ParseErrorKind::InvalidScheme,
            0..scheme.len(),
        ));
    }

    let rest = rest.trim();
    let params_start = input.len() - input[scheme.len()..].trim_start().len();
    let (params, signature) = match rest.rsplit_once(' ') {
        Some((params, signature)) if !signature.contains('"') => (params, signature),
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::MissingSignature,
                params_start..(params_start + rest.len()),
            ));
        }
    };

    let params_end = params_start + params.len();
    let kv_iter = ParseIter {
        inner: Token::parse(params, params_start),
        input,
        end: params_end,
        is_broken: false,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut extensions = None;

    for kv in kv_iter {
        let (key, value, span) = kv?;

        let slot = match key {
            "keyId" => &mut key_id,
            "algorithm" => &mut algorithm,
            "headers" => &mut headers,
            "ext" => &mut extensions,
            _ => {
                return Err(ParseError::new(ParseErrorKind::UnknownParameter, span));
            }
        };

        if slot.replace(value).is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateParameter, span));
        }
    }

    let missing = |name| {
        ParseError::new(
            ParseErrorKind::MissingParameter(name),
            params_start..params_end,
        )
    };

    let headers: Vec<&str> = headers
        .map(|headers| headers.split_whitespace().collect())
        .filter(|headers: &Vec<&str>| !headers.is_empty())
        .unwrap_or_else(|| vec![DATE_HEADER]);

    Ok(SignatureHeader {
        key_id: key_id.ok_or_else(|| missing("keyId"))?,
        algorithm: algorithm.ok_or_else(|| missing("algorithm"))?,
        headers,
        extensions,
        signature,
    })
}
