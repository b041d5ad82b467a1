//! Service trait parser using unsynn.

use proc_macro2::{Span, TokenStream as TokenStream2, TokenTree as TokenTree2};
use quote::quote_spanned;
use unsynn::operator::names::{Assign, Colon, Comma, Gt, Lt, PathSep, Pound, RArrow, Semicolon};
use unsynn::{
    keyword, unsynn, Any, BraceGroupContaining, BracketGroupContaining, CommaDelimitedVec, Cons,
    Either, EndOfStream, Except, Ident, LiteralString, Many, Optional,
    ParenthesisGroupContaining, Parse, ToTokenIter, ToTokens, TokenStream,
};

keyword! {
    pub KAsync = "async";
    pub KFn = "fn";
    pub KTrait = "trait";
    pub KSelfKw = "self";
    pub KMut = "mut";
    pub KDoc = "doc";
    pub KPub = "pub";
    pub KWhere = "where";
    pub KPackage = "package";
}

/// Parses tokens and groups until `C` is found, handling `<...>` correctly.
type VerbatimUntil<C> = Many<Cons<Except<C>, AngleTokenTree>>;

unsynn! {
    /// Parses either a `TokenTree` or `<...>` grouping.
    #[derive(Clone)]
    pub struct AngleTokenTree(
        pub Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, unsynn::TokenTree>,
    );

    pub struct RawAttribute {
        pub _pound: Pound,
        pub body: BracketGroupContaining<TokenStream>,
    }

    pub struct DocAttribute {
        pub _doc: KDoc,
        pub _assign: Assign,
        pub value: LiteralString,
    }

    pub enum Visibility {
        PubRestricted(Cons<KPub, ParenthesisGroupContaining<TokenStream>>),
        Pub(KPub),
    }

    pub struct RefSelf {
        pub _amp: unsynn::operator::names::And,
        pub mutability: Option<KMut>,
        pub name: KSelfKw,
    }

    pub struct MethodParam {
        pub name: Ident,
        pub _colon: Colon,
        pub ty: VerbatimUntil<Comma>,
    }

    pub struct GenericParams {
        pub _lt: Lt,
        pub params: VerbatimUntil<Gt>,
        pub _gt: Gt,
    }

    #[derive(Clone)]
    pub struct TypePath {
        pub leading: Option<PathSep>,
        pub first: Ident,
        pub rest: Any<Cons<PathSep, Ident>>,
    }

    pub struct ReturnType {
        pub _arrow: RArrow,
        pub ty: VerbatimUntil<Either<Semicolon, KWhere>>,
    }

    pub struct WhereClause {
        pub _where: KWhere,
        pub bounds: VerbatimUntil<Semicolon>,
    }

    pub struct MethodParams {
        pub receiver: RefSelf,
        pub rest: Optional<Cons<Comma, CommaDelimitedVec<MethodParam>>>,
    }

    pub struct ServiceMethod {
        pub attributes: Any<RawAttribute>,
        pub _async: KAsync,
        pub _fn: KFn,
        pub name: Ident,
        pub generics: Optional<GenericParams>,
        pub params: ParenthesisGroupContaining<MethodParams>,
        pub return_type: Optional<ReturnType>,
        pub where_clause: Optional<WhereClause>,
        pub _semi: Semicolon,
    }

    pub struct ServiceTrait {
        pub attributes: Any<RawAttribute>,
        pub vis: Option<Visibility>,
        pub _trait: KTrait,
        pub name: Ident,
        pub generics: Optional<GenericParams>,
        pub body: BraceGroupContaining<Any<ServiceMethod>>,
        pub _eos: EndOfStream,
    }

    pub struct PackageArg {
        pub _package: KPackage,
        pub _assign: Assign,
        pub value: LiteralString,
    }

    pub struct ServiceArgs {
        pub package: Option<PackageArg>,
        pub _eos: EndOfStream,
    }

    /// A whole payload of the form `path::to::Stream<...>`.
    pub struct StreamType {
        pub path: TypePath,
        pub _lt: Lt,
        pub inner: VerbatimUntil<Gt>,
        pub _gt: Gt,
        pub _eos: EndOfStream,
    }
}

/// A payload type as written in the trait.
///
/// Only the outer `Stream<_>` wrapper is recognized; everything else is
/// emitted verbatim and left for the compiler to check.
#[derive(Debug, Clone)]
pub enum Type {
    /// `Stream<inner>`
    Stream {
        tokens: TokenStream2,
        inner: TokenStream2,
    },

    /// Any other type
    Plain(TokenStream2),
}

impl Type {
    pub fn parse(tokens: TokenStream2) -> Self {
        let mut iter = tokens.clone().to_token_iter();
        match StreamType::parse(&mut iter) {
            Ok(stream) if stream.path.last_segment() == "Stream" => Type::Stream {
                inner: stream.inner.to_token_stream(),
                tokens,
            },
            _ => Type::Plain(tokens),
        }
    }

    /// The streamed message if this is exactly `Stream<T>`.
    pub fn as_stream(&self) -> Option<&TokenStream2> {
        match self {
            Type::Stream { inner, .. } => Some(inner),
            Type::Plain(_) => None,
        }
    }

    /// Whether `Stream` appears inside the message, i.e. below the outer wrapper.
    pub fn nests_stream(&self) -> bool {
        match self {
            Type::Stream { inner, .. } => mentions_stream(inner),
            Type::Plain(tokens) => mentions_stream(tokens),
        }
    }

    /// Whether the type borrows anywhere.
    pub fn borrows(&self) -> bool {
        contains_borrow(&self.to_tokens())
    }

    /// Get a human-readable display of the type for error messages
    pub fn display(&self) -> String {
        self.to_tokens().to_string()
    }

    /// Tokens for codegen, exactly as written
    pub fn to_tokens(&self) -> TokenStream2 {
        match self {
            Type::Stream { tokens, .. } | Type::Plain(tokens) => tokens.clone(),
        }
    }
}

fn mentions_stream(tokens: &TokenStream2) -> bool {
    tokens.clone().into_iter().any(|tt| match tt {
        TokenTree2::Ident(ident) => ident == "Stream",
        TokenTree2::Group(group) => mentions_stream(&group.stream()),
        _ => false,
    })
}

fn contains_borrow(tokens: &TokenStream2) -> bool {
    tokens.clone().into_iter().any(|tt| match tt {
        TokenTree2::Punct(punct) => punct.as_char() == '&',
        TokenTree2::Group(group) => contains_borrow(&group.stream()),
        _ => false,
    })
}

impl TypePath {
    /// Get the last segment (e.g., "Stream" from "rapace_method::Stream")
    pub fn last_segment(&self) -> String {
        self.rest
            .iter()
            .last()
            .map(|seg| seg.value.second.to_string())
            .unwrap_or_else(|| self.first.to_string())
    }
}

pub struct ParsedTrait {
    pub name: String,
    pub span: Span,
    pub vis: TokenStream2,
    pub methods: Vec<ParsedMethod>,
}

pub struct ParsedMethod {
    pub name: String,
    pub span: Span,
    pub doc: Option<String>,
    pub request: Type,
    pub response: Type,
}

pub struct ParsedArgs {
    pub package: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub span: Span,
    pub message: String,
}

impl Error {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn to_compile_error(&self) -> TokenStream2 {
        let msg = &self.message;
        let span = self.span;
        quote_spanned! {span=> compile_error!(#msg); }
    }
}

impl From<unsynn::Error> for Error {
    fn from(err: unsynn::Error) -> Self {
        Self::new(Span::call_site(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse `#[service(...)]` arguments: empty, or `package = "some.package"`.
pub fn parse_args(tokens: &TokenStream2) -> Result<ParsedArgs> {
    let mut iter = tokens.clone().to_token_iter();
    let parsed = ServiceArgs::parse(&mut iter).map_err(|err| {
        Error::new(
            Span::call_site(),
            format!("expected `package = \"...\"` or no arguments: {err}"),
        )
    })?;

    let package = parsed.package.map(|arg| arg.value.as_str().to_string());
    if let Some(package) = &package {
        let valid = package.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_')
        });
        if !valid {
            return Err(Error::new(
                Span::call_site(),
                format!("invalid package name {package:?}: expected dot-separated identifiers"),
            ));
        }
    }

    Ok(ParsedArgs { package })
}

pub fn parse_trait(tokens: &TokenStream2) -> Result<ParsedTrait> {
    let mut iter = tokens.clone().to_token_iter();
    let parsed = ServiceTrait::parse(&mut iter).map_err(Error::from)?;

    if !parsed.generics.is_empty() {
        return Err(Error::new(
            parsed.name.span(),
            "service traits cannot declare generics",
        ));
    }

    let vis = parsed
        .vis
        .map(|vis| vis.to_token_stream())
        .unwrap_or_default();

    let methods = parsed
        .body
        .content
        .into_iter()
        .map(|entry| lower_method(entry.value))
        .collect::<Result<Vec<_>>>()?;

    if methods.is_empty() {
        return Err(Error::new(
            parsed.name.span(),
            "service traits must declare at least one method",
        ));
    }

    Ok(ParsedTrait {
        name: parsed.name.to_string(),
        span: parsed.name.span(),
        vis,
        methods,
    })
}

/// Checks a payload position: `Stream` may only wrap the whole payload, once,
/// and payloads are owned.
fn check_payload(ty: &Type, what: &str, span: Span) -> Result<()> {
    if ty.nests_stream() {
        return Err(Error::new(
            span,
            format!(
                "{what} type `{}` nests `Stream`; only the whole payload can be streamed, once",
                ty.display()
            ),
        ));
    }
    if ty.borrows() {
        return Err(Error::new(
            span,
            format!("{what} type `{}` must be owned, not borrowed", ty.display()),
        ));
    }
    Ok(())
}

fn lower_method(method: ServiceMethod) -> Result<ParsedMethod> {
    let span = method.name.span();

    if !method.generics.is_empty() {
        return Err(Error::new(span, "service methods cannot be generic"));
    }

    if method.params.content.receiver.mutability.is_some() {
        return Err(Error::new(
            span,
            "service methods must take &self, not &mut self",
        ));
    }

    let mut args = Vec::new();
    if let Some(rest) = method.params.content.rest.into_iter().next() {
        for entry in rest.value.second {
            let arg_span = entry.value.name.span();
            args.push((arg_span, Type::parse(entry.value.ty.to_token_stream())));
        }
    }

    let mut args = args.into_iter();
    let (request_span, request) = match (args.next(), args.next()) {
        (Some(request), None) => request,
        _ => {
            return Err(Error::new(
                span,
                format!(
                    "service method `{}` must take exactly one request argument",
                    method.name
                ),
            ));
        }
    };

    let response_tokens = method
        .return_type
        .into_iter()
        .next()
        .map(|r| r.value.ty.to_token_stream())
        .ok_or_else(|| {
            Error::new(
                span,
                format!(
                    "service method `{}` must return a response message",
                    method.name
                ),
            )
        })?;
    let response_span = response_tokens
        .clone()
        .into_iter()
        .next()
        .map_or(span, |tt| tt.span());
    let response = Type::parse(response_tokens);

    check_payload(&request, "request", request_span)?;
    check_payload(&response, "response", response_span)?;

    Ok(ParsedMethod {
        name: method.name.to_string(),
        span,
        doc: collect_doc_string(method.attributes),
        request,
        response,
    })
}

fn collect_doc_string(attrs: Any<RawAttribute>) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        let mut body_iter = attr.value.body.content.clone().to_token_iter();
        if let Ok(doc_attr) = DocAttribute::parse(&mut body_iter) {
            let line = doc_attr.value.as_str().replace("\\\"", "\"");
            docs.push(line);
        }
    }

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}
