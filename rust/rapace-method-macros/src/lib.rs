//! Proc macros for rapace method definitions.
//!
//! `#[service]` turns a trait of `async fn` methods into one method
//! definition type per method, each implementing the three capabilities
//! `rapace_method` needs to assemble a descriptor.

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote, quote_spanned};

mod parser;

use parser::{ParsedArgs, ParsedMethod, ParsedTrait};

/// Generates method definitions for every method of a service trait.
///
/// ```ignore
/// use facet::Facet;
/// use rapace_method::Stream;
///
/// #[derive(Facet)]
/// pub struct Point { latitude: i32, longitude: i32 }
///
/// #[derive(Facet)]
/// pub struct Feature { name: String, location: Point }
///
/// #[rapace_method::service(package = "routeguide")]
/// pub trait RouteGuide {
///     async fn get_feature(&self, point: Point) -> Feature;
///     async fn list_features(&self, area: Point) -> Stream<Feature>;
/// }
///
/// // route_guide_methods::GetFeature::METHOD_NAME == "/routeguide.RouteGuide/GetFeature"
/// // route_guide_methods::ListFeatures::STREAM_TYPE == StreamingMode::ServerStreaming
/// ```
///
/// The trait itself is emitted unchanged. Next to it, a module named
/// `<trait>_methods` holds a unit struct per method, a `METHOD_NAMES` array
/// in declaration order, and `method_infos()`.
#[proc_macro_attribute]
pub fn service(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = TokenStream2::from(attr);
    let item = TokenStream2::from(item);

    match expand(&attr, &item) {
        Ok(tokens) => tokens.into(),
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #item
                #err
            }
            .into()
        }
    }
}

fn expand(attr: &TokenStream2, item: &TokenStream2) -> parser::Result<TokenStream2> {
    let args = parser::parse_args(attr)?;
    let parsed = parser::parse_trait(item)?;
    let methods = generate_methods_module(&args, &parsed);

    Ok(quote! {
        #[allow(async_fn_in_trait)]
        #item

        #methods
    })
}

/// Service segment of every method name: `<package>.<Trait>` or `<Trait>`.
fn service_name(args: &ParsedArgs, parsed: &ParsedTrait) -> String {
    match &args.package {
        Some(package) => format!("{package}.{}", parsed.name),
        None => parsed.name.clone(),
    }
}

fn generate_methods_module(args: &ParsedArgs, parsed: &ParsedTrait) -> TokenStream2 {
    let vis = &parsed.vis;
    let trait_name = &parsed.name;
    let mod_name = format_ident!("{}_methods", trait_name.to_snake_case(), span = parsed.span);
    let service = service_name(args, parsed);

    let mod_doc = format!("Method definitions of the [`{trait_name}`](super::{trait_name}) service.");

    let structs: Vec<Ident> = parsed
        .methods
        .iter()
        .map(|m| format_ident!("{}", m.name.to_upper_camel_case(), span = m.span))
        .collect();

    let method_names: Vec<String> = structs
        .iter()
        .map(|ident| format!("/{service}/{ident}"))
        .collect();

    let definitions = parsed
        .methods
        .iter()
        .zip(&structs)
        .zip(&method_names)
        .map(|((method, ident), name)| generate_definition(method, ident, name));

    let count = structs.len();

    quote! {
        #[doc = #mod_doc]
        #vis mod #mod_name {
            #[allow(unused_imports)]
            use super::*;

            #(#definitions)*

            /// Fully qualified names of every method, in declaration order.
            pub const METHOD_NAMES: [&'static str; #count] = [#(#method_names),*];

            /// Descriptor snapshots of every method, in declaration order.
            pub fn method_infos() -> ::std::vec::Vec<::rapace_method::MethodInfo> {
                ::std::vec![
                    #(<#structs as ::rapace_method::MethodDescriptor>::info()),*
                ]
            }
        }
    }
}

fn generate_definition(method: &ParsedMethod, ident: &Ident, name: &str) -> TokenStream2 {
    let span = method.span;
    let request = method.request.to_tokens();
    let response = method.response.to_tokens();

    let doc = match &method.doc {
        Some(doc) => quote! { #[doc = #doc] },
        None => {
            let doc = format!(" Definition of `{name}`.");
            quote! { #[doc = #doc] }
        }
    };

    quote_spanned! {span=>
        #doc
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct #ident;

        impl ::rapace_method::HasMethodName for #ident {
            const METHOD_NAME: &'static str = #name;
        }

        impl ::rapace_method::HasIncomingType for #ident {
            type IncomingType = #request;
        }

        impl ::rapace_method::HasOutgoingType for #ident {
            type OutgoingType = #response;
        }

        ::rapace_method::assert_service_method!(#ident);
    }
}
