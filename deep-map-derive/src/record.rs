//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module generates the record mapper type of a struct together with
//! the `MapWith` and `Tree` conversion implementations that use it.

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Data, DeriveInput, Field, Fields, GenericParam, Generics, Ident, Type, parse_macro_input,
    parse_quote,
};

/// Main implementation of the Record derive macro.
pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => {
                let fields: Vec<&Field> = named_fields.named.iter().collect();
                generate_record(&input, &fields)
            }
            Fields::Unnamed(_) => syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs with named fields, not tuple structs. \
                 Use #[derive(Opaque)] for values that are never traversed.",
            )
            .to_compile_error(),
            Fields::Unit => syn::Error::new_spanned(
                &input.ident,
                "Record cannot be derived for unit structs. \
                 Use #[derive(Opaque)] for values that are never traversed.",
            )
            .to_compile_error(),
        },
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs, not enums. \
             Use #[derive(Opaque)] for values that are never traversed.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Record cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// A field of the record, with the mapper type parameter that maps it.
struct RecordField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    mapper: Ident,
    /// The struct type parameter this field may retype, if any.
    retyped: Option<&'a Ident>,
}

/// Generates every item the Record derive emits.
fn generate_record(input: &DeriveInput, fields: &[&Field]) -> TokenStream2 {
    let name = &input.ident;
    let visibility = &input.vis;
    let generics = &input.generics;
    let mapper_name = format_ident!("{}Mapper", name);

    let retypable = retypable_parameters(generics, fields);
    let record_fields: Vec<RecordField<'_>> = fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            let ident = field.ident.as_ref()?;
            let retyped = retypable
                .iter()
                .copied()
                .find(|parameter| is_bare_parameter(&field.ty, parameter));
            Some(RecordField {
                ident,
                ty: &field.ty,
                mapper: format_ident!("__M{}", index),
                retyped,
            })
        })
        .collect();

    let mapper_struct = generate_mapper_struct(name, visibility, &mapper_name, &record_fields);
    let setters = generate_setters(visibility, &mapper_name, &record_fields);
    let map_fields = generate_map_fields(name, generics, &mapper_name, &record_fields);
    let map_each = generate_map_each(name, generics);
    let into_tree = generate_into_tree(name, generics, &record_fields);

    quote! {
        #mapper_struct
        #setters
        #map_fields
        #map_each
        #into_tree
    }
}

// =============================================================================
// Record mapper
// =============================================================================

fn generate_mapper_struct(
    name: &Ident,
    visibility: &syn::Visibility,
    mapper_name: &Ident,
    fields: &[RecordField<'_>],
) -> TokenStream2 {
    let mappers: Vec<&Ident> = fields.iter().map(|field| &field.mapper).collect();
    let idents: Vec<&Ident> = fields.iter().map(|field| field.ident).collect();
    let doc = format!("Typed record mapper for `{name}`, generated by `#[derive(Record)]`.");

    // A field named `new` owns the `new` setter, so the constructor is
    // only reachable through `Default`.
    let constructor = if fields.iter().any(|field| field.ident.unraw() == "new") {
        quote!()
    } else {
        quote! {
            impl #mapper_name {
                /// Creates a mapper that keeps every field.
                #[must_use]
                #visibility const fn new() -> Self {
                    Self {
                        #(#idents: ::deep_map::typed::Keep,)*
                    }
                }
            }
        }
    };

    quote! {
        #[doc = #doc]
        ///
        /// Every field starts as `Keep`; the setter of the same name replaces it.
        #[derive(Debug, Clone, Copy)]
        #visibility struct #mapper_name<#(#mappers = ::deep_map::typed::Keep),*> {
            #(#idents: #mappers,)*
        }

        #constructor

        impl ::core::default::Default for #mapper_name {
            fn default() -> Self {
                Self {
                    #(#idents: ::deep_map::typed::Keep,)*
                }
            }
        }
    }
}

fn generate_setters(
    visibility: &syn::Visibility,
    mapper_name: &Ident,
    fields: &[RecordField<'_>],
) -> TokenStream2 {
    let mappers: Vec<&Ident> = fields.iter().map(|field| &field.mapper).collect();
    let idents: Vec<&Ident> = fields.iter().map(|field| field.ident).collect();

    let setters = fields.iter().map(|field| {
        let ident = field.ident;
        let doc = format!("Sets the mapper of the `{}` field.", ident.unraw());
        let replaced = mappers.iter().map(|mapper| {
            if *mapper == &field.mapper {
                quote!(__N)
            } else {
                quote!(#mapper)
            }
        });
        let values = idents.iter().map(|other| {
            if *other == ident {
                quote!(#other: mapper)
            } else {
                quote!(#other: self.#other)
            }
        });

        quote! {
            #[doc = #doc]
            #[must_use]
            #visibility fn #ident<__N>(self, mapper: __N) -> #mapper_name<#(#replaced),*> {
                #mapper_name {
                    #(#values,)*
                }
            }
        }
    });

    quote! {
        impl<#(#mappers),*> #mapper_name<#(#mappers),*> {
            #(#setters)*
        }
    }
}

// =============================================================================
// MapWith implementations
// =============================================================================

fn generate_map_fields(
    name: &Ident,
    generics: &Generics,
    mapper_name: &Ident,
    fields: &[RecordField<'_>],
) -> TokenStream2 {
    let (_, type_generics, _) = generics.split_for_impl();
    let mappers: Vec<&Ident> = fields.iter().map(|field| &field.mapper).collect();

    let mut impl_generics_source = generics.clone();
    for mapper in &mappers {
        impl_generics_source
            .params
            .push(GenericParam::Type(parse_quote!(#mapper)));
    }
    {
        let where_clause = impl_generics_source.make_where_clause();
        for field in fields {
            let mapper = &field.mapper;
            let predicate: syn::WherePredicate = match field.retyped {
                Some(parameter) => parse_quote!(#parameter: ::deep_map::typed::MapWith<#mapper>),
                None => {
                    let ty = field.ty;
                    parse_quote!(#ty: ::deep_map::typed::MapWith<#mapper, Output = #ty>)
                }
            };
            where_clause.predicates.push(predicate);
        }
    }
    let (impl_generics, _, where_clause) = impl_generics_source.split_for_impl();

    let output_arguments = generics.params.iter().map(|parameter| match parameter {
        GenericParam::Lifetime(lifetime) => {
            let lifetime = &lifetime.lifetime;
            quote!(#lifetime)
        }
        GenericParam::Const(constant) => {
            let ident = &constant.ident;
            quote!(#ident)
        }
        GenericParam::Type(parameter) => {
            let ident = &parameter.ident;
            fields
                .iter()
                .find(|field| field.retyped == Some(ident))
                .map_or_else(
                    || quote!(#ident),
                    |field| {
                        let mapper = &field.mapper;
                        quote!(<#ident as ::deep_map::typed::MapWith<#mapper>>::Output)
                    },
                )
        }
    });
    let output = if generics.params.is_empty() {
        quote!(#name)
    } else {
        quote!(#name<#(#output_arguments),*>)
    };

    let mapped_fields = fields.iter().map(|field| {
        let ident = field.ident;
        quote! {
            #ident: ::deep_map::typed::MapWith::map_with(self.#ident, &mapper.0.#ident)
        }
    });

    quote! {
        impl #impl_generics ::deep_map::typed::MapWith<
            ::deep_map::typed::Fields<#mapper_name<#(#mappers),*>>
        > for #name #type_generics #where_clause {
            type Output = #output;

            fn map_with(
                self,
                mapper: &::deep_map::typed::Fields<#mapper_name<#(#mappers),*>>,
            ) -> Self::Output {
                #name {
                    #(#mapped_fields,)*
                }
            }
        }
    }
}

fn generate_map_each(name: &Ident, generics: &Generics) -> TokenStream2 {
    let (_, type_generics, _) = generics.split_for_impl();
    let mut impl_generics_source = generics.clone();
    impl_generics_source
        .params
        .push(GenericParam::Type(parse_quote!(__M)));
    let (impl_generics, _, where_clause) = impl_generics_source.split_for_impl();

    quote! {
        impl #impl_generics ::deep_map::typed::MapWith<::deep_map::typed::Each<__M>>
            for #name #type_generics #where_clause
        {
            type Output = Self;

            #[inline]
            fn map_with(self, _mapper: &::deep_map::typed::Each<__M>) -> Self {
                self
            }
        }
    }
}

// =============================================================================
// Tree conversion
// =============================================================================

fn generate_into_tree(name: &Ident, generics: &Generics, fields: &[RecordField<'_>]) -> TokenStream2 {
    let (_, type_generics, _) = generics.split_for_impl();
    let mut impl_generics_source = generics.clone();
    {
        let where_clause = impl_generics_source.make_where_clause();
        for field in fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::core::convert::Into<::deep_map::Tree>));
        }
    }
    let (impl_generics, _, where_clause) = impl_generics_source.split_for_impl();

    let entries = fields.iter().map(|field| {
        let ident = field.ident;
        let key = ident.unraw().to_string();
        quote! {
            (
                ::deep_map::Key::from(#key),
                ::core::convert::Into::<::deep_map::Tree>::into(record.#ident),
            )
        }
    });

    quote! {
        impl #impl_generics ::core::convert::From<#name #type_generics> for ::deep_map::Tree
            #where_clause
        {
            fn from(record: #name #type_generics) -> Self {
                ::deep_map::Tree::record(::std::vec![#(#entries),*])
            }
        }
    }
}

// =============================================================================
// Type parameter analysis
// =============================================================================

/// Returns the type parameters that a field may retype.
///
/// A parameter qualifies when it has no bounds, is not mentioned by the
/// where clause, is the whole type of exactly one field and appears in no
/// other field type.
fn retypable_parameters<'a>(generics: &'a Generics, fields: &[&Field]) -> Vec<&'a Ident> {
    generics
        .type_params()
        .filter(|parameter| parameter.bounds.is_empty())
        .map(|parameter| &parameter.ident)
        .filter(|ident| {
            generics.where_clause.as_ref().is_none_or(|where_clause| {
                !tokens_mention(quote!(#where_clause), ident)
            })
        })
        .filter(|ident| {
            let bare = fields
                .iter()
                .filter(|field| is_bare_parameter(&field.ty, ident))
                .count();
            let mentioned = fields
                .iter()
                .filter(|field| {
                    let ty = &field.ty;
                    tokens_mention(quote!(#ty), ident)
                })
                .count();
            bare == 1 && mentioned == 1
        })
        .collect()
}

/// Returns `true` if `ty` is exactly the type parameter `parameter`.
fn is_bare_parameter(ty: &Type, parameter: &Ident) -> bool {
    match ty {
        Type::Path(type_path) => {
            type_path.qself.is_none() && type_path.path.get_ident() == Some(parameter)
        }
        Type::Paren(paren) => is_bare_parameter(&paren.elem, parameter),
        Type::Group(group) => is_bare_parameter(&group.elem, parameter),
        _ => false,
    }
}

/// Returns `true` if `ident` occurs anywhere in `tokens`.
fn tokens_mention(tokens: TokenStream2, ident: &Ident) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(candidate) => candidate == *ident,
        TokenTree::Group(group) => tokens_mention(group.stream(), ident),
        TokenTree::Punct(_) | TokenTree::Literal(_) => false,
    })
}
