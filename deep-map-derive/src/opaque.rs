//! Implementation of the `#[derive(Opaque)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, GenericParam, Generics, Ident, parse_macro_input, parse_quote};

/// Main implementation of the Opaque derive macro.
pub fn derive_opaque_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(generate_opaque(&input.ident, &input.generics))
}

fn generate_opaque(name: &Ident, generics: &Generics) -> TokenStream2 {
    let (_, type_generics, _) = generics.split_for_impl();

    let each_generics = with_parameter(generics, parse_quote!(__M));
    let (each_impl_generics, _, each_where_clause) = each_generics.split_for_impl();

    let fields_generics = with_parameter(generics, parse_quote!(__R));
    let (fields_impl_generics, _, fields_where_clause) = fields_generics.split_for_impl();

    let mut tree_generics = generics.clone();
    tree_generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#name #type_generics: 'static));
    let (tree_impl_generics, _, tree_where_clause) = tree_generics.split_for_impl();

    quote! {
        impl #each_impl_generics ::deep_map::typed::MapWith<::deep_map::typed::Each<__M>>
            for #name #type_generics #each_where_clause
        {
            type Output = Self;

            #[inline]
            fn map_with(self, _mapper: &::deep_map::typed::Each<__M>) -> Self {
                self
            }
        }

        impl #fields_impl_generics ::deep_map::typed::MapWith<::deep_map::typed::Fields<__R>>
            for #name #type_generics #fields_where_clause
        {
            type Output = Self;

            #[inline]
            fn map_with(self, _mapper: &::deep_map::typed::Fields<__R>) -> Self {
                self
            }
        }

        impl #tree_impl_generics ::core::convert::From<#name #type_generics> for ::deep_map::Tree
            #tree_where_clause
        {
            fn from(value: #name #type_generics) -> Self {
                ::deep_map::Tree::opaque(value)
            }
        }
    }
}

/// Returns `generics` with one extra type parameter appended.
fn with_parameter(generics: &Generics, parameter: GenericParam) -> Generics {
    let mut extended = generics.clone();
    extended.params.push(parameter);
    extended
}
