//! Derive macros for Courtside booking flows
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action variants as user intents or
//!   gateway outcomes and names them for logging
//!
//! # Example
//!
//! ```ignore
//! use courtside_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum SlotAction {
//!     #[command]
//!     PickDate { date: NaiveDate },
//!
//!     #[event]
//!     SlotsLoaded { slots: Vec<TimeSlot> },
//! }
//!
//! assert!(SlotAction::PickDate { date }.is_command());
//! assert_eq!(SlotAction::SlotsLoaded { slots }.name(), "SlotsLoaded");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, parse_macro_input};

/// Derive macro for action enums
///
/// Generates helper methods:
/// - `is_command()` - true for variants marked `#[command]` (user intent)
/// - `is_event()` - true for variants marked `#[event]` (something that happened)
/// - `name()` - the variant name, for structured log fields
///
/// Unmarked variants are neither commands nor events. Generic enums are
/// supported.
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return Err(syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            ));
        }

        let pattern = variant_pattern(&variant.ident, &variant.fields);
        if is_command {
            command_arms.push(quote! { #pattern => true, });
        }
        if is_event {
            event_arms.push(quote! { #pattern => true, });
        }

        let label = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #label, });
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Variant name of this action
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    })
}

/// Wildcard pattern matching any value of the variant
fn variant_pattern(variant: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(_) => quote! { Self::#variant { .. } },
        Fields::Unnamed(_) => quote! { Self::#variant(..) },
        Fields::Unit => quote! { Self::#variant },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
