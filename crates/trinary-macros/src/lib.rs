//! Derive macros for the trinary configuration sections.
//!
//! * `ConfigDefaults` builds a `Default` impl from inline `#[default(...)]`
//!   values, so the defaults live next to the fields they describe.
//! * `Validate` builds a `validate(&self) -> Result<(), String>` method from
//!   `#[validate(...)]` rules on the fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Error, Field, Fields, Result, Type, parse_macro_input};

/// Derive `Default` for a configuration struct from `#[default(...)]` values.
///
/// String fields accept string literals and convert them with `Into`. Every
/// other field takes the expression as written.
///
/// # Example
/// ```
/// use trinary_macros::ConfigDefaults;
///
/// #[derive(ConfigDefaults)]
/// pub struct OrbitConfig {
///     #[default(200.0)]
///     pub inner_orbit: f64,
///
///     #[default(None)]
///     pub initial_seed: Option<u64>,
///
///     #[default("rk4")]
///     pub integrator: String,
/// }
///
/// let config = OrbitConfig::default();
/// assert_eq!(config.inner_orbit, 200.0);
/// assert_eq!(config.initial_seed, None);
/// assert_eq!(config.integrator, "rk4");
/// ```
///
/// Every field needs a non-empty `#[default(...)]` attribute; a missing or
/// empty one is a compile error.
#[proc_macro_derive(ConfigDefaults, attributes(default))]
pub fn derive_config_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_config_defaults(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Derive a `validate` method that checks numeric rules on each field.
///
/// Supported rules:
/// * `#[validate(positive)]`: the value must compare greater than the type's
///   default (zero for numbers) and be finite. NaN fails.
/// * `#[validate(non_negative)]`: greater than or equal to the default, and
///   finite.
///
/// Both numeric rules need a `Copy + Sub<Output = Self>` field type.
/// * `#[validate(nested)]`: calls the field's own `validate` and prefixes
///   errors with the field name.
///
/// Fields without a `#[validate(...)]` attribute are not checked.
///
/// # Example
/// ```
/// use trinary_macros::Validate;
///
/// #[derive(Validate)]
/// pub struct PhysicsConfig {
///     #[validate(positive)]
///     pub time_step: f64,
/// }
///
/// assert!(PhysicsConfig { time_step: 0.01 }.validate().is_ok());
/// assert_eq!(
///     PhysicsConfig { time_step: 0.0 }.validate(),
///     Err("time_step must be positive".to_string())
/// );
/// ```
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_validate(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<&'a Punctuated<Field, Comma>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        ));
    };

    match &data.fields {
        Fields::Named(fields) => Ok(&fields.named),
        _ => Err(Error::new_spanned(
            input,
            format!("{derive} requires a struct with named fields"),
        )),
    }
}

fn expand_config_defaults(input: &DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let initializers = named_fields(input, "ConfigDefaults")?
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let value = default_value(field)?;

            Ok(if is_string(&field.ty) {
                quote! { #ident: ::core::convert::Into::into(#value) }
            } else {
                quote! { #ident: #value }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::core::default::Default for #name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initializers),*
                }
            }
        }
    })
}

fn default_value(field: &Field) -> Result<TokenStream2> {
    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("default")) else {
        return Err(Error::new_spanned(
            field,
            format!("field `{}` needs a #[default(...)] attribute", field_name(field)),
        ));
    };

    let tokens: TokenStream2 = attr.parse_args()?;
    if tokens.is_empty() {
        return Err(Error::new_spanned(
            attr,
            format!("field `{}` has an empty #[default()]", field_name(field)),
        ));
    }

    Ok(tokens)
}

enum Rule {
    Positive,
    NonNegative,
    Nested,
}

fn validation_rules(field: &Field) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("positive") {
                rules.push(Rule::Positive);
            } else if meta.path.is_ident("non_negative") {
                rules.push(Rule::NonNegative);
            } else if meta.path.is_ident("nested") {
                rules.push(Rule::Nested);
            } else {
                return Err(meta.error("expected `positive`, `non_negative` or `nested`"));
            }
            Ok(())
        })?;
    }

    Ok(rules)
}

fn expand_validate(input: &DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut checks = Vec::new();
    for field in named_fields(input, "Validate")? {
        let ident = &field.ident;
        let ty = &field.ty;
        let label = field_name(field);

        // x - x is zero for every finite number and NaN for infinities
        let finite = quote! {
            let difference: #ty = ::core::ops::Sub::sub(self.#ident, self.#ident);
            if ::core::cmp::PartialOrd::partial_cmp(&difference, &zero)
                != ::core::option::Option::Some(::core::cmp::Ordering::Equal)
            {
                return ::core::result::Result::Err(
                    ::std::format!("{} must be finite", #label),
                );
            }
        };

        for rule in validation_rules(field)? {
            checks.push(match rule {
                Rule::Positive => quote! {
                    let zero: #ty = ::core::default::Default::default();
                    if ::core::cmp::PartialOrd::partial_cmp(&self.#ident, &zero)
                        != ::core::option::Option::Some(::core::cmp::Ordering::Greater)
                    {
                        return ::core::result::Result::Err(
                            ::std::format!("{} must be positive", #label),
                        );
                    }
                    #finite
                },
                Rule::NonNegative => quote! {
                    let zero: #ty = ::core::default::Default::default();
                    if !::core::matches!(
                        ::core::cmp::PartialOrd::partial_cmp(&self.#ident, &zero),
                        ::core::option::Option::Some(
                            ::core::cmp::Ordering::Greater | ::core::cmp::Ordering::Equal
                        )
                    ) {
                        return ::core::result::Result::Err(
                            ::std::format!("{} must not be negative", #label),
                        );
                    }
                    #finite
                },
                Rule::Nested => quote! {
                    self.#ident
                        .validate()
                        .map_err(|error| ::std::format!("{}.{}", #label, error))?;
                },
            });
        }
    }

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #name #ty_generics #where_clause {
            /// Check every `#[validate(...)]` rule, returning the first violation.
            pub fn validate(&self) -> ::core::result::Result<(), ::std::string::String> {
                #({ #checks })*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn field_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unnamed".to_string())
}

fn is_string(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "String")
}
