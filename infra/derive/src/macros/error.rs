use fxhash::FxHashMap;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, PathSegment, Type, Variant,
};

const INTERNAL: &str = "Internal";

struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<SourceField<'a>>,
    has_context: bool,
    /// Only `source` and `context`, so a `From<Source>` can build the variant.
    wraps_source: bool,
    cfg: Vec<&'a Attribute>,
}

struct SourceField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "confine_error requires named fields for source/context handling",
            ));
        };

        let source = source_field(fields).and_then(|field| {
            field.ident.as_ref().map(|ident| SourceField { ident, ty: &field.ty })
        });

        let has_context = context_field(fields)?.is_some();
        let wraps_source = source.is_some() && has_context && fields.named.len() == 2;

        Ok(Self {
            ident: &variant.ident,
            source,
            has_context,
            wraps_source,
            cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
        })
    }

    fn is_internal(&self) -> bool {
        self.ident == INTERNAL
    }
}

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "confine_error can only be applied to enums")
            .to_compile_error();
    };

    let variants = match data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()
    {
        Ok(variants) => variants,
        Err(err) => return err.to_compile_error(),
    };
    if let Some(orphan) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return syn::Error::new_spanned(
            orphan.ident,
            "confine_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error();
    }

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let derives = missing_derives(&input);
    let ext_trait = ext_trait(name, &ext);
    let source_impls = source_impls(name, &ext, &variants);
    let internal_impls = internal_impls(name, &variants);
    let helpers = inherent_helpers(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #source_impls
        #internal_impls
        #helpers

        #[allow(dead_code)]
        fn format_context(
            context: &::core::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| {
                ::std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    }
}

fn ext_trait(name: &Ident, ext: &Ident) -> TokenStream {
    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|e| e.with_context(context))
            }
        }
    }
}

/// `From` and `<Name>Ext` impls for source types owned by a single variant.
fn source_impls(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let mut owners: FxHashMap<String, usize> = FxHashMap::default();
    for source in variants.iter().filter_map(|v| v.source.as_ref()) {
        *owners.entry(source.ty.to_token_stream().to_string()).or_default() += 1;
    }

    let impls = variants.iter().filter(|v| v.wraps_source && !v.is_internal()).filter_map(|v| {
        let source = v.source.as_ref()?;
        if owners.get(&source.ty.to_token_stream().to_string()) != Some(&1) {
            return None;
        }

        let (variant, field, ty, cfg) = (v.ident, source.ident, source.ty, &v.cfg);
        Some(quote! {
            #(#cfg)*
            #[automatically_derived]
            impl ::core::convert::From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self {
                    Self::#variant { #field, context: None }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl<T> #ext<T> for ::core::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::core::result::Result<T, #name> {
                    self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
                }
            }
        })
    });

    quote! { #(#impls)* }
}

fn internal_impls(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.is_internal()) else {
        return TokenStream::new();
    };
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl ::core::convert::From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Borrowed(s), context: None }
            }
        }

        #(#cfg)*
        impl ::core::convert::From<String> for #name {
            #[inline]
            fn from(s: String) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Owned(s), context: None }
            }
        }
    }
}

fn inherent_helpers(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let kinds = variants.iter().map(|v| {
        let (ident, cfg) = (v.ident, &v.cfg);
        let label = ident.to_string();
        quote! { #(#cfg)* Self::#ident { .. } => #label, }
    });
    let with_context = variants.iter().filter(|v| v.has_context);
    let readers = with_context.clone().map(|v| {
        let (ident, cfg) = (v.ident, &v.cfg);
        quote! { #(#cfg)* Self::#ident { context, .. } => context.as_deref(), }
    });
    let writers = with_context.map(|v| {
        let (ident, cfg) = (v.ident, &v.cfg);
        quote! { #(#cfg)* Self::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        #[automatically_derived]
        impl #name {
            /// Name of the variant, suitable for structured log fields.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    #(#kinds)*
                }
            }

            /// Context attached to this error, if any.
            #[must_use]
            #[allow(unreachable_patterns)]
            pub fn context_str(&self) -> ::core::option::Option<&str> {
                match self {
                    #(#readers)*
                    _ => None,
                }
            }

            /// Replaces the context carried by this error.
            #[must_use]
            #[allow(unreachable_patterns)]
            pub fn with_context(mut self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                match &mut self {
                    #(#writers)*
                    _ => {}
                }
                self
            }
        }
    }
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut derived = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                derived.push(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut tokens = Vec::new();
    if !derived.iter().any(|d| d == "Debug") {
        tokens.push(quote! { Debug });
    }
    if !derived.iter().any(|d| d == "Error") {
        tokens.push(quote! { ::thiserror::Error });
    }

    if tokens.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#tokens),*)] } }
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) = fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(None);
    };

    if is_context_type(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
    })
}

/// Matches `Option<Cow<'static, str>>` by the last path segment of each layer.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|s| s.ident == "Option") else {
        return false;
    };
    let Some(cow) = generic_args(option)
        .and_then(|mut args| args.find_map(|arg| match arg {
            GenericArgument::Type(inner) => last_segment(inner),
            _ => None,
        }))
        .filter(|s| s.ident == "Cow")
    else {
        return false;
    };
    let Some(mut args) = generic_args(cow) else {
        return false;
    };

    let is_static = matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let is_str = matches!(
        args.next(),
        Some(GenericArgument::Type(inner)) if last_segment(inner).is_some_and(|s| s.ident == "str")
    );
    is_static && is_str
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

fn generic_args(segment: &PathSegment) -> Option<impl Iterator<Item = &GenericArgument>> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => Some(args.args.iter()),
        _ => None,
    }
}
