//! Path operation generator
//!
//! Turns a `#[paths]` trait into a segment enum, a builder struct collecting segments and
//! an optional interface trait. With `variants`, every operation taking arguments yields an
//! absolute and a relative member; argument-less operations are never suffixed.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use serde::Serialize;
use syn::meta::ParseNestedMeta;
use syn::{FnArg, LitStr, Pat, TraitItem, Type};

use crate::introspect::{check_signature, check_trait_shape, receiver};
use crate::naming::to_pascal_case;

const RESERVED_MEMBERS: &[&str] = &["new", "segments", "len", "is_empty"];

/// Arguments of `#[paths(...)]`
#[derive(Debug, Default)]
pub struct PathsArgs {
    pub variants: bool,
    pub segment: Option<LitStr>,
    pub interface: Option<LitStr>,
}

impl PathsArgs {
    pub fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("variants") {
            if self.variants {
                return Err(meta.error("option specified more than once"));
            }
            self.variants = true;
            Ok(())
        } else if meta.path.is_ident("segment") {
            set_ident_once(&mut self.segment, &meta)
        } else if meta.path.is_ident("interface") {
            set_ident_once(&mut self.interface, &meta)
        } else {
            Err(meta.error("unsupported paths option (expected variants, segment or interface)"))
        }
    }
}

fn set_ident_once(slot: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("option specified more than once"));
    }
    let value: LitStr = meta.value()?.parse()?;
    value.parse::<syn::Ident>()?;
    *slot = Some(value);
    Ok(())
}

/// Parameter shape of one path operation.
#[derive(Debug, Clone)]
pub enum OperationShape {
    /// No arguments
    Unit,
    /// Named fields, stored as written
    Fields(Vec<(syn::Ident, Type)>),
    /// A single read-only list, exposed as `impl IntoIterator<Item = T>`
    List { name: syn::Ident, element: Type },
}

#[derive(Debug, Clone)]
pub struct PathOperation {
    pub name: syn::Ident,
    pub shape: OperationShape,
    pub docs: Vec<syn::Attribute>,
}

impl PathOperation {
    pub fn takes_arguments(&self) -> bool {
        !matches!(self.shape, OperationShape::Unit)
    }
}

#[derive(Debug, Clone)]
pub struct PathsDeclaration {
    pub name: syn::Ident,
    pub segment: syn::Ident,
    pub interface: Option<syn::Ident>,
    pub variants: bool,
    pub operations: Vec<PathOperation>,
    pub docs: Vec<syn::Attribute>,
    pub visibility: syn::Visibility,
}

/// One emitted builder member.
struct Member<'a> {
    method: syn::Ident,
    variant: syn::Ident,
    operation: &'a PathOperation,
}

/// Serializable projection of a paths declaration.
#[derive(Debug, Serialize)]
pub struct PathsSummary {
    pub name: String,
    pub segment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub segment: String,
    pub arguments: usize,
}

impl PathsDeclaration {
    fn members(&self) -> Vec<Member<'_>> {
        let mut members = Vec::new();
        for operation in &self.operations {
            let pascal = to_pascal_case(&operation.name.to_string());
            if self.variants && operation.takes_arguments() {
                for suffix in ["Abs", "Rel"] {
                    members.push(Member {
                        method: format_ident!("{}_{}", operation.name, suffix.to_lowercase()),
                        variant: format_ident!("{}{}", pascal, suffix),
                        operation,
                    });
                }
            } else {
                members.push(Member {
                    method: operation.name.clone(),
                    variant: format_ident!("{}", pascal),
                    operation,
                });
            }
        }
        members
    }

    /// Names of the generated builder members, in declaration order.
    pub fn member_names(&self) -> Vec<String> {
        self.members().iter().map(|m| m.method.to_string()).collect()
    }

    /// Serializable summary used by `inspect`.
    pub fn summary(&self) -> PathsSummary {
        PathsSummary {
            name: self.name.to_string(),
            segment: self.segment.to_string(),
            interface: self.interface.as_ref().map(|i| i.to_string()),
            members: self
                .members()
                .iter()
                .map(|m| MemberSummary {
                    name: m.method.to_string(),
                    segment: m.variant.to_string(),
                    arguments: match &m.operation.shape {
                        OperationShape::Unit => 0,
                        OperationShape::Fields(fields) => fields.len(),
                        OperationShape::List { .. } => 1,
                    },
                })
                .collect(),
        }
    }
}

/// Build a paths declaration from a trait and its attribute arguments.
pub fn describe_paths(item: &syn::ItemTrait, args: PathsArgs) -> syn::Result<PathsDeclaration> {
    check_trait_shape(item, "paths")?;

    let segment = match &args.segment {
        Some(segment) => segment.parse::<syn::Ident>()?,
        None => format_ident!("{}Segment", item.ident),
    };
    let interface = args.interface.as_ref().map(|i| i.parse::<syn::Ident>()).transpose()?;

    let mut operations = Vec::new();
    for trait_item in &item.items {
        let TraitItem::Fn(method) = trait_item else {
            return Err(syn::Error::new_spanned(trait_item, "only method signatures are supported in #[paths]"));
        };
        check_signature(method)?;
        if !receiver(method)? {
            return Err(syn::Error::new_spanned(&method.sig, "path operations must take `&self`"));
        }
        if !matches!(method.sig.output, syn::ReturnType::Default) {
            return Err(syn::Error::new_spanned(&method.sig.output, "path operations cannot return a value"));
        }
        for attr in &method.attrs {
            if !attr.path().is_ident("doc") {
                return Err(syn::Error::new_spanned(attr, "unsupported attribute on path operation"));
            }
        }

        let mut fields = Vec::new();
        let mut list = None;
        for input in method.sig.inputs.iter().skip(1) {
            let FnArg::Typed(pat_type) = input else {
                continue;
            };
            let Pat::Ident(pat_ident) = &*pat_type.pat else {
                return Err(syn::Error::new_spanned(&pat_type.pat, "parameters must be plain identifiers"));
            };
            if let Some(attr) = pat_type.attrs.first() {
                return Err(syn::Error::new_spanned(attr, "path operation parameters take no attributes"));
            }
            match &*pat_type.ty {
                Type::Reference(reference) => {
                    let Type::Slice(slice) = &*reference.elem else {
                        return Err(syn::Error::new_spanned(&pat_type.ty, "only `&[T]` may be borrowed"));
                    };
                    if reference.mutability.is_some() {
                        return Err(syn::Error::new_spanned(&pat_type.ty, "list parameters are read-only"));
                    }
                    if list.is_some() {
                        return Err(syn::Error::new_spanned(
                            &method.sig.inputs,
                            "a list operation takes exactly one `&[T]` parameter",
                        ));
                    }
                    list = Some((pat_ident.ident.clone(), (*slice.elem).clone()));
                }
                ty => fields.push((pat_ident.ident.clone(), ty.clone())),
            }
        }

        let shape = match list {
            Some((name, element)) => {
                if !fields.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &method.sig.inputs,
                        "a list operation takes exactly one `&[T]` parameter",
                    ));
                }
                OperationShape::List { name, element }
            }
            None if fields.is_empty() => OperationShape::Unit,
            None => OperationShape::Fields(fields),
        };
        operations.push(PathOperation {
            name: method.sig.ident.clone(),
            shape,
            docs: method.attrs.clone(),
        });
    }

    let declaration = PathsDeclaration {
        name: item.ident.clone(),
        segment,
        interface,
        variants: args.variants,
        operations,
        docs: item.attrs.iter().filter(|a| a.path().is_ident("doc")).cloned().collect(),
        visibility: item.vis.clone(),
    };

    let mut seen = HashSet::new();
    for member in declaration.members() {
        let name = member.method.to_string();
        if RESERVED_MEMBERS.contains(&name.as_str()) {
            return Err(syn::Error::new_spanned(
                &member.operation.name,
                format!("`{}` is reserved by the generated builder", name),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new_spanned(
                &member.operation.name,
                format!("member `{}` is generated twice", name),
            ));
        }
    }
    Ok(declaration)
}

/// Emit the segment enum, builder and optional interface for a paths declaration.
pub fn emit_paths(declaration: &PathsDeclaration) -> TokenStream {
    let name = &declaration.name;
    let segment = &declaration.segment;
    let vis = &declaration.visibility;
    let docs = &declaration.docs;
    let members = declaration.members();

    let variants = members.iter().map(|member| {
        let variant = &member.variant;
        let docs = &member.operation.docs;
        match &member.operation.shape {
            OperationShape::Unit => quote! { #(#docs)* #variant },
            OperationShape::Fields(fields) => {
                let fields = fields.iter().map(|(name, ty)| quote!(#name: #ty));
                quote! { #(#docs)* #variant { #(#fields),* } }
            }
            OperationShape::List { element, .. } => {
                quote! { #(#docs)* #variant(::std::vec::Vec<#element>) }
            }
        }
    });

    let signature = |member: &Member| {
        let method = &member.method;
        match &member.operation.shape {
            OperationShape::Unit => quote! { fn #method(&mut self) -> &mut Self },
            OperationShape::Fields(fields) => {
                let params = fields.iter().map(|(name, ty)| quote!(#name: #ty));
                quote! { fn #method(&mut self, #(#params),*) -> &mut Self }
            }
            OperationShape::List { name, element } => {
                quote! { fn #method(&mut self, #name: impl ::std::iter::IntoIterator<Item = #element>) -> &mut Self }
            }
        }
    };

    let builder_methods = members.iter().map(|member| {
        let variant = &member.variant;
        let sig = signature(member);
        let docs = &member.operation.docs;
        let value = match &member.operation.shape {
            OperationShape::Unit => quote!(#segment::#variant),
            OperationShape::Fields(fields) => {
                let names = fields.iter().map(|(name, _)| name);
                quote!(#segment::#variant { #(#names),* })
            }
            OperationShape::List { name, .. } => {
                quote!(#segment::#variant(#name.into_iter().collect()))
            }
        };
        quote! {
            #(#docs)*
            pub #sig {
                self.segments.push(#value);
                self
            }
        }
    });

    let interface = declaration.interface.as_ref().map(|interface| {
        let trait_methods = members.iter().map(|member| {
            let sig = signature(member);
            quote! { #sig; }
        });
        let delegates = members.iter().map(|member| {
            let sig = signature(member);
            let method = &member.method;
            let args: Vec<TokenStream> = match &member.operation.shape {
                OperationShape::Unit => Vec::new(),
                OperationShape::Fields(fields) => fields.iter().map(|(name, _)| name.to_token_stream()).collect(),
                OperationShape::List { name, .. } => vec![name.to_token_stream()],
            };
            quote! {
                #sig {
                    #name::#method(self, #(#args),*)
                }
            }
        });
        quote! {
            #vis trait #interface {
                #(#trait_methods)*
            }

            impl #interface for #name {
                #(#delegates)*
            }
        }
    });

    quote! {
        #[derive(Debug, Clone, PartialEq)]
        #vis enum #segment {
            #(#variants),*
        }

        #(#docs)*
        #[derive(Debug, Clone, Default, PartialEq)]
        #vis struct #name {
            segments: ::std::vec::Vec<#segment>,
        }

        impl #name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn segments(&self) -> &[#segment] {
                &self.segments
            }

            pub fn len(&self) -> usize {
                self.segments.len()
            }

            pub fn is_empty(&self) -> bool {
                self.segments.is_empty()
            }

            #(#builder_methods)*
        }

        #interface
    }
}
