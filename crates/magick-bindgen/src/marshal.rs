// Parameter marshaling rules
//
// Maps each descriptor type to the tokens the emitter needs at four sites: the public
// member signature, the entry point signature, the `extern "C"` signature and the
// arguments of the native call itself.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::descriptor::{
    CleanupArgument, CleanupDescriptor, CleanupLiteral, MethodDescriptor, ParameterDescriptor,
    PrimitiveType, SliceElement, TypeDescriptor, TypeKind,
};
use crate::quantum::QuantumDepth;

/// Token context for one emitted member.
pub(crate) struct Marshal<'a> {
    pub rt: &'a syn::Path,
    /// Depth substituted for `QuantumType`; `None` keeps the runtime alias
    pub depth: Option<QuantumDepth>,
}

fn primitive_tokens(primitive: PrimitiveType) -> TokenStream {
    let ident = format_ident!("{}", primitive.as_str());
    quote!(#ident)
}

impl Marshal<'_> {
    fn quantum(&self) -> TokenStream {
        match self.depth {
            Some(depth) => {
                let ident = format_ident!("{}", depth.rust_type());
                quote!(#ident)
            }
            None => {
                let rt = self.rt;
                quote!(#rt::QuantumType)
            }
        }
    }

    fn element(&self, element: SliceElement) -> TokenStream {
        match element {
            SliceElement::Primitive(primitive) => primitive_tokens(primitive),
            SliceElement::Quantum => self.quantum(),
        }
    }

    /// Type of a parameter in the public member signature.
    pub fn public_param(&self, param: &ParameterDescriptor) -> TokenStream {
        let ty = self.public_value(&param.ty);
        if param.has_default() {
            quote!(::std::option::Option<#ty>)
        } else {
            ty
        }
    }

    fn public_value(&self, ty: &TypeDescriptor) -> TokenStream {
        let rt = self.rt;
        match ty.kind() {
            TypeKind::Void => quote!(()),
            TypeKind::Primitive { primitive } => primitive_tokens(*primitive),
            TypeKind::Str => quote!(&str),
            TypeKind::Handle => quote!(#rt::RawHandle),
            TypeKind::Channels => quote!(#rt::Channels),
            TypeKind::Quantum => self.quantum(),
            TypeKind::Geometry => quote!(&#rt::MagickGeometry),
            TypeKind::Matrix => quote!(&#rt::DoubleMatrix),
            TypeKind::Enum { name } => {
                let ident = format_ident!("{}", name);
                quote!(#ident)
            }
            TypeKind::Slice { element, mutable } => {
                let element = self.element(*element);
                if *mutable {
                    quote!(&mut [#element])
                } else {
                    quote!(&[#element])
                }
            }
        }
    }

    /// Value type returned by the private invoke function (handles stay owned).
    pub fn invoke_return(&self, ty: &TypeDescriptor) -> TokenStream {
        let rt = self.rt;
        match ty.kind() {
            TypeKind::Handle => quote!(#rt::OwnedHandle<'lib, L>),
            TypeKind::Str => quote!(::std::option::Option<::std::string::String>),
            _ => self.public_value(ty),
        }
    }

    /// Type returned by an entry point.
    pub fn native_return(&self, ty: &TypeDescriptor) -> TokenStream {
        let rt = self.rt;
        match ty.kind() {
            TypeKind::Str => quote!(*const ::std::ffi::c_char),
            TypeKind::Channels => quote!(u64),
            TypeKind::Handle => quote!(#rt::RawHandle),
            _ => self.public_value(ty),
        }
    }

    /// Type returned by the `extern "C"` declaration.
    pub fn ffi_return(&self, ty: &TypeDescriptor) -> TokenStream {
        match ty.kind() {
            TypeKind::Handle => quote!(*mut ::std::ffi::c_void),
            _ => self.native_return(ty),
        }
    }

    /// Entry point parameters for one declared parameter.
    pub fn native_params(&self, param: &ParameterDescriptor) -> Vec<(Ident, TokenStream)> {
        let name = format_ident!("{}", param.name);
        let rt = self.rt;
        match param.ty.kind() {
            TypeKind::Str | TypeKind::Geometry => vec![(name, quote!(*const ::std::ffi::c_char))],
            TypeKind::Channels => vec![(name, quote!(u64))],
            TypeKind::Enum { .. } => vec![(name, quote!(i32))],
            TypeKind::Handle => vec![(name, quote!(#rt::RawHandle))],
            TypeKind::Matrix => vec![
                (name, quote!(*const f64)),
                (format_ident!("{}_order", param.name), quote!(usize)),
            ],
            TypeKind::Slice { element, mutable } => {
                let element = self.element(*element);
                let pointer = if *mutable {
                    quote!(*mut #element)
                } else {
                    quote!(*const #element)
                };
                vec![
                    (name, pointer),
                    (format_ident!("{}_length", param.name), quote!(usize)),
                ]
            }
            _ => vec![(name, self.public_value(&param.ty))],
        }
    }

    /// `extern "C"` parameters for one declared parameter.
    pub fn ffi_params(&self, param: &ParameterDescriptor) -> Vec<(Ident, TokenStream)> {
        self.native_params(param)
            .into_iter()
            .map(|(name, ty)| match param.ty.kind() {
                TypeKind::Handle => (name, quote!(*mut ::std::ffi::c_void)),
                _ => (name, ty),
            })
            .collect()
    }

    /// Expressions converting entry point arguments to `extern "C"` arguments.
    pub fn ffi_args(&self, param: &ParameterDescriptor) -> Vec<TokenStream> {
        self.native_params(param)
            .into_iter()
            .map(|(name, _)| match param.ty.kind() {
                TypeKind::Handle => quote!(#name.as_ptr()),
                _ => quote!(#name),
            })
            .collect()
    }

    /// Statements run before the native call: default resolution and string conversion.
    pub fn prepare(&self, param: &ParameterDescriptor) -> syn::Result<TokenStream> {
        let name = format_ident!("{}", param.name);
        let label = &param.name;
        let rt = self.rt;
        let default = match param.default.as_deref() {
            Some(expr) => {
                let expr: syn::Expr = syn::parse_str(expr).map_err(|e| {
                    syn::Error::new(
                        e.span(),
                        format!("invalid default value for `{}`: {}", param.name, e),
                    )
                })?;
                Some(quote! { let #name = #name.unwrap_or(#expr); })
            }
            None => None,
        };
        let convert = match param.ty.kind() {
            TypeKind::Str => Some(quote! {
                let #name = #rt::marshal::to_c_string(#label, #name)?;
            }),
            TypeKind::Geometry => Some(quote! {
                let #name = #rt::marshal::geometry_to_c_string(#label, #name)?;
            }),
            _ => None,
        };
        Ok(quote! { #default #convert })
    }

    /// Arguments passed to the entry point for one declared parameter.
    pub fn call_args(&self, param: &ParameterDescriptor) -> Vec<TokenStream> {
        let name = format_ident!("{}", param.name);
        match param.ty.kind() {
            TypeKind::Str | TypeKind::Geometry => vec![quote!(#name.as_ptr())],
            TypeKind::Channels => vec![quote!(#name.to_native())],
            TypeKind::Enum { .. } => vec![quote!(#name as i32)],
            TypeKind::Matrix => vec![quote!(#name.values().as_ptr()), quote!(#name.order())],
            TypeKind::Slice { mutable: true, .. } => {
                vec![quote!(#name.as_mut_ptr()), quote!(#name.len())]
            }
            TypeKind::Slice { mutable: false, .. } => {
                vec![quote!(#name.as_ptr()), quote!(#name.len())]
            }
            _ => vec![quote!(#name)],
        }
    }

    /// Conversion applied to the native result after status checks.
    pub fn convert_result(&self, ty: &TypeDescriptor) -> Option<TokenStream> {
        let rt = self.rt;
        match ty.kind() {
            TypeKind::Str => Some(quote! {
                let result = unsafe { #rt::marshal::string_from_native(result) };
            }),
            TypeKind::Channels => Some(quote! {
                let result = #rt::Channels::from_native(result);
            }),
            _ => None,
        }
    }

    /// Entry point parameters of a cleanup call, excluding the exception slot.
    pub fn cleanup_params(
        &self,
        method: &MethodDescriptor,
        cleanup: &CleanupDescriptor,
    ) -> Vec<(Ident, TokenStream)> {
        let rt = self.rt;
        let mut params = Vec::new();
        for (index, argument) in cleanup.arguments.iter().enumerate() {
            match argument {
                CleanupArgument::Instance => params.push((format_ident!("instance"), quote!(#rt::RawHandle))),
                CleanupArgument::Parameter(name) => {
                    if let Some(param) = method.parameter(name) {
                        params.extend(self.native_params(param));
                    }
                }
                CleanupArgument::Literal(literal) => {
                    params.push((format_ident!("value{}", index), literal_type(literal)));
                }
            }
        }
        params
    }

    /// `extern "C"` parameters of a cleanup call and the arguments forwarded to them,
    /// excluding the exception slot.
    pub fn cleanup_ffi(
        &self,
        method: &MethodDescriptor,
        cleanup: &CleanupDescriptor,
    ) -> (Vec<TokenStream>, Vec<TokenStream>) {
        let mut params = Vec::new();
        let mut args = Vec::new();
        for (index, argument) in cleanup.arguments.iter().enumerate() {
            match argument {
                CleanupArgument::Instance => {
                    params.push(quote!(instance: *mut ::std::ffi::c_void));
                    args.push(quote!(instance.as_ptr()));
                }
                CleanupArgument::Parameter(name) => {
                    if let Some(param) = method.parameter(name) {
                        params.extend(self.ffi_params(param).into_iter().map(|(name, ty)| quote!(#name: #ty)));
                        args.extend(self.ffi_args(param));
                    }
                }
                CleanupArgument::Literal(literal) => {
                    let name = format_ident!("value{}", index);
                    let ty = literal_type(literal);
                    params.push(quote!(#name: #ty));
                    args.push(quote!(#name));
                }
            }
        }
        (params, args)
    }

    /// Arguments of a cleanup call, excluding the exception slot.
    pub fn cleanup_args(&self, method: &MethodDescriptor, cleanup: &CleanupDescriptor) -> Vec<TokenStream> {
        let mut args = Vec::new();
        for argument in &cleanup.arguments {
            match argument {
                CleanupArgument::Instance => args.push(quote!(instance)),
                CleanupArgument::Parameter(name) => {
                    if let Some(param) = method.parameter(name) {
                        args.extend(self.call_args(param));
                    }
                }
                CleanupArgument::Literal(literal) => args.push(literal_value(literal)),
            }
        }
        args
    }
}

fn literal_type(literal: &CleanupLiteral) -> TokenStream {
    match literal {
        CleanupLiteral::Str(_) => quote!(*const ::std::ffi::c_char),
        CleanupLiteral::Int(_) => quote!(i64),
        CleanupLiteral::Float(_) => quote!(f64),
        CleanupLiteral::Bool(_) => quote!(bool),
    }
}

fn literal_value(literal: &CleanupLiteral) -> TokenStream {
    match literal {
        CleanupLiteral::Str(value) => {
            quote!(::std::concat!(#value, "\0").as_ptr().cast::<::std::ffi::c_char>())
        }
        CleanupLiteral::Int(value) => {
            let lit = proc_macro2::Literal::i64_suffixed(*value);
            quote!(#lit)
        }
        CleanupLiteral::Float(value) => {
            let lit = proc_macro2::Literal::f64_suffixed(*value);
            quote!(#lit)
        }
        CleanupLiteral::Bool(value) => quote!(#value),
    }
}

/// Depth-independent shape of a cleanup call, used to detect conflicting declarations.
pub(crate) fn cleanup_signature(method: &MethodDescriptor, cleanup: &CleanupDescriptor) -> Vec<String> {
    let mut shape = Vec::new();
    for argument in &cleanup.arguments {
        match argument {
            CleanupArgument::Instance => shape.push("handle".to_string()),
            CleanupArgument::Parameter(name) => {
                let Some(param) = method.parameter(name) else {
                    continue;
                };
                match param.ty.kind() {
                    TypeKind::Str | TypeKind::Geometry => shape.push("c_str".to_string()),
                    TypeKind::Channels => shape.push("u64".to_string()),
                    TypeKind::Enum { .. } => shape.push("i32".to_string()),
                    TypeKind::Handle => shape.push("handle".to_string()),
                    TypeKind::Matrix => {
                        shape.push("*const f64".to_string());
                        shape.push("usize".to_string());
                    }
                    TypeKind::Slice { .. } => {
                        let pointer = param.ty.name().replace("&mut [", "*mut ").replace("&[", "*const ");
                        shape.push(pointer.trim_end_matches(']').to_string());
                        shape.push("usize".to_string());
                    }
                    _ => shape.push(param.ty.name().to_string()),
                }
            }
            CleanupArgument::Literal(literal) => {
                let name = match literal {
                    CleanupLiteral::Str(_) => "c_str",
                    CleanupLiteral::Int(_) => "i64",
                    CleanupLiteral::Float(_) => "f64",
                    CleanupLiteral::Bool(_) => "bool",
                };
                shape.push(name.to_string());
            }
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Markers, MethodDescriptor};

    fn rt() -> syn::Path {
        syn::parse_str("crate").unwrap()
    }

    fn render(tokens: &[TokenStream]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_slice_becomes_pointer_and_length() {
        let rt = rt();
        let marshal = Marshal {
            rt: &rt,
            depth: Some(QuantumDepth::Q8),
        };
        let param = ParameterDescriptor::new(
            "pixels",
            TypeDescriptor::new(TypeKind::Slice {
                element: SliceElement::Quantum,
                mutable: true,
            }),
        );
        let params: Vec<_> = marshal
            .native_params(&param)
            .into_iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect();
        assert_eq!(params, vec!["pixels: * mut u8", "pixels_length: usize"]);
        assert_eq!(
            render(&marshal.call_args(&param)),
            vec!["pixels . as_mut_ptr ()", "pixels . len ()"]
        );
    }

    #[test]
    fn test_default_is_applied_before_call() {
        let rt = rt();
        let marshal = Marshal { rt: &rt, depth: None };
        let sigma = TypeDescriptor::new(TypeKind::Primitive {
            primitive: PrimitiveType::F64,
        });
        let param = ParameterDescriptor::new("sigma", sigma.clone()).with_default("1.5");
        let prepared: String = marshal
            .prepare(&param)
            .unwrap()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(prepared, "letsigma=sigma.unwrap_or(1.5);");

        let broken = ParameterDescriptor::new("sigma", sigma).with_default("1.5 +");
        let error = marshal.prepare(&broken).unwrap_err();
        assert!(error.to_string().contains("invalid default value for `sigma`"));
    }

    #[test]
    fn test_cleanup_handles_cross_as_pointers() {
        let rt = rt();
        let marshal = Marshal { rt: &rt, depth: None };
        let method = MethodDescriptor::new(
            "append_list",
            vec![ParameterDescriptor::new("images", TypeDescriptor::new(TypeKind::Handle))],
            TypeDescriptor::new(TypeKind::Handle),
            true,
            Markers::default(),
        );
        let cleanup = CleanupDescriptor::new(
            "MagickImageCollection_Dispose",
            vec![
                CleanupArgument::Parameter("images".to_string()),
                CleanupArgument::Literal(CleanupLiteral::Bool(true)),
            ],
        );
        let (params, args) = marshal.cleanup_ffi(&method, &cleanup);
        let compact = |tokens: &[TokenStream]| -> Vec<String> {
            render(tokens)
                .into_iter()
                .map(|t| t.chars().filter(|c| !c.is_whitespace()).collect())
                .collect()
        };
        assert_eq!(compact(&params), vec!["images:*mut::std::ffi::c_void", "value1:bool"]);
        assert_eq!(compact(&args), vec!["images.as_ptr()", "value1"]);
    }

    #[test]
    fn test_cleanup_signature_ignores_names() {
        let str_param = |name: &str| ParameterDescriptor::new(name, TypeDescriptor::new(TypeKind::Str));
        let cleanup = |arg: &str| {
            CleanupDescriptor::new(
                "Remove",
                vec![CleanupArgument::Instance, CleanupArgument::Parameter(arg.to_string())],
            )
        };
        let first = MethodDescriptor::new("a", vec![str_param("key")], TypeDescriptor::void(), false, Markers::default());
        let second = MethodDescriptor::new("b", vec![str_param("name")], TypeDescriptor::void(), false, Markers::default());
        assert_eq!(
            cleanup_signature(&first, &cleanup("key")),
            cleanup_signature(&second, &cleanup("name"))
        );
        let literal = CleanupDescriptor::new(
            "Remove",
            vec![
                CleanupArgument::Instance,
                CleanupArgument::Literal(CleanupLiteral::Str("x".to_string())),
            ],
        );
        assert_eq!(cleanup_signature(&first, &literal), vec!["handle", "c_str"]);
    }
}
