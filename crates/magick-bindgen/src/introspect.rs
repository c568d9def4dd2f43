//! Attribute introspection
//!
//! Reads `#[native_interop]` and `#[paths]` trait declarations and turns them into
//! descriptors. All declaration rules are enforced here, with spans pointing at the
//! offending tokens, so the emitter only ever sees valid input.

use std::collections::{BTreeMap, HashSet};

use quote::ToTokens;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, FnArg, Lit, LitStr, Pat, TraitItem, TraitItemFn, Type, UnOp};

use crate::descriptor::{
    CleanupArgument, CleanupDescriptor, CleanupLiteral, InteropDeclaration, Markers,
    MethodDescriptor, ParameterDescriptor, PrimitiveType, SliceElement, TypeDescriptor, TypeKind,
};
use crate::marshal::cleanup_signature;
use crate::naming::to_snake_case;
use crate::paths::{PathsArgs, PathsDeclaration};

/// Parameter names the generated code uses for its own locals.
const RESERVED_PARAMETERS: &[&str] = &[
    "instance",
    "exception",
    "library",
    "result",
    "cleanup_exception",
    "raw_exception",
];

/// Member names the generated wrapper and mutator define themselves.
const RESERVED_METHODS: &[&str] = &[
    "new",
    "from_handle",
    "library",
    "instance",
    "is_empty",
    "into_handle",
    "mutator",
    "get_result",
    "dispose",
    "state",
];

/// Type names with a fixed meaning that a declared enum may not shadow.
const BUILTIN_TYPES: &[&str] = &[
    "Handle",
    "Channels",
    "QuantumType",
    "String",
    "MagickGeometry",
    "DoubleMatrix",
    "str",
];

/// A declaration found in a source file
#[derive(Debug, Clone)]
pub enum Declaration {
    Interop(InteropDeclaration),
    Paths(PathsDeclaration),
}

/// Arguments of `#[native_interop(...)]`
#[derive(Debug, Default)]
pub struct InteropArgs {
    pub name: Option<LitStr>,
    pub dispose: Option<LitStr>,
    pub runtime: Option<LitStr>,
    pub enums: Vec<syn::Ident>,
}

impl InteropArgs {
    /// Parse one nested meta item; used with `syn::meta::parser` and `parse_nested_meta`.
    pub fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, &meta)
        } else if meta.path.is_ident("dispose") {
            set_once(&mut self.dispose, &meta)
        } else if meta.path.is_ident("runtime") {
            set_once(&mut self.runtime, &meta)
        } else if meta.path.is_ident("enums") {
            meta.parse_nested_meta(|nested| {
                let ident = nested.path.require_ident()?.clone();
                if self.enums.contains(&ident) {
                    return Err(nested.error(format!("enum `{}` is listed twice", ident)));
                }
                if BUILTIN_TYPES.contains(&ident.to_string().as_str())
                    || PrimitiveType::from_name(&ident.to_string()).is_some()
                {
                    return Err(nested.error(format!("`{}` is a built-in type, not an enum", ident)));
                }
                self.enums.push(ident);
                Ok(())
            })
        } else {
            Err(meta.error("unsupported native_interop option (expected name, dispose, runtime or enums)"))
        }
    }
}

fn set_once(slot: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("option specified more than once"));
    }
    let value: LitStr = meta.value()?.parse()?;
    if value.value().trim().is_empty() {
        return Err(syn::Error::new(value.span(), "value cannot be empty"));
    }
    *slot = Some(value);
    Ok(())
}

fn attribute_name(attr: &Attribute) -> Option<String> {
    attr.path().segments.last().map(|s| s.ident.to_string())
}

/// Collect `///` doc lines.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(syn::ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Scan a parsed file for declarations. Items without a declaration attribute are ignored.
pub fn scan_file(file: &syn::File) -> syn::Result<Vec<Declaration>> {
    let mut declarations = Vec::new();
    for item in &file.items {
        let syn::Item::Trait(item) = item else {
            continue;
        };
        let interop = item
            .attrs
            .iter()
            .find(|a| attribute_name(a).as_deref() == Some("native_interop"));
        let paths = item
            .attrs
            .iter()
            .find(|a| attribute_name(a).as_deref() == Some("paths"));

        match (interop, paths) {
            (Some(_), Some(attr)) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a trait cannot be both #[native_interop] and #[paths]",
                ))
            }
            (Some(attr), None) => {
                let mut args = InteropArgs::default();
                if !matches!(attr.meta, syn::Meta::Path(_)) {
                    attr.parse_nested_meta(|meta| args.parse_meta(meta))?;
                }
                declarations.push(Declaration::Interop(describe_interop(item, args)?));
            }
            (None, Some(attr)) => {
                let mut args = PathsArgs::default();
                if !matches!(attr.meta, syn::Meta::Path(_)) {
                    attr.parse_nested_meta(|meta| args.parse_meta(meta))?;
                }
                declarations.push(Declaration::Paths(crate::paths::describe_paths(item, args)?));
            }
            (None, None) => {}
        }
    }
    Ok(declarations)
}

/// Reject trait shapes no generator accepts.
pub(crate) fn check_trait_shape(item: &syn::ItemTrait, marker: &str) -> syn::Result<()> {
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(&item.generics, "declarations cannot be generic"));
    }
    if let Some(unsafety) = &item.unsafety {
        return Err(syn::Error::new_spanned(unsafety, "declarations cannot be unsafe"));
    }
    if let Some(auto) = &item.auto_token {
        return Err(syn::Error::new_spanned(auto, "declarations cannot be auto traits"));
    }
    if !item.supertraits.is_empty() {
        return Err(syn::Error::new_spanned(&item.supertraits, "declarations cannot have supertraits"));
    }
    for attr in &item.attrs {
        let name = attribute_name(attr);
        if attr.path().is_ident("doc") || name.as_deref() == Some(marker) {
            continue;
        }
        return Err(syn::Error::new_spanned(attr, "unsupported attribute on declaration"));
    }
    Ok(())
}

/// Reject method shapes no generator accepts.
pub(crate) fn check_signature(method: &TraitItemFn) -> syn::Result<()> {
    let sig = &method.sig;
    if method.default.is_some() {
        return Err(syn::Error::new_spanned(&method.default, "declarations cannot have a body"));
    }
    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(constness, "declarations cannot be const"));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "declarations cannot be async"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(unsafety, "declarations cannot be unsafe"));
    }
    if let Some(abi) = &sig.abi {
        return Err(syn::Error::new_spanned(abi, "declarations cannot specify an ABI"));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(&sig.generics, "declarations cannot be generic"));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new_spanned(variadic, "declarations cannot be variadic"));
    }
    Ok(())
}

/// Whether the method takes `&self`; any other receiver is an error.
pub(crate) fn receiver(method: &TraitItemFn) -> syn::Result<bool> {
    match method.sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) => {
            if receiver.reference.is_none() || receiver.mutability.is_some() || receiver.colon_token.is_some() {
                return Err(syn::Error::new_spanned(receiver, "instance methods must take `&self`"));
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Build an interop declaration from a trait and its attribute arguments.
pub fn describe_interop(item: &syn::ItemTrait, args: InteropArgs) -> syn::Result<InteropDeclaration> {
    check_trait_shape(item, "native_interop")?;

    let wrapper = item.ident.to_string();
    let native_name = match &args.name {
        Some(name) => name.value(),
        None => match wrapper.strip_prefix("Native") {
            Some(stripped) if !stripped.is_empty() => stripped.to_string(),
            _ => wrapper.clone(),
        },
    };
    let dispose = args
        .dispose
        .as_ref()
        .map(|d| d.value())
        .unwrap_or_else(|| format!("{}_Dispose", native_name));
    let enums: Vec<String> = args.enums.iter().map(|e| e.to_string()).collect();

    let mut methods = Vec::new();
    let mut names = HashSet::new();
    for trait_item in &item.items {
        let TraitItem::Fn(method) = trait_item else {
            return Err(syn::Error::new_spanned(
                trait_item,
                "only method signatures are supported in #[native_interop]",
            ));
        };
        let ident = &method.sig.ident;
        let name = ident.to_string();
        if RESERVED_METHODS.contains(&name.as_str()) {
            return Err(syn::Error::new_spanned(ident, format!("`{}` is reserved by the generated wrapper", name)));
        }
        if name.starts_with("invoke_") {
            return Err(syn::Error::new_spanned(ident, "the `invoke_` prefix is reserved by the generated wrapper"));
        }
        if !names.insert(name.clone()) {
            return Err(syn::Error::new_spanned(ident, format!("method `{}` is declared twice", name)));
        }
        methods.push(describe_method(method, &enums)?);
    }

    let declaration = InteropDeclaration {
        wrapper,
        native_name,
        dispose,
        enums,
        methods,
        docs: doc_lines(&item.attrs),
        visibility: Some(item.vis.clone()),
    };
    check_entry_points(item, &declaration)?;
    Ok(declaration)
}

/// Entry point names must be unique and shared cleanup calls must agree on their shape.
fn check_entry_points(item: &syn::ItemTrait, declaration: &InteropDeclaration) -> syn::Result<()> {
    let span_of = |name: &str| {
        item.items
            .iter()
            .find_map(|i| match i {
                TraitItem::Fn(f) if f.sig.ident == name => Some(f.sig.ident.span()),
                _ => None,
            })
            .unwrap_or_else(|| item.ident.span())
    };

    let mut entries: BTreeMap<String, String> = BTreeMap::new();
    entries.insert(to_snake_case(&declaration.dispose), declaration.dispose.clone());
    for method in &declaration.methods {
        let symbol = declaration.entry_symbol(method);
        if let Some(existing) = entries.insert(to_snake_case(&symbol), symbol.clone()) {
            return Err(syn::Error::new(
                span_of(method.name()),
                format!("entry point `{}` collides with `{}`", symbol, existing),
            ));
        }
    }

    let mut cleanups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for method in &declaration.methods {
        let Some(cleanup) = method.cleanup() else {
            continue;
        };
        let shape = cleanup_signature(method, cleanup);
        match cleanups.get(&cleanup.name) {
            Some(existing) if *existing != shape => {
                return Err(syn::Error::new(
                    span_of(method.name()),
                    format!(
                        "cleanup call `{}` is used with conflicting arguments ({}) and ({})",
                        cleanup.name,
                        existing.join(", "),
                        shape.join(", ")
                    ),
                ));
            }
            Some(_) => {}
            None => {
                if let Some(existing) = entries.get(&to_snake_case(&cleanup.name)) {
                    return Err(syn::Error::new(
                        span_of(method.name()),
                        format!("cleanup call `{}` collides with entry point `{}`", cleanup.name, existing),
                    ));
                }
                cleanups.insert(cleanup.name.clone(), shape);
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Parameter,
    Return,
}

/// Build a descriptor for one declared method.
pub fn describe_method(method: &TraitItemFn, enums: &[String]) -> syn::Result<MethodDescriptor> {
    check_signature(method)?;
    let sig = &method.sig;
    let is_static = !receiver(method)?;

    let mut parameters = Vec::new();
    let mut seen = HashSet::new();
    for input in &sig.inputs {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new_spanned(&pat_type.pat, "parameters must be plain identifiers"));
        };
        if pat_ident.by_ref.is_some() || pat_ident.mutability.is_some() || pat_ident.subpat.is_some() {
            return Err(syn::Error::new_spanned(&pat_type.pat, "parameters must be plain identifiers"));
        }
        let name = pat_ident.ident.to_string();
        if RESERVED_PARAMETERS.contains(&name.as_str()) {
            return Err(syn::Error::new_spanned(
                &pat_ident.ident,
                format!("parameter name `{}` is reserved by the generated code", name),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new_spanned(&pat_ident.ident, format!("parameter `{}` is declared twice", name)));
        }

        let ty = parse_type(&pat_type.ty, Position::Parameter, enums)?;
        let mut param = ParameterDescriptor::new(name, ty);
        for attr in &pat_type.attrs {
            if !attr.path().is_ident("default") {
                return Err(syn::Error::new_spanned(attr, "unsupported parameter attribute (expected #[default(..)])"));
            }
            if param.has_default() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[default] marker"));
            }
            if !param.ty.accepts_default() {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("`{}` parameters cannot have a default value", param.ty.name()),
                ));
            }
            let expr: Expr = attr.parse_args()?;
            param = param.with_default(expr.to_token_stream().to_string());
        }
        parameters.push(param);
    }

    for param in &parameters {
        let companion = match param.ty.kind() {
            TypeKind::Slice { .. } => format!("{}_length", param.name),
            TypeKind::Matrix => format!("{}_order", param.name),
            _ => continue,
        };
        if seen.contains(&companion) {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                format!("parameter `{}` collides with the native companion of `{}`", companion, param.name),
            ));
        }
    }

    let return_type = match &sig.output {
        syn::ReturnType::Default => TypeDescriptor::void(),
        syn::ReturnType::Type(_, ty) => parse_type(ty, Position::Return, enums)?,
    };

    let mut markers = Markers::default();
    let mut cleanup_attr = None;
    for attr in &method.attrs {
        let Some(name) = attribute_name(attr) else {
            continue;
        };
        if attr.path().get_ident().is_none() {
            return Err(syn::Error::new_spanned(attr, "unsupported attribute on declaration method"));
        }
        match name.as_str() {
            "doc" => {}
            "throws" => set_flag(&mut markers.throws, attr)?,
            "read_instance" => set_flag(&mut markers.read_instance, attr)?,
            "set_instance" => set_flag(&mut markers.set_instance, attr)?,
            "cleanup" => {
                if cleanup_attr.is_some() {
                    return Err(syn::Error::new_spanned(attr, "duplicate #[cleanup] marker"));
                }
                cleanup_attr = Some(attr);
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "unsupported attribute (expected throws, cleanup, read_instance or set_instance)",
                ))
            }
        }
    }

    if markers.read_instance && markers.set_instance {
        return Err(syn::Error::new_spanned(&sig.ident, "#[read_instance] and #[set_instance] are mutually exclusive"));
    }
    if (markers.read_instance || markers.set_instance) && is_static {
        return Err(syn::Error::new_spanned(&sig.ident, "instance markers require a `&self` method"));
    }
    if (markers.read_instance || markers.set_instance) && !return_type.is_handle() {
        return Err(syn::Error::new_spanned(&sig.output, "instance markers require a `Handle` return type"));
    }

    let uses_instance = !is_static && !markers.read_instance;
    if let Some(attr) = cleanup_attr {
        markers.cleanup = Some(parse_cleanup(attr, &parameters, uses_instance)?);
    }

    Ok(MethodDescriptor::new(sig.ident.to_string(), parameters, return_type, is_static, markers)
        .with_docs(doc_lines(&method.attrs)))
}

fn set_flag(flag: &mut bool, attr: &Attribute) -> syn::Result<()> {
    attr.meta.require_path_only()?;
    if *flag {
        return Err(syn::Error::new_spanned(attr, "duplicate marker"));
    }
    *flag = true;
    Ok(())
}

fn parse_cleanup(
    attr: &Attribute,
    parameters: &[ParameterDescriptor],
    uses_instance: bool,
) -> syn::Result<CleanupDescriptor> {
    let mut name: Option<LitStr> = None;
    let mut args: Option<LitStr> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            set_once(&mut name, &meta)
        } else if meta.path.is_ident("args") {
            if args.is_some() {
                return Err(meta.error("option specified more than once"));
            }
            args = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported cleanup option (expected name or args)"))
        }
    })?;

    let Some(name) = name else {
        return Err(syn::Error::new_spanned(attr, "#[cleanup] requires `name = \"...\"`"));
    };
    let symbol = name.value();
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        || symbol.starts_with(|c: char| c.is_ascii_digit())
    {
        return Err(syn::Error::new(name.span(), format!("`{}` is not a valid native symbol", symbol)));
    }

    let mut arguments = Vec::new();
    if let Some(args) = args {
        let parsed = args.parse_with(Punctuated::<Expr, syn::Token![,]>::parse_terminated)?;
        for expr in parsed {
            let argument = cleanup_argument(&expr, &args, parameters, uses_instance)?;
            let repeated = !matches!(argument, CleanupArgument::Literal(_)) && arguments.contains(&argument);
            if repeated {
                return Err(syn::Error::new(
                    args.span(),
                    format!("cleanup argument `{}` is forwarded twice", expr.to_token_stream()),
                ));
            }
            arguments.push(argument);
        }
    }
    Ok(CleanupDescriptor::new(symbol, arguments))
}

fn cleanup_argument(
    expr: &Expr,
    args: &LitStr,
    parameters: &[ParameterDescriptor],
    uses_instance: bool,
) -> syn::Result<CleanupArgument> {
    let error = |message: String| syn::Error::new(args.span(), message);
    match expr {
        Expr::Path(path) if path.qself.is_none() && path.path.is_ident("self") => {
            if !uses_instance {
                return Err(error("cleanup argument `self` requires a method that uses the instance".to_string()));
            }
            Ok(CleanupArgument::Instance)
        }
        Expr::Path(path) if path.qself.is_none() => {
            let Some(ident) = path.path.get_ident() else {
                return Err(error(format!("unsupported cleanup argument `{}`", expr.to_token_stream())));
            };
            let name = ident.to_string();
            let Some(param) = parameters.iter().find(|p| p.name == name) else {
                return Err(error(format!("cleanup argument `{}` does not name a parameter", name)));
            };
            if param.ty.is_quantum() {
                return Err(error(format!("cleanup argument `{}` cannot forward a quantum value", name)));
            }
            Ok(CleanupArgument::Parameter(name))
        }
        Expr::Lit(lit) => literal(&lit.lit, false).ok_or_else(|| {
            error(format!("unsupported cleanup literal `{}`", expr.to_token_stream()))
        }),
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match &*unary.expr {
            Expr::Lit(lit) => literal(&lit.lit, true).ok_or_else(|| {
                error(format!("unsupported cleanup literal `{}`", expr.to_token_stream()))
            }),
            _ => Err(error(format!("unsupported cleanup argument `{}`", expr.to_token_stream()))),
        },
        _ => Err(error(format!("unsupported cleanup argument `{}`", expr.to_token_stream()))),
    }
}

fn literal(lit: &Lit, negative: bool) -> Option<CleanupArgument> {
    let literal = match lit {
        Lit::Str(s) if !negative => CleanupLiteral::Str(s.value()),
        Lit::Bool(b) if !negative => CleanupLiteral::Bool(b.value),
        Lit::Int(i) => {
            let value = i.base10_parse::<i64>().ok()?;
            CleanupLiteral::Int(if negative { -value } else { value })
        }
        Lit::Float(f) => {
            let value = f.base10_parse::<f64>().ok()?;
            CleanupLiteral::Float(if negative { -value } else { value })
        }
        _ => return None,
    };
    Some(CleanupArgument::Literal(literal))
}

fn single_ident(ty: &Type) -> Option<&syn::Ident> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if path.path.segments.len() != 1 || !segment.arguments.is_none() {
        return None;
    }
    Some(&segment.ident)
}

fn parse_type(ty: &Type, position: Position, enums: &[String]) -> syn::Result<TypeDescriptor> {
    let unsupported = || syn::Error::new_spanned(ty, format!("unsupported type `{}`", ty.to_token_stream()));
    let parameter_only = |what: &str| {
        syn::Error::new_spanned(ty, format!("`{}` is only supported as a parameter", what))
    };

    match ty {
        Type::Paren(inner) => parse_type(&inner.elem, position, enums),
        Type::Tuple(tuple) if tuple.elems.is_empty() => {
            if position == Position::Parameter {
                return Err(syn::Error::new_spanned(ty, "`()` is not a valid parameter type"));
            }
            Ok(TypeDescriptor::void())
        }
        Type::Reference(reference) => {
            if position == Position::Return {
                return Err(syn::Error::new_spanned(
                    ty,
                    format!("borrowed type `{}` cannot be returned", ty.to_token_stream()),
                ));
            }
            if let Some(lifetime) = &reference.lifetime {
                return Err(syn::Error::new_spanned(lifetime, "explicit lifetimes are not supported"));
            }
            let mutable = reference.mutability.is_some();
            let kind = match &*reference.elem {
                Type::Slice(slice) => {
                    let element = match single_ident(&slice.elem) {
                        Some(ident) if ident == "QuantumType" => SliceElement::Quantum,
                        Some(ident) => match PrimitiveType::from_name(&ident.to_string()) {
                            Some(primitive) => SliceElement::Primitive(primitive),
                            None => return Err(unsupported()),
                        },
                        None => return Err(unsupported()),
                    };
                    TypeKind::Slice { element, mutable }
                }
                elem => {
                    if mutable {
                        return Err(syn::Error::new_spanned(ty, "only slices may be borrowed mutably"));
                    }
                    match single_ident(elem).map(|i| i.to_string()).as_deref() {
                        Some("str") => TypeKind::Str,
                        Some("MagickGeometry") => TypeKind::Geometry,
                        Some("DoubleMatrix") => TypeKind::Matrix,
                        _ => return Err(unsupported()),
                    }
                }
            };
            Ok(TypeDescriptor::new(kind))
        }
        Type::Path(_) => {
            let Some(ident) = single_ident(ty) else {
                return Err(unsupported());
            };
            let name = ident.to_string();
            let kind = match name.as_str() {
                "Handle" => TypeKind::Handle,
                "Channels" => TypeKind::Channels,
                "QuantumType" => TypeKind::Quantum,
                "String" => {
                    if position == Position::Parameter {
                        return Err(syn::Error::new_spanned(ty, "string parameters are declared as `&str`"));
                    }
                    TypeKind::Str
                }
                "str" | "MagickGeometry" | "DoubleMatrix" => {
                    return Err(syn::Error::new_spanned(ty, format!("`{}` must be borrowed (`&{}`)", name, name)))
                }
                _ => {
                    if let Some(primitive) = PrimitiveType::from_name(&name) {
                        TypeKind::Primitive { primitive }
                    } else if enums.contains(&name) {
                        if position == Position::Return {
                            return Err(parameter_only(&name));
                        }
                        TypeKind::Enum { name }
                    } else {
                        return Err(unsupported());
                    }
                }
            };
            Ok(TypeDescriptor::new(kind))
        }
        _ => Err(unsupported()),
    }
}
