//! Code emission
//!
//! Turns an [`InteropDeclaration`] into Rust items: the entry point trait, the wrapper
//! owning the current instance handle, the mutator (when any instance method produces a
//! new handle) and optionally the linked `extern "C"` backend.
//!
//! Every generated path into the runtime goes through the configured runtime path, so the
//! same output works inside the runtime crate (`crate`) and outside it (`::magick_core`).

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::config::{EmitOptions, TargetMode};
use crate::descriptor::{CleanupDescriptor, InteropDeclaration, MethodDescriptor};
use crate::marshal::Marshal;
use crate::naming::to_snake_case;
use crate::quantum::QuantumDepth;

/// One emitted copy of a method: a quantum instantiation plus its cfg guards.
struct Member<'a> {
    method: &'a MethodDescriptor,
    depth: Option<QuantumDepth>,
    guards: Vec<TokenStream>,
}

struct Context<'a> {
    declaration: &'a InteropDeclaration,
    rt: syn::Path,
    entries: Ident,
    wrapper: Ident,
    dispose: Ident,
}

impl Context<'_> {
    fn marshal(&self, depth: Option<QuantumDepth>) -> Marshal<'_> {
        Marshal { rt: &self.rt, depth }
    }

    fn entry(&self, method: &MethodDescriptor) -> Ident {
        format_ident!("{}", to_snake_case(&self.declaration.entry_symbol(method)))
    }
}

fn ident(name: &str) -> Ident {
    format_ident!("{}", name)
}

fn docs(lines: &[String]) -> TokenStream {
    quote! { #(#[doc = #lines])* }
}

/// Guard selecting one quantum depth; mirrors the runtime's alias priority.
fn quantum_guard(depth: QuantumDepth) -> TokenStream {
    let q8 = QuantumDepth::Q8.feature();
    let hdri = QuantumDepth::Q16Hdri.feature();
    match depth {
        QuantumDepth::Q8 => quote!(#[cfg(feature = #q8)]),
        QuantumDepth::Q16Hdri => quote!(#[cfg(all(feature = #hdri, not(feature = #q8)))]),
        QuantumDepth::Q16 => quote!(#[cfg(not(any(feature = #q8, feature = #hdri)))]),
    }
}

fn select_members<'a>(declaration: &'a InteropDeclaration, options: &EmitOptions) -> Vec<Member<'a>> {
    let mut members = Vec::new();
    for method in &declaration.methods {
        let mut guards = Vec::new();
        if method.not_supported_on_minimal() {
            match options.target {
                TargetMode::Full => {}
                TargetMode::Minimal => {
                    log::debug!(
                        "skipping {}::{} (not supported on the minimal runtime)",
                        declaration.wrapper,
                        method.name()
                    );
                    continue;
                }
                TargetMode::Conditional => {
                    let feature = &options.minimal_feature;
                    log::debug!(
                        "guarding {}::{} with not(feature = \"{}\")",
                        declaration.wrapper,
                        method.name(),
                        feature
                    );
                    guards.push(quote!(#[cfg(not(feature = #feature))]));
                }
            }
        }

        if method.uses_quantum_type() {
            for depth in options.quantum.variants() {
                let mut guards = guards.clone();
                if options.quantum.is_guarded() {
                    guards.push(quantum_guard(depth));
                }
                members.push(Member {
                    method,
                    depth: Some(depth),
                    guards,
                });
            }
        } else {
            members.push(Member {
                method,
                depth: None,
                guards,
            });
        }
    }
    members
}

/// Emit all items for one interop declaration.
pub fn emit_interop(declaration: &InteropDeclaration, options: &EmitOptions) -> syn::Result<TokenStream> {
    let ctx = Context {
        declaration,
        rt: options.runtime_path()?,
        entries: ident(&declaration.entries_trait()),
        wrapper: ident(&declaration.wrapper),
        dispose: ident(&to_snake_case(&declaration.dispose)),
    };
    let members = select_members(declaration, options);

    // First use of a cleanup call fixes its signature; conflicts were rejected earlier.
    let mut cleanups: BTreeMap<&str, (&MethodDescriptor, &CleanupDescriptor)> = BTreeMap::new();
    for member in &members {
        if let Some(cleanup) = member.method.cleanup() {
            cleanups
                .entry(cleanup.name.as_str())
                .or_insert((member.method, cleanup));
        }
    }

    let entries = emit_entries(&ctx, &members, &cleanups);
    let linked = if options.link_native {
        emit_linked(&ctx, &members, &cleanups, &options.link_feature)
    } else {
        TokenStream::new()
    };
    let wrapper = emit_wrapper(&ctx, &members)?;
    let mutator = emit_mutator(&ctx, &members);

    Ok(quote! {
        #entries
        #linked
        #wrapper
        #mutator
    })
}

fn entry_params(ctx: &Context, member: &Member) -> Vec<TokenStream> {
    let rt = &ctx.rt;
    let marshal = ctx.marshal(member.depth);
    let method = member.method;
    let mut params = Vec::new();
    if method.uses_instance() {
        params.push(quote!(instance: #rt::RawHandle));
    }
    for param in method.parameters() {
        for (name, ty) in marshal.native_params(param) {
            params.push(quote!(#name: #ty));
        }
    }
    if method.throws() {
        params.push(quote!(exception: &mut #rt::ExceptionSlot));
    }
    params
}

fn entry_return(ctx: &Context, member: &Member) -> TokenStream {
    if member.method.is_void() {
        return TokenStream::new();
    }
    let ty = ctx.marshal(member.depth).native_return(member.method.return_type());
    quote!(-> #ty)
}

fn cleanup_params(ctx: &Context, method: &MethodDescriptor, cleanup: &CleanupDescriptor) -> Vec<TokenStream> {
    let rt = &ctx.rt;
    let mut params: Vec<TokenStream> = ctx
        .marshal(None)
        .cleanup_params(method, cleanup)
        .into_iter()
        .map(|(name, ty)| quote!(#name: #ty))
        .collect();
    params.push(quote!(exception: &mut #rt::ExceptionSlot));
    params
}

fn emit_entries(
    ctx: &Context,
    members: &[Member],
    cleanups: &BTreeMap<&str, (&MethodDescriptor, &CleanupDescriptor)>,
) -> TokenStream {
    let rt = &ctx.rt;
    let entries = &ctx.entries;
    let dispose = &ctx.dispose;
    let vis = visibility(ctx.declaration);
    let trait_doc = format!("Native entry points of `{}`.", ctx.declaration.native_name);
    let dispose_doc = format!("`{}`", ctx.declaration.dispose);

    let methods = members.iter().map(|member| {
        let name = ctx.entry(member.method);
        let params = entry_params(ctx, member);
        let ret = entry_return(ctx, member);
        let guards = &member.guards;
        let doc = format!("`{}`", ctx.declaration.entry_symbol(member.method));
        quote! {
            #[doc = #doc]
            #(#guards)*
            fn #name(&self, #(#params),*) #ret;
        }
    });

    let cleanup_methods = cleanups.iter().map(|(symbol, (method, cleanup))| {
        let name = ident(&to_snake_case(symbol));
        let params = cleanup_params(ctx, method, cleanup);
        let doc = format!("`{}`", symbol);
        quote! {
            #[doc = #doc]
            fn #name(&self, #(#params),*);
        }
    });

    quote! {
        #[doc = #trait_doc]
        ///
        /// # Safety
        ///
        /// Pointer arguments are valid for the duration of the call only. String results
        /// must be null or point to a NUL-terminated string that stays valid until the next
        /// call on the same library. Handles returned from producing entries must be owned
        /// by the caller and released only through the dispose entry.
        #[allow(clippy::too_many_arguments)]
        #vis unsafe trait #entries {
            #[doc = #dispose_doc]
            fn #dispose(&self, instance: #rt::RawHandle);
            #(#methods)*
            #(#cleanup_methods)*
        }
    }
}

fn emit_linked(
    ctx: &Context,
    members: &[Member],
    cleanups: &BTreeMap<&str, (&MethodDescriptor, &CleanupDescriptor)>,
    feature: &str,
) -> TokenStream {
    let rt = &ctx.rt;
    let entries = &ctx.entries;
    let dispose = &ctx.dispose;
    let dispose_symbol = &ctx.declaration.dispose;
    let ffi = format_ident!("{}_ffi", to_snake_case(&ctx.declaration.native_name));
    let raw_exception_param = quote!(exception: *mut *mut ::std::ffi::c_void);

    let mut externs = Vec::new();
    let mut impls = Vec::new();

    for member in members {
        let method = member.method;
        let marshal = ctx.marshal(member.depth);
        let name = ctx.entry(method);
        let symbol = ctx.declaration.entry_symbol(method);
        let guards = &member.guards;

        let mut ffi_params = Vec::new();
        let mut ffi_args = Vec::new();
        if method.uses_instance() {
            ffi_params.push(quote!(instance: *mut ::std::ffi::c_void));
            ffi_args.push(quote!(instance.as_ptr()));
        }
        for param in method.parameters() {
            for (param_name, ty) in marshal.ffi_params(param) {
                ffi_params.push(quote!(#param_name: #ty));
            }
            ffi_args.extend(marshal.ffi_args(param));
        }
        if method.throws() {
            ffi_params.push(raw_exception_param.clone());
            ffi_args.push(quote!(&mut raw_exception));
        }

        let ffi_ret = if method.is_void() {
            TokenStream::new()
        } else {
            let ty = marshal.ffi_return(method.return_type());
            quote!(-> #ty)
        };
        externs.push(quote! {
            #(#guards)*
            #[link_name = #symbol]
            pub fn #name(#(#ffi_params),*) #ffi_ret;
        });

        let params = entry_params(ctx, member);
        let ret = entry_return(ctx, member);
        let (prologue, epilogue) = if method.throws() {
            (
                quote!(let mut raw_exception: *mut ::std::ffi::c_void = ::std::ptr::null_mut();),
                quote!(unsafe { exception.capture_raw(raw_exception) };),
            )
        } else {
            (TokenStream::new(), TokenStream::new())
        };
        let value = if method.produces_instance() {
            quote!(#rt::RawHandle::from_ptr(result))
        } else {
            quote!(result)
        };
        impls.push(quote! {
            #(#guards)*
            fn #name(&self, #(#params),*) #ret {
                #prologue
                let result = unsafe { #ffi::#name(#(#ffi_args),*) };
                #epilogue
                #value
            }
        });
    }

    let marshal = ctx.marshal(None);
    for (symbol, (method, cleanup)) in cleanups {
        let name = ident(&to_snake_case(symbol));
        let (ffi_params, ffi_args) = marshal.cleanup_ffi(method, cleanup);
        externs.push(quote! {
            #[link_name = #symbol]
            pub fn #name(#(#ffi_params,)* #raw_exception_param);
        });

        let params = cleanup_params(ctx, method, cleanup);
        impls.push(quote! {
            fn #name(&self, #(#params),*) {
                let mut raw_exception: *mut ::std::ffi::c_void = ::std::ptr::null_mut();
                unsafe { #ffi::#name(#(#ffi_args,)* &mut raw_exception) };
                unsafe { exception.capture_raw(raw_exception) };
            }
        });
    }

    quote! {
        #[cfg(feature = #feature)]
        #[allow(clippy::too_many_arguments)]
        mod #ffi {
            extern "C" {
                #[link_name = #dispose_symbol]
                pub fn #dispose(instance: *mut ::std::ffi::c_void);
                #(#externs)*
            }
        }

        #[cfg(feature = #feature)]
        #[allow(clippy::too_many_arguments, clippy::let_unit_value, clippy::let_and_return)]
        unsafe impl #entries for #rt::LinkedLibrary {
            fn #dispose(&self, instance: #rt::RawHandle) {
                unsafe { #ffi::#dispose(instance.as_ptr()) }
            }
            #(#impls)*
        }
    }
}

fn visibility(declaration: &InteropDeclaration) -> TokenStream {
    match &declaration.visibility {
        Some(vis) => quote!(#vis),
        None => quote!(pub),
    }
}

fn invoke_ident(method: &MethodDescriptor) -> Ident {
    format_ident!("invoke_{}", method.name())
}

fn public_params(ctx: &Context, member: &Member) -> (Vec<TokenStream>, Vec<Ident>) {
    let marshal = ctx.marshal(member.depth);
    let mut params = Vec::new();
    let mut names = Vec::new();
    for param in member.method.parameters() {
        let name = ident(&param.name);
        let ty = marshal.public_param(param);
        params.push(quote!(#name: #ty));
        names.push(name);
    }
    (params, names)
}

/// Result type of the invoke function and of non-rebinding public members.
fn value_type(ctx: &Context, member: &Member) -> TokenStream {
    let rt = &ctx.rt;
    let ty = ctx.marshal(member.depth).invoke_return(member.method.return_type());
    if member.method.is_fallible() {
        quote!(#rt::Result<#ty>)
    } else {
        ty
    }
}

fn emit_invoke(ctx: &Context, member: &Member) -> syn::Result<TokenStream> {
    let rt = &ctx.rt;
    let method = member.method;
    let marshal = ctx.marshal(member.depth);
    let entries = &ctx.entries;
    let dispose = &ctx.dispose;
    let invoke = invoke_ident(method);
    let entry = ctx.entry(method);
    let guards = &member.guards;

    let mut params = vec![quote!(library: &'lib L)];
    if method.uses_instance() {
        params.push(quote!(instance: #rt::RawHandle));
    }
    params.extend(public_params(ctx, member).0);

    let prepare = method
        .parameters()
        .iter()
        .map(|p| marshal.prepare(p))
        .collect::<syn::Result<Vec<_>>>()?;

    let mut args = Vec::new();
    if method.uses_instance() {
        args.push(quote!(instance));
    }
    for param in method.parameters() {
        args.extend(marshal.call_args(param));
    }
    let exception = if method.throws() {
        args.push(quote!(&mut exception));
        quote!(let mut exception = #rt::ExceptionSlot::new();)
    } else {
        TokenStream::new()
    };

    let own = if method.produces_instance() {
        quote!(let result = #rt::OwnedHandle::new(library, result, <L as #entries>::#dispose);)
    } else {
        TokenStream::new()
    };

    let cleanup = match method.cleanup() {
        Some(cleanup) => {
            let name = ident(&to_snake_case(&cleanup.name));
            let cleanup_args = marshal.cleanup_args(method, cleanup);
            quote! {
                let mut cleanup_exception = #rt::ExceptionSlot::new();
                library.#name(#(#cleanup_args,)* &mut cleanup_exception);
            }
        }
        None => TokenStream::new(),
    };

    let status = match (method.throws(), method.cleanup().is_some()) {
        (true, true) => quote!(#rt::ExceptionSlot::finish(::std::option::Option::Some(exception), cleanup_exception)?;),
        (false, true) => quote!(#rt::ExceptionSlot::finish(::std::option::Option::None, cleanup_exception)?;),
        (true, false) => quote!(exception.check()?;),
        (false, false) => TokenStream::new(),
    };

    let convert = marshal.convert_result(method.return_type());
    let ret = value_type(ctx, member);
    let tail = if method.is_fallible() {
        quote!(::std::result::Result::Ok(result))
    } else {
        quote!(result)
    };

    Ok(quote! {
        #(#guards)*
        #[allow(clippy::too_many_arguments, clippy::let_unit_value, clippy::let_and_return, clippy::unit_arg)]
        fn #invoke(#(#params),*) -> #ret {
            #(#prepare)*
            #exception
            let result = library.#entry(#(#args),*);
            #own
            #cleanup
            #status
            #convert
            #tail
        }
    })
}

fn emit_public(ctx: &Context, member: &Member) -> TokenStream {
    let rt = &ctx.rt;
    let method = member.method;
    let name = ident(method.name());
    let invoke = invoke_ident(method);
    let guards = &member.guards;
    let docs = docs(method.docs());
    let (params, names) = public_params(ctx, member);

    if method.is_static() {
        let ret = value_type(ctx, member);
        return quote! {
            #docs
            #(#guards)*
            #[allow(clippy::too_many_arguments)]
            pub fn #name(library: &'lib L, #(#params),*) -> #ret {
                Self::#invoke(library, #(#names),*)
            }
        };
    }

    let instance = if method.uses_instance() {
        quote!(self.instance.raw(),)
    } else {
        TokenStream::new()
    };

    if method.sets_instance() {
        return if method.is_fallible() {
            quote! {
                #docs
                #(#guards)*
                #[allow(clippy::too_many_arguments)]
                pub fn #name(&mut self, #(#params),*) -> #rt::Result<()> {
                    let result = Self::#invoke(self.library, #instance #(#names),*)?;
                    self.instance.replace(result);
                    ::std::result::Result::Ok(())
                }
            }
        } else {
            quote! {
                #docs
                #(#guards)*
                #[allow(clippy::too_many_arguments)]
                pub fn #name(&mut self, #(#params),*) {
                    let result = Self::#invoke(self.library, #instance #(#names),*);
                    self.instance.replace(result);
                }
            }
        };
    }

    let ret = value_type(ctx, member);
    quote! {
        #docs
        #(#guards)*
        #[allow(clippy::too_many_arguments)]
        pub fn #name(&self, #(#params),*) -> #ret {
            Self::#invoke(self.library, #instance #(#names),*)
        }
    }
}

fn has_mutator(declaration: &InteropDeclaration, members: &[Member]) -> bool {
    members
        .iter()
        .any(|m| declaration.mutating_methods().any(|d| std::ptr::eq(d, m.method)))
}

fn emit_wrapper(ctx: &Context, members: &[Member]) -> syn::Result<TokenStream> {
    let rt = &ctx.rt;
    let entries = &ctx.entries;
    let wrapper = &ctx.wrapper;
    let dispose = &ctx.dispose;
    let vis = visibility(ctx.declaration);
    let wrapper_docs = docs(&ctx.declaration.docs);
    let wrapper_name = wrapper.to_string();

    let invokes = members
        .iter()
        .map(|m| emit_invoke(ctx, m))
        .collect::<syn::Result<Vec<_>>>()?;
    let publics = members.iter().map(|m| emit_public(ctx, m));

    let mutator_accessor = if has_mutator(ctx.declaration, members) {
        let mutator = ident(&ctx.declaration.mutator());
        quote! {
            /// Start a single mutating operation on the current instance.
            pub fn mutator(&self) -> #mutator<'_, 'lib, L> {
                #mutator::new(self)
            }
        }
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #wrapper_docs
        #vis struct #wrapper<'lib, L: #entries> {
            library: &'lib L,
            instance: #rt::OwnedHandle<'lib, L>,
        }

        impl<'lib, L: #entries> #wrapper<'lib, L> {
            /// Create a wrapper that does not own an instance yet.
            pub fn new(library: &'lib L) -> Self {
                Self {
                    library,
                    instance: #rt::OwnedHandle::null(library, <L as #entries>::#dispose),
                }
            }

            /// Take ownership of an existing instance.
            pub fn from_handle(handle: #rt::OwnedHandle<'lib, L>) -> Self {
                let library = handle.library();
                let raw = handle.into_raw();
                Self {
                    library,
                    instance: #rt::OwnedHandle::new(library, raw, <L as #entries>::#dispose),
                }
            }

            pub fn library(&self) -> &'lib L {
                self.library
            }

            pub fn instance(&self) -> #rt::RawHandle {
                self.instance.raw()
            }

            pub fn is_empty(&self) -> bool {
                self.instance.is_null()
            }

            /// Give up the wrapper and keep the instance alive.
            pub fn into_handle(self) -> #rt::OwnedHandle<'lib, L> {
                self.instance
            }

            #mutator_accessor

            #(#publics)*

            #(#invokes)*
        }

        impl<'lib, L: #entries> ::std::fmt::Debug for #wrapper<'lib, L> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(#wrapper_name)
                    .field("instance", &self.instance.raw())
                    .finish()
            }
        }
    })
}

fn emit_mutator(ctx: &Context, members: &[Member]) -> TokenStream {
    if !has_mutator(ctx.declaration, members) {
        return TokenStream::new();
    }
    let rt = &ctx.rt;
    let entries = &ctx.entries;
    let wrapper = &ctx.wrapper;
    let vis = visibility(ctx.declaration);
    let mutator = ident(&ctx.declaration.mutator());
    let doc = format!(
        "Runs exactly one mutating operation on a `{}` and holds the produced instance until it is claimed or disposed.",
        wrapper
    );

    let methods = members
        .iter()
        .filter(|m| ctx.declaration.mutating_methods().any(|d| std::ptr::eq(d, m.method)))
        .map(|member| {
            let method = member.method;
            let name = ident(method.name());
            let invoke = invoke_ident(method);
            let guards = &member.guards;
            let docs = docs(method.docs());
            let (params, names) = public_params(ctx, member);
            let propagate = if method.is_fallible() {
                quote!(?)
            } else {
                TokenStream::new()
            };
            let instance = if method.uses_instance() {
                quote!(self.native.instance.raw(),)
            } else {
                TokenStream::new()
            };
            quote! {
                #docs
                #(#guards)*
                #[allow(clippy::too_many_arguments)]
                pub fn #name(&mut self, #(#params),*) -> #rt::Result<()> {
                    self.result.ensure_unbound()?;
                    let result = #wrapper::<'lib, L>::#invoke(self.native.library, #instance #(#names),*)#propagate;
                    self.result.bind_from(self.native.instance.raw(), result)
                }
            }
        });

    quote! {
        #[doc = #doc]
        #vis struct #mutator<'w, 'lib, L: #entries> {
            native: &'w #wrapper<'lib, L>,
            result: #rt::Mutator<'lib, L>,
        }

        impl<'w, 'lib, L: #entries> #mutator<'w, 'lib, L> {
            pub fn new(native: &'w #wrapper<'lib, L>) -> Self {
                Self {
                    native,
                    result: #rt::Mutator::new(),
                }
            }

            /// Move the produced instance out; `None` unless an operation produced one and it
            /// has not been claimed or disposed.
            pub fn get_result(&mut self) -> ::std::option::Option<#rt::OwnedHandle<'lib, L>> {
                self.result.take()
            }

            /// Release the produced instance if it was never claimed.
            pub fn dispose(&mut self) {
                self.result.dispose();
            }

            pub fn state(&self) -> #rt::MutatorState {
                self.result.state()
            }

            #(#methods)*
        }

        impl<'w, 'lib, L: #entries> ::std::fmt::Debug for #mutator<'w, 'lib, L> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(::std::stringify!(#mutator))
                    .field("native", self.native)
                    .field("state", &self.result.state())
                    .finish()
            }
        }
    }
}
