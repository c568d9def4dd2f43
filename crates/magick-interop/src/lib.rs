// magick-interop: attribute macros for native image library bindings
//
// Provides in-place front ends for the magick-bindgen generator:
// - #[native_interop] - Replaces a declaration trait with its wrapper, entry point trait
//   and mutator
// - #[paths] - Replaces a path operation trait with a segment builder
//
// Example:
// ```
// use magick_interop::native_interop;
//
// #[native_interop(name = "MagickImage")]
// pub trait NativeMagickImage {
//     #[throws]
//     fn create() -> Handle;
// }
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemTrait};

use magick_bindgen::config::TargetMode;
use magick_bindgen::introspect::{describe_interop, InteropArgs};
use magick_bindgen::paths::{describe_paths, emit_paths, PathsArgs};
use magick_bindgen::{EmitOptions, QuantumSelection};

/// Generates native bindings from a trait of method declarations.
///
/// Options: `name = "..."` (native type prefix), `dispose = "..."` (release symbol),
/// `runtime = "..."` (path of the runtime crate, `::magick_core` by default) and
/// `enums(...)` (fieldless enums passed by discriminant).
///
/// Members unsupported on the minimal runtime are guarded by the caller's `minimal`
/// feature, and members carrying pixel samples are emitted once per quantum feature.
///
/// # Example
///
/// ```ignore
/// #[native_interop(name = "MagickImage", enums(Gravity))]
/// pub trait NativeMagickImage {
///     #[throws]
///     fn create() -> Handle;
///
///     #[throws]
///     #[read_instance]
///     fn read_blob(&self, data: &[u8]) -> Handle;
///
///     #[throws]
///     fn crop(&self, geometry: &MagickGeometry, gravity: Gravity) -> Handle;
/// }
/// ```
#[proc_macro_attribute]
pub fn native_interop(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = InteropArgs::default();
    let parser = syn::meta::parser(|meta| args.parse_meta(meta));
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemTrait);

    expand_interop(item, args)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn expand_interop(item: ItemTrait, args: InteropArgs) -> syn::Result<proc_macro2::TokenStream> {
    let runtime = args
        .runtime
        .as_ref()
        .map(|r| r.value())
        .unwrap_or_else(|| EmitOptions::default().runtime);
    let options = EmitOptions {
        runtime,
        target: TargetMode::Conditional,
        quantum: QuantumSelection::All,
        link_native: false,
        ..EmitOptions::default()
    };
    let declaration = describe_interop(&item, args)?;
    magick_bindgen::emit::emit_interop(&declaration, &options)
}

/// Generates a path segment builder from a trait of path operations.
///
/// Options: `variants` (absolute and relative members for every operation taking
/// arguments), `segment = "..."` (segment enum name) and `interface = "..."` (a trait
/// implemented by the builder).
///
/// # Example
///
/// ```ignore
/// #[paths(variants, interface = "PathBuilder")]
/// pub trait Paths {
///     fn line_to(&self, coordinates: &[PointD]);
///     fn close(&self);
/// }
/// ```
#[proc_macro_attribute]
pub fn paths(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = PathsArgs::default();
    let parser = syn::meta::parser(|meta| args.parse_meta(meta));
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemTrait);

    describe_paths(&item, args)
        .map(|declaration| emit_paths(&declaration))
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
