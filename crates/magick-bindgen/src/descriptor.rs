//! Descriptor model
//!
//! Plain data describing one native-call method: its parameters, return type and the
//! behavior flags the emitter acts on. Instance flags are derived in
//! [`MethodDescriptor::new`] and cannot be set independently.

use serde::Serialize;

/// Scalar types passed to the native library unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl PrimitiveType {
    /// Resolve a primitive from its Rust spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "bool" => PrimitiveType::Bool,
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" => PrimitiveType::I32,
            "i64" => PrimitiveType::I64,
            "isize" => PrimitiveType::Isize,
            "u8" => PrimitiveType::U8,
            "u16" => PrimitiveType::U16,
            "u32" => PrimitiveType::U32,
            "u64" => PrimitiveType::U64,
            "usize" => PrimitiveType::Usize,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            _ => return None,
        };
        Some(primitive)
    }

    /// The Rust spelling of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::Isize => "isize",
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::Usize => "usize",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
        }
    }
}

/// Element type of a borrowed slice parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceElement {
    Primitive(PrimitiveType),
    Quantum,
}

impl SliceElement {
    fn name(&self) -> &'static str {
        match self {
            SliceElement::Primitive(primitive) => primitive.as_str(),
            SliceElement::Quantum => "QuantumType",
        }
    }
}

/// The closed set of types a native declaration may use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// No value (`()` or an omitted return type)
    Void,
    /// Scalar passed through unchanged
    Primitive { primitive: PrimitiveType },
    /// `&str` parameter or `String` return
    Str,
    /// Opaque native instance handle
    Handle,
    /// Channel mask, converted to the native bitmask
    Channels,
    /// A single pixel sample of the build-selected quantum type
    Quantum,
    /// `&MagickGeometry`, passed as its canonical string form
    Geometry,
    /// `&DoubleMatrix`, passed as values plus order
    Matrix,
    /// A declared fieldless native enum, passed as its discriminant
    Enum { name: String },
    /// `&[T]` or `&mut [T]`, passed as pointer plus length
    Slice { element: SliceElement, mutable: bool },
}

impl TypeKind {
    fn canonical_name(&self) -> String {
        match self {
            TypeKind::Void => "()".to_string(),
            TypeKind::Primitive { primitive } => primitive.as_str().to_string(),
            TypeKind::Str => "str".to_string(),
            TypeKind::Handle => "Handle".to_string(),
            TypeKind::Channels => "Channels".to_string(),
            TypeKind::Quantum => "QuantumType".to_string(),
            TypeKind::Geometry => "&MagickGeometry".to_string(),
            TypeKind::Matrix => "&DoubleMatrix".to_string(),
            TypeKind::Enum { name } => name.clone(),
            TypeKind::Slice { element, mutable } => {
                if *mutable {
                    format!("&mut [{}]", element.name())
                } else {
                    format!("&[{}]", element.name())
                }
            }
        }
    }
}

/// A parameter or return type, with the flags the emitter needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    is_channel: bool,
    is_quantum: bool,
    not_supported_on_minimal: bool,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind) -> Self {
        let name = kind.canonical_name();
        TypeDescriptor {
            is_channel: matches!(kind, TypeKind::Channels),
            is_quantum: name.contains("QuantumType"),
            // Span types have no entry points on the minimal runtime.
            not_supported_on_minimal: matches!(kind, TypeKind::Slice { .. }),
            name,
            kind,
        }
    }

    pub fn void() -> Self {
        TypeDescriptor::new(TypeKind::Void)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_channel(&self) -> bool {
        self.is_channel
    }

    pub fn is_quantum(&self) -> bool {
        self.is_quantum
    }

    pub fn not_supported_on_minimal(&self) -> bool {
        self.not_supported_on_minimal
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    pub fn is_handle(&self) -> bool {
        matches!(self.kind, TypeKind::Handle)
    }

    /// Whether marshaling a value of this type can fail before the native call.
    pub fn has_fallible_marshal(&self) -> bool {
        matches!(self.kind, TypeKind::Str | TypeKind::Geometry)
    }

    /// Whether a `#[default(..)]` value is allowed for this type.
    pub fn accepts_default(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Primitive { .. } | TypeKind::Channels | TypeKind::Quantum | TypeKind::Enum { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Default value expression, as written in `#[default(..)]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        ParameterDescriptor {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Literal cleanup argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupLiteral {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupArgument {
    /// The current instance handle (`self`)
    Instance,
    /// One of the method's own parameters, forwarded in marshaled form
    Parameter(String),
    Literal(CleanupLiteral),
}

/// A companion native call run after the primary call regardless of its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupDescriptor {
    pub name: String,
    pub arguments: Vec<CleanupArgument>,
}

impl CleanupDescriptor {
    pub fn new(name: impl Into<String>, arguments: Vec<CleanupArgument>) -> Self {
        CleanupDescriptor {
            name: name.into(),
            arguments,
        }
    }
}

/// Markers read from a method declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markers {
    pub throws: bool,
    pub read_instance: bool,
    pub set_instance: bool,
    pub cleanup: Option<CleanupDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescriptor {
    name: String,
    parameters: Vec<ParameterDescriptor>,
    return_type: TypeDescriptor,
    is_static: bool,
    throws: bool,
    uses_instance: bool,
    sets_instance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup: Option<CleanupDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    docs: Vec<String>,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
        return_type: TypeDescriptor,
        is_static: bool,
        markers: Markers,
    ) -> Self {
        MethodDescriptor {
            name: name.into(),
            parameters,
            return_type,
            is_static,
            throws: markers.throws,
            uses_instance: !is_static && !markers.read_instance,
            sets_instance: markers.read_instance || markers.set_instance,
            cleanup: markers.cleanup,
            docs: Vec::new(),
        }
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    pub fn cleanup(&self) -> Option<&CleanupDescriptor> {
        self.cleanup.as_ref()
    }

    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_void(&self) -> bool {
        self.return_type.is_void()
    }

    pub fn throws(&self) -> bool {
        self.throws
    }

    pub fn uses_instance(&self) -> bool {
        self.uses_instance
    }

    pub fn sets_instance(&self) -> bool {
        self.sets_instance
    }

    pub fn produces_instance(&self) -> bool {
        self.return_type.is_handle()
    }

    pub fn uses_channels(&self) -> bool {
        self.return_type.is_channel() || self.parameters.iter().any(|p| p.ty.is_channel())
    }

    pub fn uses_quantum_type(&self) -> bool {
        self.return_type.name().contains("QuantumType")
            || self
                .parameters
                .iter()
                .any(|p| p.ty.name().contains("QuantumType"))
    }

    pub fn not_supported_on_minimal(&self) -> bool {
        self.return_type.not_supported_on_minimal()
            || self
                .parameters
                .iter()
                .any(|p| p.ty.not_supported_on_minimal())
    }

    /// Whether the emitted member returns a `Result`.
    pub fn is_fallible(&self) -> bool {
        self.throws
            || self.cleanup.is_some()
            || self.parameters.iter().any(|p| p.ty.has_fallible_marshal())
    }
}

/// One `#[native_interop]` declaration: a native type and its methods.
#[derive(Debug, Clone, Serialize)]
pub struct InteropDeclaration {
    /// Name of the generated wrapper struct (the declared trait name)
    pub wrapper: String,
    /// Native type prefix used for entry point symbols
    pub native_name: String,
    /// Native symbol releasing an instance
    pub dispose: String,
    pub enums: Vec<String>,
    pub methods: Vec<MethodDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(skip)]
    pub visibility: Option<syn::Visibility>,
}

impl InteropDeclaration {
    /// Name of the generated entry point trait.
    pub fn entries_trait(&self) -> String {
        format!("{}Entries", self.native_name)
    }

    /// Name of the generated mutator struct.
    pub fn mutator(&self) -> String {
        format!("{}Mutator", self.wrapper)
    }

    /// Native symbol for one of this declaration's methods.
    pub fn entry_symbol(&self, method: &MethodDescriptor) -> String {
        format!(
            "{}_{}",
            self.native_name,
            crate::naming::to_pascal_case(method.name())
        )
    }

    /// Methods a mutator exposes: every instance method producing a new handle. Inside a
    /// mutator the handle is bound to the mutator instead of rebinding the wrapper.
    pub fn mutating_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods
            .iter()
            .filter(|m| !m.is_static() && m.produces_instance())
    }
}
