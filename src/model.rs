/// Interfaces to the collaborators the resolver consumes or feeds.
///
/// The resolver never owns declarations.  It walks a fully built semantic
/// model through [`DeclarationModel`], maps macro locations through
/// [`SourceMap`], and reports every resolved reference to an
/// [`AnnotationSink`].  All three are read-only from the resolver's point
/// of view (the sink is fire-and-forget), so a single model can be shared by
/// any number of workers.
use std::fmt::Debug;

use crate::types::{SourceLocation, SourceRange, UseFlavor, UseKind};

/// How a type is turned into text for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintPolicy {
    /// Print the type as written, with every scope qualifier.
    Full,
    /// Drop the scope qualifiers of the outermost type name
    /// (`Qt::Orientation` prints as `Orientation`).
    #[default]
    SuppressScope,
}

/// Read-only view of the declaration/type universe of a translation unit.
pub trait DeclarationModel {
    /// Opaque reference to a class/record.
    type Class: Copy + Eq + Debug;
    /// Opaque reference to a method declaration.
    type Method: Copy + Eq + Debug;
    /// A type descriptor.
    type Type: Clone + Debug;

    /// Whether a definition of the class is available.  Forward-declared
    /// classes have no method set and no bases.
    fn is_defined(&self, class: Self::Class) -> bool;

    /// Methods declared directly in `class`, in declaration order.
    fn methods(&self, class: Self::Class) -> Vec<Self::Method>;

    /// The first base class listed in the class head, if any.
    fn first_declared_base(&self, class: Self::Class) -> Option<Self::Class>;

    /// The identifier of a method, or `None` when its name is not a plain
    /// identifier (constructors, destructors, operators, conversions).
    fn method_name(&self, method: Self::Method) -> Option<&str>;

    fn parameter_count(&self, method: Self::Method) -> usize;

    fn parameter_type(&self, method: Self::Method, index: usize) -> Option<Self::Type>;

    /// Number of leading parameters without a default argument.
    fn min_required_arguments(&self, method: Self::Method) -> usize;

    /// The declared return type.  `None` for constructors and destructors.
    fn result_type(&self, method: Self::Method) -> Option<Self::Type>;

    fn printed_text(&self, ty: &Self::Type, policy: PrintPolicy) -> String;

    fn is_reference(&self, ty: &Self::Type) -> bool;

    /// For a reference type, whether the referred-to type is `const`.
    fn is_const_qualified_referent(&self, ty: &Self::Type) -> bool;

    /// The referred-to type of a reference; other types are returned as is.
    fn non_reference(&self, ty: &Self::Type) -> Self::Type;

    /// Drop a top-level `const` qualifier.
    fn strip_local_const(&self, ty: &Self::Type) -> Self::Type;

    /// The class a pointer type points to.
    fn pointee_class(&self, ty: &Self::Type) -> Option<Self::Class>;
}

/// Macro-expansion bookkeeping of the translation unit.
pub trait SourceMap {
    /// The range of the macro invocation that produced `location`, one
    /// expansion level up.  Locations that are not inside a macro expansion
    /// map onto themselves.
    fn immediate_expansion_range(&self, location: SourceLocation) -> SourceRange;

    /// Length in bytes of the token starting at `location`.
    fn token_length(&self, location: SourceLocation) -> u32;
}

/// Receives the references the resolver establishes.
///
/// Implementations must be idempotent per distinct `(declaration, range)`
/// pair.
pub trait AnnotationSink<M> {
    fn register_use(
        &self,
        declaration: M,
        range: SourceRange,
        kind: UseKind,
        context: Option<&str>,
        flavor: UseFlavor,
    );
}
