/// Data types used throughout the resolver.
///
/// This module contains the "model" structs and enums that describe a call
/// expression as the indexer hands it over: the callee's owning class and
/// name, its argument operands, string literals with their source ranges,
/// and the kind/flavour tags attached to every registered use.
use serde::{Deserialize, Serialize};

/// A file offset.  Macro-expansion bookkeeping maps one location to another
/// through [`crate::model::SourceMap`].
pub type SourceLocation = u32;

/// A half-open range of file offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        Self { begin, end }
    }
}

/// A string literal operand, e.g. the expansion of `SIGNAL(valueChanged(int))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    /// The literal's content after concatenation (e.g. `"2valueChanged(int)"`).
    pub value: String,
    /// Width in bytes of one character.  Only narrow (1-byte) literals are
    /// considered.
    #[serde(default = "narrow_width")]
    pub char_width: u8,
    /// The range covering the whole literal expression.
    pub range: SourceRange,
    /// Locations of the individual string tokens the literal was
    /// concatenated from.  Empty or a single entry for a plain literal.
    #[serde(default)]
    pub tokens: Vec<SourceLocation>,
}

fn narrow_width() -> u8 {
    1
}

impl StringLiteral {
    /// Build a narrow, non-concatenated literal.
    pub fn new(value: impl Into<String>, range: SourceRange) -> Self {
        Self {
            value: value.into(),
            char_width: 1,
            range,
            tokens: Vec::new(),
        }
    }

    /// Number of string tokens this literal was assembled from.
    pub fn concatenated(&self) -> usize {
        self.tokens.len().max(1)
    }
}

/// One argument (or the implicit object) of a call expression, already
/// stripped of implicit casts.
///
/// `C` is the class handle of the declaration model the operand refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand<C> {
    /// An expression whose type is a class, or a pointer to one.
    /// `class` is `None` when the type is not a known record.
    Object {
        class: Option<C>,
        #[serde(default)]
        pointer: bool,
    },
    /// A string literal.
    Literal(StringLiteral),
    /// A direct call to a free function, e.g. `qFlagLocation("2foo()")`.
    Call {
        callee: String,
        #[serde(default)]
        args: Vec<Operand<C>>,
    },
    /// Anything else.
    Other,
}

impl<C> Operand<C> {
    /// Convert the class handles of this operand (recursively).
    pub fn map_class<D>(self, f: &mut impl FnMut(C) -> Option<D>) -> Operand<D> {
        match self {
            Operand::Object { class, pointer } => Operand::Object {
                class: class.and_then(&mut *f),
                pointer,
            },
            Operand::Literal(lit) => Operand::Literal(lit),
            Operand::Call { callee, args } => Operand::Call {
                callee,
                args: args.into_iter().map(|a| a.map_class(&mut *f)).collect(),
            },
            Operand::Other => Operand::Other,
        }
    }
}

/// The shape of the call expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// A call to a static member function (`QObject::connect(...)`).
    Static,
    /// A call to a non-static member function (`obj->connect(...)`).
    Member,
    /// A constructor invocation (`new QShortcut(...)`).
    Construct,
}

/// A call expression whose callee is a member function or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite<C> {
    /// Name of the class declaring the callee (e.g. `"QObject"`).
    #[serde(rename = "class")]
    pub class_name: String,
    /// Name of the callee (e.g. `"connect"`).  For constructors this is the
    /// class name again.
    #[serde(rename = "method", default)]
    pub method_name: String,
    pub kind: CallKind,
    /// Number of parameters the callee declares.  Some overload families
    /// (`QMenu::addAction`) are told apart by this rather than by the
    /// argument count.
    #[serde(default)]
    pub declared_params: usize,
    #[serde(default)]
    pub args: Vec<Operand<C>>,
    /// The object a member call is invoked on (`this` when implicit).
    #[serde(default)]
    pub implicit_object: Option<Operand<C>>,
    /// The enclosing function the use is attributed to.
    #[serde(default)]
    pub context: Option<String>,
}

impl<C> CallSite<C> {
    /// Convert the class handles of every operand.
    pub fn map_class<D>(self, mut f: impl FnMut(C) -> Option<D>) -> CallSite<D> {
        CallSite {
            class_name: self.class_name,
            method_name: self.method_name,
            kind: self.kind,
            declared_params: self.declared_params,
            args: self.args.into_iter().map(|a| a.map_class(&mut f)).collect(),
            implicit_object: self.implicit_object.map(|o| o.map_class(&mut f)),
            context: self.context,
        }
    }
}

/// What kind of reference a registered use is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseKind {
    Call,
}

/// How the declaration is used at the registered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseFlavor {
    /// The address of the member is taken rather than the member called
    /// directly, which is how a string-named signal or slot is referenced.
    UseAddress,
}
