/// In-memory declaration universe.
///
/// A [`Universe`] is a flattened, immutable snapshot of the classes of one
/// translation unit: their bases, their methods in declaration
/// order and the parameter types of those methods.  It implements
/// [`DeclarationModel`] and [`SourceMap`], so the resolver can run without a
/// compiler front end attached, which is how the `slotref` binary and the
/// tests drive it.
///
/// Class and method names are interned with `ustr`; handles are plain
/// indices.
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ustr::{Ustr, ustr};

use crate::error::LoadError;
use crate::model::{DeclarationModel, PrintPolicy, SourceMap};
use crate::types::{SourceLocation, SourceRange};

/// Handle to a class of a [`Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

/// Handle to a method of a [`Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u32);

/// A parameter or return type.
///
/// `const` qualifies the named type; `pointer` counts the `*` declarators
/// applied to it; `reference` marks an outermost `&`.  So
/// `const QString &` is `{ name: "QString", const: true, reference: true }`
/// and `QObject *` is `{ name: "QObject", pointer: 1 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TypeDesc {
    pub name: String,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default)]
    pub pointer: u8,
    #[serde(default)]
    pub reference: bool,
}

impl TypeDesc {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `const T &`
    pub fn const_ref(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_const: true,
            reference: true,
            ..Self::default()
        }
    }

    /// `T *`
    pub fn pointer_to(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: 1,
            ..Self::default()
        }
    }

    /// Print the type the way a compiler front end does:
    /// `const QString &`, `QObject *`, `unsigned int`.
    pub fn print(&self, policy: PrintPolicy) -> String {
        let name = match policy {
            PrintPolicy::Full => self.name.as_str(),
            PrintPolicy::SuppressScope => unqualified(&self.name),
        };
        let mut out = String::with_capacity(name.len() + 8);
        if self.is_const {
            out.push_str("const ");
        }
        out.push_str(name);
        if self.pointer > 0 {
            out.push(' ');
            for _ in 0..self.pointer {
                out.push('*');
            }
        }
        if self.reference {
            out.push_str(" &");
        }
        out
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(PrintPolicy::Full))
    }
}

/// Drop the scope qualifiers of the outermost name, leaving template
/// arguments untouched: `Qt::Orientation` → `Orientation`,
/// `std::map<std::string, int>` → `map<std::string, int>`.
fn unqualified(name: &str) -> &str {
    let head_end = name.find('<').unwrap_or(name.len());
    match name[..head_end].rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

// ─── Declarations (unit file form) ──────────────────────────────────────────

/// A class as written in a unit file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    /// `false` for forward declarations.
    #[serde(default = "defined_by_default")]
    pub defined: bool,
    /// Base classes in declaration order.
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

fn defined_by_default() -> bool {
    true
}

/// A method as written in a unit file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// `None` for constructors, destructors and operators.
    pub name: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub returns: Option<TypeDesc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    /// Whether the parameter has a default argument.
    #[serde(default)]
    pub default: bool,
}

/// A macro expansion entry: `location` expands from `begin..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionDecl {
    pub location: SourceLocation,
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLengthDecl {
    pub location: SourceLocation,
    pub length: u32,
}

// ─── Universe ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ClassEntry {
    name: Ustr,
    defined: bool,
    bases: Vec<Ustr>,
    methods: Vec<MethodId>,
}

#[derive(Debug, Clone)]
struct MethodEntry {
    owner: ClassId,
    name: Option<Ustr>,
    params: Vec<ParamDecl>,
    returns: Option<TypeDesc>,
}

/// Flattened declaration universe of one translation unit.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    classes: Vec<ClassEntry>,
    methods: Vec<MethodEntry>,
    by_name: HashMap<Ustr, ClassId>,
    expansions: HashMap<SourceLocation, SourceRange>,
    token_lengths: HashMap<SourceLocation, u32>,
}

impl Universe {
    /// Build a universe from class declarations.
    ///
    /// Bases and pointee types that name no declared class are kept as
    /// names and simply resolve to nothing.
    pub fn new(classes: Vec<ClassDecl>) -> Result<Self, LoadError> {
        let mut universe = Universe::default();
        for decl in classes {
            universe.add_class(decl)?;
        }
        Ok(universe)
    }

    /// Add macro-expansion bookkeeping used for concatenated literals.
    pub fn with_source_map(
        mut self,
        expansions: Vec<ExpansionDecl>,
        token_lengths: Vec<TokenLengthDecl>,
    ) -> Self {
        self.expansions.extend(
            expansions
                .into_iter()
                .map(|e| (e.location, SourceRange::new(e.begin, e.end))),
        );
        self.token_lengths
            .extend(token_lengths.into_iter().map(|t| (t.location, t.length)));
        self
    }

    fn add_class(&mut self, decl: ClassDecl) -> Result<ClassId, LoadError> {
        let name = ustr(&decl.name);
        if self.by_name.contains_key(&name) {
            return Err(LoadError::DuplicateClass { name: decl.name });
        }

        let id = ClassId(self.classes.len() as u32);
        let mut methods = Vec::with_capacity(decl.methods.len());
        for method in decl.methods {
            let method_id = MethodId(self.methods.len() as u32);
            self.methods.push(MethodEntry {
                owner: id,
                name: method.name.as_deref().map(ustr),
                params: method.params,
                returns: method.returns,
            });
            methods.push(method_id);
        }

        self.classes.push(ClassEntry {
            name,
            defined: decl.defined,
            bases: decl.bases.iter().map(|b| ustr(b)).collect(),
            methods,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Look a class up by its name as written in the unit file.
    pub fn class(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(&ustr(name)).copied()
    }

    pub fn class_name(&self, class: ClassId) -> &str {
        self.classes[class.0 as usize].name.as_str()
    }

    /// Methods of `class` named `name`, in declaration order.
    pub fn methods_named(&self, class: ClassId, name: &str) -> Vec<MethodId> {
        self.classes[class.0 as usize]
            .methods
            .iter()
            .copied()
            .filter(|&m| self.method(m).name.is_some_and(|n| n.as_str() == name))
            .collect()
    }

    pub fn owner(&self, method: MethodId) -> ClassId {
        self.method(method).owner
    }

    /// `Owner::name(type1, type2)` with full type spellings.
    pub fn qualified_signature(&self, method: MethodId) -> String {
        let entry = self.method(method);
        let params: Vec<String> = entry
            .params
            .iter()
            .map(|p| p.ty.print(PrintPolicy::Full))
            .collect();
        format!(
            "{}::{}({})",
            self.class_name(entry.owner),
            entry.name.map_or("<anonymous>", |n| n.as_str()),
            params.join(", ")
        )
    }

    fn method(&self, method: MethodId) -> &MethodEntry {
        &self.methods[method.0 as usize]
    }
}

impl DeclarationModel for Universe {
    type Class = ClassId;
    type Method = MethodId;
    type Type = TypeDesc;

    fn is_defined(&self, class: ClassId) -> bool {
        self.classes[class.0 as usize].defined
    }

    fn methods(&self, class: ClassId) -> Vec<MethodId> {
        self.classes[class.0 as usize].methods.clone()
    }

    fn first_declared_base(&self, class: ClassId) -> Option<ClassId> {
        let base = self.classes[class.0 as usize].bases.first()?;
        self.by_name.get(base).copied()
    }

    fn method_name(&self, method: MethodId) -> Option<&str> {
        self.method(method).name.map(|n| n.as_str())
    }

    fn parameter_count(&self, method: MethodId) -> usize {
        self.method(method).params.len()
    }

    fn parameter_type(&self, method: MethodId, index: usize) -> Option<TypeDesc> {
        self.method(method).params.get(index).map(|p| p.ty.clone())
    }

    fn min_required_arguments(&self, method: MethodId) -> usize {
        let params = &self.method(method).params;
        params
            .iter()
            .position(|p| p.default)
            .unwrap_or(params.len())
    }

    fn result_type(&self, method: MethodId) -> Option<TypeDesc> {
        self.method(method).returns.clone()
    }

    fn printed_text(&self, ty: &TypeDesc, policy: PrintPolicy) -> String {
        ty.print(policy)
    }

    fn is_reference(&self, ty: &TypeDesc) -> bool {
        ty.reference
    }

    fn is_const_qualified_referent(&self, ty: &TypeDesc) -> bool {
        ty.reference && ty.is_const && ty.pointer == 0
    }

    fn non_reference(&self, ty: &TypeDesc) -> TypeDesc {
        TypeDesc {
            reference: false,
            ..ty.clone()
        }
    }

    fn strip_local_const(&self, ty: &TypeDesc) -> TypeDesc {
        // Behind a pointer or reference the `const` is not top-level.
        if ty.reference || ty.pointer > 0 {
            return ty.clone();
        }
        TypeDesc {
            is_const: false,
            ..ty.clone()
        }
    }

    fn pointee_class(&self, ty: &TypeDesc) -> Option<ClassId> {
        if ty.pointer != 1 || ty.reference {
            return None;
        }
        self.class(&ty.name)
    }
}

impl SourceMap for Universe {
    fn immediate_expansion_range(&self, location: SourceLocation) -> SourceRange {
        self.expansions
            .get(&location)
            .copied()
            .unwrap_or(SourceRange::new(location, location))
    }

    fn token_length(&self, location: SourceLocation) -> u32 {
        self.token_lengths.get(&location).copied().unwrap_or(0)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
