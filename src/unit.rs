/// Unit files.
///
/// A unit file is the JSON export of one translation unit: its classes,
/// the macro-expansion entries needed for stringized literals, and the call
/// expressions the indexer visited.  [`TranslationUnit`] binds the call
/// operands to the unit's [`Universe`] and runs every call through the
/// dispatcher.
///
/// ```json
/// {
///   "classes": [{ "name": "Counter", "bases": ["QObject"],
///                 "methods": [{ "name": "increment", "params": [] }] }],
///   "calls": [{ "class": "QTimer", "method": "singleShot", "kind": "static",
///               "args": ["other",
///                        { "object": { "class": "Counter", "pointer": true } },
///                        { "literal": { "value": "1increment()",
///                                       "range": { "begin": 40, "end": 54 } } }] }]
/// }
/// ```
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::QtSupport;
use crate::config::ResolverConfig;
use crate::error::LoadError;
use crate::recorder::UseRecorder;
use crate::types::{CallSite, SourceRange, UseFlavor, UseKind};
use crate::universe::{
    ClassDecl, ClassId, ExpansionDecl, MethodId, TokenLengthDecl, Universe,
};

/// The serialized form of a translation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitFile {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub expansions: Vec<ExpansionDecl>,
    #[serde(default)]
    pub token_lengths: Vec<TokenLengthDecl>,
    #[serde(default)]
    pub calls: Vec<CallSite<String>>,
}

/// A registered use, with the declaration spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseRecord {
    /// `Owner::name(types)` of the used declaration.
    pub declaration: String,
    pub range: SourceRange,
    #[serde(default = "call_kind")]
    pub kind: UseKind,
    #[serde(default = "address_flavor")]
    pub flavor: UseFlavor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn call_kind() -> UseKind {
    UseKind::Call
}

fn address_flavor() -> UseFlavor {
    UseFlavor::UseAddress
}

/// A loaded translation unit, ready to be resolved.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub universe: Universe,
    pub calls: Vec<CallSite<ClassId>>,
}

impl TranslationUnit {
    /// Build the universe and bind every call operand to it.  Object operands
    /// naming an unknown class become untyped objects.
    pub fn from_unit_file(file: UnitFile) -> Result<Self, LoadError> {
        let universe =
            Universe::new(file.classes)?.with_source_map(file.expansions, file.token_lengths);
        let calls = file
            .calls
            .into_iter()
            .map(|call| call.map_class(|name| universe.class(&name)))
            .collect();
        Ok(Self { universe, calls })
    }

    pub fn from_json(content: &str, origin: &Path) -> Result<Self, LoadError> {
        let file: UnitFile = serde_json::from_str(content).map_err(|source| LoadError::Unit {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_unit_file(file)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Visit every call of the unit and return the registered uses in
    /// registration order.
    pub fn resolve(&self, config: &ResolverConfig) -> Vec<UseRecord> {
        let recorder: UseRecorder<MethodId> = UseRecorder::new();
        let qt = QtSupport::new(&self.universe, &self.universe, &recorder, config);
        for call in &self.calls {
            qt.visit_call(call);
        }

        recorder
            .into_uses()
            .into_iter()
            .map(|used| UseRecord {
                declaration: self.universe.qualified_signature(used.declaration),
                range: used.range,
                kind: used.kind,
                flavor: used.flavor,
                context: used.context,
            })
            .collect()
    }
}

/// Load and resolve every unit in `paths` on the rayon pool.  Results are in
/// input order; a unit that fails to load does not affect the others.
pub fn resolve_files(
    paths: &[PathBuf],
    config: &ResolverConfig,
) -> Vec<Result<Vec<UseRecord>, LoadError>> {
    paths
        .par_iter()
        .map(|path| -> Result<Vec<UseRecord>, LoadError> {
            let _span = tracing::info_span!("unit", path = %path.display()).entered();
            let unit = TranslationUnit::load(path)?;
            let uses = unit.resolve(config);
            tracing::debug!("{} calls, {} uses", unit.calls.len(), uses.len());
            Ok(uses)
        })
        .collect()
}
