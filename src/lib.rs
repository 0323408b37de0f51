pub mod config;
pub mod dispatch;
pub mod error;
pub mod locator;
pub mod model;
pub mod normalize;
pub mod recorder;
pub mod resolver;
pub mod signature;
pub mod types;
pub mod unit;
pub mod universe;

pub use config::{Config, ResolverConfig};
pub use error::LoadError;
pub use model::{AnnotationSink, DeclarationModel, PrintPolicy, SourceMap};
pub use recorder::{RecordedUse, UseRecorder};
pub use resolver::{Resolution, Unresolved};
pub use signature::Signature;
pub use types::*;
pub use unit::{TranslationUnit, UnitFile, UseRecord, resolve_files};
pub use universe::{ClassId, MethodId, TypeDesc, Universe};

/// Resolution of Qt signal/slot signature strings for C++ source indexers.
///
/// Calls like `QObject::connect(sender, SIGNAL(valueChanged(int)), receiver,
/// SLOT(setValue(int)))` name their signal and slot through strings.  An
/// indexer that only follows real references leaves those names unlinked.
/// This crate finds the declaration each string refers to and reports it as
/// a use, so "find references" and "go to definition" work on them too.
///
/// - [`signature`]: splits `name(type1,type2)` into its parts
/// - [`normalize`]: compares signature type text with printed parameter types
/// - [`locator`]: collects same-named methods along the base chain, falling
///   back to the private implementation class
/// - [`resolver`]: prunes the candidates argument by argument and reports
///   the winner
/// - [`dispatch`]: the table of Qt calls that take signature strings
///
/// The declaration universe, macro bookkeeping and the use sink are external
/// collaborators described in [`model`].  [`universe`], [`recorder`] and
/// [`unit`] provide in-memory implementations driven by JSON unit files,
/// which is what the `slotref` binary runs on.
///
/// A [`QtSupport`] resolves signature strings against one translation unit.
/// It holds read-only references to the collaborators and carries no state
/// of its own between call sites, so one instance can serve a whole unit
/// and several instances can run side by side over the same model.
pub struct QtSupport<'a, M: DeclarationModel> {
    pub(crate) model: &'a M,
    pub(crate) source_map: &'a dyn SourceMap,
    pub(crate) sink: &'a dyn AnnotationSink<M::Method>,
    pub(crate) config: &'a ResolverConfig,
}

impl<'a, M: DeclarationModel> QtSupport<'a, M> {
    pub fn new(
        model: &'a M,
        source_map: &'a dyn SourceMap,
        sink: &'a dyn AnnotationSink<M::Method>,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            model,
            source_map,
            sink,
            config,
        }
    }
}
