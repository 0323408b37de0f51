/// In-memory use sink.
///
/// [`UseRecorder`] collects the uses the resolver registers, dropping repeats
/// of the same `(declaration, range)` pair, and hands them back in the order
/// they were first registered.  It is shareable between threads.
use std::collections::HashSet;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::model::AnnotationSink;
use crate::types::{SourceRange, UseFlavor, UseKind};

/// One registered use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUse<D> {
    pub declaration: D,
    pub range: SourceRange,
    pub kind: UseKind,
    pub context: Option<String>,
    pub flavor: UseFlavor,
}

#[derive(Debug)]
struct Recorded<D> {
    seen: HashSet<(D, SourceRange)>,
    uses: Vec<RecordedUse<D>>,
}

#[derive(Debug)]
pub struct UseRecorder<D> {
    inner: Mutex<Recorded<D>>,
}

impl<D> Default for UseRecorder<D> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Recorded {
                seen: HashSet::new(),
                uses: Vec::new(),
            }),
        }
    }
}

impl<D: Copy + Eq + Hash> UseRecorder<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_uses(self) -> Vec<RecordedUse<D>> {
        self.inner.into_inner().uses
    }
}

impl<D: Copy + Eq + Hash> AnnotationSink<D> for UseRecorder<D> {
    fn register_use(
        &self,
        declaration: D,
        range: SourceRange,
        kind: UseKind,
        context: Option<&str>,
        flavor: UseFlavor,
    ) {
        let mut inner = self.inner.lock();
        if !inner.seen.insert((declaration, range)) {
            return;
        }
        inner.uses.push(RecordedUse {
            declaration,
            range,
            kind,
            context: context.map(str::to_string),
            flavor,
        });
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
