/// Signal/slot signature resolution.
///
/// Given the object operand and the signature operand of a recognised call,
/// find the declaration the signature names and register its use.
///
/// # Resolution pipeline
///
///   1. **Tokenize** the signature string ([`Signature::parse`]).
///   2. **Locate** same-named methods on the object's class, its first-base
///      chain, or its private implementation ([`QtSupport::lookup_candidates`]).
///   3. **Prune** argument by argument: a candidate survives slot `i` only if
///      it declares at least `i + 1` parameters and its `i`-th parameter type
///      prints like the `i`-th argument fragment.
///   4. **Arity filter**: drop candidates that need more arguments than the
///      signature supplies, unless the one missing trailing parameter is a
///      sentinel type such as `QPrivateSignal`.
///   5. The first survivor in lookup order wins.
///
/// Each pass produces a new candidate list from the previous one, so the
/// set only ever shrinks.  Every miss is silent: it is logged at debug level
/// and nothing is registered.
use thiserror::Error;

use crate::QtSupport;
use crate::model::{DeclarationModel, PrintPolicy};
use crate::normalize::{parameter_text, type_text_matches};
use crate::signature::Signature;
use crate::types::{Operand, SourceRange, StringLiteral, UseFlavor, UseKind};

/// Why a signature did not resolve to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unresolved {
    #[error("not a well-formed signature")]
    NotASignature,
    #[error("no method of that name")]
    NoCandidates,
    #[error("no candidate accepts argument {index}")]
    ArgumentMismatch { index: usize },
    #[error("every candidate requires more arguments")]
    ArityMismatch,
}

/// Outcome of resolving one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<D> {
    Resolved(D),
    NoMatch(Unresolved),
}

impl<D> Resolution<D> {
    pub fn declaration(self) -> Option<D> {
        match self {
            Resolution::Resolved(decl) => Some(decl),
            Resolution::NoMatch(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl<M: DeclarationModel> QtSupport<'_, M> {
    // ─── Signature Resolution ───────────────────────────────────────────────

    /// Resolve a raw signature string (e.g. `"2valueChanged(int)"`) against
    /// `class`.
    pub fn resolve_signature(&self, class: M::Class, raw: &str) -> Resolution<M::Method> {
        match Signature::parse(raw) {
            Some(signature) => self.resolve_parsed(class, &signature),
            None => Resolution::NoMatch(Unresolved::NotASignature),
        }
    }

    /// Resolve an already tokenized signature against `class`.
    pub fn resolve_parsed(
        &self,
        class: M::Class,
        signature: &Signature<'_>,
    ) -> Resolution<M::Method> {
        let mut candidates = self.lookup_candidates(class, signature.method_name);
        if candidates.is_empty() {
            return Resolution::NoMatch(Unresolved::NoCandidates);
        }

        for (index, argument) in signature.arguments.iter().enumerate() {
            candidates = candidates
                .into_iter()
                .filter(|&candidate| self.parameter_accepts(candidate, index, argument))
                .collect();
            if candidates.is_empty() {
                return Resolution::NoMatch(Unresolved::ArgumentMismatch { index });
            }
        }

        let supplied = signature.arguments.len();
        candidates
            .into_iter()
            .find(|&candidate| self.accepts_argument_count(candidate, supplied))
            .map_or(
                Resolution::NoMatch(Unresolved::ArityMismatch),
                Resolution::Resolved,
            )
    }

    /// Whether `candidate`'s parameter at `index` can be spelled `argument`.
    fn parameter_accepts(&self, candidate: M::Method, index: usize, argument: &str) -> bool {
        let model = self.model;
        if model.parameter_count(candidate) < index + 1 {
            tracing::trace!("{:?}: not enough parameters for argument {}", candidate, index);
            return false;
        }
        let Some(ty) = model.parameter_type(candidate, index) else {
            return false;
        };
        let printed = parameter_text(model, &ty);
        let matches = type_text_matches(argument, &printed);
        if !matches {
            tracing::trace!(
                "{:?}: parameter {} is `{}`, signature says `{}`",
                candidate,
                index,
                printed,
                argument
            );
        }
        matches
    }

    /// Whether `candidate` can be called with `supplied` arguments, counting
    /// a single omitted sentinel trailing parameter as supplied.
    fn accepts_argument_count(&self, candidate: M::Method, supplied: usize) -> bool {
        let model = self.model;
        if model.min_required_arguments(candidate) <= supplied {
            return true;
        }
        model.parameter_count(candidate) == supplied + 1
            && model
                .parameter_type(candidate, supplied)
                .is_some_and(|ty| {
                    self.config
                        .is_sentinel_type(&model.printed_text(&ty, PrintPolicy::SuppressScope))
                })
    }

    // ─── Call Operands ──────────────────────────────────────────────────────

    /// Resolve a `SIGNAL(...)`/`SLOT(...)` operand against the class of
    /// `object` and register the use.  Returns whether a use was registered.
    pub fn handle_signal_or_slot(
        &self,
        object: &Operand<M::Class>,
        method: &Operand<M::Class>,
        context: Option<&str>,
    ) -> bool {
        // It can be a non-pointer if called like: foo.connect(...)
        let Operand::Object {
            class: Some(class), ..
        } = *object
        else {
            return false;
        };
        let Some(literal) = self.signature_literal(method) else {
            return false;
        };
        if literal.char_width != 1 {
            return false;
        }

        match self.resolve_signature(class, &literal.value) {
            Resolution::Resolved(used) => {
                let range = self.literal_range(literal);
                tracing::debug!("`{}` resolved to {:?}", literal.value.trim(), used);
                self.sink
                    .register_use(used, range, UseKind::Call, context, UseFlavor::UseAddress);
                true
            }
            Resolution::NoMatch(reason) => {
                tracing::debug!("`{}` on {:?}: {}", literal.value.trim(), class, reason);
                false
            }
        }
    }

    /// Resolve the bare method name passed to `QMetaObject::invokeMethod`.
    ///
    /// The string carries no parameter types, so the use is only registered
    /// when the name is unambiguous.
    pub fn handle_invoke_method(
        &self,
        object: &Operand<M::Class>,
        method: &Operand<M::Class>,
        context: Option<&str>,
    ) -> bool {
        let Operand::Object {
            class: Some(class),
            pointer: true,
        } = *object
        else {
            return false;
        };
        let Operand::Literal(literal) = method else {
            return false;
        };
        if literal.char_width != 1 || literal.value.is_empty() {
            return false;
        }

        let candidates = self.lookup_candidates(class, &literal.value);
        let [used] = candidates.as_slice() else {
            // TODO: pick the overload from the Q_ARG types of the remaining arguments
            tracing::debug!(
                "invokeMethod `{}` on {:?}: {} candidates",
                literal.value,
                class,
                candidates.len()
            );
            return false;
        };

        self.sink.register_use(
            *used,
            literal.range,
            UseKind::Call,
            context,
            UseFlavor::UseAddress,
        );
        true
    }

    /// The string literal of a signature operand, looking through the
    /// flag-location wrapper debug builds put around it.
    fn signature_literal<'o>(&self, method: &'o Operand<M::Class>) -> Option<&'o StringLiteral> {
        match method {
            Operand::Literal(literal) => Some(literal),
            Operand::Call { callee, args }
                if *callee == self.config.flag_location_function && args.len() == 1 =>
            {
                match &args[0] {
                    Operand::Literal(literal) => Some(literal),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// The range a use of `literal` is reported at.
    ///
    /// A literal built from several concatenated tokens comes from the
    /// stringizing inside `SIGNAL(...)`/`SLOT(...)`.  Its range is lifted two
    /// expansion levels (the `#` expansion, then the macro itself), then the
    /// macro name and the closing parenthesis are cut off so that only the
    /// signature text is covered.
    fn literal_range(&self, literal: &StringLiteral) -> SourceRange {
        if literal.concatenated() < 2 {
            return literal.range;
        }
        let Some(&second_token) = literal.tokens.get(1) else {
            return literal.range;
        };

        let sm = self.source_map;
        let r = sm.immediate_expansion_range(second_token);
        let begin = sm.immediate_expansion_range(r.begin).begin;
        let end = sm.immediate_expansion_range(r.end).end;

        let Some(begin) = begin
            .checked_add(sm.token_length(begin))
            .and_then(|b| b.checked_add(1))
        else {
            tracing::debug!("expansion of `{}` is out of range", literal.value.trim());
            return literal.range;
        };
        SourceRange::new(begin, end.saturating_sub(1))
    }
}
