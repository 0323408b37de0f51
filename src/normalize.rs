/// Type-text normalization.
///
/// Signature strings spell parameter types the way Qt's `moc` normalizes
/// them (`QString`, `uint`, `const char*`), while the declaration model
/// prints them the way the compiler does (`const QString &`,
/// `unsigned int`, `const char *`).  The helpers here bring both sides to a
/// comparable form and compare them permissively: whitespace is ignored
/// everywhere and an `unsigned ` prefix may be present on one side only.
use crate::model::{DeclarationModel, PrintPolicy};

const UNSIGNED: &[u8] = b"unsigned ";
/// `unsigned ` without its first letter, for abbreviations like `uint`.
const NSIGNED: &[u8] = b"nsigned ";

/// Remove a `const ...&` wrapper from an argument fragment.
///
/// `"const QString &"` becomes `"QString"`.  Fragments that are not both
/// `const`-prefixed and `&`-suffixed are returned unchanged.
pub fn strip_const_ref(argument: &str) -> &str {
    match argument
        .strip_prefix("const ")
        .and_then(|rest| rest.strip_suffix('&'))
    {
        Some(inner) => inner.trim(),
        None => argument,
    }
}

/// The printed text of a parameter type, ready for [`type_text_matches`].
///
/// A reference to a `const` type loses its reference, and a top-level
/// `const` is dropped, so `const QString &` and `const int` print as
/// `QString` and `int`.  Non-const references keep their `&`.
pub fn parameter_text<M: DeclarationModel>(model: &M, ty: &M::Type) -> String {
    let referent = if model.is_reference(ty) && model.is_const_qualified_referent(ty) {
        model.non_reference(ty)
    } else {
        ty.clone()
    };
    let unqualified = model.strip_local_const(&referent);
    model
        .printed_text(&unqualified, PrintPolicy::SuppressScope)
        .trim()
        .to_string()
}

/// Compare an argument fragment with a printed parameter type.
///
/// Spaces are skipped in both operands, and `unsigned ` (or `nsigned `
/// right after a matched `u`, as in `uint`) may be skipped in either one.
/// The texts match when both scans end together.
pub fn type_text_matches(argument: &str, parameter: &str) -> bool {
    let sig = argument.as_bytes();
    let par = parameter.as_bytes();
    let mut sig_pos = 0;
    let mut par_pos = 0;

    while sig_pos < sig.len() && par_pos < par.len() {
        if sig[sig_pos] == par[par_pos] {
            sig_pos += 1;
            par_pos += 1;
        } else if sig[sig_pos] == b' ' {
            sig_pos += 1;
        } else if par[par_pos] == b' ' {
            par_pos += 1;
        } else if let Some(skip) = unsigned_prefix_len(&sig[sig_pos..]) {
            sig_pos += skip;
        } else if let Some(skip) = unsigned_prefix_len(&par[par_pos..]) {
            par_pos += skip;
        } else {
            break;
        }
    }

    sig_pos == sig.len() && par_pos == par.len()
}

fn unsigned_prefix_len(rest: &[u8]) -> Option<usize> {
    if rest.starts_with(UNSIGNED) {
        Some(UNSIGNED.len())
    } else if rest.starts_with(NSIGNED) {
        Some(NSIGNED.len())
    } else {
        None
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
