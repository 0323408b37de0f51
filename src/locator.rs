/// Candidate lookup along the class hierarchy.
///
/// Signals and slots may be declared on the object's own class or on any
/// class it derives from.  Qt requires `QObject` to be the first base, so
/// only the first declared base is followed at each level.
///
/// Many Qt classes keep their slots on a private implementation class that
/// is only reachable through a `d_func()` accessor (`Q_PRIVATE_SLOT`).  When
/// the base chain is exhausted without finding anything and such an
/// accessor was seen on the way, the walk restarts once from the class the
/// accessor points to.
use crate::QtSupport;
use crate::model::DeclarationModel;

impl<M: DeclarationModel> QtSupport<'_, M> {
    /// Collect every method named `method_name` on `class`, its first-base
    /// chain, or its private implementation.
    ///
    /// The result is in walk order: declaration order within a class,
    /// derived classes before their bases.
    pub fn lookup_candidates(&self, class: M::Class, method_name: &str) -> Vec<M::Method> {
        let model = self.model;
        let mut candidates = Vec::new();
        let mut d_func: Option<M::Method> = None;
        let mut redirected = false;
        let mut current = Some(class);
        let mut depth = 0;

        while let Some(class_it) = current {
            depth += 1;
            if depth > self.config.max_base_depth {
                tracing::debug!("base chain of {:?} exceeds depth limit", class);
                break;
            }

            current = if model.is_defined(class_it) {
                for method in model.methods(class_it) {
                    let Some(name) = model.method_name(method) else {
                        continue;
                    };
                    if name == method_name {
                        candidates.push(method);
                    }
                    if d_func.is_none() && !redirected && self.is_private_impl_accessor(method) {
                        d_func = Some(method);
                    }
                }

                // Look in the first base (QObject must be the first base class)
                model.first_declared_base(class_it)
            } else {
                None
            };

            if current.is_none()
                && candidates.is_empty()
                && let Some(accessor) = d_func.take()
            {
                redirected = true;
                current = model
                    .result_type(accessor)
                    .and_then(|ty| model.pointee_class(&ty));
                tracing::trace!("following {:?} to private class {:?}", accessor, current);
            }
        }

        candidates
    }

    fn is_private_impl_accessor(&self, method: M::Method) -> bool {
        let model = self.model;
        model.method_name(method) == Some(self.config.private_impl_accessor.as_str())
            && model.parameter_count(method) == 0
            && model.result_type(method).is_some()
    }
}
