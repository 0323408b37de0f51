#![allow(dead_code)]

use slotref::universe::{ClassDecl, MethodDecl, ParamDecl};
use slotref::{
    DeclarationModel, MethodId, QtSupport, ResolverConfig, Resolution, TypeDesc, Universe,
    UseRecorder,
};

/// Helper: a defined class with the given bases and methods.
pub fn class(name: &str, bases: &[&str], methods: Vec<MethodDecl>) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        defined: true,
        bases: bases.iter().map(|b| b.to_string()).collect(),
        methods,
    }
}

/// Helper: a forward-declared class.
pub fn forward(name: &str) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        defined: false,
        bases: Vec::new(),
        methods: Vec::new(),
    }
}

/// Helper: an instance method without default arguments.
pub fn method(name: &str, params: Vec<TypeDesc>) -> MethodDecl {
    MethodDecl {
        name: Some(name.to_string()),
        params: params
            .into_iter()
            .map(|ty| ParamDecl { ty, default: false })
            .collect(),
        returns: None,
    }
}

/// Helper: like [`method`], but the last `defaults` parameters have default
/// arguments.
pub fn method_with_defaults(name: &str, params: Vec<TypeDesc>, defaults: usize) -> MethodDecl {
    let mut m = method(name, params);
    let first_default = m.params.len() - defaults;
    for p in &mut m.params[first_default..] {
        p.default = true;
    }
    m
}

/// Helper: `Private *d_func()` style accessor.
pub fn accessor(name: &str, returns: &str) -> MethodDecl {
    MethodDecl {
        name: Some(name.to_string()),
        params: Vec::new(),
        returns: Some(TypeDesc::pointer_to(returns)),
    }
}

pub fn ty(name: &str) -> TypeDesc {
    TypeDesc::named(name)
}

pub fn universe(classes: Vec<ClassDecl>) -> Universe {
    Universe::new(classes).expect("failed to build universe")
}

/// Resolve `signature` against `class_name` and return the qualified
/// signature of the winner.
pub fn resolve(universe: &Universe, class_name: &str, signature: &str) -> Option<String> {
    resolve_raw(universe, class_name, signature)
        .declaration()
        .map(|m| universe.qualified_signature(m))
}

pub fn resolve_raw(universe: &Universe, class_name: &str, signature: &str) -> Resolution<MethodId> {
    resolve_with(universe, &ResolverConfig::default(), class_name, signature)
}

pub fn resolve_with(
    universe: &Universe,
    config: &ResolverConfig,
    class_name: &str,
    signature: &str,
) -> Resolution<MethodId> {
    let recorder = UseRecorder::<MethodId>::new();
    let qt = QtSupport::new(universe, universe, &recorder, config);
    let class = universe.class(class_name).expect("unknown class");
    qt.resolve_signature(class, signature)
}

/// Names of the located candidates, qualified, in lookup order.
pub fn candidates(universe: &Universe, class_name: &str, method_name: &str) -> Vec<String> {
    let recorder = UseRecorder::<MethodId>::new();
    let config = ResolverConfig::default();
    let qt = QtSupport::new(universe, universe, &recorder, &config);
    let class = universe.class(class_name).expect("unknown class");
    qt.lookup_candidates(class, method_name)
        .into_iter()
        .map(|m| {
            let owner = universe.owner(m);
            format!(
                "{}::{}",
                universe.class_name(owner),
                universe.method_name(m).unwrap_or_default()
            )
        })
        .collect()
}

/// The `Counter` class used across tests: two `increment` overloads and a
/// `valueChanged` signal carrying the trailing `QPrivateSignal` tag.
pub fn counter_universe() -> Universe {
    universe(vec![
        class("QObject", &[], vec![method("deleteLater", vec![])]),
        class(
            "Counter",
            &["QObject"],
            vec![
                method("increment", vec![]),
                method("increment", vec![ty("int")]),
                method("valueChanged", vec![ty("int"), ty("QPrivateSignal")]),
                method("setLabel", vec![TypeDesc::const_ref("QString")]),
            ],
        ),
    ])
}
