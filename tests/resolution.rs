mod common;

use common::*;
use slotref::{ResolverConfig, Resolution, TypeDesc, Unresolved};

// ─── Overload Selection ─────────────────────────────────────────────────────

#[test]
fn test_resolves_overload_with_matching_argument() {
    let u = counter_universe();
    assert_eq!(
        resolve(&u, "Counter", "1increment(int)").as_deref(),
        Some("Counter::increment(int)")
    );
}

#[test]
fn test_resolves_zero_argument_overload() {
    let u = counter_universe();
    assert_eq!(
        resolve(&u, "Counter", "1increment()").as_deref(),
        Some("Counter::increment()")
    );
}

#[test]
fn test_mismatching_argument_is_no_match() {
    let u = counter_universe();
    assert_eq!(
        resolve_raw(&u, "Counter", "1increment(QString)"),
        Resolution::NoMatch(Unresolved::ArgumentMismatch { index: 0 })
    );
}

#[test]
fn test_too_many_arguments_is_no_match() {
    let u = counter_universe();
    assert_eq!(
        resolve_raw(&u, "Counter", "1increment(int,int)"),
        Resolution::NoMatch(Unresolved::ArgumentMismatch { index: 1 })
    );
}

#[test]
fn test_pruned_candidate_does_not_come_back() {
    let u = universe(vec![class(
        "Mixer",
        &[],
        vec![
            method("route", vec![ty("int"), ty("bool")]),
            method("route", vec![ty("QString"), ty("int")]),
        ],
    )]);

    // Only route(QString, int) would accept the second argument, but it is
    // gone after the first one.
    assert_eq!(
        resolve_raw(&u, "Mixer", "1route(int,int)"),
        Resolution::NoMatch(Unresolved::ArgumentMismatch { index: 1 })
    );
    assert_eq!(
        resolve_raw(&u, "Mixer", "1route(bool,int)"),
        Resolution::NoMatch(Unresolved::ArgumentMismatch { index: 0 })
    );
    assert_eq!(
        resolve(&u, "Mixer", "1route(QString,int)").as_deref(),
        Some("Mixer::route(QString, int)")
    );
}

#[test]
fn test_unknown_method_is_no_match() {
    let u = counter_universe();
    assert_eq!(
        resolve_raw(&u, "Counter", "1decrement()"),
        Resolution::NoMatch(Unresolved::NoCandidates)
    );
}

#[test]
fn test_malformed_signature_is_no_match() {
    let u = counter_universe();
    assert_eq!(
        resolve_raw(&u, "Counter", "1increment(int"),
        Resolution::NoMatch(Unresolved::NotASignature)
    );
    assert_eq!(
        resolve_raw(&u, "Counter", "1in"),
        Resolution::NoMatch(Unresolved::NotASignature)
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let u = counter_universe();
    for sig in ["1increment(int)", "1increment()", "1increment(QString)", "x"] {
        assert_eq!(resolve_raw(&u, "Counter", sig), resolve_raw(&u, "Counter", sig));
    }
}

#[test]
fn test_first_surviving_candidate_wins() {
    // Both survive textual matching; declaration order breaks the tie.
    let u = universe(vec![class(
        "Widget",
        &[],
        vec![
            method_with_defaults("resize", vec![ty("int"), ty("int")], 1),
            method("resize", vec![ty("int")]),
        ],
    )]);
    assert_eq!(
        resolve(&u, "Widget", "1resize(int)").as_deref(),
        Some("Widget::resize(int, int)")
    );
}

// ─── Type Text Matching ─────────────────────────────────────────────────────

#[test]
fn test_const_reference_parameter_matches_plain_name() {
    let u = counter_universe();
    assert_eq!(
        resolve(&u, "Counter", "1setLabel(QString)").as_deref(),
        Some("Counter::setLabel(const QString &)")
    );
    assert_eq!(
        resolve(&u, "Counter", "1setLabel(const QString&)").as_deref(),
        Some("Counter::setLabel(const QString &)")
    );
}

#[test]
fn test_prefix_type_does_not_match() {
    let u = counter_universe();
    assert!(resolve(&u, "Counter", "1setLabel(QStringList)").is_none());
}

#[test]
fn test_non_const_reference_keeps_ampersand() {
    let u = universe(vec![class(
        "Editor",
        &[],
        vec![method(
            "fill",
            vec![TypeDesc {
                name: "QString".to_string(),
                reference: true,
                ..TypeDesc::default()
            }],
        )],
    )]);
    assert!(resolve(&u, "Editor", "1fill(QString)").is_none());
    assert_eq!(
        resolve(&u, "Editor", "1fill(QString&)").as_deref(),
        Some("Editor::fill(QString &)")
    );
}

#[test]
fn test_top_level_const_is_ignored() {
    let u = universe(vec![class(
        "Timer",
        &[],
        vec![method(
            "start",
            vec![TypeDesc {
                name: "int".to_string(),
                is_const: true,
                ..TypeDesc::default()
            }],
        )],
    )]);
    assert_eq!(
        resolve(&u, "Timer", "1start(int)").as_deref(),
        Some("Timer::start(const int)")
    );
}

#[test]
fn test_pointer_to_const_keeps_const() {
    let u = universe(vec![class(
        "Label",
        &[],
        vec![method(
            "setName",
            vec![TypeDesc {
                name: "char".to_string(),
                is_const: true,
                pointer: 1,
                reference: false,
            }],
        )],
    )]);
    assert!(resolve(&u, "Label", "1setName(const char*)").is_some());
    assert!(resolve(&u, "Label", "1setName(char*)").is_none());
}

#[test]
fn test_unsigned_spellings_match() {
    let u = universe(vec![class(
        "Spin",
        &[],
        vec![method("setValue", vec![ty("unsigned int")])],
    )]);
    assert!(resolve(&u, "Spin", "1setValue(uint)").is_some());
    assert!(resolve(&u, "Spin", "1setValue(unsigned int)").is_some());
    assert!(resolve(&u, "Spin", "1setValue(int)").is_some());
}

#[test]
fn test_template_argument_with_comma() {
    let u = universe(vec![class(
        "Model",
        &[],
        vec![
            method("reset", vec![ty("QMap<int, QString>"), ty("int")]),
            method("reset", vec![ty("QMap<int, QVariant>"), ty("int")]),
        ],
    )]);
    assert_eq!(
        resolve(&u, "Model", "1reset(QMap<int,QVariant>,int)").as_deref(),
        Some("Model::reset(QMap<int, QVariant>, int)")
    );
}

#[test]
fn test_scope_of_parameter_type_is_suppressed() {
    let u = universe(vec![class(
        "Splitter",
        &[],
        vec![method("setOrientation", vec![ty("Qt::Orientation")])],
    )]);
    assert!(resolve(&u, "Splitter", "1setOrientation(Orientation)").is_some());
}

// ─── Arity and Sentinel Parameters ──────────────────────────────────────────

#[test]
fn test_private_signal_tag_may_be_omitted() {
    let u = counter_universe();
    assert_eq!(
        resolve(&u, "Counter", "2valueChanged(int)").as_deref(),
        Some("Counter::valueChanged(int, QPrivateSignal)")
    );
}

#[test]
fn test_other_missing_trailing_parameter_is_rejected() {
    let u = universe(vec![class(
        "Counter",
        &[],
        vec![method("valueChanged", vec![ty("int"), ty("bool")])],
    )]);
    assert_eq!(
        resolve_raw(&u, "Counter", "2valueChanged(int)"),
        Resolution::NoMatch(Unresolved::ArityMismatch)
    );
}

#[test]
fn test_sentinel_only_covers_one_missing_parameter() {
    let u = universe(vec![class(
        "Counter",
        &[],
        vec![method(
            "valueChanged",
            vec![ty("int"), ty("bool"), ty("QPrivateSignal")],
        )],
    )]);
    assert!(resolve(&u, "Counter", "2valueChanged(int)").is_none());
}

#[test]
fn test_default_arguments_may_be_omitted() {
    let u = universe(vec![class(
        "Socket",
        &[],
        vec![method_with_defaults(
            "connectToHost",
            vec![ty("QString"), ty("quint16"), ty("OpenMode")],
            1,
        )],
    )]);
    assert!(resolve(&u, "Socket", "1connectToHost(QString,quint16)").is_some());
    assert!(resolve(&u, "Socket", "1connectToHost(QString)").is_none());
}

#[test]
fn test_configured_sentinel_type() {
    let u = universe(vec![class(
        "Job",
        &[],
        vec![method("finished", vec![ty("int"), ty("JobToken")])],
    )]);
    let mut config = ResolverConfig::default();
    assert!(!resolve_with(&u, &config, "Job", "2finished(int)").is_resolved());

    config.sentinel_parameter_types.push("JobToken".to_string());
    assert!(resolve_with(&u, &config, "Job", "2finished(int)").is_resolved());
}

// ─── Inheritance ────────────────────────────────────────────────────────────

#[test]
fn test_signal_declared_on_base_class() {
    let u = universe(vec![
        class("QAbstractButton", &[], vec![method("clicked", vec![ty("bool")])]),
        class("QPushButton", &["QAbstractButton"], vec![]),
    ]);
    assert_eq!(
        resolve(&u, "QPushButton", "2clicked(bool)").as_deref(),
        Some("QAbstractButton::clicked(bool)")
    );
}

#[test]
fn test_derived_overload_comes_first() {
    let u = universe(vec![
        class("Base", &[], vec![method("update", vec![])]),
        class("Derived", &["Base"], vec![method("update", vec![])]),
    ]);
    assert_eq!(
        resolve(&u, "Derived", "1update()").as_deref(),
        Some("Derived::update()")
    );
}

#[test]
fn test_private_implementation_fallback() {
    let u = universe(vec![
        class("APrivate", &[], vec![method("slotName", vec![ty("int")])]),
        class("A", &[], vec![accessor("d_func", "APrivate")]),
    ]);
    assert_eq!(
        resolve(&u, "A", "1slotName(int)").as_deref(),
        Some("APrivate::slotName(int)")
    );
}
