/// Recognition of Qt calls that take signature strings.
///
/// Which operands of a call are "the object" and "the signature" depends on
/// the callee.  That knowledge lives in [`CALL_PATTERNS`], a static table
/// keyed by class name, method name, call shape and argument count, instead
/// of per-callee branching.  [`QtSupport::visit_call`] looks a call up in
/// the table and hands every matching operand pair to the resolver.
use crate::QtSupport;
use crate::model::DeclarationModel;
use crate::types::{CallKind, CallSite, Operand};

/// Which call shapes a pattern applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Static,
    Member,
    /// Static or member call.
    AnyCall,
    Construct,
}

impl Shape {
    fn accepts(self, kind: CallKind) -> bool {
        match self {
            Shape::Static => kind == CallKind::Static,
            Shape::Member => kind == CallKind::Member,
            Shape::AnyCall => kind != CallKind::Construct,
            Shape::Construct => kind == CallKind::Construct,
        }
    }
}

/// Constraint on the number of arguments at the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCount {
    AtLeast(usize),
    Exactly(usize),
}

impl ArgCount {
    fn accepts(self, count: usize) -> bool {
        match self {
            ArgCount::AtLeast(n) => count >= n,
            ArgCount::Exactly(n) => count == n,
        }
    }
}

/// Where an operand is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Arg(usize),
    /// The object a member function is invoked on.
    ImplicitObject,
}

/// How the signature operand is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// A full `SIGNAL(...)`/`SLOT(...)` signature.
    SignalOrSlot,
    /// A bare method name (`QMetaObject::invokeMethod`).
    InvokeMethod,
}

/// One (object, signature) pair to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub object: Source,
    pub method: Source,
    pub handler: Handler,
}

/// A set of submissions that fires when the argument count (and, for
/// overload families that need it, the callee's parameter count) matches.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub args: ArgCount,
    pub declared_params: Option<usize>,
    pub submit: &'static [Submission],
}

#[derive(Debug, Clone, Copy)]
pub struct CallPattern {
    pub classes: &'static [&'static str],
    /// Callee name.  Ignored for constructor patterns.
    pub method: &'static str,
    pub shape: Shape,
    pub rules: &'static [Rule],
}

const fn signal_or_slot(object: usize, method: usize) -> Submission {
    Submission {
        object: Source::Arg(object),
        method: Source::Arg(method),
        handler: Handler::SignalOrSlot,
    }
}

const ARGS_0_1: Submission = signal_or_slot(0, 1);
const ARGS_1_2: Submission = signal_or_slot(1, 2);
const ARGS_1_3: Submission = signal_or_slot(1, 3);
const ARGS_2_3: Submission = signal_or_slot(2, 3);
const ARGS_2_4: Submission = signal_or_slot(2, 4);
const RECEIVER_SLOT: Submission = Submission {
    object: Source::ImplicitObject,
    method: Source::Arg(2),
    handler: Handler::SignalOrSlot,
};
const INVOKE_0_1: Submission = Submission {
    object: Source::Arg(0),
    method: Source::Arg(1),
    handler: Handler::InvokeMethod,
};

use self::ArgCount::{AtLeast, Exactly};

const DIALOGS: &[&str] = &[
    "QFileDialog",
    "QColorDialog",
    "QFontDialog",
    "QMessageBox",
    "QInputDialog",
    "QPrintDialog",
    "QPageSetupDialog",
    "QPrintPreviewDialog",
    "QProgressDialog",
];

/// Every Qt API known to take a signal or slot by name.
pub const CALL_PATTERNS: &[CallPattern] = &[
    // QObject::connect(sender, SIGNAL(..), receiver, SLOT(..))
    CallPattern {
        classes: &["QObject"],
        method: "connect",
        shape: Shape::Static,
        rules: &[Rule {
            args: AtLeast(4),
            declared_params: None,
            submit: &[ARGS_0_1, ARGS_2_3],
        }],
    },
    CallPattern {
        classes: &["QObject"],
        method: "disconnect",
        shape: Shape::Static,
        rules: &[Rule {
            args: AtLeast(4),
            declared_params: None,
            submit: &[ARGS_0_1, ARGS_2_3],
        }],
    },
    // receiver->connect(sender, SIGNAL(..), SLOT(..))
    CallPattern {
        classes: &["QObject"],
        method: "connect",
        shape: Shape::Member,
        rules: &[Rule {
            args: AtLeast(3),
            declared_params: None,
            submit: &[ARGS_0_1, RECEIVER_SLOT],
        }],
    },
    CallPattern {
        classes: &["QObject"],
        method: "disconnect",
        shape: Shape::Member,
        rules: &[Rule {
            args: AtLeast(3),
            declared_params: None,
            submit: &[ARGS_0_1, RECEIVER_SLOT],
        }],
    },
    CallPattern {
        classes: &["QTimer"],
        method: "singleShot",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: AtLeast(3),
            declared_params: None,
            submit: &[ARGS_1_2],
        }],
    },
    CallPattern {
        classes: &["QHostInfo"],
        method: "lookupHost",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: AtLeast(3),
            declared_params: None,
            submit: &[ARGS_1_2],
        }],
    },
    CallPattern {
        classes: &["QNetworkAccessCache"],
        method: "requestEntry",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: AtLeast(3),
            declared_params: None,
            submit: &[ARGS_1_2],
        }],
    },
    // callWithCallback(method, args, receiver, SLOT(returnMethod) [, SLOT(errorMethod)])
    CallPattern {
        classes: &["QDBusAbstractInterface"],
        method: "callWithCallback",
        shape: Shape::AnyCall,
        rules: &[
            Rule {
                args: Exactly(4),
                declared_params: None,
                submit: &[ARGS_2_3],
            },
            Rule {
                args: Exactly(5),
                declared_params: None,
                submit: &[ARGS_2_3, ARGS_2_4],
            },
        ],
    },
    CallPattern {
        classes: DIALOGS,
        method: "open",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: Exactly(2),
            declared_params: None,
            submit: &[ARGS_0_1],
        }],
    },
    // addAction(text, receiver, SLOT(..), shortcut) and the icon variant
    CallPattern {
        classes: &["QMenu"],
        method: "addAction",
        shape: Shape::AnyCall,
        rules: &[
            Rule {
                args: AtLeast(3),
                declared_params: Some(4),
                submit: &[ARGS_1_2],
            },
            Rule {
                args: AtLeast(4),
                declared_params: Some(5),
                submit: &[ARGS_2_3],
            },
        ],
    },
    CallPattern {
        classes: &["QToolBar"],
        method: "addAction",
        shape: Shape::AnyCall,
        rules: &[
            Rule {
                args: Exactly(3),
                declared_params: None,
                submit: &[ARGS_1_2],
            },
            Rule {
                args: Exactly(4),
                declared_params: None,
                submit: &[ARGS_2_3],
            },
        ],
    },
    CallPattern {
        classes: &["QState"],
        method: "addTransition",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: AtLeast(2),
            declared_params: None,
            submit: &[ARGS_0_1],
        }],
    },
    CallPattern {
        classes: &["QMetaObject"],
        method: "invokeMethod",
        shape: Shape::AnyCall,
        rules: &[Rule {
            args: AtLeast(2),
            declared_params: None,
            submit: &[INVOKE_0_1],
        }],
    },
    // QShortcut(key, parent, SLOT(member) [, SLOT(ambiguousMember)])
    CallPattern {
        classes: &["QShortcut"],
        method: "",
        shape: Shape::Construct,
        rules: &[
            Rule {
                args: AtLeast(3),
                declared_params: None,
                submit: &[ARGS_1_2],
            },
            Rule {
                args: AtLeast(4),
                declared_params: None,
                submit: &[ARGS_1_3],
            },
        ],
    },
    CallPattern {
        classes: &["QSignalSpy", "QSignalTransition"],
        method: "",
        shape: Shape::Construct,
        rules: &[Rule {
            args: AtLeast(2),
            declared_params: None,
            submit: &[ARGS_0_1],
        }],
    },
];

impl CallPattern {
    fn matches<C>(&self, call: &CallSite<C>) -> bool {
        self.shape.accepts(call.kind)
            && self.classes.contains(&call.class_name.as_str())
            && (self.shape == Shape::Construct || self.method == call.method_name)
    }
}

impl Rule {
    fn matches<C>(&self, call: &CallSite<C>) -> bool {
        self.args.accepts(call.args.len())
            && self
                .declared_params
                .is_none_or(|n| n == call.declared_params)
    }
}

/// The operand pairs a call submits for resolution, in table order.
pub fn submissions<C>(call: &CallSite<C>) -> impl Iterator<Item = Submission> + '_ {
    CALL_PATTERNS
        .iter()
        .filter(move |pattern| pattern.matches(call))
        .flat_map(|pattern| pattern.rules.iter())
        .filter(move |rule| rule.matches(call))
        .flat_map(|rule| rule.submit.iter().copied())
}

impl<M: DeclarationModel> QtSupport<'_, M> {
    // ─── Call-Site Dispatch ─────────────────────────────────────────────────

    /// Inspect one call expression and resolve every signature operand it
    /// carries.  Returns the number of uses registered.
    pub fn visit_call(&self, call: &CallSite<M::Class>) -> usize {
        if !call.class_name.starts_with(self.config.class_prefix.as_str()) {
            return 0; // only Qt classes
        }

        let context = call.context.as_deref();
        let mut registered = 0;
        for submission in submissions(call) {
            let (Some(object), Some(method)) = (
                operand(call, submission.object),
                operand(call, submission.method),
            ) else {
                continue;
            };
            let used = match submission.handler {
                Handler::SignalOrSlot => self.handle_signal_or_slot(object, method, context),
                Handler::InvokeMethod => self.handle_invoke_method(object, method, context),
            };
            if used {
                registered += 1;
            }
        }
        registered
    }
}

fn operand<C>(call: &CallSite<C>, source: Source) -> Option<&Operand<C>> {
    match source {
        Source::Arg(index) => call.args.get(index),
        Source::ImplicitObject => call.implicit_object.as_ref(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
