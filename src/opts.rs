//! Feature toggles for the lowering pass.

/// Each transform can be switched off independently; a disabled transform
/// leaves the gated construct untouched, it is never an error.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Rewrite `{ [expr]: v }` into hoisted assignments.
    pub computed_property: bool,
    /// Expand `{ x }` and `{ foo() {} }` into `x: x` / `foo: function foo() {}`.
    pub concise_method_property: bool,
    /// Whether generator methods participate in name synthesis. Generator
    /// *semantics* are never rewritten by this pass; with this off, a
    /// generator method that must become a function expression stays
    /// anonymous and otherwise unmodified.
    pub generator: bool,
    /// The merge expression (e.g. `"Object.assign"`) handed to the
    /// spread-merge collaborator when it rewrites spreads inside method
    /// bodies. This pass itself never consumes it.
    pub object_assign: Option<String>,
}

impl Opts {
    pub fn new() -> Opts {
        Opts {
            computed_property: true,
            concise_method_property: true,
            generator: true,
            object_assign: None,
        }
    }
}

impl Default for Opts {
    fn default() -> Opts {
        Opts::new()
    }
}
