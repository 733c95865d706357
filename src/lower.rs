//! The lowering pass: rewrites shorthand properties, concise methods, and
//! computed keys in object literals into ES5 syntax.
//!
//! Literals without computed keys are expanded in place. A literal with a
//! computed key cannot stay a literal past the first computed property, so it
//! splits there: the properties before it remain a literal and everything
//! from it onward becomes member assignments, emitted either as statements
//! after the literal's own `var` statement or as a parenthesized comma
//! sequence threaded through a hoisted temporary.

use super::constructors::*;
use super::fv::free_vars;
use super::hoist::declare_temps;
use super::keys;
use super::opts::Opts;
use super::resolve::resolve;
use super::scope::{ScopeId, ScopeTree};
use super::syntax::*;
use super::walk::*;

pub fn lower_objects(program: &mut Stmt, opts: &Opts) {
    let mut scopes = resolve(program);
    let mut v = LowerObjects {
        scopes: &mut scopes,
        opts,
        stack: vec![ScopeId::PROGRAM],
    };
    program.walk(&mut v);
    declare_temps(program, &scopes);
}

struct LowerObjects<'a> {
    scopes: &'a mut ScopeTree,
    opts: &'a Opts,
    stack: Vec<ScopeId>,
}

impl<'a> LowerObjects<'a> {
    fn current(&self) -> ScopeId {
        *self.stack.last().unwrap()
    }

    /// The function-expression name for a method being expanded, or `None`
    /// when the key yields no usable name. A name that is reserved or free
    /// in the body is replaced with a fresh suffixed one.
    fn synthesize(&mut self, key: &Key, f: &Func) -> Option<Id> {
        if f.generator && !self.opts.generator {
            return None;
        }
        let candidate = keys::candidate_name(key)?;
        if keys::is_reserved(&candidate) || free_vars(f).contains(&candidate) {
            Some(self.scopes.reserve(self.current(), &candidate))
        } else {
            Some(candidate)
        }
    }

    /// In-place expansion of one property: shorthand becomes `x: x`, a
    /// concise method becomes `key: function name() {}` with a normalized
    /// numeric key.
    fn expand_prop(&mut self, p: &mut Property) {
        match p.kind {
            PropKind::Init => (),
            PropKind::Shorthand => p.kind = PropKind::Init,
            PropKind::Method { .. } => {
                if let Key::Num(raw) = &p.key {
                    p.key = Key::Num(keys::normalize_number(raw));
                }
                if let Expr::Func(f) = &mut p.value {
                    f.name = self.synthesize(&p.key, f);
                }
                p.kind = PropKind::Init;
            }
        }
    }

    /// The right-hand side of one linearized assignment. Method values
    /// always become function expressions here; they are only named when
    /// concise-method expansion is on.
    fn suffix_value(&mut self, key: &Key, kind: PropKind, value: Expr) -> Expr {
        match (kind, value) {
            (PropKind::Method { .. }, Expr::Func(mut f)) => {
                if self.opts.concise_method_property {
                    f.name = self.synthesize(key, &f);
                }
                Expr::Func(f)
            }
            (_, value) => value,
        }
    }
}

/// The member lvalue `target.key` or `target[key]` for one linearized
/// property. Identifier-shaped keys take the dot form, reserved words
/// included; everything else goes through brackets.
fn member(target: &Id, key: Key) -> LValue {
    match key {
        Key::Ident(name) => lval_dot_(id_(target.clone()), name),
        Key::Str(s) => {
            if keys::is_valid_identifier(&s) {
                lval_dot_(id_(target.clone()), s)
            } else {
                LValue::Bracket(id_(target.clone()), str_(s))
            }
        }
        Key::Num(raw) => LValue::Bracket(id_(target.clone()), num_(keys::number_value(&raw))),
        Key::Computed(e) => LValue::Bracket(id_(target.clone()), e),
    }
}

impl<'a> Visitor for LowerObjects<'a> {
    fn enter_fn(&mut self, func: &mut Func, _loc: &Loc) {
        self.stack.push(func.resolved_scope());
    }

    fn exit_fn(&mut self, _func: &mut Func, _loc: &Loc) {
        self.stack.pop();
    }

    // exit, not enter: inner literals are already lowered, so linearized
    // values carry no remaining sugar and temporaries are allocated
    // innermost-first
    fn exit_expr(&mut self, expr: &mut Expr, loc: &Loc) {
        if !matches!(expr, Expr::Object(_)) {
            return;
        }
        let mut props = match expr.take() {
            Expr::Object(props) => props,
            _ => unreachable!(),
        };

        let split = if self.opts.computed_property {
            props
                .iter()
                .position(|p| matches!(p.key, Key::Computed(_)))
        } else {
            None
        };
        let split = match split {
            Some(i) => i,
            None => {
                if self.opts.concise_method_property {
                    for p in &mut props {
                        self.expand_prop(p);
                    }
                }
                *expr = Expr::Object(props);
                return;
            }
        };

        let suffix = props.split_off(split);
        if self.opts.concise_method_property {
            for p in &mut props {
                self.expand_prop(p);
            }
        }
        let prefix = Expr::Object(props);

        // a literal initializing the lone declarator of a var statement in a
        // block keeps its own name as the target and the assignments follow
        // as statements; anywhere else the literal is threaded through a
        // hoisted temporary in a comma sequence
        if let Loc::Node(Context::VarDeclRhs { name, lone: true }, rest) = loc {
            if let Loc::Node(Context::Block(ctx), _) = rest {
                let target: Id = name.to_string();
                *expr = prefix;
                for p in suffix {
                    let Property { key, value, kind } = p;
                    let value = self.suffix_value(&key, kind, value);
                    ctx.insert(ctx.index + 1, expr_(assign_(member(&target, key), value)));
                }
                return;
            }
        }

        let temp = self.scopes.allocate(self.current());
        let mut seq = vec![assign_(temp.clone(), prefix)];
        for p in suffix {
            let Property { key, value, kind } = p;
            let value = self.suffix_value(&key, kind, value);
            seq.push(assign_(member(&temp, key), value));
        }
        seq.push(id_(temp));
        *expr = Expr::Seq(seq);
    }
}

#[cfg(test)]
mod test {
    use crate::testing::*;
    use crate::Opts;

    fn no_concise() -> Opts {
        Opts {
            concise_method_property: false,
            ..Opts::new()
        }
    }

    fn no_computed() -> Opts {
        Opts {
            computed_property: false,
            ..Opts::new()
        }
    }

    #[test]
    fn expands_shorthand_properties() {
        expect_lowered("obj = { x, y };", "obj = { x: x, y: y };");
    }

    #[test]
    fn expands_shorthand_methods() {
        expect_lowered(
            "obj = { foo() { return 42; } };",
            "obj = { foo: function foo() { return 42; } };",
        );
    }

    #[test]
    fn mangles_quoted_method_names() {
        expect_lowered(
            "obj = { 'foo-bar'() { return 42; } };",
            "obj = { 'foo-bar': function foo_bar() { return 42; } };",
        );
    }

    #[test]
    fn suffixes_reserved_method_names() {
        expect_lowered(
            "obj = { catch() { return 42; } };",
            "obj = { catch: function catch$1() { return 42; } };",
        );
    }

    #[test]
    fn numeric_and_string_method_names() {
        expect_lowered(
            "obj = {
                0() {},
                0b101() {},
                80() {},
                .12e3() {},
                0o753() {},
                12e34() {},
                0xFFFF() {},
                'a string'() {},
                'var'() {}
            };",
            "obj = {
                0: function () {},
                5: function () {},
                80: function () {},
                .12e3: function () {},
                491: function () {},
                12e34: function () {},
                0xFFFF: function () {},
                'a string': function astring() {},
                'var': function var$1() {}
            };",
        );
    }

    #[test]
    fn avoids_shadowing_free_variables_with_method_names() {
        expect_lowered(
            "var x = {
                foo() { return foo; },
                bar() {}
            };",
            "var x = {
                foo: function foo$1() { return foo; },
                bar: function bar() {}
            };",
        );
    }

    #[test]
    fn method_name_avoids_a_declared_binding() {
        // the var appears after the literal in the source; resolution still
        // sees it
        expect_lowered(
            "obj = { foo() { return foo; } }; var foo = 1;",
            "obj = { foo: function foo$1() { return foo; } }; var foo = 1;",
        );
    }

    #[test]
    fn concise_expansion_can_be_disabled() {
        expect_unchanged(&no_concise(), "var obj = { x, y, z() {} };");
    }

    #[test]
    fn computed_lowering_can_be_disabled() {
        expect_unchanged(&no_computed(), "var obj = { [x]: 'x' };");
    }

    #[test]
    fn lone_var_literal_splits_into_statements() {
        expect_lowered(
            "var obj = {
                [a]: 1,
                b: 2,
                [c]: 3,
                [d]: 4,
                e: 5,
                [f]: 6
            };",
            "var obj = {};
            obj[a] = 1;
            obj.b = 2;
            obj[c] = 3;
            obj[d] = 4;
            obj.e = 5;
            obj[f] = 6;",
        );
    }

    #[test]
    fn properties_before_the_first_computed_key_stay_in_the_literal() {
        expect_lowered(
            "var obj = { a: 1, x, [b]: 2, c: 3 };",
            "var obj = { a: 1, x: x };
            obj[b] = 2;
            obj.c = 3;",
        );
    }

    #[test]
    fn multi_declarator_var_uses_a_temporary() {
        expect_lowered(
            "var a = 'foo', obj = { [a]: 'bar', x: 42 }, bar = obj.foo;",
            "var obj$1;
            var a = 'foo', obj = (obj$1 = {}, obj$1[a] = 'bar', obj$1.x = 42, obj$1), bar = obj.foo;",
        );
    }

    #[test]
    fn call_arguments_use_a_temporary() {
        expect_lowered(
            "fn({ ['computed']: 1, 'some-var': 2, a: 3 });",
            "var obj;
            fn((obj = {}, obj['computed'] = 1, obj['some-var'] = 2, obj.a = 3, obj));",
        );
    }

    #[test]
    fn one_temporary_per_literal() {
        expect_lowered(
            "if (1)
                console.log(JSON.stringify({ ['com' + 'puted']: 1, ['foo']: 2 }));
            else
                console.log(JSON.stringify({ ['bar']: 3 }));",
            "var obj, obj$1;
            if (1)
                console.log(JSON.stringify((obj = {}, obj['com' + 'puted'] = 1, obj['foo'] = 2, obj)));
            else
                console.log(JSON.stringify((obj$1 = {}, obj$1['bar'] = 3, obj$1)));",
        );
    }

    #[test]
    fn nested_literals_allocate_innermost_first() {
        expect_lowered(
            "(function () { return { [key]: { [key]: val } }; });",
            "(function () {
                var obj, obj$1;
                return (obj$1 = {}, obj$1[key] = (obj = {}, obj[key] = val, obj), obj$1);
            });",
        );
    }

    #[test]
    fn temporaries_live_in_the_enclosing_function_scope() {
        expect_lowered(
            "(function (x) { var obj = 2; console.log([{ [x]: 1 }, obj]); })(3);",
            "(function (x) {
                var obj$1;
                var obj = 2;
                console.log([(obj$1 = {}, obj$1[x] = 1, obj$1), obj]);
            })(3);",
        );
    }

    #[test]
    fn temporary_avoids_free_variables_of_inner_functions() {
        // the arrow body references an outer `obj`, so the temporary must
        // not capture it
        expect_lowered(
            "foo => bar({ [x - y]: obj });",
            "(function (foo) {
                var obj$1;
                return bar((obj$1 = {}, obj$1[x - y] = obj, obj$1));
            });",
        );
    }

    #[test]
    fn computed_methods_linearize_as_function_expressions() {
        expect_lowered(
            "var o = { [k]() { return 1; }, *[g]() { yield 2; } };",
            "var o = {};
            o[k] = function () { return 1; };
            o[g] = function* () { yield 2; };",
        );
    }

    #[test]
    fn named_methods_after_a_computed_key_keep_their_names() {
        expect_lowered(
            "var o = { [k]: 1, foo() { return 2; } };",
            "var o = {};
            o[k] = 1;
            o.foo = function foo() { return 2; };",
        );
    }

    #[test]
    fn suffix_methods_stay_anonymous_without_concise_expansion() {
        expect_lowered_with(
            &no_concise(),
            "var o = { [k]: 1, foo() { return 2; } };",
            "var o = {};
            o[k] = 1;
            o.foo = function () { return 2; };",
        );
    }

    #[test]
    fn generator_methods_expand_with_the_star() {
        expect_lowered(
            "obj = { *gen() { yield 1; } };",
            "obj = { gen: function* gen() { yield 1; } };",
        );
    }

    #[test]
    fn generator_naming_can_be_disabled() {
        let opts = Opts {
            generator: false,
            ..Opts::new()
        };
        expect_lowered_with(
            &opts,
            "var o = { [k]: 1, *gen() { yield 2; } };",
            "var o = {};
            o[k] = 1;
            o.gen = function* () { yield 2; };",
        );
    }

    #[test]
    fn numeric_keys_after_a_computed_key_use_their_value() {
        expect_lowered(
            "var o = { [k]: 1, 0b101: 2, 0xFFFF: 3, 'q-r': 4 };",
            "var o = {};
            o[k] = 1;
            o[5] = 2;
            o[65535] = 3;
            o['q-r'] = 4;",
        );
    }

    #[test]
    fn untouched_literals_are_left_alone() {
        expect_unchanged(&Opts::new(), "var o = { a: 1, 'b c': 2, 3: f() };");
    }

    #[test]
    fn lowering_is_idempotent() {
        let once = lowered_source("var o = { [k]: 1, x, foo() {} };", &Opts::new());
        let twice = lowered_source(&once, &Opts::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn var_statement_outside_a_block_uses_a_temporary() {
        // a braceless if arm has no block to receive the assignments
        expect_lowered(
            "if (c) var x = { [a]: 1 };",
            "var obj;
            if (c) var x = (obj = {}, obj[a] = 1, obj);",
        );
    }
}
