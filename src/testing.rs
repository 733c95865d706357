//! Helpers shared by the pass tests: lower a source string and compare the
//! printed result against the printed parse of the expected source, so the
//! comparison ignores formatting but nothing else.

use crate::{lower_objects, parse, Opts};

pub const WIDTH: usize = 80;

pub fn lowered_source(src: &str, opts: &Opts) -> String {
    let mut ast = parse(src).expect("input program must parse");
    lower_objects(&mut ast, opts);
    ast.to_pretty(WIDTH)
}

pub fn expect_lowered_with(opts: &Opts, input: &str, expected: &str) {
    let expected_ast = parse(expected).expect("expected program must parse");
    assert_eq!(lowered_source(input, opts), expected_ast.to_pretty(WIDTH));
}

pub fn expect_lowered(input: &str, expected: &str) {
    expect_lowered_with(&Opts::new(), input, expected);
}

pub fn expect_unchanged(opts: &Opts, input: &str) {
    expect_lowered_with(opts, input, input);
}
