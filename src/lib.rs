//! Lowers ES2015 object-literal syntax to ES5.
//!
//! Three sugars are rewritten: shorthand properties (`{ x }`), concise and
//! generator methods (`{ foo() {} }`, `{ *gen() {} }`), and computed keys
//! (`{ [expr]: v }`). Everything else in the input is preserved. The pass
//! tracks scopes so the names it invents — function-expression names for
//! methods and hoisted temporaries for linearized literals — never capture
//! or shadow an existing binding.

pub mod constructors;
pub mod fv;
mod hoist;
pub mod keys;
mod lower;
mod opts;
mod parser;
mod pretty_ast;
pub mod resolve;
pub mod scope;
pub mod syntax;
pub mod walk;

#[cfg(test)]
mod testing;

pub use lower::lower_objects;
pub use opts::Opts;
pub use parser::{parse, ParseError, ParseResult};
pub use syntax::*;

/// Parse, lower, and print in one step. The program's own top-level block
/// prints without braces.
pub fn lower(js_code: &str, opts: &Opts) -> ParseResult<String> {
    let mut program = parse(js_code)?;
    lower_objects(&mut program, opts);
    let out = match program {
        Stmt::Block(stmts) => stmts
            .iter()
            .map(|s| s.to_pretty(80))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_pretty(80),
    };
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn end_to_end() {
        let out = lower("fn({ [k]: 1, x });", &Opts::new()).unwrap();
        assert!(out.contains("var obj;"));
        assert!(out.contains("obj[k] = 1"));
        assert!(out.contains("obj.x = x"));
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(lower("var o = { get x() {} };", &Opts::new()).is_err());
    }
}
