//! Input-trace language.
//!
//! A trace is a line-oriented script of input events that drives one part
//! without a browser. It is used by the `partsim run` command and by tests.
//!
//! # Grammar Overview
//!
//! ```text
//! trace     = { line }
//! line      = comment | directive | command | empty
//! comment   = ('#' | ';') { any_char }
//! directive = '.' name { argument }
//! command   = name { number | identifier }
//!
//! number    = ['-'|'+'] digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! name      = (letter | '_') { letter | digit | '_' | '-' }
//! ```
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .part | Select the part (once) | `.part <name>` |
//! | .range | Reconfigure the value range | `.range <min> <max> [step]` |
//! | .layout | Anchor screen CTM | `.layout <a> <b> <c> <d> <e> <f>` |
//! | .zoom | Display zoom | `.zoom <v>` or `.zoom none` |
//! | .detach-layout | Anchor geometry unavailable | `.detach-layout` |
//! | .mount / .unmount | Insert into / remove from the viewport | `.mount` |
//!
//! # Commands
//!
//! | Command | Scope | Syntax |
//! |---------|-------|--------|
//! | mousedown, touchstart, touchend, keyup | element | `mousedown` |
//! | keydown | element | `keydown [ArrowLeft\|ArrowRight\|...]` |
//! | touchmove | element | `touchmove <x> <y> { <x> <y> }` |
//! | move | viewport | `move <x> <y>` |
//! | mouseup, leave | viewport | `mouseup` |
//! | input, set | value | `input <v>` |
//! | min, max, step | config | `max <v>` |
//! | expect | assertion | `expect <v>` |
//!
//! # Example
//!
//! ```text
//! .part slide-potentiometer
//! .layout 4 0 0 4 100 50     # 4 px per mm, case at page (100, 50)
//! .mount
//! mousedown
//! move 190 60                # (190 - 100) / 4 = 22.5 mm -> centre of travel
//! expect 50
//! mouseup
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a trace string into an AST.
pub fn parse(input: &str) -> Result<TraceAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a trace file.
pub fn parse_file(path: &std::path::Path) -> Result<TraceAst> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::PartsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}
