//! Grammars shipped with the engine.
//!
//! # Turtle
//!
//! A small turtle-graphics language, one command per line:
//!
//! ```text
//! # a square
//! learn square {
//!     repeat 4 {
//!         forward 100
//!         turnright 90
//!     }
//! }
//! pendown
//! square
//! print "done"
//! ```
//!
//! Keywords are case-insensitive. `{` and `}` are words, so they must be
//! separated from their neighbours by whitespace.

use tortue_lexer::{TokenKind, TokenizerConfig};

use crate::{CharClass, Grammar, GrammarBuilder, GrammarError, GrammarRegistry, RuleId};

/// Name under which [`turtle`] registers.
pub const TURTLE: &str = "turtle";

/// Every built-in grammar, in a fresh registry.
pub fn registry() -> Result<GrammarRegistry, GrammarError> {
    Ok([turtle()?].into_iter().collect())
}

pub fn turtle() -> Result<Grammar, GrammarError> {
    let mut b = GrammarBuilder::new(TURTLE);
    b.extension("turtle").extension("tt").config(
        TokenizerConfig::default()
            .with_single_line_comment("#")
            .with_case_sensitive(false),
    );

    let name = {
        let ident = b.identifier();
        let end = b.char_class(CharClass::EndOfWord);
        b.sequence([ident, end])
    };
    b.define("name", name)?;

    let movement = {
        let verb = keywords(&mut b, &["forward", "fw", "backward", "bw"]);
        let distance = b.token(TokenKind::Number);
        b.sequence([verb, distance])
    };
    b.define("move", movement)?;

    let turn = {
        let verb = keywords(
            &mut b,
            &["turnleft", "tl", "turnright", "tr", "direction", "dir"],
        );
        let angle = b.token(TokenKind::Number);
        b.sequence([verb, angle])
    };
    b.define("turn", turn)?;

    let pen = keywords(
        &mut b,
        &["penup", "pu", "pendown", "pd", "clear", "cls", "reset", "center"],
    );
    b.define("pen", pen)?;

    let go = {
        let verb = b.literal("go");
        let x = b.token(TokenKind::Number);
        let y = b.token(TokenKind::Number);
        b.sequence([verb, x, y])
    };
    b.define("go", go)?;

    let print = {
        let verb = b.literal("print");
        let text = b.token(TokenKind::LiteralString);
        let number = b.token(TokenKind::Number);
        let value = b.choice([text, number]);
        b.sequence([verb, value])
    };
    b.define("print", print)?;

    let repeat = {
        let verb = b.literal("repeat");
        let times = b.token(TokenKind::Number);
        let block = b.reference("block");
        b.sequence([verb, times, block])
    };
    b.define("repeat", repeat)?;

    let learn = {
        let verb = b.literal("learn");
        let procedure = b.reference("name");
        let block = b.reference("block");
        b.sequence([verb, procedure, block])
    };
    b.define("learn", learn)?;

    let call = {
        let procedure = b.reference("name");
        let argument = b.token(TokenKind::Number);
        let arguments = b.zero_or_more(argument);
        b.sequence([procedure, arguments])
    };
    b.define("call", call)?;

    // Keywords before `call`, which would accept any of them as a name.
    let statement = {
        let alternatives = ["move", "turn", "pen", "go", "print", "repeat", "learn", "call"]
            .map(|rule| b.reference(rule));
        b.choice(alternatives)
    };
    b.define("statement", statement)?;

    let body = {
        let newline = b.token(TokenKind::Newline);
        let statement = b.reference("statement");
        let line = b.choice([newline, statement]);
        b.zero_or_more(line)
    };
    b.define("body", body)?;

    let block = {
        let open = b.literal("{");
        let body = b.reference("body");
        let close = b.literal("}");
        b.sequence([open, body, close])
    };
    b.define("block", block)?;

    let program = {
        let body = b.reference("body");
        let end = b.token(TokenKind::EndOfStream);
        b.sequence([body, end])
    };
    b.define("program", program)?;

    b.root_named("program");
    b.build()
}

fn keywords(b: &mut GrammarBuilder, words: &[&str]) -> RuleId {
    let literals: Vec<RuleId> = words.iter().map(|word| b.literal(*word)).collect();
    b.choice(literals)
}
