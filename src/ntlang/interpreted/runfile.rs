use std::fs::read_to_string;
use std::io;

use crate::ntlang::common::error::render_banner;
use crate::ntlang::common::lexer::tokenize;
use crate::ntlang::interpreted::interpreter::input::StdinInput;
use crate::ntlang::interpreted::interpreter::interpret;
use crate::ntlang::interpreted::parser::parse;

pub fn run_file(file: &str) {
    let source = read_to_string(file)
        .expect(format!("Cannot open file {}", file).as_ref());
    run(file, &source);
}

pub fn run(file_name: &str, source: &str) {
    let program = match tokenize(source).and_then(|tokens| parse(&tokens)) {
        Ok(program) => program,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", render_banner(error.as_ref(), file_name));
            }
            return;
        }
    };
    let mut stdout = io::stdout();
    let mut input = StdinInput;
    // Semantic errors are rendered to the sink by interpret itself.
    if let Ok(markup) = interpret(&program, file_name, &mut stdout, &mut input) {
        if !markup.is_empty() {
            println!("{}", markup);
        }
    }
}
