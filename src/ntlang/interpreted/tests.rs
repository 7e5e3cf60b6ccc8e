#[cfg(test)]
use {
    crate::ntlang::common::tests::unsafe_tokenize,
    crate::ntlang::interpreted::annotated_ast::AnnotatedProgram,
    crate::ntlang::interpreted::parser::parse,
};

#[cfg(test)]
pub fn unsafe_parse(program: Vec<&str>) -> AnnotatedProgram {
    parse(&unsafe_tokenize(program)).expect("Failed to parse")
}
