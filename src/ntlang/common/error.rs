use std::fmt::Debug;

use nonempty::NonEmpty;

/// Common surface of every diagnostic the pipeline can produce, whether it
/// came out of the lexer, the parser or the evaluator.
pub trait NtError: Debug {
    fn get_info(&self) -> ErrorInfo;
    /// The error class shown in the `[ERRO]` banner line, e.g. "Erro Sintático".
    fn get_title(&self) -> String;
    fn get_message(&self) -> String;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ErrorInfo {
    pub line: usize,
    pub column: usize,
}

pub type NtResult<A> = Result<A, NonEmpty<Box<dyn NtError>>>;

const BANNER: &str = "========================================";

/// Renders the user-facing diagnostic. The shape is fixed; callers only
/// supply the file name the program was read from.
pub fn render_banner(error: &dyn NtError, file: &str) -> String {
    let info = error.get_info();
    format!(
        "{banner}\n[ERRO] {title}\n{banner}\nDetalhes:\n  - Arquivo: {file}\n  - Linha: {line}\n  - Coluna: {column}\n  - Contexto: {message}",
        banner = BANNER,
        title = error.get_title(),
        file = file,
        line = info.line,
        column = info.column,
        message = error.get_message(),
    )
}

pub fn convert_errors<A, E: NtError + 'static>(result: Result<A, NonEmpty<E>>) -> NtResult<A> {
    result.map_err(|e| e.map::<Box<dyn NtError>, _>(|a| Box::new(a)))
}

pub fn convert_error<A, E: NtError + 'static>(result: Result<A, E>) -> NtResult<A> {
    convert_errors(result.map_err(|e| NonEmpty::new(e)))
}
