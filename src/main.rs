use std::env;

use ntlang::interpreted::runfile::run_file;

pub mod ntlang;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        panic!("Usage: ntlang <script.nt>");
    }
    run_file(&args[1]);
}
