use diagnostics::{format_diagnostic, Diagnostic};
use interpreter::Interpreter;
use lexer::Lexer;
use parser::Parser;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use syntax::ast::Stmt;
use syntax::TokenType;

#[derive(clap::Parser, Debug)]
#[command(name = "tamarin", version, about = "An interpreter for the tamarin scripting language", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a script file
    Run {
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Dump the token stream of a script file
    Tokens {
        #[arg(required = true)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = <Args as clap::Parser>::parse();

    match args.command {
        None => run_prompt(),
        Some(Commands::Run { path }) => run_file(&path),
        Some(Commands::Tokens { path, json }) => dump_tokens(&path, json),
    }
}

fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file {}: {}", path.display(), e);
            process::exit(74);
        }
    }
}

fn run_file(path: &Path) {
    let source = read_source(path);
    let mut parser = Parser::new(Lexer::new(&source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        for message in parser.errors() {
            eprintln!("{}", format_diagnostic(&Diagnostic::parse(message.clone())));
        }
        process::exit(65);
    }

    let mut interpreter = Interpreter::new();
    let result = interpreter.interpret(&program);
    // A script whose last statement only binds has nothing to show.
    if !matches!(program.statements.last(), None | Some(Stmt::Let { .. })) {
        println!("{}", result);
    }
}

fn run_prompt() {
    println!("tamarin {}", env!("CARGO_PKG_VERSION"));
    let mut interpreter = Interpreter::new();
    loop {
        print!(">> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() || line.trim().is_empty() {
            break;
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            for message in parser.errors() {
                eprintln!("{}", format_diagnostic(&Diagnostic::parse(message.clone())));
            }
            continue;
        }

        let result = interpreter.interpret(&program);
        if !matches!(program.statements.last(), None | Some(Stmt::Let { .. })) {
            println!("{}", result);
        }
    }
}

fn dump_tokens(path: &Path, json: bool) {
    let source = read_source(path);
    let tokens = Lexer::tokenize(&source);

    if json {
        #[derive(Serialize)]
        struct TokenRecord {
            kind: String,
            literal: String,
        }

        let records: Vec<TokenRecord> = tokens
            .iter()
            .map(|token| TokenRecord {
                kind: token.token_type.to_string(),
                literal: token.lexeme.clone(),
            })
            .collect();

        match serde_json::to_string(&records) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize tokens: {}", e);
                process::exit(70);
            }
        }
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    for token in &tokens {
        if token.token_type == TokenType::Illegal {
            let d = Diagnostic::lex(format!("illegal token {:?}", token.lexeme));
            eprintln!("{}", format_diagnostic(&d));
        }
    }
}
