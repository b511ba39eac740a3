use std::{
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
    rc::Rc,
    time::Instant,
};

use squanchy::{
    build_ast, display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::fold::{fold_constants, ConstantFolder},
};

const USAGE: &str = concat!(
    "usage: squanchy <file> | --terminal | --tokens <file>",
    " | --benchmark <file> [repetitions]"
);

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--terminal") => terminal(),
        Some("--tokens") => tokens(args.get(2).map(String::as_str)),
        Some("--benchmark") => {
            let repetitions = args
                .get(3)
                .and_then(|count| count.parse().ok())
                .unwrap_or(100);
            benchmark(args.get(2).map(String::as_str), repetitions)
        }
        Some(file_path) => run_file(file_path),
        None => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    }
}

fn read_source(file_path: Option<&str>) -> (String, String) {
    let Some(file_path) = file_path else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };

    let file_name = PathBuf::from(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string());
    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(1);
        }
    };

    (file_name, file_contents)
}

fn run_file(file_path: &str) {
    let (file_name, source) = read_source(Some(file_path));
    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (module, mut scope) = match parse(tokens, Rc::new(file_name)) {
        Ok(parsed) => parsed,
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let fold_start = Instant::now();
    let report = fold_constants(&module, &mut scope, &ConstantFolder);

    println!("Folded in {:?}", fold_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    println!("{}", module);
    println!("{}", scope);
    for entry in report.unresolved() {
        if let Err(error) = &entry.outcome {
            println!("unresolved {}: {}", entry.name, error);
        }
    }
}

fn tokens(file_path: Option<&str>) {
    let (file_name, source) = read_source(file_path);

    match tokenize(source.clone(), Some(file_name)) {
        Ok(tokens) => tokens.iter().for_each(|token| token.debug()),
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    }
}

fn benchmark(file_path: Option<&str>, repetitions: u32) {
    let (file_name, source) = read_source(file_path);
    let start = Instant::now();

    for _ in 0..repetitions {
        if let Err(error) = build_ast(&source, Some(file_name.clone())) {
            display_error(&error, &source);
            process::exit(1);
        }
    }

    let elapsed = start.elapsed();
    println!("{} runs in {:?}", repetitions, elapsed);
    println!("Average: {:?}", elapsed / repetitions.max(1));
}

/// Line-by-line console. Every line is parsed on its own; errors are
/// reported and the console keeps going.
fn terminal() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!(">>> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let Some(Ok(line)) = lines.next() else {
            return;
        };

        match line.trim() {
            "exit" => return,
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                continue;
            }
            "" => continue,
            _ => {}
        }

        match build_ast(&line, None) {
            Ok(program) => {
                println!("{}", program.module);
                println!("{}", program.scope);
            }
            Err(error) => display_error(&error, &line),
        }
    }
}
