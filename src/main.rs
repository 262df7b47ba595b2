// sablec: compiler driver for the Sable language.

use std::env;
use std::fs;
use std::process;

use sable::intern::Interner;
use sable::parser::dump;
use sable::parser::parse::Parser;
use sable::resolver::package::Package;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: sablec <file.sb> <output>");
        process::exit(1);
    }
    let input = &args[1];
    let output = &args[2];

    let source = match fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {input}: {err}");
            process::exit(1);
        }
    };

    let mut interner = Interner::new();
    let file = match Parser::new(input, &source, &mut interner).and_then(Parser::parse_file) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let mut out = dump::dump_file(&file, &interner);

    let mut package = Package::new(&mut interner);
    let result = package
        .add_file(file, &interner)
        .and_then(|()| package.resolve_all(&interner));
    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }

    // No code generator yet: the output is the AST dump plus the
    // resolution-order log.
    out.push('\n');
    out.push_str(&package.dump_order(&interner));
    if let Err(err) = fs::write(output, out) {
        eprintln!("error: cannot write {output}: {err}");
        process::exit(1);
    }
}
