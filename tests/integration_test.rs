// Integration tests for the Sable front end: lex, parse and resolve whole
// programs the way the driver does.

use pretty_assertions::assert_eq;

use sable::intern::Interner;
use sable::parser::dump::dump_file;
use sable::parser::parse::Parser;
use sable::resolver::package::Package;
use sable::resolver::symbol::{OrderStage, SymbolState};

fn compile(src: &str) -> Result<(Package, Interner), String> {
    let mut interner = Interner::new();
    let file = Parser::new("main.sb", src, &mut interner)
        .and_then(Parser::parse_file)
        .map_err(|err| err.to_string())?;
    let mut package = Package::new(&mut interner);
    package
        .add_file(file, &interner)
        .and_then(|()| package.resolve_all(&interner))
        .map_err(|err| err.to_string())?;
    Ok((package, interner))
}

#[test]
fn test_small_program() {
    let src = r#"
const max_retries = 3

struct Connection {
    fd: i32,
    retries: u32,
}

enum State {
    Closed,
    Open(i32),
}

type Fd = i32

extern fn write(fd: i32, len: usize) -> isize
extern let errno: i32

fn retry_delay(attempt: u32) -> u32 {
    return attempt * 100 + 50
}

fn main() -> i32 {
    let delay = retry_delay(2)
    let conn = Connection{fd: 1, retries: 0,}
    if delay > 1000 {
        return 1
    } else {
        delay = delay + 1
    }
    for delay > 0 {
        delay = delay - 1
    }
    return 0
}
"#;

    let (package, interner) = compile(src).expect("program should compile");

    // Every top-level symbol got declared by the sweep.
    assert_eq!(package.top_level().len(), 8);
    for &id in package.top_level() {
        assert!(package.symbol(id).state >= SymbolState::Declared);
    }

    // The order log records one declaration per top-level symbol.
    let declared: Vec<&str> = package
        .order()
        .iter()
        .filter(|entry| entry.stage == OrderStage::Declared)
        .map(|entry| interner.resolve(entry.name))
        .collect();
    assert_eq!(
        declared,
        vec![
            "max_retries",
            "Connection",
            "State",
            "Fd",
            "write",
            "errno",
            "retry_delay",
            "main",
        ]
    );
}

#[test]
fn test_demand_driven_resolution() {
    let src = "type Fd = i32\nextern fn close(fd: Fd) -> i32\n";
    let (mut package, mut interner) = compile(src).expect("program should compile");

    let close = package
        .lookup(interner.intern("close"))
        .expect("close symbol");
    // The sweep only declared it.
    assert_eq!(package.symbol(close).state, SymbolState::Declared);

    package.resolve(close, &interner).expect("resolve close");
    assert_eq!(package.symbol(close).state, SymbolState::Resolved);
    let ty = package.symbol(close).ty.expect("close type");
    assert_eq!(package.type_display(ty, &interner), "fn(i32) -> i32");

    // Resolving the function pulled its parameter alias along.
    let fd = package.lookup(interner.intern("Fd")).expect("Fd symbol");
    assert_eq!(package.symbol(fd).state, SymbolState::Resolved);
}

#[test]
fn test_shared_signatures_share_identity() {
    let src = "extern fn read(fd: i32, len: usize) -> isize\n\
               extern fn write(fd: i32, len: usize) -> isize\n";
    let (mut package, mut interner) = compile(src).expect("program should compile");

    let read = package.lookup(interner.intern("read")).expect("read");
    let write = package.lookup(interner.intern("write")).expect("write");
    package.resolve(read, &interner).expect("resolve read");
    package.resolve(write, &interner).expect("resolve write");

    assert_eq!(package.symbol(read).ty, package.symbol(write).ty);
}

#[test]
fn test_duplicate_name_reports_both_sites() {
    let err = compile("fn init() { }\nstruct init { }\n").unwrap_err();
    assert_eq!(
        err,
        "main.sb:2:8: resolve warning: symbol 'init' already declared in this package.\n\
         main.sb:1:4: resolve error: previous definition was here."
    );
}

#[test]
fn test_type_cycle_is_fatal() {
    let err = compile("struct Tree {\n    left: Node,\n}\nstruct Node {\n    tree: Tree,\n}\n")
        .unwrap_err();
    assert!(err.contains("resolve error: cyclic dependency for symbol"), "{err}");
}

#[test]
fn test_first_error_wins() {
    // The file has both a lexical error and (later) a duplicate name; only
    // the first is ever reported.
    let err = compile("const a = 0x\nfn a() { }\n").unwrap_err();
    assert_eq!(err, "main.sb:1:11: parse error: malformed hex constant");
}

#[test]
fn test_dump_of_whole_program() {
    let src = "fn grow(n: u32) -> u32 {\n    return n * 2\n}\n";
    let mut interner = Interner::new();
    let file = Parser::new("main.sb", src, &mut interner)
        .and_then(Parser::parse_file)
        .expect("parse");
    let out = dump_file(&file, &interner);
    assert_eq!(
        out,
        "\n- DECL_FN \"grow\"\
         \n|-- RET 'u32'\
         \n|-- ARG \"n\" 'u32'\
         \n`-- BLOCK\
         \n  `-- STMT_RETURN\
         \n    `-- EXPR_BINARY '*'\
         \n      |-- EXPR_IDENT \"n\"\
         \n      `-- EXPR_LIT_INT 2\n"
    );
}

#[test]
fn test_resolve_error_kinds() {
    let err = compile("struct S {\n    x: Missing,\n}\n").unwrap_err();
    assert!(err.contains("resolve error: unresolved name 'Missing'"), "{err}");

    let err = compile("type T = T\n").unwrap_err();
    assert!(
        err.contains("resolve error: cyclic dependency for symbol 'T'"),
        "{err}"
    );
}
