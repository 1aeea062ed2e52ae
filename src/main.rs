use std::env;

use dynvar::{
    dispatch::{self, operator::OperatorKind},
    runtime::{generic_value::GenericValue, stats, type_id::PrimitiveKind},
};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let trace = args.iter().any(|arg| arg == "--trace");
    let show_stats = args.iter().any(|arg| arg == "--stats");
    let json = args.iter().any(|arg| arg == "--json");
    if trace {
        args.retain(|arg| arg != "--trace");
    }
    if show_stats {
        args.retain(|arg| arg != "--stats");
    }
    if json {
        args.retain(|arg| arg != "--json");
    }
    let op = match extract_op(&mut args) {
        Some(value) => value,
        None => std::process::exit(1),
    };

    if args.len() < 2 {
        print_help();
        return;
    }

    dispatch::init();

    let ok = match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            true
        }
        "types" => {
            show_types();
            true
        }
        "matrix" => show_matrix(op, json),
        "fingerprint" => {
            println!("{}", dispatch::global().fingerprint());
            true
        }
        "eval" => {
            if args.len() < 7 {
                eprintln!("Usage: dynvar eval <kind> <text> <op> <kind> <text>");
                std::process::exit(1);
            }
            eval(&args[2..7], trace)
        }
        other => {
            eprintln!("Error: unknown command `{}`.", other);
            print_help();
            false
        }
    };

    if show_stats {
        print_stats();
    }
    if !ok {
        std::process::exit(1);
    }
}

fn print_help() {
    println!(
        "\
dynvar CLI

Usage:
  dynvar types
  dynvar matrix [--op <symbol|name>] [--json]
  dynvar fingerprint
  dynvar eval <kind> <text> <op> <kind> <text>

Flags:
  --op <op>      Render the type-pair grid of one operator
  --json         Print the coverage report as JSON
  --trace        Print each dispatch with operand types and result
  --stats        Print cell and dispatch counters before exiting
  -h, --help     Show this help message
"
    );
}

fn extract_op(args: &mut Vec<String>) -> Option<Option<OperatorKind>> {
    let mut op = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--op" {
            if i + 1 >= args.len() {
                eprintln!("Usage: dynvar matrix --op <symbol|name>");
                return None;
            }
            let value = args.remove(i + 1);
            args.remove(i);
            match OperatorKind::parse(&value) {
                Some(parsed) => {
                    op = Some(parsed);
                }
                None => {
                    eprintln!("Error: --op expects an operator symbol or name, got `{}`.", value);
                    return None;
                }
            }
            continue;
        }
        i += 1;
    }
    Some(op)
}

fn show_types() {
    println!("{:<6} {:>5}  {}", "kind", "bytes", "class");
    for kind in PrimitiveKind::ALL {
        let class = if kind.is_float() {
            "float"
        } else {
            "integral"
        };
        println!("{:<6} {:>5}  {}", kind.label(), kind.byte_size(), class);
    }
    println!();
    println!("{:<8} {:<4} {:?}", "op", "sym", "family");
    for op in OperatorKind::ALL {
        println!("{:<8} {:<4} {:?}", op.display_name(), op.symbol(), op.family());
    }
}

fn show_matrix(op: Option<OperatorKind>, json: bool) -> bool {
    let registry = dispatch::global();
    if let Some(op) = op {
        print!("{}", registry.render_matrix(op));
        return true;
    }

    let report = registry.coverage();
    if json {
        match report.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error encoding coverage report: {}", e);
                return false;
            }
        }
    } else {
        println!("{}", report);
    }
    true
}

/// Returns whether the expression evaluated.
fn eval(parts: &[String], trace: bool) -> bool {
    let lhs = match parse_operand(&parts[0], &parts[1]) {
        Some(value) => value,
        None => return false,
    };
    let Some(op) = OperatorKind::parse(&parts[2]) else {
        eprintln!("Error: unknown operator `{}`.", parts[2]);
        return false;
    };
    let rhs = match parse_operand(&parts[3], &parts[4]) {
        Some(value) => value,
        None => return false,
    };

    let result = lhs.apply(op, &rhs);
    if trace {
        let outcome = match &result {
            Ok(value) => format!("{} {}", value.runtime_type_id().label(), value),
            Err(e) => format!("error {}", e.code().code),
        };
        println!(
            "[dispatch] {} {} {} -> {}",
            lhs.runtime_type_id().label(),
            op.display_name(),
            rhs.runtime_type_id().label(),
            outcome
        );
    }

    match result {
        Ok(value) => {
            println!("{}", value);
            true
        }
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    }
}

fn parse_operand(kind: &str, text: &str) -> Option<GenericValue> {
    let Some(kind) = PrimitiveKind::from_label(kind) else {
        eprintln!("Error: unknown primitive kind `{}`.", kind);
        return None;
    };
    match GenericValue::parse_as(kind, text) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

fn print_stats() {
    let stats = stats::snapshot();
    println!(
        "\nRuntime stats:\n  cells_created: {}\n  cells_cloned: {}\n  cells_released: {}\n  live_cells: {}\n  dispatch_hits: {}\n  dispatch_misses: {}",
        stats.cells_created,
        stats.cells_cloned,
        stats.cells_released,
        stats.live_cells(),
        stats.dispatch_hits,
        stats.dispatch_misses
    );
}
