use std::env;
use ngc_zigzag::{segment_with, Program, SegmentOptions};
use ngc_zigzag::error::{self, Error};

fn outline(prog: &Program) {
    println!("{} leading line(s)", prog.leading_lines.len());
    for op in &prog.operations {
        print!("{} [lines {}-{}]", op, op.start_line, op.end_line);
        if let Some(desc) = &op.tool_description {
            print!(" {}", desc);
        }
        println!();
        println!("    header: {} line(s)", op.header_lines.len());
        for wcs in &op.wcs_blocks {
            println!("    {}", wcs);
        }
        println!("    footer: {} line(s)", op.footer_lines.len());
    }
    println!("{} trailing line(s)", prog.trailing_lines.len());
}

fn run() -> error::Result<()> {
    let mut filename = None;
    let mut json = false;
    let mut options = SegmentOptions::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => match args.next() {
                Some(path) => options = error::load_options(path)?,
                None => return Error::usage("--config needs a file name"),
            },
            other if filename.is_none() => filename = Some(other.to_string()),
            other => return Error::usage(format!("unexpected argument {:?}", other)),
        }
    }
    let filename = match filename {
        Some(name) => name,
        None => return Error::usage("usage: ngc-structure FILE [--json] [--config FILE]"),
    };

    let input = error::read_program(&filename)?;
    let prog = segment_with(&input, &options);
    if json {
        println!("{}", serde_json::to_string_pretty(&prog)?);
    } else {
        outline(&prog);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
