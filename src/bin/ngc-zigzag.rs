use std::env;
use ngc_zigzag::{segment_with, optimize_text, preview, SegmentOptions};
use ngc_zigzag::error::{self, Error};

fn run() -> error::Result<()> {
    let mut filename = None;
    let mut show_preview = false;
    let mut options = SegmentOptions::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preview" => show_preview = true,
            "--config" => match args.next() {
                Some(path) => options = error::load_options(path)?,
                None => return Error::usage("--config needs a file name"),
            },
            "--boundary" => match args.next().map(|s| s.parse()) {
                Some(Ok(strategy)) => options.boundary = strategy,
                _ => return Error::usage("--boundary needs line_number_or_tool_change or annotated"),
            },
            other if filename.is_none() => filename = Some(other.to_string()),
            other => return Error::usage(format!("unexpected argument {:?}", other)),
        }
    }
    let filename = match filename {
        Some(name) => name,
        None => return Error::usage("usage: ngc-zigzag FILE [--preview] [--boundary STRATEGY] [--config FILE]"),
    };

    let input = error::read_program(&filename)?;
    if show_preview {
        println!("{}", preview(&segment_with(&input, &options)));
    } else {
        print!("{}", optimize_text(&input, &options));
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
