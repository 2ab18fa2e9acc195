use nabarg::{Args, ArgsError};

fn main() -> Result<(), ArgsError> {
    let args = Args::new();

    // Nothing is consumed until the file is forced, so the queries below claim their tokens first.
    let file = args.next_argument();
    let verbose = args.flag(('v', "verbose"));
    let iterations: u32 = args.get_or(('i', "iterations"), 100)?;
    let includes: Vec<String> = args.get_all("include")?;

    if args.flag(('h', "help")) {
        args.print_usage();
        return Ok(());
    }

    let file = file.into_string()?;

    if verbose {
        println!("Reading {file} over {iterations} iterations.");
    }

    for include in includes {
        println!("Including {include}.");
    }

    Ok(())
}
