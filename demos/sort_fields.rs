use std::fs::File;
use std::io::{self, BufRead, BufReader};

use nabarg::{CommandLineOption, GetOpt};

fn main() -> io::Result<()> {
    let mut separator = "|".to_string();
    let mut field: i64 = 0;
    let mut verbose = false;
    let mut numeric = false;
    let mut file = String::default();
    let mut file2: Option<String> = None;

    let parsed = GetOpt::new("sort_fields")
        .about("Sorts input rows based on a delimited field.")
        .add(
            CommandLineOption::string(('s', "separator"), |value| separator = value)
                .help("Field separator."),
        )
        .add(
            CommandLineOption::switch(('v', "verbose"), || verbose = true)
                .help("Show more info about found files."),
        )
        .add(CommandLineOption::switch('V', || println!("Version: 1.0")).help("Show version."))
        .add(CommandLineOption::switch("numeric", || numeric = true).help("Sort numerically."))
        .add(
            CommandLineOption::integer(('f', "field"), |value| field = value)
                .help("Which field to sort by. Default = 0"),
        )
        .add(
            CommandLineOption::positional("file", |value| file = value)
                .help("The file to sort, or '-' for standard input."),
        )
        .add(CommandLineOption::positional("file2", |value| file2 = Some(value)).optional())
        .build()
        .parse();

    if verbose {
        println!("Starting...");
    }

    let input: Box<dyn BufRead> = match file.as_str() {
        "-" => Box::new(BufReader::new(io::stdin())),
        path => Box::new(BufReader::new(File::open(path)?)),
    };
    let index = usize::try_from(field).unwrap_or_default();
    let mut rows = Vec::default();

    for line in input.lines() {
        let line = line?;
        let key = line
            .split(separator.as_str())
            .nth(index)
            .unwrap_or_default()
            .to_string();
        rows.push((key, line));
    }

    if numeric {
        rows.sort_by_key(|(key, _)| key.trim().parse::<i64>().unwrap_or(i64::MAX));
    } else {
        rows.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    for (_, line) in rows {
        println!("{line}");
    }

    if let Some(file2) = file2 {
        println!("A second file '{file2}' was included.");
    }

    for additional in parsed.additional() {
        println!("Another parameter '{additional}' was included.");
    }

    Ok(())
}
