use nabarg::prelude::*;
use nabarg::{Args, ArgsError, CommandLineOption, GetOpt, Query, ReturnError};
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;

fn args(tokens: &[&str]) -> Args {
    Args::from_tokens("exe", tokens).with_error_handler(ReturnError)
}

#[test]
fn next_then_flag() {
    let args = args(&["-a", "maybe parameter", "argument"]);

    let first = args.next_argument();
    let flag = args.flag('a');

    assert!(flag);
    assert_eq!(first.force().unwrap(), "maybe parameter");
}

#[test]
fn next_then_get() {
    let args = args(&["-a", "maybe parameter", "argument"]);

    let first = args.next_argument();
    let parameter: Option<String> = args.get('a').unwrap();

    assert_eq!(parameter.as_deref(), Some("maybe parameter"));
    assert_eq!(first.force().unwrap(), "argument");
}

#[test]
fn shotgun() {
    let args = args(&["file1.txt", "-a", "aparam", "-wsd", "file2.txt"]);

    assert!(!args.flag('f'));
    assert!(args.flag('s'));
    assert!(args.flag('w'));
    assert_eq!(
        args.get::<String>('a').unwrap().as_deref(),
        Some("aparam")
    );
    assert_eq!(args.next_argument().force().unwrap(), "file1.txt");
    assert_eq!(args.next_argument().force().unwrap(), "file2.txt");
}

#[test]
fn double_dash() {
    let args = args(&["-a", "--", "-b"]);

    assert!(!args.flag('b'));
    assert!(args.flag('a'));
    assert_eq!(args.next_argument().force().unwrap(), "-b");
}

#[rstest]
#[case(vec!["Hello", "-p", "1500"], Some(1500))]
#[case(vec!["Hello"], None)]
fn get_integer(#[case] tokens: Vec<&str>, #[case] expected: Option<i32>) {
    let args = args(&tokens);

    assert_eq!(args.get::<i32>('p').unwrap(), expected);
    assert_eq!(args.next_argument().force().unwrap(), "Hello");
}

#[test]
fn get_twice() {
    let args = args(&["-n", "first", "x", "-n", "second"]);

    assert_eq!(args.get::<String>('n').unwrap().as_deref(), Some("first"));
    assert_eq!(args.get::<String>('n').unwrap().as_deref(), Some("second"));
    assert_eq!(args.get::<String>('n').unwrap(), None);
}

#[test]
fn usage_line() {
    let args = args(&["hello"]);

    let _: Option<String> = args.get("param").unwrap();
    let _: Option<String> = args.get('p').unwrap();
    let _ = args.next_argument_or("hello");
    args.flag('f');
    args.flag("flag");

    assert_eq!(args.usage(), "exe -f --flag -p <String> --param <String> [argument]");
    assert_eq!(args.queries().len(), 5);
    assert_eq!(
        args.queries()[2],
        Query::Argument {
            default: Some("hello".to_string())
        }
    );
}

#[test]
fn ambiguous_order_reported() {
    // Setup
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let inner = seen.clone();
    let args = Args::from_tokens("exe", &["-a", "value", "argument"]).with_error_handler(
        move |program: &str, error: &ArgsError| {
            inner
                .borrow_mut()
                .push(format!("{program} {}", error.faulty_token()));
        },
    );

    // Execute
    let result = args.next_argument().into_string();

    // Verify
    assert_eq!(
        result,
        Err(ArgsError::AmbiguousOrder {
            flag: "-a".to_string(),
            token: "value".to_string(),
        })
    );
    assert_eq!(seen.borrow().as_slice(), &["exe value".to_string()]);
}

struct Collect(Rc<RefCell<Vec<i32>>>);

impl ErrorHandler for Collect {
    fn handle(&self, _program: &str, error: &ArgsError) {
        self.0.borrow_mut().push(error.exit_code());
    }
}

#[test]
fn custom_error_handler() {
    let codes: Rc<RefCell<Vec<i32>>> = Rc::default();
    let args = Args::from_tokens("exe", &["--count"]).with_error_handler(Collect(codes.clone()));

    assert!(args.get::<u32>("count").is_err());
    assert!(args.next_argument().force().is_err());
    assert_eq!(codes.borrow().as_slice(), &[1, 1]);
}

#[test]
fn getopt_sample() {
    // Setup
    let mut separator = "|".to_string();
    let mut field = 0;
    let mut verbose = false;
    let mut numeric = false;
    let mut file = String::default();
    let mut file2 = None;

    let parser = GetOpt::new("sort_fields")
        .add(CommandLineOption::string(('s', "separator"), |value| separator = value))
        .add(CommandLineOption::switch(('v', "verbose"), || verbose = true))
        .add(CommandLineOption::switch("numeric", || numeric = true))
        .add(CommandLineOption::integer(('f', "field"), |value| field = value))
        .add(CommandLineOption::positional("file", |value| file = value))
        .add(CommandLineOption::positional("file2", |value| file2 = Some(value)).optional())
        .with_error_handler(ReturnError)
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser
        .parse_tokens(&["-vs", ",", "--field=2", "rows.csv", "--numeric", "more.csv", "extra"])
        .unwrap();

    // Verify
    assert_eq!(separator, ",");
    assert_eq!(field, 2);
    assert!(verbose);
    assert!(numeric);
    assert_eq!(file, "rows.csv");
    assert_eq!(file2.as_deref(), Some("more.csv"));
    assert_eq!(parsed.additional(), &["extra".to_string()]);
}

#[test]
fn getopt_usage() {
    let parser = GetOpt::new("sort_fields")
        .add(CommandLineOption::switch(('v', "verbose"), || {}))
        .add(CommandLineOption::integer(('f', "field"), |_| {}))
        .add(CommandLineOption::positional("file", |_| {}))
        .build_parser()
        .unwrap();

    let usage = parser.usage();

    assert!(usage.starts_with("Usage: sort_fields -vh -f <Integer> <file>"));
}

#[test]
fn getopt_missing_positional() {
    let parser = GetOpt::new("sort_fields")
        .add(CommandLineOption::positional("file", |_| {}))
        .with_error_handler(ReturnError)
        .build_parser()
        .unwrap();

    assert_eq!(
        parser.parse_tokens(&[]),
        Err(ArgsError::MissingRequiredPositional("file".to_string()))
    );
}
