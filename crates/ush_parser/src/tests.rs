use super::*;
use std::path::Path;

fn parse(line: &str) -> Pipeline {
    parse_line(line).unwrap().expect("expected a pipeline")
}

#[test]
fn blank_line_is_none() {
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(parse_line("   \t ").unwrap(), None);
}

#[test]
fn simple_command_keeps_argument_order() {
    let p = parse("echo a b");
    assert_eq!(p.len(), 1);
    assert_eq!(p.first().args, vec!["echo", "a", "b"]);
    assert_eq!(p.first().input, InputRedirect::Inherit);
    assert_eq!(p.first().output, OutputRedirect::Inherit);
}

#[test]
fn quoted_words_are_stripped_not_split() {
    let p = parse(r#"echo 'a b' "c|d""#);
    assert_eq!(p.first().args, vec!["echo", "a b", "c|d"]);
}

#[test]
fn redirections_parse_into_specs() {
    let p = parse("sort < in.txt >> out.txt");
    let cmd = p.first();
    assert_eq!(cmd.input, InputRedirect::FromFile("in.txt".into()));
    assert_eq!(cmd.output, OutputRedirect::Append("out.txt".into()));
    assert!(cmd.output.is_append());
    assert_eq!(cmd.output.file_target(), Some(Path::new("out.txt")));
}

#[test]
fn merge_stderr_variants() {
    let p = parse("make >& log");
    assert_eq!(p.first().output, OutputRedirect::TruncateMergeStderr("log".into()));
    assert!(p.first().output.merges_stderr());

    let p = parse("make >>& log");
    assert_eq!(p.first().output, OutputRedirect::AppendMergeStderr("log".into()));
}

#[test]
fn pipeline_interior_stages_pipe_to_next() {
    let p = parse("cat f | grep x |& wc -l > out");
    assert_eq!(p.len(), 3);
    assert_eq!(p.commands[0].output, OutputRedirect::PipeToNext);
    assert_eq!(p.commands[1].output, OutputRedirect::PipeToNextMergeStderr);
    assert_eq!(p.commands[2].output, OutputRedirect::Truncate("out".into()));
}

#[test]
fn input_redirect_only_on_first_stage() {
    assert_eq!(
        parse_line("cat | sort < in"),
        Err(ParseError::MisplacedInputRedirect)
    );
    assert!(parse_line("cat < in | sort").is_ok());
}

#[test]
fn file_output_only_on_last_stage() {
    assert_eq!(
        parse_line("cat > out | sort"),
        Err(ParseError::MisplacedOutputRedirect)
    );
}

#[test]
fn missing_redirect_target_is_reported() {
    assert_eq!(parse_line("cat <"), Err(ParseError::MissingTarget("<")));
    assert_eq!(parse_line("cat >>"), Err(ParseError::MissingTarget(">>")));
}

#[test]
fn empty_stages_are_rejected() {
    assert_eq!(parse_line("| cat"), Err(ParseError::EmptyStage));
    assert_eq!(parse_line("cat |"), Err(ParseError::EmptyStage));
    assert_eq!(parse_line("cat | | wc"), Err(ParseError::EmptyStage));
}

#[test]
fn duplicate_redirects_are_rejected() {
    assert_eq!(
        parse_line("cat < a < b"),
        Err(ParseError::DuplicateRedirect("<"))
    );
    assert_eq!(
        parse_line("cat > a >> b"),
        Err(ParseError::DuplicateRedirect(">>"))
    );
}

#[test]
fn stray_ampersand_is_an_error() {
    assert!(matches!(
        parse_line("cat & sort"),
        Err(ParseError::InvalidToken(_))
    ));
}
