use hbnb::console::{Console, Flow};
use hbnb::construct::Registry;
use hbnb::persist::PersistenceMode;

fn setup() -> Console {
    Console::new(Registry::new(PersistenceMode::InMemory))
}

#[test]
fn quit_and_eof_stop_silently() {
    let mut console = setup();
    for line in ["quit", "EOF", "  quit  ", "quit now"] {
        let output = console.execute_collect(line).expect("ok");
        assert_eq!(output.flow, Flow::Stop, "{line}");
        assert!(output.lines.is_empty());
    }
}

#[test]
fn blank_lines_do_nothing() {
    let mut console = setup();
    for line in ["", "   ", "\t", "\n"] {
        let output = console.execute_collect(line).expect("ok");
        assert_eq!(output.flow, Flow::Continue);
        assert!(output.lines.is_empty());
    }
    assert!(console.registry().is_empty());
}

#[test]
fn unknown_commands_are_reported() {
    let mut console = setup();
    let output = console.execute_collect("my_count BaseModel").expect("ok");
    assert_eq!(output.flow, Flow::Continue);
    assert_eq!(output.lines, vec!["*** Unknown command: my_count BaseModel"]);
    let output = console.execute_collect("Quit").expect("ok");
    assert_eq!(output.lines, vec!["*** Unknown command: Quit"]);
}

#[test]
fn help_lists_every_command() {
    let mut console = setup();
    let output = console.execute_collect("help").expect("ok");
    assert_eq!(output.flow, Flow::Continue);
    assert_eq!(
        output.lines,
        vec![
            "",
            "Documented commands (type help <topic>):",
            "========================================",
            "EOF  all  count  create  destroy  help  quit  show  update",
            "",
        ]
    );
    assert_eq!(console.execute_collect("?").expect("ok"), output);
}

#[test]
fn help_on_a_topic() {
    let mut console = setup();
    for topic in ["EOF", "all", "count", "create", "destroy", "help", "quit", "show", "update"] {
        let output = console.execute_collect(&format!("help {topic}")).expect("ok");
        assert!(!output.lines.is_empty(), "{topic}");
        assert!(!output.lines[0].starts_with("***"), "{topic}");
    }
    let quit = console.execute_collect("help quit").expect("ok");
    assert_eq!(quit.lines, vec!["Quit command to exit the program."]);
    let show = console.execute_collect("? show").expect("ok");
    assert!(show.lines.iter().any(|l| l.contains("<class name>.show(<id>)")));
}

#[test]
fn help_on_an_unknown_topic() {
    let mut console = setup();
    let output = console.execute_collect("help nothing").expect("ok");
    assert_eq!(output.lines, vec!["*** No help on nothing"]);
}

#[test]
fn execute_writes_one_line_per_output() {
    let mut console = setup();
    let mut out: Vec<u8> = Vec::new();
    assert_eq!(console.execute("create User", &mut out).expect("ok"), Flow::Continue);
    assert_eq!(console.execute("create User", &mut out).expect("ok"), Flow::Continue);
    assert_eq!(console.execute("show User", &mut out).expect("ok"), Flow::Continue);
    assert_eq!(console.execute("quit", &mut out).expect("ok"), Flow::Stop);

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "** instance id missing **");
    assert!(text.ends_with('\n'));
}

#[test]
fn session_keeps_going_after_mistakes() {
    let mut console = setup();
    for line in ["create", "show Cake", "garbage", "update User", "Cake.count()"] {
        let output = console.execute_collect(line).expect("ok");
        assert_eq!(output.flow, Flow::Continue, "{line}");
    }
    let id = console.execute_collect("create User").expect("ok").lines.remove(0);
    let shown = console.execute_collect(&format!("show User {id}")).expect("ok");
    assert!(shown.lines[0].starts_with("[User]"));
}
