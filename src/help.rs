//! Help texts shown by the `help` command.

const TOPICS: &[(&str, &str)] = &[
    ("EOF", "EOF command to exit the program."),
    (
        "all",
        "Print the text form of all records.\n\
         If a class name is given, only records of that class are printed.\n\
         Usage: all\n\
         or   : all <class name>\n\
         or   : <class name>.all()",
    ),
    (
        "count",
        "Print the number of records of a class.\n\
         Usage: <class name>.count()\n\
         Example: User.count()",
    ),
    (
        "create",
        "Create a new record, save it to the JSON file and print its id.\n\
         Usage: create <class name>\n\
         Example: create BaseModel",
    ),
    (
        "destroy",
        "Delete a record based on its class name and id.\n\
         Usage: destroy <class name> <id>\n\
         or   : <class name>.destroy(<id>)",
    ),
    ("help", "List available commands with \"help\" or detailed help with \"help <topic>\"."),
    ("quit", "Quit command to exit the program."),
    (
        "show",
        "Print the text form of a record based on its class name and id.\n\
         Usage: show <class name> <id>\n\
         or   : <class name>.show(<id>)",
    ),
    (
        "update",
        "Update a record based on its class name and id.\n\
         Usage: update <class name> <id> <attribute name> \"<attribute value>\"\n\
         or   : <class name>.update(<id>, <attribute name>, <attribute value>)\n\
         or   : <class name>.update(<id>, {<attribute name>: <attribute value>})",
    ),
];

/// Lines printed for a bare `help`.
pub fn index() -> Vec<String> {
    let header = "Documented commands (type help <topic>):";
    let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
    vec![
        String::new(),
        header.to_string(),
        "=".repeat(header.len()),
        names.join("  "),
        String::new(),
    ]
}

pub fn topic(name: &str) -> Option<&'static str> {
    TOPICS.iter().find(|(topic, _)| *topic == name).map(|(_, text)| *text)
}
