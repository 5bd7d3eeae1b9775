use hbnb::console::{Console, Flow};
use hbnb::construct::{Kind, Registry};
use hbnb::datatype::AttrValue;
use hbnb::persist::PersistenceMode;

fn setup() -> Console {
    Console::new(Registry::new(PersistenceMode::InMemory))
}

fn run(console: &mut Console, line: &str) -> Vec<String> {
    let output = console.execute_collect(line).expect("command ok");
    assert_eq!(output.flow, Flow::Continue);
    output.lines
}

#[test]
fn both_forms_print_the_same() {
    let mut console = setup();
    let id = run(&mut console, "create User").remove(0);
    run(&mut console, "create Place");

    let pairs = [
        (format!("show User {id}"), format!("User.show({id})")),
        (format!("show User {id}"), format!("User.show(\"{id}\")")),
        (format!("show User {id}"), format!("User.show('{id}')")),
        ("show User".to_string(), "User.show()".to_string()),
        ("show User nope".to_string(), "User.show(nope)".to_string()),
        (format!("show Cake {id}"), format!("Cake.show({id})")),
        (format!("show Place {id}"), format!("Place.show({id})")),
        ("all User".to_string(), "User.all()".to_string()),
        ("all Place".to_string(), "Place.all()".to_string()),
        ("all Cake".to_string(), "Cake.all()".to_string()),
        ("create Cake".to_string(), "Cake.create()".to_string()),
        ("destroy User".to_string(), "User.destroy()".to_string()),
        ("destroy User nope".to_string(), "User.destroy(\"nope\")".to_string()),
        ("update User".to_string(), "User.update()".to_string()),
        (format!("update User {id}"), format!("User.update({id})")),
        (format!("update User {id} email"), format!("User.update({id}, email)")),
        (format!("update User {id} id x"), format!("User.update({id}, id, x)")),
    ];
    for (spaced, dotted) in &pairs {
        assert_eq!(run(&mut console, spaced), run(&mut console, dotted), "{spaced} / {dotted}");
    }
}

#[test]
fn both_forms_update_alike() {
    let mut console = setup();
    let spaced = run(&mut console, "create Place").remove(0);
    let dotted = run(&mut console, "create Place").remove(0);

    let updates = [
        ("name", "\"Sunny loft\""),
        ("max_guest", "3"),
        ("latitude", "10.55"),
        ("amenity_ids", "\"\""),
        ("nickname", "'the loft'"),
    ];
    for (attribute, value) in updates {
        assert!(run(&mut console, &format!("update Place {spaced} {attribute} {value}")).is_empty());
        assert!(run(&mut console, &format!("Place.update(\"{dotted}\", \"{attribute}\", {value})")).is_empty());
    }

    let registry = console.registry();
    let left = registry.get(Kind::Place, &spaced).expect("record");
    let right = registry.get(Kind::Place, &dotted).expect("record");
    assert_eq!(left.attributes(), right.attributes());
}

#[test]
fn both_forms_destroy_alike() {
    let mut console = setup();
    let spaced = run(&mut console, "create City").remove(0);
    let dotted = run(&mut console, "create City").remove(0);
    assert!(run(&mut console, &format!("destroy City {spaced}")).is_empty());
    assert!(run(&mut console, &format!("City.destroy({dotted})")).is_empty());
    assert!(console.registry().is_empty());
}

#[test]
fn whitespace_inside_dotted_calls() {
    let mut console = setup();
    let id = run(&mut console, "create Place").remove(0);
    assert!(run(&mut console, &format!("Place.update( {id} ,  name ,  Loft )")).is_empty());
    let record = console.registry().get(Kind::Place, &id).expect("record");
    assert_eq!(record.get("name"), Some(&AttrValue::from("Loft")));
    assert_eq!(run(&mut console, &format!("  Place.show({id})  ")), run(&mut console, &format!("show Place {id}")));
}

#[test]
fn unknown_dotted_calls() {
    let mut console = setup();
    for line in ["BaseModel.foo()", "User.quit()", "User.help()", "User.all() extra", "User.all(", ".all()"] {
        assert_eq!(run(&mut console, line), vec![format!("*** Unknown command: {line}")], "{line}");
    }
}

#[test]
fn list_literals_in_both_forms() {
    let mut console = setup();
    let spaced = run(&mut console, "create Place").remove(0);
    let dotted = run(&mut console, "create Place").remove(0);

    let from_spaced = run(&mut console, &format!("update Place {spaced} amenity_ids [\"a\", \"b\"]"));
    let from_dotted = run(&mut console, &format!("Place.update({dotted}, amenity_ids, [\"a\", \"b\"])"));
    assert!(from_spaced.is_empty());
    assert_eq!(from_spaced, from_dotted);

    let expected = AttrValue::List(vec!["a".to_string(), "b".to_string()]);
    let registry = console.registry();
    assert_eq!(registry.get(Kind::Place, &spaced).and_then(|r| r.get("amenity_ids")), Some(&expected));
    assert_eq!(registry.get(Kind::Place, &dotted).and_then(|r| r.get("amenity_ids")), Some(&expected));
}

#[test]
fn unbalanced_list_is_kept_as_text_in_both_forms() {
    let mut console = setup();
    let spaced = run(&mut console, "create Place").remove(0);
    let dotted = run(&mut console, "create Place").remove(0);
    run(&mut console, &format!("update Place {spaced} amenity_ids [\"a\""));
    run(&mut console, &format!("Place.update({dotted}, amenity_ids, [\"a\")"));

    let expected = AttrValue::from("[\"a\"");
    let registry = console.registry();
    assert_eq!(registry.get(Kind::Place, &spaced).and_then(|r| r.get("amenity_ids")), Some(&expected));
    assert_eq!(registry.get(Kind::Place, &dotted).and_then(|r| r.get("amenity_ids")), Some(&expected));
}

#[test]
fn escaped_quotes_in_both_forms() {
    let mut console = setup();
    let spaced = run(&mut console, "create Review").remove(0);
    let dotted = run(&mut console, "create Review").remove(0);
    assert!(run(&mut console, &format!("update Review {spaced} text \"He said \\\"hi\\\"\"")).is_empty());
    assert!(run(&mut console, &format!("Review.update({dotted}, text, 'it\\'s \"fine\"')")).is_empty());

    let registry = console.registry();
    assert_eq!(
        registry.get(Kind::Review, &spaced).and_then(|r| r.get("text")),
        Some(&AttrValue::from("He said \"hi\""))
    );
    assert_eq!(
        registry.get(Kind::Review, &dotted).and_then(|r| r.get("text")),
        Some(&AttrValue::from("it's \"fine\""))
    );
}
