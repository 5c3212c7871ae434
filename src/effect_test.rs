use super::*;

#[test]
fn constructors_copy_names() {
    assert_eq!(
        Effect::add_class(Node::Body, "is-dimmed"),
        Effect::AddClass { node: Node::Body, class: "is-dimmed".to_owned() }
    );
    assert_eq!(
        Effect::set_attribute(Node::Root, "data-theme", "dark"),
        Effect::SetAttribute { node: Node::Root, name: "data-theme".to_owned(), value: "dark".to_owned() }
    );
}

#[test]
fn node_reports_target_for_every_variant() {
    let effects = [
        Effect::add_class(Node::Candidate(2), "a"),
        Effect::remove_class(Node::Candidate(2), "a"),
        Effect::set_attribute(Node::Candidate(2), "x", "y"),
        Effect::remove_attribute(Node::Candidate(2), "x"),
    ];
    for effect in &effects {
        assert_eq!(effect.node(), Node::Candidate(2));
    }
}

#[test]
fn indexed_nodes_are_distinct_by_kind() {
    assert_ne!(Node::Candidate(0), Node::Image(0));
    assert_ne!(Node::ThemeControl, Node::ThemePulse);
}
