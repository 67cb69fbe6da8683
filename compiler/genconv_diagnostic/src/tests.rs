use super::*;
use pretty_assertions::assert_eq;

#[test]
fn bare_error_renders_cause_only() {
    let err = type_mismatch("int", "string");
    assert_eq!(err.path().count(), 0);
    assert_eq!(err.breadcrumb(), "");
    assert_eq!(err.render(), "TypeMismatch: Cannot convert int to string");
}

#[test]
fn single_list_frame() {
    let err = type_mismatch("int", "string").lift(PathFrame::new("[]", "int", "string"));
    assert_eq!(err.breadcrumb(), "[] : int -> string");
}

#[test]
fn frames_render_outermost_first() {
    let err = type_mismatch("int", "string")
        .lift(PathFrame::new("[]", "int", "string"))
        .lift(PathFrame::new("[]", "[]int", "[]string"))
        .lift(PathFrame::between("source", "[][]int", "target", "[][]string"));

    assert_eq!(
        err.render(),
        "source -> target : [][]int -> [][]string\n\
         [] : []int -> []string\n\
         [] : int -> string\n\
         \n\
         TypeMismatch: Cannot convert int to string"
    );
    let labels: Vec<&str> = err.path().map(|f| f.source_id.as_str()).collect();
    assert_eq!(labels, vec!["source", "[]", "[]"]);
}

#[test]
fn lifting_preserves_cause() {
    let err = missing_source_field("Age", "app.Input");
    let kind = err.kind.clone();
    let lifted = err
        .lift(PathFrame::new("Nested", "app.A", "app.B"))
        .lift(PathFrame::new("[key]", "string", "string"));
    assert_eq!(lifted.kind, kind);
    assert_eq!(lifted.path().count(), 2);
}

#[test]
fn mapped_field_frame_shows_both_names() {
    let frame = PathFrame::between("FullName", "string", "Name", "string");
    assert_eq!(frame.to_string(), "FullName -> Name : string -> string");
}

#[test]
fn kind_messages() {
    assert_eq!(
        unexported_field("secret", "app.Out").to_string(),
        "Cannot set value for unexported field \"secret\" of app.Out."
    );
    assert_eq!(
        missing_source_field("Age", "app.In").to_string(),
        "Cannot set value for field Age because it does not exist on the source entry app.In."
    );
}
