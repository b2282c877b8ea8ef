use super::*;

#[test]
fn parses_employed_parameter() {
    assert_eq!(
        ListQuery::parse("?employed=true").employed_filter(),
        Some("true")
    );
    assert_eq!(
        ListQuery::parse("employed=false&sort=name").employed_filter(),
        Some("false")
    );
    assert_eq!(ListQuery::parse("").employed, None);
    assert_eq!(ListQuery::parse("?sort=name").employed, None);
}

#[test]
fn first_occurrence_wins_and_empty_is_no_filter() {
    let query = ListQuery::parse("employed=true&employed=false");
    assert_eq!(query.employed.as_deref(), Some("true"));

    let empty = ListQuery::parse("employed=");
    assert_eq!(empty.employed.as_deref(), Some(""));
    assert_eq!(empty.employed_filter(), None);
}

#[test]
fn builds_query_strings() {
    assert_eq!(ListQuery::all().to_query_string(), "");
    assert_eq!(ListQuery::employed(true).to_query_string(), "?employed=true");
    assert_eq!(
        ListQuery::employed(false).to_query_string(),
        "?employed=false"
    );
}

#[test]
fn routes_round_trip_through_paths() {
    assert_eq!(Route::parse("/"), Some(Route::List(ListQuery::all())));
    assert_eq!(
        Route::parse("/?employed=false"),
        Some(Route::List(ListQuery::employed(false)))
    );
    assert_eq!(
        Route::parse("/edit/65a1"),
        Some(Route::Edit(EmployeeId::from("65a1")))
    );
    assert_eq!(Route::Edit(EmployeeId::from("7")).to_path(), "/edit/7");
    assert_eq!(
        Route::List(ListQuery::employed(true)).to_path(),
        "/?employed=true"
    );
}

#[test]
fn rejects_unknown_paths() {
    assert_eq!(Route::parse("/employees"), None);
    assert_eq!(Route::parse("/edit/"), None);
    assert_eq!(Route::parse("/edit/1/extra"), None);
}
