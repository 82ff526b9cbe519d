mod support;

use chronal_core::{Calendar, CalendarRef, ErrorCode, Granularity, Relation, TimeObject};
use support::{GridCalendar, StubCalendar, init_tracing};

fn rel(a: &TimeObject, b: &TimeObject) -> Relation {
    a.relation_to(b).expect("grid calendar resolves every pair")
}

#[test]
fn every_object_equals_itself() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    for path in [&[2024][..], &[2024, 3], &[2024, 3, 15], &[-7, 12, 30]] {
        let object = cal.at(path);
        assert_eq!(rel(&object, &object), Relation::equal(), "{object:?}");

        // A separately built handle to the same node.
        let twin = cal.at(path);
        assert!(!object.is_same(&twin));
        assert_eq!(object, twin);
        assert_eq!(rel(&object, &twin), Relation::equal());
    }
}

#[test]
fn same_granularity_neighbours() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let march = cal.at(&[2024, 3]);
    let april = cal.at(&[2024, 4]);
    let june = cal.at(&[2024, 6]);
    let dec = cal.at(&[2023, 12]);
    let jan = cal.at(&[2024, 1]);

    assert_eq!(rel(&march, &april), Relation::left_adjoining());
    assert_eq!(rel(&april, &march), Relation::right_adjoining());
    assert_eq!(rel(&march, &june), Relation::left());
    assert_eq!(rel(&june, &march), Relation::right());
    assert_eq!(rel(&dec, &jan), Relation::left_adjoining());
}

#[test]
fn day_against_its_year() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let year = cal.at(&[2024]);

    assert_eq!(rel(&cal.at(&[2024, 3, 15]), &year), Relation::inside());
    assert_eq!(rel(&year, &cal.at(&[2024, 3, 15])), Relation::overlapping());
    assert_eq!(rel(&cal.at(&[2024, 1, 1]), &year), Relation::left_inside());
    assert_eq!(rel(&year, &cal.at(&[2024, 1, 1])), Relation::right_overlapping());
    assert_eq!(rel(&cal.at(&[2024, 12, 30]), &year), Relation::right_inside());
    assert_eq!(rel(&year, &cal.at(&[2024, 12, 30])), Relation::left_overlapping());
}

#[test]
fn month_against_days_of_other_months() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let march = cal.at(&[2024, 3]);

    assert_eq!(rel(&march, &cal.at(&[2024, 4, 10])), Relation::left());
    assert_eq!(rel(&march, &cal.at(&[2024, 4, 1])), Relation::left_adjoining());
    assert_eq!(rel(&march, &cal.at(&[2024, 2, 30])), Relation::right_adjoining());
    assert_eq!(rel(&march, &cal.at(&[2024, 2, 12])), Relation::right());
    assert_eq!(rel(&march, &cal.at(&[2024, 3, 1])), Relation::right_overlapping());
    assert_eq!(rel(&march, &cal.at(&[2024, 3, 30])), Relation::left_overlapping());
}

#[test]
fn adjoining_across_years_and_depths() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let y2023 = cal.at(&[2023]);

    assert_eq!(rel(&y2023, &cal.at(&[2024, 1, 1])), Relation::left_adjoining());
    assert_eq!(rel(&y2023, &cal.at(&[2024, 1])), Relation::left_adjoining());
    assert_eq!(rel(&cal.at(&[2023, 12, 30]), &cal.at(&[2024])), Relation::left_adjoining());
    assert_eq!(rel(&cal.at(&[2024, 1]), &y2023), Relation::right_adjoining());
}

#[test]
fn swapping_operands_mirrors_the_relation() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let objects: Vec<TimeObject> = [
        &[2023][..],
        &[2024],
        &[2025],
        &[2024, 1],
        &[2024, 3],
        &[2024, 12],
        &[2024, 1, 1],
        &[2024, 3, 15],
        &[2024, 12, 30],
        &[2025, 1, 1],
    ]
    .iter()
    .map(|path| cal.at(path))
    .collect();

    for a in &objects {
        for b in &objects {
            let ab = rel(a, b);
            let ba = rel(b, a);
            assert_eq!(ba, ab.inverse(), "{a:?} vs {b:?}");
            assert_eq!(ab.equals(), ba.equals());
            assert_eq!(ab.contains(), ba.is_within());

            if a.granularity() == b.granularity() && a != b {
                assert_eq!(ab.contains(), ba.is_contained());
                assert_eq!(ab.is_to_left(), ba.is_to_right());
            }
        }
    }
}

#[test]
fn objects_of_different_calendars_are_unrelated() {
    init_tracing();
    let a = GridCalendar::years_months_days("a");
    let b = GridCalendar::years_months_days("b");

    let left = a.at(&[2024, 3]);
    let right = b.at(&[2024, 3]);
    assert_ne!(left, right);
    assert_eq!(rel(&left, &right), Relation::unrelated());
    assert_eq!(rel(&right, &left), Relation::unrelated());
    assert!(a.contains(&left));
    assert!(!a.contains(&right));
}

#[test]
fn different_root_levels_are_unrelated() {
    init_tracing();
    let cal = GridCalendar::years_months_days("grid");
    let handle: CalendarRef = cal.clone();
    let decade = TimeObject::new(handle, Granularity::Decade, None, 202);
    assert_eq!(rel(&decade, &cal.at(&[2024])), Relation::unrelated());
}

#[test]
fn tree_accessors() {
    let cal = GridCalendar::years_months_days("grid");
    let day = cal.at(&[2024, 3, 15]);

    assert_eq!(day.depth(), 2);
    assert_eq!(day.path(), vec![2024, 3, 15]);
    assert_eq!(day.root(), &cal.at(&[2024]));
    assert_eq!(day.parent(), Some(&cal.at(&[2024, 3])));
    assert_eq!(
        day.ancestors().map(TimeObject::granularity).collect::<Vec<_>>(),
        vec![Granularity::Day, Granularity::Month, Granularity::Year]
    );
    assert_eq!(cal.parent(&day).expect("default parent"), day.parent().cloned());
    assert_eq!(day.first_child().expect("children"), None);

    let march = cal.at(&[2024, 3]);
    assert_eq!(march.first_child().expect("children"), Some(cal.at(&[2024, 3, 1])));
    assert_eq!(march.last_child().expect("children"), Some(cal.at(&[2024, 3, 30])));
    assert_eq!(march.next().expect("next"), Some(cal.at(&[2024, 4])));
    assert_eq!(cal.next(&march, -3).expect("back"), Some(cal.at(&[2023, 12])));
}

#[test]
fn text_forms() {
    let cal = GridCalendar::years_months_days("grid");
    let day = cal.of("2024/3/15").expect("parse");
    assert_eq!(day, cal.at(&[2024, 3, 15]));
    assert_eq!(day.to_string(), "2024/3/15");
    assert_eq!(format!("{day:?}"), "TimeObject(day 2024/3/15)");

    let err = cal.of("2024/march").expect_err("not a number");
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn unimplemented_operations_fail_loudly() {
    init_tracing();
    let stub = StubCalendar::new();
    let a = stub.of("2024").expect("stub parses roots");
    let b = stub.of("2025").expect("stub parses roots");

    assert_eq!(a.relation_to(&a), Ok(Relation::equal()));

    let err = a.relation_to(&b).expect_err("stub cannot step");
    assert!(err.is_not_implemented());
    assert_eq!(err.code(), ErrorCode::NotImplemented);
    assert_eq!(err.to_string(), "method stub::next not implemented yet");

    let err = a.children().expect_err("stub has no children");
    assert_eq!(err.to_string(), "method stub::children not implemented yet");
    assert!(a.serialize().expect_err("no text form").is_not_implemented());

    // Display falls back to the raw path.
    assert_eq!(a.to_string(), "year 2024");
}
