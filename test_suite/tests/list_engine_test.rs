// End-to-end list engine tests over the shared fixtures.
// Filter, sort and paginate through the controller, the way a list page does.

use recordview::{ListRecord, ListResource, ListViewController, RecordedHistory, SortOrder, UrlHistory};
use shared_records::fixtures::{customers, invoices, quotes};
use shared_records::{Customer, Invoice, Quote};

mod common;
use common::params;

fn names<H: UrlHistory>(controller: &ListViewController<Customer, H>) -> Vec<String> {
    controller
        .visible_records()
        .records
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

fn numbers<H: UrlHistory>(controller: &ListViewController<Invoice, H>) -> Vec<String> {
    controller
        .visible_records()
        .records
        .iter()
        .map(|i| i.number.clone())
        .collect()
}

// =============================================================================
// FILTER + SORT + PAGINATE
// =============================================================================

#[test]
fn test_active_customers_sorted_by_name_second_page() {
    let controller = ListViewController::from_resource(
        customers(),
        &params(&[
            ("status", "Active"),
            ("sort_column", "name"),
            ("sort_order", "A"),
            ("per_page", "5"),
            ("page", "2"),
        ]),
    );

    let page = controller.visible_records();
    assert_eq!(controller.filtered_count(), 8);
    assert_eq!(page.total_count, 8);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page_number, 2);
    assert_eq!(
        names(&controller),
        vec!["Umbrella Holdings", "Wayne Enterprises", "Wonka Industries"]
    );
}

#[test]
fn test_first_page_of_same_query() {
    let controller = ListViewController::from_resource(
        customers(),
        &params(&[("status", "Active"), ("sort_column", "name"), ("per_page", "5")]),
    );
    assert_eq!(
        names(&controller),
        vec![
            "Acme Corp",
            "Cyberdyne Systems",
            "Globex Corporation",
            "Hooli",
            "Tyrell Corporation"
        ]
    );
    assert!(controller.visible_records().has_next());
}

#[test]
fn test_no_sort_keeps_insertion_order() {
    let controller = ListViewController::from_resource(customers(), &params(&[("per_page", "3")]));
    assert_eq!(
        names(&controller),
        vec!["Globex Corporation", "Acme Corp", "Initech"]
    );
}

#[test]
fn test_status_match_is_exact_and_case_sensitive() {
    let lower = ListViewController::from_resource(customers(), &params(&[("status", "active")]));
    assert_eq!(lower.filtered_count(), 0);

    let inactive = ListViewController::from_resource(customers(), &params(&[("status", "Inactive")]));
    assert_eq!(inactive.filtered_count(), 4);
}

#[test]
fn test_search_matches_any_search_field_case_insensitively() {
    let controller = ListViewController::from_resource(customers(), &params(&[("q", "INDUSTRIES")]));
    assert_eq!(names(&controller), vec!["Stark Industries", "Wonka Industries"]);

    // "example.com" only appears in the email column
    let by_email = ListViewController::from_resource(customers(), &params(&[("q", "example.com")]));
    assert_eq!(by_email.filtered_count(), 12);

    let combined = ListViewController::from_resource(
        customers(),
        &params(&[("q", "industries"), ("status", "Active")]),
    );
    assert_eq!(names(&combined), vec!["Wonka Industries"]);
}

#[test]
fn test_numeric_range_is_inclusive() {
    let controller = ListViewController::from_resource(
        invoices(),
        &params(&[("amount_gte", "1000"), ("amount_lte", "1500"), ("per_page", "23")]),
    );
    assert_eq!(
        numbers(&controller),
        vec!["INV-0008", "INV-0009", "INV-0010", "INV-0011", "INV-0012"]
    );
}

#[test]
fn test_date_range_and_missing_dates() {
    let issued = ListViewController::from_resource(
        invoices(),
        &params(&[("issued_on_gte", "2024-02-01"), ("issued_on_lte", "2024-02-29")]),
    );
    assert_eq!(
        numbers(&issued),
        vec!["INV-0006", "INV-0007", "INV-0008", "INV-0009"]
    );

    // Drafts have no due date and never pass a due date bound
    let due = ListViewController::from_resource(invoices(), &params(&[("due_on_lte", "2024-02-15")]));
    assert_eq!(numbers(&due), vec!["INV-0001", "INV-0002", "INV-0003"]);
}

#[test]
fn test_unparseable_range_bound_is_ignored() {
    let controller = ListViewController::from_resource(
        invoices(),
        &params(&[("amount_gte", "lots"), ("amount_lte", "250")]),
    );
    assert_eq!(numbers(&controller), vec!["INV-0001", "INV-0002"]);
}

#[test]
fn test_missing_values_sort_last_in_both_directions() {
    let mut controller = ListViewController::from_resource(
        invoices(),
        &params(&[("sort_column", "due_on"), ("per_page", "23")]),
    );
    let ascending = numbers(&controller);
    assert_eq!(ascending[0], "INV-0001");
    assert_eq!(
        ascending[18..],
        ["INV-0004", "INV-0008", "INV-0012", "INV-0016", "INV-0020"]
    );

    controller.sort_by("due_on");
    assert_eq!(controller.state().sort_order(), SortOrder::Descending);
    let descending = numbers(&controller);
    assert_eq!(descending[0], "INV-0023");
    assert_eq!(
        descending[18..],
        ["INV-0004", "INV-0008", "INV-0012", "INV-0016", "INV-0020"]
    );
}

#[test]
fn test_sort_by_decimal_amount_descending() {
    let controller = ListViewController::from_resource(
        invoices(),
        &params(&[("sort_column", "amount"), ("sort_order", "B"), ("per_page", "3")]),
    );
    assert_eq!(numbers(&controller), vec!["INV-0023", "INV-0022", "INV-0021"]);
}

#[test]
fn test_unsortable_column_is_ignored() {
    // company is searchable but not sortable
    let controller = ListViewController::from_resource(
        customers(),
        &params(&[("sort_column", "company"), ("per_page", "2")]),
    );
    assert_eq!(names(&controller), vec!["Globex Corporation", "Acme Corp"]);
    assert_eq!(controller.state().sort_column(), Some("company"));
}

#[test]
fn test_float_totals_sort_numerically() {
    let controller: ListViewController<Quote> =
        ListViewController::from_resource(quotes(), &params(&[("sort_column", "total")]));
    let totals: Vec<f64> = controller
        .visible_records()
        .records
        .iter()
        .map(|q| q.total)
        .collect();
    assert_eq!(
        totals,
        vec![640.0, 3_150.5, 4_800.0, 12_250.0, 18_900.0, 27_400.0, 99_000.0]
    );
}

// =============================================================================
// PAGE BOUNDARIES
// =============================================================================

#[test]
fn test_page_beyond_result_is_clamped_on_mount() {
    let controller = ListViewController::with_history(
        Customer::list_schema(),
        customers(),
        &params(&[("status", "Active"), ("per_page", "5"), ("page", "9")]),
        RecordedHistory::default(),
    );
    assert_eq!(controller.state().page_number(), 2);
    assert_eq!(controller.history().entries().len(), 1);
    assert!(controller.history().last().unwrap().contains("page=2"));
}

#[test]
fn test_valid_page_does_not_touch_history_on_mount() {
    let controller = ListViewController::with_history(
        Customer::list_schema(),
        customers(),
        &params(&[("per_page", "5"), ("page", "3")]),
        RecordedHistory::default(),
    );
    assert_eq!(controller.state().page_number(), 3);
    assert!(controller.history().entries().is_empty());
    assert_eq!(controller.visible_records().len(), 2);
}

#[test]
fn test_empty_result_has_one_page() {
    let controller =
        ListViewController::from_resource(customers(), &params(&[("q", "no such customer"), ("page", "4")]));
    let page = controller.visible_records();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page_number, 1);
}

#[test]
fn test_filter_change_resets_to_first_page() {
    let mut controller = ListViewController::with_history(
        Customer::list_schema(),
        customers(),
        &params(&[("per_page", "5"), ("page", "3")]),
        RecordedHistory::default(),
    );

    controller.set_filter("status", "Inactive");
    assert_eq!(controller.state().page_number(), 1);
    assert_eq!(controller.total_pages(), 1);
    assert_eq!(
        names(&controller),
        vec!["Initech", "Stark Industries", "Soylent Foods", "Massive Dynamic"]
    );

    controller.clear_filter("status");
    controller.set_page_number(3);
    controller.set_page_size(4);
    assert_eq!(controller.state().page_number(), 1);
    assert_eq!(controller.total_pages(), 3);
    assert_eq!(controller.history().entries().len(), 4);
}

#[test]
fn test_set_page_number_clamps_both_ends() {
    let mut controller = ListViewController::from_resource(customers(), &params(&[("per_page", "5")]));
    controller.set_page_number(40);
    assert_eq!(controller.state().page_number(), 3);
    controller.set_page_number(0);
    assert_eq!(controller.state().page_number(), 1);
}

#[test]
fn test_sorting_keeps_current_page() {
    let mut controller = ListViewController::from_resource(
        customers(),
        &params(&[("per_page", "5"), ("page", "2")]),
    );
    controller.sort_by("name");
    assert_eq!(controller.state().page_number(), 2);
    assert_eq!(controller.state().sort_order(), SortOrder::Ascending);
    controller.sort_by("name");
    assert_eq!(controller.state().sort_order(), SortOrder::Descending);
    controller.sort_by("email");
    assert_eq!(controller.state().sort_column(), Some("email"));
    assert_eq!(controller.state().sort_order(), SortOrder::Ascending);
}

#[test]
fn test_clear_all_keeps_sort_and_page_size() {
    let mut controller = ListViewController::from_resource(
        customers(),
        &params(&[
            ("status", "Active"),
            ("q", "corp"),
            ("balance_gte", "100"),
            ("sort_column", "name"),
            ("per_page", "4"),
        ]),
    );
    controller.clear_all();
    assert!(!controller.state().has_filters());
    assert_eq!(controller.state().sort_column(), Some("name"));
    assert_eq!(controller.state().page_size(), 4);
    assert_eq!(controller.filtered_count(), 12);
}

#[test]
fn test_replace_records_reclamps_page() {
    let mut controller = ListViewController::with_history(
        Invoice::list_schema(),
        invoices(),
        &params(&[("per_page", "5"), ("page", "5")]),
        RecordedHistory::default(),
    );
    assert_eq!(controller.visible_records().len(), 3);

    controller.replace_records(invoices().into_iter().take(12).collect());
    assert_eq!(controller.state().page_number(), 3);
    assert_eq!(controller.visible_records().len(), 2);
    assert_eq!(controller.history().entries().len(), 1);
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn test_navigation_templates_resolve_record_ids() {
    let controller = ListViewController::from_resource(customers(), &params(&[]));
    let acme = &controller.records()[1];
    assert_eq!(
        controller.navigation_path("name", acme).as_deref(),
        Some("/customers/00000000-0000-0000-0000-000000000002")
    );
    assert_eq!(controller.navigation_path("email", acme), None);

    let invoices = invoices();
    let first = &invoices[0];
    let schema = Invoice::list_schema();
    let column = schema.find_column("number").unwrap();
    assert_eq!(column.name, "Invoice #");
    assert_eq!(
        column.navigation_path(first).as_deref(),
        Some(format!("/invoices/{}", first.id).as_str())
    );
    assert_eq!(
        first.field("due_on").and_then(|v| v.as_date()),
        first.due_on
    );
}
