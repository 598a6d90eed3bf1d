use acvmix_core::{
    config::{CategoryStyle, DashboardConfig, QuarterOrder},
    dashboard::{Dashboard, DashboardState, NO_DATA_MESSAGE},
    error::AcvError,
    record::{parse_records, Record},
    summary::AcvSummary,
    views::{table::Shade, DonutView, StackedBarView, SummaryTableView},
};
use std::f64::consts::TAU;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("New Customer", "Q2-24", 30_000.0),
        Record::new("Existing Customer", "Q1-24", 60_000.0),
        Record::new("New Customer", "Q1-24", 40_000.0),
        Record::new("Existing Customer", "Q2-24", 90_000.0),
        Record::new("Partner", "Q2-24", 30_000.0),
    ]
}

fn ready(records: &[Record]) -> Dashboard {
    let dashboard = Dashboard::build(records, &DashboardConfig::default()).unwrap();
    assert!(!dashboard.is_empty());
    dashboard
}

// ── Ordering ─────────────────────────────────────────────────────────────────

/// Configured categories come first in configured order even when the data
/// shows them in another order; unknown categories follow, first-seen.
#[test]
fn category_order_is_identical_across_views() {
    let dashboard = ready(&sample_records());
    let expected = vec!["Existing Customer", "New Customer", "Partner"];

    let summary = dashboard.summary().unwrap();
    assert_eq!(summary.customer_types, expected);

    let legend: Vec<&str> = dashboard
        .bar()
        .unwrap()
        .legend
        .iter()
        .map(|l| l.customer_type.as_str())
        .collect();
    assert_eq!(legend, expected);

    for bar in &dashboard.bar().unwrap().bars {
        let order: Vec<&str> = bar.segments.iter().map(|s| s.customer_type.as_str()).collect();
        assert_eq!(order, expected, "segments of {}", bar.quarter);
    }

    let slices: Vec<&str> = dashboard
        .donut()
        .unwrap()
        .slices
        .iter()
        .map(|s| s.customer_type.as_str())
        .collect();
    assert_eq!(slices, expected);

    let rows: Vec<&str> = dashboard
        .table()
        .unwrap()
        .rows
        .iter()
        .filter(|r| !r.is_total)
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(rows, expected);
}

#[test]
fn unknown_categories_take_fallback_colors_in_order() {
    let mut records = sample_records();
    records.push(Record::new("Reseller", "Q1-24", 1_000.0));
    let dashboard = ready(&records);
    let legend = &dashboard.bar().unwrap().legend;

    assert_eq!(legend[0].color, "#1f77b4");
    assert_eq!(legend[1].color, "#ff7f0e");
    assert_eq!(legend[2].customer_type, "Partner");
    assert_eq!(legend[2].color, "#2ca02c");
    assert_eq!(legend[3].customer_type, "Reseller");
    assert_eq!(legend[3].color, "#d62728");

    let donut = dashboard.donut().unwrap();
    assert_eq!(donut.slice("Reseller").unwrap().color, "#d62728");
}

#[test]
fn quarters_sort_lexicographically_by_default() {
    let records = vec![
        Record::new("New Customer", "Q2-24", 1.0),
        Record::new("New Customer", "Q1-25", 1.0),
        Record::new("New Customer", "Q1-24", 1.0),
    ];
    let summary = AcvSummary::build(&records, &DashboardConfig::default());
    assert_eq!(summary.quarters, vec!["Q1-24", "Q1-25", "Q2-24"]);
}

#[test]
fn chronological_quarter_order_is_configurable() {
    let records = vec![
        Record::new("New Customer", "Q2-24", 1.0),
        Record::new("New Customer", "Q1-25", 1.0),
        Record::new("New Customer", "Q1-24", 1.0),
    ];
    let config = DashboardConfig {
        quarter_order: QuarterOrder::Chronological,
        ..DashboardConfig::default()
    };
    let summary = AcvSummary::build(&records, &config);
    assert_eq!(summary.quarters, vec!["Q1-24", "Q2-24", "Q1-25"]);

    let dashboard = Dashboard::build(&records, &config).unwrap();
    let bars: Vec<&str> = dashboard
        .bar()
        .unwrap()
        .bars
        .iter()
        .map(|b| b.quarter.as_str())
        .collect();
    assert_eq!(bars, vec!["Q1-24", "Q2-24", "Q1-25"]);
}

// ── Stacked bar ──────────────────────────────────────────────────────────────

#[test]
fn bar_segments_stack_and_label() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let view = StackedBarView::build(&summary, &DashboardConfig::default());

    let q2 = view.bar("Q2-24").unwrap();
    assert_eq!(q2.total, 150_000.0);
    assert_eq!(q2.total_label, "$150K");

    assert_eq!(q2.segments[0].y0, 0.0);
    assert_eq!(q2.segments[0].y1, 90_000.0);
    assert_eq!(q2.segments[1].y0, 90_000.0);
    assert_eq!(q2.segments[1].y1, 120_000.0);
    assert_eq!(q2.segments[2].y1, 150_000.0);

    assert_eq!(q2.segments[0].label, "$90K (60%)");
    assert_eq!(q2.segments[1].label, "$30K (20%)");
    assert_eq!(q2.segments[2].label, "$30K (20%)");

    let q1 = view.bar("Q1-24").unwrap();
    let partner = &q1.segments[2];
    assert_eq!(partner.acv, 0.0);
    assert_eq!(partner.y0, partner.y1, "absent type is a zero-height segment");
    assert_eq!(partner.label, "$0K (0%)");

    assert_eq!(view.y_max, 150_000.0);
}

#[test]
fn bar_axes_carry_labels_and_ticks() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let view = StackedBarView::build(&summary, &DashboardConfig::default());

    assert_eq!(view.x_axis_label, "Closed Fiscal Quarter");

    let values: Vec<f64> = view.y_ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 50_000.0, 100_000.0, 150_000.0]);
    let labels: Vec<&str> = view.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["$0K", "$50K", "$100K", "$150K"]);

    let last = view.y_ticks.last().unwrap();
    assert!(last.value >= view.y_max, "ticks must reach the tallest bar");
}

// ── Donut ────────────────────────────────────────────────────────────────────

#[test]
fn donut_slices_cover_the_circle() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let donut = DonutView::build(&summary, &DashboardConfig::default());

    assert_eq!(donut.total, 250_000.0);
    assert_eq!(donut.center_caption, "Total");
    assert_eq!(donut.center_label, "$250K");

    let existing = donut.slice("Existing Customer").unwrap();
    assert_eq!(existing.value, 150_000.0);
    assert_eq!(existing.share, 0.6);
    assert_eq!(existing.label, "$150K (60%)");
    assert_eq!(existing.start_angle, 0.0);

    assert_eq!(donut.slice("New Customer").unwrap().label, "$70K (28%)");
    assert_eq!(donut.slice("Partner").unwrap().label, "$30K (12%)");

    let last = donut.slices.last().unwrap();
    assert!((last.end_angle - TAU).abs() < 1e-9);
    for pair in donut.slices.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
}

#[test]
fn donut_with_zero_total_has_no_slices() {
    let records = vec![Record::new("New Customer", "Q1-24", 0.0)];
    let summary = AcvSummary::build(&records, &DashboardConfig::default());
    let donut = DonutView::build(&summary, &DashboardConfig::default());

    assert!(donut.slices.is_empty());
    assert_eq!(donut.center_label, "$0K");
}

// ── Table ────────────────────────────────────────────────────────────────────

#[test]
fn table_headers_alternate_shades() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let table = SummaryTableView::build(&summary);

    let labels: Vec<&str> = table.header_groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Closed Fiscal Quarter", "Q1-24", "Q2-24", "Total"]);
    assert_eq!(table.header_groups[1].shade, Shade::Dark);
    assert_eq!(table.header_groups[2].shade, Shade::Light);
    assert_eq!(table.header_groups[3].shade, Shade::Dark);
    assert_eq!(table.header_groups[3].span, 3);

    assert_eq!(table.sub_headers.len(), 1 + 3 * 3);
    assert_eq!(table.sub_headers[0], "Cust Type");
    assert_eq!(&table.sub_headers[1..4], &["# of Opps", "ACV", "% of Total"]);
}

#[test]
fn table_rows_match_summary() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let table = SummaryTableView::build(&summary);

    let existing = table.row("Existing Customer").unwrap();
    assert_eq!(
        existing.columns(),
        vec![
            "Existing Customer",
            "1", "$60,000", "60%",
            "1", "$90,000", "60%",
            "2", "$150,000", "60%",
        ]
    );

    let partner = table.row("Partner").unwrap();
    assert_eq!(partner.groups[0].count, "0");
    assert_eq!(partner.groups[0].acv, "$0");
    assert_eq!(partner.groups[0].percent, "0%");

    let total = table.total_row().unwrap();
    assert_eq!(
        total.columns(),
        vec![
            "Total",
            "2", "$100,000", "100%",
            "3", "$150,000", "100%",
            "5", "$250,000", "100%",
        ]
    );
}

#[test]
fn table_renders_as_aligned_text() {
    let summary = AcvSummary::build(&sample_records(), &DashboardConfig::default());
    let text = SummaryTableView::build(&summary).render_text();
    let lines: Vec<&str> = text.lines().collect();

    // group header, sub header, rule, 3 types, total
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("Closed Fiscal Quarter"));
    assert!(lines[1].starts_with("Cust Type"));
    assert!(lines[2].chars().all(|c| c == '-' || c == '+'));
    assert!(lines[6].starts_with("Total"));
    assert!(lines[6].contains("$250,000"));
    assert!(text.ends_with('\n'));
}

// ── Dashboard ────────────────────────────────────────────────────────────────

#[test]
fn empty_dataset_is_explicit_no_data_state() {
    let dashboard = Dashboard::build(&[], &DashboardConfig::default()).unwrap();

    assert!(dashboard.is_empty());
    assert_eq!(dashboard.title, "Won ACV mix by Cust Type");
    assert!(dashboard.bar().is_none());
    assert!(dashboard.donut().is_none());
    assert!(dashboard.table().is_none());
    match &dashboard.state {
        DashboardState::NoData { message } => assert_eq!(message, NO_DATA_MESSAGE),
        other => panic!("expected NoData, got {other:?}"),
    }
}

/// Bar totals, donut values and table totals all come from one summary and
/// must agree.
#[test]
fn views_agree_on_every_total() {
    let dashboard = ready(&sample_records());
    let summary = dashboard.summary().unwrap();
    let bar = dashboard.bar().unwrap();
    let donut = dashboard.donut().unwrap();

    for b in &bar.bars {
        assert_eq!(b.total, summary.quarter_total(&b.quarter).acv);
    }
    for s in &donut.slices {
        assert_eq!(s.value, summary.type_total(&s.customer_type).acv);
    }
    assert_eq!(donut.total, summary.grand_total.acv);
}

#[test]
fn custom_title_and_categories_flow_through() {
    let config = DashboardConfig {
        title: "Mix".into(),
        categories: vec![CategoryStyle {
            label: "New Customer".into(),
            color: "#000000".into(),
        }],
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::build(&sample_records(), &config).unwrap();

    assert_eq!(dashboard.title, "Mix");
    let summary = dashboard.summary().unwrap();
    assert_eq!(
        summary.customer_types,
        vec!["New Customer", "Existing Customer", "Partner"]
    );
    assert_eq!(dashboard.bar().unwrap().legend[0].color, "#000000");
    assert_eq!(dashboard.bar().unwrap().legend[1].color, "#2ca02c");
}

#[test]
fn dashboard_serializes_with_state_tag() {
    let dashboard = ready(&sample_records());
    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["state"], "ready");
    assert_eq!(json["title"], "Won ACV mix by Cust Type");

    let empty = Dashboard::build(&[], &DashboardConfig::default()).unwrap();
    let json = serde_json::to_value(&empty).unwrap();
    assert_eq!(json["state"], "no_data");
}

/// Records built in code skip intake, so an infinite total must surface as
/// an error instead of a NaN conservation check.
#[test]
fn overflowing_total_is_an_invalid_dataset() {
    let records = vec![
        Record::new("Existing Customer", "Q1-24", 1e308),
        Record::new("New Customer", "Q1-24", 1e308),
    ];
    let err = Dashboard::build(&records, &DashboardConfig::default()).unwrap_err();
    assert!(matches!(err, AcvError::InvalidDataset { .. }), "got {err:?}");
}

/// The JSON output reports what intake skipped, by index and reason.
#[test]
fn dashboard_json_reports_rejected_records() {
    let parsed = parse_records(
        r#"[
            {"Cust_Type": "New Customer", "closed_fiscal_quarter": "Q1-24", "acv": 100},
            {"Cust_Type": "New Customer", "closed_fiscal_quarter": "Q1-24"},
            {"Cust_Type": "New Customer", "closed_fiscal_quarter": "Q1-24", "acv": -5}
        ]"#,
    )
    .unwrap();
    let dashboard = Dashboard::from_parsed(&parsed, &DashboardConfig::default()).unwrap();
    assert_eq!(dashboard.rejected_count(), 2);

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["state"], "ready");
    let rejected = json["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0]["index"], 1);
    assert_eq!(rejected[1]["index"], 2);
    assert_eq!(rejected[1]["reason"], "negative_acv");

    let clean = ready(&sample_records());
    let json = serde_json::to_value(&clean).unwrap();
    assert_eq!(json["rejected"].as_array().unwrap().len(), 0);
}
