use chrono::{DateTime, Duration, TimeZone, Utc};

use matchday::{
    ChartAssembler, ChartConfig, ChartConfigPatch, ChartError, DayGrouper, Fixture,
    FixtureLoader, LayoutPlanner, SvgSink, WindowMerger, draw_plan,
};

fn kickoff(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, day, hour, minute, 0).unwrap()
}

fn fixture(id: u64, day: u32, hour: u32, minute: u32, round: u32) -> Fixture {
    Fixture::scheduled(id, kickoff(day, hour, minute), Duration::minutes(120), round, 1, 2)
}

fn assembler() -> ChartAssembler {
    ChartAssembler::new(ChartConfig::default()).expect("default config")
}

#[test]
fn same_day_overlaps_form_two_windows_in_one_row() {
    let output = assembler()
        .assemble(&[fixture(1, 17, 12, 0, 1), fixture(2, 17, 12, 30, 1), fixture(3, 17, 15, 0, 1)])
        .expect("assemble");

    assert_eq!(output.windows.len(), 2);
    assert_eq!(output.windows[0].start, kickoff(17, 12, 0));
    assert_eq!(output.windows[0].end, kickoff(17, 14, 30));
    assert_eq!(output.windows[0].active_count(), 2);
    assert_eq!(output.windows[1].start, kickoff(17, 15, 0));
    assert_eq!(output.windows[1].end, kickoff(17, 17, 0));
    assert_eq!(output.windows[1].active_count(), 1);

    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.groups[0].windows.len(), 2);

    let row = &output.plan.rows[0];
    assert_eq!(row.y, 60);
    assert_eq!(row.label, "SAT AUG 17, MW 1");
    let first = row.windows[0].bar.expect("visible bar");
    assert_eq!((first.start_x, first.end_x), (160 + 24 * 20, 160 + 34 * 20));
    let second = row.windows[1].bar.expect("visible bar");
    assert_eq!((second.start_x, second.end_x), (160 + 36 * 20, 160 + 44 * 20));
    assert_eq!(row.windows[0].intensity, 150);
    assert_eq!(row.windows[1].intensity, 100);

    assert_eq!(output.plan.height, 60 + 30 + 60);
}

#[test]
fn empty_input_yields_margins_only() {
    let output = assembler().assemble(&[]).expect("assemble");

    assert!(output.windows.is_empty());
    assert!(output.groups.is_empty());
    assert!(output.plan.rows.is_empty());
    assert_eq!(output.plan.height, 60 * 2);
    assert_eq!(output.summary(), "found 0 distinct match windows");
}

#[test]
fn two_rounds_on_one_day_get_separated_rows() {
    // a rearranged round 2 fixture played the evening after round 1's afternoon games
    let output = assembler()
        .assemble(&[fixture(1, 17, 12, 0, 1), fixture(2, 17, 15, 0, 2)])
        .expect("assemble");

    assert_eq!(output.groups.len(), 2);
    assert_eq!(output.groups[0].round(), 1);
    assert_eq!(output.groups[1].round(), 2);
    assert_eq!(output.groups[0].day(), output.groups[1].day());

    let rows = &output.plan.rows;
    assert!(!rows[0].separated);
    assert!(rows[1].separated);
    assert_eq!(rows[0].y, 60);
    assert_eq!(rows[1].y, 60 + 30 + 20);
    assert_eq!(output.plan.height, 60 + 30 + 20 + 30 + 60);
}

#[test]
fn sizing_pass_agrees_with_coordinate_pass() {
    let fixtures = [
        fixture(1, 16, 19, 0, 1),
        fixture(2, 17, 11, 30, 1),
        fixture(3, 17, 14, 0, 1),
        fixture(4, 18, 15, 30, 1),
        fixture(5, 23, 19, 0, 2),
        fixture(6, 24, 14, 0, 2),
        fixture(7, 31, 14, 0, 3),
        fixture(8, 31, 16, 30, 4),
    ];
    let planner = LayoutPlanner::new(ChartConfig::default()).expect("planner");
    let groups = DayGrouper::utc().group(&WindowMerger::merge(&fixtures).expect("merge"));

    let height = planner.measure_height(&groups).expect("height");
    let plan = planner.plan(&groups).expect("plan");
    let last = plan.rows.last().expect("rows");

    assert_eq!(plan.height, height);
    assert_eq!(last.y + plan.row_height + plan.top_margin, height);

    let transitions = plan.rows.iter().filter(|x| x.separated).count() as i32;
    assert_eq!(transitions, 3);
    assert_eq!(height, 60 + 30 * plan.rows.len() as i32 + 20 * transitions + 60);

    for pair in plan.rows.windows(2) {
        let gap = if pair[1].separated { 20 } else { 0 };
        assert_eq!(pair[1].y, pair[0].y + 30 + gap);
    }
}

#[test]
fn window_spanning_the_visible_range_is_clamped() {
    // 04:00 to 20:00 runs past both edges of the 06:00 to 18:00 range
    let marathon = Fixture::scheduled(1, kickoff(17, 4, 0), Duration::hours(16), 1, 1, 2);
    let output = assembler().assemble(&[marathon]).expect("assemble");

    assert_eq!(output.windows[0].end, kickoff(17, 20, 0));
    let bar = output.plan.rows[0].windows[0].bar.expect("visible bar");
    assert_eq!(bar.start_x, 160);
    assert_eq!(bar.end_x, 160 + (18 - 6) * 4 * 20);
}

#[test]
fn loader_applies_configured_match_duration() {
    let config = ChartConfig::default().apply_patch(ChartConfigPatch {
        match_duration_minutes: Some(16 * 60),
        ..Default::default()
    });
    let csv = "id,event,kickoff_time,team_h,team_a\n1,1,2024-08-17T04:00:00Z,1,2\n";
    let fixtures = FixtureLoader::from_config(&config)
        .load_from_reader(csv.as_bytes())
        .expect("load");
    assert_eq!(fixtures[0].end, kickoff(17, 20, 0));

    let output = ChartAssembler::new(config)
        .expect("config")
        .assemble(&fixtures)
        .expect("assemble");
    let bar = output.plan.rows[0].windows[0].bar.expect("visible bar");
    assert_eq!((bar.start_x, bar.end_x), (160, 160 + (18 - 6) * 4 * 20));
}

#[test]
fn evening_window_is_listed_without_a_bar() {
    let output = assembler()
        .assemble(&[fixture(1, 16, 19, 0, 1), fixture(2, 17, 12, 30, 1)])
        .expect("assemble");

    assert_eq!(output.plan.window_count(), 2);
    assert_eq!(output.plan.bar_count(), 1);
    assert!(output.plan.rows[0].windows[0].bar.is_none());
    assert_eq!(output.plan.rows[0].windows[0].active, 1);
}

#[test]
fn inconsistent_config_fails_before_fixtures_are_read() {
    let config = ChartConfig::default().apply_patch(ChartConfigPatch {
        start_hour: Some(20),
        end_hour: Some(8),
        ..Default::default()
    });
    assert!(matches!(
        ChartAssembler::new(config),
        Err(ChartError::Configuration(_))
    ));
}

#[test]
fn oversized_canvas_config_is_rejected() {
    for patch in [
        ChartConfigPatch {
            top_margin: Some(1_200_000_000),
            ..Default::default()
        },
        ChartConfigPatch {
            block_width: Some(100_000_000),
            ..Default::default()
        },
    ] {
        assert!(matches!(
            ChartAssembler::new(ChartConfig::default().apply_patch(patch)),
            Err(ChartError::Configuration(_))
        ));
    }
}

#[test]
fn malformed_fixture_aborts_assembly() {
    let mut broken = fixture(2, 17, 15, 0, 1);
    broken.end = broken.start - Duration::hours(1);

    let result = assembler().assemble(&[fixture(1, 17, 12, 0, 1), broken]);
    assert!(matches!(result, Err(ChartError::MalformedInput(_))));
}

#[test]
fn summary_keeps_merge_order_not_row_order() {
    // round 2 window is earlier in time but stacked below round 1
    let output = assembler()
        .assemble(&[fixture(1, 17, 12, 0, 2), fixture(2, 18, 12, 0, 1)])
        .expect("assemble");

    assert_eq!(output.plan.rows[0].round, 1);
    let lines = output.summary_lines();
    assert_eq!(lines[0], "found 2 distinct match windows");
    assert!(lines[1].starts_with("window 1: start=2024-08-17T12:00:00.000Z"));
    assert!(lines[2].starts_with("window 2: start=2024-08-18T12:00:00.000Z"));
}

#[test]
fn rendered_svg_has_a_bar_per_visible_window() {
    let output = assembler()
        .assemble(&[fixture(1, 17, 12, 0, 1), fixture(2, 17, 12, 30, 1), fixture(3, 17, 15, 0, 1)])
        .expect("assemble");

    let mut sink = SvgSink::new();
    draw_plan(&output.plan, &mut sink);
    let svg = sink.into_string();

    assert_eq!(svg.matches(r#"rx="4""#).count(), 2);
    assert!(svg.contains(r#"height="150""#));
}
