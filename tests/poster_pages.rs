//! Whole pages: paper choice, composition and SVG output

mod common;

use pretty_assertions::assert_eq;
use tourney_poster::layout::{LayoutConfig, Strategy};
use tourney_poster::renderer::{compose_page, SvgCanvas, SvgConfig};
use tourney_poster::{
    render_page, BracketModel, PageArgs, PageContext, PageError, PageKind, PaperError, Schedule,
};

fn metrics() -> SvgCanvas {
    SvgCanvas::new(SvgConfig::default(), Default::default())
}

#[test]
fn test_best_fit_paper_by_team_count() {
    let cases = [
        (16, "en_US", "16x20"),
        (24, "en_US", "22x28"),
        (32, "en_US", "22x28"),
        (48, "en_US", "24x36"),
        (16, "en", "a2"),
    ];
    for (seeds, locale, paper) in cases {
        let model = common::model(seeds);
        let strings = common::strings(&model);
        let args = PageArgs::default().with_locale(locale);
        let ctx = PageContext::new(&args, &model, &strings).unwrap();
        assert_eq!(ctx.paper.name(), paper, "{} seeds in {}", seeds, locale);
    }
}

#[test]
fn test_too_many_teams_for_any_paper() {
    let model = common::model(64);
    let strings = common::strings(&model);
    let args = PageArgs::default();

    let err = PageContext::new(&args, &model, &strings).unwrap_err();
    assert!(matches!(
        err,
        PageError::Paper(PaperError::NoBestFit { teams: 64 })
    ));
}

#[test]
fn test_composed_blocks_stay_on_canvas() {
    let config = LayoutConfig::default();
    for seeds in [32, 48] {
        let model = common::model(seeds);
        let strings = common::strings(&model);
        let args = PageArgs::default();
        let ctx = PageContext::new(&args, &model, &strings).unwrap();

        let page = compose_page(&ctx, &config, &metrics()).unwrap();
        assert!(page.bracket.is_some());
        for rect in page.block_rects() {
            assert!(
                page.canvas.contains_box(&rect, 1e-6),
                "{} seeds: {:?} outside {:?}",
                seeds,
                rect,
                page.canvas
            );
        }
    }
}

#[test]
fn test_groups_split_across_sides() {
    let model = common::model(48);
    let strings = common::strings(&model);
    let config = LayoutConfig::default();

    let args = PageArgs::default();
    let ctx = PageContext::new(&args, &model, &strings).unwrap();
    let page = compose_page(&ctx, &config, &metrics()).unwrap();
    assert_eq!(page.left_groups.groups(), &['A', 'B', 'C', 'D', 'E', 'F']);
    assert_eq!(page.right_groups.groups(), &['G', 'H', 'I', 'J', 'K', 'L']);

    let args = PageArgs::default().with_locale("fa").with_paper("24x36");
    let ctx = PageContext::new(&args, &model, &strings).unwrap();
    let page = compose_page(&ctx, &config, &metrics()).unwrap();
    assert_eq!(page.left_groups.groups(), &['G', 'H', 'I', 'J', 'K', 'L']);
    assert_eq!(page.right_groups.groups(), &['A', 'B', 'C', 'D', 'E', 'F']);
}

#[test]
fn test_narrow_paper_moves_groups_below() {
    let model = common::model(48);
    let strings = common::strings(&model);
    let args = PageArgs::default().with_paper("24x36").with_orientation(
        tourney_poster::Orientation::Portrait,
    );
    let ctx = PageContext::new(&args, &model, &strings).unwrap();

    match compose_page(&ctx, &LayoutConfig::default(), &metrics()) {
        Ok(page) => assert_eq!(page.strategy, Strategy::HorizontalOverflow),
        Err(err) => assert!(err.to_string().contains("overflows")),
    }
}

#[test]
fn test_fixtures_page_svg() {
    let model = common::model(48);
    let strings = common::strings(&model);
    let args = PageArgs::default();
    let ctx = PageContext::new(&args, &model, &strings).unwrap();

    let svg = render_page(&ctx).unwrap();
    assert!(svg.contains(r#"width="36in" height="24in""#));
    for group in ["groups", "calendar", "bracket", "final", "header", "footer"] {
        assert!(svg.contains(&format!(r#"<g class="tp-{}">"#, group)), "{}", group);
    }
    assert!(svg.contains("2026 Synthetic Cup Fixtures"));
    assert!(svg.contains("All times: PDT (UTC-7)"));
    assert!(svg.contains("GROUP STAGE"));
    assert!(svg.contains("QUARTERFINALS"));
    assert!(svg.contains("FINAL"));
    assert!(svg.contains("TEAM-L4"));
    assert!(!svg.contains("Arena"));
}

#[test]
fn test_results_page_shows_scores_and_venues() {
    let schedule = Schedule::from_str("played", &common::schedule_toml(48, true)).unwrap();
    let model = BracketModel::build(&schedule).unwrap();
    let strings = common::strings(&model);
    let args = PageArgs::default().with_results(true);
    let ctx = PageContext::new(&args, &model, &strings).unwrap();

    let svg = render_page(&ctx).unwrap();
    assert!(svg.contains("2026 Synthetic Cup Results"));
    assert!(svg.contains(">Arena</text>"));
    assert!(svg.contains(r#"paint-order="stroke""#));
}

#[test]
fn test_crop_marks_drawn_in_margin() {
    let model = common::model(48);
    let strings = common::strings(&model);
    let args = PageArgs::default().with_paper("26x38").with_crop("24x36");
    let ctx = PageContext::new(&args, &model, &strings).unwrap();
    assert!(ctx.frame.is_cropped());

    let svg = render_page(&ctx).unwrap();
    let marks = svg.matches(r##"stroke="#808080""##).count();
    assert_eq!(marks, 8);
}

#[test]
fn test_crop_without_paper_is_rejected() {
    let model = common::model(48);
    let strings = common::strings(&model);
    let mut args = PageArgs::default();
    args.crop = Some("24x36".to_string());

    let err = PageContext::new(&args, &model, &strings).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"crop '24x36' needs an explicit paper size");
}

#[test]
fn test_calendar_only_page() {
    let model = common::model(32);
    let strings = common::strings(&model);
    let args = PageArgs::new(PageKind::CalOnly).with_paper("30x40");
    let ctx = PageContext::new(&args, &model, &strings).unwrap();

    let page = compose_page(&ctx, &LayoutConfig::default(), &metrics()).unwrap();
    assert!(page.bracket.is_none());
    assert!(page.final_rect.y > page.calendar.bounds().bottom());

    let svg = render_page(&ctx).unwrap();
    assert!(!svg.contains(r#"class="tp-bracket""#));
}
