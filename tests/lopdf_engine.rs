mod common;

use pdf_manual_split::{
    config::Config,
    engine::{native::LopdfEngine, Engine},
    probe::probe_pdf,
    split::Splitter,
    split_plan::{PageRange, SplitPlan},
};

#[test]
fn page_count_and_range_export() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.pdf");
    common::write_blank_pdf(&src, 5);

    let engine = LopdfEngine::new();
    assert_eq!(engine.page_count(&src).unwrap(), 5);

    let out = dir.path().join("mid.pdf");
    engine
        .write_range(
            &src,
            PageRange {
                start_page: 2,
                end_page: 4,
            },
            &out,
        )
        .unwrap();
    assert_eq!(common::page_count(&out), 3);
}

#[test]
fn range_end_is_clamped_to_document() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.pdf");
    common::write_blank_pdf(&src, 5);

    let out = dir.path().join("tail.pdf");
    LopdfEngine::new()
        .write_range(
            &src,
            PageRange {
                start_page: 4,
                end_page: 9,
            },
            &out,
        )
        .unwrap();
    assert_eq!(common::page_count(&out), 2);
}

#[test]
fn range_past_end_fails() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.pdf");
    common::write_blank_pdf(&src, 3);

    let out = dir.path().join("none.pdf");
    let res = LopdfEngine::new().write_range(
        &src,
        PageRange {
            start_page: 4,
            end_page: 6,
        },
        &out,
    );
    assert!(res.is_err());
    assert!(!out.exists());
}

#[test]
fn unreadable_source_fails_each_document() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("broken.pdf");
    std::fs::write(&src, b"not a pdf").unwrap();

    let mut plan = SplitPlan::new(4).unwrap();
    plan.toggle_split(2).unwrap();

    let splitter = Splitter::new(&Config::default(), LopdfEngine::new());
    let outcome = splitter
        .run(&src, &plan.finalize("broken"), &dir.path().join("out"))
        .unwrap();
    assert_eq!(outcome.failed, 2);
    assert_eq!(outcome.succeeded, 0);
    assert!(outcome.manifest_path.unwrap().exists());
}

#[test]
fn full_split_writes_every_part() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("report.pdf");
    common::write_blank_pdf(&src, 10);

    let cfg = Config::default();
    let probe = probe_pdf(&cfg, &LopdfEngine::new(), &src).unwrap();
    assert_eq!(probe.page_count, 10);

    let mut plan = SplitPlan::new(probe.page_count).unwrap();
    plan.toggle_split(3).unwrap();
    plan.toggle_split(6).unwrap();
    plan.set_name(0, "Intro").unwrap();

    let out = dir.path().join("_splitted");
    let outcome = Splitter::new(&cfg, LopdfEngine::new())
        .run(&src, &plan.finalize("report"), &out)
        .unwrap();

    assert!(outcome.all_ok());
    assert_eq!(common::page_count(&out.join("Intro.pdf")), 3);
    assert_eq!(common::page_count(&out.join("report_Part2.pdf")), 3);
    assert_eq!(common::page_count(&out.join("report_Part3.pdf")), 4);
    assert!(out.join("report_split_summary.json").exists());
}

#[test]
fn probe_enforces_page_limit() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("big.pdf");
    common::write_blank_pdf(&src, 6);

    let mut cfg = Config::default();
    cfg.limits.max_input_pages = 5;
    let err = probe_pdf(&cfg, &LopdfEngine::new(), &src).unwrap_err();
    assert!(err.to_string().contains("max_input_pages"));
}

#[test]
fn doctor_reports_ok() {
    let diag = LopdfEngine::new().doctor().unwrap();
    assert_eq!(diag.backend, "lopdf");
    assert!(diag.ok, "{:?}", diag.error);
}
