use pdf_manual_split::split_plan::SplitPlan;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle(u32),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        9 => (0u32..45).prop_map(Op::Toggle),
        1 => Just(Op::Clear),
    ]
}

fn run(total: u32, ops: &[Op]) -> SplitPlan {
    let mut plan = SplitPlan::new(total).unwrap();
    for op in ops {
        match op {
            Op::Toggle(p) => {
                let _ = plan.toggle_split(*p);
            }
            Op::Clear => plan.clear(),
        }
    }
    plan
}

proptest! {
    #[test]
    fn ranges_partition_all_pages(total in 1u32..40, ops in prop::collection::vec(op(), 0..60)) {
        let plan = run(total, &ops);
        let ranges = plan.derive_ranges();

        prop_assert!(!ranges.is_empty());
        prop_assert_eq!(ranges[0].start_page, 1);
        prop_assert_eq!(ranges.last().unwrap().end_page, total);
        for r in &ranges {
            prop_assert!(r.start_page <= r.end_page);
        }
        for w in ranges.windows(2) {
            prop_assert_eq!(w[0].end_page + 1, w[1].start_page);
        }
        let covered: u32 = ranges.iter().map(|r| r.page_count()).sum();
        prop_assert_eq!(covered, total);
    }

    #[test]
    fn split_points_start_at_one_and_increase(total in 1u32..40, ops in prop::collection::vec(op(), 0..60)) {
        let plan = run(total, &ops);
        let points: Vec<u32> = plan.split_points().collect();

        prop_assert_eq!(points[0], 1);
        for w in points.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        prop_assert!(points.iter().all(|p| (1..=total).contains(p)));
    }

    #[test]
    fn double_toggle_restores_plan(total in 2u32..40, ops in prop::collection::vec(op(), 0..30), seed in 1u32..1000) {
        let mut plan = run(total, &ops);
        let before = plan.clone();
        let page = 1 + seed % (total - 1);

        plan.toggle_split(page).unwrap();
        plan.toggle_split(page).unwrap();
        prop_assert_eq!(plan, before);
    }

    #[test]
    fn resolved_names_end_with_pdf(name in "\\PC{1,40}", stem in "[a-z]{1,10}") {
        let mut plan = SplitPlan::new(3).unwrap();
        if plan.set_name(0, &name).is_ok() {
            prop_assert!(plan.resolve_name(0, &stem).to_lowercase().ends_with(".pdf"));
        }
        prop_assert!(plan.resolve_name(1, &stem).ends_with(".pdf"));
    }
}
