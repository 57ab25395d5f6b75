use cadence_core::{
    EnergyLevel, EnergySignal, PlanItem, PlanOptions, Priority, Task, TaskStatus, TaskType,
    plan_day,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn task_type() -> impl Strategy<Value = TaskType> {
    prop_oneof![
        Just(TaskType::Focus),
        Just(TaskType::Admin),
        Just(TaskType::Creative),
        Just(TaskType::Physical),
    ]
}

fn cost() -> impl Strategy<Value = EnergyLevel> {
    prop_oneof![
        Just(EnergyLevel::Low),
        Just(EnergyLevel::Medium),
        Just(EnergyLevel::High),
    ]
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Blocked),
        Just(TaskStatus::Done),
    ]
}

fn deadline() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("2026-03-01".to_string())),
        Just(Some("2026-03-03".to_string())),
        Just(Some("2026-03-20T17:00:00Z".to_string())),
        Just(Some("someday".to_string())),
    ]
}

prop_compose! {
    fn shape()(
        task_type in task_type(),
        cost in cost(),
        priority in priority(),
        status in status(),
        minutes in proptest::option::of(1u32..180),
        deadline in deadline(),
        tagged in any::<bool>(),
    ) -> (TaskType, EnergyLevel, Priority, TaskStatus, Option<u32>, Option<String>, bool) {
        (task_type, cost, priority, status, minutes, deadline, tagged)
    }
}

fn backlog() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(shape(), 0..24).prop_map(|shapes| {
        shapes
            .into_iter()
            .enumerate()
            .map(|(i, (task_type, cost, priority, status, minutes, deadline, tagged))| {
                let mut t = Task::new(format!("t{i}"), format!("task {i}"))
                    .with_type(task_type)
                    .with_cost(cost)
                    .with_priority(priority)
                    .with_status(status);
                t.estimated_minutes = minutes;
                t.deadline = deadline;
                if tagged {
                    t.tags.push("work".into());
                }
                t
            })
            .collect()
    })
}

fn options() -> impl Strategy<Value = PlanOptions> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(0u32..24),
        proptest::option::of(0.0f64..12.0),
    )
        .prop_map(|(only_work, exclude_blocked, start_hour, sleep_hours)| PlanOptions {
            filter_tags: if only_work { vec!["work".into()] } else { Vec::new() },
            exclude_blocked,
            start_hour,
            sleep_hours,
            ..Default::default()
        })
}

fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn plan_keeps_exactly_the_filtered_tasks(
        tasks in backlog(),
        opts in options(),
        value in 1u8..=5,
    ) {
        let plan = plan_day(&tasks, EnergySignal::new(value), today(), &opts);

        let expected: Vec<String> = tasks
            .iter()
            .filter(|t| cadence_core::filter::matches(t, &opts))
            .map(|t| t.id.clone())
            .collect();
        let planned: Vec<String> = plan.tasks().map(|t| t.id.clone()).collect();
        prop_assert_eq!(sorted(planned), sorted(expected));

        for item in &plan.ordered_tasks {
            if let PlanItem::Break(b) = item {
                prop_assert!(b.id.starts_with("break-"));
                prop_assert!(b.duration > 0);
            }
        }
    }

    #[test]
    fn done_tasks_trail_open_ones(tasks in backlog(), value in 1u8..=5) {
        let plan = plan_day(&tasks, EnergySignal::new(value), today(), &PlanOptions::default());
        let terminal: Vec<bool> = plan.tasks().map(Task::is_terminal).collect();
        let first_done = terminal.iter().position(|d| *d).unwrap_or(terminal.len());
        prop_assert!(terminal[first_done..].iter().all(|d| *d));
    }

    #[test]
    fn breaks_never_lead_or_double_up(tasks in backlog(), opts in options(), value in 1u8..=5) {
        let plan = plan_day(&tasks, EnergySignal::new(value), today(), &opts);
        let is_break: Vec<bool> = plan
            .ordered_tasks
            .iter()
            .map(|i| i.as_break().is_some())
            .collect();
        prop_assert!(!is_break.first().copied().unwrap_or(false));
        prop_assert!(is_break.windows(2).all(|w| !(w[0] && w[1])));

        let mut ids: Vec<&str> = plan.breaks().map(|b| b.id.as_str()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn identical_scores_keep_input_order(n in 1usize..12, value in 1u8..=5) {
        let tasks: Vec<Task> = (0..n)
            .map(|i| Task::new(format!("same{i}"), "same").with_minutes(5))
            .collect();
        let plan = plan_day(&tasks, EnergySignal::new(value), today(), &PlanOptions::default());
        let ids: Vec<&str> = plan.tasks().map(|t| t.id.as_str()).collect();
        let expected: Vec<String> = (0..n).map(|i| format!("same{i}")).collect();
        prop_assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn planning_is_deterministic(tasks in backlog(), opts in options(), value in 1u8..=5) {
        let a = plan_day(&tasks, EnergySignal::new(value), today(), &opts);
        let b = plan_day(&tasks, EnergySignal::new(value), today(), &opts);
        prop_assert_eq!(a, b);
    }
}
