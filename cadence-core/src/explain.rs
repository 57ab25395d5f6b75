//! Plain-language rationale for a generated plan.

use crate::planner::PlanItem;
use crate::scoring::type_matches;
use crate::task::{EnergyLevel, Task};

pub const NOTHING_TO_PLAN: &str = "No tasks to plan today. Take a moment to rest.";
pub const ALL_COMPLETE: &str = "All tasks are complete. Well done.";

pub fn describe_tier(tier: EnergyLevel) -> &'static str {
    match tier {
        EnergyLevel::Low => "lower energy",
        EnergyLevel::Medium => "moderate energy",
        EnergyLevel::High => "higher energy",
    }
}

/// Build the explanation from the final item order.
pub fn explain(items: &[PlanItem], tier: EnergyLevel, sleep_hours: Option<f64>) -> String {
    let tasks: Vec<&Task> = items.iter().filter_map(PlanItem::as_task).collect();
    if tasks.is_empty() {
        return NOTHING_TO_PLAN.to_string();
    }

    let open: Vec<&Task> = tasks.into_iter().filter(|t| !t.is_terminal()).collect();
    let Some(first) = open.first() else {
        return ALL_COMPLETE.to_string();
    };

    let mut out = String::new();

    if let Some(s) = sleep_hours {
        if s < 6.0 {
            out.push_str(&format!(
                "With {s} hours of sleep, we've adjusted your plan for lower energy. "
            ));
        } else if (7.0..=9.0).contains(&s) {
            out.push_str(&format!("With {s} hours of restful sleep, "));
        } else {
            out.push_str(&format!("With {s} hours of sleep, "));
        }
    }

    out.push_str(&format!("Based on your {} right now, ", describe_tier(tier)));

    if open.iter().any(|t| type_matches(t.task_type, tier)) {
        out.push_str("we've prioritized tasks that align with your current energy level. ");
        out.push_str(&format!(
            "Starting with \"{}\" which matches your energy.",
            first.title
        ));
    } else {
        out.push_str("we've arranged lighter tasks first. ");
        out.push_str(&format!(
            "Starting with \"{}\" which fits your current capacity.",
            first.title
        ));
    }

    let breaks = items.iter().filter(|i| i.as_break().is_some()).count();
    if breaks > 0 {
        let plural = if breaks > 1 { "s" } else { "" };
        out.push_str(&format!(
            " We've also scheduled {breaks} break{plural} throughout your day to help maintain your energy."
        ));
    }

    if open.iter().any(|t| t.deadline.is_some()) {
        out.push_str(
            " Tasks with deadlines have been considered while keeping your energy in mind.",
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::schedule;
    use crate::task::{TaskStatus, TaskType};

    #[test]
    fn empty_plan() {
        assert_eq!(explain(&[], EnergyLevel::High, Some(8.0)), NOTHING_TO_PLAN);
    }

    #[test]
    fn everything_done() {
        let items = vec![PlanItem::Task(
            Task::new("d", "shipped").with_status(TaskStatus::Done),
        )];
        assert_eq!(explain(&items, EnergyLevel::Low, None), ALL_COMPLETE);
    }

    #[test]
    fn aligned_phrasing_without_sleep() {
        let items = vec![PlanItem::Task(
            Task::new("a", "Pay bills").with_type(TaskType::Admin),
        )];
        assert_eq!(
            explain(&items, EnergyLevel::Medium, None),
            "Based on your moderate energy right now, we've prioritized tasks that align \
             with your current energy level. Starting with \"Pay bills\" which matches your energy."
        );
    }

    #[test]
    fn lighter_phrasing_with_short_sleep() {
        let items = vec![PlanItem::Task(
            Task::new("a", "Refactor parser").with_type(TaskType::Focus),
        )];
        assert_eq!(
            explain(&items, EnergyLevel::Low, Some(5.5)),
            "With 5.5 hours of sleep, we've adjusted your plan for lower energy. \
             Based on your lower energy right now, we've arranged lighter tasks first. \
             Starting with \"Refactor parser\" which fits your current capacity."
        );
    }

    #[test]
    fn sleep_buckets() {
        let items = vec![PlanItem::Task(Task::new("a", "x").with_type(TaskType::Focus))];
        assert!(explain(&items, EnergyLevel::High, Some(8.0))
            .starts_with("With 8 hours of restful sleep, Based on your higher energy"));
        assert!(explain(&items, EnergyLevel::High, Some(6.5))
            .starts_with("With 6.5 hours of sleep, Based on"));
        assert!(explain(&items, EnergyLevel::High, Some(10.0))
            .starts_with("With 10 hours of sleep, Based on"));
    }

    #[test]
    fn counts_breaks_and_mentions_deadlines() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| {
                Task::new(format!("t{i}"), format!("task {i}"))
                    .with_type(TaskType::Focus)
                    .with_minutes(40)
            })
            .collect();
        let mut with_deadline = tasks.clone();
        with_deadline[3].deadline = Some("2026-03-04".into());

        let text = explain(&schedule(tasks, 9), EnergyLevel::High, None);
        assert!(text.ends_with(
            " We've also scheduled 2 breaks throughout your day to help maintain your energy."
        ));

        let text = explain(&schedule(with_deadline, 9), EnergyLevel::High, None);
        assert!(text.ends_with(
            " Tasks with deadlines have been considered while keeping your energy in mind."
        ));
    }

    #[test]
    fn single_break_is_singular() {
        let items = schedule(
            vec![Task::new("a", "x").with_type(TaskType::Admin).with_minutes(120)],
            8,
        );
        assert_eq!(items.len(), 2);
        assert!(explain(&items, EnergyLevel::Low, None).contains(" scheduled 1 break throughout"));
    }

    #[test]
    fn first_open_task_is_named_even_after_done_ones() {
        let items = vec![
            PlanItem::Task(Task::new("d", "old").with_status(TaskStatus::Done)),
            PlanItem::Task(Task::new("a", "fresh").with_type(TaskType::Admin)),
        ];
        assert!(explain(&items, EnergyLevel::Low, None).contains("Starting with \"fresh\""));
    }
}
