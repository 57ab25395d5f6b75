//! Task desirability scoring and the stable descending sort.
//!
//! Score terms (all additive):
//! - energy-type match: +100
//! - energy-cost affordability: +50, or -30 when the task costs more than the tier
//! - priority weight x 15
//! - status: in-progress +25, blocked -50
//! - deadline urgency: +40 overdue/today, +20 tomorrow, +10 within 3 days
//! - terminal: -1000

use chrono::NaiveDate;
use tracing::debug;

use crate::task::{EnergyLevel, Task, TaskStatus, TaskType};
use crate::time::days_until;

pub const TYPE_MATCH_BONUS: i32 = 100;
pub const AFFORDABLE_BONUS: i32 = 50;
pub const OVER_BUDGET_PENALTY: i32 = -30;
pub const PRIORITY_STEP: i32 = 15;
pub const IN_PROGRESS_BONUS: i32 = 25;
pub const BLOCKED_PENALTY: i32 = -50;
pub const TERMINAL_PENALTY: i32 = -1000;

/// Inputs shared by every task scored in one planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreContext {
    pub tier: EnergyLevel,
    pub today: NaiveDate,
    /// Whether any task in the scored set carries a deadline.
    pub deadlines_in_play: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTask {
    pub score: i32,
    pub task: Task,
}

/// high: focus/creative/physical, medium: admin/creative, low: admin.
pub fn type_matches(task_type: TaskType, tier: EnergyLevel) -> bool {
    match tier {
        EnergyLevel::High => matches!(
            task_type,
            TaskType::Focus | TaskType::Creative | TaskType::Physical
        ),
        EnergyLevel::Medium => matches!(task_type, TaskType::Admin | TaskType::Creative),
        EnergyLevel::Low => task_type == TaskType::Admin,
    }
}

pub fn score_task(task: &Task, ctx: &ScoreContext) -> i32 {
    let mut score = 0;

    if type_matches(task.task_type, ctx.tier) {
        score += TYPE_MATCH_BONUS;
    }

    score += if task.energy_cost.level() <= ctx.tier.level() {
        AFFORDABLE_BONUS
    } else {
        OVER_BUDGET_PENALTY
    };

    score += task.priority.weight() * PRIORITY_STEP;

    score += match task.status {
        TaskStatus::InProgress => IN_PROGRESS_BONUS,
        TaskStatus::Blocked => BLOCKED_PENALTY,
        TaskStatus::Todo | TaskStatus::Done => 0,
    };

    if ctx.deadlines_in_play {
        score += deadline_bonus(task, ctx.today);
    }

    if task.is_terminal() {
        score += TERMINAL_PENALTY;
    }

    score
}

fn deadline_bonus(task: &Task, today: NaiveDate) -> i32 {
    let Some(raw) = task.deadline.as_deref() else {
        return 0;
    };
    let Some(days) = days_until(raw, today) else {
        debug!(task_id = %task.id, deadline = raw, "unparseable deadline, treating as none");
        return 0;
    };

    match days {
        d if d <= 0 => 40,
        1 => 20,
        d if d <= 3 => 10,
        _ => 0,
    }
}

/// Score and sort descending. The sort is stable, so equal scores keep
/// their input order.
pub fn rank(tasks: Vec<Task>, ctx: &ScoreContext) -> Vec<ScoredTask> {
    let mut scored: Vec<ScoredTask> = tasks
        .into_iter()
        .map(|task| ScoredTask {
            score: score_task(&task, ctx),
            task,
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn ctx(tier: EnergyLevel) -> ScoreContext {
        ScoreContext {
            tier,
            today: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            deadlines_in_play: false,
        }
    }

    fn admin_task() -> Task {
        Task::new("t1", "expenses")
            .with_type(TaskType::Admin)
            .with_cost(EnergyLevel::Low)
            .with_priority(Priority::Medium)
    }

    #[test]
    fn admin_low_medium_todo_at_medium_tier_scores_180() {
        assert_eq!(score_task(&admin_task(), &ctx(EnergyLevel::Medium)), 180);
    }

    #[test]
    fn over_budget_cost_is_penalized() {
        let t = Task::new("t", "marathon prep")
            .with_type(TaskType::Physical)
            .with_cost(EnergyLevel::High)
            .with_priority(Priority::Low);
        // no type match at low, -30 cost, +15 priority
        assert_eq!(score_task(&t, &ctx(EnergyLevel::Low)), -15);
        // match at high, +50 cost, +15 priority
        assert_eq!(score_task(&t, &ctx(EnergyLevel::High)), 165);
    }

    #[test]
    fn status_terms() {
        let base = score_task(&admin_task(), &ctx(EnergyLevel::Medium));
        let ip = admin_task().with_status(TaskStatus::InProgress);
        let blocked = admin_task().with_status(TaskStatus::Blocked);
        let done = admin_task().with_status(TaskStatus::Done);
        let c = ctx(EnergyLevel::Medium);
        assert_eq!(score_task(&ip, &c), base + 25);
        assert_eq!(score_task(&blocked, &c), base - 50);
        assert_eq!(score_task(&done, &c), base - 1000);
    }

    #[test]
    fn deadline_terms_only_when_in_play() {
        let mut c = ctx(EnergyLevel::Medium);
        let base = score_task(&admin_task(), &c);

        let today = admin_task().with_deadline("2026-03-02");
        assert_eq!(score_task(&today, &c), base);

        c.deadlines_in_play = true;
        assert_eq!(score_task(&today, &c), base + 40);
        assert_eq!(score_task(&admin_task().with_deadline("2026-02-20"), &c), base + 40);
        assert_eq!(score_task(&admin_task().with_deadline("2026-03-03"), &c), base + 20);
        assert_eq!(score_task(&admin_task().with_deadline("2026-03-05"), &c), base + 10);
        assert_eq!(score_task(&admin_task().with_deadline("2026-03-06"), &c), base);
        assert_eq!(score_task(&admin_task().with_deadline("soon-ish"), &c), base);
    }

    #[test]
    fn type_match_is_monotone_in_tier_for_energetic_types() {
        for ty in [TaskType::Focus, TaskType::Creative, TaskType::Physical] {
            let hits: Vec<bool> = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High]
                .into_iter()
                .map(|tier| type_matches(ty, tier))
                .collect();
            assert!(hits.windows(2).all(|w| !w[0] || w[1]), "{ty:?}: {hits:?}");
        }
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| admin_task().with_minutes(10 + i).with_deadline("x"))
            .enumerate()
            .map(|(i, mut t)| {
                t.id = format!("t{i}");
                t
            })
            .collect();
        let ranked = rank(tasks, &ctx(EnergyLevel::Medium));
        let ids: Vec<&str> = ranked.iter().map(|s| s.task.id.as_str()).collect();
        assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4"]);
        assert!(ranked.iter().all(|s| s.score == 180));
    }

    #[test]
    fn rank_orders_by_score_descending() {
        let low = admin_task().with_priority(Priority::Low);
        let mut crit = admin_task().with_priority(Priority::Critical);
        crit.id = "crit".into();
        let ranked = rank(vec![low, crit], &ctx(EnergyLevel::Medium));
        assert_eq!(ranked[0].task.id, "crit");
        assert_eq!(ranked[0].score, 210);
        assert_eq!(ranked[1].score, 165);
    }
}
